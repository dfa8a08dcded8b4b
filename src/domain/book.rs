use std::fmt;

use super::{Isbn, Quantity};

/// 書籍レコード - ISBNごとに1件
///
/// `quantity`は手元にある冊数（貸出中の冊数は含まない）。
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub isbn: Isbn,
    pub title: String,
    pub authors: Vec<String>,
    pub publishing_year: i32,
    pub price: f64,
    pub quantity: Quantity,
}

impl BookRecord {
    /// タイトルまたはISBNに検索語が部分一致するか
    pub fn matches_term(&self, term: &str) -> bool {
        self.title.contains(term) || self.isbn.as_str().contains(term)
    }

    /// いずれかの著者名に部分一致するか
    pub fn has_author_matching(&self, name: &str) -> bool {
        self.authors.iter().any(|author| author.contains(name))
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} (ISBN: {}, Year: {}, Price: {:?}, Quantity: {})",
            self.title,
            self.authors.join(", "),
            self.isbn,
            self.publishing_year,
            self.price,
            self.quantity
        )
    }
}
