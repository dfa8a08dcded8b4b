#![allow(dead_code)]

use library_inventory::{BookRecord, Isbn, Quantity};

/// テスト用の書籍レコードを作成
///
/// タイトル以外の項目は固定値。
pub fn book(isbn: &str, title: &str, quantity: u32) -> BookRecord {
    BookRecord {
        isbn: Isbn::new(isbn),
        title: title.to_string(),
        authors: vec!["Test Author".to_string()],
        publishing_year: 2020,
        price: 15.0,
        quantity: Quantity::new(quantity),
    }
}

/// 著者を指定してテスト用の書籍レコードを作成
pub fn book_by(isbn: &str, title: &str, authors: &[&str]) -> BookRecord {
    BookRecord {
        authors: authors.iter().map(|author| author.to_string()).collect(),
        ..book(isbn, title, 1)
    }
}
