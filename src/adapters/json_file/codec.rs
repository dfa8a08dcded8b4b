//! JSON document codec for the persisted catalog.
//!
//! The document layout is shared with existing `books.json` files:
//!
//! ```text
//! {
//!   "books": { "<isbn>": { "title", "authors", "isbn", "publishing_year", "price", "quantity" } },
//!   "lent_books": { "<isbn>": [["<borrower>", <copies>], ...] }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{BookRecord, Borrower, Inventory, Isbn, LoanEntry, Quantity};

/// Errors raised while decoding a persisted catalog document
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("book stored under key '{key}' has isbn '{isbn}'")]
    IsbnMismatch { key: String, isbn: String },

    #[error("book '{isbn}' has invalid price {price}")]
    InvalidPrice { isbn: String, price: f64 },
}

/// Top-level persisted document
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCatalog {
    books: IndexMap<String, PersistedBook>,
    lent_books: IndexMap<String, Vec<(String, u32)>>,
}

/// Persisted book record, field order matches existing files
#[derive(Debug, Serialize, Deserialize)]
struct PersistedBook {
    title: String,
    authors: Vec<String>,
    isbn: String,
    publishing_year: i32,
    price: f64,
    quantity: u32,
}

impl From<&BookRecord> for PersistedBook {
    fn from(book: &BookRecord) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors.clone(),
            isbn: book.isbn.as_str().to_string(),
            publishing_year: book.publishing_year,
            price: book.price,
            quantity: book.quantity.value(),
        }
    }
}

impl From<&Inventory> for PersistedCatalog {
    fn from(inventory: &Inventory) -> Self {
        let books = inventory
            .books()
            .map(|book| (book.isbn.as_str().to_string(), PersistedBook::from(book)))
            .collect();

        let lent_books = inventory
            .loan_groups()
            .map(|(isbn, entries)| {
                let pairs: Vec<_> = entries
                    .iter()
                    .map(|entry| (entry.borrower.as_str().to_string(), entry.copies.value()))
                    .collect();
                (isbn.as_str().to_string(), pairs)
            })
            .collect();

        Self { books, lent_books }
    }
}

impl PersistedCatalog {
    /// Validate the document and rebuild the inventory
    fn into_inventory(self) -> Result<Inventory, CodecError> {
        let mut books = IndexMap::with_capacity(self.books.len());
        for (key, book) in self.books {
            if key != book.isbn {
                return Err(CodecError::IsbnMismatch {
                    key,
                    isbn: book.isbn,
                });
            }
            if !is_valid_price(book.price) {
                return Err(CodecError::InvalidPrice {
                    isbn: book.isbn,
                    price: book.price,
                });
            }

            let isbn = Isbn::new(key);
            let record = BookRecord {
                isbn: isbn.clone(),
                title: book.title,
                authors: book.authors,
                publishing_year: book.publishing_year,
                price: book.price,
                quantity: Quantity::new(book.quantity),
            };
            books.insert(isbn, record);
        }

        let loans = self
            .lent_books
            .into_iter()
            .map(|(isbn, pairs)| {
                let entries: Vec<_> = pairs
                    .into_iter()
                    .map(|(borrower, copies)| LoanEntry {
                        borrower: Borrower::new(borrower),
                        copies: Quantity::new(copies),
                    })
                    .collect();
                (Isbn::new(isbn), entries)
            })
            .collect();

        Ok(Inventory::from_parts(books, loans))
    }
}

/// Prices must survive a JSON round trip, which rules out NaN and infinities
fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Serialize the whole inventory into a catalog document
///
/// Refuses to produce a document that `decode` would reject.
pub fn encode(inventory: &Inventory) -> Result<Vec<u8>, CodecError> {
    if let Some(book) = inventory.books().find(|book| !is_valid_price(book.price)) {
        return Err(CodecError::InvalidPrice {
            isbn: book.isbn.as_str().to_string(),
            price: book.price,
        });
    }
    Ok(serde_json::to_vec(&PersistedCatalog::from(inventory))?)
}

/// Parse a catalog document back into an inventory
pub fn decode(bytes: &[u8]) -> Result<Inventory, CodecError> {
    let document: PersistedCatalog = serde_json::from_slice(bytes)?;
    document.into_inventory()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_book(BookRecord {
            isbn: Isbn::new("111"),
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            publishing_year: 1965,
            price: 9.99,
            quantity: Quantity::new(3),
        });
        inventory.add_book(BookRecord {
            isbn: Isbn::new("222"),
            title: "Good Omens".to_string(),
            authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
            publishing_year: 1990,
            price: 12.0,
            quantity: Quantity::new(1),
        });
        let isbn = Isbn::new("111");
        inventory.lend_book(&isbn, Borrower::new("Alice")).unwrap();
        inventory.lend_book(&isbn, Borrower::new("Bob")).unwrap();
        inventory.lend_book(&isbn, Borrower::new("Alice")).unwrap();
        inventory
    }

    #[test]
    fn test_encode_produces_expected_layout() {
        let bytes = encode(&sample_inventory()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            value,
            json!({
                "books": {
                    "111": {
                        "title": "Dune",
                        "authors": ["Frank Herbert"],
                        "isbn": "111",
                        "publishing_year": 1965,
                        "price": 9.99,
                        "quantity": 0
                    },
                    "222": {
                        "title": "Good Omens",
                        "authors": ["Terry Pratchett", "Neil Gaiman"],
                        "isbn": "222",
                        "publishing_year": 1990,
                        "price": 12.0,
                        "quantity": 1
                    }
                },
                "lent_books": {
                    "111": [["Alice", 1], ["Bob", 1], ["Alice", 1]]
                }
            })
        );
    }

    #[test]
    fn test_decode_restores_equivalent_inventory() {
        let original = sample_inventory();
        let restored = decode(&encode(&original).unwrap()).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn test_decode_restores_full_precision_prices() {
        let mut inventory = Inventory::new();

        // 決定的な擬似乱数で全精度の価格を作る
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for i in 0..20_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;

            let unit = (seed >> 11) as f64 / (1u64 << 53) as f64;
            let price = if i % 2 == 0 {
                unit * 1000.0
            } else {
                let value = f64::from_bits(seed & (u64::MAX >> 1));
                if value.is_finite() { value } else { unit }
            };
            inventory.add_book(BookRecord {
                isbn: Isbn::new(i.to_string()),
                title: format!("Book {i}"),
                authors: Vec::new(),
                publishing_year: 2000,
                price,
                quantity: Quantity::ONE,
            });
        }

        let restored = decode(&encode(&inventory).unwrap()).unwrap();

        for (before, after) in inventory.books().zip(restored.books()) {
            assert_eq!(
                before.price.to_bits(),
                after.price.to_bits(),
                "{}",
                before.isbn
            );
        }
        assert_eq!(restored, inventory);
    }

    #[test]
    fn test_encode_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, -1.0] {
            let mut inventory = Inventory::new();
            inventory.add_book(BookRecord {
                isbn: Isbn::new("111"),
                title: "Dune".to_string(),
                authors: Vec::new(),
                publishing_year: 1965,
                price,
                quantity: Quantity::ONE,
            });

            assert!(matches!(
                encode(&inventory),
                Err(CodecError::InvalidPrice { .. })
            ));
        }
    }

    #[test]
    fn test_decode_preserves_document_order() {
        let document = br#"{
            "books": {
                "b": {"title": "B", "authors": [], "isbn": "b", "publishing_year": 2000, "price": 1, "quantity": 1},
                "a": {"title": "A", "authors": [], "isbn": "a", "publishing_year": 2000, "price": 1, "quantity": 1}
            },
            "lent_books": {}
        }"#;

        let inventory = decode(document).unwrap();
        let isbns: Vec<_> = inventory.books().map(|book| book.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["b", "a"]);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let result = decode(b"{\"books\": ");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_missing_sections() {
        let result = decode(br#"{"books": {}}"#);
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let document = br#"{
            "books": {
                "1": {"title": "T", "authors": [], "isbn": "1", "publishing_year": 2000, "price": 1.0, "quantity": -1}
            },
            "lent_books": {}
        }"#;
        assert!(matches!(decode(document), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let document = br#"{
            "books": {
                "1": {"title": "T", "authors": [], "isbn": "1", "publishing_year": 2000, "price": -3.5, "quantity": 1}
            },
            "lent_books": {}
        }"#;
        assert!(matches!(
            decode(document),
            Err(CodecError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_key_isbn_mismatch() {
        let document = br#"{
            "books": {
                "1": {"title": "T", "authors": [], "isbn": "2", "publishing_year": 2000, "price": 1.0, "quantity": 1}
            },
            "lent_books": {}
        }"#;
        assert!(matches!(
            decode(document),
            Err(CodecError::IsbnMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_loan_pair() {
        let document = br#"{"books": {}, "lent_books": {"1": [["Alice"]]}}"#;
        assert!(matches!(decode(document), Err(CodecError::Json(_))));
    }
}
