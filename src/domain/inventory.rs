use indexmap::IndexMap;
use indexmap::map::Entry;

use super::{
    BookAdded, BookLent, BookRecord, BookRemoved, BookReturned, Borrower, Isbn, LendBookError,
    LoanEntry, ReturnBookError,
};

// ============================================================================
// 在庫集約
// ============================================================================

/// 在庫集約 - 書籍レコードと貸出グループを保持する
///
/// 不変条件：
/// - ISBNごとに書籍レコードは1件
/// - 冊数は負にならない（`Quantity`で保証）
/// - 手元の冊数 + 貸出中の冊数 = 追加された冊数の合計
///
/// どちらのコレクションも挿入順を保持する。
/// 検索・削除の「最初の一致」は挿入順で決まる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    books: IndexMap<Isbn, BookRecord>,
    loans: IndexMap<Isbn, Vec<LoanEntry>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化された状態から復元する
    ///
    /// 空の貸出グループは保持しない。
    pub fn from_parts(
        books: IndexMap<Isbn, BookRecord>,
        loans: IndexMap<Isbn, Vec<LoanEntry>>,
    ) -> Self {
        let loans = loans
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .collect();
        Self { books, loans }
    }

    /// 全書籍（挿入順）
    pub fn books(&self) -> impl Iterator<Item = &BookRecord> {
        self.books.values()
    }

    pub fn book(&self, isbn: &Isbn) -> Option<&BookRecord> {
        self.books.get(isbn)
    }

    /// 全貸出グループ（挿入順）
    pub fn loan_groups(&self) -> impl Iterator<Item = (&Isbn, &[LoanEntry])> {
        self.loans
            .iter()
            .map(|(isbn, entries)| (isbn, entries.as_slice()))
    }

    /// ISBNの貸出エントリ（古い順）
    pub fn loans_for(&self, isbn: &Isbn) -> &[LoanEntry] {
        self.loans.get(isbn).map(Vec::as_slice).unwrap_or_default()
    }

    /// ISBNの貸出中の冊数
    pub fn lent_copies(&self, isbn: &Isbn) -> u32 {
        self.loans_for(isbn)
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.copies.value()))
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.loans.is_empty()
    }

    /// 書籍を追加する
    ///
    /// ビジネスルール：
    /// - 既存のISBNなら冊数のみ合算する
    /// - 合算時、追加側のタイトル・著者・出版年・価格は破棄する
    pub fn add_book(&mut self, record: BookRecord) -> BookAdded {
        let added = record.quantity;

        match self.books.entry(record.isbn.clone()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                let saturated = existing.quantity.overflows_with(added);
                existing.quantity = existing.quantity.increase_by(added);
                BookAdded {
                    isbn: existing.isbn.clone(),
                    added,
                    quantity_on_hand: existing.quantity,
                    merged: true,
                    saturated,
                }
            }
            Entry::Vacant(entry) => {
                let isbn = entry.key().clone();
                entry.insert(record);
                BookAdded {
                    isbn,
                    added,
                    quantity_on_hand: added,
                    merged: false,
                    saturated: false,
                }
            }
        }
    }

    /// タイトルまたはISBNの部分一致で最初の書籍を探す
    pub fn find_book(&self, term: &str) -> Option<&BookRecord> {
        self.books.values().find(|book| book.matches_term(term))
    }

    /// 著者名の部分一致で全書籍を探す
    pub fn books_by_author(&self, name: &str) -> Vec<&BookRecord> {
        self.books
            .values()
            .filter(|book| book.has_author_matching(name))
            .collect()
    }

    /// 最初に一致した書籍を削除する
    ///
    /// 貸出グループは削除しない。残った貸出はISBNで返却可能なまま残る。
    pub fn remove_book(&mut self, term: &str) -> Option<BookRemoved> {
        let isbn = self.find_book(term)?.isbn.clone();
        let record = self.books.shift_remove(&isbn)?;
        let orphaned_copies = self.lent_copies(&isbn);

        Some(BookRemoved {
            record,
            orphaned_copies,
        })
    }

    /// 書籍を1冊貸し出す
    ///
    /// ビジネスルール：
    /// - 在庫が1冊以上あること
    /// - 同じ借り手でも常に新しいエントリを追加する
    pub fn lend_book(
        &mut self,
        isbn: &Isbn,
        borrower: Borrower,
    ) -> Result<BookLent, LendBookError> {
        let book = self
            .books
            .get_mut(isbn)
            .ok_or(LendBookError::InsufficientStock)?;
        book.quantity = book.quantity.take_one()?;

        let event = BookLent {
            isbn: isbn.clone(),
            title: book.title.clone(),
            borrower: borrower.clone(),
            quantity_on_hand: book.quantity,
        };

        self.loans
            .entry(isbn.clone())
            .or_default()
            .push(LoanEntry::single(borrower));

        Ok(event)
    }

    /// 書籍を返却する
    ///
    /// ビジネスルール：
    /// - 借り手の最も古いエントリを1件だけ返却する
    /// - そのエントリの冊数を在庫に戻す
    /// - グループが空になったら削除する
    pub fn return_book(
        &mut self,
        isbn: &Isbn,
        borrower: &Borrower,
    ) -> Result<BookReturned, ReturnBookError> {
        let entries = self.loans.get_mut(isbn).ok_or(ReturnBookError::NotLent)?;
        let position = entries
            .iter()
            .position(|entry| &entry.borrower == borrower)
            .ok_or(ReturnBookError::NotLent)?;

        let entry = entries.remove(position);
        if entries.is_empty() {
            self.loans.shift_remove(isbn);
        }

        let mut saturated = false;
        let title = self.books.get_mut(isbn).map(|book| {
            saturated = book.quantity.overflows_with(entry.copies);
            book.quantity = book.quantity.increase_by(entry.copies);
            book.title.clone()
        });

        Ok(BookReturned {
            isbn: isbn.clone(),
            title,
            borrower: entry.borrower,
            copies: entry.copies,
            saturated,
        })
    }
}
