use std::sync::Arc;

use crate::domain::{
    BookLent, BookRecord, BookReturned, Borrower, Inventory, Isbn, LoanEntry, Quantity,
};
use crate::ports::CatalogStore;

use super::errors::{CatalogError, Result};

/// 書籍追加の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// 新しいISBNとして登録した
    Inserted,
    /// 既存のISBNに冊数を合算した（他の項目は既存のまま）
    Merged { quantity_on_hand: Quantity },
}

/// カタログ - 在庫とストアを所有する
///
/// 変更操作はすべて、メモリ上の在庫を更新した後に
/// ストアへ全体を書き戻してから返る。
///
/// # 一貫性保証
///
/// 書き込みに失敗した場合は`StoreUnavailable`を返すが、
/// メモリ上の変更は巻き戻さない。
pub struct Catalog {
    inventory: Inventory,
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("inventory", &self.inventory)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// ストアから在庫を読み込んでカタログを開く
    ///
    /// # エラー
    /// - CorruptState: 保存済みの状態が読み取れない
    /// - StoreUnavailable: 読み込みに失敗
    pub fn open(store: Arc<dyn CatalogStore>) -> Result<Self> {
        let inventory = store.load()?;
        tracing::info!(books = inventory.books().count(), "catalog opened");
        Ok(Self { inventory, store })
    }

    /// 書籍を追加する
    ///
    /// 既存のISBNなら冊数のみ合算する。
    pub fn add_book(&mut self, record: BookRecord) -> Result<AddOutcome> {
        let event = self.inventory.add_book(record);
        tracing::info!(
            isbn = %event.isbn,
            added = %event.added,
            quantity = %event.quantity_on_hand,
            merged = event.merged,
            "book added"
        );
        if event.saturated {
            tracing::warn!(
                isbn = %event.isbn,
                added = %event.added,
                quantity = %event.quantity_on_hand,
                "quantity reached its upper limit, some added copies were not counted"
            );
        }

        self.persist()?;

        Ok(if event.merged {
            AddOutcome::Merged {
                quantity_on_hand: event.quantity_on_hand,
            }
        } else {
            AddOutcome::Inserted
        })
    }

    /// タイトルまたはISBNに一致した最初の書籍を削除する
    ///
    /// 貸出中の記録は残る。
    pub fn remove_book(&mut self, term: &str) -> Result<BookRecord> {
        let removed = self
            .inventory
            .remove_book(term)
            .ok_or_else(|| CatalogError::NotFound(term.to_string()))?;

        if removed.orphaned_copies > 0 {
            tracing::warn!(
                isbn = %removed.record.isbn,
                lent = removed.orphaned_copies,
                "removed book still has copies on loan"
            );
        }
        tracing::info!(isbn = %removed.record.isbn, title = %removed.record.title, "book removed");

        self.persist()?;
        Ok(removed.record)
    }

    /// タイトルまたはISBNに一致した最初の書籍
    pub fn search_books(&self, term: &str) -> Result<&BookRecord> {
        self.inventory
            .find_book(term)
            .ok_or_else(|| CatalogError::NotFound(term.to_string()))
    }

    /// 著者名に一致した全書籍（空なら該当なし）
    pub fn search_books_by_author(&self, name: &str) -> Vec<&BookRecord> {
        self.inventory.books_by_author(name)
    }

    /// 書籍を1冊貸し出す
    ///
    /// # エラー
    /// - InsufficientStock: ISBNが未登録、または在庫が0冊
    /// - StoreUnavailable: 保存に失敗（貸出自体は反映済み）
    pub fn lend_book(&mut self, isbn: &Isbn, borrower: Borrower) -> Result<BookLent> {
        let event = self
            .inventory
            .lend_book(isbn, borrower)
            .inspect_err(|_| tracing::warn!(%isbn, "lend rejected: insufficient stock"))?;
        tracing::info!(
            isbn = %event.isbn,
            borrower = %event.borrower,
            quantity = %event.quantity_on_hand,
            "book lent"
        );

        self.persist()?;
        Ok(event)
    }

    /// 借り手の最も古い貸出を1件返却する
    ///
    /// # エラー
    /// - NotLent: 該当する貸出がない（状態は変更しない）
    /// - StoreUnavailable: 保存に失敗（返却自体は反映済み）
    pub fn return_book(&mut self, isbn: &Isbn, borrower: &Borrower) -> Result<BookReturned> {
        let event = self
            .inventory
            .return_book(isbn, borrower)
            .inspect_err(|_| tracing::warn!(%isbn, %borrower, "return rejected: not lent"))?;
        if event.title.is_none() {
            tracing::warn!(%isbn, "returned a loan whose book record was removed");
        }
        tracing::info!(
            isbn = %event.isbn,
            borrower = %event.borrower,
            copies = %event.copies,
            "book returned"
        );
        if event.saturated {
            tracing::warn!(
                isbn = %event.isbn,
                copies = %event.copies,
                "quantity reached its upper limit, some returned copies were not counted"
            );
        }

        self.persist()?;
        Ok(event)
    }

    /// 全書籍（挿入順）
    pub fn list_all(&self) -> Vec<&BookRecord> {
        self.inventory.books().collect()
    }

    /// ISBNの貸出エントリ（古い順）
    pub fn loans(&self, isbn: &Isbn) -> &[LoanEntry] {
        self.inventory.loans_for(isbn)
    }

    /// 全貸出グループ（挿入順）
    pub fn loan_groups(&self) -> impl Iterator<Item = (&Isbn, &[LoanEntry])> {
        self.inventory.loan_groups()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.inventory).map_err(|err| {
            tracing::error!(error = %err, "failed to persist catalog");
            CatalogError::from(err)
        })
    }
}
