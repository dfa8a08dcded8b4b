use super::{BookRecord, Borrower, Isbn, Quantity};

/// イベント：書籍が追加された
#[derive(Debug, Clone, PartialEq)]
pub struct BookAdded {
    pub isbn: Isbn,
    pub added: Quantity,
    pub quantity_on_hand: Quantity,
    /// 既存レコードに冊数を合算した場合は`true`
    pub merged: bool,
    /// 合算が上限で飽和し、冊数の一部が失われた場合は`true`
    pub saturated: bool,
}

/// イベント：書籍が削除された
#[derive(Debug, Clone, PartialEq)]
pub struct BookRemoved {
    pub record: BookRecord,
    /// 削除時点で残っていた貸出冊数（貸出は削除しない）
    pub orphaned_copies: u32,
}

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLent {
    pub isbn: Isbn,
    pub title: String,
    pub borrower: Borrower,
    pub quantity_on_hand: Quantity,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookReturned {
    pub isbn: Isbn,
    /// 書籍レコードが既に削除されている場合は`None`
    pub title: Option<String>,
    pub borrower: Borrower,
    pub copies: Quantity,
    /// 在庫への戻しが上限で飽和した場合は`true`
    pub saturated: bool,
}
