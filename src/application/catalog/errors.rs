use thiserror::Error;

use crate::domain::{LendBookError, ReturnBookError};
use crate::ports::{BoxError, StoreError};

/// カタログアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 検索語に一致する書籍がない
    #[error("No book matches '{0}'")]
    NotFound(String),

    /// ISBNが未登録、または在庫が0冊
    #[error("Not enough books available to lend")]
    InsufficientStock,

    /// 該当する貸出がない
    #[error("This book wasn't lent")]
    NotLent,

    /// 保存済みの状態が壊れている（起動時の致命的エラー）
    #[error("Stored catalog is corrupt")]
    CorruptState(#[source] BoxError),

    /// ストアの読み書きに失敗した
    ///
    /// 書き込み失敗時、メモリ上の変更は巻き戻さない。
    #[error("Catalog store is unavailable")]
    StoreUnavailable(#[source] BoxError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt(source) => CatalogError::CorruptState(source),
            StoreError::Unavailable(source) => CatalogError::StoreUnavailable(source),
        }
    }
}

impl From<LendBookError> for CatalogError {
    fn from(err: LendBookError) -> Self {
        match err {
            LendBookError::InsufficientStock => CatalogError::InsufficientStock,
        }
    }
}

impl From<ReturnBookError> for CatalogError {
    fn from(err: ReturnBookError) -> Self {
        match err {
            ReturnBookError::NotLent => CatalogError::NotLent,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
