use super::QuantityError;

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendBookError {
    /// ISBNが未登録、または在庫が0冊
    ///
    /// 呼び出し側には両者を区別しない。
    InsufficientStock,
}

impl From<QuantityError> for LendBookError {
    fn from(err: QuantityError) -> Self {
        match err {
            QuantityError::OutOfStock => LendBookError::InsufficientStock,
        }
    }
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 該当するISBN・借り手の貸出がない
    NotLent,
}
