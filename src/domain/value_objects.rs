use std::fmt;

use serde::{Deserialize, Serialize};

/// ISBN - 書籍レコードの識別子
///
/// 作成後は変更不可。形式の検証は呼び出し側の責務。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Isbn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// 借り手 - 自由入力の名前
///
/// システム全体で一意性は保証しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Borrower(String);

impl Borrower {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Borrower {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// 在庫数エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// 在庫が0冊
    OutOfStock,
}

/// 冊数
///
/// 不変条件：負にならない。
/// 符号なし整数で表現し、減算は`take_one`経由でのみ行う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// 現在の冊数
    pub const fn value(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// 冊数を加算する（上限で飽和）
    #[must_use]
    pub const fn increase_by(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// 加算すると上限を超えるか
    pub const fn overflows_with(self, other: Self) -> bool {
        self.0.checked_add(other.0).is_none()
    }

    /// 1冊取り出す
    ///
    /// # エラー
    /// 在庫が0冊の場合は`QuantityError::OutOfStock`を返す
    pub fn take_one(self) -> Result<Self, QuantityError> {
        self.0
            .checked_sub(1)
            .map(Self)
            .ok_or(QuantityError::OutOfStock)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
