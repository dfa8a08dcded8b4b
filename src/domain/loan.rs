use serde::{Deserialize, Serialize};

use super::{Borrower, Quantity};

/// 貸出エントリ - 借り手1人への1回の貸出
///
/// 同じ借り手への貸出でもエントリは統合しない。
/// ISBNはエントリ自身ではなく貸出グループのキーが持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEntry {
    pub borrower: Borrower,
    pub copies: Quantity,
}

impl LoanEntry {
    /// 1冊分の貸出エントリを作成
    pub fn single(borrower: Borrower) -> Self {
        Self {
            borrower,
            copies: Quantity::ONE,
        }
    }
}
