use crate::domain::Inventory;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, StoreError>;

/// ストアのエラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 保存済みの状態が読み取れない
    #[error("stored catalog is corrupt")]
    Corrupt(#[source] BoxError),

    /// 読み書きに失敗した
    #[error("catalog store is unavailable")]
    Unavailable(#[source] BoxError),
}

/// カタログストアポート
///
/// 在庫の永続化を抽象化する。
/// 保存は常に全体の上書きで、差分書き込みは行わない。
pub trait CatalogStore {
    /// 保存済みの在庫を読み込む
    ///
    /// まだ何も保存されていない場合は空の在庫を返す。
    fn load(&self) -> Result<Inventory>;

    /// 在庫全体を保存する
    ///
    /// 書き込み途中の状態が観測されないこと。
    fn save(&self, inventory: &Inventory) -> Result<()>;
}
