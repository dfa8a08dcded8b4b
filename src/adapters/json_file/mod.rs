pub mod codec;
pub mod store;

// パブリックに型を再エクスポート
pub use codec::{CodecError, decode, encode};
pub use store::CatalogStore as JsonFileStore;
