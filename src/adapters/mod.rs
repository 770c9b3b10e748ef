// Adapters layer: CatalogProvider 與 Storage 的具體實作（記憶體、本機檔案、HTTP）。

pub mod file_catalog;
pub mod http_catalog;
pub mod memory;
pub mod storage;

pub use file_catalog::{CatalogFormat, FileCatalog};
pub use http_catalog::HttpCatalog;
pub use memory::InMemoryCatalog;
pub use storage::LocalStorage;
