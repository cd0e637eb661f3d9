pub mod store;
pub mod file_store;
pub mod lock;
pub mod config_io;

pub use file_store::FileStore;
pub use store::{KeyValueStore, MemoryStore, StoreError};
