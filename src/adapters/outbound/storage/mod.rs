/// Storage adapters implementing the key-value store port
mod file_store;
mod memory_store;

pub use file_store::{FileStore, DEFAULT_STATE_DIR};
pub use memory_store::MemoryStore;
