/// Module containing token storage configuration
pub mod config;
/// JSON file backed token store
pub mod file_store;
/// Token store trait and in-memory implementation
pub mod token_store;

pub use file_store::FileTokenStore;
pub use token_store::{MemoryTokenStore, StoredSession, TokenStore};
