pub mod history_service;
pub mod history_store;
pub mod memory_store;
pub mod postgres_store;

// Re-export public types
pub use history_service::HistoryService;
pub use history_store::{HistoryStore, StoreError};
pub use memory_store::MemoryHistoryStore;
pub use postgres_store::PgHistoryStore;
