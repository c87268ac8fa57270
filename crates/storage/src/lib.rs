#![forbid(unsafe_code)]

pub mod repository;
pub mod sort;
pub mod sqlite;

pub use repository::{InMemoryRepository, ScoreRepository, Storage, StorageError};
pub use sort::{SortField, SortKey, SortKeyError};
