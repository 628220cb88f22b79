//! Key-value persistence for the best score.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access score file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("score file {path:?} is not a JSON object of integers")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Integer values under string keys
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<u32>;

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}
