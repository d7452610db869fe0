//! Key-value storage abstraction for the BreakerBot companion.
//!
//! Persistence is a single JSON file under the app base directory, consumed
//! through the [`KeyValueStorage`] trait so tests can swap in an in-memory
//! backend. The [`SessionVault`] facade owns the fixed keys for the session
//! credential and saved preferences.

mod file;
mod keys;
mod traits;
mod vault;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use traits::KeyValueStorage;
pub use vault::{SessionVault, StoredCredential};

use breaker_core::Paths;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend fault (lock poisoning, unavailable store)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default file-backed storage under the app base directory.
pub fn create_storage(paths: &Paths) -> StorageResult<Box<dyn KeyValueStorage>> {
    let storage = FileStorage::open(paths.storage_file())?;
    Ok(Box::new(storage))
}

/// Create a SessionVault over the default storage.
pub fn create_vault(paths: &Paths) -> StorageResult<SessionVault> {
    let storage = create_storage(paths)?;
    Ok(SessionVault::new(storage))
}
