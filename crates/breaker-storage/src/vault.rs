//! High-level API for the persisted session credential and preferences.

use crate::{KeyValueStorage, StorageKeys, StorageResult};
use breaker_core::ThemeMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted proof of a previously successful login.
///
/// Presence of this record under the session key is what makes the app start
/// authenticated; the backend never re-validates it client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// User identity (WhatsApp JID) returned by the backend
    pub identity: String,
    /// Phone number the code was verified against
    pub phone_number: String,
    /// When the login happened
    pub saved_at: DateTime<Utc>,
}

impl StoredCredential {
    /// Create a credential stamped with the current time.
    pub fn new(identity: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            phone_number: phone_number.into(),
            saved_at: Utc::now(),
        }
    }
}

/// High-level API for storing and retrieving the session credential and
/// saved preferences.
pub struct SessionVault {
    storage: Box<dyn KeyValueStorage>,
}

impl SessionVault {
    /// Create a new vault with the given storage backend.
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    // ==========================================
    // Session credential
    // ==========================================

    /// Persist the session credential.
    pub fn store_credential(&self, credential: &StoredCredential) -> StorageResult<()> {
        let json = serde_json::to_string(credential)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::SESSION, &json)
    }

    /// Load the persisted credential, if any.
    ///
    /// A stored value that no longer deserializes reads as absent; the stale
    /// bytes are removed so the next read is clean.
    pub fn load_credential(&self) -> StorageResult<Option<StoredCredential>> {
        match self.storage.get(StorageKeys::SESSION)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(credential) => Ok(Some(credential)),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored credential unreadable, discarding");
                    let _ = self.storage.remove(StorageKeys::SESSION);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Check if a credential is persisted.
    pub fn has_credential(&self) -> StorageResult<bool> {
        self.storage.has(StorageKeys::SESSION)
    }

    /// Remove the persisted credential. Removing an absent credential is
    /// not an error.
    pub fn clear_credential(&self) -> StorageResult<()> {
        self.storage.remove(StorageKeys::SESSION)?;
        Ok(())
    }

    // ==========================================
    // Theme preference
    // ==========================================

    /// Persist the theme preference.
    pub fn save_theme(&self, theme: ThemeMode) -> StorageResult<()> {
        self.storage.set(StorageKeys::THEME, theme.as_str())
    }

    /// Load the saved theme preference, defaulting to `System`.
    pub fn load_theme(&self) -> StorageResult<ThemeMode> {
        match self.storage.get(StorageKeys::THEME)? {
            Some(value) => Ok(ThemeMode::from_stored(&value)),
            None => Ok(ThemeMode::System),
        }
    }
}
