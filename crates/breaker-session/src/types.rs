//! Core types for the session lifecycle.

use serde::{Deserialize, Serialize};

/// Network suffix of an individual WhatsApp JID.
pub const USER_JID_SUFFIX: &str = "@s.whatsapp.net";

/// Opaque authenticated user identifier (a WhatsApp JID such as
/// `5516999999999@s.whatsapp.net`).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    /// Creates an identity from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The phone number part: the JID with its network suffix stripped.
    pub fn phone_number(&self) -> &str {
        self.0.strip_suffix(USER_JID_SUFFIX).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Authentication lifecycle states.
///
/// A failed request or login leaves the state where it was; there is no
/// distinct error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential and no verification in progress.
    Unauthenticated,
    /// A code was requested for a phone number; awaiting verification.
    CodeRequested,
    /// Logged in as a user.
    Authenticated,
}

/// Uniform result of a session operation.
///
/// Session operations never surface error types to callers; every failure
/// collapses into `success == false` plus a short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// User-facing message (present when failed).
    pub message: Option<String>,
}

impl OperationOutcome {
    /// Creates a successful outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Creates a failed outcome with a user-facing message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Result of restoring a persisted session at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RehydrateOutcome {
    /// A saved credential was found; the session is authenticated.
    Restored { identity: Identity },
    /// No saved credential; the session starts unauthenticated.
    NoCredential,
    /// The store could not be read; the session starts unauthenticated
    /// and will not survive a restart.
    StorageUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_strips_network_suffix() {
        let identity = Identity::from_string("5516999999999@s.whatsapp.net");
        assert_eq!(identity.phone_number(), "5516999999999");
    }

    #[test]
    fn identity_without_suffix_is_returned_whole() {
        let identity = Identity::from_string("5516999999999");
        assert_eq!(identity.phone_number(), "5516999999999");
    }

    #[test]
    fn outcome_constructors() {
        let ok = OperationOutcome::ok();
        assert!(ok.success);
        assert!(ok.message.is_none());

        let failed = OperationOutcome::failure("Invalid verification code.");
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("Invalid verification code."));
    }
}
