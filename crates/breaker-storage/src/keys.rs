//! Storage key constants.

/// Storage keys used by the companion app
pub struct StorageKeys;

impl StorageKeys {
    /// Serialized session credential (JSON)
    pub const SESSION: &'static str = "breakerbot_session";

    /// Saved theme preference
    pub const THEME: &'static str = "breakerbot_theme";
}
