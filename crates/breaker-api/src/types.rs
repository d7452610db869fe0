//! Wire types for the BreakerBot backend API.
//!
//! Every response carries a `success` flag and, on failure, a human-readable
//! `message`. Field names on the wire are camelCase (the secret-santa
//! endpoints keep the backend's Portuguese names); Rust field names are
//! English snake_case with serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length accepted for a user's custom display name.
pub const MAX_CUSTOM_NAME_LEN: usize = 30;

// ============================================================================
// Response envelopes
// ============================================================================

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a verification-code redemption.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    /// Authenticated user, present only when `success` is true.
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the full user list.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    pub success: bool,
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying a single user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the administrator roster.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminsResponse {
    pub success: bool,
    #[serde(default)]
    pub admins: Vec<AdminEntry>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the global mention settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionsResponse {
    pub success: bool,
    #[serde(default)]
    pub mentions: Option<MentionSettings>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the deleted-user backup list.
#[derive(Debug, Clone, Deserialize)]
pub struct BackupsResponse {
    pub success: bool,
    #[serde(default)]
    pub backups: Vec<BackupEntry>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the secret-santa groups a user participates in.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretSantaResponse {
    pub success: bool,
    #[serde(default)]
    pub groups: Vec<SecretSantaGroup>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response carrying the daily-bonus status.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyBonusResponse {
    pub success: bool,
    #[serde(rename = "dailyBonus", default)]
    pub daily_bonus: Option<DailyBonus>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Domain objects
// ============================================================================

/// Server-reported user profile.
///
/// Numeric and boolean fields default to zero/false when the backend omits
/// them so a partially populated record never fails the whole decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// WhatsApp JID, e.g. `5516999999999@s.whatsapp.net`
    pub id: String,
    /// Name reported by WhatsApp
    #[serde(default)]
    pub push_name: Option<String>,
    /// User-chosen display name (null when unset)
    #[serde(default)]
    pub custom_name: Option<String>,
    /// Whether the custom name is shown instead of the push name
    #[serde(default)]
    pub custom_name_enabled: bool,
    /// Emoji shown next to the name (null when unset)
    #[serde(default)]
    pub emoji: Option<String>,
    /// Whether the bot reacts to the user's messages with the emoji
    #[serde(default)]
    pub emoji_reaction: bool,
    /// Whether the user may be @-mentioned in ranking posts
    #[serde(default)]
    pub allow_mentions: bool,
    #[serde(default)]
    pub level: u32,
    /// Lifetime experience points
    #[serde(default)]
    pub xp: u64,
    /// XP accumulated inside the current level
    #[serde(rename = "progressXP", default)]
    pub progress_xp: u64,
    /// XP span of the current level
    #[serde(rename = "nextLevelXP", default)]
    pub next_level_xp: u64,
    /// XP still missing to reach the next level
    #[serde(rename = "neededXP", default)]
    pub needed_xp: u64,
    /// Server-computed progress percentage, when provided
    #[serde(default)]
    pub progress_percent: Option<f64>,
    #[serde(default)]
    pub prestige: u32,
    /// Number of prestige upgrades currently claimable
    #[serde(default)]
    pub prestige_available: u32,
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub daily_bonus_multiplier: Option<f64>,
    /// Expiry of the active bonus multiplier (null when inactive)
    #[serde(default)]
    pub daily_bonus_expiry: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl UserProfile {
    /// Name to show for this user: the custom name when enabled and set,
    /// otherwise the push name, otherwise a generic placeholder.
    pub fn display_name(&self) -> &str {
        if self.custom_name_enabled {
            if let Some(name) = self.custom_name.as_deref() {
                if !name.is_empty() {
                    return name;
                }
            }
        }
        match self.push_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "User",
        }
    }

    /// Progress toward the next level as a whole percentage, preferring the
    /// server-computed value and deriving it from the XP counters otherwise.
    pub fn level_progress_percent(&self) -> u8 {
        if let Some(percent) = self.progress_percent {
            return percent.clamp(0.0, 100.0).round() as u8;
        }
        if self.next_level_xp == 0 {
            return 0;
        }
        let derived = (self.progress_xp as f64 / self.next_level_xp as f64) * 100.0;
        derived.round().min(100.0) as u8
    }
}

/// Partial profile update. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// `Some(None)` serializes as an explicit null, clearing the custom name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_reaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_mentions: Option<bool>,
}

/// One administrator roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEntry {
    /// Digits-only phone number
    pub number: String,
    /// Full WhatsApp JID
    pub full_id: String,
}

/// Bot-wide mention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionSettings {
    pub global_enabled: bool,
}

/// Snapshot of a deleted user kept for a limited restore window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    /// WhatsApp JID of the deleted user
    pub id: String,
    pub deleted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub data: BackupData,
}

impl BackupEntry {
    /// Whole days until this backup expires, rounded up, never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        let remaining = self.expires_at.signed_duration_since(now);
        let days = (remaining.num_seconds() as f64 / 86_400.0).ceil() as i64;
        days.max(0)
    }
}

/// Profile fields preserved inside a backup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub custom_name_enabled: bool,
}

/// A secret-santa group as seen by one participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretSantaGroup {
    pub group_id: String,
    pub group_name: String,
    /// Whether the draw has been performed
    #[serde(rename = "sorteioRealizado", default)]
    pub draw_completed: bool,
    /// Display date of the draw
    #[serde(rename = "sorteioData", default)]
    pub draw_date: Option<String>,
    #[serde(rename = "totalParticipantes", default)]
    pub total_participants: u32,
    /// The viewer's JID inside this group
    pub user_id_in_group: String,
    /// The viewer's name inside this group
    #[serde(rename = "meuNome", default)]
    pub my_name: Option<String>,
    /// The gift the viewer asked for
    #[serde(rename = "meuPresente", default)]
    pub my_gift: Option<String>,
    /// The participant the viewer drew, populated after the draw
    #[serde(rename = "amigoSorteado", default)]
    pub drawn_friend: Option<SecretSantaParticipant>,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<SecretSantaParticipant>,
}

/// One member of a secret-santa group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretSantaParticipant {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "presente", default)]
    pub gift: Option<String>,
}

/// Daily-bonus status: who drew it last, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonus {
    #[serde(default)]
    pub last_bonus_user: Option<String>,
    #[serde(default)]
    pub last_bonus_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_decodes_wire_names() {
        let json = r#"{
            "id": "5516999999999@s.whatsapp.net",
            "pushName": "Ana",
            "customName": "Aninha",
            "customNameEnabled": true,
            "allowMentions": true,
            "level": 12,
            "xp": 34500,
            "progressXP": 120,
            "nextLevelXP": 400,
            "neededXP": 280,
            "prestige": 1,
            "prestigeAvailable": 0,
            "totalMessages": 9000,
            "badges": ["veteran"]
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "5516999999999@s.whatsapp.net");
        assert_eq!(profile.progress_xp, 120);
        assert_eq!(profile.next_level_xp, 400);
        assert_eq!(profile.needed_xp, 280);
        assert_eq!(profile.display_name(), "Aninha");
        assert_eq!(profile.badges, vec!["veteran".to_string()]);
    }

    #[test]
    fn user_profile_tolerates_missing_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": "5511888887777@s.whatsapp.net"}"#).unwrap();
        assert_eq!(profile.level, 0);
        assert!(!profile.custom_name_enabled);
        assert!(profile.badges.is_empty());
        assert_eq!(profile.display_name(), "User");
    }

    #[test]
    fn display_name_ignores_disabled_custom_name() {
        let mut profile: UserProfile =
            serde_json::from_str(r#"{"id": "x", "pushName": "Bruno", "customName": "B"}"#).unwrap();
        assert_eq!(profile.display_name(), "Bruno");
        profile.custom_name_enabled = true;
        assert_eq!(profile.display_name(), "B");
    }

    #[test]
    fn level_progress_prefers_server_percentage() {
        let mut profile: UserProfile = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        profile.progress_xp = 120;
        profile.next_level_xp = 400;
        assert_eq!(profile.level_progress_percent(), 30);

        profile.progress_percent = Some(55.4);
        assert_eq!(profile.level_progress_percent(), 55);
    }

    #[test]
    fn level_progress_caps_at_one_hundred() {
        let mut profile: UserProfile = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        profile.progress_xp = 900;
        profile.next_level_xp = 400;
        assert_eq!(profile.level_progress_percent(), 100);

        profile.next_level_xp = 0;
        assert_eq!(profile.level_progress_percent(), 0);
    }

    #[test]
    fn update_request_serializes_only_set_fields() {
        let request = UpdateUserRequest {
            allow_mentions: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"allowMentions":false}"#);
    }

    #[test]
    fn update_request_clears_custom_name_with_null() {
        let request = UpdateUserRequest {
            custom_name: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"customName":null}"#);
    }

    #[test]
    fn admin_entry_decodes_full_id() {
        let admin: AdminEntry = serde_json::from_str(
            r#"{"number": "5516999999999", "fullId": "5516999999999@s.whatsapp.net"}"#,
        )
        .unwrap();
        assert_eq!(admin.number, "5516999999999");
        assert_eq!(admin.full_id, "5516999999999@s.whatsapp.net");
    }

    #[test]
    fn backup_days_remaining_rounds_up_and_clamps() {
        let json = r#"{
            "id": "5511777776666@s.whatsapp.net",
            "deletedAt": "2025-01-01T00:00:00Z",
            "expiresAt": "2025-01-31T00:00:00Z",
            "data": {"pushName": "Carla", "customNameEnabled": false}
        }"#;
        let backup: BackupEntry = serde_json::from_str(json).unwrap();

        let now = "2025-01-28T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(backup.days_remaining(now), 3);

        let past_expiry = "2025-02-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(backup.days_remaining(past_expiry), 0);
    }

    #[test]
    fn secret_santa_group_decodes_backend_names() {
        let json = r#"{
            "groupId": "group-1",
            "groupName": "Familia",
            "sorteioRealizado": true,
            "sorteioData": "2024-12-01",
            "totalParticipantes": 4,
            "userIdInGroup": "5516999999999@s.whatsapp.net",
            "meuNome": "Ana",
            "meuPresente": "Livro",
            "amigoSorteado": {"id": "a", "nome": "Bruno", "presente": "Caneca"},
            "participantes": [
                {"id": "a", "nome": "Bruno", "presente": "Caneca"},
                {"id": "b", "nome": "Carla"}
            ]
        }"#;

        let group: SecretSantaGroup = serde_json::from_str(json).unwrap();
        assert!(group.draw_completed);
        assert_eq!(group.my_gift.as_deref(), Some("Livro"));
        let friend = group.drawn_friend.unwrap();
        assert_eq!(friend.name, "Bruno");
        assert_eq!(group.participants.len(), 2);
        assert!(group.participants[1].gift.is_none());
    }

    #[test]
    fn daily_bonus_response_decodes() {
        let json = r#"{
            "success": true,
            "dailyBonus": {"lastBonusUser": "5516999999999@s.whatsapp.net", "lastBonusDate": "2025-01-10"}
        }"#;
        let response: DailyBonusResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let bonus = response.daily_bonus.unwrap();
        assert_eq!(
            bonus.last_bonus_user.as_deref(),
            Some("5516999999999@s.whatsapp.net")
        );
    }
}
