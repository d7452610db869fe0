//! HTTP client for the BreakerBot backend.
//!
//! [`BotApiClient`] covers the full REST surface of the bot backend:
//! verification-code authentication, user profiles and updates, the admin
//! roster, mention settings, deleted-user backups, secret-santa groups, and
//! the daily bonus. The [`SessionApi`] trait is the narrow seam the session
//! state machine consumes, so tests can substitute a mock backend.

mod client;
mod error;
mod session_api;
mod types;

pub use client::BotApiClient;
pub use error::{ApiError, ApiResult};
pub use session_api::SessionApi;
pub use types::{
    AckResponse, AdminEntry, AdminsResponse, BackupData, BackupEntry, BackupsResponse, DailyBonus,
    DailyBonusResponse, MentionSettings, MentionsResponse, SecretSantaGroup,
    SecretSantaParticipant, SecretSantaResponse, UpdateUserRequest, UserProfile, UserResponse,
    UsersResponse, VerifyCodeResponse, MAX_CUSTOM_NAME_LEN,
};
