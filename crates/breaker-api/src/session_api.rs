//! Seam between the session lifecycle and the backend.

use crate::error::ApiResult;
use crate::types::{AckResponse, AdminsResponse, UserResponse, VerifyCodeResponse};

/// The subset of backend operations the session state machine depends on.
///
/// `BotApiClient` is the production implementation; the session tests provide
/// a mock with queued responses.
#[async_trait::async_trait]
pub trait SessionApi: Send + Sync {
    /// Ask the bot to deliver a one-time verification code to `phone_number`.
    async fn request_verification_code(&self, phone_number: &str) -> ApiResult<AckResponse>;

    /// Redeem a 6-digit verification code for an authenticated user record.
    async fn redeem_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> ApiResult<VerifyCodeResponse>;

    /// Fetch the current profile for a user id.
    async fn fetch_profile(&self, user_id: &str) -> ApiResult<UserResponse>;

    /// Fetch the administrator roster.
    async fn fetch_admin_roster(&self) -> ApiResult<AdminsResponse>;
}
