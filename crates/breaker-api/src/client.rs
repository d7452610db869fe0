//! HTTP client for the BreakerBot backend REST API.
//!
//! Thin request/response plumbing: every method builds a URL, sends JSON,
//! checks the HTTP status, and decodes the typed envelope. Application-level
//! failures travel inside the envelope (`success: false` plus a message);
//! transport failures and non-2xx statuses surface as [`ApiError`].

use crate::error::{ApiError, ApiResult};
use crate::session_api::SessionApi;
use crate::types::{
    AckResponse, AdminsResponse, BackupsResponse, DailyBonusResponse, MentionsResponse,
    SecretSantaResponse, UpdateUserRequest, UserResponse, UsersResponse, VerifyCodeResponse,
    MAX_CUSTOM_NAME_LEN,
};

/// Trim an error body for logs and error values. Backend error bodies are
/// short human-readable JSON; anything longer is cut off.
fn summarize_body(body: &str) -> String {
    const MAX_CHARS: usize = 160;
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(MAX_CHARS).collect();
    format!("{}...", head)
}

/// Client for the bot backend API.
///
/// Cheap to clone; all clones share the same connection pool.
#[derive(Clone)]
pub struct BotApiClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl BotApiClient {
    /// Create a new client against `api_url`. A trailing slash is tolerated
    /// and stripped.
    pub fn new(api_url: impl Into<String>) -> Self {
        let mut api_url = api_url.into();
        while api_url.ends_with('/') {
            api_url.pop();
        }
        Self {
            http_client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Build the full URL for an endpoint path.
    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Convert a non-2xx response into an [`ApiError::Failed`], logging the
    /// status and a summary of the body.
    async fn status_error(response: reqwest::Response, context: &str) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let summary = summarize_body(&body);
        tracing::error!(status = %status, summary = %summary, "{}", context);
        ApiError::Failed { status, summary }
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Ask the bot to send a verification code to a phone number.
    pub async fn request_code(&self, phone_number: &str) -> ApiResult<AckResponse> {
        let url = self.endpoint_url("auth/request-code");

        tracing::debug!("Requesting verification code for {}", phone_number);

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "number": phone_number }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Verification code request failed").await);
        }

        let ack: AckResponse = response.json().await?;
        Ok(ack)
    }

    /// Redeem a verification code for the authenticated user record.
    ///
    /// The code itself is never logged.
    pub async fn verify_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> ApiResult<VerifyCodeResponse> {
        let url = self.endpoint_url("auth/verify");

        tracing::debug!("Verifying code for {}", phone_number);

        let response = self
            .http_client
            .post(&url)
            .json(&serde_json::json!({ "number": phone_number, "code": code }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Code verification failed").await);
        }

        let verified: VerifyCodeResponse = response.json().await?;
        Ok(verified)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Fetch every known user.
    pub async fn list_users(&self) -> ApiResult<UsersResponse> {
        let url = self.endpoint_url("users");

        tracing::debug!("Fetching user list");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch users").await);
        }

        let users: UsersResponse = response.json().await?;
        tracing::debug!("Fetched {} users", users.users.len());
        Ok(users)
    }

    /// Fetch a single user by id.
    pub async fn get_user(&self, user_id: &str) -> ApiResult<UserResponse> {
        let url = self.endpoint_url(&format!("users/{}", user_id));

        tracing::debug!("Fetching user {}", user_id);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch user").await);
        }

        let user: UserResponse = response.json().await?;
        Ok(user)
    }

    /// Apply a partial profile update.
    ///
    /// Rejects over-long custom names client-side, before any network call.
    pub async fn update_user(
        &self,
        user_id: &str,
        update: &UpdateUserRequest,
    ) -> ApiResult<AckResponse> {
        if let Some(Some(name)) = &update.custom_name {
            if name.chars().count() > MAX_CUSTOM_NAME_LEN {
                return Err(ApiError::InvalidRequest(format!(
                    "custom name exceeds {} characters",
                    MAX_CUSTOM_NAME_LEN
                )));
            }
        }

        let url = self.endpoint_url(&format!("users/{}", user_id));

        tracing::debug!("Updating user {}", user_id);

        let response = self.http_client.patch(&url).json(update).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to update user").await);
        }

        let ack: AckResponse = response.json().await?;
        Ok(ack)
    }

    // ========================================================================
    // Administrators
    // ========================================================================

    /// Fetch the administrator roster.
    pub async fn list_admins(&self) -> ApiResult<AdminsResponse> {
        let url = self.endpoint_url("admins");

        tracing::debug!("Fetching admin roster");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch admins").await);
        }

        let admins: AdminsResponse = response.json().await?;
        tracing::debug!("Fetched {} admins", admins.admins.len());
        Ok(admins)
    }

    // ========================================================================
    // Mentions
    // ========================================================================

    /// Fetch the bot-wide mention settings.
    pub async fn mention_settings(&self) -> ApiResult<MentionsResponse> {
        let url = self.endpoint_url("mentions");

        tracing::debug!("Fetching mention settings");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch mention settings").await);
        }

        let mentions: MentionsResponse = response.json().await?;
        Ok(mentions)
    }

    /// Enable or disable ranking mentions globally.
    pub async fn set_mentions_enabled(&self, enabled: bool) -> ApiResult<AckResponse> {
        let url = self.endpoint_url("mentions");

        tracing::debug!("Setting global mentions to {}", enabled);

        let response = self
            .http_client
            .put(&url)
            .json(&serde_json::json!({ "globalEnabled": enabled }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to update mention settings").await);
        }

        let ack: AckResponse = response.json().await?;
        Ok(ack)
    }

    // ========================================================================
    // Backups
    // ========================================================================

    /// Fetch the backups of recently deleted users.
    pub async fn list_backups(&self) -> ApiResult<BackupsResponse> {
        let url = self.endpoint_url("backups");

        tracing::debug!("Fetching backup list");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch backups").await);
        }

        let backups: BackupsResponse = response.json().await?;
        tracing::debug!("Fetched {} backups", backups.backups.len());
        Ok(backups)
    }

    /// Restore a deleted user from their backup.
    pub async fn restore_backup(&self, user_id: &str) -> ApiResult<AckResponse> {
        let url = self.endpoint_url(&format!("backups/{}/restore", user_id));

        tracing::debug!("Restoring backup for {}", user_id);

        let response = self.http_client.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to restore backup").await);
        }

        let ack: AckResponse = response.json().await?;
        Ok(ack)
    }

    // ========================================================================
    // Secret santa
    // ========================================================================

    /// Fetch the secret-santa groups a user participates in.
    pub async fn secret_santa_groups(&self, user_id: &str) -> ApiResult<SecretSantaResponse> {
        let url = self.endpoint_url(&format!("secret-santa/user/{}", user_id));

        tracing::debug!("Fetching secret-santa groups for {}", user_id);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch secret-santa groups").await);
        }

        let groups: SecretSantaResponse = response.json().await?;
        Ok(groups)
    }

    /// Record the gift a participant wants. An empty gift clears it.
    pub async fn set_secret_santa_gift(
        &self,
        group_id: &str,
        user_id: &str,
        gift: &str,
    ) -> ApiResult<AckResponse> {
        let url = self.endpoint_url(&format!("secret-santa/{}/gift", group_id));

        tracing::debug!("Updating secret-santa gift in group {}", group_id);

        let response = self
            .http_client
            .put(&url)
            .json(&serde_json::json!({ "userId": user_id, "gift": gift }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to update secret-santa gift").await);
        }

        let ack: AckResponse = response.json().await?;
        Ok(ack)
    }

    // ========================================================================
    // Daily bonus
    // ========================================================================

    /// Fetch the daily-bonus status.
    pub async fn daily_bonus(&self) -> ApiResult<DailyBonusResponse> {
        let url = self.endpoint_url("daily-bonus");

        tracing::debug!("Fetching daily bonus status");

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, "Failed to fetch daily bonus").await);
        }

        let bonus: DailyBonusResponse = response.json().await?;
        Ok(bonus)
    }
}

#[async_trait::async_trait]
impl SessionApi for BotApiClient {
    async fn request_verification_code(&self, phone_number: &str) -> ApiResult<AckResponse> {
        self.request_code(phone_number).await
    }

    async fn redeem_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> ApiResult<VerifyCodeResponse> {
        self.verify_code(phone_number, code).await
    }

    async fn fetch_profile(&self, user_id: &str) -> ApiResult<UserResponse> {
        self.get_user(user_id).await
    }

    async fn fetch_admin_roster(&self) -> ApiResult<AdminsResponse> {
        self.list_admins().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = BotApiClient::new("https://api.breakerbot.test");
        assert_eq!(client.api_url, "https://api.breakerbot.test");
    }

    #[test]
    fn client_strips_trailing_slash() {
        let client = BotApiClient::new("https://api.breakerbot.test/");
        assert_eq!(client.api_url, "https://api.breakerbot.test");
    }

    #[test]
    fn endpoint_url_joins_path() {
        let client = BotApiClient::new("https://api.breakerbot.test");
        assert_eq!(
            client.endpoint_url("auth/request-code"),
            "https://api.breakerbot.test/auth/request-code"
        );
        assert_eq!(
            client.endpoint_url(&format!("users/{}", "5516999999999@s.whatsapp.net")),
            "https://api.breakerbot.test/users/5516999999999@s.whatsapp.net"
        );
    }

    #[test]
    fn summarize_body_truncates_long_bodies() {
        let short = summarize_body("  {\"success\":false}  ");
        assert_eq!(short, "{\"success\":false}");

        let long = "x".repeat(500);
        let summary = summarize_body(&long);
        assert_eq!(summary.chars().count(), 163);
        assert!(summary.ends_with("..."));
    }

    #[tokio::test]
    async fn update_user_rejects_over_long_custom_name() {
        let client = BotApiClient::new("https://api.breakerbot.test");
        let update = UpdateUserRequest {
            custom_name: Some(Some("x".repeat(MAX_CUSTOM_NAME_LEN + 1))),
            ..Default::default()
        };

        let err = client
            .update_user("5516999999999@s.whatsapp.net", &update)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
