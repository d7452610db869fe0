//! Session state machine.
//!
//! [`SessionController`] owns the authoritative authentication record:
//! which phone number a code was requested for, whether verification is
//! pending, and who the session is authenticated as. All mutation goes
//! through `request_code`, `login`, `logout`, `refresh_user`, and one-time
//! `rehydrate`; consumers read through accessors.
//!
//! Boundary contract: network-facing operations return an
//! [`OperationOutcome`], never an error type. Transport errors, rejected
//! codes, and malformed responses all collapse into `success == false` with
//! a user-facing message; a failed operation leaves previously set fields
//! untouched, except that an authentication-rejected backend status ends
//! the session outright. Storage failures are logged and degrade to
//! in-memory-only sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use breaker_api::{ApiError, SessionApi, UserProfile};
use breaker_core::phone;
use breaker_storage::{SessionVault, StoredCredential};

use crate::events::{NullSink, SessionEvent, SessionEventSink};
use crate::roles;
use crate::types::{Identity, OperationOutcome, RehydrateOutcome, SessionState};

#[derive(Default)]
struct SessionInner {
    phone_number: Option<String>,
    pending_verification: bool,
    identity: Option<Identity>,
    profile: Option<UserProfile>,
}

/// Long-lived authentication session controller.
///
/// One instance per process, shared behind an `Arc`. Locks are never held
/// across await points.
pub struct SessionController {
    api: Arc<dyn SessionApi>,
    vault: SessionVault,
    sink: Arc<dyn SessionEventSink>,
    inner: RwLock<SessionInner>,
    rehydrated: AtomicBool,
}

impl SessionController {
    /// Creates a controller with no session. Call [`rehydrate`] before
    /// exposing session state to consumers.
    ///
    /// [`rehydrate`]: SessionController::rehydrate
    pub fn new(api: Arc<dyn SessionApi>, vault: SessionVault) -> Self {
        Self::with_sink(api, vault, Arc::new(NullSink))
    }

    /// Creates a controller that emits session events into `sink`.
    pub fn with_sink(
        api: Arc<dyn SessionApi>,
        vault: SessionVault,
        sink: Arc<dyn SessionEventSink>,
    ) -> Self {
        Self {
            api,
            vault,
            sink,
            inner: RwLock::new(SessionInner::default()),
            rehydrated: AtomicBool::new(false),
        }
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().expect("lock poisoned")
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().expect("lock poisoned")
    }

    // ========================================================================
    // Rehydration
    // ========================================================================

    /// Restores a persisted session, if any.
    ///
    /// Reads the credential key once per process lifetime, before any
    /// consumer looks at session state; later calls skip the store and
    /// report the in-memory state. Never touches the network: a restored
    /// credential alone makes the session authenticated.
    pub fn rehydrate(&self) -> RehydrateOutcome {
        if self.rehydrated.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session already rehydrated");
            let inner = self.read_inner();
            return match &inner.identity {
                Some(identity) => RehydrateOutcome::Restored {
                    identity: identity.clone(),
                },
                None => RehydrateOutcome::NoCredential,
            };
        }

        match self.vault.load_credential() {
            Ok(Some(credential)) => {
                let identity = Identity::from_string(credential.identity);
                {
                    let mut inner = self.write_inner();
                    inner.identity = Some(identity.clone());
                    inner.phone_number = Some(credential.phone_number);
                    inner.pending_verification = false;
                }
                tracing::info!(identity = %identity, "Restored persisted session");
                self.sink.emit(SessionEvent::SessionRestored {
                    identity: identity.clone(),
                });
                RehydrateOutcome::Restored { identity }
            }
            Ok(None) => RehydrateOutcome::NoCredential,
            Err(err) => {
                tracing::warn!(error = %err, "Session store unavailable, starting unauthenticated");
                RehydrateOutcome::StorageUnavailable
            }
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Asks the backend to deliver a verification code to `phone_number`
    /// (digits only, country code included).
    ///
    /// On success the phone number is held in memory and verification
    /// becomes pending; nothing is persisted until login succeeds. On
    /// failure the session is left exactly as it was.
    pub async fn request_code(&self, phone_number: &str) -> OperationOutcome {
        if !phone::is_valid(phone_number) {
            return OperationOutcome::failure("Enter a valid phone number with country code.");
        }

        match self.api.request_verification_code(phone_number).await {
            Ok(ack) if ack.success => {
                {
                    let mut inner = self.write_inner();
                    inner.phone_number = Some(phone_number.to_string());
                    inner.pending_verification = true;
                }
                tracing::info!(phone_number = %phone_number, "Verification code requested");
                self.sink.emit(SessionEvent::CodeRequested {
                    phone_number: phone_number.to_string(),
                });
                OperationOutcome::ok()
            }
            Ok(ack) => OperationOutcome::failure(
                ack.message
                    .unwrap_or_else(|| "Could not request the verification code.".to_string()),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "Verification code request failed");
                OperationOutcome::failure("Could not request the code. Check your connection.")
            }
        }
    }

    /// Redeems a 6-digit verification code for the pending phone number.
    ///
    /// Fails fast without a network call when no code was requested. On
    /// success the identity and profile come from the response and the
    /// credential is persisted before the outcome is reported. A rejected
    /// code surfaces the backend's message and keeps verification pending,
    /// so the same phone number can retry with a fresh code.
    pub async fn login(&self, code: &str) -> OperationOutcome {
        let phone_number = {
            let inner = self.read_inner();
            match &inner.phone_number {
                Some(phone_number) if inner.pending_verification => phone_number.clone(),
                _ => {
                    return OperationOutcome::failure(
                        "No verification in progress. Request a code first.",
                    )
                }
            }
        };

        match self.api.redeem_verification_code(&phone_number, code).await {
            Ok(response) => match response.user {
                Some(user) if response.success => {
                    let identity = Identity::from_string(user.id.clone());
                    let credential = StoredCredential::new(identity.as_str(), &phone_number);
                    if let Err(err) = self.vault.store_credential(&credential) {
                        tracing::warn!(error = %err, "Could not persist session credential");
                    }
                    {
                        let mut inner = self.write_inner();
                        inner.identity = Some(identity.clone());
                        inner.profile = Some(user);
                        inner.pending_verification = false;
                    }
                    tracing::info!(identity = %identity, "Logged in");
                    self.sink.emit(SessionEvent::LoggedIn {
                        identity: identity.clone(),
                    });
                    OperationOutcome::ok()
                }
                _ => OperationOutcome::failure(
                    response
                        .message
                        .unwrap_or_else(|| "Invalid verification code.".to_string()),
                ),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Code verification failed");
                OperationOutcome::failure("Could not verify the code. Check your connection.")
            }
        }
    }

    /// Clears the session and removes the persisted credential.
    ///
    /// Idempotent: calling while already unauthenticated does nothing.
    pub fn logout(&self) {
        if let Err(err) = self.vault.clear_credential() {
            tracing::warn!(error = %err, "Could not clear persisted credential");
        }

        let was_authenticated = {
            let mut inner = self.write_inner();
            let had_identity = inner.identity.is_some();
            *inner = SessionInner::default();
            had_identity
        };

        if was_authenticated {
            tracing::info!("Logged out");
            self.sink.emit(SessionEvent::LoggedOut);
        }
    }

    /// Discards the session when the backend answers that the credential
    /// itself is no longer accepted. Returns true when a revocation was
    /// handled, false for every other error.
    fn discard_revoked_session(&self, error: &ApiError) -> bool {
        if !error.is_auth_rejection() {
            return false;
        }

        if let Err(err) = self.vault.clear_credential() {
            tracing::warn!(error = %err, "Could not clear persisted credential");
        }

        let was_authenticated = {
            let mut inner = self.write_inner();
            let had_identity = inner.identity.is_some();
            *inner = SessionInner::default();
            had_identity
        };

        if was_authenticated {
            tracing::warn!("Session revoked by the backend");
            self.sink.emit(SessionEvent::SessionRevoked);
        }
        true
    }

    /// Re-fetches the profile for the current identity.
    ///
    /// On failure the previously cached profile stays available and the
    /// authentication state is untouched, unless the backend answered that
    /// the credential itself is no longer valid; a revoked session is
    /// discarded like a logout.
    pub async fn refresh_user(&self) -> OperationOutcome {
        let identity = {
            let inner = self.read_inner();
            match &inner.identity {
                Some(identity) => identity.clone(),
                None => return OperationOutcome::failure("Not logged in."),
            }
        };

        match self.api.fetch_profile(identity.as_str()).await {
            Ok(response) => match response.user {
                Some(user) if response.success => {
                    self.write_inner().profile = Some(user);
                    self.sink.emit(SessionEvent::ProfileRefreshed {
                        identity: identity.clone(),
                    });
                    OperationOutcome::ok()
                }
                _ => OperationOutcome::failure(
                    response
                        .message
                        .unwrap_or_else(|| "Could not refresh your profile.".to_string()),
                ),
            },
            Err(err) => {
                if self.discard_revoked_session(&err) {
                    return OperationOutcome::failure("Your session has expired. Log in again.");
                }
                tracing::warn!(error = %err, "Profile refresh failed");
                OperationOutcome::failure("Could not refresh your profile.")
            }
        }
    }

    /// Whether the logged-in user is on the administrator roster.
    ///
    /// Fetches the roster and derives the role. Any failure, including not
    /// being logged in, yields false so admin-only surfaces stay hidden. An
    /// authentication-rejected answer additionally discards the session.
    pub async fn current_user_is_admin(&self) -> bool {
        let identity = {
            let inner = self.read_inner();
            match &inner.identity {
                Some(identity) => identity.clone(),
                None => return false,
            }
        };

        match self.api.fetch_admin_roster().await {
            Ok(response) if response.success => roles::is_admin(&identity, &response.admins),
            Ok(_) => false,
            Err(err) => {
                if !self.discard_revoked_session(&err) {
                    tracing::warn!(error = %err, "Admin roster fetch failed");
                }
                false
            }
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// The phone number a code was requested for, if any.
    pub fn phone_number(&self) -> Option<String> {
        self.read_inner().phone_number.clone()
    }

    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.read_inner().identity.clone()
    }

    /// True iff an identity is set.
    pub fn is_authenticated(&self) -> bool {
        self.read_inner().identity.is_some()
    }

    /// Whether a requested code is still awaiting verification.
    pub fn pending_verification(&self) -> bool {
        self.read_inner().pending_verification
    }

    /// The cached profile, if any.
    pub fn profile(&self) -> Option<UserProfile> {
        self.read_inner().profile.clone()
    }

    /// The current lifecycle state, derived from the session fields.
    pub fn state(&self) -> SessionState {
        let inner = self.read_inner();
        if inner.identity.is_some() {
            SessionState::Authenticated
        } else if inner.pending_verification {
            SessionState::CodeRequested
        } else {
            SessionState::Unauthenticated
        }
    }
}
