//! # breaker-session
//!
//! Client-side authentication session lifecycle for the BreakerBot
//! companion app: request a verification code for a phone number, redeem
//! the 6-digit code the bot delivers, persist the resulting credential, and
//! derive the administrator role.
//!
//! ## Ground Rules
//!
//! - **The identity is the auth signal** - a session is authenticated iff
//!   an identity is set; the persisted credential only restores it
//! - **Uniform outcomes at the boundary** - operations return
//!   [`OperationOutcome`], never error types; failures carry a short
//!   user-facing message and leave previous state untouched
//! - **Storage degrades, never breaks** - a failing store costs persistence
//!   across restarts, nothing else
//! - **Events reflect committed reality** - emitted after the transition
//!   and credential write, and sinks cannot veto
//!
//! ## Flow
//!
//! ```text
//! Unauthenticated --request_code--> CodeRequested --login--> Authenticated
//!        ^                              | failed login:           |
//!        |                              | stay, buffer resets     |
//!        +------------- logout ------------------------------------+
//! ```
//!
//! ## Crate Structure
//!
//! - [`controller`] - The session state machine and rehydration
//! - [`verify_flow`] - Code entry + resend cooldown glued to the controller
//! - [`code_entry`] - The 6-slot code buffer value type
//! - [`cooldown`] - Resend countdown counter and timer task
//! - [`roles`] - Administrator role derivation
//! - [`events`] - Session event contracts
//! - [`types`] - Core types

pub mod code_entry;
pub mod controller;
pub mod cooldown;
pub mod events;
pub mod roles;
pub mod types;
pub mod verify_flow;

#[cfg(test)]
mod tests;

pub use code_entry::{CodeEntry, TypeOutcome, CODE_LENGTH};
pub use controller::SessionController;
pub use cooldown::{CooldownTimer, ResendCooldown, RESEND_COOLDOWN_SECS};
pub use events::{NullSink, RecordingSink, SessionEvent, SessionEventSink};
pub use roles::is_admin;
pub use types::{
    Identity, OperationOutcome, RehydrateOutcome, SessionState, USER_JID_SUFFIX,
};
pub use verify_flow::VerificationFlow;
