//! Scenario tests for the session lifecycle.
//!
//! - `harness.rs`      - Mock backend, mock storage, wired controllers
//! - `lifecycle.rs`    - request_code / login / logout / refresh_user / roles
//! - `rehydration.rs`  - Persisted credential restore at process start
//! - `verification.rs` - Code entry flow, auto-submit, resend cooldown

mod rehydration;
