//! Verification flow: the glue between code entry and the session.
//!
//! Owns the 6-slot [`CodeEntry`] buffer and the resend [`CooldownTimer`],
//! and forwards completed codes to the controller. Methods take `&mut self`,
//! so a submission always finishes before the next input is fed; the
//! non-reentrancy of `request_code` and `login` is enforced structurally.
//!
//! Dropping the flow cancels the countdown task.

use std::sync::Arc;

use breaker_core::phone;

use crate::code_entry::{CodeEntry, TypeOutcome, CODE_LENGTH};
use crate::controller::SessionController;
use crate::cooldown::CooldownTimer;
use crate::types::OperationOutcome;

/// Drives the phone + code entry screens against a session controller.
pub struct VerificationFlow {
    controller: Arc<SessionController>,
    entry: CodeEntry,
    cooldown: Option<CooldownTimer>,
}

impl VerificationFlow {
    /// Creates an idle flow with an empty code buffer and no countdown.
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            controller,
            entry: CodeEntry::new(),
            cooldown: None,
        }
    }

    /// Requests a verification code for a raw phone input.
    ///
    /// Strips formatting, validates the digit count, and on success arms
    /// the 60 second resend countdown.
    pub async fn request_code(&mut self, phone_input: &str) -> OperationOutcome {
        let digits = phone::digits_only(phone_input);
        if !phone::is_valid(&digits) {
            return OperationOutcome::failure("Enter a valid phone number with country code.");
        }

        let outcome = self.controller.request_code(&digits).await;
        if outcome.success {
            self.cooldown = Some(CooldownTimer::start());
        }
        outcome
    }

    /// Re-requests a code for the pending phone number.
    ///
    /// Rejected while the countdown is running or when no verification is
    /// in progress; a successful resend re-arms the countdown.
    pub async fn resend_code(&mut self) -> OperationOutcome {
        let Some(phone_number) = self.controller.phone_number() else {
            return OperationOutcome::failure("No verification in progress. Request a code first.");
        };
        if !self.can_resend() {
            return OperationOutcome::failure(
                "Wait for the countdown before requesting a new code.",
            );
        }

        let outcome = self.controller.request_code(&phone_number).await;
        if outcome.success {
            self.cooldown = Some(CooldownTimer::start());
        }
        outcome
    }

    /// Feeds the text typed into `slot`.
    ///
    /// When this input completes the buffer on the final slot, the code is
    /// submitted automatically and the login outcome is returned.
    pub async fn type_digit(&mut self, slot: usize, input: &str) -> Option<OperationOutcome> {
        match self.entry.type_digit(slot, input) {
            TypeOutcome::Submit(code) => Some(self.submit_code(&code).await),
            TypeOutcome::Accepted | TypeOutcome::Ignored => None,
        }
    }

    /// Backspace pressed on `slot`.
    pub fn backspace(&mut self, slot: usize) {
        self.entry.backspace(slot);
    }

    /// Submits whatever is currently in the buffer.
    ///
    /// Rejects incomplete codes synchronously, without a network call.
    pub async fn submit(&mut self) -> OperationOutcome {
        let code = self.entry.code();
        if code.len() != CODE_LENGTH {
            return OperationOutcome::failure("Enter the 6-digit code.");
        }
        self.submit_code(&code).await
    }

    async fn submit_code(&mut self, code: &str) -> OperationOutcome {
        let outcome = self.controller.login(code).await;
        if !outcome.success {
            // the user retypes the whole code after a rejection
            self.entry.reset();
        }
        outcome
    }

    /// Whether a resend is currently allowed.
    pub fn can_resend(&self) -> bool {
        self.cooldown
            .as_ref()
            .map_or(true, CooldownTimer::can_resend)
    }

    /// Seconds left on the resend countdown, zero when idle.
    pub fn resend_seconds_remaining(&self) -> u32 {
        self.cooldown
            .as_ref()
            .map_or(0, CooldownTimer::seconds_remaining)
    }

    /// The code buffer, for rendering slots and cursor.
    pub fn entry(&self) -> &CodeEntry {
        &self.entry
    }

    /// The controller this flow drives.
    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }
}
