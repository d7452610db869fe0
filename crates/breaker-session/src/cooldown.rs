//! Resend cooldown for verification codes.
//!
//! Every successful code request arms a single 60 second countdown; a new
//! code may not be requested while it is running. [`ResendCooldown`] is the
//! pure counter; [`CooldownTimer`] drives one on the runtime, ticking once
//! per second, and cancels its task when dropped.

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

/// Seconds a user must wait between verification-code requests.
pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Countdown gating how soon a verification code may be re-requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl ResendCooldown {
    /// An expired countdown: resend permitted.
    pub const fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// A freshly armed countdown at the full duration.
    pub const fn armed() -> Self {
        Self {
            remaining: RESEND_COOLDOWN_SECS,
        }
    }

    /// One second elapsed.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Seconds left until resend is permitted.
    pub fn seconds_remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether a resend is currently allowed.
    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self::idle()
    }
}

/// A running countdown task.
///
/// Arms a [`ResendCooldown`] and decrements it once per second on the
/// runtime until it expires. Dropping the timer aborts the task, so a torn
/// down verification flow never leaves a ticker behind.
#[derive(Debug)]
pub struct CooldownTimer {
    state: Arc<Mutex<ResendCooldown>>,
    handle: JoinHandle<()>,
}

impl CooldownTimer {
    /// Start a fresh 60 second countdown.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(ResendCooldown::armed()));
        let ticker_state = state.clone();
        // created here so the tick schedule is anchored to the arm time,
        // not to the task's first poll
        let mut ticker = interval(Duration::from_secs(1));

        let handle = tokio::spawn(async move {
            // the first interval tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Ok(mut cooldown) = ticker_state.lock() else {
                    break;
                };
                cooldown.tick();
                if cooldown.can_resend() {
                    break;
                }
            }
        });

        Self { state, handle }
    }

    /// Seconds left until resend is permitted.
    pub fn seconds_remaining(&self) -> u32 {
        self.state
            .lock()
            .map(|cooldown| cooldown.seconds_remaining())
            .unwrap_or(0)
    }

    /// Whether a resend is currently allowed.
    pub fn can_resend(&self) -> bool {
        self.seconds_remaining() == 0
    }
}

impl Drop for CooldownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
