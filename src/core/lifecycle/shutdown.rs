// Why the process is stopping, and what that means for the exit status.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl-C / SIGINT.
    Interrupted,
    /// The gateway stopped without anyone reporting a failure.
    Closed,
    /// Discord rejected the token.
    InvalidToken,
    /// Anything unexpected during startup or while running.
    Fatal(String),
}

impl ShutdownReason {
    pub fn exit_code(&self) -> u8 {
        match self {
            ShutdownReason::Interrupted | ShutdownReason::Closed => 0,
            ShutdownReason::InvalidToken | ShutdownReason::Fatal(_) => 1,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ShutdownReason::Interrupted => "🛑 Stopping bot...".to_string(),
            ShutdownReason::Closed => "🛑 Gateway closed, stopping bot...".to_string(),
            ShutdownReason::InvalidToken => "❌ Invalid Discord token".to_string(),
            ShutdownReason::Fatal(detail) => format!("⚠️ Unexpected error: {}", detail),
        }
    }
}

/// Records the first fatal failure seen from inside framework callbacks, so
/// `main` can tell a requested stop from a crash once the client returns.
#[derive(Debug, Clone, Default)]
pub struct FatalLatch {
    inner: Arc<Mutex<Option<String>>>,
}

impl FatalLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, detail: impl Into<String>) {
        let mut slot = match self.inner.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.is_none() {
            *slot = Some(detail.into());
        }
    }

    pub fn take(&self) -> Option<String> {
        match self.inner.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}
