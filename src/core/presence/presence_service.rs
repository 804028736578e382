// Presence ("Playing ...") updates.
//
// The loop only needs two things from the platform: how many guilds we are in
// and a way to set the activity text. Both sit behind `PresenceSink` so the
// timing rules can be exercised with a fake in tests.

use crate::core::events::{plan, BotAction, BotEvent};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// How often the activity text is refreshed.
pub const PRESENCE_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("presence update rejected: {0}")]
    Rejected(String),
}

/// Activity set when the gateway reports ready.
pub fn activity_text(guild_count: usize) -> String {
    format!("Sharing likes on {} servers", guild_count)
}

/// Activity set by each tick of the presence loop.
pub fn periodic_activity_text(guild_count: usize) -> String {
    format!("{} !!", activity_text(guild_count))
}

#[async_trait]
pub trait PresenceSink: Send + Sync {
    fn guild_count(&self) -> usize;
    async fn set_activity(&self, text: &str) -> Result<(), PresenceError>;
}

/// One-way gate flipped by the first ready event.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves immediately if ready was already signalled.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel can't close under us.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one presence update. Failures are logged and swallowed; the caller's
/// schedule is never affected by them.
pub async fn update_presence<S: PresenceSink + ?Sized>(sink: &S) {
    let guild_count = sink.guild_count();

    for action in plan(&BotEvent::PresenceTick { guild_count }) {
        if let BotAction::SetActivity(text) = action {
            match sink.set_activity(&text).await {
                Ok(()) => tracing::info!(
                    guild_count,
                    "✅ Activity updated: {}",
                    activity_text(guild_count)
                ),
                Err(e) => tracing::warn!("⚠️ Error updating activity: {}", e),
            }
        }
    }
}

/// Waits for `ready`, then updates the presence right away and every `period`
/// after that. Runs until the task is dropped.
pub async fn run_presence_loop<S: PresenceSink>(sink: S, ready: ReadySignal, period: Duration) {
    ready.wait().await;
    tracing::info!("Bot ready, starting activity update loop.");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        update_presence(&sink).await;
    }
}
