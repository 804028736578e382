// This module handles bot presence.
//
// Everything here is Discord-layer glue: the presence loop lives in the core
// and only sees `PresenceSink`, this adapts a serenity `Context` to it.

use crate::core::presence::{PresenceError, PresenceSink};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

/// Discord drops activity names longer than this.
const MAX_ACTIVITY_LEN: usize = 128;

pub struct GatewayPresence {
    ctx: serenity::Context,
}

impl GatewayPresence {
    pub fn new(ctx: serenity::Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PresenceSink for GatewayPresence {
    fn guild_count(&self) -> usize {
        self.ctx.cache.guilds().len()
    }

    async fn set_activity(&self, text: &str) -> Result<(), PresenceError> {
        if text.chars().count() > MAX_ACTIVITY_LEN {
            return Err(PresenceError::Rejected(format!(
                "activity longer than {} characters",
                MAX_ACTIVITY_LEN
            )));
        }

        // serenity 0.12 exposes builder helpers on ActivityData, not Activity.
        let activity = serenity::ActivityData::playing(text);
        self.ctx
            .set_presence(Some(activity), serenity::OnlineStatus::Online);
        Ok(())
    }
}
