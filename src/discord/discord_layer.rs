// Discord layer - commands, framework callbacks and the types they share.

use crate::core::presence::ReadySignal;
use crate::core::status::BotName;
use chrono::{DateTime, Utc};

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "errors/error_handler.rs"]
pub mod errors;

#[path = "events/event_dispatch.rs"]
pub mod events;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Command = poise::Command<Data, Error>;

/// State shared by every command and callback.
pub struct Data {
    /// Also held by the health-check server.
    pub bot_name: BotName,
    pub ready: ReadySignal,
    pub started_at: DateTime<Utc>,
}

impl Data {
    pub fn new(bot_name: BotName, ready: ReadySignal) -> Self {
        Self {
            bot_name,
            ready,
            started_at: Utc::now(),
        }
    }
}
