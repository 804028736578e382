// Lifecycle events and what we do about them.
//
// Everything the bot reacts to (gateway ready, presence ticks, command errors,
// shutdown) is described as a `BotEvent`, and `plan` turns it into a list of
// `BotAction`s. The mapping is a pure function so it can be tested without a
// network client; the Discord layer and `main` carry the actions out.

use crate::core::errors::CommandFailure;
use crate::core::lifecycle::ShutdownReason;
use crate::core::presence::{activity_text, periodic_activity_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// The gateway finished its handshake for the given account.
    Ready {
        user_tag: String,
        guild_count: usize,
    },
    /// The presence timer fired.
    PresenceTick { guild_count: usize },
    /// A command invocation failed.
    CommandError {
        command: String,
        failure: CommandFailure,
    },
    /// The process is stopping.
    Shutdown(ShutdownReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    /// Store the connected account's display name for the health check.
    RecordName(String),
    /// Replace the "Playing ..." activity.
    SetActivity(String),
    /// Open the gate for the presence loop.
    MarkReady,
    /// Answer the invoking user in chat.
    Reply(&'static str),
    /// Log a failure with its full detail.
    LogFailure { command: String, detail: String },
    /// Print a console line for whoever is watching the process.
    Announce(String),
    /// Stop the health-check server.
    CloseSession,
    /// Shut down all gateway shards.
    CloseGateway,
    /// Leave with this status code.
    Exit(u8),
}

pub fn plan(event: &BotEvent) -> Vec<BotAction> {
    match event {
        BotEvent::Ready {
            user_tag,
            guild_count,
        } => vec![
            BotAction::SetActivity(activity_text(*guild_count)),
            BotAction::RecordName(user_tag.clone()),
            BotAction::Announce(format!("🔗 Connected as {}", user_tag)),
            BotAction::MarkReady,
        ],
        BotEvent::PresenceTick { guild_count } => {
            vec![BotAction::SetActivity(periodic_activity_text(*guild_count))]
        }
        BotEvent::CommandError { command, failure } => {
            let mut actions = Vec::new();
            if failure.should_log() {
                actions.push(BotAction::LogFailure {
                    command: command.clone(),
                    detail: failure.detail(),
                });
            }
            if let Some(reply) = failure.reply() {
                actions.push(BotAction::Reply(reply));
            }
            actions
        }
        BotEvent::Shutdown(reason) => vec![
            BotAction::Announce(reason.describe()),
            BotAction::CloseSession,
            BotAction::CloseGateway,
            BotAction::Exit(reason.exit_code()),
        ],
    }
}
