// Global error handler for the poise framework.
//
// Framework errors are narrowed to a `CommandFailure`, and the core decides
// what to log and what to say back. Every error raised while running a
// command ends up there; only errors with no command behind them (setup,
// event handlers, dynamic prefixes) go to poise's stock handler.

use crate::core::errors::CommandFailure;
use crate::core::events::{plan, BotAction, BotEvent};
use crate::discord::{Data, Error};

/// Which framework error we are looking at, without the borrowed context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameworkErrorKind {
    Setup,
    EventHandler,
    Command,
    SubcommandRequired,
    CommandPanic,
    /// `has_input` is false when the argument was never given at all.
    ArgumentParse { has_input: bool },
    CommandStructureMismatch,
    CooldownHit,
    MissingBotPermissions,
    MissingUserPermissions,
    NotAnOwner,
    GuildOnly,
    DmOnly,
    NsfwOnly,
    CommandCheckFailed,
    DynamicPrefix,
    UnknownCommand,
    UnknownInteraction,
    /// A variant added by a newer poise.
    Unrecognized { has_command: bool },
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    if let poise::FrameworkError::Setup { error, .. } = &error {
        // The setup closure already recorded the failure and stopped the shards.
        tracing::error!("Startup setup failed: {}", error);
        return;
    }

    let kind = kind_of(&error);
    let Some(failure) = failure_for(kind, || detail_of(&error, kind)) else {
        if let Err(e) = poise::builtins::on_error(error).await {
            tracing::error!("Error while handling error: {}", e);
        }
        return;
    };

    let ctx = error.ctx();
    let command = ctx
        .map(|ctx| ctx.command().qualified_name.clone())
        .unwrap_or_else(|| "<unknown>".to_string());

    for action in plan(&BotEvent::CommandError { command, failure }) {
        match action {
            BotAction::LogFailure { command, detail } => {
                tracing::error!(command = %command, "Unhandled error: {}", detail);
            }
            BotAction::Reply(text) => {
                if let Some(ctx) = ctx {
                    if let Err(e) = ctx.say(text).await {
                        tracing::warn!("Failed to send error reply: {}", e);
                    }
                }
            }
            other => tracing::debug!(?other, "Ignoring action in error handler"),
        }
    }
}

fn kind_of(error: &poise::FrameworkError<'_, Data, Error>) -> FrameworkErrorKind {
    use poise::FrameworkError as E;

    match error {
        E::Setup { .. } => FrameworkErrorKind::Setup,
        E::EventHandler { .. } => FrameworkErrorKind::EventHandler,
        E::Command { .. } => FrameworkErrorKind::Command,
        E::SubcommandRequired { .. } => FrameworkErrorKind::SubcommandRequired,
        E::CommandPanic { .. } => FrameworkErrorKind::CommandPanic,
        E::ArgumentParse { input, .. } => FrameworkErrorKind::ArgumentParse {
            has_input: input.is_some(),
        },
        E::CommandStructureMismatch { .. } => FrameworkErrorKind::CommandStructureMismatch,
        E::CooldownHit { .. } => FrameworkErrorKind::CooldownHit,
        E::MissingBotPermissions { .. } => FrameworkErrorKind::MissingBotPermissions,
        E::MissingUserPermissions { .. } => FrameworkErrorKind::MissingUserPermissions,
        E::NotAnOwner { .. } => FrameworkErrorKind::NotAnOwner,
        E::GuildOnly { .. } => FrameworkErrorKind::GuildOnly,
        E::DmOnly { .. } => FrameworkErrorKind::DmOnly,
        E::NsfwOnly { .. } => FrameworkErrorKind::NsfwOnly,
        E::CommandCheckFailed { .. } => FrameworkErrorKind::CommandCheckFailed,
        E::DynamicPrefix { .. } => FrameworkErrorKind::DynamicPrefix,
        E::UnknownCommand { .. } => FrameworkErrorKind::UnknownCommand,
        E::UnknownInteraction { .. } => FrameworkErrorKind::UnknownInteraction,
        other => FrameworkErrorKind::Unrecognized {
            has_command: other.ctx().is_some(),
        },
    }
}

/// `None` means there is no command to answer; the stock handler takes it.
fn failure_for(
    kind: FrameworkErrorKind,
    detail: impl FnOnce() -> String,
) -> Option<CommandFailure> {
    match kind {
        FrameworkErrorKind::MissingUserPermissions => Some(CommandFailure::MissingPermissions),
        FrameworkErrorKind::ArgumentParse { has_input: false } => {
            Some(CommandFailure::MissingArgument)
        }
        FrameworkErrorKind::UnknownCommand => Some(CommandFailure::UnknownCommand),
        FrameworkErrorKind::Setup
        | FrameworkErrorKind::EventHandler
        | FrameworkErrorKind::DynamicPrefix
        | FrameworkErrorKind::UnknownInteraction
        | FrameworkErrorKind::Unrecognized { has_command: false } => None,
        _ => Some(CommandFailure::Other(detail())),
    }
}

fn detail_of(error: &poise::FrameworkError<'_, Data, Error>, kind: FrameworkErrorKind) -> String {
    use poise::FrameworkError as E;

    match error {
        E::Command { error, .. } => format!("{:?}", error),
        E::ArgumentParse {
            error,
            input: Some(input),
            ..
        } => format!("could not parse argument {:?}: {}", input, error),
        E::CommandCheckFailed {
            error: Some(error), ..
        } => format!("command check failed: {:?}", error),
        E::CooldownHit {
            remaining_cooldown, ..
        } => format!("cooldown hit, {:?} remaining", remaining_cooldown),
        E::MissingBotPermissions {
            missing_permissions,
            ..
        } => format!("bot is missing permissions: {}", missing_permissions),
        _ => format!("{:?}", kind),
    }
}
