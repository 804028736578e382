// Gateway events the bot reacts to, and the executor for planned actions.

use crate::core::events::{plan, BotAction, BotEvent};
use crate::core::presence::PresenceSink;
use crate::discord::commands::presence::GatewayPresence;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

/// Event handler for non-command Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    // Fires again after every reconnect; the name and presence are refreshed each time.
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        let ready = BotEvent::Ready {
            user_tag: data_about_bot.user.tag(),
            guild_count: data_about_bot.guilds.len(),
        };
        let presence = GatewayPresence::new(ctx.clone());
        apply_actions(&presence, data, plan(&ready)).await;
    }

    Ok(())
}

/// Carries out the actions that touch shared bot state or the presence.
pub async fn apply_actions<S: PresenceSink + ?Sized>(
    sink: &S,
    data: &Data,
    actions: Vec<BotAction>,
) {
    for action in actions {
        match action {
            BotAction::SetActivity(text) => {
                if let Err(e) = sink.set_activity(&text).await {
                    tracing::warn!("⚠️ Error updating activity: {}", e);
                }
            }
            BotAction::RecordName(name) => {
                if !data.bot_name.is_placeholder() {
                    tracing::info!("Gateway reconnected as {}", name);
                }
                data.bot_name.set(name);
            }
            BotAction::MarkReady => {
                if !data.ready.is_ready() {
                    tracing::debug!("Ready signal raised, presence loop released");
                }
                data.ready.mark_ready();
            }
            BotAction::Announce(line) => println!("{}", line),
            other => tracing::debug!(?other, "Action not handled by the event dispatcher"),
        }
    }
}
