// The bundled command extension.
//
// Like the rest of this layer it stays thin: pull what we need out of the
// Discord context, format a reply, send it.

use crate::core::extensions::Extension;
use crate::discord::{Command, Context, Error};
use chrono::{Duration, Utc};
use poise::serenity_prelude as serenity;

pub struct LikeCommands;

impl Extension<Command> for LikeCommands {
    fn name(&self) -> &'static str {
        "like_commands"
    }

    fn commands(&self) -> Vec<Command> {
        vec![like(), status(), ping(), sync()]
    }
}

/// Send a like to another member.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn like(
    ctx: Context<'_>,
    #[description = "Member to like"] user: serenity::User,
) -> Result<(), Error> {
    let author = ctx.author();
    ctx.say(like_reply(&author.name, author.id == user.id, &user.name, user.bot))
        .await?;
    Ok(())
}

/// Show the bot account, its server count and uptime.
#[poise::command(slash_command, prefix_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let guild_count = ctx.serenity_context().cache.guilds().len();
    let uptime = Utc::now().signed_duration_since(data.started_at);

    ctx.say(status_line(&data.bot_name.get(), guild_count, uptime))
        .await?;
    Ok(())
}

/// Check the gateway heartbeat latency.
#[poise::command(slash_command, prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    ctx.say(format!("🏓 Pong! Gateway latency: {} ms", latency.as_millis()))
        .await?;
    Ok(())
}

/// Re-publish the slash command tree.
#[poise::command(prefix_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn sync(ctx: Context<'_>) -> Result<(), Error> {
    let commands = &ctx.framework().options().commands;
    poise::builtins::register_globally(ctx.serenity_context(), commands).await?;

    tracing::info!(count = commands.len(), "Command tree re-synced on request");
    ctx.say(format!("✔ Synced {} commands", commands.len()))
        .await?;
    Ok(())
}

fn like_reply(author: &str, is_self: bool, target: &str, target_is_bot: bool) -> String {
    if is_self {
        "😅 You can't like yourself.".to_string()
    } else if target_is_bot {
        "🤖 Bots don't collect likes.".to_string()
    } else {
        format!("❤️ **{}** sent a like to **{}**!", author, target)
    }
}

fn status_line(name: &str, guild_count: usize, uptime: Duration) -> String {
    format!(
        "**{}** is sharing likes on {} servers (up {})",
        name,
        guild_count,
        format_uptime(uptime)
    )
}

fn format_uptime(uptime: Duration) -> String {
    let total_minutes = uptime.num_minutes().max(0);
    let days = total_minutes / (60 * 24);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poise::serenity_prelude::Permissions;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::seconds(59)), "0m");
        assert_eq!(format_uptime(Duration::minutes(75)), "1h 15m");
        assert_eq!(
            format_uptime(Duration::days(2) + Duration::hours(3) + Duration::minutes(4)),
            "2d 3h 4m"
        );
        assert_eq!(format_uptime(Duration::minutes(-5)), "0m");
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line("Seemu#4821", 5, Duration::minutes(90)),
            "**Seemu#4821** is sharing likes on 5 servers (up 1h 30m)"
        );
    }

    #[test]
    fn test_like_reply() {
        assert_eq!(
            like_reply("ana", false, "bo", false),
            "❤️ **ana** sent a like to **bo**!"
        );
        assert_eq!(like_reply("ana", true, "ana", false), "😅 You can't like yourself.");
        assert_eq!(like_reply("ana", false, "Seemu", true), "🤖 Bots don't collect likes.");
    }

    #[test]
    fn test_sync_requires_administrator() {
        let command = sync();
        assert!(command
            .required_permissions
            .contains(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn test_like_takes_a_required_member() {
        let command = like();
        assert_eq!(command.parameters.len(), 1);
        assert!(command.parameters[0].required);
    }
}
