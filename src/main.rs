// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Bot behaviour (platform-agnostic): config, presence, error
//   classification, event planning, extensions, shutdown
// - `infra/` = The health-check HTTP server
// - `discord/` = Discord-specific adapters (commands, callbacks)
//
// This file's job is to:
// 1. Load configuration
// 2. Start the health-check server
// 3. Set up the Discord framework with the loaded extensions
// 4. Run until interrupted, then shut down in order

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::config::{BotConfig, ConfigError, COMMAND_PREFIX};
use crate::core::events::{plan, BotAction, BotEvent};
use crate::core::extensions::load_extensions;
use crate::core::lifecycle::{FatalLatch, ShutdownReason};
use crate::core::presence::{run_presence_loop, ReadySignal, PRESENCE_INTERVAL};
use crate::core::status::BotName;
use crate::discord::commands::presence::GatewayPresence;
use crate::discord::{Data, Error};
use crate::infra::health::HealthServer;
use poise::serenity_prelude as serenity;
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn shutdown_reason_for(err: &::serenity::Error) -> ShutdownReason {
    match err {
        ::serenity::Error::Gateway(::serenity::gateway::GatewayError::InvalidAuthentication) => {
            ShutdownReason::InvalidToken
        }
        other => ShutdownReason::Fatal(other.to_string()),
    }
}

fn read_config(loaded: Result<BotConfig, ConfigError>) -> Result<BotConfig, ExitCode> {
    loaded.map_err(|e| {
        tracing::error!("❌ {}", e);
        ExitCode::from(1)
    })
}

/// Resolves on Ctrl-C. If the handler can't be installed this never resolves,
/// so the bot keeps running until the gateway stops.
async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // No token means no connection attempt at all.
    let config = match read_config(BotConfig::from_env()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    // ========================================================================
    // HEALTH CHECK
    // ========================================================================

    let bot_name = BotName::new();
    let health_addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let health = match HealthServer::spawn(health_addr, bot_name.clone()) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("⚠️ Unexpected error: {}", e);
            return ExitCode::from(1);
        }
    };
    println!("🌐 Health check running on port {}", health.local_addr().port());

    // ========================================================================
    // EXTENSIONS
    // ========================================================================

    let report = load_extensions(&discord::commands::extensions());
    tracing::info!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        "✔ All extensions loaded"
    );

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let fatal = FatalLatch::new();
    let setup_fatal = fatal.clone();
    let data = Data::new(bot_name, ReadySignal::new());

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: report.commands,
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                ..Default::default()
            },
            on_error: |error| Box::pin(discord::errors::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(discord::events::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                println!("🤖 Bot is starting up...");

                // Publish the command tree. Without it slash commands never show up,
                // so a failure here takes the whole process down.
                if let Err(e) =
                    poise::builtins::register_globally(ctx, &framework.options().commands).await
                {
                    setup_fatal.record(format!("command tree sync failed: {}", e));
                    framework.shard_manager().shutdown_all().await;
                    return Err(Error::from(e));
                }
                println!("✅ Commands registered!");

                tokio::spawn(run_presence_loop(
                    GatewayPresence::new(ctx.clone()),
                    data.ready.clone(),
                    PRESENCE_INTERVAL,
                ));

                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::all();

    let client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await;

    let mut client = match client {
        Ok(client) => client,
        Err(e) => {
            return shutdown(shutdown_reason_for(&e), Some(health), None).await;
        }
    };

    let shard_manager = client.shard_manager.clone();

    let reason = tokio::select! {
        result = client.start() => match result {
            Ok(()) => match fatal.take() {
                Some(detail) => ShutdownReason::Fatal(detail),
                None => ShutdownReason::Closed,
            },
            Err(e) => shutdown_reason_for(&e),
        },
        _ = wait_for_interrupt() => ShutdownReason::Interrupted,
    };

    shutdown(reason, Some(health), Some(shard_manager)).await
}

async fn shutdown(
    reason: ShutdownReason,
    mut health: Option<HealthServer>,
    shard_manager: Option<std::sync::Arc<serenity::ShardManager>>,
) -> ExitCode {
    if reason.exit_code() != 0 {
        tracing::error!(?reason, "Shutting down after failure");
    }

    let mut exit = ExitCode::SUCCESS;
    for action in plan(&BotEvent::Shutdown(reason)) {
        match action {
            BotAction::Announce(line) => println!("\n{}", line),
            BotAction::CloseSession => {
                if let Some(server) = health.take() {
                    // Joining the server thread blocks, keep it off the async workers.
                    if let Err(e) = tokio::task::spawn_blocking(move || server.shutdown()).await {
                        tracing::warn!("Health check shutdown task failed: {}", e);
                    }
                }
            }
            BotAction::CloseGateway => {
                if let Some(manager) = &shard_manager {
                    manager.shutdown_all().await;
                }
            }
            BotAction::Exit(code) => exit = ExitCode::from(code),
            other => tracing::debug!(?other, "Action not handled during shutdown"),
        }
    }

    exit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_token_maps_to_invalid_token() {
        let err =
            ::serenity::Error::Gateway(::serenity::gateway::GatewayError::InvalidAuthentication);
        assert_eq!(shutdown_reason_for(&err), ShutdownReason::InvalidToken);
    }

    #[test]
    fn test_other_client_errors_are_fatal() {
        let err = ::serenity::Error::Other("boom");
        assert!(matches!(shutdown_reason_for(&err), ShutdownReason::Fatal(_)));
        assert_eq!(shutdown_reason_for(&err).exit_code(), 1);
    }

    #[test]
    fn test_missing_token_exits_with_one() {
        let result =
            read_config(BotConfig::from_lookup(|key| (key == "PORT").then(|| "8080".to_string())));
        assert_eq!(result.err(), Some(ExitCode::from(1)));
    }

    #[test]
    fn test_bad_port_exits_with_one() {
        let result = read_config(BotConfig::from_lookup(|key| match key {
            "TOKEN" => Some("abc".to_string()),
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        }));
        assert_eq!(result.err(), Some(ExitCode::from(1)));
    }

    #[test]
    fn test_valid_config_is_returned() {
        let result = read_config(BotConfig::from_lookup(|key| match key {
            "TOKEN" => Some("abc".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        }));
        let config = result.ok().map(|c| (c.token, c.port));
        assert_eq!(config, Some(("abc".to_string(), 8080)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_wait_does_not_resolve_on_its_own() {
        let waited =
            tokio::time::timeout(std::time::Duration::from_secs(60), wait_for_interrupt()).await;
        assert!(waited.is_err());
    }
}
