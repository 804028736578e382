// The core module contains the bot's behaviour with no Discord types in it.
// Each concern gets its own submodule.

#[path = "config/bot_config.rs"]
pub mod config;

#[path = "status/bot_name.rs"]
pub mod status;

#[path = "presence/presence_service.rs"]
pub mod presence;

#[path = "errors/command_errors.rs"]
pub mod errors;

#[path = "events/bot_events.rs"]
pub mod events;

#[path = "extensions/extension_registry.rs"]
pub mod extensions;

#[path = "lifecycle/shutdown.rs"]
pub mod lifecycle;
