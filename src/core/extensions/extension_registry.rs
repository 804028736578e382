// Extensions are groups of commands compiled into the binary.
//
// Each one implements `Extension` and is listed in a static table in the
// Discord layer. Loading walks that table in order: a failing extension is
// logged and skipped, and the bot starts with whatever loaded.

use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("command `{0}` is already registered by another extension")]
    DuplicateCommand(String),
    #[error("extension registers no commands")]
    NoCommands,
}

/// Anything with a command name. Used to catch two extensions claiming the
/// same command.
pub trait NamedCommand {
    fn command_name(&self) -> &str;
}

pub trait Extension<C>: Send + Sync {
    fn name(&self) -> &'static str;
    fn commands(&self) -> Vec<C>;
}

pub struct LoadReport<C> {
    pub commands: Vec<C>,
    pub loaded: Vec<&'static str>,
    pub failed: Vec<(&'static str, ExtensionError)>,
}

pub fn load_extensions<C: NamedCommand>(extensions: &[Box<dyn Extension<C>>]) -> LoadReport<C> {
    let mut report = LoadReport {
        commands: Vec::new(),
        loaded: Vec::new(),
        failed: Vec::new(),
    };
    let mut seen: HashSet<String> = HashSet::new();

    for extension in extensions {
        let name = extension.name();
        match load_one(extension.as_ref(), &seen) {
            Ok(commands) => {
                seen.extend(commands.iter().map(|c| c.command_name().to_string()));
                report.commands.extend(commands);
                report.loaded.push(name);
                tracing::info!(extension = name, "✅ {} loaded successfully", name);
            }
            Err(e) => {
                tracing::error!(extension = name, "❌ Failed to load {}: {}", name, e);
                report.failed.push((name, e));
            }
        }
    }

    report
}

fn load_one<C: NamedCommand>(
    extension: &dyn Extension<C>,
    seen: &HashSet<String>,
) -> Result<Vec<C>, ExtensionError> {
    let commands = extension.commands();
    if commands.is_empty() {
        return Err(ExtensionError::NoCommands);
    }

    let mut local = HashSet::new();
    for command in &commands {
        let command_name = command.command_name();
        if seen.contains(command_name) || !local.insert(command_name) {
            return Err(ExtensionError::DuplicateCommand(command_name.to_string()));
        }
    }

    Ok(commands)
}
