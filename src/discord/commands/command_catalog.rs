// Discord commands module.
// Commands are grouped into extensions; `extensions()` is the table the bot
// loads at startup.

use crate::core::extensions::{Extension, NamedCommand};
use crate::discord::{Command, Data, Error};

pub mod like_commands;

pub mod presence;

pub fn extensions() -> Vec<Box<dyn Extension<Command>>> {
    vec![Box::new(like_commands::LikeCommands)]
}

impl NamedCommand for poise::Command<Data, Error> {
    fn command_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extensions::load_extensions;

    #[test]
    fn test_bundled_extensions_load_cleanly() {
        let report = load_extensions(&extensions());

        assert_eq!(report.loaded, vec!["like_commands"]);
        assert!(report.failed.is_empty());

        let names: Vec<&str> = report.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["like", "status", "ping", "sync"]);
    }
}
