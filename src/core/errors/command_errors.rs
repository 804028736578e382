// Command-dispatch failures, reduced to the handful of kinds users ever see.
//
// The Discord layer translates framework errors into `CommandFailure`; this
// module decides what (if anything) gets said back in chat.

pub const MISSING_PERMISSIONS_REPLY: &str =
    "❌ You need to be an administrator to use this command.";
pub const MISSING_ARGUMENT_REPLY: &str = "⚠️ Missing required argument.";
pub const GENERIC_FAILURE_REPLY: &str = "⚠️ An unexpected error occurred. [1214]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    MissingPermissions,
    MissingArgument,
    /// A prefixed message that doesn't name a registered command.
    /// Deliberately answered with silence: `!` is common in normal chat.
    UnknownCommand,
    /// Anything else. Carries the full error text for the log.
    Other(String),
}

impl CommandFailure {
    /// The fixed chat reply for this failure, `None` when we stay silent.
    pub fn reply(&self) -> Option<&'static str> {
        match self {
            CommandFailure::MissingPermissions => Some(MISSING_PERMISSIONS_REPLY),
            CommandFailure::MissingArgument => Some(MISSING_ARGUMENT_REPLY),
            CommandFailure::UnknownCommand => None,
            CommandFailure::Other(_) => Some(GENERIC_FAILURE_REPLY),
        }
    }

    /// Only unclassified failures are worth a log entry with full detail.
    pub fn should_log(&self) -> bool {
        matches!(self, CommandFailure::Other(_))
    }

    /// Text for the log line.
    pub fn detail(&self) -> String {
        match self {
            CommandFailure::Other(detail) => detail.clone(),
            other => format!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_permissions_reply() {
        assert_eq!(
            CommandFailure::MissingPermissions.reply(),
            Some("❌ You need to be an administrator to use this command.")
        );
    }

    #[test]
    fn test_missing_argument_reply() {
        assert_eq!(
            CommandFailure::MissingArgument.reply(),
            Some("⚠️ Missing required argument.")
        );
    }

    #[test]
    fn test_unknown_command_is_silent() {
        assert_eq!(CommandFailure::UnknownCommand.reply(), None);
        assert!(!CommandFailure::UnknownCommand.should_log());
    }

    #[test]
    fn test_other_failures_are_logged_and_answered_generically() {
        let failure = CommandFailure::Other("http 500".to_string());
        assert_eq!(
            failure.reply(),
            Some("⚠️ An unexpected error occurred. [1214]")
        );
        assert!(failure.should_log());
        assert_eq!(failure.detail(), "http 500");
    }
}
