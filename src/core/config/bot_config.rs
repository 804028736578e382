// Process configuration.
//
// Everything the bot needs from the environment is read here once at startup.
// The lookup goes through a closure so tests can feed variables in without
// mutating the real process environment.

use thiserror::Error;

/// Prefix for text commands (`!status`, `!sync`, ...).
pub const COMMAND_PREFIX: &str = "!";

/// Port the health-check server binds when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TOKEN not found in environment variables")]
    MissingToken,
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { token, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = BotConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let err = BotConfig::from_lookup(lookup_from(&[("TOKEN", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn test_port_defaults_when_unset() {
        let config = BotConfig::from_lookup(lookup_from(&[("TOKEN", "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_is_parsed() {
        let config =
            BotConfig::from_lookup(lookup_from(&[("TOKEN", "abc"), ("PORT", " 8080 ")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let err = BotConfig::from_lookup(lookup_from(&[("TOKEN", "abc"), ("PORT", "http")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }
}
