// The bot's display name, shared between the gateway side (which learns it on
// ready) and the health-check server (which reports it on every ping).

use std::sync::{Arc, RwLock};

/// Reported until the gateway hands us a real account.
pub const PLACEHOLDER_NAME: &str = "None";

/// Cloneable handle to a single synchronized name value.
///
/// Starts as [`PLACEHOLDER_NAME`] and only ever moves to a real name. Blank
/// names are ignored so the value can never fall back to "nothing".
#[derive(Debug, Clone)]
pub struct BotName {
    inner: Arc<RwLock<String>>,
}

impl BotName {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PLACEHOLDER_NAME.to_string())),
        }
    }

    pub fn get(&self) -> String {
        // A writer can't panic mid-assignment, so a poisoned value is still whole.
        match self.inner.read() {
            Ok(name) => name.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, name: impl Into<String>) {
        let name = name.into();
        if name.trim().is_empty() {
            return;
        }

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = name;
    }

    pub fn is_placeholder(&self) -> bool {
        self.get() == PLACEHOLDER_NAME
    }
}

impl Default for BotName {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_as_placeholder() {
        let name = BotName::new();
        assert_eq!(name.get(), "None");
        assert!(name.is_placeholder());
    }

    #[test]
    fn test_set_is_visible_through_clones() {
        let name = BotName::new();
        let reader = name.clone();

        name.set("Seemu#4821");

        assert_eq!(reader.get(), "Seemu#4821");
        assert!(!reader.is_placeholder());
    }

    #[test]
    fn test_blank_name_never_reverts_to_placeholder() {
        let name = BotName::new();
        name.set("Seemu#4821");
        name.set("");
        name.set("   ");

        assert_eq!(name.get(), "Seemu#4821");
    }

    #[test]
    fn test_readable_from_another_thread() {
        let name = BotName::new();
        name.set("Seemu");

        let reader = name.clone();
        let seen = std::thread::spawn(move || reader.get()).join().unwrap();
        assert_eq!(seen, "Seemu");
    }
}
