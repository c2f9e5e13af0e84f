//! Validation message catalog.
//!
//! The catalog is installed once at startup (from config) and read-only after
//! that. Lookups before installation use the built-in English text.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::MessagesConfig;

static CATALOG: OnceLock<MessageCatalog> = OnceLock::new();

/// Stable key for each validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    NoCode,
    NoName,
    NoPassword,
    CodeExists,
}

impl MessageKey {
    pub const ALL: [MessageKey; 4] = [Self::NoCode, Self::NoName, Self::NoPassword, Self::CodeExists];

    /// Built-in text for this key.
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::NoCode => "missing code",
            Self::NoName => "missing name",
            Self::NoPassword => "missing password",
            Self::CodeExists => "code already exists",
        }
    }
}

/// Resolved text for every message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    no_code: String,
    no_name: String,
    no_password: String,
    code_exists: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            no_code: MessageKey::NoCode.default_text().to_string(),
            no_name: MessageKey::NoName.default_text().to_string(),
            no_password: MessageKey::NoPassword.default_text().to_string(),
            code_exists: MessageKey::CodeExists.default_text().to_string(),
        }
    }
}

impl MessageCatalog {
    /// Build a catalog from config overrides, keeping defaults for blanks.
    pub fn from_config(config: &MessagesConfig) -> Self {
        fn pick(value: &Option<String>, key: MessageKey) -> String {
            match value.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => key.default_text().to_string(),
            }
        }

        Self {
            no_code: pick(&config.no_code, MessageKey::NoCode),
            no_name: pick(&config.no_name, MessageKey::NoName),
            no_password: pick(&config.no_password, MessageKey::NoPassword),
            code_exists: pick(&config.code_exists, MessageKey::CodeExists),
        }
    }

    /// Text for a key.
    pub fn get(&self, key: MessageKey) -> &str {
        match key {
            MessageKey::NoCode => &self.no_code,
            MessageKey::NoName => &self.no_name,
            MessageKey::NoPassword => &self.no_password,
            MessageKey::CodeExists => &self.code_exists,
        }
    }
}

/// Install the process-wide catalog.
///
/// Returns `false` if a catalog was already installed or read.
pub fn install(catalog: MessageCatalog) -> bool {
    CATALOG.set(catalog).is_ok()
}

/// The process-wide catalog.
pub fn catalog() -> &'static MessageCatalog {
    CATALOG.get_or_init(MessageCatalog::default)
}

/// Resolve a key through the process-wide catalog.
pub fn resolve(key: MessageKey) -> &'static str {
    catalog().get(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_texts_are_distinct() {
        let catalog = MessageCatalog::default();
        for (i, a) in MessageKey::ALL.iter().enumerate() {
            for b in &MessageKey::ALL[i + 1..] {
                assert_ne!(catalog.get(*a), catalog.get(*b));
            }
        }
    }

    #[test]
    fn test_from_config_overrides() {
        let config = MessagesConfig {
            no_code: Some("Employee code is required".to_string()),
            no_name: Some("   ".to_string()),
            no_password: None,
            code_exists: None,
        };

        let catalog = MessageCatalog::from_config(&config);
        assert_eq!(catalog.get(MessageKey::NoCode), "Employee code is required");
        assert_eq!(catalog.get(MessageKey::NoName), "missing name");
        assert_eq!(catalog.get(MessageKey::NoPassword), "missing password");
        assert_eq!(catalog.get(MessageKey::CodeExists), "code already exists");
    }

    #[test]
    fn test_key_serde_names() {
        let json = serde_json::to_string(&MessageKey::CodeExists).unwrap();
        assert_eq!(json, "\"code_exists\"");
    }
}
