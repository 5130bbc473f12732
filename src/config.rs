//! Translator configuration
//!
//! Loaded from YAML (the same way protocol manifests are), optionally
//! overridden from the environment:
//!
//! ```yaml
//! mode: strict
//! call_id_prefix: call_
//! call_ids: uuid
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::ErrorContext;
use crate::{Error, Result};

pub use crate::codec::ParseMode;

/// Environment variable overriding [`TranslatorConfig::mode`].
pub const ENV_PARSE_MODE: &str = "AI_FNCALL_PARSE_MODE";
/// Environment variable overriding [`TranslatorConfig::call_id_prefix`].
pub const ENV_CALL_ID_PREFIX: &str = "AI_FNCALL_CALL_ID_PREFIX";

/// How ids are minted for calls parsed out of assistant text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallIdStyle {
    /// `<prefix>01`, `<prefix>02`, ... numbered per conversion.
    #[default]
    Sequential,
    /// `<prefix>` followed by a random v4 uuid.
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub mode: ParseMode,
    pub call_id_prefix: String,
    pub call_ids: CallIdStyle,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Permissive,
            call_id_prefix: "toolu_".to_string(),
            call_ids: CallIdStyle::Sequential,
        }
    }
}

impl TranslatorConfig {
    pub fn strict() -> Self {
        Self::default().with_mode(ParseMode::Strict)
    }

    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_call_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.call_id_prefix = prefix.into();
        self
    }

    pub fn with_call_id_style(mut self, style: CallIdStyle) -> Self {
        self.call_ids = style;
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Apply [`ENV_PARSE_MODE`] and [`ENV_CALL_ID_PREFIX`] when set.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(mode) = lookup(ENV_PARSE_MODE) {
            self.mode = mode.parse().map_err(|e: Error| match e {
                Error::Configuration { message, context } => Error::Configuration {
                    message,
                    context: context.with_field_path(ENV_PARSE_MODE),
                },
                other => other,
            })?;
        }
        if let Some(prefix) = lookup(ENV_CALL_ID_PREFIX) {
            self.call_id_prefix = prefix;
        }
        Ok(self)
    }
}

impl FromStr for ParseMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ParseMode::Strict),
            "permissive" | "" => Ok(ParseMode::Permissive),
            other => Err(Error::configuration_with_context(
                format!("unknown parse mode '{}'", other),
                ErrorContext::new()
                    .with_details("expected 'strict' or 'permissive'")
                    .with_source("config_loader"),
            )),
        }
    }
}
