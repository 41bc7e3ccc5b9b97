//! Configuration schema definitions using serde.

use pomo_common::{Locale, PomoError, TextDomain};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for pomo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation catalog configuration.
    pub translations: TranslationsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Translation catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Directory holding `.mo` / `.po` catalogs.
    pub languages_dir: PathBuf,
    /// Text domain catalogs are looked up for.
    pub text_domain: TextDomain,
    /// Locale loaded when none is requested.
    pub default_locale: Locale,
    /// Plural-Forms header used when a catalog's own header is unusable.
    pub fallback_plural_forms: String,
    /// Fail catalog loading on a malformed Plural-Forms header instead of
    /// falling back.
    pub strict_plural_forms: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `pomo_translations=debug`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PomoError> {
        if self.translations.default_locale.as_str().trim().is_empty() {
            return Err(PomoError::Config(
                "Default locale cannot be empty".to_string(),
            ));
        }

        if self.translations.text_domain.as_str().trim().is_empty() {
            return Err(PomoError::Config(
                "Text domain cannot be empty".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(PomoError::Config(
                "Logging filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
