//! Default values for every configuration section.

use crate::schema::{Config, LoggingConfig, TranslationsConfig};
use pomo_common::{Locale, TextDomain};
use std::path::PathBuf;

/// Directory catalogs are read from when nothing else is configured.
pub const DEFAULT_LANGUAGES_DIR: &str = "languages";

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Plural-Forms header applied to catalogs without a usable one.
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=n != 1;";

/// Logging filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

impl Default for Config {
    fn default() -> Self {
        Self {
            translations: TranslationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            languages_dir: PathBuf::from(DEFAULT_LANGUAGES_DIR),
            text_domain: TextDomain::default(),
            default_locale: Locale::new(DEFAULT_LOCALE),
            fallback_plural_forms: DEFAULT_PLURAL_FORMS.to_string(),
            strict_plural_forms: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.translations.default_locale.as_str(), "en_US");
        assert_eq!(config.translations.text_domain.as_str(), "default");
        assert!(!config.translations.strict_plural_forms);
    }
}
