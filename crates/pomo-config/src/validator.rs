//! Runtime validation beyond the structural checks of the schema.

use crate::schema::Config;
use pomo_common::{PomoError, Result};
use pomo_plural::{PluralForms, PluralFormsHeader};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, including compiling the fallback
    /// Plural-Forms expression.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate()?;
        Self::fallback_plural_forms(config).map(|_| ())
    }

    /// Parses and compiles the configured fallback Plural-Forms header.
    pub fn fallback_plural_forms(config: &Config) -> Result<PluralFormsHeader> {
        let raw = &config.translations.fallback_plural_forms;
        let header = PluralFormsHeader::parse(raw).ok_or_else(|| {
            PomoError::Config(format!("Fallback Plural-Forms header is malformed: '{raw}'"))
        })?;

        PluralForms::new(&header.expression).map_err(|e| {
            PomoError::Config(format!(
                "Fallback plural expression '{}' does not compile: {e}",
                header.expression
            ))
        })?;

        if header.nplurals == 0 {
            return Err(PomoError::Config(
                "Fallback Plural-Forms header declares zero plural forms".to_string(),
            ));
        }

        Ok(header)
    }
}
