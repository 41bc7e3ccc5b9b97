//! Application-wide error types using thiserror.

use pomo_common::PomoError;
use pomo_plural::PluralFormsError;
use pomo_translations::TranslationsError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] PomoError),

    /// Plural expression failed to compile or evaluate.
    #[error("Plural expression error: {0}")]
    Plural(#[from] PluralFormsError),

    /// Catalog could not be loaded or queried.
    #[error("Catalog error: {0}")]
    Translations(#[from] TranslationsError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;
