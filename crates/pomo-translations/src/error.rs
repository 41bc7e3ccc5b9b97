//! Error types for catalog operations

use pomo_common::PomoError;
use pomo_plural::PluralFormsError;
use thiserror::Error;

/// Errors that can occur while reading, writing or querying catalogs
#[derive(Error, Debug)]
pub enum TranslationsError {
    /// A PO file is syntactically invalid
    #[error("PO parse error on line {line}: {message}")]
    PoParse { line: usize, message: String },

    /// An MO file does not start with the gettext magic number
    #[error("Invalid MO magic number: {magic:#010x}")]
    BadMagic { magic: u32 },

    /// An MO file uses a format revision this reader does not know
    #[error("Unsupported MO revision: {revision}")]
    UnsupportedRevision { revision: u32 },

    /// An MO file ends before a table or string it points to
    #[error("MO file truncated: {what} at offset {offset}")]
    Truncated { what: &'static str, offset: usize },

    /// Catalog text is not valid UTF-8
    #[error("Invalid UTF-8 in {what}")]
    InvalidUtf8 { what: &'static str },

    /// The Plural-Forms header does not have the `nplurals=N; plural=EXPR` shape
    #[error("Malformed Plural-Forms header: '{header}'")]
    InvalidPluralFormsHeader { header: String },

    /// The plural expression failed to compile
    #[error("Invalid plural expression '{expression}': {source}")]
    PluralForms {
        expression: String,
        #[source]
        source: PluralFormsError,
    },

    /// The file extension is neither `.po` nor `.mo`
    #[error("Unsupported catalog format: {path}")]
    UnsupportedFormat { path: String },

    /// No catalog file exists for the request
    #[error("Catalog not found: {path}")]
    NotFound { path: String },

    /// Configuration could not be turned into loader settings
    #[error(transparent)]
    Config(#[from] PomoError),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for catalog operations
pub type TranslationsResult<T> = Result<T, TranslationsError>;
