//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locale identifier as used in catalog file names, e.g. `de_DE` or `pt_BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(pub String);

impl Locale {
    /// Creates a locale from anything string-like.
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }

    /// Returns the locale as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the language part, e.g. `pt` for `pt_BR`.
    pub fn language(&self) -> &str {
        self.0
            .split(['_', '-'])
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A gettext text domain, the namespace a catalog belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextDomain(pub String);

impl TextDomain {
    /// Returns the text domain as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TextDomain {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for TextDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TextDomain {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, PomoError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum PomoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A catalog or expression could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested catalog or message does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
