//! # pomo translations
//!
//! Gettext translation catalogs: entries and headers, the `Translations`
//! lookup API with plural selection, PO and MO readers and writers, and an
//! async loader for a languages directory.
//!
//! Plural rules are compiled through a [`PluralFormsRegistry`] owned by the
//! loader, so catalogs that declare the same `Plural-Forms` expression share
//! one compiled rule and its result cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod entry;
pub mod error;
pub mod headers;
pub mod loader;
pub mod mo;
pub mod po;
pub mod registry;
pub mod translations;

pub use entry::{lookup_key, TranslationEntry, CONTEXT_SEPARATOR};
pub use error::{TranslationsError, TranslationsResult};
pub use headers::{parse_header_block, Headers, CONTENT_TYPE, PLURAL_FORMS};
pub use loader::{CatalogFormat, TranslationLoader};
pub use registry::PluralFormsRegistry;
pub use translations::{PluralFormsPolicy, Translations};
