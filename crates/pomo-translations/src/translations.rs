//! In-memory translation catalog

use crate::entry::{lookup_key, TranslationEntry};
use crate::error::{TranslationsError, TranslationsResult};
use crate::headers::{charset_from_content_type, Headers, CONTENT_TYPE, PLURAL_FORMS};
use crate::registry::PluralFormsRegistry;
use indexmap::IndexMap;
use pomo_common::canonical_charset;
use pomo_plural::{PluralForms, PluralFormsHeader};
use std::sync::Arc;
use tracing::{debug, warn};

/// What to do when a catalog declares an unusable `Plural-Forms` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralFormsPolicy {
    /// Log a warning and use this rule instead
    Fallback(PluralFormsHeader),
    /// Reject the header with an error
    Strict,
}

impl Default for PluralFormsPolicy {
    fn default() -> Self {
        Self::Fallback(PluralFormsHeader::default())
    }
}

/// A set of translated messages plus the catalog headers.
///
/// Until a `Plural-Forms` header is set the catalog uses two forms, with
/// form 0 for a count of exactly one.
#[derive(Debug)]
pub struct Translations {
    entries: IndexMap<String, TranslationEntry>,
    headers: Headers,
    nplurals: usize,
    plural_forms: Option<Arc<PluralForms>>,
    registry: Arc<PluralFormsRegistry>,
    policy: PluralFormsPolicy,
}

impl Default for Translations {
    fn default() -> Self {
        Self::new()
    }
}

impl Translations {
    /// Creates an empty catalog with its own registry and the default policy.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(PluralFormsRegistry::new()), PluralFormsPolicy::default())
    }

    /// Creates an empty catalog compiling plural rules through `registry`.
    pub fn with_registry(registry: Arc<PluralFormsRegistry>, policy: PluralFormsPolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            headers: Headers::new(),
            nplurals: 2,
            plural_forms: None,
            registry,
            policy,
        }
    }

    /// Adds an entry, replacing any entry with the same key.
    ///
    /// Returns `false` when the entry has no key (empty msgid).
    pub fn add_entry(&mut self, entry: TranslationEntry) -> bool {
        let Some(key) = entry.key() else {
            return false;
        };
        self.entries.insert(key, entry);
        true
    }

    /// Adds an entry, merging metadata into an existing entry with the same key.
    pub fn add_entry_or_merge(&mut self, entry: TranslationEntry) -> bool {
        let Some(key) = entry.key() else {
            return false;
        };
        match self.entries.get_mut(&key) {
            Some(existing) => existing.merge_with(&entry),
            None => {
                self.entries.insert(key, entry);
            }
        }
        true
    }

    /// Sets one header. `Plural-Forms` is compiled immediately.
    pub fn set_header(&mut self, name: &str, value: &str) -> TranslationsResult<()> {
        if name == PLURAL_FORMS {
            self.apply_plural_forms(value)?;
        }
        self.headers.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Sets every header in declaration order.
    pub fn set_headers(&mut self, headers: &Headers) -> TranslationsResult<()> {
        for (name, value) in headers {
            self.set_header(name, value)?;
        }
        Ok(())
    }

    /// Returns a header value.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// All headers in declaration order
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks up the stored entry matching `entry`'s key.
    pub fn translate_entry(&self, entry: &TranslationEntry) -> Option<&TranslationEntry> {
        self.entries.get(&entry.key()?)
    }

    /// Looks up a message by msgid and context.
    pub fn find(&self, singular: &str, context: Option<&str>) -> Option<&TranslationEntry> {
        if singular.is_empty() {
            return None;
        }
        self.entries.get(&lookup_key(singular, context))
    }

    /// Translates a singular message, returning `singular` when untranslated.
    pub fn translate<'a>(&'a self, singular: &'a str, context: Option<&str>) -> &'a str {
        self.find(singular, context)
            .and_then(|entry| entry.translations.first())
            .map_or(singular, String::as_str)
    }

    /// Returns the plural-form index for `count`.
    pub fn select_plural_form(&self, count: i64) -> TranslationsResult<i64> {
        match &self.plural_forms {
            Some(forms) => forms
                .get(count)
                .map_err(|source| TranslationsError::PluralForms {
                    expression: forms.expression().to_string(),
                    source,
                }),
            None => Ok(i64::from(count != 1)),
        }
    }

    /// Translates a plural message for `count`.
    ///
    /// Falls back to `singular` for a count of one and `plural` otherwise
    /// when the message is untranslated or lacks the selected form.
    pub fn translate_plural<'a>(
        &'a self,
        singular: &'a str,
        plural: &'a str,
        count: i64,
        context: Option<&str>,
    ) -> TranslationsResult<&'a str> {
        let index = self.select_plural_form(count)?;
        let translated = self.find(singular, context).and_then(|entry| {
            let index = usize::try_from(index).ok().filter(|&i| i < self.nplurals)?;
            entry.translations.get(index)
        });

        Ok(match translated {
            Some(translation) => translation.as_str(),
            None if count == 1 => singular,
            None => plural,
        })
    }

    /// Number of plural forms the catalog declares
    pub fn get_plural_forms_count(&self) -> usize {
        self.nplurals
    }

    /// The compiled plural rule, if a `Plural-Forms` header was set
    pub fn plural_forms(&self) -> Option<&Arc<PluralForms>> {
        self.plural_forms.as_ref()
    }

    /// Charset from the `Content-Type` header, canonicalised.
    pub fn charset(&self) -> Option<String> {
        self.get_header(CONTENT_TYPE)
            .and_then(charset_from_content_type)
            .map(canonical_charset)
    }

    /// Copies every entry of `other` into this catalog, replacing duplicates.
    pub fn merge_with(&mut self, other: &Self) {
        for (key, entry) in &other.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    /// Adds entries of `other`, merging metadata into entries already present.
    pub fn merge_originals_with(&mut self, other: &Self) {
        for entry in other.entries.values() {
            self.add_entry_or_merge(entry.clone());
        }
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registry plural rules are compiled through
    pub fn registry(&self) -> &Arc<PluralFormsRegistry> {
        &self.registry
    }

    fn apply_plural_forms(&mut self, value: &str) -> TranslationsResult<()> {
        match self.compile_header(value) {
            Ok((nplurals, forms)) => {
                debug!("Using plural forms '{}' with {} forms", forms, nplurals);
                self.nplurals = nplurals;
                self.plural_forms = Some(forms);
                Ok(())
            }
            Err(err) => match &self.policy {
                PluralFormsPolicy::Strict => Err(err),
                PluralFormsPolicy::Fallback(fallback) => {
                    warn!("{}; falling back to '{}'", err, fallback);
                    let forms = self
                        .registry
                        .get_or_compile(&fallback.expression)
                        .map_err(|source| TranslationsError::PluralForms {
                            expression: fallback.expression.clone(),
                            source,
                        })?;
                    self.nplurals = fallback.nplurals;
                    self.plural_forms = Some(forms);
                    Ok(())
                }
            },
        }
    }

    fn compile_header(&self, value: &str) -> TranslationsResult<(usize, Arc<PluralForms>)> {
        let header = PluralFormsHeader::parse(value)
            .filter(|header| header.nplurals > 0)
            .ok_or_else(|| TranslationsError::InvalidPluralFormsHeader {
                header: value.to_string(),
            })?;

        let forms = self
            .registry
            .get_or_compile(&header.expression)
            .map_err(|source| TranslationsError::PluralForms {
                expression: header.expression.clone(),
                source,
            })?;
        Ok((header.nplurals, forms))
    }
}
