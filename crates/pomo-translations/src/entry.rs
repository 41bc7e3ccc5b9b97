//! A single catalog message

use serde::{Deserialize, Serialize};

/// Separator between a message context and its msgid in catalog keys
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// One translatable message with its translations and PO metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Disambiguating `msgctxt`
    pub context: Option<String>,
    /// The `msgid`
    pub singular: String,
    /// The `msgid_plural`, present only for plural messages
    pub plural: Option<String>,
    /// `msgstr` or `msgstr[i]` values, indexed by plural form
    pub translations: Vec<String>,
    /// `# ` comments written by translators
    pub translator_comments: String,
    /// `#.` comments extracted from source code
    pub extracted_comments: String,
    /// `#:` source references
    pub references: Vec<String>,
    /// `#,` flags such as `fuzzy` or `php-format`
    pub flags: Vec<String>,
}

impl TranslationEntry {
    /// Creates an entry for a singular message.
    pub fn new(singular: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            ..Self::default()
        }
    }

    /// Creates an entry for a singular/plural message pair.
    pub fn new_plural(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: Some(plural.into()),
            ..Self::default()
        }
    }

    /// Sets the message context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the translations.
    #[must_use]
    pub fn with_translations<I, S>(mut self, translations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.translations = translations.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the entry has a `msgid_plural`
    pub fn is_plural(&self) -> bool {
        self.plural.is_some()
    }

    /// The lookup key: `context \u{4} singular`, or just `singular`.
    ///
    /// Entries with an empty singular have no key and cannot be stored.
    pub fn key(&self) -> Option<String> {
        if self.singular.is_empty() {
            return None;
        }
        Some(lookup_key(&self.singular, self.context.as_deref()))
    }

    /// Folds another entry for the same message into this one.
    ///
    /// Flags and references are unioned keeping first-seen order. Extracted
    /// comments are appended unless already present.
    pub fn merge_with(&mut self, other: &Self) {
        union_into(&mut self.flags, &other.flags);
        union_into(&mut self.references, &other.references);

        if !other.extracted_comments.is_empty()
            && !self.extracted_comments.contains(other.extracted_comments.as_str())
        {
            if !self.extracted_comments.is_empty() {
                self.extracted_comments.push('\n');
            }
            self.extracted_comments.push_str(&other.extracted_comments);
        }
    }
}

/// Builds the catalog key for a msgid and optional context.
pub fn lookup_key(singular: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!("{context}{CONTEXT_SEPARATOR}{singular}"),
        None => singular.to_string(),
    }
}

fn union_into(target: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_with_and_without_context() {
        let plain = TranslationEntry::new("Posts");
        assert_eq!(plain.key().as_deref(), Some("Posts"));

        let with_context = TranslationEntry::new("Posts").with_context("post type general name");
        assert_eq!(
            with_context.key().as_deref(),
            Some("post type general name\u{4}Posts")
        );
    }

    #[test]
    fn test_empty_singular_has_no_key() {
        assert_eq!(TranslationEntry::new("").key(), None);
        assert_eq!(TranslationEntry::new("").with_context("ctx").key(), None);
    }

    #[test]
    fn test_is_plural() {
        assert!(!TranslationEntry::new("file").is_plural());
        assert!(TranslationEntry::new_plural("file", "files").is_plural());
    }

    #[test]
    fn test_merge_with() {
        let mut entry = TranslationEntry {
            flags: vec!["php-format".to_string()],
            references: vec!["wp-admin/edit.php:10".to_string()],
            extracted_comments: "translators: post count".to_string(),
            ..TranslationEntry::new("%s post")
        };
        let other = TranslationEntry {
            flags: vec!["php-format".to_string(), "fuzzy".to_string()],
            references: vec!["wp-admin/edit.php:42".to_string()],
            extracted_comments: "shown in the list table".to_string(),
            ..TranslationEntry::new("%s post")
        };

        entry.merge_with(&other);
        assert_eq!(entry.flags, vec!["php-format", "fuzzy"]);
        assert_eq!(
            entry.references,
            vec!["wp-admin/edit.php:10", "wp-admin/edit.php:42"]
        );
        assert_eq!(
            entry.extracted_comments,
            "translators: post count\nshown in the list table"
        );

        entry.merge_with(&other);
        assert_eq!(entry.flags.len(), 2);
        assert_eq!(entry.references.len(), 2);
        assert_eq!(
            entry.extracted_comments,
            "translators: post count\nshown in the list table"
        );
    }
}
