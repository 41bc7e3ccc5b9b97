//! The `Plural-Forms` catalog header

use std::fmt;

/// Parsed `nplurals=N; plural=EXPR;` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralFormsHeader {
    /// Number of plural forms the locale declares
    pub nplurals: usize,
    /// The expression after `plural=`, trimmed and without trailing `;`
    pub expression: String,
}

impl PluralFormsHeader {
    /// Parses a header value.
    ///
    /// Returns `None` when the value does not have the
    /// `nplurals=<digits>; plural=<expression>` shape. The expression itself
    /// is not compiled here.
    pub fn parse(header: &str) -> Option<Self> {
        let rest = header
            .trim_start()
            .strip_prefix("nplurals")?
            .trim_start()
            .strip_prefix('=')?
            .trim_start();

        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let nplurals = rest[..digits].parse().ok()?;

        let expression = rest[digits..]
            .trim_start()
            .strip_prefix(';')?
            .trim_start()
            .strip_prefix("plural")?
            .trim_start()
            .strip_prefix('=')?
            .trim()
            .trim_end_matches(';')
            .trim_end();

        if expression.is_empty() {
            return None;
        }

        Some(Self {
            nplurals,
            expression: expression.to_string(),
        })
    }
}

impl Default for PluralFormsHeader {
    /// The Germanic two-form rule used when a catalog declares nothing usable.
    fn default() -> Self {
        Self {
            nplurals: 2,
            expression: "n != 1".to_string(),
        }
    }
}

impl fmt::Display for PluralFormsHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nplurals={}; plural={};", self.nplurals, self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_header() {
        let header = PluralFormsHeader::parse("nplurals=2; plural=n != 1;").unwrap();
        assert_eq!(header.nplurals, 2);
        assert_eq!(header.expression, "n != 1");
    }

    #[test]
    fn test_parse_spacing_variants() {
        let header = PluralFormsHeader::parse("  nplurals = 3 ;plural=(n==1 ? 0 : 2) ;; ").unwrap();
        assert_eq!(header.nplurals, 3);
        assert_eq!(header.expression, "(n==1 ? 0 : 2)");
    }

    #[test]
    fn test_parse_without_trailing_semicolon() {
        let header = PluralFormsHeader::parse("nplurals=1; plural=0").unwrap();
        assert_eq!(header.nplurals, 1);
        assert_eq!(header.expression, "0");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(PluralFormsHeader::parse("plural=n != 1;"), None);
        assert_eq!(PluralFormsHeader::parse("nplurals=two; plural=n != 1;"), None);
        assert_eq!(PluralFormsHeader::parse("nplurals=2; plural=;"), None);
        assert_eq!(PluralFormsHeader::parse("nplurals=2 plural=n != 1"), None);
    }

    #[test]
    fn test_default_and_display() {
        let header = PluralFormsHeader::default();
        assert_eq!(header.to_string(), "nplurals=2; plural=n != 1;");
        assert_eq!(PluralFormsHeader::parse(&header.to_string()), Some(header));
    }
}
