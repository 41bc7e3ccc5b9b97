//! Test utilities and shared test helpers for pomo.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Plural-Forms expressions shipped by real locales.
pub mod plural_fixtures {
    /// `(locale, nplurals, expression)` triples taken from published catalogs.
    pub const REAL_WORLD_PLURAL_FORMS: &[(&str, usize, &str)] = &[
        ("ja", 1, "0"),
        ("en_US", 2, "n != 1"),
        ("de_DE", 2, "(n != 1)"),
        ("fr_FR", 2, "n > 1"),
        ("pt_BR", 2, "(n > 1)"),
        ("is_IS", 2, "(n%10!=1 || n%100==11)"),
        ("mk_MK", 2, "n==1 || n%10==1 ? 0 : 1"),
        (
            "ru_RU",
            3,
            "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)",
        ),
        (
            "pl_PL",
            3,
            "(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2)",
        ),
        ("cs_CZ", 3, "(n==1) ? 0 : (n>=2 && n<=4) ? 1 : 2"),
        (
            "lt_LT",
            3,
            "(n%10==1 && n%100!=11 ? 0 : n%10>=2 && (n%100<10 || n%100>=20) ? 1 : 2)",
        ),
        ("lv", 3, "(n%10==1 && n%100!=11 ? 0 : n != 0 ? 1 : 2)"),
        (
            "ro_RO",
            3,
            "(n==1 ? 0 : (n==0 || (n%100 > 0 && n%100 < 20)) ? 1 : 2)",
        ),
        (
            "sl_SI",
            4,
            "(n%100==1 ? 0 : n%100==2 ? 1 : n%100==3 || n%100==4 ? 2 : 3)",
        ),
        ("cy", 4, "(n==1) ? 0 : (n==2) ? 1 : (n != 8 && n != 11) ? 2 : 3"),
        ("kw", 4, "(n==1) ? 0 : (n==2) ? 1 : (n == 3) ? 2 : 3"),
        (
            "gd",
            4,
            "(n==1 || n==11) ? 0 : (n==2 || n==12) ? 1 : (n > 2 && n < 20) ? 2 : 3",
        ),
        (
            "mt",
            4,
            "(n==1 ? 0 : n==0 || ( n%100>1 && n%100<11) ? 1 : (n%100>10 && n%100<20 ) ? 2 : 3)",
        ),
        (
            "he_IL",
            4,
            "(n == 1) ? 0 : ((n == 2) ? 1 : ((n > 10 && n % 10 == 0) ? 2 : 3))",
        ),
        (
            "ga",
            5,
            "n==1 ? 0 : n==2 ? 1 : (n>2 && n<7) ? 2 :(n>6 && n<11) ? 3 : 4",
        ),
        (
            "ar",
            6,
            "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5",
        ),
    ];

    /// Formats a fixture as a complete `Plural-Forms` header value.
    pub fn header_for(nplurals: usize, expression: &str) -> String {
        format!("nplurals={nplurals}; plural={expression};")
    }
}

/// Catalog-related test utilities.
pub mod catalog_fixtures {
    /// A small German PO catalog with a context entry and a plural entry.
    pub fn german_po() -> &'static str {
        concat!(
            "# German translation.\n",
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Project-Id-Version: pomo\\n\"\n",
            "\"Content-Type: text/plain; charset=utf-8\\n\"\n",
            "\"Plural-Forms: nplurals=2; plural=n != 1;\\n\"\n",
            "\n",
            "#. Shown on the dashboard\n",
            "#: wp-admin/index.php:12\n",
            "msgid \"Dashboard\"\n",
            "msgstr \"Übersicht\"\n",
            "\n",
            "msgctxt \"post type general name\"\n",
            "msgid \"Posts\"\n",
            "msgstr \"Beiträge\"\n",
            "\n",
            "#, php-format\n",
            "msgid \"%s comment\"\n",
            "msgid_plural \"%s comments\"\n",
            "msgstr[0] \"%s Kommentar\"\n",
            "msgstr[1] \"%s Kommentare\"\n",
        )
    }

    /// A Polish PO catalog exercising a three-form plural rule.
    pub fn polish_po() -> &'static str {
        concat!(
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
            "\"Plural-Forms: nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\\n\"\n",
            "\n",
            "msgid \"%d file\"\n",
            "msgid_plural \"%d files\"\n",
            "msgstr[0] \"%d plik\"\n",
            "msgstr[1] \"%d pliki\"\n",
            "msgstr[2] \"%d plików\"\n",
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use super::plural_fixtures::REAL_WORLD_PLURAL_FORMS;
    use proptest::prelude::*;

    /// Strategy for counts in the range translations are usually rendered for.
    pub fn count_strategy() -> impl Strategy<Value = i64> {
        0i64..=200
    }

    /// Strategy picking one of the real-world plural expressions.
    pub fn plural_expression_strategy() -> impl Strategy<Value = &'static str> {
        proptest::sample::select(REAL_WORLD_PLURAL_FORMS.to_vec()).prop_map(|(_, _, expr)| expr)
    }

    /// Strategy for valid locale identifiers such as `de_DE`.
    pub fn locale_strategy() -> impl Strategy<Value = String> {
        r"[a-z]{2}_[A-Z]{2}".prop_map(|s| s.to_string())
    }
}
