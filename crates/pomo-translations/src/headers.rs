//! Catalog header block (the msgstr of the empty msgid)

use indexmap::IndexMap;

/// Header name holding the plural rule
pub const PLURAL_FORMS: &str = "Plural-Forms";

/// Header name holding the MIME type and charset
pub const CONTENT_TYPE: &str = "Content-Type";

/// Headers in the order they were declared
pub type Headers = IndexMap<String, String>;

/// Parses `Key: value` lines. Lines without a colon are ignored.
pub fn parse_header_block(block: &str) -> Headers {
    block
        .lines()
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Renders headers back into a block with one `Key: value\n` line each.
pub fn render_header_block(headers: &Headers) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}\n"))
        .collect()
}

/// Extracts the `charset=` parameter of a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let headers = parse_header_block(
            "Project-Id-Version: ClassicPress\nContent-Type: text/plain; charset=UTF-8\nPlural-Forms: nplurals=2; plural=n != 1;\n",
        );
        let names: Vec<&str> = headers.keys().map(String::as_str).collect();
        assert_eq!(names, ["Project-Id-Version", "Content-Type", "Plural-Forms"]);
        assert_eq!(headers[PLURAL_FORMS], "nplurals=2; plural=n != 1;");
    }

    #[test]
    fn test_parse_skips_garbage() {
        let headers = parse_header_block("no colon here\n: empty name\nLanguage: de\n");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Language"], "de");
    }

    #[test]
    fn test_render_round_trip() {
        let block = "Language: pl\nPlural-Forms: nplurals=3; plural=(n==1 ? 0 : 2);\n";
        assert_eq!(render_header_block(&parse_header_block(block)), block);
    }

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/plain; charset=utf-8"),
            Some("utf-8")
        );
        assert_eq!(
            charset_from_content_type("text/plain;CHARSET = ISO-8859-1 "),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_from_content_type("text/plain"), None);
        assert_eq!(charset_from_content_type("text/plain; charset="), None);
    }
}
