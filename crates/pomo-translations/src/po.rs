//! Reading and writing PO (portable object) catalogs

use crate::entry::TranslationEntry;
use crate::error::{TranslationsError, TranslationsResult};
use crate::headers::{parse_header_block, render_header_block};
use crate::translations::Translations;
use std::fmt::Write as _;
use tracing::debug;

/// The string directive a continuation line appends to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str(usize),
}

#[derive(Debug, Default)]
struct EntryBuilder {
    entry: TranslationEntry,
    last: Option<Field>,
    has_id: bool,
    has_str: bool,
    start_line: usize,
}

impl EntryBuilder {
    fn is_blank(&self) -> bool {
        self.last.is_none()
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Context => self.entry.context.get_or_insert_with(String::new),
            Field::Id => &mut self.entry.singular,
            Field::IdPlural => self.entry.plural.get_or_insert_with(String::new),
            Field::Str(index) => {
                let translations = &mut self.entry.translations;
                if translations.len() == index {
                    translations.push(String::new());
                }
                &mut translations[index]
            }
        }
    }

    fn set(&mut self, field: Field, value: String) {
        *self.field_mut(field) = value;
        self.last = Some(field);
    }

    fn add_comment(&mut self, line: &str) {
        let entry = &mut self.entry;
        match line.as_bytes().get(1) {
            Some(b'.') => append_line(&mut entry.extracted_comments, line[2..].trim()),
            Some(b':') => entry
                .references
                .extend(line[2..].split_whitespace().map(str::to_string)),
            Some(b',') => entry.flags.extend(
                line[2..]
                    .split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(str::to_string),
            ),
            _ => {
                let text = line[1..].strip_prefix(' ').unwrap_or(&line[1..]);
                append_line(&mut entry.translator_comments, text.trim_end());
            }
        }
    }
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(line);
}

struct PoReader<'t> {
    translations: &'t mut Translations,
    current: EntryBuilder,
    line: usize,
}

impl PoReader<'_> {
    fn error(&self, message: impl Into<String>) -> TranslationsError {
        TranslationsError::PoParse {
            line: self.line,
            message: message.into(),
        }
    }

    /// Starts a new entry if the current one already has its msgstr.
    fn begin_directive(&mut self) -> TranslationsResult<()> {
        if self.current.has_str {
            self.finish_entry()?;
        }
        if self.current.is_blank() && self.current.start_line == 0 {
            self.current.start_line = self.line;
        }
        Ok(())
    }

    fn finish_entry(&mut self) -> TranslationsResult<()> {
        let builder = std::mem::take(&mut self.current);
        if !builder.has_id {
            if builder.last.is_some() {
                return Err(TranslationsError::PoParse {
                    line: builder.start_line,
                    message: "entry without msgid".to_string(),
                });
            }
            return Ok(());
        }
        if !builder.has_str {
            return Err(TranslationsError::PoParse {
                line: builder.start_line,
                message: format!("msgid \"{}\" has no msgstr", builder.entry.singular),
            });
        }

        let mut entry = builder.entry;
        if entry.translations.iter().all(String::is_empty) {
            entry.translations.clear();
        }

        if entry.singular.is_empty() && entry.context.is_none() {
            let block = entry.translations.first().map_or("", String::as_str);
            self.translations.set_headers(&parse_header_block(block))?;
        } else {
            self.translations.add_entry(entry);
        }
        Ok(())
    }

    fn read_line(&mut self, raw: &str) -> TranslationsResult<()> {
        let line = raw.trim();

        if line.is_empty() {
            if self.current.has_str {
                self.finish_entry()?;
            }
            return Ok(());
        }

        if line.starts_with("#~") || line.starts_with("#|") {
            return Ok(());
        }

        if line.starts_with('#') {
            if self.current.has_str {
                self.finish_entry()?;
            } else if !self.current.is_blank() {
                return Err(self.error("comment inside an entry"));
            }
            if self.current.start_line == 0 {
                self.current.start_line = self.line;
            }
            self.current.add_comment(line);
            return Ok(());
        }

        if line.starts_with('"') {
            let field = self
                .current
                .last
                .ok_or_else(|| self.error("string continuation without a directive"))?;
            let value = unquote(line).ok_or_else(|| self.error("unterminated string"))?;
            self.current.field_mut(field).push_str(&value);
            return Ok(());
        }

        let (directive, rest) = line
            .split_once(|c: char| c.is_ascii_whitespace())
            .ok_or_else(|| self.error(format!("unknown directive '{line}'")))?;
        let value = unquote(rest.trim_start()).ok_or_else(|| self.error("unterminated string"))?;

        match directive {
            "msgctxt" => {
                self.begin_directive()?;
                if self.current.has_id {
                    return Err(self.error("msgctxt after msgid"));
                }
                self.current.set(Field::Context, value);
            }
            "msgid" => {
                self.begin_directive()?;
                if self.current.has_id {
                    return Err(self.error("msgid without msgstr"));
                }
                self.current.has_id = true;
                self.current.set(Field::Id, value);
            }
            "msgid_plural" => {
                if self.current.last != Some(Field::Id) {
                    return Err(self.error("msgid_plural must follow msgid"));
                }
                self.current.set(Field::IdPlural, value);
            }
            "msgstr" => {
                if self.current.last != Some(Field::Id) {
                    return Err(self.error("msgstr must follow msgid"));
                }
                self.current.has_str = true;
                self.current.set(Field::Str(0), value);
            }
            _ => {
                let index = directive
                    .strip_prefix("msgstr[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| self.error(format!("unknown directive '{directive}'")))?
                    .parse::<usize>()
                    .map_err(|_| self.error(format!("bad plural index in '{directive}'")))?;

                match self.current.last {
                    Some(Field::IdPlural | Field::Str(_)) if self.current.entry.is_plural() => {}
                    _ => return Err(self.error("msgstr[] must follow msgid_plural")),
                }
                // Indices are contiguous from zero.
                if index > self.current.entry.translations.len() {
                    return Err(self.error(format!("bad plural index in '{directive}'")));
                }
                self.current.has_str = true;
                self.current.set(Field::Str(index), value);
            }
        }
        Ok(())
    }
}

/// Strips the surrounding quotes and decodes C escapes.
///
/// Returns `None` when the text is not a complete quoted string.
fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            if c == '"' {
                return None;
            }
            result.push(c);
            continue;
        }
        match chars.next()? {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'a' => result.push('\u{7}'),
            'b' => result.push('\u{8}'),
            'f' => result.push('\u{c}'),
            'v' => result.push('\u{b}'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            other => {
                result.push('\\');
                result.push(other);
            }
        }
    }
    Some(result)
}

/// Reads PO text into an existing catalog.
///
/// The header entry (empty msgid) is applied through
/// [`Translations::set_headers`], so the catalog's plural-forms policy
/// decides how a bad `Plural-Forms` value is handled.
pub fn read_into(content: &str, translations: &mut Translations) -> TranslationsResult<()> {
    let mut reader = PoReader {
        translations,
        current: EntryBuilder::default(),
        line: 0,
    };

    for (index, line) in content.lines().enumerate() {
        reader.line = index + 1;
        reader.read_line(line)?;
    }
    reader.finish_entry()?;

    debug!("Read {} PO entries", reader.translations.len());
    Ok(())
}

/// Parses PO text into a new catalog with its own registry.
pub fn parse_str(content: &str) -> TranslationsResult<Translations> {
    let mut translations = Translations::new();
    read_into(content, &mut translations)?;
    Ok(translations)
}

/// Formats a string as one or more quoted PO lines.
///
/// Strings containing inner newlines start with an empty `""` line and
/// continue with one quoted line per source line.
pub fn poify(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
        .replace('\r', "\\r");

    let mut po = format!("\"{}\"", escaped.split('\n').collect::<Vec<_>>().join("\\n\"\n\""));

    let newlines = escaped.matches('\n').count();
    if newlines > 1 || (newlines == 1 && !escaped.ends_with('\n')) {
        po.insert_str(0, "\"\"\n");
    }
    po.replace("\n\"\"", "")
}

fn write_comments(out: &mut String, prefix: &str, text: &str) {
    for line in text.lines() {
        if line.is_empty() {
            let _ = writeln!(out, "{}", prefix.trim_end());
        } else {
            let _ = writeln!(out, "{prefix}{line}");
        }
    }
}

/// Renders one entry in PO syntax, without a trailing blank line.
pub fn export_entry(entry: &TranslationEntry, nplurals: usize) -> String {
    let mut out = String::new();
    write_comments(&mut out, "# ", &entry.translator_comments);
    write_comments(&mut out, "#. ", &entry.extracted_comments);
    if !entry.references.is_empty() {
        let _ = writeln!(out, "#: {}", entry.references.join(" "));
    }
    if !entry.flags.is_empty() {
        let _ = writeln!(out, "#, {}", entry.flags.join(", "));
    }

    if let Some(context) = &entry.context {
        let _ = writeln!(out, "msgctxt {}", poify(context));
    }
    let _ = writeln!(out, "msgid {}", poify(&entry.singular));

    match &entry.plural {
        None => {
            let translation = entry.translations.first().map_or("", String::as_str);
            let _ = write!(out, "msgstr {}", poify(translation));
        }
        Some(plural) => {
            let _ = writeln!(out, "msgid_plural {}", poify(plural));
            let forms = nplurals.max(entry.translations.len()).max(1);
            let lines: Vec<String> = (0..forms)
                .map(|index| {
                    let translation = entry.translations.get(index).map_or("", String::as_str);
                    format!("msgstr[{index}] {}", poify(translation))
                })
                .collect();
            out.push_str(&lines.join("\n"));
        }
    }
    out
}

/// Renders a whole catalog: the header entry first, then every entry.
pub fn to_string(translations: &Translations) -> String {
    let mut blocks = Vec::with_capacity(translations.len() + 1);

    if !translations.headers().is_empty() {
        let header = TranslationEntry::new("")
            .with_translations([render_header_block(translations.headers())]);
        blocks.push(export_entry(&header, 1));
    }

    let nplurals = translations.get_plural_forms_count();
    blocks.extend(
        translations
            .entries()
            .map(|entry| export_entry(entry, nplurals)),
    );

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let translations = parse_str(
            r#"
msgid "Hello"
msgstr "Bonjour"

msgid "Goodbye"
msgstr "Au revoir"
"#,
        )
        .unwrap();
        assert_eq!(translations.len(), 2);
        assert_eq!(translations.translate("Hello", None), "Bonjour");
        assert_eq!(translations.translate("Goodbye", None), "Au revoir");
    }

    #[test]
    fn test_entries_without_blank_separator() {
        let translations = parse_str(
            "msgid \"One\"\nmsgstr \"Eins\"\nmsgid \"Two\"\nmsgstr \"Zwei\"\n",
        )
        .unwrap();
        assert_eq!(translations.translate("Two", None), "Zwei");
    }

    #[test]
    fn test_multiline_and_escapes() {
        let translations = parse_str(
            r#"
msgid ""
"Line 1\n"
"Line \"2\""
msgstr ""
"Zeile 1\n"
"Zeile \"2\"\t\\"
"#,
        )
        .unwrap();
        assert_eq!(
            translations.translate("Line 1\nLine \"2\"", None),
            "Zeile 1\nZeile \"2\"\t\\"
        );
    }

    #[test]
    fn test_plural_entry_and_comments() {
        let translations = parse_str(
            r#"
# Translator note
#. translators: %s: number of comments
#: wp-includes/comment.php:12 wp-admin/edit.php:40
#, php-format
msgctxt "noun"
msgid "%s comment"
msgid_plural "%s comments"
msgstr[0] "%s Kommentar"
msgstr[1] "%s Kommentare"
"#,
        )
        .unwrap();

        let entry = translations.find("%s comment", Some("noun")).unwrap();
        assert_eq!(entry.plural.as_deref(), Some("%s comments"));
        assert_eq!(entry.translations, vec!["%s Kommentar", "%s Kommentare"]);
        assert_eq!(entry.translator_comments, "Translator note");
        assert_eq!(entry.extracted_comments, "translators: %s: number of comments");
        assert_eq!(
            entry.references,
            vec!["wp-includes/comment.php:12", "wp-admin/edit.php:40"]
        );
        assert_eq!(entry.flags, vec!["php-format"]);
    }

    #[test]
    fn test_header_entry() {
        let translations = parse_str(
            r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=utf-8\n"
"Plural-Forms: nplurals=3; plural=(n==1 ? 0 : n>=2 && n<=4 ? 1 : 2);\n"
"#,
        )
        .unwrap();
        assert!(translations.is_empty());
        assert_eq!(translations.get_plural_forms_count(), 3);
        assert_eq!(translations.charset().as_deref(), Some("UTF-8"));
        assert_eq!(translations.select_plural_form(3).unwrap(), 1);
    }

    #[test]
    fn test_untranslated_entries_have_no_translations() {
        let translations = parse_str(
            "msgid \"file\"\nmsgid_plural \"files\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n",
        )
        .unwrap();
        let entry = translations.find("file", None).unwrap();
        assert!(entry.translations.is_empty());
        assert_eq!(translations.translate_plural("file", "files", 2, None).unwrap(), "files");
    }

    #[test]
    fn test_obsolete_and_previous_entries_skipped() {
        let translations = parse_str(
            "#| msgid \"Old\"\nmsgid \"New\"\nmsgstr \"Neu\"\n\n#~ msgid \"Gone\"\n#~ msgstr \"Weg\"\n",
        )
        .unwrap();
        assert_eq!(translations.len(), 1);
        assert_eq!(translations.translate("Gone", None), "Gone");
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("msgid \"a\"\nmsgid \"b\"\nmsgstr \"c\"\n", 2),
            ("msgstr \"orphan\"\n", 1),
            ("msgid \"a\"\nmsgstr \"unterminated\n", 2),
            ("\"floating\"\n", 1),
            ("msgid \"a\"\nmsgstr[0] \"x\"\n", 2),
            ("msgid \"a\"\nmsgstr \"b\"\nmsgctxt \"late\"\nmsgid \"c\"\nmsgctxt \"x\"\n", 5),
            ("msgid \"a\"\n", 1),
            ("bogus \"a\"\n", 1),
            (
                "msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[18446744073709551615] \"x\"\n",
                3,
            ),
            (
                "msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[0] \"x\"\nmsgstr[5000] \"y\"\n",
                4,
            ),
            ("msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[1] \"x\"\n", 3),
        ];
        for (content, expected_line) in cases {
            match parse_str(content) {
                Err(TranslationsError::PoParse { line, .. }) => {
                    assert_eq!(line, expected_line, "{content:?}");
                }
                other => panic!("expected PoParse error for {content:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_poify() {
        assert_eq!(poify("simple"), "\"simple\"");
        assert_eq!(poify("say \"hi\"\t\\"), "\"say \\\"hi\\\"\\t\\\\\"");
        assert_eq!(poify("ends with newline\n"), "\"ends with newline\\n\"");
        assert_eq!(poify("one\ntwo"), "\"\"\n\"one\\n\"\n\"two\"");
        assert_eq!(poify("one\ntwo\n"), "\"\"\n\"one\\n\"\n\"two\\n\"");
    }

    #[test]
    fn test_export_round_trip() {
        let source = r#"msgid ""
msgstr ""
"Language: pl\n"
"Plural-Forms: nplurals=3; plural=(n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n"

#. translators: file count
#, php-format
msgid "%d file"
msgid_plural "%d files"
msgstr[0] "%d plik"
msgstr[1] "%d pliki"
msgstr[2] "%d plików"

msgctxt "verb"
msgid "Post"
msgstr "Opublikuj"
"#;
        let translations = parse_str(source).unwrap();
        assert_eq!(to_string(&translations), source);
    }

    #[test]
    fn test_export_pads_missing_plural_forms() {
        let entry = TranslationEntry::new_plural("%d day", "%d days").with_translations(["%d dzień"]);
        assert_eq!(
            export_entry(&entry, 3),
            "msgid \"%d day\"\nmsgid_plural \"%d days\"\nmsgstr[0] \"%d dzień\"\nmsgstr[1] \"\"\nmsgstr[2] \"\""
        );
    }
}
