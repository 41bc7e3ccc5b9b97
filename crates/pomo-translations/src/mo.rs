//! Reading and writing MO (machine object) catalogs
//!
//! Layout: a 28-byte header (magic, revision, string count, offsets of the
//! original and translation tables, hash table size and offset), two tables
//! of `(length, offset)` pairs, then NUL-terminated strings. Original strings
//! carry an optional `context \u{4}` prefix and a `\0`-separated plural;
//! translation strings hold `\0`-separated plural forms.

use crate::entry::{TranslationEntry, CONTEXT_SEPARATOR};
use crate::error::{TranslationsError, TranslationsResult};
use crate::headers::{parse_header_block, render_header_block};
use crate::translations::Translations;
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use std::marker::PhantomData;
use tracing::debug;

/// The gettext MO magic number
pub const MAGIC: u32 = 0x9504_12de;

const HEADER_LEN: usize = 28;
const TABLE_SLOT_LEN: usize = 8;
const PLURAL_SEPARATOR: char = '\0';

struct MoReader<'a, B> {
    data: &'a [u8],
    order: PhantomData<B>,
}

impl<'a, B: ByteOrder> MoReader<'a, B> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            order: PhantomData,
        }
    }

    fn bytes(&self, offset: usize, len: usize, what: &'static str) -> TranslationsResult<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(TranslationsError::Truncated { what, offset })
    }

    fn u32_at(&self, offset: usize, what: &'static str) -> TranslationsResult<u32> {
        Ok(B::read_u32(self.bytes(offset, 4, what)?))
    }

    fn offset_at(&self, offset: usize, what: &'static str) -> TranslationsResult<usize> {
        Ok(self.u32_at(offset, what)? as usize)
    }

    fn string_at(&self, table: usize, index: usize, what: &'static str) -> TranslationsResult<&'a str> {
        let slot = table + index * TABLE_SLOT_LEN;
        let len = self.offset_at(slot, what)?;
        let offset = self.offset_at(slot + 4, what)?;
        std::str::from_utf8(self.bytes(offset, len, what)?)
            .map_err(|_| TranslationsError::InvalidUtf8 { what })
    }

    fn read_into(&self, translations: &mut Translations) -> TranslationsResult<()> {
        let revision = self.u32_at(4, "header")?;
        if revision >> 16 != 0 {
            return Err(TranslationsError::UnsupportedRevision { revision });
        }

        let count = self.offset_at(8, "header")?;
        let originals = self.offset_at(12, "header")?;
        let strings = self.offset_at(16, "header")?;

        let table_len = count
            .checked_mul(TABLE_SLOT_LEN)
            .ok_or(TranslationsError::Truncated {
                what: "string tables",
                offset: originals,
            })?;
        self.bytes(originals, table_len, "original table")?;
        self.bytes(strings, table_len, "translation table")?;

        for index in 0..count {
            let original = self.string_at(originals, index, "original string")?;
            let translation = self.string_at(strings, index, "translation string")?;

            if original.is_empty() {
                translations.set_headers(&parse_header_block(translation))?;
                continue;
            }

            translations.add_entry(decode_entry(original, translation));
        }
        Ok(())
    }
}

fn decode_entry(original: &str, translation: &str) -> TranslationEntry {
    let (context, ids) = match original.split_once(CONTEXT_SEPARATOR) {
        Some((context, ids)) => (Some(context), ids),
        None => (None, original),
    };

    let mut entry = match ids.split_once(PLURAL_SEPARATOR) {
        Some((singular, plural)) => TranslationEntry::new_plural(singular, plural),
        None => TranslationEntry::new(ids),
    };
    entry.context = context.map(str::to_string);

    if !translation.split(PLURAL_SEPARATOR).all(str::is_empty) {
        entry.translations = translation.split(PLURAL_SEPARATOR).map(str::to_string).collect();
    }
    entry
}

/// Reads MO bytes into an existing catalog. Both byte orders are accepted.
pub fn read_into(data: &[u8], translations: &mut Translations) -> TranslationsResult<()> {
    let head = data.get(..HEADER_LEN).ok_or(TranslationsError::Truncated {
        what: "header",
        offset: 0,
    })?;

    if LittleEndian::read_u32(head) == MAGIC {
        debug!("Reading little-endian MO catalog");
        MoReader::<LittleEndian>::new(data).read_into(translations)
    } else if BigEndian::read_u32(head) == MAGIC {
        debug!("Reading big-endian MO catalog");
        MoReader::<BigEndian>::new(data).read_into(translations)
    } else {
        Err(TranslationsError::BadMagic {
            magic: LittleEndian::read_u32(head),
        })
    }
}

/// Parses MO bytes into a new catalog with its own registry.
pub fn parse_bytes(data: &[u8]) -> TranslationsResult<Translations> {
    let mut translations = Translations::new();
    read_into(data, &mut translations)?;
    Ok(translations)
}

fn encode_original(entry: &TranslationEntry) -> String {
    let mut original = String::new();
    if let Some(context) = &entry.context {
        original.push_str(context);
        original.push(CONTEXT_SEPARATOR);
    }
    original.push_str(&entry.singular);
    if let Some(plural) = &entry.plural {
        original.push(PLURAL_SEPARATOR);
        original.push_str(plural);
    }
    original
}

/// Writes `(original, translation)` pairs in the given byte order.
///
/// Pairs are sorted by original so readers can binary search. No hash table
/// is emitted.
fn write_pairs<B: ByteOrder>(mut pairs: Vec<(String, String)>) -> TranslationsResult<Vec<u8>> {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let count = pairs.len();
    let originals_offset = HEADER_LEN;
    let translations_offset = originals_offset + count * TABLE_SLOT_LEN;
    let strings_offset = translations_offset + count * TABLE_SLOT_LEN;

    let mut header = Vec::with_capacity(strings_offset);
    let mut strings = Vec::new();
    let mut original_slots = Vec::with_capacity(count);
    let mut translation_slots = Vec::with_capacity(count);

    for (original, _) in &pairs {
        original_slots.push((original.len(), strings_offset + strings.len()));
        strings.extend_from_slice(original.as_bytes());
        strings.push(0);
    }
    for (_, translation) in &pairs {
        translation_slots.push((translation.len(), strings_offset + strings.len()));
        strings.extend_from_slice(translation.as_bytes());
        strings.push(0);
    }

    header.write_u32::<B>(MAGIC)?;
    header.write_u32::<B>(0)?;
    header.write_u32::<B>(to_u32(count)?)?;
    header.write_u32::<B>(to_u32(originals_offset)?)?;
    header.write_u32::<B>(to_u32(translations_offset)?)?;
    header.write_u32::<B>(0)?;
    header.write_u32::<B>(to_u32(strings_offset)?)?;

    for (len, offset) in original_slots.into_iter().chain(translation_slots) {
        header.write_u32::<B>(to_u32(len)?)?;
        header.write_u32::<B>(to_u32(offset)?)?;
    }

    header.extend_from_slice(&strings);
    Ok(header)
}

fn to_u32(value: usize) -> TranslationsResult<u32> {
    u32::try_from(value).map_err(|_| {
        TranslationsError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "catalog too large for the MO format",
        ))
    })
}

/// Renders a catalog as little-endian MO bytes.
///
/// Entries without any translation are left out, as gettext would ignore
/// them anyway.
pub fn to_bytes(translations: &Translations) -> TranslationsResult<Vec<u8>> {
    let mut pairs = Vec::with_capacity(translations.len() + 1);
    if !translations.headers().is_empty() {
        pairs.push((String::new(), render_header_block(translations.headers())));
    }
    pairs.extend(
        translations
            .entries()
            .filter(|entry| entry.translations.iter().any(|t| !t.is_empty()))
            .map(|entry| (encode_original(entry), entry.translations.join("\0"))),
    );
    write_pairs::<LittleEndian>(pairs)
}
