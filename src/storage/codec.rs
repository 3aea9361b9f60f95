//! Text encoding of the bookmark store.
//!
//! The document is a JSON object with exactly two sections, `tags` then
//! `rows`:
//!
//! ```text
//! {
//! 	"tags": {
//! 		"1": "work"
//! 	},
//! 	"rows": {
//! 		"4": ["https://example.com", "Example", "", "2024-01-02 03:04:05", ["1", "0", "0", "0", "0", "0", "0", "0"]]
//! 	}
//! }
//! ```
//!
//! Encoding is written by hand so that each row stays on one line; decoding
//! goes through `serde_json::Value` (with key order preserved) and validates
//! every field before a [`Store`] is built.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::types::bookmark::{
    format_timestamp, parse_decimal, parse_timestamp, truncate_bounded, Row, RowId, Tag, TagId,
    TagSlots, COMMENT_MAX, ROW_TAG_CAPACITY, TAG_NAME_MAX, TITLE_MAX,
};
use crate::types::errors::CodecError;
use crate::types::store::Store;

const TAGS_SECTION: &str = "tags";
const ROWS_SECTION: &str = "rows";
const ROW_FIELDS: usize = 5;

/// Serializes the live entries of `store`. Tombstoned entries are omitted.
pub fn encode(store: &Store) -> String {
    let tags: Vec<String> = store
        .tags()
        .iter()
        .map(|(_, tag)| format!("\t\t{}: {}", quote(&tag.id.to_string()), quote(&tag.name)))
        .collect();

    let rows: Vec<String> = store.rows().iter().map(|(_, row)| encode_row(row)).collect();

    format!(
        "{{\n\t{}: {},\n\t{}: {}\n}}\n",
        quote(TAGS_SECTION),
        section(&tags),
        quote(ROWS_SECTION),
        section(&rows)
    )
}

fn encode_row(row: &Row) -> String {
    let slots: Vec<String> = row
        .tags
        .slots()
        .iter()
        .map(|slot| quote(&slot.map_or(0, TagId::get).to_string()))
        .collect();
    format!(
        "\t\t{}: [{}, {}, {}, {}, [{}]]",
        quote(&row.id.to_string()),
        quote(&row.url),
        quote(&row.title),
        quote(&row.comment),
        quote(&format_timestamp(&row.updated_at)),
        slots.join(", ")
    )
}

/// Joins entries with separators between them only.
fn section(entries: &[String]) -> String {
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n\t}}", entries.join(",\n"))
    }
}

/// JSON string literal with escaping.
fn quote(text: &str) -> String {
    Value::from(text).to_string()
}

/// Parses a store document. Any structural problem fails the whole decode.
pub fn decode(text: &str) -> Result<Store, CodecError> {
    let root: Value =
        serde_json::from_str(text).map_err(|e| CodecError::Syntax(e.to_string()))?;
    let Value::Object(root) = root else {
        return Err(CodecError::Structure("top level is not an object".to_string()));
    };
    if root.len() != 2 {
        return Err(CodecError::Structure(format!(
            "expected 2 top-level sections, found {}",
            root.len()
        )));
    }

    let mut sections = root.into_iter();
    let tags_value = expect_section(sections.next(), TAGS_SECTION)?;
    let rows_value = expect_section(sections.next(), ROWS_SECTION)?;

    let tags = decode_tags(tags_value)?;
    let known: HashSet<TagId> = tags.iter().map(|t| t.id).collect();
    let rows = decode_rows(rows_value, &known)?;

    Ok(Store::from_parts(rows, tags))
}

fn expect_section(
    entry: Option<(String, Value)>,
    name: &str,
) -> Result<Map<String, Value>, CodecError> {
    match entry {
        Some((key, Value::Object(map))) if key == name => Ok(map),
        Some((key, _)) if key == name => Err(CodecError::Structure(format!(
            "section \"{}\" is not an object",
            name
        ))),
        Some((key, _)) => Err(CodecError::Structure(format!(
            "expected section \"{}\", found \"{}\"",
            name, key
        ))),
        None => Err(CodecError::Structure(format!("missing section \"{}\"", name))),
    }
}

fn decode_tags(section: Map<String, Value>) -> Result<Vec<Tag>, CodecError> {
    let mut tags = Vec::with_capacity(section.len());
    for (key, value) in section {
        let id = canonical_key(&key, TagId::parse)?;
        let Value::String(name) = value else {
            return Err(CodecError::Structure(format!(
                "tag {} name is not a string",
                key
            )));
        };
        tags.push(Tag {
            id,
            name: truncate_bounded(&name, TAG_NAME_MAX),
        });
    }
    Ok(tags)
}

/// Parses an entry key, accepting only the form the encoder writes.
///
/// Object keys are unique, so rejecting aliases such as `"01"` keeps IDs
/// unique within a section.
fn canonical_key<T: ToString>(key: &str, parse: fn(&str) -> Option<T>) -> Result<T, CodecError> {
    match parse(key) {
        Some(id) if id.to_string() == key => Ok(id),
        _ => Err(CodecError::InvalidId(key.to_string())),
    }
}

fn decode_rows(
    section: Map<String, Value>,
    known_tags: &HashSet<TagId>,
) -> Result<Vec<Row>, CodecError> {
    let mut rows = Vec::with_capacity(section.len());
    for (key, value) in section {
        let id = canonical_key(&key, RowId::parse)?;
        rows.push(decode_row(id, &key, value, known_tags)?);
    }
    Ok(rows)
}

fn decode_row(
    id: RowId,
    key: &str,
    value: Value,
    known_tags: &HashSet<TagId>,
) -> Result<Row, CodecError> {
    let Value::Array(fields) = value else {
        return Err(CodecError::Structure(format!("row {} is not an array", key)));
    };
    if fields.len() != ROW_FIELDS {
        return Err(CodecError::Structure(format!(
            "row {} has {} fields, expected {}",
            key,
            fields.len(),
            ROW_FIELDS
        )));
    }

    let mut fields = fields.into_iter();
    let url = string_field(fields.next(), key, "url")?;
    let title = string_field(fields.next(), key, "title")?;
    let comment = string_field(fields.next(), key, "comment")?;
    let stamp = string_field(fields.next(), key, "timestamp")?;
    let slots = fields.next();

    if url.is_empty() {
        return Err(CodecError::Structure(format!("row {} has an empty url", key)));
    }
    let updated_at = parse_timestamp(&stamp).ok_or(CodecError::InvalidTimestamp(stamp))?;
    let tags = decode_slots(slots, key, known_tags)?;

    Ok(Row {
        id,
        url,
        title: truncate_bounded(&title, TITLE_MAX),
        comment: truncate_bounded(&comment, COMMENT_MAX),
        tags,
        updated_at,
    })
}

fn string_field(field: Option<Value>, row: &str, name: &str) -> Result<String, CodecError> {
    match field {
        Some(Value::String(s)) => Ok(s),
        _ => Err(CodecError::Structure(format!(
            "row {} field \"{}\" is not a string",
            row, name
        ))),
    }
}

fn decode_slots(
    field: Option<Value>,
    row: &str,
    known_tags: &HashSet<TagId>,
) -> Result<TagSlots, CodecError> {
    let Some(Value::Array(items)) = field else {
        return Err(CodecError::Structure(format!(
            "row {} tag list is not an array",
            row
        )));
    };
    if items.len() != ROW_TAG_CAPACITY {
        return Err(CodecError::TagArrayLength {
            row: row.to_string(),
            len: items.len(),
        });
    }

    let mut raw = [None; ROW_TAG_CAPACITY];
    for (slot, item) in raw.iter_mut().zip(items) {
        let Value::String(text) = item else {
            return Err(CodecError::Structure(format!(
                "row {} tag slot is not a string",
                row
            )));
        };
        let value = parse_decimal(&text).ok_or_else(|| CodecError::InvalidId(text.clone()))?;
        if let Some(tag) = TagId::new(value) {
            if !known_tags.contains(&tag) {
                return Err(CodecError::DanglingTag {
                    row: row.to_string(),
                    tag: text,
                });
            }
            *slot = Some(tag);
        }
    }

    TagSlots::from_slots(raw)
        .ok_or_else(|| CodecError::Structure(format!("row {} lists a tag twice", row)))
}
