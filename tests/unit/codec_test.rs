//! Unit tests for the store document codec.
//!
//! Covers the accepted layout, counter recovery, tombstone handling and each
//! class of rejected document.

use rstest::rstest;
use sbm::storage::codec::{decode, encode};
use sbm::types::bookmark::{parse_timestamp, Row, RowId, Tag, TagSlots, TITLE_MAX};
use sbm::types::errors::CodecError;
use sbm::types::store::Store;

const SLOTS_EMPTY: &str = r#"["0", "0", "0", "0", "0", "0", "0", "0"]"#;

fn document(tags: &str, rows: &str) -> String {
    format!("{{\"tags\": {{{}}}, \"rows\": {{{}}}}}", tags, rows)
}

fn row_entry(id: &str, stamp: &str, slots: &str) -> String {
    format!(
        "\"{}\": [\"https://example.com\", \"Example\", \"\", \"{}\", {}]",
        id, stamp, slots
    )
}

/// A well-formed document decodes with tags attached and counters resumed
/// past the highest IDs.
#[test]
fn test_decode_valid_document() {
    let text = document(
        r#""1": "work", "4": "rust""#,
        &format!(
            "{}, {}",
            row_entry("2", "2024-01-02 03:04:05", r#"["4", "0", "1", "0", "0", "0", "0", "0"]"#),
            row_entry("9", "2023-12-31 23:59:59", SLOTS_EMPTY)
        ),
    );

    let store = decode(&text).unwrap();
    assert_eq!(store.rows().live_count(), 2);
    assert_eq!(store.tags().live_count(), 2);
    assert_eq!(store.peek_next_row_id(), 10);
    assert_eq!(store.peek_next_tag_id(), 5);

    let row = store.row(RowId::new(2).unwrap()).unwrap();
    let ids: Vec<u32> = row.tags.ids().map(|id| id.get()).collect();
    assert_eq!(ids, vec![4, 1]);
    assert_eq!(row.updated_at, parse_timestamp("2024-01-02 03:04:05").unwrap());
}

/// Encoding writes tags before rows, one row per line, with no separator
/// after the last entry.
#[test]
fn test_encode_layout() {
    let mut store = Store::new();
    let tag = store
        .insert_tag(|id| Tag {
            id,
            name: "work".to_string(),
        })
        .unwrap()
        .id;
    let mut slots = TagSlots::new();
    slots.insert(tag).unwrap();
    store
        .insert_row(|id| Row {
            id,
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            comment: String::new(),
            tags: slots,
            updated_at: parse_timestamp("2024-01-02 03:04:05").unwrap(),
        })
        .unwrap();

    let expected = "{\n\t\"tags\": {\n\t\t\"1\": \"work\"\n\t},\n\t\"rows\": {\n\t\t\"1\": [\"https://example.com\", \"Example\", \"\", \"2024-01-02 03:04:05\", [\"1\", \"0\", \"0\", \"0\", \"0\", \"0\", \"0\", \"0\"]]\n\t}\n}\n";
    assert_eq!(encode(&store), expected);
}

/// Tombstoned entries disappear from the output, and the output stays valid
/// JSON when the last entry is the one removed.
#[test]
fn test_encode_skips_tombstones() {
    let mut store = Store::new();
    for n in 0..3 {
        store
            .insert_row(|id| Row {
                id,
                url: format!("https://example.com/{}", n),
                title: String::new(),
                comment: String::new(),
                tags: TagSlots::new(),
                updated_at: parse_timestamp("2024-01-02 03:04:05").unwrap(),
            })
            .unwrap();
    }
    let last = store.row_index(RowId::new(3).unwrap()).unwrap();
    store.rows_mut().tombstone(last);

    let text = encode(&store);
    assert!(!text.contains("\"3\""));
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.rows().live_count(), 2);
    assert_eq!(decoded.peek_next_row_id(), 3);
}

/// Strings with quotes, backslashes and newlines survive a round trip.
#[test]
fn test_special_characters_survive() {
    let mut store = Store::new();
    store
        .insert_row(|id| Row {
            id,
            url: "https://example.com/?q=\"x\"".to_string(),
            title: "Back\\slash \"quoted\"".to_string(),
            comment: "line one\nline two\ttab".to_string(),
            tags: TagSlots::new(),
            updated_at: parse_timestamp("2024-01-02 03:04:05").unwrap(),
        })
        .unwrap();
    let decoded = decode(&encode(&store)).unwrap();
    assert_eq!(decoded, store);
}

/// Over-long titles are clamped when loaded.
#[test]
fn test_decode_truncates_long_title() {
    let long = "t".repeat(100);
    let text = document(
        "",
        &format!(
            "\"1\": [\"https://example.com\", \"{}\", \"\", \"2024-01-02 03:04:05\", {}]",
            long, SLOTS_EMPTY
        ),
    );
    let store = decode(&text).unwrap();
    let row = store.row(RowId::new(1).unwrap()).unwrap();
    assert_eq!(row.title.chars().count(), TITLE_MAX);
    assert!(row.title.ends_with("..."));
}

#[rstest]
#[case::not_json("not json")]
#[case::truncated("{\"tags\": {}")]
fn test_rejects_malformed_text(#[case] text: &str) {
    assert!(matches!(decode(text), Err(CodecError::Syntax(_))));
}

#[rstest]
#[case::array_root("[]")]
#[case::rows_first("{\"rows\": {}, \"tags\": {}}")]
#[case::missing_rows("{\"tags\": {}}")]
#[case::extra_section("{\"tags\": {}, \"rows\": {}, \"more\": {}}")]
#[case::tags_not_object("{\"tags\": [], \"rows\": {}}")]
#[case::tag_name_not_string("{\"tags\": {\"1\": 5}, \"rows\": {}}")]
#[case::row_not_array("{\"tags\": {}, \"rows\": {\"1\": \"x\"}}")]
#[case::row_too_short("{\"tags\": {}, \"rows\": {\"1\": [\"https://a\", \"\", \"\", \"2024-01-02 03:04:05\"]}}")]
#[case::field_not_string("{\"tags\": {}, \"rows\": {\"1\": [\"https://a\", 1, \"\", \"2024-01-02 03:04:05\", [\"0\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\"]]}}")]
#[case::empty_url("{\"tags\": {}, \"rows\": {\"1\": [\"\", \"\", \"\", \"2024-01-02 03:04:05\", [\"0\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\"]]}}")]
#[case::duplicate_tag("{\"tags\": {\"1\": \"a\"}, \"rows\": {\"1\": [\"https://a\", \"\", \"\", \"2024-01-02 03:04:05\", [\"1\",\"1\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\"]]}}")]
fn test_rejects_bad_structure(#[case] text: &str) {
    assert!(
        matches!(decode(text), Err(CodecError::Structure(_))),
        "expected structure error for {}",
        text
    );
}

#[rstest]
#[case::zero_tag_key(r#""0": "zero""#, "")]
#[case::alpha_tag_key(r#""x": "letters""#, "")]
#[case::signed_row_key("", r#""+1": []"#)]
#[case::alias_tag_key(r#""1": "work", "01": "home""#, "")]
#[case::alias_row_key(
    "",
    r#""1": ["https://a", "", "", "2024-01-02 03:04:05", ["0","0","0","0","0","0","0","0"]], "01": ["https://b", "", "", "2024-01-02 03:04:05", ["0","0","0","0","0","0","0","0"]]"#
)]
fn test_rejects_bad_keys(#[case] tags: &str, #[case] rows: &str) {
    assert!(matches!(
        decode(&document(tags, rows)),
        Err(CodecError::InvalidId(_))
    ));
}

#[rstest]
#[case::slash_date("2024/01/02 03:04:05")]
#[case::unpadded("2024-1-2 03:04:05")]
#[case::impossible_date("2024-02-30 03:04:05")]
#[case::no_time("2024-01-02")]
fn test_rejects_bad_timestamp(#[case] stamp: &str) {
    let text = document("", &row_entry("1", stamp, SLOTS_EMPTY));
    assert!(matches!(
        decode(&text),
        Err(CodecError::InvalidTimestamp(_))
    ));
}

#[rstest]
#[case::seven(r#"["0", "0", "0", "0", "0", "0", "0"]"#, 7)]
#[case::nine(r#"["0", "0", "0", "0", "0", "0", "0", "0", "0"]"#, 9)]
fn test_rejects_wrong_slot_count(#[case] slots: &str, #[case] len: usize) {
    let text = document("", &row_entry("1", "2024-01-02 03:04:05", slots));
    assert_eq!(
        decode(&text).unwrap_err(),
        CodecError::TagArrayLength {
            row: "1".to_string(),
            len
        }
    );
}

#[test]
fn test_rejects_dangling_tag() {
    let text = document(
        r#""1": "work""#,
        &row_entry(
            "5",
            "2024-01-02 03:04:05",
            r#"["1", "3", "0", "0", "0", "0", "0", "0"]"#,
        ),
    );
    assert_eq!(
        decode(&text).unwrap_err(),
        CodecError::DanglingTag {
            row: "5".to_string(),
            tag: "3".to_string()
        }
    );
}
