use std::error::Error;

use sbm::types::errors::*;

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::Validation("empty url".to_string()).to_string(),
        "Invalid input: empty url"
    );
    assert_eq!(
        BookmarkError::RowNotFound("7".to_string()).to_string(),
        "Bookmark not found: 7"
    );
    assert_eq!(
        BookmarkError::TagNotFound("rust".to_string()).to_string(),
        "Tag not found: rust"
    );
    assert_eq!(
        BookmarkError::CapacityExceeded("bookmark 1 already has 8 tags".to_string()).to_string(),
        "Capacity exceeded: bookmark 1 already has 8 tags"
    );
    assert_eq!(
        BookmarkError::Persistence("disk full".to_string()).to_string(),
        "Storage error: disk full"
    );
    assert_eq!(
        BookmarkError::External("timeout".to_string()).to_string(),
        "External failure: timeout"
    );
}

#[test]
fn bookmark_error_implements_error_trait() {
    let err: Box<dyn Error> = Box::new(BookmarkError::RowNotFound("1".to_string()));
    assert!(err.source().is_none());
}

#[test]
fn lower_level_errors_convert_into_bookmark_error() {
    let err: BookmarkError = PersistenceError::Io("denied".to_string()).into();
    assert_eq!(err, BookmarkError::Persistence("Store I/O error: denied".to_string()));

    let err: BookmarkError = FetchError::Network("refused".to_string()).into();
    assert_eq!(
        err,
        BookmarkError::External("Could not download page: refused".to_string())
    );

    let err: BookmarkError = ViewerError::Failed("https://x".to_string()).into();
    assert!(matches!(err, BookmarkError::External(_)));

    let err: BookmarkError = SettingsError::IoError("gone".to_string()).into();
    assert!(matches!(err, BookmarkError::Persistence(_)));
}

// === CodecError Tests ===

#[test]
fn codec_error_display_variants() {
    assert_eq!(
        CodecError::Syntax("EOF".to_string()).to_string(),
        "Malformed store document: EOF"
    );
    assert_eq!(
        CodecError::InvalidId("abc".to_string()).to_string(),
        "Invalid identifier: abc"
    );
    assert_eq!(
        CodecError::InvalidTimestamp("yesterday".to_string()).to_string(),
        "Invalid timestamp: yesterday"
    );
    assert_eq!(
        CodecError::TagArrayLength {
            row: "3".to_string(),
            len: 7
        }
        .to_string(),
        "Row 3 has 7 tag slots, expected 8"
    );
    assert_eq!(
        CodecError::DanglingTag {
            row: "3".to_string(),
            tag: "9".to_string()
        }
        .to_string(),
        "Row 3 references unknown tag 9"
    );
}

// === PersistenceError Tests ===

#[test]
fn corrupt_store_exposes_codec_source() {
    let err = PersistenceError::from(CodecError::Structure("bad".to_string()));
    assert_eq!(
        err.to_string(),
        "Corrupt store: Invalid store structure: bad"
    );
    assert!(err.source().is_some());
    assert!(PersistenceError::Io("x".to_string()).source().is_none());
}

// === FetchError / ViewerError / SettingsError Tests ===

#[test]
fn collaborator_error_display_variants() {
    assert_eq!(
        FetchError::InvalidUrl("::".to_string()).to_string(),
        "Invalid URL: ::"
    );
    assert_eq!(
        FetchError::Runtime("no reactor".to_string()).to_string(),
        "Fetch runtime error: no reactor"
    );
    assert_eq!(
        ViewerError::Spawn("xdg-open".to_string()).to_string(),
        "Could not start viewer: xdg-open"
    );
    assert_eq!(
        SettingsError::SerializationError("line 1".to_string()).to_string(),
        "Settings serialization error: line 1"
    );
}
