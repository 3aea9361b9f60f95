use std::fmt;

// === BookmarkError ===

/// Errors returned by bookmark and tag operations.
///
/// Every variant aborts the running command; the store is not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkError {
    /// A required argument is missing or malformed, or a tag name is not allowed.
    Validation(String),
    /// No live bookmark has the given ID.
    RowNotFound(String),
    /// The reference resolves to no live tag.
    TagNotFound(String),
    /// A fixed-capacity resource (tag slots, ID space) is exhausted.
    CapacityExceeded(String),
    /// The backing store could not be read, created or written.
    Persistence(String),
    /// The content fetcher or the external viewer failed.
    External(String),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            BookmarkError::RowNotFound(id) => write!(f, "Bookmark not found: {}", id),
            BookmarkError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            BookmarkError::CapacityExceeded(msg) => write!(f, "Capacity exceeded: {}", msg),
            BookmarkError::Persistence(msg) => write!(f, "Storage error: {}", msg),
            BookmarkError::External(msg) => write!(f, "External failure: {}", msg),
        }
    }
}

impl std::error::Error for BookmarkError {}

impl From<PersistenceError> for BookmarkError {
    fn from(err: PersistenceError) -> Self {
        BookmarkError::Persistence(err.to_string())
    }
}

impl From<FetchError> for BookmarkError {
    fn from(err: FetchError) -> Self {
        BookmarkError::External(err.to_string())
    }
}

impl From<ViewerError> for BookmarkError {
    fn from(err: ViewerError) -> Self {
        BookmarkError::External(err.to_string())
    }
}

impl From<SettingsError> for BookmarkError {
    fn from(err: SettingsError) -> Self {
        BookmarkError::Persistence(err.to_string())
    }
}

// === CodecError ===

/// Errors raised while decoding the on-disk store document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The text is not a well-formed document.
    Syntax(String),
    /// The document is well-formed but does not have the expected shape.
    Structure(String),
    /// A row or tag key is not a positive decimal integer.
    InvalidId(String),
    /// A row timestamp does not match `YYYY-MM-DD HH:MM:SS`.
    InvalidTimestamp(String),
    /// A row's tag array does not have exactly the fixed slot count.
    TagArrayLength { row: String, len: usize },
    /// A row references a tag that is not in the tag section.
    DanglingTag { row: String, tag: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Syntax(msg) => write!(f, "Malformed store document: {}", msg),
            CodecError::Structure(msg) => write!(f, "Invalid store structure: {}", msg),
            CodecError::InvalidId(id) => write!(f, "Invalid identifier: {}", id),
            CodecError::InvalidTimestamp(ts) => write!(f, "Invalid timestamp: {}", ts),
            CodecError::TagArrayLength { row, len } => write!(
                f,
                "Row {} has {} tag slots, expected {}",
                row,
                len,
                crate::types::bookmark::ROW_TAG_CAPACITY
            ),
            CodecError::DanglingTag { row, tag } => {
                write!(f, "Row {} references unknown tag {}", row, tag)
            }
        }
    }
}

impl std::error::Error for CodecError {}

// === PersistenceError ===

/// Errors related to reading and writing the store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The store file or its directory could not be read, created or written.
    Io(String),
    /// The store file exists but could not be decoded.
    Corrupt(CodecError),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(msg) => write!(f, "Store I/O error: {}", msg),
            PersistenceError::Corrupt(err) => write!(f, "Corrupt store: {}", err),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Corrupt(err) => Some(err),
            PersistenceError::Io(_) => None,
        }
    }
}

impl From<CodecError> for PersistenceError {
    fn from(err: CodecError) -> Self {
        PersistenceError::Corrupt(err)
    }
}

// === FetchError ===

/// Errors related to downloading a page to derive its title.
///
/// A page without a `<title>` is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL cannot be requested.
    InvalidUrl(String),
    /// The request failed or returned a non-success status.
    Network(String),
    /// The async runtime could not be started.
    Runtime(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            FetchError::Network(msg) => write!(f, "Could not download page: {}", msg),
            FetchError::Runtime(msg) => write!(f, "Fetch runtime error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === ViewerError ===

/// Errors related to opening a URL in the external viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The viewer process could not be started.
    Spawn(String),
    /// The viewer exited with a failure status.
    Failed(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Spawn(msg) => write!(f, "Could not start viewer: {}", msg),
            ViewerError::Failed(msg) => write!(f, "Could not open URL: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {}

// === SettingsError ===

/// Errors related to loading the optional settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// An I/O error occurred while reading settings.
    IoError(String),
    /// The settings file could not be parsed.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
