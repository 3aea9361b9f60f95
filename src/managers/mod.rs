// sbm store managers
// Managers handle mutations of the in-memory store: bookmarks and tags.

pub mod bookmark_manager;
pub mod tag_manager;

/// Result of an operation that may stop at a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation ran and changed the store.
    Applied(T),
    /// The user declined; the store is unchanged.
    Declined,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Declined => None,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Outcome::Declined)
    }
}

/// Splits tag arguments into individual references. One argument may carry
/// several space-separated references.
pub fn split_tag_refs(refs: &[String]) -> Vec<&str> {
    refs.iter().flat_map(|r| r.split_whitespace()).collect()
}
