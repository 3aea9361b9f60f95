//! Read-only queries over the bookmark store.

use crate::managers::tag_manager::resolve_tag_ref;
use crate::types::bookmark::{Row, Tag, TagId};
use crate::types::errors::BookmarkError;
use crate::types::store::Store;

/// Term that lists every bookmark instead of matching titles.
pub const LIST_ALL_TERM: &str = "all";

/// A bookmark matched by a tag filter, with its slot position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedMatch<'s> {
    pub position: usize,
    pub row: &'s Row,
}

/// Query engine borrowing a store.
pub struct QueryEngine<'a> {
    store: &'a Store,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Live bookmarks in stored order.
    pub fn list_all(&self) -> Vec<&'a Row> {
        self.store.rows().iter().map(|(_, row)| row).collect()
    }

    /// Bookmarks whose title contains `term`, ignoring case.
    /// The term `all` lists everything.
    pub fn list_by_title(&self, term: &str) -> Vec<&'a Row> {
        if term.eq_ignore_ascii_case(LIST_ALL_TERM) {
            return self.list_all();
        }
        let needle = term.to_lowercase();
        self.store
            .rows()
            .iter()
            .map(|(_, row)| row)
            .filter(|row| row.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Bookmarks carrying at least one of the referenced tags.
    ///
    /// Every reference must resolve to a live tag.
    pub fn list_by_tags(&self, refs: &[&str]) -> Result<Vec<TaggedMatch<'a>>, BookmarkError> {
        let wanted = refs
            .iter()
            .map(|token| {
                resolve_tag_ref(self.store, token)
                    .and_then(|index| self.store.tags().get(index))
                    .map(|tag| tag.id)
                    .ok_or_else(|| BookmarkError::TagNotFound(token.to_string()))
            })
            .collect::<Result<Vec<TagId>, _>>()?;

        Ok(self
            .store
            .rows()
            .iter()
            .filter(|(_, row)| wanted.iter().any(|id| row.tags.contains(*id)))
            .map(|(position, row)| TaggedMatch { position, row })
            .collect())
    }

    /// Live tags in stored order.
    pub fn list_tags(&self) -> Vec<&'a Tag> {
        self.store.tags().iter().map(|(_, tag)| tag).collect()
    }

    /// Names of the tags in `row`'s occupied slots, in slot order.
    pub fn tag_names(&self, row: &Row) -> Vec<&'a str> {
        row.tags
            .ids()
            .filter_map(|id| self.store.tag(id))
            .map(|tag| tag.name.as_str())
            .collect()
    }
}
