//! Tag Manager for sbm.
//!
//! Owns the tag vocabulary and every operation that touches the link
//! between tags and bookmark tag slots: creating, renaming and removing
//! tags, and attaching a tag to a bookmark (or detaching it again).
//!
//! Invariant kept here: every occupied tag slot of every live bookmark names
//! a live tag. Removing a tag therefore walks all bookmarks.

use crate::managers::Outcome;
use crate::services::prompt::ConfirmPrompt;
use crate::types::bookmark::{
    truncate_bounded, RowId, SlotsFull, Tag, TagId, TagSlots, ROW_TAG_CAPACITY, TAG_NAME_MAX,
};
use crate::types::errors::BookmarkError;
use crate::types::store::Store;

/// Words that cannot be used as tag names because they are commands.
pub const RESERVED_TAG_NAMES: [&str; 6] = ["add", "update", "rename", "remove", "list", "all"];

/// Character that replaces spaces in tag names.
pub const TAG_NAME_SEPARATOR: char = '-';

/// Trait defining tag management operations.
pub trait TagManagerTrait {
    fn add_tag(&mut self, name: &str) -> Result<Tag, BookmarkError>;
    fn rename_tag(&mut self, tag_ref: &str, new_name: &str) -> Result<Tag, BookmarkError>;
    fn remove_tag(
        &mut self,
        tag_ref: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<RemovedTag>, BookmarkError>;
    fn assign_tag_to_row(
        &mut self,
        row_id: RowId,
        tag_ref: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<TagChange>, BookmarkError>;
}

/// What happened to a bookmark's tags after an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChange {
    Added(Tag),
    /// The tag was already present and the user agreed to detach it.
    Removed(Tag),
}

/// A deleted tag and the number of bookmarks it was detached from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTag {
    pub tag: Tag,
    pub detached_rows: usize,
}

/// Tag manager operating on a borrowed store.
pub struct TagManager<'a> {
    store: &'a mut Store,
}

impl<'a> TagManager<'a> {
    /// Creates a new `TagManager` over the given store.
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Resolves `tag_ref` to a live tag or fails with `TagNotFound`.
    fn live_tag(&self, tag_ref: &str) -> Result<Tag, BookmarkError> {
        resolve_tag_ref(self.store, tag_ref)
            .and_then(|index| self.store.tags().get(index))
            .cloned()
            .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))
    }

    /// Rejects `name` if another live tag already uses it.
    fn ensure_unique(&self, name: &str, except: Option<TagId>) -> Result<(), BookmarkError> {
        let clash = self
            .store
            .tag_index_by_name(name)
            .and_then(|index| self.store.tags().get(index))
            .filter(|tag| Some(tag.id) != except);
        match clash {
            Some(tag) => Err(BookmarkError::Validation(format!(
                "tag '{}' already exists with ID {}",
                tag.name, tag.id
            ))),
            None => Ok(()),
        }
    }
}

impl<'a> TagManagerTrait for TagManager<'a> {
    /// Validates and normalizes `name`, then creates the tag with the next ID.
    fn add_tag(&mut self, name: &str) -> Result<Tag, BookmarkError> {
        let name = validate_tag_name(name)?;
        self.ensure_unique(&name, None)?;

        let tag = self.store.insert_tag(|id| Tag { id, name })?.clone();
        log::info!("added tag {} '{}'", tag.id, tag.name);
        Ok(tag)
    }

    fn rename_tag(&mut self, tag_ref: &str, new_name: &str) -> Result<Tag, BookmarkError> {
        let current = self.live_tag(tag_ref)?;
        let name = validate_tag_name(new_name)?;
        self.ensure_unique(&name, Some(current.id))?;

        let index = self
            .store
            .tag_index(current.id)
            .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))?;
        let tag = self
            .store
            .tags_mut()
            .get_mut(index)
            .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))?;
        tag.name = name;
        log::info!("renamed tag {} from '{}' to '{}'", tag.id, current.name, tag.name);
        Ok(tag.clone())
    }

    /// Deletes a tag after confirmation and clears it from every bookmark.
    fn remove_tag(
        &mut self,
        tag_ref: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<RemovedTag>, BookmarkError> {
        let index = resolve_tag_ref(self.store, tag_ref)
            .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))?;
        let tag = self
            .store
            .tags()
            .get(index)
            .cloned()
            .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))?;

        if !prompt.confirm(&format!("Are you sure you want to remove tag '{}'?", tag.name)) {
            return Ok(Outcome::Declined);
        }

        let mut detached_rows = 0;
        for (_, row) in self.store.rows_mut().iter_mut() {
            if row.tags.remove(tag.id) {
                row.touch();
                detached_rows += 1;
            }
        }
        self.store.tags_mut().tombstone(index);
        log::info!(
            "removed tag {} '{}' from {} bookmark(s)",
            tag.id,
            tag.name,
            detached_rows
        );

        Ok(Outcome::Applied(RemovedTag { tag, detached_rows }))
    }

    /// Attaches a tag to a bookmark, or detaches it (after confirmation) if
    /// the bookmark already carries it.
    fn assign_tag_to_row(
        &mut self,
        row_id: RowId,
        tag_ref: &str,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<TagChange>, BookmarkError> {
        let mut slots = self
            .store
            .row(row_id)
            .map(|row| row.tags)
            .ok_or_else(|| BookmarkError::RowNotFound(row_id.to_string()))?;

        let change = match toggle_tag(self.store, &mut slots, row_id, tag_ref, prompt)? {
            Outcome::Applied(change) => change,
            Outcome::Declined => return Ok(Outcome::Declined),
        };

        let row = self
            .store
            .row_mut(row_id)
            .ok_or_else(|| BookmarkError::RowNotFound(row_id.to_string()))?;
        row.tags = slots;
        row.touch();
        Ok(Outcome::Applied(change))
    }
}

/// Finds the slot index of the live tag named by `token`.
///
/// All-digit tokens are tag IDs; anything else is a name compared
/// case-insensitively after the same space normalization names get on
/// creation, so `work stuff` finds `work-stuff`.
pub fn resolve_tag_ref(store: &Store, token: &str) -> Option<usize> {
    let token = token.trim();
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        TagId::parse(token).and_then(|id| store.tag_index(id))
    } else {
        store.tag_index_by_name(&normalize_tag_name(token))
    }
}

fn normalize_tag_name(name: &str) -> String {
    let joined = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&TAG_NAME_SEPARATOR.to_string());
    truncate_bounded(&joined, TAG_NAME_MAX)
}

/// Checks a proposed tag name and returns its stored form.
///
/// Names may not be empty, start with a digit or be a reserved command word.
/// Spaces become [`TAG_NAME_SEPARATOR`]; over-long names are truncated.
pub fn validate_tag_name(name: &str) -> Result<String, BookmarkError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BookmarkError::Validation(
            "tag names cannot be empty".to_string(),
        ));
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(BookmarkError::Validation(format!(
            "tag names cannot begin with a number: '{}'",
            trimmed
        )));
    }

    let normalized = normalize_tag_name(trimmed);
    if RESERVED_TAG_NAMES
        .iter()
        .any(|word| word.eq_ignore_ascii_case(&normalized))
    {
        return Err(BookmarkError::Validation(format!(
            "tag names cannot be set to reserved terms: '{}'",
            normalized
        )));
    }

    Ok(normalized)
}

/// Applies toggle semantics for one tag reference to a copy of a bookmark's
/// slots. The caller decides whether to commit `slots`.
pub(crate) fn toggle_tag(
    store: &Store,
    slots: &mut TagSlots,
    row_id: RowId,
    tag_ref: &str,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<Outcome<TagChange>, BookmarkError> {
    let tag = resolve_tag_ref(store, tag_ref)
        .and_then(|index| store.tags().get(index))
        .cloned()
        .ok_or_else(|| BookmarkError::TagNotFound(tag_ref.to_string()))?;

    if slots.contains(tag.id) {
        let question = format!(
            "Are you sure you want to remove tag '{}' from bookmark {}?",
            tag.name, row_id
        );
        if !prompt.confirm(&question) {
            return Ok(Outcome::Declined);
        }
        slots.remove(tag.id);
        return Ok(Outcome::Applied(TagChange::Removed(tag)));
    }

    match slots.insert(tag.id) {
        Ok(_) => Ok(Outcome::Applied(TagChange::Added(tag))),
        Err(SlotsFull) => Err(BookmarkError::CapacityExceeded(format!(
            "bookmark {} already has {} tags",
            row_id, ROW_TAG_CAPACITY
        ))),
    }
}
