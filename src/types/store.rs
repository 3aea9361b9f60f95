//! In-memory bookmark store.
//!
//! Rows and tags live in [`Table`]s whose slots are never compacted during a
//! run: deleting an entry leaves an empty slot behind, so indices handed out
//! earlier in the run stay valid. Empty slots are dropped when the store is
//! encoded.

use std::num::NonZeroU32;

use super::bookmark::{Row, RowId, Tag, TagId};
use super::errors::BookmarkError;

/// Slot-stable collection with tombstoned deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::with_entries(Vec::new())
    }
}

impl<T> Table<T> {
    /// Builds a table from live entries, keeping one spare slot for the
    /// common single-append case.
    pub fn with_entries(entries: Vec<T>) -> Self {
        let mut slots = Vec::with_capacity(entries.len() + 1);
        slots.extend(entries.into_iter().map(Some));
        let live = slots.len();
        Self { slots, live }
    }

    /// Appends an entry and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        self.slots.push(Some(value));
        self.live += 1;
        self.slots.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Marks the entry at `index` deleted and returns it.
    pub fn tombstone(&mut self, index: usize) -> Option<T> {
        let taken = self.slots.get_mut(index)?.take();
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Live entries with their slot index, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (i, value)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|value| (i, value)))
    }

    /// Index of the first live entry matching `pred`.
    pub fn position<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|(_, value)| pred(value)).map(|(i, _)| i)
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of slots, tombstoned ones included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// The complete bookmark store: rows, tags and their ID counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    rows: Table<Row>,
    tags: Table<Tag>,
    next_row: NonZeroU32,
    next_tag: NonZeroU32,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Empty store with both counters at 1.
    pub fn new() -> Self {
        Self {
            rows: Table::default(),
            tags: Table::default(),
            next_row: NonZeroU32::MIN,
            next_tag: NonZeroU32::MIN,
        }
    }

    /// Builds a store from decoded entries. Counters resume one past the
    /// highest ID present.
    pub fn from_parts(rows: Vec<Row>, tags: Vec<Tag>) -> Self {
        let next_row = rows
            .iter()
            .map(|r| r.id.get())
            .max()
            .and_then(|max| NonZeroU32::new(max.saturating_add(1)))
            .unwrap_or(NonZeroU32::MIN);
        let next_tag = tags
            .iter()
            .map(|t| t.id.get())
            .max()
            .and_then(|max| NonZeroU32::new(max.saturating_add(1)))
            .unwrap_or(NonZeroU32::MIN);
        Self {
            rows: Table::with_entries(rows),
            tags: Table::with_entries(tags),
            next_row,
            next_tag,
        }
    }

    pub fn rows(&self) -> &Table<Row> {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Table<Row> {
        &mut self.rows
    }

    pub fn tags(&self) -> &Table<Tag> {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Table<Tag> {
        &mut self.tags
    }

    /// The ID the next new row will receive.
    pub fn peek_next_row_id(&self) -> u32 {
        self.next_row.get()
    }

    /// The ID the next new tag will receive.
    pub fn peek_next_tag_id(&self) -> u32 {
        self.next_tag.get()
    }

    /// Consumes the next row ID.
    pub fn next_row_id(&mut self) -> Result<RowId, BookmarkError> {
        let id = self.next_row;
        self.next_row = id
            .checked_add(1)
            .ok_or_else(|| BookmarkError::CapacityExceeded("row ID space exhausted".to_string()))?;
        Ok(RowId::from(id))
    }

    /// Consumes the next tag ID.
    pub fn next_tag_id(&mut self) -> Result<TagId, BookmarkError> {
        let id = self.next_tag;
        self.next_tag = id
            .checked_add(1)
            .ok_or_else(|| BookmarkError::CapacityExceeded("tag ID space exhausted".to_string()))?;
        Ok(TagId::from(id))
    }

    /// Allocates a row ID, builds the row with it and appends it.
    pub fn insert_row<F>(&mut self, build: F) -> Result<&Row, BookmarkError>
    where
        F: FnOnce(RowId) -> Row,
    {
        let id = self.next_row_id()?;
        let index = self.rows.push(build(id));
        self.rows
            .get(index)
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))
    }

    /// Allocates a tag ID, builds the tag with it and appends it.
    pub fn insert_tag<F>(&mut self, build: F) -> Result<&Tag, BookmarkError>
    where
        F: FnOnce(TagId) -> Tag,
    {
        let id = self.next_tag_id()?;
        let index = self.tags.push(build(id));
        self.tags
            .get(index)
            .ok_or_else(|| BookmarkError::TagNotFound(id.to_string()))
    }

    pub fn row_index(&self, id: RowId) -> Option<usize> {
        self.rows.position(|row| row.id == id)
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.row_index(id).and_then(|i| self.rows.get(i))
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        let index = self.row_index(id)?;
        self.rows.get_mut(index)
    }

    pub fn tag_index(&self, id: TagId) -> Option<usize> {
        self.tags.position(|tag| tag.id == id)
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tag_index(id).and_then(|i| self.tags.get(i))
    }

    /// Index of the live tag whose name matches case-insensitively.
    pub fn tag_index_by_name(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.tags.position(|tag| tag.name.to_lowercase() == wanted)
    }
}
