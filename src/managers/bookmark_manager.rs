//! Bookmark Manager for sbm.
//!
//! Implements `BookmarkManagerTrait`: adding, updating, removing and opening
//! bookmarks in the in-memory [`Store`].

use crate::managers::tag_manager::{resolve_tag_ref, toggle_tag};
use crate::managers::{split_tag_refs, Outcome};
use crate::services::content_fetcher::ContentFetcher;
use crate::services::prompt::ConfirmPrompt;
use crate::types::bookmark::{
    now, truncate_bounded, Row, RowId, TagSlots, COMMENT_MAX, TITLE_MAX,
};
use crate::types::errors::BookmarkError;
use crate::types::store::Store;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn add_row(
        &mut self,
        new_row: NewRow,
        fetcher: &dyn ContentFetcher,
    ) -> Result<AddedRow, BookmarkError>;
    fn update_row(
        &mut self,
        id: RowId,
        update: RowUpdate,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<Row>, BookmarkError>;
    fn remove_row(
        &mut self,
        id: RowId,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<Row>, BookmarkError>;
    fn open_row(&self, id: RowId) -> Result<&str, BookmarkError>;
}

/// Input for a new bookmark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRow {
    pub url: String,
    /// Looked up from the page when `None`.
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Tag references; each entry may hold several space-separated tokens.
    pub tags: Vec<String>,
}

/// Fields to change on an existing bookmark. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUpdate {
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Tag references toggled one by one.
    pub tags: Option<Vec<String>>,
}

impl RowUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.comment.is_none() && self.tags.is_none()
    }
}

/// A freshly added bookmark plus the tag references that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedRow {
    pub row: Row,
    pub skipped_tags: Vec<String>,
}

/// Bookmark manager operating on a borrowed store.
pub struct BookmarkManager<'a> {
    store: &'a mut Store,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` over the given store.
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Resolves tag tokens for a new bookmark. Unknown tokens and tokens that
    /// no longer fit are returned instead of failing the add.
    fn collect_tags(&self, refs: &[String]) -> (TagSlots, Vec<String>) {
        let mut slots = TagSlots::new();
        let mut skipped = Vec::new();

        for token in split_tag_refs(refs) {
            let Some(tag) = resolve_tag_ref(self.store, token).and_then(|i| self.store.tags().get(i))
            else {
                log::warn!("skipping unknown tag '{}'", token);
                skipped.push(token.to_string());
                continue;
            };
            if slots.insert(tag.id).is_err() {
                log::warn!("skipping tag '{}': no free tag slots", tag.name);
                skipped.push(token.to_string());
            }
        }

        (slots, skipped)
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    /// Adds a bookmark. A missing title is looked up with `fetcher`; a page
    /// without a `<title>` gives an empty title.
    fn add_row(
        &mut self,
        new_row: NewRow,
        fetcher: &dyn ContentFetcher,
    ) -> Result<AddedRow, BookmarkError> {
        let url = new_row.url.trim().to_string();
        if url.is_empty() {
            return Err(BookmarkError::Validation("URL cannot be empty".to_string()));
        }

        let title = match new_row.title {
            Some(title) => title,
            None => {
                log::debug!("fetching title for {}", url);
                fetcher.fetch_title(&url)?.unwrap_or_default()
            }
        };
        let title = truncate_bounded(&title, TITLE_MAX);
        let comment = truncate_bounded(&new_row.comment.unwrap_or_default(), COMMENT_MAX);
        let (tags, skipped_tags) = self.collect_tags(&new_row.tags);

        let row = self
            .store
            .insert_row(|id| Row {
                id,
                url,
                title,
                comment,
                tags,
                updated_at: now(),
            })?
            .clone();
        log::info!("added bookmark {} ({})", row.id, row.url);

        Ok(AddedRow { row, skipped_tags })
    }

    /// Applies `update` to a copy of the bookmark and commits it only if
    /// every tag toggle went through.
    fn update_row(
        &mut self,
        id: RowId,
        update: RowUpdate,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<Row>, BookmarkError> {
        let mut staged = self
            .store
            .row(id)
            .cloned()
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))?;

        if let Some(title) = update.title {
            staged.title = truncate_bounded(&title, TITLE_MAX);
        }
        if let Some(comment) = update.comment {
            staged.comment = truncate_bounded(&comment, COMMENT_MAX);
        }
        if let Some(refs) = update.tags {
            for token in split_tag_refs(&refs) {
                let outcome = toggle_tag(self.store, &mut staged.tags, id, token, prompt)?;
                if outcome.is_declined() {
                    return Ok(Outcome::Declined);
                }
            }
        }
        staged.touch();

        let row = self
            .store
            .row_mut(id)
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))?;
        *row = staged;
        log::info!("updated bookmark {}", id);
        Ok(Outcome::Applied(row.clone()))
    }

    /// Deletes a bookmark after confirmation. Tags are left alone.
    fn remove_row(
        &mut self,
        id: RowId,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<Outcome<Row>, BookmarkError> {
        let index = self
            .store
            .row_index(id)
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))?;

        if !prompt.confirm(&format!("Are you sure you want to remove bookmark {}?", id)) {
            return Ok(Outcome::Declined);
        }

        let row = self
            .store
            .rows_mut()
            .tombstone(index)
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))?;
        log::info!("removed bookmark {} ({})", row.id, row.url);
        Ok(Outcome::Applied(row))
    }

    fn open_row(&self, id: RowId) -> Result<&str, BookmarkError> {
        self.store
            .row(id)
            .map(|row| row.url.as_str())
            .ok_or_else(|| BookmarkError::RowNotFound(id.to_string()))
    }
}
