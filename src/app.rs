//! App Core for sbm.
//!
//! Holds the repository and the external collaborators, and runs one command
//! per invocation: load the store, apply the command, save.

use std::path::PathBuf;

use crate::config::Config;
use crate::managers::bookmark_manager::{
    BookmarkManager, BookmarkManagerTrait, NewRow, RowUpdate,
};
use crate::managers::split_tag_refs;
use crate::managers::tag_manager::{TagChange, TagManager, TagManagerTrait};
use crate::managers::Outcome;
use crate::services::content_fetcher::{ContentFetcher, HttpFetcher};
use crate::services::prompt::{ConfirmPrompt, LinePrompt};
use crate::services::query_engine::QueryEngine;
use crate::services::viewer::{SystemViewer, Viewer};
use crate::storage::{LoadOutcome, Repository};
use crate::types::bookmark::{Row, RowId, Tag};
use crate::types::errors::BookmarkError;
use crate::types::store::Store;

/// How `list` selects bookmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// Title substring, or `all`.
    Title(String),
    /// Tag references, any of which must match.
    Tags(Vec<String>),
}

/// One user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewRow),
    Update { id: RowId, update: RowUpdate },
    Remove(RowId),
    Open(RowId),
    List(ListQuery),
    TagAdd(String),
    TagRename { tag: String, name: String },
    TagRemove(String),
    TagList,
    /// Attach a tag to a bookmark, or detach it if already attached.
    TagAttach { row: RowId, tag: String },
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// The command ran and the store was saved. Holds lines to print.
    Done(Vec<String>),
    /// A confirmation was declined; nothing was saved.
    Aborted,
    /// First run: an empty store was created at this path and the command
    /// was not executed.
    Bootstrapped(PathBuf),
}

/// Central application struct.
pub struct App {
    config: Config,
    repository: Repository,
    fetcher: Box<dyn ContentFetcher>,
    viewer: Box<dyn Viewer>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl App {
    /// App with the HTTP fetcher, the system viewer and a stdin prompt.
    pub fn new(config: Config) -> Self {
        let fetcher = Box::new(HttpFetcher::from_config(&config));
        let viewer = Box::new(SystemViewer::from_config(&config));
        Self::with_collaborators(config, fetcher, viewer, Box::new(LinePrompt::stdio()))
    }

    pub fn with_collaborators(
        config: Config,
        fetcher: Box<dyn ContentFetcher>,
        viewer: Box<dyn Viewer>,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Self {
        let repository = Repository::new(&config);
        Self {
            config,
            repository,
            fetcher,
            viewer,
            prompt,
        }
    }

    /// Replaces the confirmation prompt.
    pub fn set_prompt(&mut self, prompt: Box<dyn ConfirmPrompt>) {
        self.prompt = prompt;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Runs `command` against the stored bookmarks.
    ///
    /// The store is saved only when the command succeeds. Errors and declined
    /// confirmations leave the file untouched.
    pub fn run(&mut self, command: Command) -> Result<RunResult, BookmarkError> {
        let mut store = match self.repository.load(self.prompt.as_mut())? {
            LoadOutcome::Loaded(store) => store,
            LoadOutcome::Created(path) => return Ok(RunResult::Bootstrapped(path)),
            LoadOutcome::Declined => return Ok(RunResult::Aborted),
        };

        match self.execute(&mut store, command)? {
            Outcome::Applied(lines) => {
                self.repository.save(&store)?;
                Ok(RunResult::Done(lines))
            }
            Outcome::Declined => {
                log::debug!("command declined, store not saved");
                Ok(RunResult::Aborted)
            }
        }
    }

    fn execute(
        &mut self,
        store: &mut Store,
        command: Command,
    ) -> Result<Outcome<Vec<String>>, BookmarkError> {
        let lines = match command {
            Command::Add(new_row) => {
                let added = BookmarkManager::new(store).add_row(new_row, self.fetcher.as_ref())?;
                let mut lines: Vec<String> = added
                    .skipped_tags
                    .iter()
                    .map(|t| format!("Skipped tag '{}'", t))
                    .collect();
                lines.extend(render_row(store, &added.row));
                lines
            }
            Command::Update { id, update } => {
                let outcome =
                    BookmarkManager::new(store).update_row(id, update, self.prompt.as_mut())?;
                match outcome {
                    Outcome::Applied(row) => render_row(store, &row),
                    Outcome::Declined => return Ok(Outcome::Declined),
                }
            }
            Command::Remove(id) => {
                let outcome = BookmarkManager::new(store).remove_row(id, self.prompt.as_mut())?;
                match outcome {
                    Outcome::Applied(row) => {
                        vec![format!("Removed bookmark {} '{}'", row.id, row.title)]
                    }
                    Outcome::Declined => return Ok(Outcome::Declined),
                }
            }
            Command::Open(id) => {
                let url = BookmarkManager::new(store).open_row(id)?.to_string();
                self.viewer.open(&url)?;
                Vec::new()
            }
            Command::List(ListQuery::Title(term)) => {
                let store: &Store = store;
                QueryEngine::new(store)
                    .list_by_title(&term)
                    .into_iter()
                    .flat_map(|row| render_row(store, row))
                    .collect()
            }
            Command::List(ListQuery::Tags(refs)) => {
                let engine = QueryEngine::new(store);
                engine
                    .list_by_tags(&split_tag_refs(&refs))?
                    .into_iter()
                    .map(|m| format!("{}. {}\n\t > {}", m.position, m.row.title, m.row.url))
                    .collect()
            }
            Command::TagAdd(name) => {
                let tag = TagManager::new(store).add_tag(&name)?;
                vec![render_tag(&tag)]
            }
            Command::TagRename { tag, name } => {
                let tag = TagManager::new(store).rename_tag(&tag, &name)?;
                vec![render_tag(&tag)]
            }
            Command::TagRemove(tag_ref) => {
                let outcome = TagManager::new(store).remove_tag(&tag_ref, self.prompt.as_mut())?;
                match outcome {
                    Outcome::Applied(removed) => vec![format!(
                        "Removed tag '{}' from {} bookmark(s)",
                        removed.tag.name, removed.detached_rows
                    )],
                    Outcome::Declined => return Ok(Outcome::Declined),
                }
            }
            Command::TagList => QueryEngine::new(store)
                .list_tags()
                .into_iter()
                .map(render_tag)
                .collect(),
            Command::TagAttach { row, tag } => {
                let change =
                    TagManager::new(store).assign_tag_to_row(row, &tag, self.prompt.as_mut())?;
                let change = match change {
                    Outcome::Applied(change) => change,
                    Outcome::Declined => return Ok(Outcome::Declined),
                };
                let mut lines = vec![match change {
                    TagChange::Added(tag) => format!("Tagged bookmark {} with '{}'", row, tag.name),
                    TagChange::Removed(tag) => {
                        format!("Removed tag '{}' from bookmark {}", tag.name, row)
                    }
                }];
                if let Some(updated) = store.row(row) {
                    lines.extend(render_row(store, updated));
                }
                lines
            }
        };
        Ok(Outcome::Applied(lines))
    }
}

/// Formats a bookmark for listing: number and title, URL, then the comment
/// and tag names when present.
pub fn render_row(store: &Store, row: &Row) -> Vec<String> {
    let mut lines = vec![format!("{:3}. {}\n\t > {}", row.id.get(), row.title, row.url)];
    if !row.comment.is_empty() {
        lines.push(format!("\t # {}", row.comment));
    }
    let names = QueryEngine::new(store).tag_names(row);
    if !names.is_empty() {
        let mut tags = String::from("\t |");
        for name in names {
            tags.push(' ');
            tags.push_str(name);
            tags.push_str(" |");
        }
        lines.push(tags);
    }
    lines
}

pub fn render_tag(tag: &Tag) -> String {
    format!("{}] {}", tag.id, tag.name)
}
