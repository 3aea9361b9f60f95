//! File-backed persistence for the bookmark store.
//!
//! A [`Repository`] owns the path of the store document. Each run loads the
//! whole document once and rewrites it once at the end.

use std::fs;
use std::path::{Path, PathBuf};

use super::codec;
use crate::config::Config;
use crate::services::prompt::ConfirmPrompt;
use crate::types::errors::PersistenceError;
use crate::types::store::Store;

/// Result of [`Repository::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store document was read and decoded.
    Loaded(Store),
    /// No document existed; an empty one was written at this path.
    Created(PathBuf),
    /// No document existed and the user declined to create one.
    Declined,
}

/// Store document on disk.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Repository at the store path named by `config`.
    pub fn new(config: &Config) -> Self {
        Self::at(config.store_path())
    }

    /// Repository at an explicit file path.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads and decodes the document.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Corrupt` if it does not decode.
    pub fn read(&self) -> Result<Store, PersistenceError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::Io(format!("{}: {}", self.path.display(), e)))?;
        let store = codec::decode(&text)?;
        log::debug!(
            "loaded {} bookmark(s) and {} tag(s) from {}",
            store.rows().live_count(),
            store.tags().live_count(),
            self.path.display()
        );
        Ok(store)
    }

    /// Loads the store, offering to create an empty one on first run.
    ///
    /// The parent directory is created when missing. A freshly created store
    /// is reported as [`LoadOutcome::Created`] rather than returned, so the
    /// caller stops and the user re-runs the command.
    pub fn load(&self, prompt: &mut dyn ConfirmPrompt) -> Result<LoadOutcome, PersistenceError> {
        self.ensure_parent_dir()?;

        if self.exists() {
            return self.read().map(LoadOutcome::Loaded);
        }

        let question = format!(
            "Could not find '{}'. Would you like to create a new store?",
            self.path.display()
        );
        if !prompt.confirm(&question) {
            log::debug!("store creation declined for {}", self.path.display());
            return Ok(LoadOutcome::Declined);
        }

        self.save(&Store::new())?;
        log::info!("created empty store at {}", self.path.display());
        Ok(LoadOutcome::Created(self.path.clone()))
    }

    /// Encodes `store` and overwrites the document.
    pub fn save(&self, store: &Store) -> Result<(), PersistenceError> {
        self.ensure_parent_dir()?;
        fs::write(&self.path, codec::encode(store))
            .map_err(|e| PersistenceError::Io(format!("{}: {}", self.path.display(), e)))?;
        log::debug!("saved store to {}", self.path.display());
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), PersistenceError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .map_err(|e| PersistenceError::Io(format!("{}: {}", dir.display(), e))),
            _ => Ok(()),
        }
    }
}
