//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every pbj operation, whatever the UI.
//!
//! The facade:
//! - **Owns session state**: the loaded bookmarks, the config and the current
//!   category of the invoking shell
//! - **Normalizes inputs**: raw `key|n` arguments become [`Selector`]s here,
//!   once, and a missing category argument falls back to the current one
//! - **Guards writes**: bookmarks or config loaded from an unreadable file are
//!   never written back
//! - **Persists config changes** returned by commands
//!
//! It does no printing and no prompting. Business logic stays in
//! `commands/*.rs`.
//!
//! `PbjApi<B: StorageBackend>` is generic over the storage backend:
//! production uses a file backend, tests use `MemBackend`.

use crate::commands;
use crate::config::PbjConfig;
use crate::error::{PbjError, Result};
use crate::model::Bookmarks;
use crate::paths::PbjPaths;
use crate::selector::Selector;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use std::path::Path;
use tracing::{debug, warn};

pub struct PbjApi<B: StorageBackend> {
    store: BookmarkStore<B>,
    bookmarks: Bookmarks,
    load_problem: Option<String>,
    config: PbjConfig,
    config_problem: Option<String>,
    unknown_keys: Vec<String>,
    paths: PbjPaths,
    current_override: Option<String>,
}

impl<B: StorageBackend> PbjApi<B> {
    /// Loads the bookmarks from `store`.
    pub fn new(store: BookmarkStore<B>, config: PbjConfig, paths: PbjPaths) -> Self {
        let loaded = store.load();
        Self {
            store,
            bookmarks: loaded.bookmarks,
            load_problem: loaded.problem,
            config,
            config_problem: None,
            unknown_keys: Vec::new(),
            paths,
            current_override: None,
        }
    }

    /// Sets the shell session's current category. Empty values are ignored.
    pub fn with_current_category(mut self, current: Option<String>) -> Self {
        self.current_override = current.filter(|c| !c.is_empty());
        self
    }

    pub fn with_unknown_keys(mut self, keys: Vec<String>) -> Self {
        self.unknown_keys = keys;
        self
    }

    /// Marks the config as a fallback for an unreadable config file. Nothing
    /// is written while it is set.
    pub fn with_config_problem(mut self, problem: Option<String>) -> Self {
        self.config_problem = problem;
        self
    }

    /// The session's current category, falling back to the default one.
    pub fn current_category(&self) -> &str {
        self.current_override
            .as_deref()
            .unwrap_or(&self.config.default_category)
    }

    pub fn config(&self) -> &PbjConfig {
        &self.config
    }

    pub fn paths(&self) -> &PbjPaths {
        &self.paths
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    /// Why the bookmarks file could not be loaded, if it could not.
    pub fn load_problem(&self) -> Option<&str> {
        self.load_problem.as_deref()
    }

    /// Why the config file could not be loaded, if it could not.
    pub fn config_problem(&self) -> Option<&str> {
        self.config_problem.as_deref()
    }

    /// Checks config/bookmarks consistency. Skipped while either file is
    /// unreadable, since the comparison would be meaningless.
    pub fn verify(&self) -> Result<()> {
        if self.load_problem.is_some() || self.config_problem.is_some() {
            return Ok(());
        }
        commands::config::verify(&self.bookmarks, &self.config)
    }

    /// `pbj <first> [second]`: with one argument, lists `first` if it is a
    /// category and otherwise resolves it in the current category; with two,
    /// resolves `second` in category `first`.
    pub fn open(&self, first: &str, second: Option<&str>) -> Result<commands::CmdResult> {
        match second {
            Some(input) => self.resolve(Some(first), input),
            None if self.bookmarks.contains_category(first) => self.list(Some(first)),
            None => self.resolve(None, first),
        }
    }

    pub fn list(&self, category: Option<&str>) -> Result<commands::CmdResult> {
        let category = category.unwrap_or(self.current_category());
        commands::list::run(
            &self.bookmarks,
            category,
            self.current_category(),
            &self.config.default_category,
        )
    }

    pub fn list_all(&self) -> Result<commands::CmdResult> {
        commands::list::all(
            &self.bookmarks,
            self.current_category(),
            &self.config.default_category,
        )
    }

    pub fn resolve(&self, category: Option<&str>, input: &str) -> Result<commands::CmdResult> {
        let category = category.unwrap_or(self.current_category());
        let selector = Selector::from(input);
        debug!(category, %selector, "resolving bookmark");
        commands::resolve::run(
            &self.bookmarks,
            self.current_override.as_deref(),
            category,
            &selector,
        )
    }

    pub fn save(
        &mut self,
        category: Option<&str>,
        key: &str,
        path: &str,
        mode: SaveMode,
    ) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        let category = category
            .map(str::to_string)
            .unwrap_or_else(|| self.current_category().to_string());
        commands::save::run(&self.store, &mut self.bookmarks, &category, key, path, mode)
    }

    pub fn delete_key(
        &mut self,
        category: Option<&str>,
        key: &str,
    ) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        let category = category
            .map(str::to_string)
            .unwrap_or_else(|| self.current_category().to_string());
        commands::delete::key(&self.store, &mut self.bookmarks, &category, key)
    }

    pub fn delete_category(&mut self, name: &str) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::delete::category(
            &self.store,
            &mut self.bookmarks,
            &self.config,
            self.current_override.as_deref(),
            name,
        )
    }

    /// Renames a category. If the default category was renamed but the config
    /// could not be saved, the bookmarks get the old name back.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        let result = commands::rename::category(
            &self.store,
            &mut self.bookmarks,
            &self.config,
            self.current_override.as_deref(),
            old,
            new,
        )?;
        if let Err(err) = self.apply_config(&result) {
            warn!(%err, old, new, "config not saved, restoring category name");
            let restored = commands::rename::category(
                &self.store,
                &mut self.bookmarks,
                &self.config,
                None,
                new,
                old,
            );
            if let Err(undo) = restored {
                warn!(%undo, old, new, "could not restore category name");
            }
            return Err(err);
        }
        Ok(result)
    }

    pub fn rename_key(
        &mut self,
        category: &str,
        old: &str,
        new: &str,
    ) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        commands::rename::key(&self.store, &mut self.bookmarks, category, old, new)
    }

    pub fn set_default(&mut self, name: &str) -> Result<commands::CmdResult> {
        self.ensure_config_writable()?;
        let result = commands::category::set_default(&self.bookmarks, &self.config, name)?;
        self.apply_config(&result)?;
        Ok(result)
    }

    pub fn set_current(&self, name: &str, input: Option<&str>) -> Result<commands::CmdResult> {
        let selector = input.map(Selector::from);
        commands::category::set_current(&self.bookmarks, name, selector.as_ref())
    }

    pub fn import(
        &mut self,
        category: Option<&str>,
        source: &Path,
    ) -> Result<commands::CmdResult> {
        self.ensure_writable()?;
        let category = category
            .map(str::to_string)
            .unwrap_or_else(|| self.current_category().to_string());
        commands::import::run(&self.store, &mut self.bookmarks, &category, source)
    }

    pub fn show_config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(
            &self.config,
            &self.paths.config_file,
            &self.unknown_keys,
            action,
        )
    }

    fn ensure_writable(&self) -> Result<()> {
        self.ensure_config_writable()?;
        match &self.load_problem {
            Some(problem) => Err(PbjError::StoreUnreadable(problem.clone())),
            None => Ok(()),
        }
    }

    fn ensure_config_writable(&self) -> Result<()> {
        match &self.config_problem {
            Some(problem) => Err(PbjError::ConfigUnreadable(problem.clone())),
            None => Ok(()),
        }
    }

    fn apply_config(&mut self, result: &commands::CmdResult) -> Result<()> {
        if let Some(config) = &result.config {
            if *config != self.config {
                self.ensure_config_writable()?;
                config.save(&self.paths.config_file, true)?;
                debug!(path = %self.paths.config_file.display(), "saved config");
                self.config = config.clone();
            }
        }
        Ok(())
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::save::SaveMode;
pub use commands::{CategoryListing, CmdMessage, CmdResult, MessageLevel};
