//! # Configuration
//!
//! pbj keeps a small JSON config next to the default bookmarks file:
//!
//! ```text
//! ~/.config/pbj/
//! ├── config.json       # this file
//! └── bookmarks.json    # default bookmarks location
//! ```
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_category` | `default` | Category used when no current category is set |
//! | `bookmarks_file` | `<config dir>/bookmarks.json` | Location of the bookmarks document |
//!
//! Missing keys are filled in with their defaults and the file is rewritten.
//! Unknown keys are reported but do not stop pbj from running, and they are
//! written back untouched whenever pbj rewrites the file.

use crate::error::{PbjError, Result};
use crate::paths::PbjPaths;
use crate::store::fs_backend::write_atomic;
use crate::store::to_pretty_json;
use crate::validation::{expand_path, path_to_value};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORY: &str = "default";

const KEY_DEFAULT_CATEGORY: &str = "default_category";
const KEY_BOOKMARKS_FILE: &str = "bookmarks_file";
pub const KNOWN_KEYS: [&str; 2] = [KEY_DEFAULT_CATEGORY, KEY_BOOKMARKS_FILE];

/// Configuration for pbj, stored in `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PbjConfig {
    /// Category used when the shell session has no current category
    pub default_category: String,

    /// Location of the bookmarks document (may start with `~`)
    pub bookmarks_file: String,

    /// Keys pbj does not know about, kept as found
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A config read from disk, with what had to be repaired along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLoad {
    pub config: PbjConfig,
    /// Keys that were missing and got their default value
    pub backfilled: Vec<String>,
    /// Keys pbj does not know about
    pub unknown_keys: Vec<String>,
}

impl ConfigLoad {
    pub fn needs_rewrite(&self) -> bool {
        !self.backfilled.is_empty()
    }
}

impl PbjConfig {
    pub fn with_defaults(paths: &PbjPaths) -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            bookmarks_file: path_to_value(&paths.default_bookmarks_file),
            extra: Map::new(),
        }
    }

    /// Absolute location of the bookmarks document.
    pub fn bookmarks_path(&self) -> PathBuf {
        expand_path(&self.bookmarks_file)
    }

    /// Load the config at `path`. Returns `None` if the file does not exist.
    pub fn load(path: &Path, defaults: &PbjConfig) -> Result<Option<ConfigLoad>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(PbjError::Io)?;
        let value: Value = serde_json::from_str(&content).map_err(PbjError::Serialization)?;
        let Value::Object(map) = value else {
            return Err(PbjError::Config(format!(
                "{} must contain a JSON object",
                path.display()
            )));
        };

        Self::from_map(&map, defaults).map(Some)
    }

    fn from_map(map: &Map<String, Value>, defaults: &PbjConfig) -> Result<ConfigLoad> {
        let mut backfilled = Vec::new();

        let mut field = |key: &str, default: &str| -> Result<String> {
            match map.get(key) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Err(PbjError::Config(format!(
                    "'{}' must be a string, found {}",
                    key, other
                ))),
                None => {
                    backfilled.push(key.to_string());
                    Ok(default.to_string())
                }
            }
        };

        let default_category = field(KEY_DEFAULT_CATEGORY, &defaults.default_category)?;
        let bookmarks_file = field(KEY_BOOKMARKS_FILE, &defaults.bookmarks_file)?;

        let extra: Map<String, Value> = map
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let unknown_keys = extra.keys().cloned().collect();

        Ok(ConfigLoad {
            config: PbjConfig {
                default_category,
                bookmarks_file,
                extra,
            },
            backfilled,
            unknown_keys,
        })
    }

    /// Save config to `path`, creating its directory only if asked to.
    pub fn save(&self, path: &Path, create_parents: bool) -> Result<()> {
        let content = to_pretty_json(self)?;
        write_atomic(path, &content, create_parents)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            KEY_DEFAULT_CATEGORY => Some(self.default_category.clone()),
            KEY_BOOKMARKS_FILE => Some(self.bookmarks_file.clone()),
            _ => None,
        }
    }
}
