//! # Storage Layer
//!
//! The bookmarks document is a single JSON object mapping category names to
//! objects that map key names to absolute directory paths:
//!
//! ```text
//! {
//!     "default": {
//!         "bookmarks": "/home/me/.config/pbj"
//!     },
//!     "work": {
//!         "api": "/home/me/src/api",
//!         "report": "/home/me/docs/report"
//!     }
//! }
//! ```
//!
//! Every invocation of the CLI loads the whole document, mutates it in memory
//! and rewrites it in full. There is no locking: two processes saving at the
//! same time race, and the last writer wins. Writes go through a temp file and
//! a rename, so an interrupted process leaves the last complete document.
//!
//! ## Layout
//!
//! - [`backend::StorageBackend`]: raw document I/O
//! - [`fs_backend::FsBackend`]: file-based backend (production)
//! - [`mem_backend::MemBackend`]: in-memory backend (testing)
//! - [`BookmarkStore`]: decoding, canonical ordering, duplicate pruning and
//!   first-run seeding, shared by both backends
//!
//! ## Canonical Form
//!
//! Categories and keys are kept in lexicographic order (see
//! [`crate::model::Bookmarks`]). On every save, keys whose directory is
//! already held by an earlier key of the same category are pruned and
//! reported back to the caller.

use crate::error::{PbjError, Result};
use crate::model::{Bookmarks, PrunedEntry};
use crate::validation::{expand_path, path_to_value};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

use backend::StorageBackend;

/// Category and key created by [`BookmarkStore::first_run_init`].
pub const SEED_CATEGORY: &str = "default";
pub const SEED_KEY: &str = "bookmarks";

/// Result of reading the bookmarks document.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub bookmarks: Bookmarks,
    /// Set when the document existed but could not be read or decoded. The
    /// bookmarks are empty in that case and must not be written back.
    pub problem: Option<String>,
}

impl Loaded {
    pub fn is_degraded(&self) -> bool {
        self.problem.is_some()
    }
}

pub struct BookmarkStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> BookmarkStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Reads the document. A missing document is an empty store; an unreadable
    /// or malformed one is reported and also yields an empty store.
    pub fn load(&self) -> Loaded {
        let location = self.backend.location();
        let raw = match self.backend.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(path = %location.display(), "bookmarks file missing, starting empty");
                return Loaded::default();
            }
            Err(e) => {
                warn!(path = %location.display(), error = %e, "failed to read bookmarks file");
                return Loaded {
                    bookmarks: Bookmarks::new(),
                    problem: Some(format!("could not read {}: {}", location.display(), e)),
                };
            }
        };

        match serde_json::from_str::<Bookmarks>(&raw) {
            Ok(bookmarks) => {
                debug!(path = %location.display(), "loaded bookmarks");
                Loaded {
                    bookmarks,
                    problem: None,
                }
            }
            Err(e) => {
                warn!(path = %location.display(), error = %e, "failed to decode bookmarks file");
                Loaded {
                    bookmarks: Bookmarks::new(),
                    problem: Some(format!("could not decode {}: {}", location.display(), e)),
                }
            }
        }
    }

    /// Prunes duplicate directories, then writes the whole document in
    /// canonical form. Returns the pruned entries.
    pub fn save(&self, bookmarks: &mut Bookmarks) -> Result<Vec<PrunedEntry>> {
        let pruned = bookmarks.prune_duplicates();
        for entry in &pruned {
            info!(
                category = %entry.category,
                key = %entry.key,
                path = %entry.path,
                "pruned duplicate directory"
            );
        }

        let content = to_pretty_json(bookmarks)?;
        self.backend.write(&content)?;
        Ok(pruned)
    }

    /// Seeds the document on first run: a `default` category holding one key,
    /// `bookmarks`, pointing at the directory that contains the document.
    ///
    /// Returns the seeded bookmarks, or `None` if a document already exists.
    pub fn first_run_init(&self) -> Result<Option<Bookmarks>> {
        if self.backend.read()?.is_some() {
            return Ok(None);
        }

        let location = expand_path(&path_to_value(&self.backend.location()));
        let parent = location.parent().map(|p| p.to_path_buf()).ok_or_else(|| {
            PbjError::Config(format!(
                "bookmarks file {} has no parent directory",
                location.display()
            ))
        })?;

        let mut seeded = Bookmarks::new();
        seeded.insert(SEED_CATEGORY, SEED_KEY, path_to_value(&parent));
        self.save(&mut seeded)?;
        info!(path = %location.display(), "created bookmarks file");
        Ok(Some(seeded))
    }
}

/// Serializes with the canonical 4-space indent and a trailing newline.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    Ok(out)
}
