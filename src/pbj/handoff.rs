//! # Shell Hand-off
//!
//! A child process cannot change its parent shell's working directory or
//! environment. pbj instead writes a small hand-off file of shell
//! assignments that a wrapper function in the user's shell sources and then
//! deletes:
//!
//! ```text
//! CURRENT_CATEGORY="work"
//! NEWDIR="/home/me/src/api"
//! ```
//!
//! `NEWDIR` is only present when a directory change was requested. An empty
//! `CURRENT_CATEGORY` means the session has no override and the wrapper
//! should clear its variable, so the default category keeps applying. The file
//! name carries the parent (shell) process id so concurrent shell sessions do
//! not pick up each other's requests. Once written, the file belongs to the
//! wrapper; pbj never reads or removes it.

use crate::error::Result;
use crate::store::fs_backend::write_atomic;
use std::path::{Path, PathBuf};

/// A category and/or directory change for the invoking shell to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// `None` leaves the session without an override
    pub current_category: Option<String>,
    pub new_dir: Option<PathBuf>,
}

impl Handoff {
    pub fn new(current_category: impl Into<String>) -> Self {
        Self {
            current_category: Some(current_category.into()),
            new_dir: None,
        }
    }

    /// Drops the session's category override so the default category applies.
    pub fn clear_current() -> Self {
        Self::keep_current(None)
    }

    /// Keeps the session's category override as it is, including having none.
    pub fn keep_current(current_override: Option<&str>) -> Self {
        Self {
            current_category: current_override.map(str::to_string),
            new_dir: None,
        }
    }

    pub fn with_new_dir(mut self, dir: PathBuf) -> Self {
        self.new_dir = Some(dir);
        self
    }

    /// The file contents: one `KEY="value"` line per assignment.
    pub fn render(&self) -> String {
        let category = self.current_category.as_deref().unwrap_or_default();
        let mut out = format!("CURRENT_CATEGORY=\"{}\"\n", quote(category));
        if let Some(dir) = &self.new_dir {
            out.push_str(&format!("NEWDIR=\"{}\"\n", quote(&dir.to_string_lossy())));
        }
        out
    }

    /// Writes the hand-off file. The directory must already exist.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.render(), false)
    }
}

/// Escapes the characters that stay special inside double quotes.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
