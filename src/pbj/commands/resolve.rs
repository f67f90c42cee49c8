use crate::commands::helpers::require_category;
use crate::commands::CmdResult;
use crate::error::{PbjError, Result};
use crate::handoff::Handoff;
use crate::model::Bookmarks;
use crate::selector::Selector;
use crate::validation::expand_path;
use std::path::PathBuf;

/// Resolves a selector within `category` to an absolute directory.
///
/// Ordinals are 1-based positions in the sorted key order. Nothing is checked
/// on disk: a bookmark whose directory has since disappeared still resolves.
pub fn resolve(bookmarks: &Bookmarks, category: &str, selector: &Selector) -> Result<PathBuf> {
    let entries = require_category(bookmarks, category)?;

    let value = match selector {
        Selector::ByOrdinal(n) => {
            if *n == 0 || *n > entries.len() {
                return Err(PbjError::OrdinalOutOfRange {
                    category: category.to_string(),
                    ordinal: *n,
                    count: entries.len(),
                });
            }
            entries.values().nth(n - 1)
        }
        Selector::ByName(name) => entries.get(name),
    };

    value
        .map(|v| expand_path(v))
        .ok_or_else(|| PbjError::KeyNotFound {
            category: category.to_string(),
            key: selector.to_string(),
        })
}

/// Resolves a bookmark and prepares the directory change for the shell. The
/// session's category override, or its absence, is passed through unchanged.
pub fn run(
    bookmarks: &Bookmarks,
    current_override: Option<&str>,
    category: &str,
    selector: &Selector,
) -> Result<CmdResult> {
    let dir = resolve(bookmarks, category, selector)?;
    Ok(CmdResult::default()
        .with_handoff(Handoff::keep_current(current_override).with_new_dir(dir.clone()))
        .with_resolved_dir(dir))
}
