use crate::commands::helpers::{commit, require_category, require_key};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::PbjConfig;
use crate::error::{PbjError, Result};
use crate::handoff::Handoff;
use crate::model::Bookmarks;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use tracing::info;

/// Deletes a category with all of its keys. The default category can never be
/// deleted. If the session's override named the deleted category, the
/// override is cleared and the session falls back to the default one.
pub fn category<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    config: &PbjConfig,
    current_override: Option<&str>,
    name: &str,
) -> Result<CmdResult> {
    if name == config.default_category {
        return Err(PbjError::ProtectedCategory(name.to_string()));
    }
    let removed = require_category(bookmarks, name)?.len();

    let mut staged = bookmarks.clone();
    staged.remove_category(name);

    let mut result = CmdResult::default();
    commit(store, bookmarks, staged, &mut result)?;
    info!(category = name, keys = removed, "deleted category");
    result.add_message(CmdMessage::success(format!(
        "Deleted category '{}' ({} {})",
        name,
        removed,
        if removed == 1 { "entry" } else { "entries" }
    )));

    if current_override == Some(name) {
        result = result.with_handoff(Handoff::clear_current());
        result.add_message(CmdMessage::info(format!(
            "Current category is now '{}'",
            config.default_category
        )));
    }
    Ok(result)
}

pub fn key<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    category: &str,
    key: &str,
) -> Result<CmdResult> {
    require_key(bookmarks, category, key)?;

    let mut staged = bookmarks.clone();
    staged.remove_key(category, key);

    let mut result = CmdResult::default();
    commit(store, bookmarks, staged, &mut result)?;
    info!(category, key, "deleted key");
    result.add_message(CmdMessage::success(format!(
        "Deleted '{}' from '{}'",
        key, category
    )));
    Ok(result)
}
