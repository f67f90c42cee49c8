use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PbjError, Result};
use crate::model::{Bookmarks, Category};
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;

pub fn require_category<'a>(bookmarks: &'a Bookmarks, name: &str) -> Result<&'a Category> {
    bookmarks
        .category(name)
        .ok_or_else(|| PbjError::CategoryNotFound(name.to_string()))
}

pub fn require_key(bookmarks: &Bookmarks, category: &str, key: &str) -> Result<()> {
    let entries = require_category(bookmarks, category)?;
    if !entries.contains_key(key) {
        return Err(PbjError::KeyNotFound {
            category: category.to_string(),
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Persists `staged` and, once the write succeeded, makes it the live
/// bookmarks. Pruned duplicates are recorded on `result` as warnings.
pub fn commit<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    mut staged: Bookmarks,
    result: &mut CmdResult,
) -> Result<()> {
    let pruned = store.save(&mut staged)?;
    for entry in &pruned {
        result.add_message(CmdMessage::warning(format!(
            "Removed duplicate directory {}",
            entry
        )));
    }
    result.pruned.extend(pruned);
    *bookmarks = staged;
    Ok(())
}
