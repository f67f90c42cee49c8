use crate::commands::helpers::commit;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PbjError, Result};
use crate::model::Bookmarks;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use crate::validation::{check_key_name, check_new_category_name, path_to_value, validate_directory};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Imports a JSON object of `key -> directory` pairs into `category`.
///
/// Entries that fail validation, keys the category already has, and
/// directories it already holds are skipped with a warning. Everything else
/// is saved in one write.
pub fn run<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    category: &str,
    source: &Path,
) -> Result<CmdResult> {
    let content = fs::read_to_string(source).map_err(PbjError::Io)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| PbjError::InvalidImport {
        path: source.display().to_string(),
        reason: e.to_string(),
    })?;
    let Value::Object(entries) = value else {
        return Err(PbjError::InvalidImport {
            path: source.display().to_string(),
            reason: "expected a JSON object of key/directory pairs".to_string(),
        });
    };

    let creates_category = !bookmarks.contains_category(category);
    if creates_category {
        check_new_category_name(bookmarks, category)?;
    }

    let mut result = CmdResult::default();
    let mut staged = bookmarks.clone();
    staged.add_category(category);
    let mut imported = 0;

    for (key, raw) in &entries {
        let Value::String(raw) = raw else {
            result.add_message(CmdMessage::warning(format!(
                "Skipped '{}': value is not a path",
                key
            )));
            continue;
        };
        match stage_entry(&staged, category, key, raw) {
            Ok(value) => {
                debug!(category, key = %key, path = %value, "importing bookmark");
                staged.insert(category, key.clone(), value);
                imported += 1;
            }
            Err(e) => result.add_message(CmdMessage::warning(format!("Skipped '{}': {}", key, e))),
        }
    }

    if imported == 0 {
        result.add_message(CmdMessage::info(format!(
            "Nothing imported from {}",
            source.display()
        )));
        return Ok(result);
    }

    commit(store, bookmarks, staged, &mut result)?;
    if creates_category {
        result.add_message(CmdMessage::info(format!("Created category '{}'", category)));
    }
    result.add_message(CmdMessage::success(format!(
        "Imported {} of {} entries into '{}'",
        imported,
        entries.len(),
        category
    )));
    Ok(result)
}

fn stage_entry(staged: &Bookmarks, category: &str, key: &str, raw: &str) -> Result<String> {
    check_key_name(staged, key)?;
    if key == category {
        return Err(PbjError::Collision(format!(
            "key '{}' would have the same name as its category",
            key
        )));
    }
    if staged.get(category, key).is_some() {
        return Err(PbjError::Collision(format!(
            "key '{}' already exists in category '{}'",
            key, category
        )));
    }
    let dir = validate_directory(raw)?;
    if let Some(owner) = staged.key_for_path(category, &dir, None) {
        return Err(PbjError::Collision(format!(
            "{} is already saved as '{}'",
            dir.display(),
            owner
        )));
    }
    Ok(path_to_value(&dir))
}
