use crate::commands::helpers::commit;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PbjError, Result};
use crate::model::Bookmarks;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use crate::validation::{check_key_name, check_new_category_name, path_to_value, validate_directory};
use tracing::debug;

/// Whether saving may overwrite an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Reject keys that already exist.
    Safe,
    /// Overwrite an existing key.
    Replace,
}

/// Bookmarks `raw_path` as `key` in `category`, creating the category if it
/// does not exist yet.
pub fn run<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    category: &str,
    key: &str,
    raw_path: &str,
    mode: SaveMode,
) -> Result<CmdResult> {
    let creates_category = !bookmarks.contains_category(category);
    if creates_category {
        check_new_category_name(bookmarks, category)?;
    }
    check_key_name(bookmarks, key)?;
    if key == category {
        return Err(PbjError::Collision(format!(
            "key '{}' would have the same name as its category",
            key
        )));
    }

    let existing = bookmarks.get(category, key).map(str::to_string);
    if existing.is_some() && mode == SaveMode::Safe {
        return Err(PbjError::Collision(format!(
            "key '{}' already exists in category '{}' (use replace to overwrite it)",
            key, category
        )));
    }

    let dir = validate_directory(raw_path)?;
    if let Some(owner) = bookmarks.key_for_path(category, &dir, Some(key)) {
        return Err(PbjError::Collision(format!(
            "{} is already saved as '{}' in category '{}'",
            dir.display(),
            owner,
            category
        )));
    }

    let value = path_to_value(&dir);
    let mut staged = bookmarks.clone();
    staged.insert(category, key, value.clone());
    debug!(category, key, path = %value, ?mode, "saving bookmark");

    let mut result = CmdResult::default();
    commit(store, bookmarks, staged, &mut result)?;

    if creates_category {
        result.add_message(CmdMessage::info(format!("Created category '{}'", category)));
    }
    let verb = match existing {
        Some(_) => "Replaced",
        None => "Saved",
    };
    result.add_message(CmdMessage::success(format!(
        "{} {} -> {} in '{}'",
        verb, key, value, category
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn test_save_into_empty_store() {
        let mut f = StoreFixture::new();
        let dir = f.dir("api");

        let result = run(&f.store, &mut f.bookmarks, "proj", "api", &dir, SaveMode::Safe).unwrap();

        assert_eq!(f.bookmarks.get("proj", "api"), Some(dir.as_str()));
        assert_eq!(f.store.load().bookmarks, f.bookmarks);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Created category 'proj'"));
    }

    #[test]
    fn test_safe_save_never_overwrites() {
        let mut f = StoreFixture::new();
        let dir = f.dir("api");
        run(&f.store, &mut f.bookmarks, "proj", "api", &dir, SaveMode::Safe).unwrap();
        let writes = f.store.backend.write_count();

        let err = run(&f.store, &mut f.bookmarks, "proj", "api", &dir, SaveMode::Safe);
        assert!(matches!(err, Err(PbjError::Collision(_))));
        assert_eq!(f.store.backend.write_count(), writes);
    }

    #[test]
    fn test_replace_overwrites_key() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let other = f.dir("other");

        let result = run(
            &f.store,
            &mut f.bookmarks,
            "proj",
            "api",
            &other,
            SaveMode::Replace,
        )
        .unwrap();

        assert_eq!(f.bookmarks.get("proj", "api"), Some(other.as_str()));
        assert!(result.messages.iter().any(|m| m.content.starts_with("Replaced")));
    }

    #[test]
    fn test_replace_with_same_directory() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let same = f.bookmarks.get("proj", "api").unwrap().to_string();
        assert!(run(&f.store, &mut f.bookmarks, "proj", "api", &same, SaveMode::Replace).is_ok());
    }

    #[test]
    fn test_rejects_directory_already_in_category() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let taken = f.bookmarks.get("proj", "api").unwrap().to_string();

        let err = run(&f.store, &mut f.bookmarks, "proj", "server", &taken, SaveMode::Replace);
        assert!(matches!(err, Err(PbjError::Collision(_))));
        assert_eq!(f.bookmarks.get("proj", "server"), None);
    }

    #[test]
    fn test_same_directory_in_other_category_is_fine() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let taken = f.bookmarks.get("proj", "api").unwrap().to_string();
        assert!(run(&f.store, &mut f.bookmarks, "work", "api", &taken, SaveMode::Safe).is_ok());
    }

    #[test]
    fn test_rejects_missing_directory() {
        let mut f = StoreFixture::new();
        let missing = f.dirs.path().join("missing").to_string_lossy().into_owned();
        let err = run(&f.store, &mut f.bookmarks, "proj", "api", &missing, SaveMode::Safe);
        assert!(matches!(err, Err(PbjError::InvalidDirectory { .. })));
        assert_eq!(f.store.backend.write_count(), 0);
    }

    #[test]
    fn test_rejects_invalid_names() {
        let mut f = StoreFixture::new();
        let dir = f.dir("api");
        assert!(matches!(
            run(&f.store, &mut f.bookmarks, "pr0j", "api", &dir, SaveMode::Safe),
            Err(PbjError::InvalidCategory { .. })
        ));
        assert!(matches!(
            run(&f.store, &mut f.bookmarks, "proj", "42", &dir, SaveMode::Safe),
            Err(PbjError::InvalidKey { .. })
        ));
        assert!(f.bookmarks.is_empty());
    }

    #[test]
    fn test_key_cannot_match_a_category() {
        let mut f = StoreFixture::new().with_category("work");
        let dir = f.dir("api");
        assert!(matches!(
            run(&f.store, &mut f.bookmarks, "proj", "work", &dir, SaveMode::Safe),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            run(&f.store, &mut f.bookmarks, "proj", "proj", &dir, SaveMode::Safe),
            Err(PbjError::Collision(_))
        ));
    }

    #[test]
    fn test_new_category_cannot_match_a_key() {
        let mut f = StoreFixture::new().with_entry("proj", "work");
        let dir = f.dir("api");
        assert!(matches!(
            run(&f.store, &mut f.bookmarks, "work", "api", &dir, SaveMode::Safe),
            Err(PbjError::Collision(_))
        ));
    }

    #[test]
    fn test_write_failure_leaves_bookmarks_untouched() {
        let mut f = StoreFixture::new();
        let dir = f.dir("api");
        f.store.backend.set_simulate_write_error(true);
        assert!(run(&f.store, &mut f.bookmarks, "proj", "api", &dir, SaveMode::Safe).is_err());
        assert!(f.bookmarks.is_empty());
    }
}
