use crate::commands::helpers::{commit, require_category, require_key};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::PbjConfig;
use crate::error::Result;
use crate::handoff::Handoff;
use crate::model::Bookmarks;
use crate::store::backend::StorageBackend;
use crate::store::BookmarkStore;
use crate::validation::{check_new_category_name, check_new_key_name};
use tracing::info;

/// Renames a category. A renamed default category is carried over into the
/// returned config, and a renamed session override into a hand-off.
pub fn category<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    config: &PbjConfig,
    current_override: Option<&str>,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    require_category(bookmarks, old)?;
    check_new_category_name(bookmarks, new)?;

    let mut staged = bookmarks.clone();
    staged.rename_category(old, new);

    let mut result = CmdResult::default();
    commit(store, bookmarks, staged, &mut result)?;
    info!(old, new, "renamed category");
    result.add_message(CmdMessage::success(format!(
        "Renamed category '{}' to '{}'",
        old, new
    )));

    if config.default_category == old {
        let mut updated = config.clone();
        updated.default_category = new.to_string();
        result = result.with_config(updated);
        result.add_message(CmdMessage::info(format!(
            "Default category is now '{}'",
            new
        )));
    }
    if current_override == Some(old) {
        result = result.with_handoff(Handoff::new(new));
    }
    Ok(result)
}

/// Renames a key within its category.
pub fn key<B: StorageBackend>(
    store: &BookmarkStore<B>,
    bookmarks: &mut Bookmarks,
    category: &str,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    require_key(bookmarks, category, old)?;
    check_new_key_name(bookmarks, category, new)?;

    let mut staged = bookmarks.clone();
    staged.rename_key(category, old, new);

    let mut result = CmdResult::default();
    commit(store, bookmarks, staged, &mut result)?;
    info!(category, old, new, "renamed key");
    result.add_message(CmdMessage::success(format!(
        "Renamed '{}' to '{}' in '{}'",
        old, new, category
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PbjError;
    use crate::store::memory::fixtures::StoreFixture;

    fn config(default: &str) -> PbjConfig {
        PbjConfig {
            default_category: default.to_string(),
            bookmarks_file: "/mem/bookmarks.json".to_string(),
            extra: Default::default(),
        }
    }

    /// Renames `proj` to `work` with the given default category and override.
    fn rename_proj(
        f: &mut StoreFixture,
        default: &str,
        current: Option<&str>,
    ) -> Result<CmdResult> {
        category(
            &f.store,
            &mut f.bookmarks,
            &config(default),
            current,
            "proj",
            "work",
        )
    }

    #[test]
    fn test_rename_category() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let result = rename_proj(&mut f, "home", None).unwrap();

        assert!(!f.bookmarks.contains_category("proj"));
        assert!(f.bookmarks.get("work", "api").is_some());
        assert!(result.config.is_none());
        assert!(result.handoff.is_none());
        assert_eq!(f.store.load().bookmarks, f.bookmarks);
    }

    #[test]
    fn test_rename_onto_existing_key_is_rejected() {
        let mut f = StoreFixture::new()
            .with_entry("proj", "api")
            .with_entry("home", "work");
        let before = f.bookmarks.clone();

        let err = rename_proj(&mut f, "home", None);
        assert!(matches!(err, Err(PbjError::Collision(_))));
        assert_eq!(f.bookmarks, before);
        assert_eq!(f.store.backend.write_count(), 0);
    }

    #[test]
    fn test_rename_onto_existing_category_is_rejected() {
        let mut f = StoreFixture::new().with_category("proj").with_category("work");
        assert!(matches!(
            rename_proj(&mut f, "home", None),
            Err(PbjError::Collision(_))
        ));
    }

    #[test]
    fn test_rename_missing_category() {
        let mut f = StoreFixture::new();
        assert!(matches!(
            rename_proj(&mut f, "home", None),
            Err(PbjError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_rename_default_category_updates_config() {
        let mut f = StoreFixture::new().with_category("proj");
        let result = rename_proj(&mut f, "proj", None).unwrap();
        assert_eq!(result.config.unwrap().default_category, "work");
        assert!(result.handoff.is_none());
    }

    #[test]
    fn test_rename_current_category_hands_off() {
        let mut f = StoreFixture::new().with_category("proj");
        let result = rename_proj(&mut f, "home", Some("proj")).unwrap();
        assert_eq!(result.handoff, Some(Handoff::new("work")));
    }

    #[test]
    fn test_rename_key() {
        let mut f = StoreFixture::new().with_entry("proj", "api");
        let path = f.bookmarks.get("proj", "api").unwrap().to_string();

        key(&f.store, &mut f.bookmarks, "proj", "api", "server").unwrap();

        assert_eq!(f.bookmarks.get("proj", "server"), Some(path.as_str()));
        assert_eq!(f.bookmarks.get("proj", "api"), None);
    }

    #[test]
    fn test_rename_key_rejections() {
        let mut f = StoreFixture::new()
            .with_entry("proj", "api")
            .with_entry("proj", "web")
            .with_category("work");

        assert!(matches!(
            key(&f.store, &mut f.bookmarks, "proj", "api", "web"),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            key(&f.store, &mut f.bookmarks, "proj", "api", "work"),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            key(&f.store, &mut f.bookmarks, "proj", "api", "v1."),
            Err(PbjError::InvalidKey { .. })
        ));
        assert!(matches!(
            key(&f.store, &mut f.bookmarks, "proj", "nope", "x"),
            Err(PbjError::KeyNotFound { .. })
        ));
        assert_eq!(f.store.backend.write_count(), 0);
    }
}
