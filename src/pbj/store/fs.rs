use super::fs_backend::FsBackend;
use super::BookmarkStore;
use std::path::PathBuf;

pub type FileStore = BookmarkStore<FsBackend>;

impl FileStore {
    /// Opens the bookmarks document at `path`. `create_parents` should only be
    /// true when `path` lives in the application's own config directory.
    pub fn open(path: PathBuf, create_parents: bool) -> Self {
        BookmarkStore::with_backend(FsBackend::new(path).with_create_parents(create_parents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bookmarks;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bookmarks.json");
        let store = FileStore::open(path.clone(), false);

        let mut bookmarks = Bookmarks::new();
        bookmarks.insert("work", "api", "/srv/api");
        store.save(&mut bookmarks).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().bookmarks, bookmarks);
    }

    #[test]
    fn test_no_tmp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("bookmarks.json"), false);
        store.save(&mut Bookmarks::new()).unwrap();

        for entry in fs::read_dir(temp.path()).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn test_overridden_location_does_not_create_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("bookmarks.json");
        let store = FileStore::open(path.clone(), false);

        assert!(store.save(&mut Bookmarks::new()).is_err());
        assert!(!temp.path().join("missing").exists());
    }

    #[test]
    fn test_own_config_dir_is_created() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pbj").join("bookmarks.json");
        let store = FileStore::open(path.clone(), true);

        store.save(&mut Bookmarks::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_first_run_init_points_at_own_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bookmarks.json");
        let store = FileStore::open(path, false);

        let seeded = store.first_run_init().unwrap().unwrap();
        let expected = temp.path().to_string_lossy().into_owned();
        assert_eq!(seeded.get("default", "bookmarks"), Some(expected.as_str()));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bookmarks.json");
        fs::write(&path, "[1, 2").unwrap();

        let loaded = FileStore::open(path, false).load();
        assert!(loaded.is_degraded());
        assert!(loaded.bookmarks.is_empty());
    }
}
