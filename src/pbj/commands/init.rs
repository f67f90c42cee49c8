use crate::commands::{CmdMessage, CmdResult};
use crate::config::PbjConfig;
use crate::error::{PbjError, Result};
use crate::paths::PbjPaths;
use crate::store::fs::FileStore;
use tracing::{info, warn};

/// Everything first-run initialization produces.
pub struct Bootstrap {
    pub config: PbjConfig,
    pub unknown_keys: Vec<String>,
    /// Set when the config file could not be decoded and defaults are in use
    pub config_problem: Option<String>,
    pub store: FileStore,
    pub result: CmdResult,
}

/// Loads the config, creating or repairing it as needed, then opens the
/// bookmarks store and seeds it if it does not exist yet.
///
/// A config file that cannot be decoded is left alone: defaults are used, no
/// file is created or seeded, and the problem is reported. Any other error
/// is fatal, since no command may run on a half-initialized setup.
pub fn run(paths: &PbjPaths) -> Result<Bootstrap> {
    let defaults = PbjConfig::with_defaults(paths);
    let mut result = CmdResult::default();

    let loaded = match PbjConfig::load(&paths.config_file, &defaults) {
        Ok(loaded) => loaded,
        Err(err @ (PbjError::Serialization(_) | PbjError::Config(_))) => {
            let problem = format!("{}: {}", paths.config_file.display(), err);
            warn!(%problem, "config file unreadable, using defaults");
            result.add_message(CmdMessage::warning(format!(
                "Config file is unreadable, using defaults and refusing changes: {}",
                problem
            )));
            let store = FileStore::open(defaults.bookmarks_path(), false);
            return Ok(Bootstrap {
                config: defaults,
                unknown_keys: Vec::new(),
                config_problem: Some(problem),
                store,
                result,
            });
        }
        Err(err) => return Err(err),
    };

    let (config, unknown_keys) = match loaded {
        None => {
            defaults.save(&paths.config_file, true)?;
            info!(path = %paths.config_file.display(), "created config file");
            result.add_message(CmdMessage::info(format!(
                "Created config file {}",
                paths.config_file.display()
            )));
            (defaults, Vec::new())
        }
        Some(loaded) => {
            if loaded.needs_rewrite() {
                loaded.config.save(&paths.config_file, false)?;
                info!(keys = ?loaded.backfilled, "back-filled config keys");
                result.add_message(CmdMessage::warning(format!(
                    "Added missing config keys: {}",
                    loaded.backfilled.join(", ")
                )));
            }
            for key in &loaded.unknown_keys {
                warn!(key = %key, "unknown config key");
                result.add_message(CmdMessage::error(format!(
                    "Unknown config key '{}' in {}",
                    key,
                    paths.config_file.display()
                )));
            }
            (loaded.config, loaded.unknown_keys)
        }
    };

    let bookmarks_path = config.bookmarks_path();
    let store = FileStore::open(
        bookmarks_path.clone(),
        paths.is_in_config_dir(&bookmarks_path),
    );
    if store.first_run_init()?.is_some() {
        result.add_message(CmdMessage::info(format!(
            "Created bookmarks file {}",
            bookmarks_path.display()
        )));
    }

    Ok(Bootstrap {
        config,
        unknown_keys,
        config_problem: None,
        store,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PbjError;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PbjPaths) {
        let temp = TempDir::new().unwrap();
        let paths = PbjPaths::new(temp.path().join("pbj"), temp.path().to_path_buf());
        (temp, paths)
    }

    #[test]
    fn test_first_run_creates_both_files() {
        let (_temp, paths) = setup();
        let boot = run(&paths).unwrap();

        assert!(paths.config_file.is_file());
        assert!(paths.default_bookmarks_file.is_file());
        assert_eq!(boot.config.default_category, "default");

        let bookmarks = boot.store.load().bookmarks;
        let seeded = bookmarks.get("default", "bookmarks").unwrap();
        assert_eq!(std::path::Path::new(seeded), paths.config_dir);
        assert_eq!(boot.result.messages.len(), 2);
    }

    #[test]
    fn test_second_run_is_quiet() {
        let (_temp, paths) = setup();
        run(&paths).unwrap();
        let boot = run(&paths).unwrap();
        assert!(boot.result.messages.is_empty());
    }

    #[test]
    fn test_backfills_and_reports_unknown_keys() {
        let (_temp, paths) = setup();
        fs::create_dir_all(&paths.config_dir).unwrap();
        fs::write(&paths.config_file, r#"{"colour": "red"}"#).unwrap();

        let boot = run(&paths).unwrap();

        assert_eq!(boot.unknown_keys, vec!["colour"]);
        let rewritten = fs::read_to_string(&paths.config_file).unwrap();
        assert!(rewritten.contains("default_category"));
        assert!(rewritten.contains("bookmarks_file"));
        assert!(rewritten.contains("\"colour\": \"red\""));

        let again = run(&paths).unwrap();
        assert_eq!(again.unknown_keys, vec!["colour"]);
    }

    #[test]
    fn test_overridden_location_is_not_created() {
        let (temp, paths) = setup();
        fs::create_dir_all(&paths.config_dir).unwrap();
        let elsewhere = temp.path().join("missing").join("bookmarks.json");
        let config = PbjConfig {
            default_category: "default".to_string(),
            bookmarks_file: elsewhere.to_string_lossy().into_owned(),
            extra: Default::default(),
        };
        config.save(&paths.config_file, false).unwrap();

        assert!(matches!(run(&paths), Err(PbjError::Io(_))));
        assert!(!elsewhere.parent().unwrap().exists());
    }

    #[test]
    fn test_broken_config_falls_back_to_defaults() {
        let (_temp, paths) = setup();
        fs::create_dir_all(&paths.config_dir).unwrap();
        fs::write(&paths.config_file, "{ oops").unwrap();

        let boot = run(&paths).unwrap();

        assert_eq!(boot.config, PbjConfig::with_defaults(&paths));
        assert!(boot.config_problem.is_some());
        assert_eq!(boot.result.messages.len(), 1);
        assert!(boot.result.messages[0]
            .content
            .starts_with("Config file is unreadable"));
        assert_eq!(fs::read_to_string(&paths.config_file).unwrap(), "{ oops");
        assert!(!paths.default_bookmarks_file.exists());
    }

    #[test]
    fn test_config_of_wrong_shape_falls_back_to_defaults() {
        let (_temp, paths) = setup();
        fs::create_dir_all(&paths.config_dir).unwrap();
        fs::write(&paths.config_file, r#"{"default_category": 3}"#).unwrap();

        let boot = run(&paths).unwrap();
        assert!(boot.config_problem.is_some());
        assert_eq!(boot.config.default_category, "default");
    }
}
