use crate::error::{PbjError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
pub const BOOKMARKS_FILENAME: &str = "bookmarks.json";

/// Overrides the per-user config directory (`~/.config/pbj` on Linux).
pub const CONFIG_DIR_ENV: &str = "PBJ_CONFIG_DIR";
/// Overrides where hand-off files are written (the system temp dir otherwise).
pub const HANDOFF_DIR_ENV: &str = "PBJ_HANDOFF_DIR";

/// Every file location pbj touches, resolved once at startup and passed down
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbjPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub default_bookmarks_file: PathBuf,
    pub handoff_dir: PathBuf,
}

impl PbjPaths {
    /// Paths for a config directory and a hand-off directory.
    pub fn new(config_dir: PathBuf, handoff_dir: PathBuf) -> Self {
        Self {
            config_file: config_dir.join(CONFIG_FILENAME),
            default_bookmarks_file: config_dir.join(BOOKMARKS_FILENAME),
            config_dir,
            handoff_dir,
        }
    }

    /// Resolves paths from the environment overrides, falling back to the
    /// platform config directory and the system temp dir.
    pub fn from_env() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("", "", "pbj")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    PbjError::Config("could not determine the config directory".to_string())
                })?,
        };
        let handoff_dir = match std::env::var_os(HANDOFF_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::temp_dir(),
        };
        Ok(Self::new(config_dir, handoff_dir))
    }

    /// True if `file` sits directly in pbj's own config directory, the only
    /// place pbj will create missing directories.
    pub fn is_in_config_dir(&self, file: &Path) -> bool {
        file.parent() == Some(self.config_dir.as_path())
    }

    /// The hand-off file for the shell session whose process id is `ppid`.
    pub fn handoff_file(&self, ppid: u32) -> PathBuf {
        self.handoff_dir.join(format!("pbj-{}.env", ppid))
    }
}
