use super::backend::StorageBackend;
use crate::error::{PbjError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub struct FsBackend {
    path: PathBuf,
    create_parents: bool,
}

impl FsBackend {
    /// A backend for the document at `path`. Missing parent directories are
    /// never created; see [`FsBackend::with_create_parents`].
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            create_parents: false,
        }
    }

    /// Allow creating missing parent directories on write. Only set for the
    /// application's own config directory.
    pub fn with_create_parents(mut self, create: bool) -> Self {
        self.create_parents = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FsBackend {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(PbjError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, content: &str) -> Result<()> {
        write_atomic(&self.path, content, self.create_parents)
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

/// Writes `content` to a temp file next to `path` and renames it into place.
pub(crate) fn write_atomic(path: &Path, content: &str, create_parents: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.exists() {
        if !create_parents {
            return Err(PbjError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            )));
        }
        debug!(dir = %parent.display(), "creating parent directory");
        fs::create_dir_all(&parent).map_err(PbjError::Io)?;
    }

    let stem = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pbj".to_string());
    let tmp_file = parent.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
    fs::write(&tmp_file, content).map_err(PbjError::Io)?;
    if let Err(e) = fs::rename(&tmp_file, path) {
        let _ = fs::remove_file(&tmp_file);
        return Err(PbjError::Io(e));
    }
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
