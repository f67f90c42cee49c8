use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw bookmarks-document I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `BookmarkStore` handles the "what" (decoding, sorting, pruning).
pub trait StorageBackend {
    /// Read the raw document.
    /// Returns Ok(None) if it does not exist yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self) -> Result<Option<String>>;

    /// Replace the whole document.
    /// MUST be atomic (e.g. write to tmp then rename) so an interrupted
    /// process leaves the previous document intact.
    fn write(&self, content: &str) -> Result<()>;

    /// Where the document lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
