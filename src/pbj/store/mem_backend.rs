use super::backend::StorageBackend;
use crate::error::{PbjError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since pbj is single-threaded, so
/// the `StorageBackend` trait can use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    content: RefCell<Option<String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `content`, as if read from disk.
    pub fn with_content(content: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.content.borrow_mut() = Some(content.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The last document written (or seeded).
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PbjError::Io(std::io::Error::other("Simulated write error")));
        }
        *self.content.borrow_mut() = Some(content.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("/mem/bookmarks.json")
    }
}
