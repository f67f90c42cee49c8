use super::mem_backend::MemBackend;
use super::BookmarkStore;

pub type InMemoryStore = BookmarkStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        BookmarkStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---


#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;

    #[test]
    fn test_fixture_creates_real_dirs() {
        let fixture = StoreFixture::new().with_entry("work", "api");
        let path = fixture.bookmarks.get("work", "api").unwrap();
        assert!(std::path::Path::new(path).is_dir());
    }
}
