use crate::validation::expand_path;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry as MapEntry;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Key name -> directory path, kept sorted by key.
pub type Category = BTreeMap<String, String>;

/// The whole bookmarks document: category name -> category.
///
/// Both levels are `BTreeMap`s, so iteration (and therefore serialization) is
/// always in canonical lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks {
    categories: BTreeMap<String, Category>,
}

/// A bookmark together with its 1-based position in the sorted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub ordinal: usize,
    pub key: String,
    pub path: String,
}

/// A key removed because another key in the same category already held its
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedEntry {
    pub category: String,
    pub key: String,
    pub path: String,
    /// The key that kept the directory.
    pub kept_by: String,
}

impl std::fmt::Display for PrunedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}: {} (already saved as '{}')",
            self.category, self.key, self.path, self.kept_by
        )
    }
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(name, cat)| (name.as_str(), cat))
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    pub fn get(&self, category: &str, key: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|cat| cat.get(key))
            .map(String::as_str)
    }

    /// Creates an empty category if it does not exist. Returns true if created.
    pub fn add_category(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.categories.contains_key(&name) {
            return false;
        }
        self.categories.insert(name, Category::new());
        true
    }

    /// Inserts (or overwrites) a bookmark, creating the category as needed.
    /// Returns the previous path of the key, if any.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        path: impl Into<String>,
    ) -> Option<String> {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), path.into())
    }

    pub fn remove_category(&mut self, name: &str) -> Option<Category> {
        self.categories.remove(name)
    }

    pub fn remove_key(&mut self, category: &str, key: &str) -> Option<String> {
        self.categories.get_mut(category)?.remove(key)
    }

    /// Moves a category's entries under a new name. Returns false if `old`
    /// does not exist.
    pub fn rename_category(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.categories.remove(old) {
            Some(entries) => {
                self.categories.insert(new.into(), entries);
                true
            }
            None => false,
        }
    }

    /// Moves one entry to a new key within its category. Returns false if the
    /// entry does not exist.
    pub fn rename_key(&mut self, category: &str, old: &str, new: impl Into<String>) -> bool {
        let Some(entries) = self.categories.get_mut(category) else {
            return false;
        };
        match entries.remove(old) {
            Some(path) => {
                entries.insert(new.into(), path);
                true
            }
            None => false,
        }
    }

    /// Numbered entries of a category, in sorted key order.
    pub fn entries(&self, category: &str) -> Option<Vec<Entry>> {
        let entries = self.categories.get(category)?;
        Some(
            entries
                .iter()
                .enumerate()
                .map(|(i, (key, path))| Entry {
                    ordinal: i + 1,
                    key: key.clone(),
                    path: path.clone(),
                })
                .collect(),
        )
    }

    /// Returns the key in `category` that already holds `path`, ignoring
    /// `except_key`.
    pub fn key_for_path(
        &self,
        category: &str,
        path: &Path,
        except_key: Option<&str>,
    ) -> Option<&str> {
        self.categories.get(category)?.iter().find_map(|(key, value)| {
            if Some(key.as_str()) == except_key {
                return None;
            }
            (expand_path(value) == path).then_some(key.as_str())
        })
    }

    /// Removes every key whose directory is already held by an earlier key
    /// (in sorted order) of the same category.
    pub fn prune_duplicates(&mut self) -> Vec<PrunedEntry> {
        let mut pruned = Vec::new();

        for (category, entries) in self.categories.iter_mut() {
            let mut claimed: HashMap<PathBuf, &str> = HashMap::new();
            let mut duplicates = Vec::new();

            for (key, value) in entries.iter() {
                match claimed.entry(expand_path(value)) {
                    MapEntry::Occupied(owner) => duplicates.push(PrunedEntry {
                        category: category.clone(),
                        key: key.clone(),
                        path: value.clone(),
                        kept_by: owner.get().to_string(),
                    }),
                    MapEntry::Vacant(slot) => {
                        slot.insert(key);
                    }
                }
            }

            for duplicate in &duplicates {
                entries.remove(&duplicate.key);
            }
            pruned.extend(duplicates);
        }

        pruned
    }
}
