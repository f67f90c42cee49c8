//! Naming and directory rules for bookmarks.
//!
//! Category names:
//! - Alphabetic characters only (no digits, dots, spaces or symbols)
//! - Cannot be empty
//!
//! Key names:
//! - Alphanumeric characters, with optional internal dots (`dir.1`, `dir.1.0`)
//! - Cannot start or end with a dot
//! - Cannot consist solely of digits (those are read as positions)
//!
//! Category names and key names share one namespace across the whole
//! bookmarks file: a key can never be named like a category and vice versa.
//! The namespace checks live in [`check_new_category_name`] and
//! [`check_new_key_name`], which the mutating commands and the rename
//! dialogue both go through.

use crate::error::{PbjError, Result};
use crate::model::Bookmarks;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Why a category or key name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty
    Empty,
    /// Name is made of digits only
    Numeric,
    /// Name contains a dot (categories only)
    ContainsDot,
    /// Name starts with a dot
    LeadingDot,
    /// Name ends with a dot
    TrailingDot,
    /// Name contains a character outside the allowed set
    InvalidCharacter(char),
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::Empty => write!(f, "name cannot be empty"),
            NameError::Numeric => write!(
                f,
                "name cannot consist only of digits (numbers select entries by position)"
            ),
            NameError::ContainsDot => write!(f, "category names cannot contain dots"),
            NameError::LeadingDot => write!(f, "name cannot start with a dot"),
            NameError::TrailingDot => write!(f, "name cannot end with a dot"),
            NameError::InvalidCharacter(ch) => {
                write!(f, "name contains invalid character '{}'", ch)
            }
        }
    }
}

impl std::error::Error for NameError {}

fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_numeric)
}

/// Checks a category name against the category naming rules.
///
/// ```
/// use pbj::validation::{validate_category_name, NameError};
///
/// assert!(validate_category_name("work").is_ok());
/// assert_eq!(validate_category_name("w.rk"), Err(NameError::ContainsDot));
/// assert_eq!(validate_category_name("42"), Err(NameError::Numeric));
/// ```
pub fn validate_category_name(name: &str) -> std::result::Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if is_numeric(name) {
        return Err(NameError::Numeric);
    }
    for ch in name.chars() {
        if ch == '.' {
            return Err(NameError::ContainsDot);
        }
        if !ch.is_alphabetic() {
            return Err(NameError::InvalidCharacter(ch));
        }
    }
    Ok(())
}

/// Checks a key name against the key naming rules.
///
/// ```
/// use pbj::validation::{validate_key_name, NameError};
///
/// assert!(validate_key_name("api").is_ok());
/// assert!(validate_key_name("dir.1.0").is_ok());
/// assert_eq!(validate_key_name(".dir"), Err(NameError::LeadingDot));
/// assert_eq!(validate_key_name("12"), Err(NameError::Numeric));
/// ```
pub fn validate_key_name(name: &str) -> std::result::Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if is_numeric(name) {
        return Err(NameError::Numeric);
    }
    if name.starts_with('.') {
        return Err(NameError::LeadingDot);
    }
    if name.ends_with('.') {
        return Err(NameError::TrailingDot);
    }
    match name.chars().find(|ch| *ch != '.' && !ch.is_alphanumeric()) {
        Some(ch) => Err(NameError::InvalidCharacter(ch)),
        None => Ok(()),
    }
}

pub fn category_is_valid(name: &str) -> bool {
    validate_category_name(name).is_ok()
}

pub fn key_is_valid(name: &str) -> bool {
    validate_key_name(name).is_ok()
}

/// True if `name` is used as a key in any category.
pub fn name_collides_with_key(bookmarks: &Bookmarks, name: &str) -> bool {
    bookmarks
        .iter()
        .any(|(_, entries)| entries.contains_key(name))
}

/// Validates a name for a category that does not exist yet.
pub fn check_new_category_name(bookmarks: &Bookmarks, name: &str) -> Result<()> {
    validate_category_name(name).map_err(|reason| PbjError::InvalidCategory {
        name: name.to_string(),
        reason,
    })?;
    if bookmarks.contains_category(name) {
        return Err(PbjError::Collision(format!(
            "category '{}' already exists",
            name
        )));
    }
    if name_collides_with_key(bookmarks, name) {
        return Err(PbjError::Collision(format!(
            "'{}' is already used as a key name",
            name
        )));
    }
    Ok(())
}

/// Validates a name for a key that is about to be added to `category`.
///
/// Existing keys of the same name are not checked here: saving may replace
/// them, renaming may not.
pub fn check_key_name(bookmarks: &Bookmarks, name: &str) -> Result<()> {
    validate_key_name(name).map_err(|reason| PbjError::InvalidKey {
        name: name.to_string(),
        reason,
    })?;
    if bookmarks.contains_category(name) {
        return Err(PbjError::Collision(format!(
            "'{}' is already used as a category name",
            name
        )));
    }
    Ok(())
}

/// Validates a name for a key that must not exist yet in `category`.
pub fn check_new_key_name(bookmarks: &Bookmarks, category: &str, name: &str) -> Result<()> {
    check_key_name(bookmarks, name)?;
    if bookmarks.get(category, name).is_some() {
        return Err(PbjError::Collision(format!(
            "key '{}' already exists in category '{}'",
            name, category
        )));
    }
    Ok(())
}

/// Expands a leading `~` and makes the path absolute against the current
/// directory. Redundant separators and `.` components are dropped; symlinks
/// are left alone.
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            match BaseDirs::new() {
                Some(dirs) => dirs.home_dir().join(rest.trim_start_matches('/')),
                None => PathBuf::from(raw),
            }
        }
        _ => PathBuf::from(raw),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    };

    absolute.components().collect()
}

/// Expands `raw` and checks that it names an existing directory.
pub fn validate_directory(raw: &str) -> Result<PathBuf> {
    let path = expand_path(raw);
    if !path.exists() {
        return Err(PbjError::InvalidDirectory {
            path: path.display().to_string(),
            reason: "path does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(PbjError::InvalidDirectory {
            path: path.display().to_string(),
            reason: "path is not a directory".to_string(),
        });
    }
    Ok(path)
}

pub fn directory_is_valid(raw: &str) -> bool {
    validate_directory(raw).is_ok()
}

pub(crate) fn path_to_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Bookmarks {
        let mut bookmarks = Bookmarks::default();
        bookmarks.insert("work", "report", "/tmp/report");
        bookmarks.insert("home", "music", "/tmp/music");
        bookmarks
    }

    #[test]
    fn test_valid_categories() {
        assert!(category_is_valid("work"));
        assert!(category_is_valid("Default"));
        assert!(category_is_valid("projekt"));
        assert!(category_is_valid("ñandú"));
    }

    #[test]
    fn test_invalid_categories() {
        assert_eq!(validate_category_name(""), Err(NameError::Empty));
        assert_eq!(validate_category_name("123"), Err(NameError::Numeric));
        assert_eq!(validate_category_name("a.b"), Err(NameError::ContainsDot));
        assert_eq!(
            validate_category_name("work2"),
            Err(NameError::InvalidCharacter('2'))
        );
        assert_eq!(
            validate_category_name("my work"),
            Err(NameError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_valid_keys() {
        assert!(key_is_valid("api"));
        assert!(key_is_valid("api2"));
        assert!(key_is_valid("2api"));
        assert!(key_is_valid("dir.1"));
        assert!(key_is_valid("dir.1.0"));
        assert!(key_is_valid("v1.2"));
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(validate_key_name(""), Err(NameError::Empty));
        assert_eq!(validate_key_name("42"), Err(NameError::Numeric));
        assert_eq!(validate_key_name(".api"), Err(NameError::LeadingDot));
        assert_eq!(validate_key_name("api."), Err(NameError::TrailingDot));
        assert_eq!(
            validate_key_name("my-api"),
            Err(NameError::InvalidCharacter('-'))
        );
        assert_eq!(
            validate_key_name("my_api"),
            Err(NameError::InvalidCharacter('_'))
        );
    }

    #[test]
    fn test_dotted_digits_are_a_key() {
        // "1.2" is not purely numeric once the dot is considered
        assert!(key_is_valid("1.2"));
    }

    #[test]
    fn test_name_collides_with_key() {
        let bookmarks = sample();
        assert!(name_collides_with_key(&bookmarks, "report"));
        assert!(name_collides_with_key(&bookmarks, "music"));
        assert!(!name_collides_with_key(&bookmarks, "work"));
    }

    #[test]
    fn test_check_new_category_name() {
        let bookmarks = sample();
        assert!(check_new_category_name(&bookmarks, "travel").is_ok());
        assert!(matches!(
            check_new_category_name(&bookmarks, "work"),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            check_new_category_name(&bookmarks, "report"),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            check_new_category_name(&bookmarks, "tr4vel"),
            Err(PbjError::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_check_new_key_name() {
        let bookmarks = sample();
        assert!(check_new_key_name(&bookmarks, "work", "notes").is_ok());
        // Same key may live in another category
        assert!(check_new_key_name(&bookmarks, "work", "music").is_ok());
        assert!(matches!(
            check_new_key_name(&bookmarks, "work", "report"),
            Err(PbjError::Collision(_))
        ));
        assert!(matches!(
            check_new_key_name(&bookmarks, "work", "home"),
            Err(PbjError::Collision(_))
        ));
    }

    #[test]
    fn test_expand_path_home() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_path("~"), home);
        assert_eq!(expand_path("~/code"), home.join("code"));
        // Not a home reference
        assert!(expand_path("~other").ends_with("~other"));
    }

    #[test]
    fn test_expand_path_normalizes() {
        assert_eq!(expand_path("/tmp/api/"), PathBuf::from("/tmp/api"));
        assert_eq!(expand_path("/tmp//api/./"), PathBuf::from("/tmp/api"));
        assert!(expand_path("relative").is_absolute());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dir");
        let file = temp.path().join("file.txt");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(&file, "x").unwrap();

        assert!(directory_is_valid(dir.to_str().unwrap()));
        assert!(!directory_is_valid(file.to_str().unwrap()));
        assert!(!directory_is_valid(
            temp.path().join("missing").to_str().unwrap()
        ));

        match validate_directory(file.to_str().unwrap()) {
            Err(PbjError::InvalidDirectory { reason, .. }) => {
                assert_eq!(reason, "path is not a directory")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_name_error_display() {
        assert_eq!(NameError::Empty.to_string(), "name cannot be empty");
        assert_eq!(
            NameError::InvalidCharacter('@').to_string(),
            "name contains invalid character '@'"
        );
        assert_eq!(
            NameError::ContainsDot.to_string(),
            "category names cannot contain dots"
        );
    }
}
