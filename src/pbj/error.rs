use crate::validation::NameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PbjError {
    #[error("Invalid category name '{name}': {reason}")]
    InvalidCategory { name: String, reason: NameError },

    #[error("Invalid key name '{name}': {reason}")]
    InvalidKey { name: String, reason: NameError },

    #[error("Invalid directory '{path}': {reason}")]
    InvalidDirectory { path: String, reason: String },

    #[error("Category '{0}' is the default category and cannot be removed")]
    ProtectedCategory(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Key '{key}' not found in category '{category}'")]
    KeyNotFound { category: String, key: String },

    #[error("No entry {ordinal} in category '{category}' (it has {count})")]
    OrdinalOutOfRange {
        category: String,
        ordinal: usize,
        count: usize,
    },

    #[error("Name collision: {0}")]
    Collision(String),

    #[error(
        "Default category '{0}' does not exist in the bookmarks file. \
         Run `pbj default <category>` or edit the config file to fix it"
    )]
    DefaultCategoryMissing(String),

    #[error("Bookmarks file is unreadable, refusing to modify it: {0}")]
    StoreUnreadable(String),

    #[error(
        "Config file is unreadable, refusing to modify it: {0}. \
         Fix or remove the file to make changes again"
    )]
    ConfigUnreadable(String),

    #[error("Cannot import {path}: {reason}")]
    InvalidImport { path: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PbjError>;
