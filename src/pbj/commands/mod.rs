//! # Command Layer
//!
//! One module per operation. Commands work on an in-memory [`Bookmarks`]
//! value and, when they mutate it, persist through a [`BookmarkStore`]:
//!
//! 1. validate every input (names, directories, namespace collisions)
//! 2. apply the change to a staged copy
//! 3. save the staged copy, and only then replace the caller's bookmarks
//!
//! A rejected command therefore never writes anything, and a failed write
//! leaves the in-memory bookmarks as they were.
//!
//! Commands return [`CmdResult`] values and never print.
//!
//! [`BookmarkStore`]: crate::store::BookmarkStore

use crate::config::PbjConfig;
use crate::handoff::Handoff;
use crate::model::{Bookmarks, Entry, PrunedEntry};
use std::path::PathBuf;

pub mod category;
pub mod config;
pub mod delete;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod rename;
pub mod resolve;
pub mod save;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One category as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub name: String,
    pub entries: Vec<Entry>,
    pub is_current: bool,
    pub is_default: bool,
}

impl CategoryListing {
    pub fn from_bookmarks(
        bookmarks: &Bookmarks,
        name: &str,
        current: &str,
        default: &str,
    ) -> Option<Self> {
        Some(Self {
            name: name.to_string(),
            entries: bookmarks.entries(name)?,
            is_current: name == current,
            is_default: name == default,
        })
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<CategoryListing>,
    pub resolved_dir: Option<PathBuf>,
    pub handoff: Option<Handoff>,
    pub pruned: Vec<PrunedEntry>,
    pub config: Option<PbjConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<CategoryListing>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_resolved_dir(mut self, dir: PathBuf) -> Self {
        self.resolved_dir = Some(dir);
        self
    }

    pub fn with_handoff(mut self, handoff: Handoff) -> Self {
        self.handoff = Some(handoff);
        self
    }

    pub fn with_config(mut self, config: PbjConfig) -> Self {
        self.config = Some(config);
        self
    }
}
