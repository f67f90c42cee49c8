//! # Interactive Dialogues
//!
//! UI-agnostic state machines for the interactive flows. A dialogue is fed one
//! line of user input at a time through `step` and answers with a [`Step`]
//! telling the UI what to show next. The dialogues never read stdin or print
//! anything themselves, and they never mutate bookmarks: once a dialogue is
//! finished the caller runs the matching API operation.
//!
//! Typing [`ABORT_TOKEN`] aborts any dialogue from any state, and
//! [`LIST_TOKEN`] asks for the available choices.
//!
//! ## Rename
//!
//! ```text
//! SelectingTarget --(existing category or key)--> ConfirmingNewName
//! ConfirmingNewName --(valid, unused name)--> Done
//! any state --(exit)--> Aborted
//! ```

use crate::error::PbjError;
use crate::model::Bookmarks;
use crate::selector::Selector;
use crate::validation::{check_new_category_name, check_new_key_name};

pub const ABORT_TOKEN: &str = "exit";
pub const LIST_TOKEN: &str = "ls";

/// What the UI should do after feeding a line into a dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Input accepted, ask the next question.
    Continue,
    /// Show these choices and ask again.
    List(Vec<String>),
    /// Input rejected for this reason; ask again.
    Invalid(String),
    Done,
    Aborted,
}

/// A line-driven dialogue, so a UI can run any of them with one loop.
pub trait Dialogue {
    /// The question to show for the current state.
    fn prompt(&self) -> String;

    /// Feeds one line of user input.
    fn step(&mut self, bookmarks: &Bookmarks, input: &str) -> Step;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameTarget {
    Category(String),
    Key { category: String, key: String },
}

impl std::fmt::Display for RenameTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameTarget::Category(name) => write!(f, "category '{}'", name),
            RenameTarget::Key { category, key } => write!(f, "key '{}' in '{}'", key, category),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameState {
    SelectingTarget,
    ConfirmingNewName(RenameTarget),
    Done {
        target: RenameTarget,
        new_name: String,
    },
    Aborted,
}

/// Picks a category or a key of the current category, then a new name for it.
#[derive(Debug, Clone)]
pub struct RenameDialogue {
    category: String,
    state: RenameState,
}

impl RenameDialogue {
    /// Keys are looked up in `category`.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            state: RenameState::SelectingTarget,
        }
    }

    pub fn state(&self) -> &RenameState {
        &self.state
    }

    /// The chosen target and its new name, once the dialogue is done.
    pub fn outcome(&self) -> Option<(&RenameTarget, &str)> {
        match &self.state {
            RenameState::Done { target, new_name } => Some((target, new_name.as_str())),
            _ => None,
        }
    }

    fn select_target(&mut self, bookmarks: &Bookmarks, input: &str) -> Step {
        if input == LIST_TOKEN {
            let mut choices: Vec<String> = bookmarks
                .category_names()
                .map(|name| format!("{} (category)", name))
                .collect();
            if let Some(entries) = bookmarks.category(&self.category) {
                choices.extend(entries.keys().map(|key| format!("{} (key)", key)));
            }
            return Step::List(choices);
        }

        let target = if bookmarks.contains_category(input) {
            RenameTarget::Category(input.to_string())
        } else if bookmarks.get(&self.category, input).is_some() {
            RenameTarget::Key {
                category: self.category.clone(),
                key: input.to_string(),
            }
        } else {
            return Step::Invalid(format!(
                "No category, and no key in '{}', named '{}'",
                self.category, input
            ));
        };

        self.state = RenameState::ConfirmingNewName(target);
        Step::Continue
    }

    fn confirm_name(&mut self, bookmarks: &Bookmarks, target: RenameTarget, input: &str) -> Step {
        if input == LIST_TOKEN {
            let taken: Vec<String> = match &target {
                RenameTarget::Category(_) => {
                    bookmarks.category_names().map(str::to_string).collect()
                }
                RenameTarget::Key { category, .. } => bookmarks
                    .category(category)
                    .map(|entries| entries.keys().cloned().collect())
                    .unwrap_or_default(),
            };
            return Step::List(taken);
        }

        let checked: Result<(), PbjError> = match &target {
            RenameTarget::Category(_) => check_new_category_name(bookmarks, input),
            RenameTarget::Key { category, .. } => check_new_key_name(bookmarks, category, input),
        };
        match checked {
            Ok(()) => {
                self.state = RenameState::Done {
                    target,
                    new_name: input.to_string(),
                };
                Step::Done
            }
            Err(e) => Step::Invalid(e.to_string()),
        }
    }
}

impl Dialogue for RenameDialogue {
    fn prompt(&self) -> String {
        match &self.state {
            RenameState::SelectingTarget => format!(
                "Category, or key in '{}', to rename ('{}' to list, '{}' to quit): ",
                self.category, LIST_TOKEN, ABORT_TOKEN
            ),
            RenameState::ConfirmingNewName(target) => format!("New name for {}: ", target),
            RenameState::Done { .. } | RenameState::Aborted => String::new(),
        }
    }

    fn step(&mut self, bookmarks: &Bookmarks, input: &str) -> Step {
        let input = input.trim();
        if input == ABORT_TOKEN {
            self.state = RenameState::Aborted;
            return Step::Aborted;
        }

        match &self.state {
            RenameState::SelectingTarget => self.select_target(bookmarks, input),
            RenameState::ConfirmingNewName(target) => {
                let target = target.clone();
                self.confirm_name(bookmarks, target, input)
            }
            RenameState::Done { .. } => Step::Done,
            RenameState::Aborted => Step::Aborted,
        }
    }
}

/// Picks an existing category, by name or by its position in the sorted list.
#[derive(Debug, Clone, Default)]
pub struct CategoryChooser {
    chosen: Option<String>,
    aborted: bool,
}

impl CategoryChooser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }
}

impl Dialogue for CategoryChooser {
    fn prompt(&self) -> String {
        format!(
            "Category ('{}' to list, '{}' to quit): ",
            LIST_TOKEN, ABORT_TOKEN
        )
    }

    fn step(&mut self, bookmarks: &Bookmarks, input: &str) -> Step {
        let input = input.trim();
        if self.aborted || input == ABORT_TOKEN {
            self.aborted = true;
            return Step::Aborted;
        }
        if self.chosen.is_some() {
            return Step::Done;
        }
        if input == LIST_TOKEN {
            return Step::List(
                bookmarks
                    .category_names()
                    .enumerate()
                    .map(|(i, name)| format!("{}. {}", i + 1, name))
                    .collect(),
            );
        }

        let found = match Selector::from(input) {
            Selector::ByOrdinal(n) if n > 0 => bookmarks.category_names().nth(n - 1),
            Selector::ByOrdinal(_) => None,
            Selector::ByName(name) => bookmarks.category_names().find(|c| *c == name),
        };
        match found {
            Some(name) => {
                self.chosen = Some(name.to_string());
                Step::Done
            }
            None => Step::Invalid(format!("No category '{}'", input)),
        }
    }
}
