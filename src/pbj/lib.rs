//! # pbj Architecture
//!
//! pbj bookmarks directories under short mnemonic keys, grouped in
//! categories, and jumps back to them by key or by position:
//!
//! ```text
//! pbj save api          # bookmark the cwd as 'api' in the current category
//! pbj api               # jump to it
//! pbj work 2            # jump to the second key of category 'work'
//! ```
//!
//! The crate is a library with a thin CLI client on top.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints, prompts, writes hand-off files │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Facade holding the loaded bookmarks and config           │
//! │  - Parses `key|n` input into selectors once                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and business logic                            │
//! │  - Returns `Result<CmdResult>`, never prints                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - BookmarkStore: canonical JSON, duplicate pruning         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Naming
//!
//! Category and key names share one namespace, and digit-only input always
//! means a position. See [`validation`] for the rules.
//!
//! ## Shell Integration
//!
//! A process cannot change its parent shell's directory. Directory and
//! category changes are written to a hand-off file that a shell wrapper
//! sources; see [`handoff`].
//!
//! ## Testing Strategy
//!
//! - **Commands**: unit tests against `InMemoryStore` and temp directories
//! - **Store**: format, pruning and atomic writes, in memory and on disk
//! - **Dialogues**: state transitions, fed line by line
//! - **CLI**: integration tests in `tests/` driving the binary

pub mod api;
pub mod commands;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod handoff;
pub mod init;
pub mod model;
pub mod paths;
pub mod selector;
pub mod store;
pub mod validation;
