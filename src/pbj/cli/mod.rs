//! # CLI Layer
//!
//! One possible UI client for pbj. This is the only place that:
//! - parses arguments (`setup.rs`)
//! - prints to stdout/stderr (`print.rs`)
//! - reads user input for the dialogues (`prompt.rs`)
//! - writes the shell hand-off file and picks exit codes (`commands.rs`)
//!
//! Listings, messages and resolved directories go to stdout. Prompts, startup
//! notices and logs go to stderr.

mod commands;
mod print;
mod prompt;
mod setup;

pub use commands::run;
