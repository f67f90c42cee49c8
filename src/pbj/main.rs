//! # pbj CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! Shell integration needs a wrapper function, since only the shell itself can
//! change its working directory:
//!
//! ```text
//! pbj() {
//!     command pbj "$@" || return
//!     local f="${PBJ_HANDOFF_DIR:-${TMPDIR:-/tmp}}/pbj-$$.env"
//!     if [ -f "$f" ]; then
//!         . "$f" && rm -f "$f"
//!         if [ -n "$CURRENT_CATEGORY" ]; then
//!             export PBJ_CURRENT_CATEGORY="$CURRENT_CATEGORY"
//!         else
//!             unset PBJ_CURRENT_CATEGORY
//!         fi
//!         [ -n "$NEWDIR" ] && cd "$NEWDIR"
//!         unset CURRENT_CATEGORY NEWDIR
//!     fi
//! }
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
