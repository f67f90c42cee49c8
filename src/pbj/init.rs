use crate::api::PbjApi;
use crate::commands::init::run as bootstrap;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::paths::PbjPaths;
use crate::store::fs_backend::FsBackend;

/// Set by the shell wrapper to the session's current category.
pub const CURRENT_CATEGORY_ENV: &str = "PBJ_CURRENT_CATEGORY";

pub struct PbjContext {
    pub api: PbjApi<FsBackend>,
    /// Messages produced while initializing (files created, config repaired,
    /// bookmarks unreadable).
    pub startup: CmdResult,
}

/// Reads the current-category override from the environment.
pub fn current_category_from_env() -> Option<String> {
    std::env::var(CURRENT_CATEGORY_ENV)
        .ok()
        .filter(|c| !c.is_empty())
}

/// Runs first-run initialization and loads the bookmarks. Fails if the config
/// or bookmarks file could not be created.
pub fn initialize(paths: PbjPaths, current: Option<String>) -> Result<PbjContext> {
    let boot = bootstrap(&paths)?;
    let mut startup = boot.result;

    let api = PbjApi::new(boot.store, boot.config, paths)
        .with_unknown_keys(boot.unknown_keys)
        .with_config_problem(boot.config_problem)
        .with_current_category(current);

    if let Some(problem) = api.load_problem() {
        startup.add_message(CmdMessage::warning(format!(
            "Bookmarks are unavailable, changes will be refused: {}",
            problem
        )));
    }

    Ok(PbjContext { api, startup })
}
