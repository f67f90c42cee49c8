use crate::commands::helpers::require_category;
use crate::commands::resolve::resolve;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::PbjConfig;
use crate::error::Result;
use crate::handoff::Handoff;
use crate::model::Bookmarks;
use crate::selector::Selector;

/// Makes `name` the default category. The updated config is returned for the
/// caller to persist.
pub fn set_default(bookmarks: &Bookmarks, config: &PbjConfig, name: &str) -> Result<CmdResult> {
    require_category(bookmarks, name)?;

    let mut updated = config.clone();
    updated.default_category = name.to_string();

    let mut result = CmdResult::default().with_config(updated);
    result.add_message(CmdMessage::success(format!(
        "Default category is now '{}'",
        name
    )));
    Ok(result)
}

/// Switches the shell session to `name`, optionally jumping to a bookmark of
/// that category. If the selector does not resolve nothing is handed off.
pub fn set_current(
    bookmarks: &Bookmarks,
    name: &str,
    selector: Option<&Selector>,
) -> Result<CmdResult> {
    require_category(bookmarks, name)?;

    let mut handoff = Handoff::new(name);
    let mut result = CmdResult::default();
    if let Some(selector) = selector {
        let dir = resolve(bookmarks, name, selector)?;
        handoff = handoff.with_new_dir(dir.clone());
        result = result.with_resolved_dir(dir);
    }

    result.add_message(CmdMessage::success(format!(
        "Current category is now '{}'",
        name
    )));
    Ok(result.with_handoff(handoff))
}
