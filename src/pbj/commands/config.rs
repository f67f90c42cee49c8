use crate::commands::{CmdMessage, CmdResult};
use crate::config::{PbjConfig, KNOWN_KEYS};
use crate::error::{PbjError, Result};
use crate::model::Bookmarks;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
}

pub fn run(
    config: &PbjConfig,
    config_file: &Path,
    unknown_keys: &[String],
    action: ConfigAction,
) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let mut result = CmdResult::default().with_config(config.clone());
            result.add_message(CmdMessage::info(format!(
                "Config file: {}",
                config_file.display()
            )));
            for key in unknown_keys {
                result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)));
            }
            Ok(result)
        }
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(format!(
                    "Unknown config key: {} (known keys: {})",
                    key,
                    KNOWN_KEYS.join(", ")
                ))),
            }
            Ok(result)
        }
    }
}

/// Checks that the configured default category exists in the bookmarks.
pub fn verify(bookmarks: &Bookmarks, config: &PbjConfig) -> Result<()> {
    if bookmarks.contains_category(&config.default_category) {
        Ok(())
    } else {
        Err(PbjError::DefaultCategoryMissing(
            config.default_category.clone(),
        ))
    }
}
