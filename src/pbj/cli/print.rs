use colored::Colorize;
use pbj::api::{CategoryListing, CmdMessage, MessageLevel};
use pbj::config::PbjConfig;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal width override for listings.
pub const COLUMNS_ENV: &str = "PBJ_COLUMNS";

const DEFAULT_WIDTH: usize = 80;
const MIN_PATH_WIDTH: usize = 10;

pub(super) fn terminal_width() -> usize {
    if let Some(width) = std::env::var(COLUMNS_ENV)
        .ok()
        .and_then(|w| w.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return width;
    }
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", style_message(message));
    }
}

/// Startup notices go to stderr so they never mix with a printed directory.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", style_message(message));
    }
}

fn style_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

pub(super) fn print_listings(listed: &[CategoryListing], width: usize) {
    print!("{}", render_listings(listed, width));
}

pub(super) fn print_config(config: &PbjConfig) {
    println!("default_category = {}", config.default_category);
    println!("bookmarks_file = {}", config.bookmarks_file);
}

/// Renders categories as numbered `n. key  path` tables. Keys are padded to a
/// common display width and paths are cut to fit `width`.
pub(super) fn render_listings(listed: &[CategoryListing], width: usize) -> String {
    let mut out = String::new();

    for (i, listing) in listed.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_heading(listing));
        out.push('\n');

        let num_width = listing.entries.len().to_string().len();
        let key_width = listing
            .entries
            .iter()
            .map(|e| e.key.width())
            .max()
            .unwrap_or(0);

        for entry in &listing.entries {
            let num = format!("{:>w$}.", entry.ordinal, w = num_width);
            let padding = key_width.saturating_sub(entry.key.width());
            // "  " + num + " " + key + padding + "  "
            let fixed = 2 + num.len() + 1 + key_width + 2;
            let path_width = width.saturating_sub(fixed).max(MIN_PATH_WIDTH);
            out.push_str(&format!(
                "  {} {}{}  {}\n",
                num.yellow(),
                entry.key.bold(),
                " ".repeat(padding),
                truncate_to_width(&entry.path, path_width).dimmed()
            ));
        }
    }

    out
}

fn render_heading(listing: &CategoryListing) -> String {
    let mut tags = Vec::new();
    if listing.is_current {
        tags.push("current");
    }
    if listing.is_default {
        tags.push("default");
    }
    let name = listing.name.cyan().bold();
    if tags.is_empty() {
        format!("{}", name)
    } else {
        format!("{} {}", name, format!("({})", tags.join(", ")).dimmed())
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbj::model::Entry;

    fn listing() -> CategoryListing {
        CategoryListing {
            name: "work".to_string(),
            entries: vec![
                Entry {
                    ordinal: 1,
                    key: "api".to_string(),
                    path: "/srv/api".to_string(),
                },
                Entry {
                    ordinal: 2,
                    key: "report".to_string(),
                    path: "/home/me/documents/reports/quarterly".to_string(),
                },
            ],
            is_current: true,
            is_default: false,
        }
    }

    #[test]
    fn test_render_aligns_keys() {
        colored::control::set_override(false);
        let out = render_listings(&[listing()], 80);
        assert_eq!(
            out,
            "work (current)\n  1. api     /srv/api\n  2. report  /home/me/documents/reports/quarterly\n"
        );
    }

    #[test]
    fn test_render_truncates_long_paths() {
        colored::control::set_override(false);
        let out = render_listings(&[listing()], 30);
        let last = out.lines().last().unwrap();
        assert!(last.ends_with('…'));
        assert_eq!(last.width(), 30);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("/srv/api", 20), "/srv/api");
        assert_eq!(truncate_to_width("/srv/api", 5), "/srv…");
    }
}
