use crate::commands::helpers::require_category;
use crate::commands::{CategoryListing, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Bookmarks;

/// Lists one category as a numbered, sorted listing.
pub fn run(
    bookmarks: &Bookmarks,
    category: &str,
    current: &str,
    default: &str,
) -> Result<CmdResult> {
    require_category(bookmarks, category)?;
    let listed: Vec<CategoryListing> =
        CategoryListing::from_bookmarks(bookmarks, category, current, default)
            .into_iter()
            .collect();

    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.iter().all(|l| l.entries.is_empty()) {
        result.add_message(CmdMessage::info(format!(
            "No directories saved in '{}'",
            category
        )));
    }
    Ok(result)
}

/// Lists every category with its entries.
pub fn all(bookmarks: &Bookmarks, current: &str, default: &str) -> Result<CmdResult> {
    let listed: Vec<CategoryListing> = bookmarks
        .category_names()
        .filter_map(|name| CategoryListing::from_bookmarks(bookmarks, name, current, default))
        .collect();

    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No categories found"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PbjError;

    fn sample() -> Bookmarks {
        let mut bookmarks = Bookmarks::new();
        bookmarks.insert("work", "report", "/srv/report");
        bookmarks.insert("work", "api", "/srv/api");
        bookmarks.insert("home", "music", "/home/me/music");
        bookmarks.add_category("empty");
        bookmarks
    }

    #[test]
    fn test_lists_numbered_sorted_entries() {
        let result = run(&sample(), "work", "home", "work").unwrap();
        assert_eq!(result.listed.len(), 1);

        let listing = &result.listed[0];
        assert_eq!(listing.name, "work");
        assert!(!listing.is_current);
        assert!(listing.is_default);
        let keys: Vec<_> = listing
            .entries
            .iter()
            .map(|e| (e.ordinal, e.key.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, "api"), (2, "report")]);
    }

    #[test]
    fn test_empty_category_adds_message() {
        let result = run(&sample(), "empty", "home", "work").unwrap();
        assert!(result.listed[0].entries.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn test_missing_category() {
        assert!(matches!(
            run(&sample(), "nope", "home", "work"),
            Err(PbjError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_all_lists_every_category_in_order() {
        let result = all(&sample(), "home", "work").unwrap();
        let names: Vec<_> = result.listed.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "home", "work"]);
        assert!(result.listed[1].is_current);
    }

    #[test]
    fn test_all_empty_store() {
        let result = all(&Bookmarks::new(), "default", "default").unwrap();
        assert!(result.listed.is_empty());
        assert_eq!(result.messages[0].content, "No categories found");
    }
}
