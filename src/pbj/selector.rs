use std::str::FromStr;

/// A user input identifying a bookmark within a category, either by its
/// 1-based position in the sorted listing or by its key name.
///
/// Parsed once at the API boundary; commands never re-interpret raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    ByOrdinal(usize),
    ByName(String),
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::ByOrdinal(n) => write!(f, "{}", n),
            Selector::ByName(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    /// Digit-only input is an ordinal; anything else is a key name. Key names
    /// can never be digit-only, so the two never overlap.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = s.parse() {
                return Ok(Selector::ByOrdinal(n));
            }
        }
        Ok(Selector::ByName(s.to_string()))
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordinal() {
        assert_eq!(Selector::from("1"), Selector::ByOrdinal(1));
        assert_eq!(Selector::from("042"), Selector::ByOrdinal(42));
        assert_eq!(Selector::from("0"), Selector::ByOrdinal(0));
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(Selector::from("api"), Selector::ByName("api".into()));
        assert_eq!(Selector::from("v1.2"), Selector::ByName("v1.2".into()));
        assert_eq!(Selector::from("-1"), Selector::ByName("-1".into()));
        assert_eq!(Selector::from(""), Selector::ByName("".into()));
    }

    #[test]
    fn test_overflowing_number_is_a_name() {
        let huge = "99999999999999999999999999999";
        assert_eq!(Selector::from(huge), Selector::ByName(huge.into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selector::ByOrdinal(3).to_string(), "3");
        assert_eq!(Selector::ByName("api".into()).to_string(), "api");
    }
}
