//! Date helper functions

use crate::content::parse_date_string;

/// Fallback text for dates that cannot be parsed
const INVALID_DATE: &str = "Invalid Date";

/// Format a raw front-matter date value for display using a chrono strftime
/// format string.
///
/// A missing or unparsable date renders as `Invalid Date` rather than
/// failing; callers must not assume parse success.
pub fn display_date(raw: Option<&str>, format: &str) -> String {
    match raw.and_then(parse_date_string) {
        Some(date) => date.format(format).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(Some("2024-01-15"), "%Y-%m-%d"), "2024-01-15");
        assert_eq!(
            display_date(Some("2024-01-15"), "%B %-d, %Y"),
            "January 15, 2024"
        );
    }

    #[test]
    fn test_display_date_fallback() {
        assert_eq!(display_date(Some("soonish"), "%Y-%m-%d"), "Invalid Date");
        assert_eq!(display_date(None, "%Y-%m-%d"), "Invalid Date");
    }
}
