//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

/// Front-matter data from a post or page
///
/// `title` and `date` are the only keys the rest of the system looks at;
/// anything else is kept in `extra` in document order but otherwise unused.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    /// Additional custom fields
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// The header is only recognized when the very first line of the
    /// document is a `---` delimiter; `---` lines further down (markdown
    /// horizontal rules) belong to the body and are never consumed.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some(rest) = strip_opening_delimiter(content) else {
            return (Self::default(), content);
        };

        let mut fm = Self::default();
        let mut pos = 0;
        let mut closed = false;

        while pos < rest.len() {
            let line_end = rest[pos..]
                .find('\n')
                .map(|i| pos + i + 1)
                .unwrap_or(rest.len());
            let line = rest[pos..line_end].trim_end_matches(['\n', '\r']);
            pos = line_end;

            if line.trim() == "---" {
                closed = true;
                break;
            }

            // Split on the first colon; lines without one are skipped
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    fm.set(key, value.trim());
                }
            }
        }

        if !closed {
            // No closing delimiter, treat as no front-matter
            return (Self::default(), content);
        }

        let body = rest[pos..].trim_start_matches(['\n', '\r']);
        (fm, body)
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }

    fn set(&mut self, key: &str, value: &str) {
        // Keys are case-sensitive literal matches
        match key {
            "title" => self.title = Some(value.to_string()),
            "date" => self.date = Some(value.to_string()),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }
}

/// Check whether the first line of the document is a `---` delimiter and
/// return everything after it.
fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    if first.trim_end_matches('\r') == "---" {
        Some(rest)
    } else {
        None
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
