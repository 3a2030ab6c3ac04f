//! Cleanup for provider text fields.
//!
//! Naver wraps matched terms in `<b>` tags and HTML-escapes the rest.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tags regex"));
static POST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})$").expect("valid post date regex")
});

/// Removes markup and decodes the handful of entities Naver emits.
#[must_use]
pub fn strip_html(input: &str) -> String {
    let no_tags = TAGS.replace_all(input, "");
    no_tags
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// `20240115` → `2024.01.15`. Anything that is not a valid `YYYYMMDD` date
/// is returned unchanged.
#[must_use]
pub fn format_post_date(raw: &str) -> String {
    POST_DATE
        .captures(raw)
        .and_then(|caps| {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .map_or_else(|| raw.to_string(), |d| d.format("%Y.%m.%d").to_string())
}
