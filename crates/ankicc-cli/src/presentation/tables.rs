//! Table formatting utilities for CLI output.

use chrono::{DateTime, Utc};

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// Counts characters rather than bytes so multi-byte field names and
/// inputs never split mid-character.
///
/// # Examples
///
/// ```rust
/// use ankicc_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Format a UTC timestamp for table display, or `raw` when there is none.
pub fn format_timestamp(at: Option<DateTime<Utc>>, raw: &str) -> String {
    at.map_or_else(
        || raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ねこねこねこ", 5), "ねこ...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(&7), "--"), "7");
        assert_eq!(format_optional::<i64>(None, "--"), "--");
    }

    #[test]
    fn test_format_timestamp() {
        let epoch = DateTime::from_timestamp_millis(0);
        assert_eq!(format_timestamp(epoch, "0"), "1970-01-01 00:00:00");
        let later = DateTime::from_timestamp_millis(1_695_300_000_000);
        assert_eq!(format_timestamp(later, "x"), "2023-09-21 12:40:00");
        assert_eq!(format_timestamp(None, "9223372036854775807"), "9223372036854775807");
    }
}
