//! Shared display helpers for update results and bundle status.
//!
//! Used by `update` and `status` so both render dates and durations the
//! same way.

use chrono::{DateTime, Local, Utc};

use crate::updater::UpdateResult;

/// Headline for an update result.
pub fn result_headline(result: &UpdateResult) -> &'static str {
    if result.is_updated() {
        "The HTTPS client certificate has been updated."
    } else {
        "The HTTPS client certificate is already up-to-date."
    }
}

/// Line announcing when the bundle will next be refreshed.
pub fn next_refresh_line(result: &UpdateResult) -> String {
    format!(
        "The file will be updated on {}",
        format_timestamp(result.next_refresh_at())
    )
}

/// Format a timestamp in the local timezone.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

/// Format a number of seconds as a compact duration ("15d", "3h 20m", "42s").
pub fn format_seconds(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    format!("{}{}", sign, format_magnitude(secs.unsigned_abs()))
}

fn format_magnitude(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    } else if hours > 0 {
        if mins > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_for_updated() {
        let result = UpdateResult::updated("/tmp/ca.pem", None, Utc::now(), "https://x");
        assert!(result_headline(&result).contains("has been updated"));
    }

    #[test]
    fn headline_for_up_to_date() {
        let result = UpdateResult::already_up_to_date("/tmp/ca.pem", None, Utc::now());
        assert!(result_headline(&result).contains("already up-to-date"));
    }

    #[test]
    fn next_refresh_line_mentions_date() {
        let at = DateTime::parse_from_rfc3339("2030-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let result = UpdateResult::already_up_to_date("/tmp/ca.pem", None, at);
        let line = next_refresh_line(&result);

        assert!(line.starts_with("The file will be updated on "));
        assert!(line.contains(&format_timestamp(at)));
    }

    #[test]
    fn format_seconds_days() {
        assert_eq!(format_seconds(1_296_000), "15d");
        assert_eq!(format_seconds(90_000), "1d 1h");
    }

    #[test]
    fn format_seconds_hours() {
        assert_eq!(format_seconds(3600), "1h");
        assert_eq!(format_seconds(12_000), "3h 20m");
    }

    #[test]
    fn format_seconds_minutes_and_seconds() {
        assert_eq!(format_seconds(300), "5m");
        assert_eq!(format_seconds(42), "42s");
        assert_eq!(format_seconds(0), "0s");
    }

    #[test]
    fn format_seconds_negative() {
        assert_eq!(format_seconds(-42), "-42s");
        assert_eq!(format_seconds(-3 * 3600), "-3h");
    }

    #[test]
    fn format_seconds_extremes() {
        assert_eq!(format_seconds(i64::MIN), "-106751991167300d 15h");
        assert_eq!(format_seconds(i64::MAX), "106751991167300d 15h");
    }
}
