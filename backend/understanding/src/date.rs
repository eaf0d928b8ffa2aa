//! Loose date parser for date strings pulled out of screenshots.
//!
//! Two shapes are recognised, searched anywhere in the input:
//!
//! - named month: `22 Nov 2025`, `22 November 2025 3:30 PM`
//! - US numeric:  `11/22/2025`, `11/22/25 15:30`
//!
//! A missing time means 09:00. Field values are not range checked; they roll
//! over like a wall calendar does (`30 Feb 2025` is 2 March 2025).

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Hour used when the text carries a date but no time.
pub const DEFAULT_HOUR: i64 = 9;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static NAMED_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2})\s+([a-z]{3,9})\s+([0-9]{4})(?:\s+([0-9]{1,2}):([0-9]{2})\s*(am|pm)?)?")
        .unwrap()
});

static SLASH_NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})(?:\s+([0-9]{1,2}):([0-9]{2}))?").unwrap()
});

/// Parse free text into a local date-time. `None` when nothing date-like
/// is found.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDateTime> {
    let parsed = parse_named_month(raw).or_else(|| parse_slash_numeric(raw));
    if parsed.is_none() {
        debug!(input = %raw, "No date pattern recognised");
    }
    parsed
}

/// Zero-based month index for a month name; only the first three letters count.
pub fn month_index(name: &str) -> Option<usize> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTHS.iter().position(|m| *m == prefix)
}

fn parse_named_month(raw: &str) -> Option<NaiveDateTime> {
    let caps = NAMED_MONTH_RE.captures(raw)?;
    let day = int_group(&caps, 1)?;
    let month0 = month_index(&caps[2])? as i64;
    let year = int_group(&caps, 3)?;
    let mut hour = int_group(&caps, 4).unwrap_or(DEFAULT_HOUR);
    let minute = int_group(&caps, 5).unwrap_or(0);

    match caps.get(6).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("PM") if hour < 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    calendar_datetime(year, month0, day, hour, minute)
}

fn parse_slash_numeric(raw: &str) -> Option<NaiveDateTime> {
    let caps = SLASH_NUMERIC_RE.captures(raw)?;
    let month0 = int_group(&caps, 1)? - 1;
    let day = int_group(&caps, 2)?;
    let year_text = &caps[3];
    let year = if year_text.len() == 2 {
        2000 + year_text.parse::<i64>().ok()?
    } else {
        year_text.parse::<i64>().ok()?
    };
    let hour = int_group(&caps, 4).unwrap_or(DEFAULT_HOUR);
    let minute = int_group(&caps, 5).unwrap_or(0);

    calendar_datetime(year, month0, day, hour, minute)
}

fn int_group(caps: &Captures<'_>, idx: usize) -> Option<i64> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Build a date-time from possibly out-of-range fields, carrying overflow
/// into the next larger unit.
fn calendar_datetime(
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
) -> Option<NaiveDateTime> {
    let year = i32::try_from(year + month0.div_euclid(12)).ok()?;
    let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;

    first_of_month
        .checked_add_signed(Duration::days(day - 1))?
        .checked_add_signed(Duration::hours(hour))?
        .checked_add_signed(Duration::minutes(minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ymd_hm(raw: &str) -> (i32, u32, u32, u32, u32) {
        let d = parse_loose_date(raw).unwrap_or_else(|| panic!("expected {raw:?} to parse"));
        (d.year(), d.month(), d.day(), d.hour(), d.minute())
    }

    #[test]
    fn named_month_with_pm() {
        assert_eq!(ymd_hm("22 Nov 2025 3:30 PM"), (2025, 11, 22, 15, 30));
    }

    #[test]
    fn midnight_am_is_hour_zero() {
        assert_eq!(ymd_hm("22 Nov 2025 12:00 AM"), (2025, 11, 22, 0, 0));
    }

    #[test]
    fn morning_am_keeps_its_hour() {
        assert_eq!(ymd_hm("3 Jan 2025 9:15 AM"), (2025, 1, 3, 9, 15));
    }

    #[test]
    fn noon_pm_stays_twelve() {
        assert_eq!(ymd_hm("1 Jan 2026 12:15 pm"), (2026, 1, 1, 12, 15));
    }

    #[test]
    fn named_month_without_time_defaults_to_nine() {
        assert_eq!(ymd_hm("5 March 2024"), (2024, 3, 5, 9, 0));
    }

    #[test]
    fn twenty_four_hour_time_without_suffix() {
        assert_eq!(ymd_hm("7 oct 2025 18:05"), (2025, 10, 7, 18, 5));
    }

    #[test]
    fn pattern_found_inside_surrounding_text() {
        assert_eq!(ymd_hm("Check-in: Sat 14 Jun 2025 2:00 PM local"), (2025, 6, 14, 14, 0));
    }

    #[test]
    fn slash_numeric_two_digit_year() {
        assert_eq!(ymd_hm("11/22/25"), (2025, 11, 22, 9, 0));
    }

    #[test]
    fn slash_numeric_with_time() {
        assert_eq!(ymd_hm("11/22/2025 15:30"), (2025, 11, 22, 15, 30));
    }

    #[test]
    fn unknown_month_falls_through_to_slash_form() {
        assert!(parse_named_month("12 Foo 2025").is_none());
        assert_eq!(ymd_hm("12 Foo 2025 (3/4/2025)"), (2025, 3, 4, 9, 0));
    }

    #[test]
    fn unknown_month_alone_fails() {
        assert!(parse_loose_date("12 Foo 2025").is_none());
    }

    #[test]
    fn day_overflow_rolls_into_next_month() {
        assert_eq!(ymd_hm("30 Feb 2025"), (2025, 3, 2, 9, 0));
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        assert_eq!(ymd_hm("13/01/2025"), (2026, 1, 1, 9, 0));
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_loose_date("not a date").is_none());
        assert!(parse_loose_date("").is_none());
    }

    #[test]
    fn month_index_uses_three_letter_prefix() {
        assert_eq!(month_index("September"), Some(8));
        assert_eq!(month_index("DEC"), Some(11));
        assert_eq!(month_index("Ju"), None);
    }
}
