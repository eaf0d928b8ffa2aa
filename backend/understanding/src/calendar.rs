//! "Add to calendar" deep links.
//!
//! A parsed date becomes a one-hour event in the Google Calendar composer.
//! The text carries no zone, so both endpoints are stamped with the offset
//! of the environment building the link.

use chrono::{Duration, Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::date::parse_loose_date;

pub const CALENDAR_EVENT_URL: &str = "https://calendar.google.com/calendar/u/0/r/eventedit";

/// Fixed length of a synthesized event.
pub const EVENT_DURATION_MINUTES: i64 = 60;

/// Source of the local UTC offset.
///
/// Values use the "minutes behind UTC" convention (UTC minus local time),
/// so UTC+05:00 is `-300` and UTC−08:00 is `480`.
pub trait TimezoneOffset: Send + Sync {
    fn offset_minutes(&self, at: &NaiveDateTime) -> i32;
}

/// The host clock's timezone, looked up per instant so DST is honoured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimezone;

impl TimezoneOffset for LocalTimezone {
    fn offset_minutes(&self, at: &NaiveDateTime) -> i32 {
        // Times skipped by a DST jump have no local mapping; read them as UTC.
        let seconds_east = Local
            .from_local_datetime(at)
            .earliest()
            .map(|dt| dt.offset().local_minus_utc())
            .unwrap_or_else(|| Local.offset_from_utc_datetime(at).local_minus_utc());
        -seconds_east / 60
    }
}

/// A constant offset, in minutes behind UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimezone(pub i32);

impl TimezoneOffset for FixedTimezone {
    fn offset_minutes(&self, _at: &NaiveDateTime) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + Duration::minutes(EVENT_DURATION_MINUTES),
        }
    }

    /// Composer URL for this event.
    pub fn link(&self, tz: &dyn TimezoneOffset) -> String {
        format!(
            "{CALENDAR_EVENT_URL}?text=Event&dates={}/{}",
            format_event_time(&self.start, tz.offset_minutes(&self.start)),
            format_event_time(&self.end, tz.offset_minutes(&self.end)),
        )
    }
}

/// Calendar link for a raw date string; `None` when absent or unparseable.
pub fn build_calendar_link(raw: Option<&str>, tz: &dyn TimezoneOffset) -> Option<String> {
    let start = parse_loose_date(raw?)?;
    Some(CalendarEvent::starting_at(start).link(tz))
}

/// `YYYYMMDDThhmmss±hh:mm`. Seconds are always zero.
pub fn format_event_time(at: &NaiveDateTime, offset_minutes: i32) -> String {
    format!("{}{}", at.format("%Y%m%dT%H%M00"), offset_suffix(offset_minutes))
}

/// `±hh:mm` for an offset in minutes behind UTC. Zero is `+00:00`, never `Z`.
pub fn offset_suffix(offset_minutes: i32) -> String {
    let sign = if offset_minutes <= 0 { '+' } else { '-' };
    let abs = offset_minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}
