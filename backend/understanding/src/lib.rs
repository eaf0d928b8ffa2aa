//! Turns extracted entities into things a user can act on: parsed dates,
//! calendar deep links and open/mail/call actions.

pub mod actions;
pub mod calendar;
pub mod date;

pub use actions::{resolve_actions, sanitize_phone, Action, ActionKind};
pub use calendar::{
    build_calendar_link, CalendarEvent, FixedTimezone, LocalTimezone, TimezoneOffset,
};
pub use date::parse_loose_date;
