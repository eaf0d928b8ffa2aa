//! Smart actions offered for a screenshot's extracted entities.
//!
//! At most one action per recognised entity type, built from that type's
//! first value, in a fixed order: link, email, phone, calendar.

use quarry_core::ExtractedEntities;
use serde::Serialize;

use crate::calendar::{build_calendar_link, TimezoneOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    OpenLink,
    Email,
    Call,
    AddToCalendar,
}

impl ActionKind {
    /// Entity type this action is built from.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::OpenLink => "url",
            Self::Email => "email",
            Self::Call => "phone",
            Self::AddToCalendar => "date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenLink => "Open Link",
            Self::Email => "Email",
            Self::Call => "Call",
            Self::AddToCalendar => "Add to Calendar",
        }
    }

    /// Whether the target opens outside the current view (new tab/app).
    pub fn opens_in_new_context(&self) -> bool {
        matches!(self, Self::OpenLink | Self::AddToCalendar)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub href: String,
}

impl Action {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Resolve the action list for an entity map. Absent entities ⇒ no actions.
pub fn resolve_actions(
    entities: Option<&ExtractedEntities>,
    tz: &dyn TimezoneOffset,
) -> Vec<Action> {
    let Some(entities) = entities else {
        return Vec::new();
    };

    let mut actions = Vec::new();

    if let Some(url) = entities.first("url").filter(|v| !v.is_empty()) {
        actions.push(Action {
            kind: ActionKind::OpenLink,
            href: url.to_string(),
        });
    }

    if let Some(email) = entities.first("email").filter(|v| !v.is_empty()) {
        actions.push(Action {
            kind: ActionKind::Email,
            href: format!("mailto:{email}"),
        });
    }

    if let Some(phone) = entities.first("phone") {
        let digits = sanitize_phone(phone);
        if !digits.is_empty() {
            actions.push(Action {
                kind: ActionKind::Call,
                href: format!("tel:{digits}"),
            });
        }
    }

    if let Some(href) = build_calendar_link(entities.first("date"), tz) {
        actions.push(Action {
            kind: ActionKind::AddToCalendar,
            href,
        });
    }

    actions
}

/// Keep only `+` and ASCII digits.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c == '+' || c.is_ascii_digit())
        .collect()
}
