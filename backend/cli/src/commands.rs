use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use quarry_client::{fetch_ocr_or_empty, image_src, HttpOcrSource};
use quarry_config::QuarryConfig;
use quarry_core::{ExtractedEntities, RenderGeometry};
use quarry_overlay::{
    entity_chips, ActiveEntity, AnnotationLayer, DetailEvent, DetailOutcome, DetailView, EntityChip,
};
use quarry_understanding::{
    build_calendar_link, resolve_actions, Action, FixedTimezone, LocalTimezone, TimezoneOffset,
};

/// `WIDTHxHEIGHT`, e.g. `1920x1080`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dims {
    pub width: f64,
    pub height: f64,
}

impl FromStr for Dims {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got \"{s}\""))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("bad dimension \"{v}\": {e}"))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

pub struct OverlayRequest {
    pub image_id: String,
    pub natural: Dims,
    pub rendered: Dims,
    pub query: String,
    pub entity: Option<String>,
    pub entities: Option<String>,
    pub tz_offset: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayReport {
    image_id: String,
    image_src: String,
    layer: Option<AnnotationLayer>,
    chips: Vec<EntityChip>,
    actions: Vec<Action>,
}

fn timezone(tz_offset: Option<i32>) -> Box<dyn TimezoneOffset> {
    match tz_offset {
        Some(minutes) => Box::new(FixedTimezone(minutes)),
        None => Box::new(LocalTimezone),
    }
}

fn parse_entities(json: &str) -> Result<ExtractedEntities> {
    serde_json::from_str(json).context("Entities must be a JSON object of type -> [values]")
}

pub fn calendar_line(text: &str, tz: &dyn TimezoneOffset) -> String {
    build_calendar_link(Some(text), tz).unwrap_or_else(|| "No date recognised".to_string())
}

pub fn calendar(text: &str, tz_offset: Option<i32>) -> Result<()> {
    println!("{}", calendar_line(text, timezone(tz_offset).as_ref()));
    Ok(())
}

/// Result-card view of an entity map: its chips, then its actions.
pub fn action_lines(entities: &ExtractedEntities, chip_limit: usize, tz: &dyn TimezoneOffset) -> Vec<String> {
    let mut lines: Vec<String> = entity_chips(entities, chip_limit, &ActiveEntity::none())
        .into_iter()
        .map(|chip| format!("[{}]", chip.label))
        .collect();

    let actions = resolve_actions(Some(entities), tz);
    if actions.is_empty() {
        lines.push("No actions".to_string());
    }
    lines.extend(
        actions
            .iter()
            .map(|action| format!("{:<16} {}", action.label(), action.href)),
    );
    lines
}

pub fn actions(config: &QuarryConfig, entities_json: &str, tz_offset: Option<i32>) -> Result<()> {
    let entities = parse_entities(entities_json)?;
    for line in action_lines(&entities, config.card_chip_limit(), timezone(tz_offset).as_ref()) {
        println!("{line}");
    }
    Ok(())
}

pub async fn overlay(config: &QuarryConfig, req: OverlayRequest) -> Result<()> {
    let geometry = RenderGeometry::new(
        req.natural.width,
        req.natural.height,
        req.rendered.width,
        req.rendered.height,
    )?;
    let entities = req.entities.as_deref().map(parse_entities).transpose()?;
    let source = HttpOcrSource::new(config.api_base());

    let mut view = DetailView::with_query(req.query);
    if let DetailOutcome::Fetch(ticket) = view.apply(DetailEvent::Opened {
        image_id: req.image_id.clone(),
        entities,
    }) {
        let payload = fetch_ocr_or_empty(&source, &ticket.image_id).await;
        view.apply(DetailEvent::OcrLoaded { ticket, payload });
    }
    view.apply(DetailEvent::ImageLoaded(geometry));
    if let Some(kind) = req.entity {
        view.apply(DetailEvent::ToggleEntity(kind));
    }

    let report = OverlayReport {
        image_src: image_src(config.api_base(), &req.image_id),
        image_id: req.image_id,
        layer: view.layer(),
        chips: view.chips(config.detail_chip_limit()),
        actions: view.actions(timezone(req.tz_offset).as_ref()),
    };
    info!(
        image_id = %report.image_id,
        boxes = report.layer.as_ref().map_or(0, |l| l.boxes.len()),
        "Overlay computed"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dims() {
        assert_eq!(
            "1920x1080".parse::<Dims>().unwrap(),
            Dims { width: 1920.0, height: 1080.0 }
        );
        assert_eq!("640 X 480.5".parse::<Dims>().unwrap().height, 480.5);
        assert!("1920".parse::<Dims>().is_err());
        assert!("axb".parse::<Dims>().is_err());
    }

    #[test]
    fn calendar_line_for_good_and_bad_input() {
        let tz = FixedTimezone(-300);
        assert!(calendar_line("22 Nov 2025 3:30 PM", &tz)
            .ends_with("dates=20251122T153000+05:00/20251122T163000+05:00"));
        assert_eq!(calendar_line("whenever", &tz), "No date recognised");
    }

    #[test]
    fn card_chips_are_limited_before_actions() {
        let entities = parse_entities(
            r#"{"amount": ["$4"], "url": ["https://q.io"], "email": ["a@b.com"]}"#,
        )
        .unwrap();
        let lines = action_lines(&entities, 2, &FixedTimezone(0));
        assert_eq!(lines[0], "[amount: $4]");
        assert_eq!(lines[1], "[url: https://q.io]");
        assert!(lines[2].starts_with("Open Link"));
        assert!(lines[3].ends_with("mailto:a@b.com"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn no_actions_still_lists_chips() {
        let entities = parse_entities(r#"{"code": ["AB12"]}"#).unwrap();
        assert_eq!(
            action_lines(&entities, 4, &FixedTimezone(0)),
            vec!["[code: AB12]".to_string(), "No actions".to_string()]
        );
    }

    #[test]
    fn entities_json_must_be_a_map() {
        assert!(parse_entities(r#"{"url": ["https://q.io"]}"#).is_ok());
        assert!(parse_entities(r#"["https://q.io"]"#).is_err());
    }
}
