//! State of the image detail view.
//!
//! Every change arrives as a [`DetailEvent`]; [`DetailView::apply`] updates
//! the state and tells the caller what to do next. The overlay itself is a
//! pure function of the current state ([`DetailView::layer`]).

use quarry_core::{ExtractedEntities, OcrBlock, OcrPayload, RenderGeometry};
use quarry_understanding::{resolve_actions, Action, TimezoneOffset};
use tracing::{debug, info};

use crate::chips::{entity_chips, EntityChip};
use crate::geometry::GeometryProvider;
use crate::highlight::{ActiveEntity, HighlightMatcher};
use crate::layer::AnnotationLayer;

/// Identifies one OCR request. A response is only accepted while its
/// ticket is still the view's current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub image_id: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum DetailEvent {
    /// The view was opened (or re-targeted) on an image.
    Opened {
        image_id: String,
        entities: Option<ExtractedEntities>,
    },
    /// The image finished loading or was laid out again at a new size.
    ImageLoaded(RenderGeometry),
    OcrLoaded {
        ticket: FetchTicket,
        payload: OcrPayload,
    },
    ToggleEntity(String),
    QueryChanged(String),
    Closed,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Start fetching OCR for this ticket.
    Fetch(FetchTicket),
    /// The overlay changed and should be redrawn.
    Redraw,
    /// The view closed; drop any drawn overlay.
    Closed,
    /// Nothing changed.
    Ignored,
}

#[derive(Debug, Default)]
pub struct DetailView {
    generation: u64,
    current: Option<FetchTicket>,
    entities: Option<ExtractedEntities>,
    ocr: OcrPayload,
    geometry: Option<RenderGeometry>,
    active: ActiveEntity,
    query: String,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a search query already typed.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, event: DetailEvent) -> DetailOutcome {
        match event {
            DetailEvent::Opened { image_id, entities } => {
                self.generation += 1;
                let ticket = FetchTicket {
                    image_id,
                    generation: self.generation,
                };
                info!(image_id = %ticket.image_id, generation = ticket.generation, "Detail view opened");
                self.current = Some(ticket.clone());
                self.entities = entities;
                self.ocr = OcrPayload::default();
                self.geometry = None;
                self.active.clear();
                DetailOutcome::Fetch(ticket)
            }
            DetailEvent::ImageLoaded(geometry) => {
                if self.current.is_none() {
                    return DetailOutcome::Ignored;
                }
                self.geometry = Some(geometry);
                DetailOutcome::Redraw
            }
            DetailEvent::OcrLoaded { ticket, payload } => {
                if self.current.as_ref() != Some(&ticket) {
                    debug!(
                        image_id = %ticket.image_id,
                        generation = ticket.generation,
                        "Discarding stale OCR response"
                    );
                    return DetailOutcome::Ignored;
                }
                debug!(image_id = %ticket.image_id, blocks = payload.blocks.len(), "OCR applied");
                self.ocr = payload;
                DetailOutcome::Redraw
            }
            DetailEvent::ToggleEntity(kind) => {
                if self.current.is_none() {
                    return DetailOutcome::Ignored;
                }
                self.active.toggle(&kind);
                DetailOutcome::Redraw
            }
            DetailEvent::QueryChanged(query) => {
                self.query = query;
                if self.current.is_none() {
                    return DetailOutcome::Ignored;
                }
                DetailOutcome::Redraw
            }
            DetailEvent::Closed => {
                if let Some(ticket) = self.current.take() {
                    info!(image_id = %ticket.image_id, "Detail view closed");
                }
                self.entities = None;
                self.ocr = OcrPayload::default();
                self.geometry = None;
                self.active.clear();
                DetailOutcome::Closed
            }
        }
    }

    /// Re-measure the rendered image through `provider`.
    pub fn relayout(&mut self, provider: &dyn GeometryProvider) -> DetailOutcome {
        match provider.current() {
            Some(geometry) => self.apply(DetailEvent::ImageLoaded(geometry)),
            None => DetailOutcome::Ignored,
        }
    }

    /// The overlay for the current state; `None` until the image is open
    /// and laid out.
    pub fn layer(&self) -> Option<AnnotationLayer> {
        self.current.as_ref()?;
        let geometry = self.geometry.as_ref()?;
        let matcher = HighlightMatcher::new(
            &self.query,
            self.active.get(),
            &self.ocr.entity_block_idxs,
        );
        Some(AnnotationLayer::build(&self.ocr.blocks, geometry, &matcher))
    }

    pub fn chips(&self, limit: usize) -> Vec<EntityChip> {
        self.entities
            .as_ref()
            .map(|e| entity_chips(e, limit, &self.active))
            .unwrap_or_default()
    }

    pub fn actions(&self, tz: &dyn TimezoneOffset) -> Vec<Action> {
        resolve_actions(self.entities.as_ref(), tz)
    }

    pub fn current_ticket(&self) -> Option<&FetchTicket> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn active_entity(&self) -> Option<&str> {
        self.active.get()
    }

    pub fn blocks(&self) -> &[OcrBlock] {
        &self.ocr.blocks
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StaticGeometry;
    use quarry_core::{BBox, EntityBlockIndex, HighlightState};
    use quarry_understanding::{ActionKind, FixedTimezone};

    fn payload(texts: &[&str], entity: Option<(&str, Vec<usize>)>) -> OcrPayload {
        let mut idx = EntityBlockIndex::new();
        if let Some((kind, blocks)) = entity {
            idx.insert(kind, blocks);
        }
        OcrPayload {
            blocks: texts
                .iter()
                .enumerate()
                .map(|(i, t)| OcrBlock::new(*t, 90.0, BBox::new(0.0, i as f64 * 20.0, 100.0, 16.0)))
                .collect(),
            entity_block_idxs: idx,
        }
    }

    fn geometry() -> RenderGeometry {
        RenderGeometry::new(1000.0, 800.0, 500.0, 400.0).unwrap()
    }

    fn open(view: &mut DetailView, image_id: &str) -> FetchTicket {
        match view.apply(DetailEvent::Opened {
            image_id: image_id.into(),
            entities: None,
        }) {
            DetailOutcome::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn no_layer_until_image_loads() {
        let mut view = DetailView::new();
        let ticket = open(&mut view, "img-1");
        view.apply(DetailEvent::OcrLoaded { ticket, payload: payload(&["hello"], None) });
        assert!(view.layer().is_none());

        assert_eq!(view.apply(DetailEvent::ImageLoaded(geometry())), DetailOutcome::Redraw);
        let layer = view.layer().unwrap();
        assert_eq!(layer.boxes.len(), 1);
        assert_eq!(layer.boxes[0].rect.w, 50.0);
    }

    #[test]
    fn stale_ocr_response_is_discarded() {
        let mut view = DetailView::new();
        let first = open(&mut view, "img-1");
        view.apply(DetailEvent::Closed);
        let second = open(&mut view, "img-2");
        view.apply(DetailEvent::ImageLoaded(geometry()));

        let outcome = view.apply(DetailEvent::OcrLoaded {
            ticket: first,
            payload: payload(&["from img-1"], None),
        });
        assert_eq!(outcome, DetailOutcome::Ignored);
        assert!(view.blocks().is_empty());

        view.apply(DetailEvent::OcrLoaded { ticket: second, payload: payload(&["from img-2"], None) });
        assert_eq!(view.blocks()[0].text, "from img-2");
    }

    #[test]
    fn reopening_same_image_still_rejects_older_request() {
        let mut view = DetailView::new();
        let first = open(&mut view, "img-1");
        let second = open(&mut view, "img-1");
        assert_ne!(first, second);
        assert_eq!(
            view.apply(DetailEvent::OcrLoaded { ticket: first, payload: payload(&["old"], None) }),
            DetailOutcome::Ignored
        );
    }

    #[test]
    fn entity_toggle_and_query_drive_highlights() {
        let mut view = DetailView::with_query("total");
        let ticket = open(&mut view, "receipt");
        view.apply(DetailEvent::OcrLoaded {
            ticket,
            payload: payload(&["Total $42", "a@b.com", "Thanks"], Some(("email", vec![1]))),
        });
        view.apply(DetailEvent::ImageLoaded(geometry()));

        let layer = view.layer().unwrap();
        assert_eq!(layer.boxes[0].state, HighlightState::TextMatch);
        assert_eq!(layer.count(HighlightState::EntityMatch), 0);

        view.apply(DetailEvent::ToggleEntity("email".into()));
        assert_eq!(view.layer().unwrap().boxes[1].state, HighlightState::EntityMatch);

        view.apply(DetailEvent::ToggleEntity("email".into()));
        assert_eq!(view.active_entity(), None);
        assert_eq!(view.layer().unwrap().count(HighlightState::EntityMatch), 0);

        view.apply(DetailEvent::QueryChanged(String::new()));
        assert_eq!(view.layer().unwrap().count(HighlightState::TextMatch), 0);
    }

    #[test]
    fn closing_clears_overlay() {
        let mut view = DetailView::new();
        open(&mut view, "img-1");
        view.apply(DetailEvent::ImageLoaded(geometry()));
        assert_eq!(view.apply(DetailEvent::Closed), DetailOutcome::Closed);
        assert!(view.layer().is_none());
        assert_eq!(view.apply(DetailEvent::ImageLoaded(geometry())), DetailOutcome::Ignored);
    }

    #[test]
    fn relayout_uses_provider_geometry() {
        let mut view = DetailView::new();
        let ticket = open(&mut view, "img-1");
        view.apply(DetailEvent::OcrLoaded { ticket, payload: payload(&["x"], None) });
        let wide = RenderGeometry::new(1000.0, 800.0, 2000.0, 800.0).unwrap();
        assert_eq!(view.relayout(&StaticGeometry(wide)), DetailOutcome::Redraw);
        let rect = view.layer().unwrap().boxes[0].rect;
        assert_eq!((rect.w, rect.h), (200.0, 16.0));
    }

    #[test]
    fn chips_and_actions_come_from_opened_entities() {
        let mut view = DetailView::new();
        let entities = ExtractedEntities::new()
            .with("date", &["22 Nov 2025 3:30 PM"])
            .with("email", &["a@b.com"]);
        view.apply(DetailEvent::Opened { image_id: "img".into(), entities: Some(entities) });
        view.apply(DetailEvent::ToggleEntity("email".into()));

        let chips = view.chips(8);
        assert_eq!(chips.len(), 2);
        assert!(chips[1].active);

        let kinds: Vec<_> = view.actions(&FixedTimezone(-300)).iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Email, ActionKind::AddToCalendar]);
    }
}
