//! Async driver for a [`DetailView`].
//!
//! Events come in on an `mpsc` channel, OCR fetches run as spawned tasks
//! that post their result back as [`DetailEvent::OcrLoaded`], and every
//! overlay change is published on a `broadcast` channel.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use quarry_client::{fetch_ocr_or_empty, OcrSource};

use crate::detail::{DetailEvent, DetailOutcome, DetailView, FetchTicket};
use crate::layer::AnnotationLayer;

const DEFAULT_BUFFER_SIZE: usize = 64;

/// Published whenever the overlay should change on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerUpdate {
    Drawn(AnnotationLayer),
    Cleared,
}

pub struct DetailSession {
    view: DetailView,
    source: Arc<dyn OcrSource>,
    events_tx: mpsc::Sender<DetailEvent>,
    events_rx: mpsc::Receiver<DetailEvent>,
    layer_tx: broadcast::Sender<LayerUpdate>,
}

impl DetailSession {
    pub fn new(source: Arc<dyn OcrSource>) -> Self {
        Self::with_view(source, DetailView::new())
    }

    pub fn with_view(source: Arc<dyn OcrSource>, view: DetailView) -> Self {
        let (events_tx, events_rx) = mpsc::channel(DEFAULT_BUFFER_SIZE);
        let (layer_tx, _) = broadcast::channel(DEFAULT_BUFFER_SIZE);
        Self {
            view,
            source,
            events_tx,
            events_rx,
            layer_tx,
        }
    }

    /// Handle for posting events into the session.
    pub fn sender(&self) -> mpsc::Sender<DetailEvent> {
        self.events_tx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LayerUpdate> {
        self.layer_tx.subscribe()
    }

    /// Process events until every external sender is dropped, then hand
    /// back the final view state.
    pub async fn run(self) -> DetailView {
        let Self {
            mut view,
            source,
            events_tx,
            mut events_rx,
            layer_tx,
        } = self;

        // Fetch tasks only hold a weak handle so they don't keep the loop alive.
        let weak_tx = events_tx.downgrade();
        drop(events_tx);

        info!("Detail session started");
        while let Some(event) = events_rx.recv().await {
            match view.apply(event) {
                DetailOutcome::Fetch(ticket) => {
                    spawn_fetch(Arc::clone(&source), ticket, weak_tx.clone());
                }
                DetailOutcome::Redraw => {
                    if let Some(layer) = view.layer() {
                        let _ = layer_tx.send(LayerUpdate::Drawn(layer));
                    }
                }
                DetailOutcome::Closed => {
                    let _ = layer_tx.send(LayerUpdate::Cleared);
                }
                DetailOutcome::Ignored => {}
            }
        }
        info!("Detail session ended");
        view
    }
}

fn spawn_fetch(
    source: Arc<dyn OcrSource>,
    ticket: FetchTicket,
    events: mpsc::WeakSender<DetailEvent>,
) {
    tokio::spawn(async move {
        let payload = fetch_ocr_or_empty(source.as_ref(), &ticket.image_id).await;
        match events.upgrade() {
            Some(tx) => {
                let _ = tx.send(DetailEvent::OcrLoaded { ticket, payload }).await;
            }
            None => debug!(image_id = %ticket.image_id, "Session gone; dropping OCR response"),
        }
    });
}
