//! Which OCR boxes to highlight, and why.
//!
//! An entity match always wins over a text match.

use std::collections::HashSet;

use quarry_core::{EntityBlockIndex, HighlightState, OcrBlock};

/// Classify one block.
///
/// `query` is compared case-insensitively after trimming; a blank query
/// matches nothing. Entity indices past the end of the block list never
/// match anything.
pub fn classify(
    block_index: usize,
    block_text: &str,
    query: &str,
    active_entity: Option<&str>,
    entity_blocks: &EntityBlockIndex,
) -> HighlightState {
    HighlightMatcher::new(query, active_entity, entity_blocks).state_for(block_index, block_text)
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// `classify` with the query and active index set prepared once, for
/// classifying every block of an image in a single pass.
#[derive(Debug, Clone, Default)]
pub struct HighlightMatcher {
    needle: String,
    active_blocks: HashSet<usize>,
}

impl HighlightMatcher {
    pub fn new(query: &str, active_entity: Option<&str>, entity_blocks: &EntityBlockIndex) -> Self {
        Self {
            needle: normalize_query(query),
            active_blocks: active_entity
                .map(|kind| entity_blocks.indices_for(kind))
                .unwrap_or_default(),
        }
    }

    pub fn state_for(&self, block_index: usize, block_text: &str) -> HighlightState {
        if self.active_blocks.contains(&block_index) {
            HighlightState::EntityMatch
        } else if !self.needle.is_empty() && block_text.to_lowercase().contains(&self.needle) {
            HighlightState::TextMatch
        } else {
            HighlightState::None
        }
    }

    pub fn classify_all(&self, blocks: &[OcrBlock]) -> Vec<HighlightState> {
        blocks
            .iter()
            .enumerate()
            .map(|(i, b)| self.state_for(i, &b.text))
            .collect()
    }
}

/// The single entity type selected for highlighting, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEntity(Option<String>);

impl ActiveEntity {
    pub fn none() -> Self {
        Self(None)
    }

    /// Select `kind`, or clear the selection if `kind` is already selected.
    pub fn toggle(&mut self, kind: &str) {
        if self.0.as_deref() == Some(kind) {
            self.0 = None;
        } else {
            self.0 = Some(kind.to_string());
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is(&self, kind: &str) -> bool {
        self.0.as_deref() == Some(kind)
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}
