//! Config defaults: applies default values to parsed config.

use crate::schema::{LoggingConfig, OverlayConfig, QuarryConfig};

/// Indexing service address when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Entity chips in the detail view.
pub const DEFAULT_DETAIL_CHIP_LIMIT: usize = 8;

/// Entity chips on a search result card.
pub const DEFAULT_CARD_CHIP_LIMIT: usize = 4;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: QuarryConfig) -> QuarryConfig {
    let config = apply_api_defaults(config);
    let config = apply_logging_defaults(config);
    apply_overlay_defaults(config)
}

fn apply_api_defaults(mut config: QuarryConfig) -> QuarryConfig {
    if config.api_base.as_deref().map_or(true, |b| b.trim().is_empty()) {
        config.api_base = Some(DEFAULT_API_BASE.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: QuarryConfig) -> QuarryConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}

fn apply_overlay_defaults(mut config: QuarryConfig) -> QuarryConfig {
    let overlay = config.overlay.get_or_insert_with(OverlayConfig::default);
    overlay.detail_chip_limit.get_or_insert(DEFAULT_DETAIL_CHIP_LIMIT);
    overlay.card_chip_limit.get_or_insert(DEFAULT_CARD_CHIP_LIMIT);
    config
}
