//! Quarry client configuration schema.
//!
//! Every field is optional in the file; `defaults::apply_all_defaults`
//! fills in anything left out.

use serde::{Deserialize, Serialize};

/// Root configuration (`config.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarryConfig {
    /// Base URL of the indexing service, e.g. `http://localhost:8000`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Detail overlay and entity chip settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling JSON log files; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Emit JSON on the console instead of human-readable lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Entity chips shown in the detail view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_chip_limit: Option<usize>,
    /// Entity chips shown on a search result card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_chip_limit: Option<usize>,
}

impl QuarryConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(crate::defaults::DEFAULT_API_BASE)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn detail_chip_limit(&self) -> usize {
        self.overlay
            .as_ref()
            .and_then(|o| o.detail_chip_limit)
            .unwrap_or(crate::defaults::DEFAULT_DETAIL_CHIP_LIMIT)
    }

    pub fn card_chip_limit(&self) -> usize {
        self.overlay
            .as_ref()
            .and_then(|o| o.card_chip_limit)
            .unwrap_or(crate::defaults::DEFAULT_CARD_CHIP_LIMIT)
    }
}
