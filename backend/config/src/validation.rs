//! Config validation with user-friendly messages.

use crate::schema::QuarryConfig;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &QuarryConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_api_base(config, &mut report);
    validate_logging(config, &mut report);
    validate_overlay(config, &mut report);
    report
}

fn validate_api_base(config: &QuarryConfig, report: &mut ValidationReport) {
    let Some(base) = &config.api_base else { return };
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        report.error("apiBase", format!("Expected an http(s) URL, got \"{base}\""));
    } else if base.ends_with('/') {
        report.warn("apiBase", "Trailing '/' is ignored");
    }
}

/// Plain levels are checked; filter directives (`quarry=debug,...`) are passed through.
fn validate_logging(config: &QuarryConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    let is_directive = level.contains('=') || level.contains(',');
    if !is_directive && !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level \"{level}\"; using it as a filter"));
    }
}

fn validate_overlay(config: &QuarryConfig, report: &mut ValidationReport) {
    let Some(overlay) = &config.overlay else { return };
    if overlay.detail_chip_limit == Some(0) {
        report.warn("overlay.detailChipLimit", "0 hides every entity chip in the detail view");
    }
    if overlay.card_chip_limit == Some(0) {
        report.warn("overlay.cardChipLimit", "0 hides every entity chip on result cards");
    }
}
