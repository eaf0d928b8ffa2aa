//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer
//! (plain or JSON) and an optional daily-rolling NDJSON file.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "quarry.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Level or filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for `quarry.log.YYYY-MM-DD`; no file output when `None`.
    pub dir: Option<PathBuf>,
    /// JSON lines on the console instead of human-readable output.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            json: false,
        }
    }
}

/// Initialize the global subscriber. Returns `false` if one was already set.
pub fn init_logger(options: &LogOptions) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    let (console_plain, console_json) = if options.json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_writer(std::io::stderr).with_target(false)),
            None,
        )
    };

    // An unusable log directory costs the file output, not the process.
    let (appender, file_error) = match options.dir.as_deref().map(open_log_file) {
        Some(Ok(appender)) => (Some(appender), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };
    let file_layer = appender.map(|appender| {
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_plain)
        .with(console_json)
        .with(file_layer)
        .try_init()
        .is_ok();

    if let (Some(e), Some(dir)) = (file_error, options.dir.as_ref()) {
        tracing::warn!(dir = %dir.display(), error = %e, "Log directory unusable; logging to console only");
    }
    installed
}

fn open_log_file(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let options = LogOptions {
            level: "debug".into(),
            dir: Some(dir.path().to_path_buf()),
            json: true,
        };
        assert!(init_logger(&options));
        tracing::info!(test = "logger", "written to the rolling file");
        assert!(!init_logger(&LogOptions::default()));
    }

    #[test]
    fn unusable_dir_falls_back_to_console() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let under_file = blocker.join("logs");

        assert!(open_log_file(&under_file).is_err());
        init_logger(&LogOptions {
            level: "info".into(),
            dir: Some(under_file),
            json: false,
        });
    }
}
