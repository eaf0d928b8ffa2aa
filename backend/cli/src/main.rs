mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use quarry_logging::{init_logger, LogOptions};

use commands::Dims;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Quarry — annotate and act on indexed screenshots")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.quarry/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the calendar deep link for a date string
    Calendar {
        /// Free text containing a date, e.g. "22 Nov 2025 3:30 PM"
        text: String,
        /// Minutes behind UTC (UTC+05:00 is -300); host timezone when omitted
        #[arg(long, allow_hyphen_values = true)]
        tz_offset: Option<i32>,
    },
    /// Show result-card chips and smart actions for an entity map given as JSON
    Actions {
        /// e.g. '{"url": ["https://example.com"], "phone": ["(555) 555-1212"]}'
        entities: String,
        #[arg(long, allow_hyphen_values = true)]
        tz_offset: Option<i32>,
    },
    /// Fetch OCR for an image and print its annotation overlay
    Overlay {
        image_id: String,
        /// Natural bitmap size, WIDTHxHEIGHT
        #[arg(long)]
        natural: Dims,
        /// Rendered size, WIDTHxHEIGHT
        #[arg(long)]
        rendered: Dims,
        /// Search text to highlight
        #[arg(long, default_value = "")]
        query: String,
        /// Entity type to highlight
        #[arg(long)]
        entity: Option<String>,
        /// Entity map of the search result, as JSON
        #[arg(long)]
        entities: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        tz_offset: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => quarry_config::load_and_prepare(path).await?,
        None => quarry_config::load_default().await?,
    };

    let logging = config.logging.clone().unwrap_or_default();
    init_logger(&LogOptions {
        level: config.log_level().to_string(),
        dir: logging.dir.map(PathBuf::from),
        json: logging.json.unwrap_or(false),
    });

    match cli.command {
        Commands::Calendar { text, tz_offset } => commands::calendar(&text, tz_offset),
        Commands::Actions {
            entities,
            tz_offset,
        } => commands::actions(&config, &entities, tz_offset),
        Commands::Overlay {
            image_id,
            natural,
            rendered,
            query,
            entity,
            entities,
            tz_offset,
        } => {
            commands::overlay(
                &config,
                commands::OverlayRequest {
                    image_id,
                    natural,
                    rendered,
                    query,
                    entity,
                    entities,
                    tz_offset,
                },
            )
            .await
        }
    }
}
