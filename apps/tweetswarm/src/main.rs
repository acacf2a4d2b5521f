//! tweetswarm - render a tweet beeswarm from the command line
//!
//! Loads a JSON dataset, applies an encoding mode and a sequence of clicks,
//! then writes the rendered scene as SVG or JSON and lists the selected
//! tweets on stderr, most recent first. Stdout only ever carries the scene.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tweetswarm_core::{export_scene, write_scene, EncodingMode, ExportFormat, PlotView, SwarmConfig};

/// Render a beeswarm plot of tweets by month.
#[derive(Debug, Parser)]
#[command(name = "tweetswarm", version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of tweet records.
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Write the scene here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Output format; guessed from the output extension when omitted.
    #[arg(short, long, value_enum)]
    format: Option<Format>,
    /// Attribute used for point color and the legend.
    #[arg(long, value_enum, default_value_t = ColorBy::Sentiment)]
    color_by: ColorBy,
    /// Click the point of the tweet with this exact text (repeatable).
    #[arg(long, value_name = "TEXT")]
    select: Vec<String>,
    /// Config file; defaults to the per-user config if present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => ExportFormat::Svg,
            Format::Json => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorBy {
    Sentiment,
    Subjectivity,
}

impl From<ColorBy> for EncodingMode {
    fn from(color_by: ColorBy) -> Self {
        match color_by {
            ColorBy::Sentiment => EncodingMode::Sentiment,
            ColorBy::Subjectivity => EncodingMode::Subjectivity,
        }
    }
}

/// Write one selected tweet text per line
fn write_selection(out: &mut impl Write, selected: &[String]) -> std::io::Result<()> {
    for text in selected {
        writeln!(out, "{}", text)?;
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SwarmConfig::load(path)?,
        None => SwarmConfig::load_or_default()?,
    };

    let mut view = PlotView::new(config);
    view.set_mode(cli.color_by.into());
    let count = view.load_file(&cli.input)?;
    tracing::info!("Loaded {} tweets", count);

    for text in &cli.select {
        if !view.click_text(text) {
            tracing::warn!("No tweet with text {:?}", text);
        }
    }

    let format = cli
        .format
        .map(ExportFormat::from)
        .or_else(|| cli.output.as_ref().and_then(|p| ExportFormat::from_path(p)))
        .unwrap_or_default();

    match &cli.output {
        Some(path) => write_scene(view.scene(), path, format)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(export_scene(view.scene(), format)?.as_bytes())?;
            stdout.flush()?;
        }
    }
    write_selection(&mut std::io::stderr().lock(), &view.selected_texts())?;

    Ok(())
}
