//! Command-line front end for `publist`.
//!
//! Reads a delimited publication list, composes the numbered bibliography,
//! and saves it as a Word document.  Fatal conditions (missing input,
//! malformed settings, write failure) are logged and terminate the process
//! before any output is produced.

use clap::Parser;
use publist::csv::CsvParser;
use publist::docx::DocxWriter;
use publist::render;
use publist::settings::Settings;
use publist::PublistError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "publist",
    version,
    about = "Format a publication list into a Word bibliography with author highlighting"
)]
struct Cli {
    /// Path to the delimited publication list
    #[arg(default_value = "publication_list.csv")]
    input: PathBuf,

    /// Path to the JSON settings file (built-in defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output document path
    #[arg(short, long, default_value = "highlighted_publications.docx")]
    output: PathBuf,

    /// Highlight this author, overriding the configured target
    #[arg(long)]
    target_author: Option<String>,

    /// Auto-detect the input delimiter and header row
    #[arg(long)]
    detect: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PublistError> {
    let mut settings = match &cli.config {
        Some(path) => {
            let settings = Settings::load(path)?;
            info!(path = %path.display(), "settings loaded");
            settings
        }
        None => Settings::default(),
    };
    if let Some(target) = cli.target_author {
        settings.target_author = target;
    }
    if !settings.has_target_author() {
        warn!("no target_author configured; no author will be highlighted");
    }

    let text = std::fs::read_to_string(&cli.input).map_err(|source| PublistError::Input {
        path: cli.input.display().to_string(),
        source,
    })?;

    let parser = if cli.detect {
        CsvParser::with_auto_detection()
    } else {
        CsvParser::new()
    };
    let publications = parser.parse(&text)?;
    info!(rows = publications.len(), path = %cli.input.display(), "publication list loaded");

    let entries = render::compose(publications, &settings);
    DocxWriter::new(&settings).save(&entries, &cli.output)?;
    info!(entries = entries.len(), path = %cli.output.display(), "bibliography saved");

    Ok(())
}
