use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use chatmark::{Config, ConfigError, Turn};

const LOCAL_CONFIG: &str = "chatmark.toml";

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render assistant chat responses to safe HTML")]
struct Cli {
    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file (defaults to ./chatmark.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Treat the input as a JSON array of chat turns
    #[arg(long)]
    transcript: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Ast,
    Text,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("error reading {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid transcript: {0}")]
    Transcript(serde_json::Error),
    #[error("failed to encode document: {0}")]
    Encode(serde_json::Error),
    #[error("--transcript only supports html output")]
    TranscriptFormat,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let input = read_input(cli.input.as_deref())?;

    let rendered = if cli.transcript {
        if !matches!(cli.format, Format::Html) {
            return Err(CliError::TranscriptFormat);
        }
        let turns: Vec<Turn> = serde_json::from_str(&input).map_err(CliError::Transcript)?;
        tracing::debug!(turns = turns.len(), "rendering transcript");
        chatmark::render_transcript(&turns, &config)
    } else {
        let doc = chatmark::parse_with_config(&input, &config);
        tracing::debug!(blocks = doc.blocks.len(), "parsed input");
        match cli.format {
            Format::Html => chatmark::serialize(&doc, &config),
            Format::Ast => serde_json::to_string_pretty(&doc).map_err(CliError::Encode)?,
            Format::Text => chatmark::to_plain_text(&doc),
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            let local = Path::new(LOCAL_CONFIG);
            if local.exists() {
                Ok(Config::load_or_default(local))
            } else {
                Ok(Config::compiled_default())
            }
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(input)
        }
    }
}
