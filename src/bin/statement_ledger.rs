use clap::Parser;
use statement_core::{
    logging, utils::validate_lines, DocumentError, DocumentResult, DocumentRouter, EngineConfig,
    Line,
};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Turn extracted statement lines into a reconciled ledger
#[derive(Parser, Debug)]
#[command(name = "statement-ledger", version, about)]
struct Cli {
    /// JSON array of {page_number, line_index, text} records (stdin by default)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn load_config(path: Option<&PathBuf>) -> DocumentResult<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    }
    .with_env_overrides();
    config.validate()?;
    Ok(config)
}

fn read_lines(path: Option<&PathBuf>) -> DocumentResult<Vec<Line>> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let lines: Vec<Line> = serde_json::from_reader(BufReader::new(reader))?;
    validate_lines(&lines)?;
    Ok(lines)
}

fn run(cli: &Cli, config: EngineConfig) -> DocumentResult<()> {
    let lines = read_lines(cli.input.as_ref())?;
    let parsed = DocumentRouter::with_config(config).process(&lines)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &parsed)?;
    } else {
        serde_json::to_writer(&mut out, &parsed)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("statement-ledger: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init_logging(&config.log_level) {
        eprintln!("statement-ledger: {}", err);
        return ExitCode::FAILURE;
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DocumentError::UnsupportedDocument) => {
            error!("unsupported or unrecognized document type");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "document processing failed");
            ExitCode::FAILURE
        }
    }
}
