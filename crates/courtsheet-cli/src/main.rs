mod display;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use courtsheet_core::{ParseResult, ParserConfig, config};
use courtsheet_pdf::{ReportParser, into_parse_result};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courtsheet", version, about = "Extract court parts from daily AM/PM report PDFs")]
struct Cli {
    #[command(flatten)]
    tuning: Tuning,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Tuning {
    /// Row bucket height in PDF points when grouping text into lines.
    #[arg(long, global = true, env = "COURTSHEET_ROW_PRECISION", default_value_t = config::DEFAULT_ROW_PRECISION)]
    row_precision: f32,

    /// Minimum extracted characters before a PDF counts as readable.
    #[arg(long, global = true, env = "COURTSHEET_MIN_TEXT_CHARS", default_value_t = config::DEFAULT_MIN_TEXT_CHARS)]
    min_text_chars: usize,
}

impl From<&Tuning> for ParserConfig {
    fn from(t: &Tuning) -> Self {
        Self {
            row_precision: t.row_precision,
            min_text_chars: t.min_text_chars,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Parse a report and print its parts.
    Parse {
        file: PathBuf,
        /// Print the tagged JSON result instead of cards.
        #[arg(long)]
        json: bool,
        /// Pretty-print JSON output.
        #[arg(long, requires = "json")]
        pretty: bool,
        /// Treat FILE as already-extracted report text.
        #[arg(long)]
        from_text: bool,
    },
    /// Print the reconstructed text of every page.
    Text { file: PathBuf },
    /// One line per part: judge, docket rows, confidence.
    Summary { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("courtsheet v{}", env!("CARGO_PKG_VERSION"));

    let parser = ReportParser::new(ParserConfig::from(&cli.tuning));

    match cli.command {
        Command::Parse {
            file,
            json,
            pretty,
            from_text,
        } => {
            let result = if from_text {
                let text = tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("reading {}", file.display()))?;
                into_parse_result(parser.parse_text(&text))
            } else {
                parser.parse_file_result(&file).await
            };
            print_result(&result, json, pretty)?;
            Ok(exit_code(&result))
        }
        Command::Text { file } => {
            let bytes = read_pdf(&file).await?;
            let pages = parser
                .extract_pages(&bytes)
                .with_context(|| format!("extracting text from {}", file.display()))?;
            for page in &pages {
                println!("--- page {} ---", page.number);
                println!("{}", page.text());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Summary { file } => {
            let result = parser.parse_file_result(&file).await;
            match &result {
                ParseResult::Success(report) => print!("{}", display::render_summary(report)),
                ParseResult::Failure(msg) => eprintln!("error: {msg}"),
            }
            Ok(exit_code(&result))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_pdf(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn print_result(result: &ParseResult, json: bool, pretty: bool) -> anyhow::Result<()> {
    if json {
        let out = if pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        println!("{out}");
        return Ok(());
    }

    match result {
        ParseResult::Success(report) => print!("{}", display::render_report(report)),
        ParseResult::Failure(msg) => eprintln!("error: {msg}"),
    }
    Ok(())
}

fn exit_code(result: &ParseResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tuning_flags_fill_config() {
        let cli = Cli::try_parse_from([
            "courtsheet",
            "--row-precision",
            "2.5",
            "--min-text-chars",
            "10",
            "parse",
            "report.pdf",
            "--json",
        ])
        .unwrap();
        let config = ParserConfig::from(&cli.tuning);
        assert_eq!(config.row_precision, 2.5);
        assert_eq!(config.min_text_chars, 10);
        assert!(matches!(cli.command, Command::Parse { json: true, .. }));
    }

    #[test]
    fn pretty_requires_json() {
        let err = Cli::try_parse_from(["courtsheet", "parse", "report.pdf", "--pretty"]);
        assert!(err.is_err());
    }

    #[test]
    fn defaults_match_library_config() {
        let cli = Cli::try_parse_from(["courtsheet", "summary", "report.pdf"]).unwrap();
        assert_eq!(ParserConfig::from(&cli.tuning), ParserConfig::default());
    }
}
