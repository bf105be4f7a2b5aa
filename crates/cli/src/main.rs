// conciliar - config-driven bank reconciliation CLI

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use conciliar_recon::engine::load_csv_table;
use conciliar_recon::model::ReconBucket;
use conciliar_recon::{ReconConfig, ReconInput, ReconResult};
use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT_HASH"),
        ", ",
        env!("TARGET"),
        ")"
    )
}

#[derive(Parser)]
#[command(name = "conciliar")]
#[command(about = "Reconcile accounting books against a bank statement")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  conciliar run marzo.toml
  conciliar run marzo.toml --json
  conciliar run marzo.toml --output resultado.json")]
    Run {
        /// Path to the reconciliation config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  conciliar validate marzo.toml")]
    Validate {
        /// Path to the reconciliation config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output } => cmd_run(config, json, output),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn invalid_config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RUNTIME, message: msg.into(), hint: None }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn load_config(config_path: &Path) -> Result<ReconConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::runtime(format!("cannot read config: {e}")))?;
    ReconConfig::from_toml(&config_str).map_err(|e| CliError::invalid_config(e.to_string()))
}

fn run_from_config(config_path: &Path, config: &ReconConfig) -> Result<ReconResult, CliError> {
    // Input paths are relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let books_path = base_dir.join(&config.books.file);
    let books_data = std::fs::read_to_string(&books_path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", books_path.display())))?;
    let books = load_csv_table(&books_data, config.books.header_row)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    let bank_path = base_dir.join(&config.bank.file);
    let bank_data = std::fs::read_to_string(&bank_path)
        .map_err(|e| CliError::runtime(format!("cannot read {}: {e}", bank_path.display())))?;
    let bank = load_csv_table(&bank_data, config.bank.header_row)
        .map_err(|e| CliError::runtime(e.to_string()))?;

    let input = ReconInput { books, bank };
    conciliar_recon::run(config, &input).map_err(|e| CliError::runtime(e.to_string()))
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    let result = run_from_config(&config_path, &config)?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::runtime(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::runtime(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "recon '{}': {} pair(s) matched ({}), {} residual row(s)",
        result.meta.config_name,
        s.matched_pairs,
        format_cents(s.matched_cents),
        result.buckets.total_rows(),
    );
    for (bucket, stat) in [
        (ReconBucket::BookCreditsOnly, &s.book_credits),
        (ReconBucket::BankCreditsOnly, &s.bank_credits),
        (ReconBucket::BookDebitsOnly, &s.book_debits),
        (ReconBucket::BankDebitsOnly, &s.bank_debits),
        (ReconBucket::BankFees, &s.bank_fees),
    ] {
        if stat.rows > 0 {
            eprintln!(
                "  {}: {} row(s), {}",
                bucket.title(),
                stat.rows,
                format_cents(stat.total_cents),
            );
        }
    }
    eprintln!("book balance: {}", format_cents(result.book_balance_cents));

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path).map_err(|e| {
        if e.code == EXIT_INVALID_CONFIG {
            e.with_hint("see `conciliar run --help` for the expected config shape")
        } else {
            e
        }
    })?;
    eprintln!(
        "valid: recon '{}' (books: {}, bank: {}, {} fee concept(s), positive means {})",
        config.name,
        config.books.file,
        config.bank.file,
        config.fees.dictionary.len(),
        config.positive_means,
    );
    Ok(())
}

/// Render cents as a plain decimal amount, e.g. -12345 -> "-123.45".
fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
