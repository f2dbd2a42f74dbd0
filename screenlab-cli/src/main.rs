//! ScreenLab CLI: screen, inspect and universe commands.
//!
//! Commands:
//! - `screen`: evaluate a strategy across a symbol universe and print buckets
//! - `inspect`: print the indicator series a strategy computes for one symbol
//! - `universe`: resolve and print a universe file
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use screenlab_core::data::{CsvDirectoryProvider, DataProvider, SyntheticProvider, Universe};
use screenlab_runner::{
    evaluate_series, export_json, save_artifacts, LogProgress, ScreenConfig, Screener,
    ScreeningResult,
};

#[derive(Parser)]
#[command(
    name = "screenlab",
    about = "ScreenLab CLI: technical indicator screening over a symbol universe"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where bars come from. Exactly one of `--data-dir` / `--synthetic`.
#[derive(clap::Args)]
struct DataArgs {
    /// Directory of `<SYMBOL>.csv` files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use deterministic synthetic bars instead of files.
    #[arg(long, default_value_t = false)]
    synthetic: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a universe of symbols.
    Screen {
        /// Path to a TOML screening config. Defaults to Bollinger touch-reversal.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Universe file (.toml, .csv or .txt).
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Symbols to screen (used when --universe is not given).
        symbols: Vec<String>,

        #[command(flatten)]
        data: DataArgs,

        /// Evaluation date (YYYY-MM-DD). Overrides the config.
        #[arg(long)]
        date: Option<String>,

        /// Worker threads. Overrides the config.
        #[arg(long)]
        parallelism: Option<usize>,

        /// Print the full result as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save result.json, signals.csv and failures.csv under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the indicator series behind a strategy for one symbol.
    Inspect {
        /// Symbol to inspect.
        symbol: String,

        /// Path to a TOML screening config.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,

        /// Number of trailing bars to print.
        #[arg(long, default_value_t = 10)]
        tail: usize,
    },
    /// Resolve a universe file and print its symbols in screening order.
    Universe {
        /// Universe file (.toml, .csv or .txt).
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            config,
            universe,
            symbols,
            data,
            date,
            parallelism,
            json,
            output_dir,
        } => run_screen(
            config.as_deref(),
            universe.as_deref(),
            symbols,
            &data,
            date.as_deref(),
            parallelism,
            json,
            output_dir.as_deref(),
        ),
        Commands::Inspect {
            symbol,
            config,
            data,
            tail,
        } => run_inspect(&symbol, config.as_deref(), &data, tail),
        Commands::Universe { path } => run_universe(&path),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn load_config(path: Option<&Path>) -> Result<ScreenConfig> {
    match path {
        Some(p) => ScreenConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(ScreenConfig::default()),
    }
}

fn build_provider(data: &DataArgs) -> Result<Box<dyn DataProvider>> {
    match (&data.data_dir, data.synthetic) {
        (Some(_), true) => bail!("--data-dir and --synthetic are mutually exclusive"),
        (Some(dir), false) => Ok(Box::new(CsvDirectoryProvider::new(dir))),
        (None, true) => Ok(Box::new(SyntheticProvider::new())),
        (None, false) => bail!("one of --data-dir or --synthetic is required"),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_screen(
    config_path: Option<&Path>,
    universe_path: Option<&Path>,
    symbols: Vec<String>,
    data: &DataArgs,
    date: Option<&str>,
    parallelism: Option<usize>,
    json: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(d) = date {
        config.evaluation_date = Some(parse_date(d)?);
    }
    if let Some(n) = parallelism {
        config.parallelism = n;
    }

    let universe = match universe_path {
        Some(p) => Universe::from_file(p)?,
        None if !symbols.is_empty() => Universe::from_symbols(&symbols),
        None => bail!("provide symbols or --universe"),
    };
    let provider = build_provider(data)?;

    let as_of = chrono::Local::now().date_naive();
    let screener = Screener::new(config, as_of)?;
    tracing::debug!(config_id = screener.config_id(), symbols = universe.len(), "screener ready");
    let result = screener.run(&universe, provider.as_ref(), Some(&LogProgress));

    if json {
        println!("{}", export_json(&result)?);
    } else {
        print_result(&result);
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&result, dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn print_result(result: &ScreeningResult) {
    let date = result
        .evaluation_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "latest bar".to_string());
    println!("Screen {} ({date})", &result.config_id[..12.min(result.config_id.len())]);
    println!("{}", result.summary());
    println!();

    for (kind, symbols) in &result.buckets {
        println!("{:<24} {}", kind.label(), symbols.join(", "));
    }
    if result.buckets.is_empty() {
        println!("No matches.");
    }

    if !result.failures.is_empty() {
        println!();
        println!("{:<8} {:<18} Message", "Symbol", "Reason");
        println!("{}", "-".repeat(58));
        for f in &result.failures {
            println!("{:<8} {:<18} {}", f.symbol, f.reason.label(), f.message);
        }
    }
}

fn run_inspect(symbol: &str, config_path: Option<&Path>, data: &DataArgs, tail: usize) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;
    let provider = build_provider(data)?;

    let (start, end) = config.fetch_range(chrono::Local::now().date_naive())?;
    let series = provider.fetch(&symbol.to_uppercase(), start, end)?;
    let bars = series.bars();
    let values = config.strategy.augment(bars);
    let names: Vec<&str> = values.names().collect();

    print!("{:<12} {:>10}", "Date", "Close");
    for name in &names {
        print!(" {:>16}", name);
    }
    println!();

    let from = bars.len().saturating_sub(tail);
    for (i, bar) in bars.iter().enumerate().skip(from) {
        print!("{:<12} {:>10.2}", bar.date.to_string(), bar.close);
        for name in &names {
            match values.get(name, i) {
                Some(v) => print!(" {:>16.4}", v),
                None => print!(" {:>16}", "-"),
            }
        }
        println!();
    }

    println!();
    match evaluate_series(&series, &config.strategy, config.evaluation_date) {
        Ok(signals) if signals.is_empty() => println!("No signal."),
        Ok(signals) => {
            let kinds: Vec<&str> = signals.iter().map(|s| s.kind.label()).collect();
            println!("Signals on {}: {}", signals[0].date, kinds.join(", "));
        }
        Err(e) => println!("Not evaluated: {e}"),
    }

    Ok(())
}

fn run_universe(path: &Path) -> Result<()> {
    let universe = Universe::from_file(path)?;
    println!("{} symbols", universe.len());
    for symbol in universe.symbols() {
        println!("{symbol}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_screen() {
        let cli = Cli::try_parse_from([
            "screenlab",
            "screen",
            "--synthetic",
            "--date",
            "2024-05-31",
            "SPY",
            "QQQ",
        ])
        .unwrap();
        match cli.command {
            Commands::Screen {
                symbols, data, date, ..
            } => {
                assert_eq!(symbols, ["SPY", "QQQ"]);
                assert!(data.synthetic);
                assert_eq!(date.as_deref(), Some("2024-05-31"));
            }
            _ => panic!("expected screen"),
        }
    }

    #[test]
    fn provider_flags_are_exclusive() {
        let both = DataArgs {
            data_dir: Some(PathBuf::from("data")),
            synthetic: true,
        };
        assert!(build_provider(&both).is_err());
        let neither = DataArgs {
            data_dir: None,
            synthetic: false,
        };
        assert!(build_provider(&neither).is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-13-01").is_err());
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
