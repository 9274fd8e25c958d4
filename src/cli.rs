//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::batch::{BatchOutcome, Instrument, InstrumentFailure, evaluate_batch};
use crate::domain::condition::Condition;
use crate::domain::config_validation::{
    data_directory, load_period, load_scoring_config, load_symbols, validate_config,
};
use crate::domain::error::StockscoreError;
use crate::domain::evaluation::ScoreResult;
use crate::domain::period::Period;
use crate::domain::settings::ScoringConfig;
use crate::domain::universe::parse_symbols;
use crate::domain::volatility::VolatilityRegime;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stockscore", about = "Technical-indicator scoring engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score instruments and print their signals
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated symbols, overriding [analysis] symbols
        #[arg(long)]
        symbols: Option<String>,
        /// Lookback period: 1mo, 3mo, 6mo or 1y
        #[arg(long)]
        period: Option<Period>,
        /// CSV report path, overriding [report] output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration and print the effective parameters
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            symbols,
            period,
            output,
        } => run_analyze(&config, symbols.as_deref(), period, output.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockscoreError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        fail(&err)
    })
}

fn fail(err: &StockscoreError) -> ExitCode {
    tracing::error!("{err}");
    err.into()
}

fn run_analyze(
    config_path: &Path,
    symbols_override: Option<&str>,
    period_override: Option<Period>,
    output_override: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    tracing::info!(path = %config_path.display(), "loading config");
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let scoring = match load_scoring_config(&config) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let period = match period_override.map_or_else(|| load_period(&config), Ok) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    // Stage 2: Open the data source
    let directory = match data_directory(&config) {
        Ok(d) => d,
        Err(e) => return fail(&e),
    };
    let data_port = CsvAdapter::new(PathBuf::from(directory));

    // Stage 3: Resolve symbols
    let symbols = match resolve_symbols(symbols_override, &config, &data_port) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "output").map(PathBuf::from));

    // Stages 4-6: Fetch, evaluate, report
    run_analysis_pipeline(
        &data_port,
        &CsvReportAdapter,
        &symbols,
        period,
        &scoring,
        output.as_deref(),
    )
}

/// Symbols from the override, else `[analysis] symbols`, else everything the
/// data source lists.
pub fn resolve_symbols(
    symbols_override: Option<&str>,
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
) -> Result<Vec<String>, StockscoreError> {
    if let Some(list) = symbols_override {
        return parse_symbols(list)
            .map_err(|e| StockscoreError::invalid("analysis", "symbols", e.to_string()));
    }
    if let Some(symbols) = load_symbols(config)? {
        return Ok(symbols);
    }

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        return Err(StockscoreError::ConfigMissing {
            section: "analysis".to_string(),
            key: "symbols".to_string(),
        });
    }
    Ok(symbols)
}

/// Fetch every symbol and evaluate the batch. Fetch failures are recorded
/// alongside evaluation failures; neither stops the batch.
pub fn analyze(
    data_port: &dyn DataPort,
    symbols: &[String],
    period: Period,
    scoring: &ScoringConfig,
) -> BatchOutcome {
    let mut instruments = Vec::with_capacity(symbols.len());
    let mut fetch_failures = Vec::new();

    for symbol in symbols {
        let fetched = data_port
            .fetch_history(symbol, period)
            .and_then(|bars| Ok((bars, data_port.fetch_info(symbol)?)));
        match fetched {
            Ok((bars, info)) => instruments.push(Instrument {
                symbol: symbol.clone(),
                bars,
                info,
            }),
            Err(e) => {
                tracing::warn!(symbol = %symbol, reason = %e, "skipping instrument");
                fetch_failures.push(InstrumentFailure {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        instruments = instruments.len(),
        period = %period,
        "evaluating"
    );
    let mut outcome = evaluate_batch(&instruments, scoring);
    outcome.failures.extend(fetch_failures);
    outcome
}

pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    symbols: &[String],
    period: Period,
    scoring: &ScoringConfig,
    output_path: Option<&Path>,
) -> ExitCode {
    let outcome = analyze(data_port, symbols, period, scoring);

    let results: Vec<ScoreResult> = outcome
        .results
        .iter()
        .map(|e| e.result.clone())
        .collect();

    print_summary(&results, &outcome.failures);

    if outcome.is_total_failure() {
        tracing::error!("no instrument could be evaluated");
        return ExitCode::from(5);
    }

    if let Some(path) = output_path {
        let path = path.display().to_string();
        if let Err(e) = report_port.write(&results, &path) {
            return fail(&e);
        }
    }

    ExitCode::SUCCESS
}

fn print_summary(results: &[ScoreResult], failures: &[InstrumentFailure]) {
    for result in results {
        let price = result
            .price()
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<24} price {:>10}  score {:>7.3}  {:<10} regime {}",
            result.symbol,
            result.info.name,
            price,
            result.score,
            result.signal.to_string(),
            result.regime
        );
        for condition in Condition::ALL {
            println!(
                "    {:<22} {:<8} weight {:+.3}",
                condition.name(),
                result.explanation(condition).to_string(),
                result.weights.get(condition)
            );
        }
        if result.high_volatility_dont_buy() {
            println!("    High volatility: Don't Buy");
        }
    }

    if !failures.is_empty() {
        println!("\nSkipped {} instrument(s):", failures.len());
        for failure in failures {
            println!("  {}: {}", failure.symbol, failure.reason);
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    tracing::info!(path = %config_path.display(), "validating config");
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&config) {
        return fail(&e);
    }
    let scoring = match load_scoring_config(&config) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    println!("ATR multiplier: {}", scoring.atr_multiplier);
    for regime in [VolatilityRegime::Normal, VolatilityRegime::High] {
        let thresholds = scoring.thresholds_for(regime);
        println!(
            "\n{} regime: buy >= {:.4}, hold >= {:.4}, sell <= {:.4}",
            regime, thresholds.buy, thresholds.hold_floor, thresholds.sell
        );
        for (condition, weight) in scoring.weights_for(regime).iter() {
            println!("  {:<22} {:+.4}", condition.name(), weight);
        }
    }

    println!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let directory = match data_directory(&config) {
        Ok(d) => d,
        Err(e) => return fail(&e),
    };

    let symbols = match CsvAdapter::new(PathBuf::from(&directory)).list_symbols() {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };

    if symbols.is_empty() {
        tracing::warn!(directory = %directory, "no symbols found");
    }
    for symbol in &symbols {
        println!("{}", symbol);
    }
    ExitCode::SUCCESS
}
