//! CLI definition and dispatch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::config::{build_eval_config, validate_eval_config, EvalConfig};
use crate::domain::error::SigperfError;
use crate::domain::evaluation::Evaluation;
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::ledger_port::LedgerPort;

#[derive(Parser, Debug)]
#[command(name = "sigperf", about = "Trading strategy performance evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a position-signal series against buy-and-hold
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [evaluate] ticker from the config
        #[arg(long)]
        ticker: Option<String>,
        /// Override [data] signals file from the config
        #[arg(long)]
        signals: Option<String>,
        /// Write an SVG comparison chart to this path
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// List datasets available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of a ticker's dataset
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            ticker,
            signals,
            chart,
        } => run_evaluate(&config, ticker.as_deref(), signals.as_deref(), chart.as_ref()),
        Command::ListTickers { config } => run_list_tickers(&config),
        Command::Info { config, ticker } => run_info(&config, ticker.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigperfError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn data_directory(adapter: &dyn ConfigPort) -> Result<PathBuf, SigperfError> {
    adapter
        .get_string("data", "directory")
        .map(PathBuf::from)
        .ok_or_else(|| SigperfError::ConfigMissing {
            section: "data".into(),
            key: "directory".into(),
        })
}

fn run_evaluate(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    signals_override: Option<&str>,
    chart_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_eval_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let mut eval_config = match build_eval_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if let Some(ticker) = ticker_override {
        eval_config.ticker = ticker.to_string();
    }

    let signals_file = match signals_override
        .map(String::from)
        .or_else(|| adapter.get_string("data", "signals"))
    {
        Some(f) => f,
        None => {
            let e = SigperfError::ConfigMissing {
                section: "data".into(),
                key: "signals".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let ledger_dir = adapter
        .get_string("ledger", "directory")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    match evaluate_pipeline(
        &adapter,
        &eval_config,
        &signals_file,
        &ledger_dir,
        chart_path,
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn evaluate_pipeline(
    adapter: &dyn ConfigPort,
    eval_config: &EvalConfig,
    signals_file: &str,
    ledger_dir: &PathBuf,
    chart_path: Option<&PathBuf>,
) -> Result<(), SigperfError> {
    let data_port = CsvDataAdapter::new(data_directory(adapter)?);

    eprintln!("Loading prices for {}", eval_config.ticker);
    let prices = data_port.load_prices(&eval_config.ticker)?;
    let codes = data_port.load_signals(signals_file)?;
    eprintln!("  {} bars, {} signals", prices.len(), codes.len());

    let evaluation = Evaluation::new(&prices, &codes, eval_config.clone())?;
    let ledger = evaluation.ledger();
    for warning in &ledger.warnings {
        eprintln!("warning: {warning}");
    }

    let report = evaluation.report()?;
    let strategy = evaluation.strategy_returns()?;
    let benchmark = evaluation.benchmark_returns()?;

    eprintln!("\n=== Performance ===");
    eprintln!("Sharpe:            {:.4}", report.sharpe);
    eprintln!("Adjusted Sharpe:   {:.4}", report.adjusted_sharpe);
    eprintln!("Annualized:        {:.2}%", report.annualized_return * 100.0);
    eprintln!(
        "Market Annualized: {:.2}%",
        report.market_annualized_return * 100.0
    );
    eprintln!("Closed Trades:     {}", ledger.trades.len());
    eprintln!("Final Balance:     {:.2}", ledger.final_balance);

    println!("{report}");

    if eval_config.write_ledger {
        let ledger_port = CsvLedgerAdapter::new(ledger_dir.clone());
        let path = ledger_port.write(&eval_config.ticker, &ledger)?;
        eprintln!("Ledger written to {}", path.display());
    }

    if let Some(chart) = chart_path {
        let axis = evaluation.date_axis()?;
        SvgChartAdapter::new().render(&axis, &strategy.cumulative, &benchmark.cumulative, chart)?;
        eprintln!("Chart written to {}", chart.display());
    }

    Ok(())
}

fn run_list_tickers(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let result = data_directory(&adapter)
        .map(CsvDataAdapter::new)
        .and_then(|port| port.list_tickers());
    match result {
        Ok(tickers) => {
            for ticker in tickers {
                println!("{ticker}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let ticker = match ticker_override
        .map(String::from)
        .or_else(|| adapter.get_string("evaluate", "ticker"))
    {
        Some(t) => t,
        None => {
            let e = SigperfError::ConfigMissing {
                section: "evaluate".into(),
                key: "ticker".into(),
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = data_directory(&adapter)
        .map(CsvDataAdapter::new)
        .and_then(|port| port.load_prices(&ticker));
    match result {
        Ok(series) => {
            match (series.first_date(), series.last_date()) {
                (Some(first), Some(last)) => {
                    println!("{ticker}: {} bars, {first} to {last}", series.len());
                }
                _ => println!("{ticker}: no data"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
