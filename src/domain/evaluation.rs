//! Evaluation orchestrator: ties a price series, a position series and the
//! run parameters together and exposes the derived artifacts.
//!
//! Every accessor recomputes from the immutable inputs, so repeated calls are
//! idempotent and an `Evaluation` can be shared across threads as long as the
//! underlying series are not mutated (they are owned or borrowed immutably,
//! so they cannot be).

use chrono::NaiveDate;

use super::config::EvalConfig;
use super::error::SigperfError;
use super::ledger::{build_ledger, TradeLedger};
use super::returns::{benchmark_series, strategy_series, ReturnSeries};
use super::series::{EvaluationWindow, PriceBar, PriceSeries};
use super::signal::{convergence_index, decode_signals, restrict, Signal};
use super::stats::PerformanceReport;

#[derive(Debug)]
pub struct Evaluation<'a> {
    series: &'a PriceSeries,
    window: EvaluationWindow,
    signals: Vec<Signal>,
    config: EvalConfig,
}

impl<'a> Evaluation<'a> {
    /// Resolve the evaluation window, decode and direction-filter the raw
    /// signal codes, and check the one-signal-per-period invariant.
    pub fn new(
        series: &'a PriceSeries,
        codes: &[i32],
        config: EvalConfig,
    ) -> Result<Self, SigperfError> {
        let window = series.window(config.start_date, config.end_date)?;
        if codes.len() != window.periods() {
            return Err(SigperfError::SignalLength {
                signals: codes.len(),
                periods: window.periods(),
            });
        }
        let signals = restrict(&decode_signals(codes)?, config.direction);
        Ok(Self {
            series,
            window,
            signals,
            config,
        })
    }

    pub fn window(&self) -> EvaluationWindow {
        self.window
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    fn window_bars(&self) -> &[PriceBar] {
        &self.series.bars()[self.window.start..=self.window.end]
    }

    fn window_prices(&self) -> Vec<f64> {
        self.window_bars().iter().map(|b| b.adj_close).collect()
    }

    /// First period at which a real position begins.
    pub fn convergence(&self) -> Result<usize, SigperfError> {
        convergence_index(&self.signals)
    }

    /// Strategy period/cumulative returns, truncated at convergence.
    pub fn strategy_returns(&self) -> Result<ReturnSeries, SigperfError> {
        let convergence = self.convergence()?;
        Ok(strategy_series(
            &self.window_prices(),
            &self.signals,
            self.config.lookback,
            convergence,
        ))
    }

    /// Buy-and-hold benchmark returns, truncated at the same convergence
    /// index as the strategy.
    pub fn benchmark_returns(&self) -> Result<ReturnSeries, SigperfError> {
        let convergence = self.convergence()?;
        Ok(benchmark_series(
            &self.window_prices(),
            self.config.lookback,
            convergence,
        ))
    }

    /// Summary statistics over both cumulative series.
    pub fn report(&self) -> Result<PerformanceReport, SigperfError> {
        let strategy = self.strategy_returns()?;
        let benchmark = self.benchmark_returns()?;
        PerformanceReport::compute(
            &strategy.cumulative,
            &benchmark.cumulative,
            self.config.risk_free_rate,
        )
    }

    /// Closed-trade ledger over the full window (not truncated: entries and
    /// exits are detected from the raw position series).
    pub fn ledger(&self) -> TradeLedger {
        build_ledger(
            self.window_bars(),
            &self.signals,
            self.config.shares,
            self.config.commission,
            self.config.initial_capital,
        )
    }

    /// Post-convergence date axis, index-aligned with both cumulative
    /// series. This is the contract toward the chart renderer.
    pub fn date_axis(&self) -> Result<Vec<NaiveDate>, SigperfError> {
        let convergence = self.convergence()?;
        Ok(self.window_bars()[convergence..]
            .iter()
            .map(|b| b.date)
            .collect())
    }
}
