//! Risk-adjusted summary statistics.

use std::fmt;

use super::error::SigperfError;

/// Per-period hurdle subtracted from the strategy's mean cumulative return.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0012;

/// Linear annualization assumes a 360-period banker's year.
pub const PERIODS_PER_YEAR: f64 = 360.0;

/// Fixed scaling applied to the excess-return ratio.
const EXCESS_SHARPE_SCALE: f64 = 10.0;

/// Snapshot of the four summary metrics, recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub sharpe: f64,
    pub adjusted_sharpe: f64,
    pub annualized_return: f64,
    pub market_annualized_return: f64,
}

impl PerformanceReport {
    /// Compute the report from the two truncated cumulative-return series.
    ///
    /// `strategy` and `benchmark` must be the post-convergence cumulative
    /// series of equal length. Zero variance (constant returns) and series
    /// too short for a sample variance are rejected as degenerate rather
    /// than producing NaN or infinity.
    pub fn compute(
        strategy: &[f64],
        benchmark: &[f64],
        risk_free_rate: f64,
    ) -> Result<Self, SigperfError> {
        if strategy.len() != benchmark.len() {
            return Err(SigperfError::DegenerateSeries {
                reason: format!(
                    "strategy has {} points but benchmark has {}",
                    strategy.len(),
                    benchmark.len()
                ),
            });
        }
        let n = strategy.len();
        if n < 2 {
            return Err(SigperfError::DegenerateSeries {
                reason: format!("need at least 2 points, have {n}"),
            });
        }

        let strategy_var = sample_variance(strategy);
        if strategy_var <= 0.0 {
            return Err(SigperfError::DegenerateSeries {
                reason: "strategy returns have zero variance".into(),
            });
        }
        let sharpe = (mean(strategy) - risk_free_rate) / strategy_var.sqrt();

        let excess: Vec<f64> = strategy
            .iter()
            .zip(benchmark)
            .map(|(a, b)| a - b)
            .collect();
        let excess_var = sample_variance(&excess);
        if excess_var <= 0.0 {
            return Err(SigperfError::DegenerateSeries {
                reason: "excess returns over benchmark have zero variance".into(),
            });
        }
        let adjusted_sharpe =
            EXCESS_SHARPE_SCALE * (n as f64).sqrt() * mean(&excess) / excess_var.sqrt();

        let years = n as f64 / PERIODS_PER_YEAR;
        let annualized_return = strategy[n - 1] / years;
        let market_annualized_return = benchmark[n - 1] / years;

        Ok(PerformanceReport {
            sharpe,
            adjusted_sharpe,
            annualized_return,
            market_annualized_return,
        })
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sharpe = {}", self.sharpe)?;
        writeln!(
            f,
            "Adjusted sharpe against market = {}",
            self.adjusted_sharpe
        )?;
        writeln!(f, "Annualized return = {}", self.annualized_return)?;
        write!(
            f,
            "Market annualized return = {}",
            self.market_annualized_return
        )
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n - 1 denominator). Callers guarantee `len >= 2`.
fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
