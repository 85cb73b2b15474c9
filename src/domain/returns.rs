//! Period-return and cumulative-return series for strategy and benchmark.

use super::signal::{period_return, Signal};

/// Matched per-period and cumulative returns, truncated to start at the
/// convergence index.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub period: Vec<f64>,
    pub cumulative: Vec<f64>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.period.len()
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_empty()
    }
}

/// Compound per-period returns into a running cumulative series:
/// `cumulative[i] = prod(1 + r[j]) - 1` for `j <= i`.
pub fn compound(period: &[f64]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(period.len());
    let mut growth = 1.0;
    for r in period {
        growth *= 1.0 + r;
        cumulative.push(growth - 1.0);
    }
    cumulative
}

/// Buy-and-hold benchmark over the window.
///
/// `period[i]` is the `lookback`-period percentage change; the first
/// `lookback` periods have no prior reference and are forced to 0. The
/// cumulative series is compounded over the FULL window and only then sliced
/// at `convergence`, so it retains market drift that accrued before the
/// strategy's first position.
pub fn benchmark_series(prices: &[f64], lookback: usize, convergence: usize) -> ReturnSeries {
    let period: Vec<f64> = (0..prices.len())
        .map(|i| {
            if i >= lookback {
                prices[i] / prices[i - lookback] - 1.0
            } else {
                0.0
            }
        })
        .collect();
    truncate(period, convergence)
}

/// Strategy returns over the window: each bar is mapped through the signal
/// transition rules against its `lookback`-lagged reference, with the first
/// `lookback` periods forced to 0. Compounded and sliced exactly like the
/// benchmark so the two series stay index-aligned.
pub fn strategy_series(
    prices: &[f64],
    signals: &[Signal],
    lookback: usize,
    convergence: usize,
) -> ReturnSeries {
    debug_assert_eq!(prices.len(), signals.len());
    let period: Vec<f64> = (0..prices.len())
        .map(|i| {
            if i >= lookback {
                period_return(prices[i], prices[i - lookback], signals[i], signals[i - lookback])
            } else {
                0.0
            }
        })
        .collect();
    truncate(period, convergence)
}

fn truncate(period: Vec<f64>, convergence: usize) -> ReturnSeries {
    let cumulative = compound(&period);
    let at = convergence.min(period.len());
    ReturnSeries {
        period: period[at..].to_vec(),
        cumulative: cumulative[at..].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::decode_signals;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn compound_matches_recurrence() {
        let period = [0.0, 0.1, -0.05, 0.02];
        let cumulative = compound(&period);
        assert_eq!(cumulative[0], 0.0);
        for i in 1..period.len() {
            let expected = (1.0 + cumulative[i - 1]) * (1.0 + period[i]) - 1.0;
            assert_relative_eq!(cumulative[i], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn benchmark_first_period_forced_zero() {
        let prices = [100.0, 110.0, 121.0];
        let series = benchmark_series(&prices, 1, 0);
        assert_eq!(series.period[0], 0.0);
        assert_relative_eq!(series.period[1], 0.10, max_relative = 1e-12);
        assert_relative_eq!(series.period[2], 0.10, max_relative = 1e-12);
        assert_relative_eq!(series.cumulative[2], 0.21, max_relative = 1e-12);
    }

    #[test]
    fn benchmark_longer_lookback_zeroes_prefix() {
        let prices = [100.0, 110.0, 121.0, 133.1];
        let series = benchmark_series(&prices, 2, 0);
        assert_eq!(series.period[0], 0.0);
        assert_eq!(series.period[1], 0.0);
        assert_relative_eq!(series.period[2], 0.21, max_relative = 1e-12);
    }

    #[test]
    fn benchmark_cumulative_retains_preconvergence_drift() {
        // Market moves before the strategy converges; the truncated
        // cumulative series keeps that drift.
        let prices = [100.0, 120.0, 120.0, 120.0];
        let series = benchmark_series(&prices, 1, 2);
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.cumulative[0], 0.20, max_relative = 1e-12);
        assert_relative_eq!(series.cumulative[1], 0.20, max_relative = 1e-12);
    }

    #[test]
    fn strategy_entry_bar_realizes_nothing() {
        let prices = [100.0, 110.0, 121.0, 121.0];
        let signals = decode_signals(&[0, 1, 1, 0]).unwrap();
        let series = strategy_series(&prices, &signals, 1, 1);
        // Entry at index 1 earns 0; the held bar earns 10%.
        assert_eq!(series.period[0], 0.0);
        assert_relative_eq!(series.period[1], 0.10, max_relative = 1e-12);
        assert_eq!(series.period[2], 0.0);
        assert_relative_eq!(series.cumulative[2], 0.10, max_relative = 1e-12);
    }

    #[test]
    fn strategy_cumulative_starts_at_zero_after_truncation() {
        let prices = [100.0, 90.0, 110.0, 121.0, 121.0];
        let signals = decode_signals(&[0, 0, 1, 1, 0]).unwrap();
        let series = strategy_series(&prices, &signals, 1, 2);
        assert_eq!(series.cumulative[0], 0.0);
        assert_relative_eq!(series.cumulative[1], 0.10, max_relative = 1e-12);
    }

    #[test]
    fn short_strategy_earns_decline() {
        let prices = [100.0, 100.0, 80.0, 80.0];
        let signals = decode_signals(&[0, -1, -1, 0]).unwrap();
        let series = strategy_series(&prices, &signals, 1, 1);
        assert_eq!(series.period[0], 0.0);
        assert_relative_eq!(series.period[1], 0.25, max_relative = 1e-12);
        assert_relative_eq!(series.cumulative[2], 0.25, max_relative = 1e-12);
    }

    #[test]
    fn strategy_and_benchmark_lengths_match() {
        let prices = [100.0, 101.0, 99.0, 103.0, 104.0, 102.0];
        let signals = decode_signals(&[0, 0, 1, 1, -1, -1]).unwrap();
        for lookback in 1..3 {
            for convergence in 0..prices.len() {
                let s = strategy_series(&prices, &signals, lookback, convergence);
                let b = benchmark_series(&prices, lookback, convergence);
                assert_eq!(s.len(), b.len());
                assert_eq!(s.len(), prices.len() - convergence);
            }
        }
    }

    proptest! {
        #[test]
        fn compound_recurrence_holds(period in proptest::collection::vec(-0.5f64..0.5, 1..40)) {
            let cumulative = compound(&period);
            prop_assert!((cumulative[0] - period[0]).abs() < 1e-9);
            for i in 1..period.len() {
                let expected = (1.0 + cumulative[i - 1]) * (1.0 + period[i]) - 1.0;
                prop_assert!((cumulative[i] - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn truncated_series_lengths_always_equal(
            prices in proptest::collection::vec(1.0f64..500.0, 2..30),
            codes in proptest::collection::vec(prop_oneof![Just(0), Just(1), Just(-1)], 2..30),
        ) {
            let n = prices.len().min(codes.len());
            let signals = decode_signals(&codes[..n]).unwrap();
            if let Ok(cp) = crate::domain::signal::convergence_index(&signals) {
                let s = strategy_series(&prices[..n], &signals, 1, cp);
                let b = benchmark_series(&prices[..n], 1, cp);
                prop_assert_eq!(s.len(), b.len());
            }
        }
    }
}
