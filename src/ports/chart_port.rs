//! Chart renderer port trait.

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::SigperfError;

/// Port for rendering the strategy-vs-benchmark comparison chart.
///
/// `dates`, `strategy` and `benchmark` are index-aligned and already
/// truncated to start at the convergence index.
pub trait ChartPort {
    fn render(
        &self,
        dates: &[NaiveDate],
        strategy: &[f64],
        benchmark: &[f64],
        output: &Path,
    ) -> Result<(), SigperfError>;
}
