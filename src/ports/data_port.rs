//! Price and signal source port trait.

use crate::domain::error::SigperfError;
use crate::domain::series::PriceSeries;

pub trait DataPort {
    /// Resolve exactly one price dataset for `ticker`. Implementations must
    /// fail distinctly for zero matches versus multiple matches.
    fn load_prices(&self, ticker: &str) -> Result<PriceSeries, SigperfError>;

    /// Load the raw position-signal codes for a strategy run.
    fn load_signals(&self, name: &str) -> Result<Vec<i32>, SigperfError>;

    fn list_tickers(&self) -> Result<Vec<String>, SigperfError>;
}
