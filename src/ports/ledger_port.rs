//! Ledger export port trait.

use std::path::PathBuf;

use crate::domain::error::SigperfError;
use crate::domain::ledger::TradeLedger;

/// Port for writing the closed-trade ledger to a sink.
pub trait LedgerPort {
    /// Write one row per closed trade and return the sink's location.
    fn write(&self, ticker: &str, ledger: &TradeLedger) -> Result<PathBuf, SigperfError>;
}
