//! CSV ledger export adapter.
//!
//! Writes `log_{ticker}.csv` into the output directory, one row per closed
//! trade. The writer is scoped to the call and flushed before return, so the
//! file is released on every exit path.

use std::path::PathBuf;

use crate::domain::error::SigperfError;
use crate::domain::ledger::TradeLedger;
use crate::ports::ledger_port::LedgerPort;

const LEDGER_HEADER: [&str; 7] = [
    "Trades",
    "Entry",
    "Exit",
    "Position",
    "Gain(Loss)",
    "Balance",
    "Commission",
];

pub struct CsvLedgerAdapter {
    output_dir: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl LedgerPort for CsvLedgerAdapter {
    fn write(&self, ticker: &str, ledger: &TradeLedger) -> Result<PathBuf, SigperfError> {
        let path = self.output_dir.join(format!("log_{}.csv", ticker));
        let mut writer = csv::Writer::from_path(&path).map_err(|e| SigperfError::DataParse {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;

        writer
            .write_record(LEDGER_HEADER)
            .map_err(|e| SigperfError::DataParse {
                reason: format!("ledger write error: {}", e),
            })?;

        for trade in &ledger.trades {
            writer
                .write_record([
                    trade.sequence.to_string(),
                    trade.entry_date.format("%Y-%m-%d").to_string(),
                    trade.exit_date.format("%Y-%m-%d").to_string(),
                    trade.side.to_string(),
                    trade.gain_loss.to_string(),
                    trade.balance.to_string(),
                    trade.commission.to_string(),
                ])
                .map_err(|e| SigperfError::DataParse {
                    reason: format!("ledger write error: {}", e),
                })?;
        }

        writer.flush()?;
        Ok(path)
    }
}
