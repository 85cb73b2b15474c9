//! CSV file data adapter.
//!
//! Price files are resolved by substring match against the ticker
//! (`*{ticker}*.csv` within the data directory), with distinct errors for
//! zero and multiple matches. Files need a `Date` column (`YYYY-MM-DD`) and
//! an `Adj Close` column; extra columns are ignored. Signal files need a
//! `Signal` column of integer codes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::error::SigperfError;
use crate::domain::series::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Match `*{ticker}*.csv` in the data directory; exactly one file must
    /// match.
    fn resolve(&self, ticker: &str) -> Result<PathBuf, SigperfError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SigperfError::DataParse {
            reason: format!("failed to read directory {}: {}", self.base_path.display(), e),
        })?;

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SigperfError::DataParse {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.ends_with(".csv") && name_str.contains(ticker) {
                matches.push(entry.path());
            }
        }

        match matches.len() {
            0 => Err(SigperfError::DataNotFound {
                ticker: ticker.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            n => Err(SigperfError::AmbiguousData {
                ticker: ticker.to_string(),
                matches: n,
            }),
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, SigperfError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| SigperfError::DataParse {
            reason: format!("missing {name} column"),
        })
}

fn read_prices(path: &Path) -> Result<PriceSeries, SigperfError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|e| SigperfError::DataParse {
        reason: format!("failed to open {}: {}", path.display(), e),
    })?;

    let headers = rdr
        .headers()
        .map_err(|e| SigperfError::DataParse {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();
    let date_col = column_index(&headers, "Date")?;
    let close_col = column_index(&headers, "Adj Close")?;

    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| SigperfError::DataParse {
            reason: format!("CSV parse error: {}", e),
        })?;

        let date_str = record.get(date_col).ok_or_else(|| SigperfError::DataParse {
            reason: "missing Date value".into(),
        })?;
        let date =
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| SigperfError::DataParse {
                reason: format!("invalid date {date_str:?}: {e}"),
            })?;

        let close_str = record
            .get(close_col)
            .ok_or_else(|| SigperfError::DataParse {
                reason: "missing Adj Close value".into(),
            })?;
        let adj_close: f64 = close_str.trim().parse().map_err(|e| SigperfError::DataParse {
            reason: format!("invalid Adj Close value {close_str:?}: {e}"),
        })?;

        bars.push(PriceBar { date, adj_close });
    }

    // File order is kept as-is; dates are expected pre-sorted.
    Ok(PriceSeries::new(bars))
}

fn read_signals(path: &Path) -> Result<Vec<i32>, SigperfError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|e| SigperfError::DataParse {
        reason: format!("failed to open {}: {}", path.display(), e),
    })?;

    let headers = rdr
        .headers()
        .map_err(|e| SigperfError::DataParse {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();
    let signal_col = column_index(&headers, "Signal")?;

    let mut codes = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| SigperfError::DataParse {
            reason: format!("CSV parse error: {}", e),
        })?;
        let value = record
            .get(signal_col)
            .ok_or_else(|| SigperfError::DataParse {
                reason: "missing Signal value".into(),
            })?;
        let code: i32 = value.trim().parse().map_err(|e| SigperfError::DataParse {
            reason: format!("invalid signal value {value:?}: {e}"),
        })?;
        codes.push(code);
    }
    Ok(codes)
}

impl DataPort for CsvDataAdapter {
    fn load_prices(&self, ticker: &str) -> Result<PriceSeries, SigperfError> {
        let path = self.resolve(ticker)?;
        read_prices(&path)
    }

    fn load_signals(&self, name: &str) -> Result<Vec<i32>, SigperfError> {
        let path = self.base_path.join(name);
        read_signals(&path)
    }

    fn list_tickers(&self) -> Result<Vec<String>, SigperfError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SigperfError::DataParse {
            reason: format!("failed to read directory {}: {}", self.base_path.display(), e),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SigperfError::DataParse {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                tickers.push(stem.to_string());
            }
        }
        tickers.sort();
        Ok(tickers)
    }
}
