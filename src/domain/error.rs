//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for sigperf.
#[derive(Debug, thiserror::Error)]
pub enum SigperfError {
    #[error("no price data found for {ticker}")]
    DataNotFound { ticker: String },

    #[error("ambiguous price data for {ticker}: {matches} files match")]
    AmbiguousData { ticker: String, matches: usize },

    #[error("data parse error: {reason}")]
    DataParse { reason: String },

    #[error("no trades happened during the evaluation window")]
    NoTrades,

    #[error("date {date} {reason} in price series")]
    DateLookup { date: NaiveDate, reason: String },

    #[error("degenerate return series: {reason}")]
    DegenerateSeries { reason: String },

    #[error("invalid signal code {code} (expected 0, 1, -1, 10 or -10)")]
    InvalidSignalCode { code: i32 },

    #[error("position series has {signals} signals but the window spans {periods} periods")]
    SignalLength { signals: usize, periods: usize },

    #[error("invalid evaluation window: {reason}")]
    InvalidWindow { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigperfError> for std::process::ExitCode {
    fn from(err: &SigperfError) -> Self {
        let code: u8 = match err {
            SigperfError::Io(_) => 1,
            SigperfError::ConfigParse { .. }
            | SigperfError::ConfigMissing { .. }
            | SigperfError::ConfigInvalid { .. } => 2,
            SigperfError::DataNotFound { .. }
            | SigperfError::AmbiguousData { .. }
            | SigperfError::DataParse { .. } => 3,
            SigperfError::InvalidSignalCode { .. }
            | SigperfError::SignalLength { .. }
            | SigperfError::InvalidWindow { .. } => 4,
            SigperfError::NoTrades
            | SigperfError::DateLookup { .. }
            | SigperfError::DegenerateSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
