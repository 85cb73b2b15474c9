//! Evaluation parameters and their validation.

use chrono::NaiveDate;

use super::error::SigperfError;
use super::signal::TradeDirection;
use super::stats::DEFAULT_RISK_FREE_RATE;
use crate::ports::config_port::ConfigPort;

/// Parameters for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    pub ticker: String,
    /// Strategy-vs-benchmark lookback in periods.
    pub lookback: usize,
    pub shares: i64,
    /// Flat commission charged per trade.
    pub commission: f64,
    pub initial_capital: f64,
    /// Per-period hurdle for the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Window boundaries; `None` defaults to the full price series.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub direction: TradeDirection,
    pub write_ledger: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            ticker: String::new(),
            lookback: 1,
            shares: 1,
            commission: 0.0,
            initial_capital: 10_000.00,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            start_date: None,
            end_date: None,
            direction: TradeDirection::default(),
            write_ledger: false,
        }
    }
}

pub fn validate_eval_config(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    validate_ticker(config)?;
    validate_lookback(config)?;
    validate_shares(config)?;
    validate_commission(config)?;
    validate_initial_capital(config)?;
    validate_risk_free_rate(config)?;
    validate_dates(config)?;
    validate_direction(config)?;
    Ok(())
}

fn invalid(key: &str, reason: &str) -> SigperfError {
    SigperfError::ConfigInvalid {
        section: "evaluate".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    match config.get_string("evaluate", "ticker") {
        Some(t) if !t.trim().is_empty() => Ok(()),
        _ => Err(SigperfError::ConfigMissing {
            section: "evaluate".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let value = config.get_int("evaluate", "lookback", 1);
    if value < 1 {
        return Err(invalid("lookback", "lookback must be at least 1"));
    }
    Ok(())
}

fn validate_shares(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let value = config.get_int("evaluate", "shares", 1);
    if value < 1 {
        return Err(invalid("shares", "shares must be positive"));
    }
    Ok(())
}

fn validate_commission(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let value = config.get_double("evaluate", "commission", 0.0);
    if value < 0.0 {
        return Err(invalid("commission", "commission must be non-negative"));
    }
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let value = config.get_double("evaluate", "initial_capital", 10_000.00);
    if value <= 0.0 {
        return Err(invalid("initial_capital", "initial_capital must be positive"));
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let value = config.get_double("evaluate", "risk_free_rate", DEFAULT_RISK_FREE_RATE);
    if value < 0.0 || value >= 1.0 {
        return Err(invalid(
            "risk_free_rate",
            "risk_free_rate must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(invalid("start_date", "start_date must not be after end_date"));
        }
    }
    Ok(())
}

pub fn parse_optional_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, SigperfError> {
    match config.get_string("evaluate", key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid(key, "invalid date format (expected YYYY-MM-DD)")),
    }
}

fn validate_direction(config: &dyn ConfigPort) -> Result<(), SigperfError> {
    match config.get_string("evaluate", "direction") {
        None => Ok(()),
        Some(s) if s.trim().is_empty() => Ok(()),
        Some(s) => match TradeDirection::parse(&s) {
            Some(_) => Ok(()),
            None => Err(invalid(
                "direction",
                "expected long_only, short_only or long_short",
            )),
        },
    }
}

/// Build an [`EvalConfig`] from a validated config source.
pub fn build_eval_config(config: &dyn ConfigPort) -> Result<EvalConfig, SigperfError> {
    let ticker = config.get_string("evaluate", "ticker").ok_or_else(|| {
        SigperfError::ConfigMissing {
            section: "evaluate".to_string(),
            key: "ticker".to_string(),
        }
    })?;

    let direction = match config.get_string("evaluate", "direction") {
        Some(s) if !s.trim().is_empty() => TradeDirection::parse(&s)
            .ok_or_else(|| invalid("direction", "expected long_only, short_only or long_short"))?,
        _ => TradeDirection::default(),
    };

    Ok(EvalConfig {
        ticker,
        lookback: config.get_int("evaluate", "lookback", 1) as usize,
        shares: config.get_int("evaluate", "shares", 1),
        commission: config.get_double("evaluate", "commission", 0.0),
        initial_capital: config.get_double("evaluate", "initial_capital", 10_000.00),
        risk_free_rate: config.get_double("evaluate", "risk_free_rate", DEFAULT_RISK_FREE_RATE),
        start_date: parse_optional_date(config, "start_date")?,
        end_date: parse_optional_date(config, "end_date")?,
        direction,
        write_ledger: config.get_bool("evaluate", "write_ledger", false),
    })
}
