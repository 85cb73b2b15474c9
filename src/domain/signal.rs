//! Position signal codes, per-period return rules, and convergence detection.
//!
//! The raw integer codes (0, 1, -1, 10, -10) form an implicit state machine
//! over flat/long/short exposure plus forced-exit markers; [`Signal`] makes
//! that machine an explicit enumeration.

use super::error::SigperfError;

/// Desired exposure for one period, decoded from an integer signal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// No position (code 0).
    Flat,
    /// Long position (code 1).
    Long,
    /// Short position (code -1).
    Short,
    /// Forced liquidation of a long position on this bar (code 10).
    LongExit,
    /// Forced liquidation of a short position on this bar (code -10).
    ShortExit,
}

impl Signal {
    pub fn from_code(code: i32) -> Result<Self, SigperfError> {
        match code {
            0 => Ok(Signal::Flat),
            1 => Ok(Signal::Long),
            -1 => Ok(Signal::Short),
            10 => Ok(Signal::LongExit),
            -10 => Ok(Signal::ShortExit),
            other => Err(SigperfError::InvalidSignalCode { code: other }),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Signal::Flat => 0,
            Signal::Long => 1,
            Signal::Short => -1,
            Signal::LongExit => 10,
            Signal::ShortExit => -10,
        }
    }

    /// Holding or force-closing a long.
    pub fn is_long_family(self) -> bool {
        matches!(self, Signal::Long | Signal::LongExit)
    }

    /// Holding or force-closing a short.
    pub fn is_short_family(self) -> bool {
        matches!(self, Signal::Short | Signal::ShortExit)
    }
}

/// Decode a raw position series, rejecting unknown codes.
pub fn decode_signals(codes: &[i32]) -> Result<Vec<Signal>, SigperfError> {
    codes.iter().map(|&c| Signal::from_code(c)).collect()
}

/// Per-period strategy return for one bar transition.
///
/// A fresh entry realizes nothing on its entry bar, and a forced-exit code
/// earns the final holding period of the side it closes. A forced-exit code
/// as the *previous* signal never carries exposure forward, so the period
/// after it returns 0. Anything else is flat.
pub fn period_return(price_now: f64, price_prev: f64, now: Signal, prev: Signal) -> f64 {
    if now.is_long_family() && prev == Signal::Long {
        return price_now / price_prev - 1.0;
    }
    if now.is_short_family() && prev == Signal::Short {
        // Short exposure is measured price-decline-positive.
        return price_prev / price_now - 1.0;
    }
    0.0
}

/// Index of the first bar carrying a plain `Long` or `Short` signal.
///
/// Bars before this index are excluded from performance measurement. Only
/// exact `Long`/`Short` are scanned: a series containing nothing but
/// forced-exit markers has no detectable start of trading and fails with
/// [`SigperfError::NoTrades`], even though a position briefly existed. That
/// asymmetry is a documented caveat of the signal encoding, kept as-is.
pub fn convergence_index(signals: &[Signal]) -> Result<usize, SigperfError> {
    let first_long = signals.iter().position(|&s| s == Signal::Long);
    let first_short = signals.iter().position(|&s| s == Signal::Short);
    match (first_long, first_short) {
        (Some(long), Some(short)) => Ok(long.min(short)),
        (Some(long), None) => Ok(long),
        (None, Some(short)) => Ok(short),
        (None, None) => Err(SigperfError::NoTrades),
    }
}

/// Which side of the signal stream a strategy is allowed to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeDirection {
    #[default]
    LongOnly,
    ShortOnly,
    LongShort,
}

impl TradeDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "long" | "long_only" => Some(TradeDirection::LongOnly),
            "short" | "short_only" => Some(TradeDirection::ShortOnly),
            "long_short" | "both" => Some(TradeDirection::LongShort),
            _ => None,
        }
    }
}

/// Zero out the signal family excluded by the direction filter.
pub fn restrict(signals: &[Signal], direction: TradeDirection) -> Vec<Signal> {
    signals
        .iter()
        .map(|&s| match direction {
            TradeDirection::LongShort => s,
            TradeDirection::LongOnly if s.is_short_family() => Signal::Flat,
            TradeDirection::ShortOnly if s.is_long_family() => Signal::Flat,
            _ => s,
        })
        .collect()
}
