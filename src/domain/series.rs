//! Price series and evaluation window resolution.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::error::SigperfError;

/// One period of adjusted-close price data.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub adj_close: f64,
}

/// An ordered price series with a by-date index built once at load.
///
/// Bars are kept in load order; dates are expected to be strictly increasing
/// but that is not enforced. Duplicate dates are remembered so that window
/// resolution can fail distinctly instead of silently picking one.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    by_date: HashMap<NaiveDate, usize>,
    duplicates: HashSet<NaiveDate>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Self {
        let mut by_date = HashMap::with_capacity(bars.len());
        let mut duplicates = HashSet::new();
        for (i, bar) in bars.iter().enumerate() {
            if by_date.insert(bar.date, i).is_some() {
                duplicates.insert(bar.date);
            }
        }
        Self {
            bars,
            by_date,
            duplicates,
        }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Index of the bar dated exactly `date`; the date must appear exactly
    /// once in the series.
    pub fn index_of(&self, date: NaiveDate) -> Result<usize, SigperfError> {
        if self.duplicates.contains(&date) {
            return Err(SigperfError::DateLookup {
                date,
                reason: "appears more than once".into(),
            });
        }
        self.by_date
            .get(&date)
            .copied()
            .ok_or(SigperfError::DateLookup {
                date,
                reason: "not present".into(),
            })
    }

    /// Resolve an evaluation window from optional boundary dates. Missing
    /// boundaries default to the full series.
    pub fn window(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<EvaluationWindow, SigperfError> {
        if self.is_empty() {
            return Err(SigperfError::InvalidWindow {
                reason: "price series is empty".into(),
            });
        }
        let start = match start {
            Some(date) => self.index_of(date)?,
            None => 0,
        };
        let end = match end {
            Some(date) => self.index_of(date)?,
            None => self.bars.len() - 1,
        };
        if start > end {
            return Err(SigperfError::InvalidWindow {
                reason: "start date is after end date".into(),
            });
        }
        Ok(EvaluationWindow { start, end })
    }
}

/// Inclusive index range into a [`PriceSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationWindow {
    pub start: usize,
    pub end: usize,
}

impl EvaluationWindow {
    /// Number of periods covered, end inclusive.
    pub fn periods(&self) -> usize {
        self.end - self.start + 1
    }
}
