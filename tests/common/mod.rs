#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveDate;
use sigperf::domain::error::SigperfError;
use sigperf::domain::series::{PriceBar, PriceSeries};
use sigperf::ports::data_port::DataPort;

pub struct MockDataPort {
    pub prices: HashMap<String, Vec<PriceBar>>,
    pub signals: HashMap<String, Vec<i32>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            signals: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.prices.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_signals(mut self, name: &str, codes: Vec<i32>) -> Self {
        self.signals.insert(name.to_string(), codes);
        self
    }
}

impl DataPort for MockDataPort {
    fn load_prices(&self, ticker: &str) -> Result<PriceSeries, SigperfError> {
        self.prices
            .get(ticker)
            .map(|bars| PriceSeries::new(bars.clone()))
            .ok_or_else(|| SigperfError::DataNotFound {
                ticker: ticker.to_string(),
            })
    }

    fn load_signals(&self, name: &str) -> Result<Vec<i32>, SigperfError> {
        self.signals
            .get(name)
            .cloned()
            .ok_or_else(|| SigperfError::DataParse {
                reason: format!("no signals named {name}"),
            })
    }

    fn list_tickers(&self) -> Result<Vec<String>, SigperfError> {
        let mut tickers: Vec<String> = self.prices.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bars(start: NaiveDate, prices: &[f64]) -> Vec<PriceBar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            adj_close: p,
        })
        .collect()
}
