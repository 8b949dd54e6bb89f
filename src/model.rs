// Core structs: PriceBar, PriceHistory, Period and the error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Time window requested from the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneDay,
        Period::OneWeek,
        Period::SixMonths,
        Period::OneYear,
        Period::FiveYears,
    ];

    /// Token sent as the `range` query parameter.
    pub fn range(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::OneWeek => "1wk",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::FiveYears => "5y",
        }
    }

    /// Short label shown on the period selector.
    pub fn label(self) -> &'static str {
        match self {
            Period::OneDay => "24H",
            Period::OneWeek => "1W",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::FiveYears => "5Y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.range())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: u64,
}

impl PriceBar {
    /// Adjusted close, falling back to the raw close when the provider has none.
    pub fn adjusted_or_close(&self) -> f64 {
        self.adj_close.unwrap_or(self.close)
    }
}

/// Daily bars for one symbol, ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub symbol: String,
    pub period: Period,
    pub bars: Vec<PriceBar>,
}

impl PriceHistory {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: String,
    pub period: Period,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("{0}")]
    Provider(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no data returned")]
    Empty,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("price history is empty")]
    EmptyHistory,
    #[error("non-finite value in input")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_serde_uses_range_token() {
        let json = serde_json::to_string(&Period::SixMonths).unwrap();
        assert_eq!(json, "\"6mo\"");
        let back: Period = serde_json::from_str("\"1wk\"").unwrap();
        assert_eq!(back, Period::OneWeek);
    }

    #[test]
    fn adjusted_close_falls_back_to_close() {
        let bar = PriceBar {
            date: Utc::now(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            adj_close: None,
            volume: 10,
        };
        assert_eq!(bar.adjusted_or_close(), 1.5);
        let adjusted = PriceBar { adj_close: Some(1.4), ..bar };
        assert_eq!(adjusted.adjusted_or_close(), 1.4);
    }
}
