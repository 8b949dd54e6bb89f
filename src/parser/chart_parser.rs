// Yahoo chart payload decoding
use crate::model::{FetchError, HistoryRequest, PriceBar, PriceHistory};
use crate::utils::from_unix;
use serde::Deserialize;
use std::collections::BTreeMap;

pub trait Parser {
    fn parse(&self, body: &str, req: &HistoryRequest) -> Result<PriceHistory, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

impl ChartError {
    fn message(&self) -> String {
        match (&self.description, &self.code) {
            (Some(d), _) if !d.is_empty() => d.clone(),
            (_, Some(c)) => c.clone(),
            _ => "unknown provider error".into(),
        }
    }

    /// An unknown or delisted symbol reads as "no data", like an empty result.
    fn into_fetch_error(self) -> FetchError {
        if self.code.as_deref() == Some("Not Found") {
            FetchError::Empty
        } else {
            FetchError::Provider(self.message())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
    #[serde(default)]
    adjclose: Vec<AdjCloseSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseSeries {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

pub struct YahooChartParser;

impl YahooChartParser {
    pub fn new() -> Self {
        Self
    }

    /// The error carried by a chart error body, if the body is one.
    pub fn error_from_body(body: &str) -> Option<FetchError> {
        serde_json::from_str::<ChartEnvelope>(body)
            .ok()
            .and_then(|env| env.chart.error)
            .map(ChartError::into_fetch_error)
    }
}

impl Default for YahooChartParser {
    fn default() -> Self {
        Self::new()
    }
}

fn at(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten().filter(|v| v.is_finite())
}

impl Parser for YahooChartParser {
    fn parse(&self, body: &str, req: &HistoryRequest) -> Result<PriceHistory, FetchError> {
        let envelope: ChartEnvelope = serde_json::from_str(body)?;

        if let Some(err) = envelope.chart.error {
            return Err(err.into_fetch_error());
        }

        let result = envelope
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or(FetchError::Empty)?;

        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .into_iter()
            .next()
            .map(|a| a.adjclose);

        // Keyed by timestamp: sorts ascending and keeps the last duplicate.
        let mut rows: BTreeMap<i64, PriceBar> = BTreeMap::new();
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let Some(close) = at(&quote.close, i) else {
                continue;
            };
            let Some(date) = from_unix(ts) else {
                continue;
            };
            let bar = PriceBar {
                date,
                open: at(&quote.open, i).unwrap_or(close),
                high: at(&quote.high, i).unwrap_or(close),
                low: at(&quote.low, i).unwrap_or(close),
                close,
                adj_close: adjclose.as_deref().and_then(|a| at(a, i)),
                volume: at(&quote.volume, i).map(|v| v.max(0.0) as u64).unwrap_or(0),
            };
            rows.insert(ts, bar);
        }

        Ok(PriceHistory {
            symbol: req.symbol.clone(),
            period: req.period,
            bars: rows.into_values().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Period;
    use chrono::{TimeZone, Utc};

    fn request() -> HistoryRequest {
        HistoryRequest {
            symbol: "AAPL".into(),
            period: Period::OneWeek,
        }
    }

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD" },
                "timestamp": [1704378600, 1704205800, 1704292200, 1704465000],
                "indicators": {
                    "quote": [{
                        "open":   [182.1, 187.2, 184.2, null],
                        "high":   [183.1, 188.4, 185.9, null],
                        "low":    [180.9, 183.9, 183.4, null],
                        "close":  [181.9, 185.6, 184.3, null],
                        "volume": [71983600, 82488700, null, null]
                    }],
                    "adjclose": [{ "adjclose": [181.2, 184.9, 183.6, null] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_sorts_and_drops_null_closes() {
        let history = YahooChartParser::new().parse(SAMPLE, &request()).unwrap();
        assert_eq!(history.symbol, "AAPL");
        assert_eq!(history.period, Period::OneWeek);
        assert_eq!(history.len(), 3);

        let dates: Vec<_> = history.bars.iter().map(|b| b.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(dates[0], Utc.timestamp_opt(1704205800, 0).unwrap());

        let first = &history.bars[0];
        assert_eq!(first.close, 185.6);
        assert_eq!(first.adj_close, Some(184.9));
        assert_eq!(first.volume, 82488700);

        // null volume counts as zero
        assert_eq!(history.bars[1].volume, 0);
    }

    #[test]
    fn missing_adjclose_leaves_none() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704205800],
            "indicators":{"quote":[{"open":[null],"high":[null],"low":[null],"close":[10.0],"volume":[5]}]}}],
            "error":null}}"#;
        let history = YahooChartParser::new().parse(body, &request()).unwrap();
        let bar = &history.bars[0];
        assert_eq!(bar.adj_close, None);
        assert_eq!(bar.open, 10.0);
        assert_eq!(bar.high, 10.0);
        assert_eq!(bar.adjusted_or_close(), 10.0);
    }

    #[test]
    fn duplicate_timestamps_keep_last_row() {
        let body = r#"{"chart":{"result":[{"timestamp":[100, 100],
            "indicators":{"quote":[{"close":[1.0, 2.0]}]}}],"error":null}}"#;
        let history = YahooChartParser::new().parse(body, &request()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.bars[0].close, 2.0);
    }

    #[test]
    fn unknown_symbol_reads_as_no_data() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(matches!(
            YahooChartParser::new().parse(body, &request()),
            Err(FetchError::Empty)
        ));
        assert!(matches!(
            YahooChartParser::error_from_body(body),
            Some(FetchError::Empty)
        ));
    }

    #[test]
    fn other_provider_errors_keep_their_description() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input - interval=1x is not supported"}}}"#;
        match YahooChartParser::new().parse(body, &request()).unwrap_err() {
            FetchError::Provider(msg) => assert_eq!(msg, "Invalid input - interval=1x is not supported"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(YahooChartParser::error_from_body("<html>oops</html>").is_none());
    }

    #[test]
    fn empty_result_and_garbage() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            YahooChartParser::new().parse(body, &request()),
            Err(FetchError::Empty)
        ));
        assert!(matches!(
            YahooChartParser::new().parse("<html>", &request()),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn result_without_timestamps_is_empty_history() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;
        let history = YahooChartParser::new().parse(body, &request()).unwrap();
        assert!(history.is_empty());
    }
}
