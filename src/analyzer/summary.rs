use crate::model::{AnalysisError, PriceHistory};
use chrono::{DateTime, Utc};

/// Headline figures shown above the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub min_close: f64,
    pub min_date: DateTime<Utc>,
    pub max_close: f64,
    pub max_date: DateTime<Utc>,
    pub opening_price: f64,
    pub closing_price: f64,
    pub adjusted_close: f64,
    pub total_volume: u64,
}

pub fn summarize(history: &PriceHistory) -> Result<SummaryStats, AnalysisError> {
    let first = history.bars.first().ok_or(AnalysisError::EmptyHistory)?;
    let last = history.bars.last().ok_or(AnalysisError::EmptyHistory)?;

    let mut min = first;
    let mut max = first;
    for bar in &history.bars[1..] {
        // strict comparisons keep the first occurrence on ties
        if bar.close < min.close {
            min = bar;
        }
        if bar.close > max.close {
            max = bar;
        }
    }

    Ok(SummaryStats {
        min_close: min.close,
        min_date: min.date,
        max_close: max.close,
        max_date: max.date,
        opening_price: first.open,
        closing_price: last.close,
        adjusted_close: last.adjusted_or_close(),
        total_volume: history.bars.iter().map(|b| b.volume).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Period, PriceBar};
    use chrono::{Duration, TimeZone};

    fn history(closes: &[f64]) -> PriceHistory {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        PriceHistory {
            symbol: "TEST".into(),
            period: Period::SixMonths,
            bars: closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PriceBar {
                    date: start + Duration::days(i as i64),
                    open: c - 1.0,
                    high: c + 1.0,
                    low: c - 2.0,
                    close: c,
                    adj_close: None,
                    volume: 100 * (i as u64 + 1),
                })
                .collect(),
        }
    }

    #[test]
    fn computes_extremes_and_totals() {
        let h = history(&[10.0, 8.0, 12.0, 9.0]);
        let s = summarize(&h).unwrap();
        assert_eq!(s.min_close, 8.0);
        assert_eq!(s.min_date, h.bars[1].date);
        assert_eq!(s.max_close, 12.0);
        assert_eq!(s.max_date, h.bars[2].date);
        assert_eq!(s.opening_price, 9.0);
        assert_eq!(s.closing_price, 9.0);
        assert_eq!(s.adjusted_close, 9.0);
        assert_eq!(s.total_volume, 100 + 200 + 300 + 400);
    }

    #[test]
    fn ties_resolve_to_first_occurrence() {
        let h = history(&[5.0, 7.0, 5.0, 7.0]);
        let s = summarize(&h).unwrap();
        assert_eq!(s.min_date, h.bars[0].date);
        assert_eq!(s.max_date, h.bars[1].date);
    }

    #[test]
    fn adjusted_close_prefers_provider_value() {
        let mut h = history(&[10.0, 11.0]);
        h.bars[1].adj_close = Some(10.5);
        assert_eq!(summarize(&h).unwrap().adjusted_close, 10.5);
    }

    #[test]
    fn empty_history_is_rejected() {
        let h = history(&[]);
        assert_eq!(summarize(&h), Err(AnalysisError::EmptyHistory));
    }
}
