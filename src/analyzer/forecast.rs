//! Linear trend fitting and projection.
//!
//! Closing prices are regressed against their position in the series
//! (0, 1, 2, ...) with ordinary least squares. The fitted line is then
//! evaluated past the end of the series to produce a short projection.

use crate::model::{AnalysisError, PriceHistory};
use crate::utils::start_of_day;
use chrono::{DateTime, Duration, Utc};

/// Fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub intercept: f64,
    pub slope: f64,
    /// Coefficient of determination on the fitted sample.
    pub r_squared: f64,
}

impl TrendFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub fit: TrendFit,
    pub points: Vec<ForecastPoint>,
}

/// Ordinary least squares of `values` against their index.
///
/// A single value, or a constant series, yields a flat line through it.
pub fn fit_trend(values: &[f64]) -> Result<TrendFit, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyHistory);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFinite);
    }

    // Exact fit; the mean of a constant series can pick up rounding error.
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return Ok(TrendFit {
            intercept: first,
            slope: 0.0,
            r_squared: 1.0,
        });
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = if denominator > 0.0 { numerator / denominator } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let fitted = intercept + slope * i as f64;
        ss_res += (y - fitted).powi(2);
        ss_tot += (y - y_mean).powi(2);
    }
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Ok(TrendFit {
        intercept,
        slope,
        r_squared,
    })
}

/// Fits the closes of `history` and projects `horizon` daily steps past the last bar.
pub fn project(history: &PriceHistory, horizon: usize) -> Result<Forecast, AnalysisError> {
    let closes = history.closes();
    let fit = fit_trend(&closes)?;
    let last = history.bars.last().ok_or(AnalysisError::EmptyHistory)?;
    let anchor = start_of_day(last.date);
    let n = closes.len();

    // Stops early rather than overflowing the calendar.
    let points = (0..horizon)
        .map_while(|step| {
            let days = Duration::try_days(i64::try_from(step).ok()? + 1)?;
            let date = anchor.checked_add_signed(days)?;
            Some(ForecastPoint {
                date,
                price: fit.predict((n + step) as f64),
            })
        })
        .collect();

    Ok(Forecast { fit, points })
}
