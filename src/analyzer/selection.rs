use crate::model::{PriceBar, PriceHistory};
use crate::utils::{from_plot_x, start_of_day};
use chrono::{DateTime, Utc};

/// What the details panel shows for a clicked bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PointDetail {
    pub date: DateTime<Utc>,
    pub close: f64,
    pub open: f64,
    pub volume: u64,
}

impl From<&PriceBar> for PointDetail {
    fn from(bar: &PriceBar) -> Self {
        Self {
            date: bar.date,
            close: bar.close,
            open: bar.open,
            volume: bar.volume,
        }
    }
}

/// Index of the bar closest to the day under plot coordinate `x`.
///
/// Both the click and the bar dates are truncated to midnight of their UTC
/// day before comparing, so any click within a day resolves the same way.
pub fn nearest_bar(history: &PriceHistory, x: f64) -> Option<usize> {
    let clicked = start_of_day(from_plot_x(x)?);
    history
        .bars
        .iter()
        .enumerate()
        .min_by_key(|(_, bar)| (start_of_day(bar.date) - clicked).num_seconds().unsigned_abs())
        .map(|(i, _)| i)
}

pub fn detail_at(history: &PriceHistory, x: f64) -> Option<PointDetail> {
    nearest_bar(history, x).map(|i| PointDetail::from(&history.bars[i]))
}
