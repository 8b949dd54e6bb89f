// Label texts for the window.
use crate::analyzer::selection::PointDetail;
use crate::analyzer::summary::SummaryStats;
use chrono::{DateTime, Utc};

pub const MIN_PLACEHOLDER: &str = "Minimum: ";
pub const MAX_PLACEHOLDER: &str = "Maximum: ";
pub const DETAILS_PLACEHOLDER: &str = "Stock Details: ";
pub const EMPTY_SYMBOL: &str = "Please enter a stock symbol";

pub fn day(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn minimum(stats: &SummaryStats) -> String {
    format!("Minimum: {:.2} USD (on {})", stats.min_close, day(stats.min_date))
}

pub fn maximum(stats: &SummaryStats) -> String {
    format!("Maximum: {:.2} USD (on {})", stats.max_close, day(stats.max_date))
}

pub fn details(stats: &SummaryStats) -> String {
    format!(
        "Opening Price: {:.2} USD\nClosing Price: {:.2} USD\nAdjusted Close: {:.2} USD\nVolume: {}",
        stats.opening_price, stats.closing_price, stats.adjusted_close, stats.total_volume
    )
}

pub fn point(detail: &PointDetail) -> String {
    format!(
        "Selected Date: {}\nPrice: {:.2} USD\nOpening Price: {:.2} USD\nClosing Price: {:.2} USD\nVolume: {}",
        day(detail.date),
        detail.close,
        detail.open,
        detail.close,
        detail.volume
    )
}

pub fn chart_title(symbol: &str) -> String {
    format!("Stock Price Forecast for {}", symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats() -> SummaryStats {
        SummaryStats {
            min_close: 181.914,
            min_date: Utc.with_ymd_and_hms(2024, 1, 4, 14, 30, 0).unwrap(),
            max_close: 185.6,
            max_date: Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(),
            opening_price: 187.15,
            closing_price: 181.18,
            adjusted_close: 180.5,
            total_volume: 154472300,
        }
    }

    #[test]
    fn extremes_show_price_and_day() {
        assert_eq!(minimum(&stats()), "Minimum: 181.91 USD (on 2024-01-04)");
        assert_eq!(maximum(&stats()), "Maximum: 185.60 USD (on 2024-01-02)");
    }

    #[test]
    fn details_block() {
        assert_eq!(
            details(&stats()),
            "Opening Price: 187.15 USD\nClosing Price: 181.18 USD\nAdjusted Close: 180.50 USD\nVolume: 154472300"
        );
    }

    #[test]
    fn selected_point_block() {
        let detail = PointDetail {
            date: Utc.with_ymd_and_hms(2024, 1, 3, 14, 30, 0).unwrap(),
            close: 184.25,
            open: 184.22,
            volume: 58414500,
        };
        assert_eq!(
            point(&detail),
            "Selected Date: 2024-01-03\nPrice: 184.25 USD\nOpening Price: 184.22 USD\nClosing Price: 184.25 USD\nVolume: 58414500"
        );
    }

    #[test]
    fn title_names_the_symbol() {
        assert_eq!(chart_title("NVDA"), "Stock Price Forecast for NVDA");
    }
}
