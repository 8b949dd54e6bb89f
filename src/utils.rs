// Utility functions
use chrono::{DateTime, NaiveTime, TimeZone, Utc};

/// Trims and upper-cases a user-entered ticker.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Converts a Unix timestamp in seconds to `DateTime<Utc>`.
pub fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Truncates a timestamp to midnight of its UTC day.
pub fn start_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Plot x coordinate for a date: seconds since the epoch.
pub fn to_plot_x(dt: DateTime<Utc>) -> f64 {
    dt.timestamp() as f64
}

pub fn from_plot_x(x: f64) -> Option<DateTime<Utc>> {
    if !x.is_finite() {
        return None;
    }
    from_unix(x.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        assert_eq!(normalize_symbol("  aapl "), "AAPL");
        assert_eq!(normalize_symbol(""), "");
    }

    #[test]
    fn start_of_day_drops_time() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(start_of_day(dt), Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn plot_x_round_trips_whole_seconds() {
        let dt = Utc.with_ymd_and_hms(2023, 12, 31, 9, 0, 0).unwrap();
        assert_eq!(from_plot_x(to_plot_x(dt)), Some(dt));
        assert_eq!(from_plot_x(f64::NAN), None);
    }
}
