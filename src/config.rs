use crate::model::Period;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SYMBOLS: [&str; 10] = [
    "AAPL", "GOOGL", "AMZN", "MSFT", "TSLA", "META", "NFLX", "NVDA", "SPY", "BA",
];

/// Upper bound on projected days.
pub const MAX_FORECAST_HORIZON: usize = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub symbols: Vec<String>,
    pub default_period: Period,
    pub forecast_horizon: usize,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    pub base_url: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            default_period: Period::OneDay,
            forecast_horizon: 7,
            request_timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) StockForecaster/0.1".into(),
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".into(),
            window_width: 700.0,
            window_height: 600.0,
        }
    }
}

/// Reads `path` as JSON. A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let mut config: AppConfig = serde_json::from_str(&content)?;
    if config.forecast_horizon > MAX_FORECAST_HORIZON {
        warn!(
            "forecast_horizon {} exceeds {}, clamping",
            config.forecast_horizon, MAX_FORECAST_HORIZON
        );
        config.forecast_horizon = MAX_FORECAST_HORIZON;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config("definitely/not/here/config.json").unwrap();
        assert_eq!(cfg.forecast_horizon, 7);
        assert_eq!(cfg.default_period, Period::OneDay);
        assert_eq!(cfg.symbols.len(), 10);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "default_period": "1y", "symbols": ["IBM"] }"#).unwrap();
        assert_eq!(cfg.default_period, Period::OneYear);
        assert_eq!(cfg.symbols, vec!["IBM".to_string()]);
        assert_eq!(cfg.request_timeout_seconds, 10);
    }

    #[test]
    fn oversized_horizon_is_clamped() {
        let path = std::env::temp_dir().join(format!("stock-forecaster-horizon-{}.json", std::process::id()));
        fs::write(&path, r#"{ "forecast_horizon": 18446744073709551615 }"#).unwrap();
        let result = load_config(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(result.unwrap().forecast_horizon, MAX_FORECAST_HORIZON);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("stock-forecaster-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = load_config(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
