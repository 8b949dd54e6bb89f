use stock_forecaster::analyzer::AnalyzerImpl;
use stock_forecaster::config::{load_config, AppConfig};
use stock_forecaster::fetcher::{QuoteProvider, YahooProvider};
use stock_forecaster::session::Session;
use stock_forecaster::ui::ForecastApp;

use eframe::egui;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    // Load configuration from file
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    info!(
        "Loaded config: {} symbols, default period {}, horizon {}",
        config.symbols.len(),
        config.default_period,
        config.forecast_horizon
    );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return;
        }
    };

    let provider: Arc<dyn QuoteProvider> = match YahooProvider::new(&config) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("Failed to initialize market-data client: {}", e);
            return;
        }
    };
    let session = Session::new(
        provider,
        AnalyzerImpl::new(config.forecast_horizon),
        runtime.handle().clone(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([400.0, 360.0])
            .with_title("Stock Forecasting Tool"),
        ..Default::default()
    };

    let symbols = config.symbols.clone();
    let period = config.default_period;
    let result = eframe::run_native(
        "Stock Forecasting Tool",
        options,
        Box::new(move |cc| Ok(Box::new(ForecastApp::new(cc, session, symbols, period)))),
    );

    if let Err(e) = result {
        error!("Window error: {}", e);
    }

    // Abandon fetches still in flight instead of waiting on them.
    runtime.shutdown_background();
    info!("Stock Forecasting Tool closed.");
}
