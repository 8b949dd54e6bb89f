pub mod app;
pub mod format;

pub use app::ForecastApp;
