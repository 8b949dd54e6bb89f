use crate::analyzer::forecast::{project, Forecast};
use crate::analyzer::summary::{summarize, SummaryStats};
use crate::model::{AnalysisError, PriceHistory};

/// Trait defining the interface for a price-history analyzer.
pub trait Analyzer {
    fn calculate_stats(&self, history: &PriceHistory) -> Result<SummaryStats, AnalysisError>;
    fn forecast(&self, history: &PriceHistory) -> Result<Forecast, AnalysisError>;
}

/// Everything the window needs to render one fetched history.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub history: PriceHistory,
    pub stats: SummaryStats,
    pub forecast: Forecast,
}

pub struct AnalyzerImpl {
    horizon: usize,
}

impl AnalyzerImpl {
    pub fn new(horizon: usize) -> Self {
        Self { horizon }
    }

    /// Runs the summary and the trend projection over `history`.
    pub fn analyze(&self, history: PriceHistory) -> Result<Snapshot, AnalysisError> {
        let stats = self.calculate_stats(&history)?;
        let forecast = self.forecast(&history)?;
        Ok(Snapshot {
            history,
            stats,
            forecast,
        })
    }
}

impl Analyzer for AnalyzerImpl {
    fn calculate_stats(&self, history: &PriceHistory) -> Result<SummaryStats, AnalysisError> {
        summarize(history)
    }

    fn forecast(&self, history: &PriceHistory) -> Result<Forecast, AnalysisError> {
        project(history, self.horizon)
    }
}
