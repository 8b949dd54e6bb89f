// Analyzer module: summary statistics, trend projection and point lookup.

pub mod forecast;
pub mod price_analysis;
pub mod selection;
pub mod summary;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl, Snapshot};
