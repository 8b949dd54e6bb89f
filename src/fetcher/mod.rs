// Market-data providers.

pub mod traits;
pub mod yahoo;

pub use traits::QuoteProvider;
pub use yahoo::YahooProvider;
