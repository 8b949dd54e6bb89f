use crate::model::{FetchError, HistoryRequest, PriceHistory};

#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch(&self, req: &HistoryRequest) -> Result<PriceHistory, FetchError>;
}
