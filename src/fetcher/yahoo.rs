use crate::config::AppConfig;
use crate::fetcher::traits::QuoteProvider;
use crate::model::{FetchError, HistoryRequest, PriceHistory};
use crate::parser::{Parser, YahooChartParser};

use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

pub struct YahooProvider {
    client: Client,
    base_url: String,
    parser: YahooChartParser,
}

impl YahooProvider {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            parser: YahooChartParser::new(),
        })
    }

    fn build_url(&self, req: &HistoryRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Http(format!("bad base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Http(format!("base url cannot have a path: {}", self.base_url)))?
            .push(&req.symbol);
        url.query_pairs_mut()
            .append_pair("range", req.period.range())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl QuoteProvider for YahooProvider {
    async fn fetch(&self, req: &HistoryRequest) -> Result<PriceHistory, FetchError> {
        let url = self.build_url(req)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match YahooChartParser::error_from_body(&body) {
                // a 404 with a chart error is an unknown symbol
                Some(_) if status == StatusCode::NOT_FOUND => FetchError::Empty,
                Some(err) => err,
                None => FetchError::Status(status.as_u16()),
            });
        }

        let history = self.parser.parse(&body, req)?;
        info!("Fetched {} bars for {} ({})", history.len(), req.symbol, req.period);
        Ok(history)
    }
}
