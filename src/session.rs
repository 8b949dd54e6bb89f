// Fetch orchestration between the window and the market-data provider.
use crate::analyzer::{AnalyzerImpl, Snapshot};
use crate::fetcher::QuoteProvider;
use crate::model::{AnalysisError, FetchError, HistoryRequest};

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub const NO_DATA_MESSAGE: &str = "Invalid stock symbol or no data available";

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Ready(Box<Snapshot>),
    NoData,
    Failed(String),
}

impl FetchOutcome {
    /// Text for the error line, or `None` on success.
    pub fn error_message(&self) -> Option<String> {
        match self {
            FetchOutcome::Ready(_) => None,
            FetchOutcome::NoData => Some(NO_DATA_MESSAGE.to_string()),
            FetchOutcome::Failed(e) => Some(format!("Failed to fetch data: {}", e)),
        }
    }
}

#[derive(Debug)]
pub struct FetchResult {
    pub request_id: u64,
    pub request: HistoryRequest,
    pub outcome: FetchOutcome,
}

/// Fetches one history and analyzes it.
pub async fn run_request(
    provider: &dyn QuoteProvider,
    analyzer: &AnalyzerImpl,
    req: &HistoryRequest,
) -> FetchOutcome {
    let history = match provider.fetch(req).await {
        Ok(h) => h,
        Err(FetchError::Empty) => return FetchOutcome::NoData,
        Err(e) => {
            warn!("Fetch failed for {} ({}): {}", req.symbol, req.period, e);
            return FetchOutcome::Failed(e.to_string());
        }
    };

    if history.is_empty() {
        info!("No bars for {} ({})", req.symbol, req.period);
        return FetchOutcome::NoData;
    }

    match analyzer.analyze(history) {
        Ok(snapshot) => FetchOutcome::Ready(Box::new(snapshot)),
        Err(AnalysisError::EmptyHistory) => FetchOutcome::NoData,
        Err(e) => {
            warn!("Analysis failed for {}: {}", req.symbol, e);
            FetchOutcome::Failed(e.to_string())
        }
    }
}

/// Runs fetches on a tokio runtime and hands back only the newest result.
pub struct Session {
    provider: Arc<dyn QuoteProvider>,
    analyzer: Arc<AnalyzerImpl>,
    runtime: Handle,
    tx: mpsc::Sender<FetchResult>,
    rx: mpsc::Receiver<FetchResult>,
    next_id: u64,
    in_flight: Option<u64>,
}

impl Session {
    pub fn new(provider: Arc<dyn QuoteProvider>, analyzer: AnalyzerImpl, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel(16);
        Self {
            provider,
            analyzer: Arc::new(analyzer),
            runtime,
            tx,
            rx,
            next_id: 0,
            in_flight: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a fetch. Any earlier request still running is superseded.
    /// `on_done` runs on the runtime once the result is queued.
    pub fn submit<F>(&mut self, req: HistoryRequest, on_done: F) -> u64
    where
        F: Fn() + Send + 'static,
    {
        self.next_id += 1;
        let request_id = self.next_id;
        self.in_flight = Some(request_id);
        info!("Request #{}: {} ({})", request_id, req.symbol, req.period);

        let provider = self.provider.clone();
        let analyzer = self.analyzer.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = run_request(provider.as_ref(), &analyzer, &req).await;
            let result = FetchResult {
                request_id,
                request: req,
                outcome,
            };
            if tx.send(result).await.is_err() {
                warn!("Result for request #{} dropped: window closed", request_id);
                return;
            }
            on_done();
        });

        request_id
    }

    fn accept(&mut self, result: FetchResult) -> Option<FetchResult> {
        if Some(result.request_id) != self.in_flight {
            info!("Discarding stale result #{}", result.request_id);
            return None;
        }
        self.in_flight = None;
        Some(result)
    }

    /// Non-blocking: drains queued results and returns the current one, if it arrived.
    pub fn poll(&mut self) -> Option<FetchResult> {
        let mut latest = None;
        while let Ok(result) = self.rx.try_recv() {
            if let Some(accepted) = self.accept(result) {
                latest = Some(accepted);
            }
        }
        latest
    }

    /// Waits for the result of the current request, skipping stale ones.
    pub async fn next_result(&mut self) -> Option<FetchResult> {
        while self.in_flight.is_some() {
            let result = self.rx.recv().await?;
            if let Some(accepted) = self.accept(result) {
                return Some(accepted);
            }
        }
        None
    }
}
