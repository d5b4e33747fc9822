//! REST backend adapter.
//!
//! Talks to the dashboard backend's three endpoints:
//!
//! | Endpoint | Operation |
//! |----------|-----------|
//! | `GET {base}/stocks` | instrument list |
//! | `GET {base}/stocks/{symbol}` | instrument detail |
//! | `GET {base}/stocks/{symbol}/prices` | price history |
//!
//! Bodies are positional records; decoding and per-record rejection
//! happen in [`crate::record`]. A 404 maps to `NotFound`, transport
//! failures and non-2xx statuses map to `Unavailable`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::data_source::{MarketDataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::record::{decode_instrument, decode_instruments, decode_price_series};
use crate::{Instrument, PriceSeries, Symbol};

const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Client for the dashboard's REST backend.
pub struct RestMarketData {
    base_url: String,
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl RestMarketData {
    /// Create a client for the given base URL (e.g.
    /// `http://127.0.0.1:8000/api`), using the production transport.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(base_url: impl Into<String>, http_client: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch(&self, url: &str, subject: &str) -> Result<String, SourceError> {
        debug!(url, "fetching from backend");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("backend transport error: {}", error.message()))
        })?;

        if response.status == 404 {
            return Err(SourceError::not_found(format!("{subject} not found")));
        }

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "backend returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    fn parse_rows(body: &str, subject: &str) -> Result<Vec<Value>, SourceError> {
        serde_json::from_str::<Vec<Value>>(body).map_err(|error| {
            SourceError::malformed_record(format!("{subject} body is not a JSON array: {error}"))
        })
    }
}

impl MarketDataSource for RestMarketData {
    fn list_instruments<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Instrument>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!("{}/stocks", self.base_url);
            let body = self.fetch(&url, "instrument list").await?;
            let rows = Self::parse_rows(&body, "instrument list")?;

            let (instruments, rejected) = decode_instruments(&rows);
            for error in &rejected {
                warn!(%error, "rejected malformed instrument record");
            }

            if instruments.is_empty() && !rows.is_empty() {
                return Err(SourceError::malformed_record(
                    "every instrument record in the list failed validation",
                ));
            }

            Ok(instruments)
        })
    }

    fn instrument_detail<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Instrument, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "{}/stocks/{}",
                self.base_url,
                urlencoding::encode(symbol.as_str())
            );
            let body = self
                .fetch(&url, &format!("instrument '{symbol}'"))
                .await?;

            let row: Value = serde_json::from_str(&body).map_err(|error| {
                SourceError::malformed_record(format!(
                    "instrument '{symbol}' body is not valid JSON: {error}"
                ))
            })?;

            decode_instrument(&row).map_err(|error| {
                SourceError::malformed_record(format!(
                    "instrument '{symbol}' record failed validation: {error}"
                ))
            })
        })
    }

    fn price_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!(
                "{}/stocks/{}/prices",
                self.base_url,
                urlencoding::encode(symbol.as_str())
            );
            let body = self
                .fetch(&url, &format!("price history for '{symbol}'"))
                .await?;
            let rows = Self::parse_rows(&body, "price history")?;

            let (series, rejected) = decode_price_series(&rows);
            for error in &rejected {
                warn!(symbol = %symbol, %error, "rejected malformed price record");
            }

            if series.is_empty() && !rows.is_empty() {
                return Err(SourceError::malformed_record(format!(
                    "every price record for '{symbol}' failed validation"
                )));
            }

            Ok(series)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::sync::Mutex;

    struct CannedHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl CannedHttpClient {
        fn with_body(body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::ok_json(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_status(status: u16) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: String::new(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(HttpError::new("connection refused")),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }
    }

    impl HttpClient for CannedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn list_hits_the_stocks_endpoint() {
        let client = Arc::new(CannedHttpClient::with_body("[]"));
        let http_client: Arc<dyn HttpClient> = client.clone();
        let source =
            RestMarketData::with_http_client("http://127.0.0.1:8000/api/", http_client);

        let instruments = source.list_instruments().await.expect("must list");
        assert!(instruments.is_empty());
        assert_eq!(
            client.recorded_urls(),
            vec![String::from("http://127.0.0.1:8000/api/stocks")]
        );
    }

    #[tokio::test]
    async fn missing_symbol_maps_404_to_not_found() {
        let client = Arc::new(CannedHttpClient::with_status(404));
        let source = RestMarketData::with_http_client("http://127.0.0.1:8000/api", client);
        let symbol = Symbol::parse("ZZZZ").expect("valid symbol");

        let error = source.price_series(&symbol).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NotFound);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_unavailable() {
        let client = Arc::new(CannedHttpClient::failing());
        let source = RestMarketData::with_http_client("http://127.0.0.1:8000/api", client);

        let error = source.list_instruments().await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.retryable());
    }

    #[tokio::test]
    async fn malformed_records_are_dropped_individually() {
        let body = r#"[
            [1, "2024-10-01 00:00:00", 100.0, 101.0, 99.5, 100.5, 1000, 0, 0, 1],
            [2, "2024-10-02 00:00:00", "bad", 101.0, 99.5, 100.5, 1000, 0, 0, 1]
        ]"#;
        let client = Arc::new(CannedHttpClient::with_body(body));
        let source = RestMarketData::with_http_client("http://127.0.0.1:8000/api", client);
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let series = source.price_series(&symbol).await.expect("must fetch");
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].sequence, 1);
    }

    #[tokio::test]
    async fn fully_malformed_history_is_an_error_not_an_empty_series() {
        let body = r#"[[1, "2024-10-01 00:00:00", "bad", 101.0, 99.5, 100.5, 1000, 0, 0, 1]]"#;
        let client = Arc::new(CannedHttpClient::with_body(body));
        let source = RestMarketData::with_http_client("http://127.0.0.1:8000/api", client);
        let symbol = Symbol::parse("AAPL").expect("valid symbol");

        let error = source.price_series(&symbol).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::MalformedRecord);
    }

    #[tokio::test]
    async fn detail_decodes_a_single_record() {
        let body = r#"["XOM", "ExxonMobil", "Exxon Mobil Corporation", "Energy",
            "Oil & Gas", "468681935872", "USD", "NYSE", "EQUITY",
            "2024-11-11 05:33:12.803444"]"#;
        let client = Arc::new(CannedHttpClient::with_body(body));
        let source = RestMarketData::with_http_client("http://127.0.0.1:8000/api", client);
        let symbol = Symbol::parse("XOM").expect("valid symbol");

        let instrument = source.instrument_detail(&symbol).await.expect("must fetch");
        assert_eq!(instrument.sector, "Energy");
        assert_eq!(instrument.market_cap.to_string(), "468681935872");
    }
}
