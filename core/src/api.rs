//! REST client for the analysis service
//!
//! [`AnalysisBackend`] is the capability seam the panels are generic over;
//! [`ApiClient`] is the reqwest implementation (reqwest issues `fetch` calls
//! when compiled to wasm32). Every call is a single POST with a JSON body:
//! no retries and no timeout beyond the transport default.

use serde::Serialize;
use serde::de::DeserializeOwned;

use narrascope_types::{
    CompareRequest, CompareResult, QueryRequest, QueryResult, SearchRequest, SearchResult,
    TrendRequest, TrendResult,
};

use crate::config::ClientConfig;
use crate::error::TransportError;

pub const SEARCH_ROUTE: &str = "/search";
pub const COMPARE_ROUTE: &str = "/compare-narratives";
pub const QUERY_ROUTE: &str = "/query-ground-truth";
pub const TREND_ROUTE: &str = "/analyze-perception-trend";

/// One operation per analysis capability.
///
/// Callers pass already-validated, non-empty arguments.
#[allow(async_fn_in_trait)]
pub trait AnalysisBackend {
    async fn search(&self, query: &str) -> Result<SearchResult, TransportError>;

    async fn compare(
        &self,
        intended_truth: &str,
        media_text: &str,
    ) -> Result<CompareResult, TransportError>;

    async fn query(&self, question: &str) -> Result<QueryResult, TransportError>;

    async fn analyze_trend(&self, request: &TrendRequest) -> Result<TrendResult, TransportError>;
}

/// API client for the analysis service
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Create an API client from client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, R>(&self, route: &'static str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, route);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Network { route, source })?;

        let status = resp.status();
        tracing::debug!(route, status = status.as_u16(), "analysis request completed");
        if !status.is_success() {
            return Err(TransportError::Status {
                route,
                status: status.as_u16(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| TransportError::Network { route, source })?;
        serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode { route, source })
    }
}

impl AnalysisBackend for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResult, TransportError> {
        let body = SearchRequest {
            query: query.to_string(),
        };
        self.post_json(SEARCH_ROUTE, &body).await
    }

    async fn compare(
        &self,
        intended_truth: &str,
        media_text: &str,
    ) -> Result<CompareResult, TransportError> {
        let body = CompareRequest {
            intended_truth: intended_truth.to_string(),
            media_text: media_text.to_string(),
        };
        self.post_json(COMPARE_ROUTE, &body).await
    }

    async fn query(&self, question: &str) -> Result<QueryResult, TransportError> {
        let body = QueryRequest {
            query: question.to_string(),
        };
        self.post_json(QUERY_ROUTE, &body).await
    }

    async fn analyze_trend(&self, request: &TrendRequest) -> Result<TrendResult, TransportError> {
        self.post_json(TREND_ROUTE, request).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Request line, headers and body as received by the test server.
    struct CapturedRequest {
        head: String,
        body: String,
    }

    /// Serve exactly one canned response and hand back what the client sent.
    async fn start_single_response_server(
        status: &str,
        body: &'static str,
    ) -> Option<(String, JoinHandle<CapturedRequest>)> {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => return None,
            Err(err) => panic!("failed to bind local test listener: {err}"),
        };
        let addr = listener.local_addr().unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .into_bytes();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            // Read until the headers and the declared body length have arrived.
            let (head, body) = loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let head = text[..split].to_string();
                    let body = text[split + 4..].to_string();
                    let expected = content_length(&head);
                    if body.len() >= expected || n == 0 {
                        break (head, body);
                    }
                } else if n == 0 {
                    break (text, String::new());
                }
            };

            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
            CapturedRequest { head, body }
        });

        Some((format!("http://{addr}"), handle))
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse().ok())
                    .flatten()
            })
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn search_posts_query_and_decodes_articles() {
        let Some((base_url, server)) = start_single_response_server(
            "200 OK",
            r#"{"articles":[{"title":"EV Boom","url":"http://x","source":"Reuters","snippet":"..."}]}"#,
        )
        .await
        else {
            return;
        };

        let client = ApiClient::new(format!("{base_url}/"));
        let result = client.search("electric vehicles").await.unwrap();
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].url, "http://x");

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /search HTTP/1.1"));
        assert!(
            captured
                .head
                .to_ascii_lowercase()
                .contains("content-type: application/json")
        );
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body, serde_json::json!({"query": "electric vehicles"}));
    }

    #[tokio::test]
    async fn compare_sends_both_fields() {
        let Some((base_url, server)) = start_single_response_server(
            "200 OK",
            r#"{"narrative_gap":"gap","misinterpreted_points":["a"],"counter_speech_points":["b","c"]}"#,
        )
        .await
        else {
            return;
        };

        let result = ApiClient::new(base_url)
            .compare("truth", "media")
            .await
            .unwrap();
        assert_eq!(result.counter_speech_points.len(), 2);

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /compare-narratives "));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"intended_truth": "truth", "media_text": "media"})
        );
    }

    #[tokio::test]
    async fn query_uses_ground_truth_route() {
        let Some((base_url, server)) =
            start_single_response_server("200 OK", r#"{"answer":"No direct relationship."}"#).await
        else {
            return;
        };

        let result = ApiClient::new(base_url).query("Who funds it?").await.unwrap();
        assert!(result.evidence.is_none());

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /query-ground-truth "));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body, serde_json::json!({"query": "Who funds it?"}));
    }

    #[tokio::test]
    async fn trend_sends_window() {
        let Some((base_url, server)) = start_single_response_server(
            "200 OK",
            r#"{"status":"success","keywords":"policy reform","report":{},"time_series_analytics":{}}"#,
        )
        .await
        else {
            return;
        };

        let request = TrendRequest::new("policy reform").with_window(14, 7);
        let result = ApiClient::new(base_url).analyze_trend(&request).await.unwrap();
        assert_eq!(result.keywords, "policy reform");

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /analyze-perception-trend "));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"keywords": "policy reform", "time_period_days": 14, "granularity_days": 7})
        );
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let Some((base_url, _server)) = start_single_response_server(
            "404 Not Found",
            r#"{"detail":"No articles found."}"#,
        )
        .await
        else {
            return;
        };

        let err = ApiClient::new(base_url).search("nothing").await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Status {
                route: SEARCH_ROUTE,
                status: 404
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let Some((base_url, _server)) = start_single_response_server("200 OK", "not json").await
        else {
            return;
        };

        let err = ApiClient::new(base_url).query("q").await.unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }));
        assert_eq!(err.route(), QUERY_ROUTE);
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        // Bind then drop to obtain a port with nothing listening.
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(_) => return,
        };
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ApiClient::new(format!("http://{addr}"))
            .search("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
    }

    #[test]
    fn from_config_uses_base_url() {
        let config = ClientConfig::default();
        assert_eq!(ApiClient::from_config(&config).base_url(), "http://127.0.0.1:8000");
    }
}
