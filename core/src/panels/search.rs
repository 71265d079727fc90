use narrascope_types::{Article, SearchRequest, SearchResult};

use super::{Panel, require};
use crate::api::AnalysisBackend;
use crate::error::{TransportError, ValidationError};
use crate::lifecycle::RequestLifecycle;

/// Article search: one query field, a list of credible articles back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPanel {
    pub query: String,
    lifecycle: RequestLifecycle<SearchResult>,
}

impl SearchPanel {
    pub const VALIDATION_MESSAGE: &'static str = "Please enter a search query.";
    pub const FAILURE_MESSAGE: &'static str =
        "Failed to fetch articles. Please make sure the backend server is running.";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Articles from the last successful search; `None` until one succeeds.
    pub fn articles(&self) -> Option<&[Article]> {
        self.state()
            .result()
            .map(|result| result.articles.as_slice())
    }
}

impl Panel for SearchPanel {
    type Request = SearchRequest;
    type Output = SearchResult;

    fn lifecycle(&self) -> &RequestLifecycle<SearchResult> {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut RequestLifecycle<SearchResult> {
        &mut self.lifecycle
    }

    fn validate(&self) -> Result<SearchRequest, ValidationError> {
        require("query", &self.query, Self::VALIDATION_MESSAGE)?;
        Ok(SearchRequest {
            query: self.query.clone(),
        })
    }

    fn failure_message(&self) -> &'static str {
        Self::FAILURE_MESSAGE
    }

    async fn dispatch<B: AnalysisBackend>(
        backend: &B,
        request: &SearchRequest,
    ) -> Result<SearchResult, TransportError> {
        backend.search(&request.query).await
    }
}
