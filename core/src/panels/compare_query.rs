use narrascope_types::{
    CompareRequest, CompareResult, Mode, QueryRequest, QueryResult, ResultPayload,
};

use super::{Panel, require};
use crate::api::AnalysisBackend;
use crate::error::{TransportError, ValidationError};
use crate::lifecycle::RequestLifecycle;

/// Request for whichever sub-form is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareQueryRequest {
    Compare(CompareRequest),
    Query(QueryRequest),
}

/// Dual-form panel: narrative comparison or knowledge-base query.
///
/// The stored payload is a [`ResultPayload`] whose variant always matches the
/// mode that produced it; changing mode drops the state, so a compare result
/// is never shown under the query form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompareQueryPanel {
    mode: Mode,
    pub intended_truth: String,
    pub media_text: String,
    pub question: String,
    lifecycle: RequestLifecycle<ResultPayload>,
}

impl CompareQueryPanel {
    pub const COMPARE_VALIDATION_MESSAGE: &'static str =
        "Please provide both the intended truth and the media text.";
    pub const QUERY_VALIDATION_MESSAGE: &'static str = "Please enter a question.";
    pub const COMPARE_FAILURE_MESSAGE: &'static str =
        "Failed to compare narratives. Please try again.";
    pub const QUERY_FAILURE_MESSAGE: &'static str =
        "Failed to query the knowledge base. Please try again.";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch sub-form. A real change resets the request state to idle and
    /// orphans any request still in flight.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "compare/query mode switched");
        self.mode = mode;
        self.lifecycle.invalidate();
    }

    pub fn compare_result(&self) -> Option<&CompareResult> {
        match self.state().result() {
            Some(ResultPayload::Compare(result)) => Some(result),
            _ => None,
        }
    }

    pub fn query_result(&self) -> Option<&QueryResult> {
        match self.state().result() {
            Some(ResultPayload::Query(result)) => Some(result),
            _ => None,
        }
    }
}

impl Panel for CompareQueryPanel {
    type Request = CompareQueryRequest;
    type Output = ResultPayload;

    fn lifecycle(&self) -> &RequestLifecycle<ResultPayload> {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut RequestLifecycle<ResultPayload> {
        &mut self.lifecycle
    }

    fn validate(&self) -> Result<CompareQueryRequest, ValidationError> {
        match self.mode {
            Mode::Compare => {
                require("intended_truth", &self.intended_truth, Self::COMPARE_VALIDATION_MESSAGE)?;
                require("media_text", &self.media_text, Self::COMPARE_VALIDATION_MESSAGE)?;
                Ok(CompareQueryRequest::Compare(CompareRequest {
                    intended_truth: self.intended_truth.clone(),
                    media_text: self.media_text.clone(),
                }))
            }
            Mode::Query => {
                require("question", &self.question, Self::QUERY_VALIDATION_MESSAGE)?;
                Ok(CompareQueryRequest::Query(QueryRequest {
                    query: self.question.clone(),
                }))
            }
        }
    }

    fn failure_message(&self) -> &'static str {
        match self.mode {
            Mode::Compare => Self::COMPARE_FAILURE_MESSAGE,
            Mode::Query => Self::QUERY_FAILURE_MESSAGE,
        }
    }

    async fn dispatch<B: AnalysisBackend>(
        backend: &B,
        request: &CompareQueryRequest,
    ) -> Result<ResultPayload, TransportError> {
        match request {
            CompareQueryRequest::Compare(req) => backend
                .compare(&req.intended_truth, &req.media_text)
                .await
                .map(ResultPayload::from),
            CompareQueryRequest::Query(req) => {
                backend.query(&req.query).await.map(ResultPayload::from)
            }
        }
    }
}
