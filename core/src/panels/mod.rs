//! Feature panel controllers
//!
//! Each panel owns its input fields and one [`RequestLifecycle`]. Submitting is
//! split into three steps so a UI can release its borrow of the panel while
//! the request is in flight:
//!
//! 1. [`Panel::begin`] validates the inputs and snapshots them into a
//!    [`Submission`] (or records a validation error).
//! 2. [`Panel::dispatch`] performs the backend call. It takes no `self`.
//! 3. [`Panel::finish`] settles the outcome, dropped if the ticket is stale.
//!
//! [`Panel::submit`] chains the three for callers that can hold `&mut self`
//! across the await (the console, tests).

mod compare_query;
mod search;
mod trend;


pub use compare_query::{CompareQueryPanel, CompareQueryRequest};
pub use search::SearchPanel;
pub use trend::TrendPanel;

use crate::api::AnalysisBackend;
use crate::error::{TransportError, ValidationError};
use crate::lifecycle::{RequestLifecycle, RequestState, Submission, Ticket};

#[allow(async_fn_in_trait)]
pub trait Panel {
    /// Snapshot of validated inputs sent to the backend.
    type Request;
    /// Payload stored on success.
    type Output;

    fn lifecycle(&self) -> &RequestLifecycle<Self::Output>;

    fn lifecycle_mut(&mut self) -> &mut RequestLifecycle<Self::Output>;

    /// Check required inputs and build the request from them.
    fn validate(&self) -> Result<Self::Request, ValidationError>;

    /// Operator-facing message shown when the backend call fails.
    fn failure_message(&self) -> &'static str;

    async fn dispatch<B: AnalysisBackend>(
        backend: &B,
        request: &Self::Request,
    ) -> Result<Self::Output, TransportError>;

    fn state(&self) -> &RequestState<Self::Output> {
        self.lifecycle().state()
    }

    /// True while a request is in flight; the submit control is disabled.
    fn is_busy(&self) -> bool {
        self.state().is_loading()
    }

    fn begin(&mut self) -> Option<Submission<Self::Request>> {
        match self.validate() {
            Ok(request) => {
                let ticket = self.lifecycle_mut().begin_submission(Ok(()))?;
                Some(Submission { ticket, request })
            }
            Err(err) => {
                self.lifecycle_mut().begin_submission(Err(err));
                None
            }
        }
    }

    fn finish(&mut self, ticket: Ticket, outcome: Result<Self::Output, TransportError>) -> bool {
        let message = self.failure_message();
        self.lifecycle_mut().settle(ticket, outcome, message)
    }

    /// Validate, call the backend and settle in one go.
    ///
    /// Returns true if the outcome was applied to this panel's state.
    async fn submit<B: AnalysisBackend>(&mut self, backend: &B) -> bool
    where
        Self: Sized,
    {
        let Some(submission) = self.begin() else {
            return false;
        };
        let outcome = Self::dispatch(backend, &submission.request).await;
        self.finish(submission.ticket, outcome)
    }

    /// Called when the panel is torn down; orphans any in-flight request.
    fn unmount(&mut self) {
        self.lifecycle_mut().invalidate();
    }
}

/// Uniform required-field check. No trimming: whitespace counts as input.
pub(crate) fn require(
    field: &'static str,
    value: &str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError { field, message })
    } else {
        Ok(())
    }
}
