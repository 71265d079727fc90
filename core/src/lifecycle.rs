//! Request lifecycle state machine
//!
//! Every panel drives its single in-flight request through a
//! [`RequestLifecycle`]:
//!
//! ```text
//!            begin_submission (valid)           resolve
//!   Idle ──────────────────────────► Loading ─────────► Success
//!    │                                 ▲   │
//!    │ begin_submission (invalid)      │   │ reject
//!    ▼                                 │   ▼
//!  Error ──────────────────────────────┘  Error
//!            begin_submission (valid)
//! ```
//!
//! Each accepted submission is stamped with a generation [`Ticket`].
//! [`invalidate`](RequestLifecycle::invalidate) bumps the generation, so a
//! response arriving after a mode switch or unmount finds its ticket stale and
//! is dropped without touching state.

use crate::error::{TransportError, ValidationError};

/// Observable state of a panel's request.
///
/// Exactly one variant holds; result and error message live inside the
/// variant that owns them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// A validated request ready to be sent, paired with its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<R> {
    pub ticket: Ticket,
    pub request: R,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestLifecycle<T> {
    state: RequestState<T>,
    generation: u64,
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestLifecycle<T> {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Start a submission.
    ///
    /// Refused (returns `None`, state untouched) while a request is in flight.
    /// A failed precondition moves to `Error` with the validation message and
    /// yields no ticket. Otherwise any prior result or error is cleared and the
    /// lifecycle enters `Loading`.
    pub fn begin_submission(
        &mut self,
        precondition: Result<(), ValidationError>,
    ) -> Option<Ticket> {
        if self.state.is_loading() {
            tracing::debug!("submission refused while a request is in flight");
            return None;
        }

        if let Err(err) = precondition {
            tracing::debug!(field = err.field, "submission failed validation");
            self.state = RequestState::Error(err.message.to_string());
            return None;
        }

        self.generation += 1;
        self.state = RequestState::Loading;
        Some(Ticket {
            generation: self.generation,
        })
    }

    /// True if `ticket` belongs to the request currently in flight.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.state.is_loading() && ticket.generation == self.generation
    }

    /// Store a successful payload. Ignored unless `ticket` is current.
    pub fn resolve(&mut self, ticket: Ticket, payload: T) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "ignoring stale resolution");
            return false;
        }
        self.state = RequestState::Success(payload);
        true
    }

    /// Store a user-facing failure message. Ignored unless `ticket` is current.
    pub fn reject(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "ignoring stale rejection");
            return false;
        }
        self.state = RequestState::Error(message.into());
        true
    }

    /// Apply a transport outcome: resolve on success, otherwise log the cause
    /// and reject with the fixed `failure_message`.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<T, TransportError>,
        failure_message: &'static str,
    ) -> bool {
        match outcome {
            Ok(payload) => self.resolve(ticket, payload),
            Err(err) => {
                if self.is_current(ticket) {
                    tracing::warn!(error = %err, route = err.route(), "analysis request failed");
                }
                self.reject(ticket, failure_message)
            }
        }
    }

    /// Drop the current state and orphan any in-flight ticket.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Result<(), ValidationError> {
        Ok(())
    }

    fn invalid() -> Result<(), ValidationError> {
        Err(ValidationError {
            field: "query",
            message: "Please enter a search query.",
        })
    }

    #[test]
    fn starts_idle() {
        let lifecycle = RequestLifecycle::<u32>::new();
        assert_eq!(lifecycle.state(), &RequestState::Idle);
        assert!(lifecycle.state().result().is_none());
        assert!(lifecycle.state().error_message().is_none());
    }

    #[test]
    fn invalid_submission_goes_straight_to_error() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        assert!(lifecycle.begin_submission(invalid()).is_none());
        assert_eq!(
            lifecycle.state(),
            &RequestState::Error("Please enter a search query.".to_string())
        );
    }

    #[test]
    fn resolve_from_loading_succeeds() {
        let mut lifecycle = RequestLifecycle::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();
        assert!(lifecycle.state().is_loading());

        assert!(lifecycle.resolve(ticket, 7));
        assert_eq!(lifecycle.state(), &RequestState::Success(7));
    }

    #[test]
    fn resolve_from_success_is_ignored() {
        let mut lifecycle = RequestLifecycle::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();
        lifecycle.resolve(ticket, 1);

        assert!(!lifecycle.resolve(ticket, 2));
        assert_eq!(lifecycle.state(), &RequestState::Success(1));
    }

    #[test]
    fn resolve_from_idle_is_ignored() {
        let mut lifecycle = RequestLifecycle::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();
        lifecycle.invalidate();

        assert!(!lifecycle.resolve(ticket, 3));
        assert_eq!(lifecycle.state(), &RequestState::Idle);
    }

    #[test]
    fn reject_only_from_loading() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();
        assert!(lifecycle.reject(ticket, "failed"));
        assert_eq!(lifecycle.state().error_message(), Some("failed"));

        assert!(!lifecycle.reject(ticket, "again"));
        assert_eq!(lifecycle.state().error_message(), Some("failed"));
    }

    #[test]
    fn resubmission_clears_previous_result() {
        let mut lifecycle = RequestLifecycle::new();
        let first = lifecycle.begin_submission(valid()).unwrap();
        lifecycle.resolve(first, "old");

        let second = lifecycle.begin_submission(valid()).unwrap();
        assert_eq!(lifecycle.state(), &RequestState::Loading);
        assert!(!lifecycle.resolve(first, "stale"));
        assert!(lifecycle.resolve(second, "new"));
        assert_eq!(lifecycle.state().result(), Some(&"new"));
    }

    #[test]
    fn resubmission_from_error_is_allowed() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        lifecycle.begin_submission(invalid());
        assert!(lifecycle.begin_submission(valid()).is_some());
        assert!(lifecycle.state().error_message().is_none());
    }

    #[test]
    fn second_submission_refused_while_loading() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();

        assert!(lifecycle.begin_submission(valid()).is_none());
        assert!(lifecycle.begin_submission(invalid()).is_none());
        assert!(lifecycle.is_current(ticket));
        assert!(lifecycle.state().is_loading());
    }

    #[test]
    fn late_resolution_after_invalidate_is_dropped() {
        let mut lifecycle = RequestLifecycle::new();
        let orphan = lifecycle.begin_submission(valid()).unwrap();
        lifecycle.invalidate();
        let fresh = lifecycle.begin_submission(valid()).unwrap();

        assert!(!lifecycle.resolve(orphan, 1));
        assert!(lifecycle.state().is_loading());
        assert!(lifecycle.resolve(fresh, 2));
        assert_eq!(lifecycle.state(), &RequestState::Success(2));
    }

    #[test]
    fn settle_maps_transport_failure_to_fixed_message() {
        let mut lifecycle = RequestLifecycle::<u32>::new();
        let ticket = lifecycle.begin_submission(valid()).unwrap();
        let outcome = Err(TransportError::Status {
            route: "/search",
            status: 500,
        });

        assert!(lifecycle.settle(ticket, outcome, "Failed to fetch articles."));
        assert_eq!(
            lifecycle.state().error_message(),
            Some("Failed to fetch articles.")
        );
    }
}
