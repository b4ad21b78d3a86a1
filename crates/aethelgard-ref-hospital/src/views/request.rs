//! Per-view advisory request lifecycle.
//!
//! A view holds one `AdvisorySlot`. The slot hands out at most one ticket at
//! a time and accepts only the completion carrying that ticket's request id:
//!
//! ```text
//!   Idle ──begin──▶ Pending ──complete(id)──▶ Succeeded / Failed
//!    ▲                 │                            │
//!    └─────reset───────┴───────────begin────────────┘ (re-enters Pending)
//! ```
//!
//! `begin` while Pending yields no ticket, so no second backend call is
//! made. `reset` forgets the pending id; a completion that arrives later
//! is dropped.

use tracing::debug;

use aethelgard_contracts::advisory::{AdvisoryKind, AdvisoryResponse, RequestId, ResponseStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    /// Model text, verbatim.
    Succeeded(String),
    /// The fixed fallback text the client returned.
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }

    /// The text to show, whichever way the request ended.
    pub fn text(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded(text) | RequestState::Failed(text) => Some(text),
            RequestState::Idle | RequestState::Pending { .. } => None,
        }
    }
}

/// Work handed from a view to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryTicket {
    pub request_id: RequestId,
    pub kind: AdvisoryKind,
    pub context: String,
}

#[derive(Debug, Default)]
pub struct AdvisorySlot {
    state: RequestState,
}

impl AdvisorySlot {
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Move to Pending and return a ticket, unless a request is already in flight.
    ///
    /// `context` is only evaluated when a ticket is issued.
    pub fn begin(
        &mut self,
        kind: AdvisoryKind,
        context: impl FnOnce() -> String,
    ) -> Option<AdvisoryTicket> {
        if let RequestState::Pending { request_id } = &self.state {
            debug!(request_id = %request_id, kind = %kind, "request already in flight; trigger ignored");
            return None;
        }

        let request_id = RequestId::new();
        self.state = RequestState::Pending { request_id };
        Some(AdvisoryTicket {
            request_id,
            kind,
            context: context(),
        })
    }

    /// Apply `response` if it answers the pending request. Returns whether it was applied.
    pub fn complete(&mut self, response: &AdvisoryResponse) -> bool {
        match &self.state {
            RequestState::Pending { request_id } if *request_id == response.request_id => {
                self.state = match response.status {
                    ResponseStatus::Generated => RequestState::Succeeded(response.text.clone()),
                    ResponseStatus::Unavailable | ResponseStatus::Empty | ResponseStatus::Failed => {
                        RequestState::Failed(response.text.clone())
                    }
                };
                true
            }
            _ => {
                debug!(
                    request_id = %response.request_id,
                    kind = %response.kind,
                    "stale advisory completion discarded"
                );
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
    }

    /// Clear a finished result back to Idle. A request in flight is left alone.
    pub fn dismiss(&mut self) -> bool {
        match self.state {
            RequestState::Succeeded(_) | RequestState::Failed(_) => {
                self.state = RequestState::Idle;
                true
            }
            RequestState::Idle | RequestState::Pending { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(ticket: &AdvisoryTicket, status: ResponseStatus, text: &str) -> AdvisoryResponse {
        AdvisoryResponse {
            request_id: ticket.request_id,
            kind: ticket.kind,
            status,
            text: text.to_string(),
        }
    }

    #[test]
    fn second_begin_while_pending_yields_no_ticket() {
        let mut slot = AdvisorySlot::default();
        assert!(slot.begin(AdvisoryKind::OccupancyForecast, || "ctx".into()).is_some());
        assert!(slot.state().is_pending());

        let mut evaluated = false;
        let second = slot.begin(AdvisoryKind::OccupancyForecast, || {
            evaluated = true;
            "ctx".into()
        });
        assert!(second.is_none());
        assert!(!evaluated, "context must not be built for a rejected trigger");
    }

    #[test]
    fn matching_completion_applies_and_unlocks() {
        let mut slot = AdvisorySlot::default();
        let ticket = slot.begin(AdvisoryKind::OccupancyForecast, || "ctx".into()).unwrap();

        assert!(slot.complete(&response(&ticket, ResponseStatus::Generated, "Rising trend.")));
        assert_eq!(slot.state(), &RequestState::Succeeded("Rising trend.".into()));

        // A finished request does not block the next one.
        assert!(slot.begin(AdvisoryKind::OccupancyForecast, || "ctx".into()).is_some());
    }

    #[test]
    fn fallback_statuses_land_in_failed_with_text() {
        let mut slot = AdvisorySlot::default();
        let ticket = slot.begin(AdvisoryKind::OccupancyForecast, || "ctx".into()).unwrap();
        slot.complete(&response(&ticket, ResponseStatus::Unavailable, "Forecasting Unavailable."));
        assert_eq!(slot.state().text(), Some("Forecasting Unavailable."));
        assert!(matches!(slot.state(), RequestState::Failed(_)));
    }

    #[test]
    fn completion_after_reset_is_discarded() {
        let mut slot = AdvisorySlot::default();
        let ticket = slot.begin(AdvisoryKind::ClinicalSummary, || "ctx".into()).unwrap();
        slot.reset();

        assert!(!slot.complete(&response(&ticket, ResponseStatus::Generated, "late")));
        assert_eq!(slot.state(), &RequestState::Idle);
    }

    #[test]
    fn completion_for_superseded_request_is_discarded() {
        let mut slot = AdvisorySlot::default();
        let first = slot.begin(AdvisoryKind::ClinicalSummary, || "a".into()).unwrap();
        slot.reset();
        let second = slot.begin(AdvisoryKind::ClinicalSummary, || "b".into()).unwrap();

        assert!(!slot.complete(&response(&first, ResponseStatus::Generated, "for a")));
        assert!(slot.state().is_pending());
        assert!(slot.complete(&response(&second, ResponseStatus::Generated, "for b")));
        assert_eq!(slot.state().text(), Some("for b"));
    }
}
