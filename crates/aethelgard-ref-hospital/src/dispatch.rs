//! Runs advisory tickets off the UI thread.
//!
//! Each ticket gets its own worker thread that makes exactly one client
//! call and posts the `AdvisoryResponse` back over a channel. The UI loop
//! drains the receiver and feeds responses to `Shell::apply`, so view state
//! is only ever touched from the UI thread. There is no cancellation: a
//! response whose view has moved on is dropped by the view itself.

use std::{
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

use tracing::{debug, info};

use aethelgard_advisory::AdvisoryClient;
use aethelgard_contracts::advisory::AdvisoryResponse;

use crate::views::AdvisoryTicket;

pub struct AdvisoryDispatcher {
    client: Arc<AdvisoryClient>,
    tx: Sender<AdvisoryResponse>,
}

impl AdvisoryDispatcher {
    /// Create a dispatcher and the receiver its completions arrive on.
    pub fn new(client: Arc<AdvisoryClient>) -> (Self, Receiver<AdvisoryResponse>) {
        let (tx, rx) = mpsc::channel();
        (Self { client, tx }, rx)
    }

    pub fn client(&self) -> &AdvisoryClient {
        &self.client
    }

    /// Start `ticket` on a worker thread.
    pub fn dispatch(&self, ticket: AdvisoryTicket) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        info!(request_id = %ticket.request_id, kind = %ticket.kind, "advisory dispatched");

        thread::spawn(move || {
            let response = client.advise_with_id(ticket.request_id, ticket.kind, &ticket.context);
            if tx.send(response).is_err() {
                debug!(
                    request_id = %ticket.request_id,
                    "completion receiver gone; response dropped"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::{Duration, Instant},
    };

    use aethelgard_advisory::{AdvisoryConfig, TextGenerator};
    use aethelgard_contracts::{advisory::GenerationRequest, error::AethelgardResult};

    use super::*;
    use crate::{
        shell::{Route, Shell},
        views::RequestState,
    };

    /// A backend that blocks every call until the test releases it.
    struct GatedGenerator {
        gate: Mutex<Receiver<()>>,
        calls: Arc<AtomicUsize>,
    }

    impl TextGenerator for GatedGenerator {
        fn generate(&self, _api_key: &str, _request: &GenerationRequest) -> AethelgardResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.gate.lock().unwrap().recv();
            Ok(Some("Occupancy will peak Friday at 88%.".to_string()))
        }
    }

    fn gated_dispatcher() -> (AdvisoryDispatcher, Receiver<AdvisoryResponse>, Sender<()>, Arc<AtomicUsize>) {
        let (release, gate) = mpsc::channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = GatedGenerator {
            gate: Mutex::new(gate),
            calls: Arc::clone(&calls),
        };
        let client = AdvisoryClient::new(
            AdvisoryConfig::default().with_api_key("test-key"),
            Box::new(generator),
        );
        let (dispatcher, rx) = AdvisoryDispatcher::new(Arc::new(client));
        (dispatcher, rx, release, calls)
    }

    fn wait_for_calls(calls: &AtomicUsize, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < n {
            assert!(Instant::now() < deadline, "backend never called");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn double_trigger_while_pending_makes_one_backend_call() {
        let (dispatcher, rx, release, calls) = gated_dispatcher();
        let mut shell = Shell::new();

        // First click: ticket issued and in flight.
        let ticket = shell.trigger_current().unwrap();
        let handle = dispatcher.dispatch(ticket);
        wait_for_calls(&calls, 1);

        // Second click while the first is still blocked in the backend.
        assert!(shell.trigger_current().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        release.send(()).unwrap();
        let response = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert!(shell.apply(&response));
        assert_eq!(
            shell.dashboard.forecast_state(),
            &RequestState::Succeeded("Occupancy will peak Friday at 88%.".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completion_after_navigating_away_is_discarded() {
        let (dispatcher, rx, release, _calls) = gated_dispatcher();
        let mut shell = Shell::new();

        let handle = dispatcher.dispatch(shell.trigger_current().unwrap());
        shell.navigate(Route::Inventory);

        release.send(()).unwrap();
        let response = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert!(!shell.apply(&response));
        assert_eq!(shell.dashboard.forecast_state(), &RequestState::Idle);
    }

    #[test]
    fn degraded_client_still_answers_through_the_channel() {
        let client = AdvisoryClient::gemini(AdvisoryConfig::default()).unwrap();
        let (dispatcher, rx) = AdvisoryDispatcher::new(Arc::new(client));
        let mut shell = Shell::new();
        shell.navigate(Route::Finance);

        dispatcher.dispatch(shell.trigger_current().unwrap()).join().unwrap();
        let response = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(shell.apply(&response));
        assert_eq!(
            shell.finance.audit_state(),
            &RequestState::Failed("AI Analysis Unavailable.".to_string())
        );
    }
}
