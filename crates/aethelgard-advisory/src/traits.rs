//! The transport seam between the advisory client and a model backend.
//!
//! The client owns templates, credentials, and fallback handling. A
//! `TextGenerator` only moves one request to a model and back. Swapping the
//! implementation (Gemini over HTTPS, a canned echo in tests) never changes
//! what callers of the client observe.

use aethelgard_contracts::{advisory::GenerationRequest, error::AethelgardResult};

/// A backend that turns a fully built prompt into model text.
pub trait TextGenerator: Send + Sync {
    /// Send `request` to the model, authenticated with `api_key`.
    ///
    /// Returns `Ok(Some(text))` when the model produced output, `Ok(None)`
    /// when it answered without any text, and `Err` for every transport or
    /// model failure. Called exactly once per advisory invocation; the
    /// client never retries.
    fn generate(&self, api_key: &str, request: &GenerationRequest) -> AethelgardResult<Option<String>>;
}
