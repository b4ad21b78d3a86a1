//! The advisory client: one prompt in, one string out.
//!
//! Every invocation follows the same path:
//!
//!   Credential → Template → [TextGenerator::generate] → Normalize
//!
//! The backend is never called without a credential. Whatever happens past
//! that point, the caller receives text: the model's output verbatim, or the
//! kind's fixed fallback message. No error crosses this boundary.

use tracing::{debug, error, info, warn};

use aethelgard_contracts::{
    advisory::{AdvisoryKind, AdvisoryResponse, GenerationRequest, RequestId, ResponseStatus},
    error::AethelgardResult,
};

use crate::{
    config::AdvisoryConfig,
    gemini::GeminiGenerator,
    template::{empty_message, failure_message, params_for, render_prompt, unavailable_message},
    traits::TextGenerator,
};

/// Issues one-shot advisory requests against a text-generation backend.
///
/// Holds no per-request state, so a single client can be shared across
/// worker threads behind an `Arc`.
pub struct AdvisoryClient {
    config: AdvisoryConfig,
    generator: Box<dyn TextGenerator>,
}

impl AdvisoryClient {
    /// Create a client over an explicit backend.
    pub fn new(config: AdvisoryConfig, generator: Box<dyn TextGenerator>) -> Self {
        Self { config, generator }
    }

    /// Create a client talking to the Gemini endpoint named in `config`.
    pub fn gemini(config: AdvisoryConfig) -> AethelgardResult<Self> {
        let generator = GeminiGenerator::from_config(&config)?;
        Ok(Self::new(config, Box::new(generator)))
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Return advisory text for `context` using the `kind` template.
    pub fn advise(&self, kind: AdvisoryKind, context: &str) -> String {
        self.advise_detailed(kind, context).text
    }

    /// Like [`advise`](Self::advise) under a fresh request id, reporting how the call ended.
    pub fn advise_detailed(&self, kind: AdvisoryKind, context: &str) -> AdvisoryResponse {
        self.advise_with_id(RequestId::new(), kind, context)
    }

    /// Run one advisory invocation under a caller-chosen request id.
    ///
    /// # Outcomes
    ///
    /// - no credential      → `Unavailable`, backend untouched
    /// - text returned      → `Generated`, text verbatim
    /// - no/blank text      → `Empty`, fixed "no output" message
    /// - backend error      → `Failed`, fixed failure message (error logged)
    pub fn advise_with_id(
        &self,
        request_id: RequestId,
        kind: AdvisoryKind,
        context: &str,
    ) -> AdvisoryResponse {
        let respond = |status: ResponseStatus, text: String| AdvisoryResponse {
            request_id,
            kind,
            status,
            text,
        };

        // ── Credential ───────────────────────────────────────────────────────
        let Some(api_key) = self.config.credential() else {
            warn!(
                request_id = %request_id,
                kind = %kind,
                "model credential missing; advisory running in degraded mode"
            );
            return respond(ResponseStatus::Unavailable, unavailable_message(kind).to_string());
        };

        // ── Template ─────────────────────────────────────────────────────────
        let request = GenerationRequest {
            request_id,
            kind,
            model: self.config.model.clone(),
            prompt: render_prompt(kind, context),
            params: params_for(kind),
        };

        debug!(
            request_id = %request_id,
            kind = %kind,
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "advisory request built"
        );

        // ── Generate & normalize ─────────────────────────────────────────────
        match self.generator.generate(api_key, &request) {
            Ok(Some(text)) if !text.trim().is_empty() => {
                info!(request_id = %request_id, kind = %kind, "advisory generated");
                respond(ResponseStatus::Generated, text)
            }
            Ok(_) => {
                warn!(request_id = %request_id, kind = %kind, "model returned no text");
                respond(ResponseStatus::Empty, empty_message(kind).to_string())
            }
            Err(e) => {
                error!(
                    request_id = %request_id,
                    kind = %kind,
                    error = %e,
                    "advisory request failed"
                );
                respond(ResponseStatus::Failed, failure_message(kind).to_string())
            }
        }
    }

    /// Clinical summary and two care recommendations for a patient context.
    pub fn generate_clinical_insight(&self, patient_context: &str) -> String {
        self.advise(AdvisoryKind::ClinicalSummary, patient_context)
    }

    /// Bulleted anomaly flags for a JSON list of transactions.
    pub fn detect_financial_anomalies(&self, transactions_json: &str) -> String {
        self.advise(AdvisoryKind::FinancialAnomalyScan, transactions_json)
    }

    /// Seven-day occupancy trend and staffing recommendation.
    pub fn forecast_bed_occupancy(&self, historical_summary: &str) -> String {
        self.advise(AdvisoryKind::OccupancyForecast, historical_summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
