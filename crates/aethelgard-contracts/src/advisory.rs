//! Advisory request and response shapes.
//!
//! These types describe one round trip to the text-generation backend:
//! which template was used, what was sent, and how the call ended. They
//! carry no behavior beyond identity and labelling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three fixed advisory templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryKind {
    /// Clinical summary and care recommendations for one patient.
    ClinicalSummary,
    /// Anomaly scan over a JSON list of ledger transactions.
    FinancialAnomalyScan,
    /// Seven-day bed occupancy forecast with a staffing recommendation.
    OccupancyForecast,
}

impl AdvisoryKind {
    pub const ALL: [AdvisoryKind; 3] = [
        AdvisoryKind::ClinicalSummary,
        AdvisoryKind::FinancialAnomalyScan,
        AdvisoryKind::OccupancyForecast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AdvisoryKind::ClinicalSummary => "clinical-summary",
            AdvisoryKind::FinancialAnomalyScan => "financial-anomaly-scan",
            AdvisoryKind::OccupancyForecast => "occupancy-forecast",
        }
    }
}

impl fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier for a single advisory invocation.
///
/// Appears in every log line for the call and lets a view recognise the
/// completion it is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Lower values bias the model toward deterministic output.
    pub temperature: Option<f32>,
    /// Persona instruction applied at the system level.
    pub system_instruction: Option<String>,
}

/// A fully built request, ready for a `TextGenerator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub request_id: RequestId,
    pub kind: AdvisoryKind,
    /// Target model identifier, e.g. "gemini-2.5-flash".
    pub model: String,
    /// Template text with the caller's context embedded verbatim.
    pub prompt: String,
    pub params: GenerationParams,
}

/// How an advisory invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    /// The model produced text; it is returned verbatim.
    Generated,
    /// No credential configured; the backend was never called.
    Unavailable,
    /// The backend answered without any text.
    Empty,
    /// The backend call failed.
    Failed,
}

/// The text handed back to a view, plus how it came to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    pub request_id: RequestId,
    pub kind: AdvisoryKind,
    pub status: ResponseStatus,
    /// Model output or the kind's fixed fallback message.
    pub text: String,
}

impl AdvisoryResponse {
    pub fn is_generated(&self) -> bool {
        self.status == ResponseStatus::Generated
    }
}
