//! Fixed prompt templates and per-kind fallback text.

use aethelgard_contracts::advisory::{AdvisoryKind, GenerationParams};

const CLINICAL_PERSONA: &str = "You are a helpful, professional medical assistant. Be concise.";

/// Build the prompt for `kind`, embedding `context` verbatim.
pub fn render_prompt(kind: AdvisoryKind, context: &str) -> String {
    match kind {
        AdvisoryKind::ClinicalSummary => format!(
            "You are an advanced Clinical Assistant AI embedded in a Hospital ERP.\n\
             Analyze the following patient context and provide a brief, professional clinical summary and 2 potential care recommendations.\n\
             Do not provide definitive medical advice, but rather decision support for the doctor.\n\
             \n\
             Patient Context:\n\
             {context}\n"
        ),
        AdvisoryKind::FinancialAnomalyScan => format!(
            "Analyze the following JSON list of financial transactions for a hospital.\n\
             Identify any transactions that look anomalous (e.g., unusually high amounts, duplicate descriptions, or vague references).\n\
             Return the response as a bulleted list of potential flags. If none, say \"No anomalies detected.\"\n\
             \n\
             Transactions:\n\
             {context}\n"
        ),
        AdvisoryKind::OccupancyForecast => format!(
            "Based on the historical occupancy summary below, predict the trend for the next 7 days.\n\
             Provide a strategic recommendation for staffing.\n\
             \n\
             Data Summary:\n\
             {context}\n"
        ),
    }
}

/// Sampling parameters for `kind`.
pub fn params_for(kind: AdvisoryKind) -> GenerationParams {
    match kind {
        AdvisoryKind::ClinicalSummary => GenerationParams {
            temperature: Some(0.2),
            system_instruction: Some(CLINICAL_PERSONA.to_string()),
        },
        AdvisoryKind::FinancialAnomalyScan => GenerationParams {
            temperature: Some(0.1),
            system_instruction: None,
        },
        AdvisoryKind::OccupancyForecast => GenerationParams::default(),
    }
}

/// Returned when no credential is configured.
pub fn unavailable_message(kind: AdvisoryKind) -> &'static str {
    match kind {
        AdvisoryKind::ClinicalSummary => "AI Service Unavailable: API Key missing.",
        AdvisoryKind::FinancialAnomalyScan => "AI Analysis Unavailable.",
        AdvisoryKind::OccupancyForecast => "Forecasting Unavailable.",
    }
}

/// Returned when the model answers without text.
pub fn empty_message(kind: AdvisoryKind) -> &'static str {
    match kind {
        AdvisoryKind::ClinicalSummary => "No insight generated.",
        AdvisoryKind::FinancialAnomalyScan => "Analysis complete.",
        AdvisoryKind::OccupancyForecast => "Forecast unavailable.",
    }
}

/// Returned when the backend call fails.
pub fn failure_message(kind: AdvisoryKind) -> &'static str {
    match kind {
        AdvisoryKind::ClinicalSummary => "Error generating insight. Please try again.",
        AdvisoryKind::FinancialAnomalyScan => "Failed to analyze transactions.",
        AdvisoryKind::OccupancyForecast => "Error generating forecast.",
    }
}
