//! Serialize view data into the free-text context the advisory client expects.

use tracing::warn;

use aethelgard_contracts::{finance::Transaction, patient::Patient};

/// Fixed historical summary sent with every occupancy forecast.
pub const OCCUPANCY_SUMMARY: &str =
    "Current avg occupancy 72%. Weekly trend rising by 5%. Flu season approaching.";

/// Identity, diagnosis, vitals, and status of one patient, one fact group per line.
pub fn patient_context(patient: &Patient) -> String {
    let mut lines = vec![format!(
        "Name: {}, Age: {}, Diagnosis: {}.",
        patient.name, patient.age, patient.diagnosis
    )];
    if let Some(v) = &patient.last_vitals {
        lines.push(format!("Vitals: BP {}, HR {}, Temp {}.", v.bp, v.hr, v.temp));
    }
    lines.push(format!("Status: {}.", patient.status));
    lines.join("\n")
}

/// The ledger as a JSON array, in the same camelCase shape the records serialize to.
pub fn ledger_context(transactions: &[Transaction]) -> String {
    serde_json::to_string(transactions).unwrap_or_else(|e| {
        warn!(error = %e, "failed to serialize ledger; sending empty list");
        "[]".to_string()
    })
}
