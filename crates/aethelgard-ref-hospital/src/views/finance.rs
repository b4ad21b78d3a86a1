//! Core finance: the ledger, its totals, the fraud audit, and ledger export.

use std::path::Path;

use tracing::info;

use aethelgard_contracts::{
    advisory::{AdvisoryKind, AdvisoryResponse},
    error::{AethelgardError, AethelgardResult},
    finance::{Transaction, TransactionKind},
};

use crate::{
    context::ledger_context,
    mock_data,
    views::request::{AdvisorySlot, AdvisoryTicket, RequestState},
};

pub struct FinanceView {
    transactions: Vec<Transaction>,
    query: String,
    audit: AdvisorySlot,
}

impl FinanceView {
    pub fn new() -> Self {
        Self {
            transactions: mock_data::transactions(),
            query: String::new(),
            audit: AdvisorySlot::default(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Ledger rows matching the current filter.
    pub fn filtered(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.matches_query(&self.query))
            .collect()
    }

    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Credits minus debits.
    pub fn net(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn audit_state(&self) -> &RequestState {
        self.audit.state()
    }

    /// "AI Fraud Audit". The whole ledger is sent, regardless of the filter.
    pub fn trigger_audit(&mut self) -> Option<AdvisoryTicket> {
        let transactions = &self.transactions;
        self.audit
            .begin(AdvisoryKind::FinancialAnomalyScan, || ledger_context(transactions))
    }

    pub fn complete(&mut self, response: &AdvisoryResponse) -> bool {
        self.audit.complete(response)
    }

    /// "Dismiss": close the audit report. Returns false while the audit is running.
    pub fn dismiss_audit(&mut self) -> bool {
        self.audit.dismiss()
    }

    /// "Export Ledger": write every entry to `path` as pretty JSON.
    pub fn export_ledger(&self, path: &Path) -> AethelgardResult<usize> {
        let json = serde_json::to_string_pretty(&self.transactions).map_err(|e| {
            AethelgardError::ExportFailed {
                reason: format!("failed to serialize ledger: {}", e),
            }
        })?;
        std::fs::write(path, json).map_err(|e| AethelgardError::ExportFailed {
            reason: format!("failed to write '{}': {}", path.display(), e),
        })?;

        info!(path = %path.display(), entries = self.transactions.len(), "ledger exported");
        Ok(self.transactions.len())
    }

    pub fn unmount(&mut self) {
        self.query.clear();
        self.audit.reset();
    }
}

impl Default for FinanceView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use aethelgard_contracts::advisory::ResponseStatus;

    use super::*;

    #[test]
    fn audit_ticket_sends_full_ledger_even_when_filtered() {
        let mut view = FinanceView::new();
        view.set_query("cafeteria");
        assert_eq!(view.filtered().len(), 1);

        let ticket = view.trigger_audit().unwrap();
        assert_eq!(ticket.kind, AdvisoryKind::FinancialAnomalyScan);
        let sent: Vec<serde_json::Value> = serde_json::from_str(&ticket.context).unwrap();
        assert_eq!(sent.len(), 5);
    }

    fn finished(ticket: &AdvisoryTicket, status: ResponseStatus, text: &str) -> AdvisoryResponse {
        AdvisoryResponse {
            request_id: ticket.request_id,
            kind: ticket.kind,
            status,
            text: text.to_string(),
        }
    }

    #[test]
    fn dismiss_clears_a_finished_report() {
        let mut view = FinanceView::new();
        let ticket = view.trigger_audit().unwrap();
        assert!(view.complete(&finished(&ticket, ResponseStatus::Generated, "- TRX-9923 duplicates TRX-9922")));

        assert!(view.dismiss_audit());
        assert_eq!(view.audit_state(), &RequestState::Idle);

        // A fallback report dismisses the same way.
        let ticket = view.trigger_audit().unwrap();
        assert!(view.complete(&finished(&ticket, ResponseStatus::Failed, "Failed to analyze transactions.")));
        assert!(view.dismiss_audit());
        assert_eq!(view.audit_state(), &RequestState::Idle);
    }

    #[test]
    fn dismiss_leaves_a_running_audit_alone() {
        let mut view = FinanceView::new();
        assert!(!view.dismiss_audit());

        let ticket = view.trigger_audit().unwrap();
        assert!(!view.dismiss_audit());
        assert!(view.audit_state().is_pending());

        // The in-flight result still lands.
        assert!(view.complete(&finished(&ticket, ResponseStatus::Generated, "No anomalies.")));
        assert_eq!(view.audit_state().text(), Some("No anomalies."));
    }

    #[test]
    fn ledger_keeps_the_duplicate_consultant_fees() {
        let view = FinanceView::new();
        let dupes: Vec<&str> = view
            .transactions()
            .iter()
            .filter(|t| t.description == "Consultant Fee - Unspecified")
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(dupes, ["TRX-9922", "TRX-9923"]);
    }

    #[test]
    fn totals_split_by_direction() {
        let view = FinanceView::new();
        assert!((view.total(TransactionKind::Credit) - 5350.50).abs() < 1e-9);
        assert!((view.total(TransactionKind::Debit) - 32498.00).abs() < 1e-9);
        assert!((view.net() - (5350.50 - 32498.00)).abs() < 1e-9);
    }

    #[test]
    fn export_writes_all_entries() {
        let view = FinanceView::new();
        let path = std::env::temp_dir().join(format!("aethelgard-ledger-{}.json", std::process::id()));

        let written = view.export_ledger(&path).unwrap();
        assert_eq!(written, 5);

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Transaction> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, view.transactions());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let view = FinanceView::new();
        let err = view
            .export_ledger(Path::new("/nonexistent-dir/ledger.json"))
            .unwrap_err();
        assert!(matches!(err, AethelgardError::ExportFailed { .. }));
    }
}
