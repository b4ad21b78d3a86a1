//! Patient EHR: searchable patient list, a selected chart, and the clinical
//! assistant.
//!
//! Selection is last-write-wins. Changing or clearing the selection resets
//! the assistant, so an analysis still in flight for the previous patient is
//! dropped when it lands rather than shown against the wrong chart.

use aethelgard_contracts::{
    advisory::{AdvisoryKind, AdvisoryResponse},
    patient::Patient,
};

use crate::{
    context::patient_context,
    mock_data,
    views::request::{AdvisorySlot, AdvisoryTicket, RequestState},
};

pub struct EhrView {
    patients: Vec<Patient>,
    query: String,
    /// Highlighted row within the filtered list.
    cursor: usize,
    /// MRN of the open chart.
    selected: Option<String>,
    analysis: AdvisorySlot,
}

impl EhrView {
    pub fn new() -> Self {
        Self {
            patients: mock_data::patients(),
            query: String::new(),
            cursor: 0,
            selected: None,
            analysis: AdvisorySlot::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Patients matching the current search, in roster order.
    pub fn filtered(&self) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.matches_query(&self.query))
            .collect()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the highlight by `delta` rows, clamped to the filtered list.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.filtered().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    /// Open the chart under the cursor.
    pub fn select_at_cursor(&mut self) -> bool {
        let id = self.filtered().get(self.cursor).map(|p| p.id.clone());
        match id {
            Some(id) => self.select(&id),
            None => false,
        }
    }

    /// Open the chart for `patient_id`. Returns false for an unknown MRN.
    pub fn select(&mut self, patient_id: &str) -> bool {
        if !self.patients.iter().any(|p| p.id == patient_id) {
            return false;
        }
        self.selected = Some(patient_id.to_string());
        self.analysis.reset();
        true
    }

    /// "Back": close the chart.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.analysis.reset();
    }

    pub fn selected(&self) -> Option<&Patient> {
        let id = self.selected.as_deref()?;
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn analysis_state(&self) -> &RequestState {
        self.analysis.state()
    }

    /// "Analyze Patient Context". No ticket without an open chart or while in flight.
    pub fn trigger_analysis(&mut self) -> Option<AdvisoryTicket> {
        let context = patient_context(self.selected()?);
        self.analysis
            .begin(AdvisoryKind::ClinicalSummary, move || context)
    }

    pub fn complete(&mut self, response: &AdvisoryResponse) -> bool {
        self.analysis.complete(response)
    }

    pub fn unmount(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.selected = None;
        self.analysis.reset();
    }
}

impl Default for EhrView {
    fn default() -> Self {
        Self::new()
    }
}
