//! Executive dashboard: headline KPIs, the weekly occupancy series, and the
//! occupancy forecast.

use aethelgard_contracts::{
    advisory::{AdvisoryKind, AdvisoryResponse},
    insight::{AiInsight, InsightSeverity},
};

use crate::{
    context::OCCUPANCY_SUMMARY,
    mock_data::{self, OccupancyPoint, StatCard},
    views::request::{AdvisorySlot, AdvisoryTicket, RequestState},
};

pub struct DashboardView {
    cards: Vec<StatCard>,
    occupancy: Vec<OccupancyPoint>,
    forecast: AdvisorySlot,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            cards: mock_data::stat_cards(),
            occupancy: mock_data::weekly_occupancy(),
            forecast: AdvisorySlot::default(),
        }
    }

    pub fn stat_cards(&self) -> &[StatCard] {
        &self.cards
    }

    pub fn occupancy(&self) -> &[OccupancyPoint] {
        &self.occupancy
    }

    pub fn forecast_state(&self) -> &RequestState {
        self.forecast.state()
    }

    /// "Generate AI Forecast". No ticket while a forecast is in flight.
    pub fn trigger_forecast(&mut self) -> Option<AdvisoryTicket> {
        self.forecast
            .begin(AdvisoryKind::OccupancyForecast, || OCCUPANCY_SUMMARY.to_string())
    }

    /// Apply a forecast completion, returning a notification when it was accepted.
    pub fn complete(&mut self, response: &AdvisoryResponse) -> Option<AiInsight> {
        if !self.forecast.complete(response) {
            return None;
        }
        let severity = if response.is_generated() {
            InsightSeverity::Medium
        } else {
            InsightSeverity::Low
        };
        Some(AiInsight::new("Occupancy Forecast", response.text.clone(), severity))
    }

    pub fn unmount(&mut self) {
        self.forecast.reset();
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use aethelgard_contracts::advisory::ResponseStatus;

    use super::*;

    #[test]
    fn forecast_ticket_carries_fixed_summary() {
        let mut view = DashboardView::new();
        let ticket = view.trigger_forecast().unwrap();
        assert_eq!(ticket.kind, AdvisoryKind::OccupancyForecast);
        assert_eq!(ticket.context, OCCUPANCY_SUMMARY);
    }

    #[test]
    fn accepted_forecast_becomes_an_insight() {
        let mut view = DashboardView::new();
        let ticket = view.trigger_forecast().unwrap();
        let insight = view
            .complete(&AdvisoryResponse {
                request_id: ticket.request_id,
                kind: ticket.kind,
                status: ResponseStatus::Generated,
                text: "Expect 88% by Friday; add two night nurses.".to_string(),
            })
            .unwrap();

        assert_eq!(insight.severity, InsightSeverity::Medium);
        assert_eq!(insight.content, "Expect 88% by Friday; add two night nurses.");
        assert_eq!(
            view.forecast_state().text(),
            Some("Expect 88% by Friday; add two night nurses.")
        );
    }

    #[test]
    fn weekly_series_runs_monday_to_sunday() {
        let view = DashboardView::new();
        let days: Vec<&str> = view.occupancy().iter().map(|p| p.day).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(view.stat_cards().len(), 4);
    }
}
