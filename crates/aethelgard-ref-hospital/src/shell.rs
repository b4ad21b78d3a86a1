//! Navigation shell: the route table, sidebar entries, and view ownership.
//!
//! The shell keeps one instance of every view and routes advisory
//! completions to the view that asked for them. Leaving a route unmounts its
//! view, which resets that view's transient state and orphans any request
//! it still has in flight.

use std::fmt;

use tracing::debug;

use aethelgard_contracts::{
    advisory::{AdvisoryKind, AdvisoryResponse},
    insight::AiInsight,
};

use crate::{
    icon::Icon,
    views::{AdvisoryTicket, DashboardView, EhrView, FinanceView, InventoryView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Ehr,
    Finance,
    Inventory,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Dashboard, Route::Ehr, Route::Finance, Route::Inventory];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Ehr => "/ehr",
            Route::Finance => "/finance",
            Route::Inventory => "/inventory",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Executive Dashboard",
            Route::Ehr => "Patient EHR",
            Route::Finance => "Core Finance",
            Route::Inventory => "Pharmacy Inventory",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            Route::Dashboard => Icon::LayoutDashboard,
            Route::Ehr => Icon::Stethoscope,
            Route::Finance => Icon::FileText,
            Route::Inventory => Icon::Pill,
        }
    }

    /// Map a path or fragment (`"/ehr"`, `"#/ehr"`) to a route.
    ///
    /// Unknown paths redirect to the dashboard.
    pub fn resolve(path: &str) -> Route {
        let path = path.trim().trim_start_matches('#');
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .unwrap_or_default()
    }

    /// The next route in sidebar order, wrapping around.
    pub fn next(self) -> Route {
        let idx = Route::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Route::ALL[(idx + 1) % Route::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One sidebar entry. Entries without a route are shown but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: Icon,
    pub route: Option<Route>,
}

/// Main navigation followed by the "System" section.
pub fn sidebar_items() -> (Vec<NavItem>, Vec<NavItem>) {
    let main = Route::ALL
        .into_iter()
        .map(|r| NavItem {
            label: r.label(),
            icon: r.icon(),
            route: Some(r),
        })
        .collect();
    let system = vec![
        NavItem {
            label: "Staff Management",
            icon: Icon::Users,
            route: None,
        },
        NavItem {
            label: "Configuration",
            icon: Icon::Settings,
            route: None,
        },
    ];
    (main, system)
}

/// Notifications kept in the header; older ones are dropped first.
pub const MAX_NOTIFICATIONS: usize = 20;

pub struct Shell {
    route: Route,
    sidebar_open: bool,
    pub dashboard: DashboardView,
    pub ehr: EhrView,
    pub finance: FinanceView,
    pub inventory: InventoryView,
    notifications: Vec<AiInsight>,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            route: Route::Dashboard,
            sidebar_open: false,
            dashboard: DashboardView::new(),
            ehr: EhrView::new(),
            finance: FinanceView::new(),
            inventory: InventoryView::new(),
            notifications: Vec::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Switch to `route`, unmounting the view being left.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!(from = %self.route, to = %route, "navigating");
        self.unmount(self.route);
        self.route = route;
    }

    /// Navigate by path or fragment; unknown paths land on the dashboard.
    pub fn navigate_path(&mut self, path: &str) -> Route {
        let route = Route::resolve(path);
        self.navigate(route);
        route
    }

    fn unmount(&mut self, route: Route) {
        match route {
            Route::Dashboard => self.dashboard.unmount(),
            Route::Ehr => self.ehr.unmount(),
            Route::Finance => self.finance.unmount(),
            Route::Inventory => {}
        }
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Fire the current view's advisory action, if it has one and it is idle.
    pub fn trigger_current(&mut self) -> Option<AdvisoryTicket> {
        match self.route {
            Route::Dashboard => self.dashboard.trigger_forecast(),
            Route::Ehr => self.ehr.trigger_analysis(),
            Route::Finance => self.finance.trigger_audit(),
            Route::Inventory => None,
        }
    }

    /// Hand a finished request to the view that owns its kind.
    ///
    /// Returns whether a view accepted it; stale completions are dropped.
    pub fn apply(&mut self, response: &AdvisoryResponse) -> bool {
        match response.kind {
            AdvisoryKind::OccupancyForecast => match self.dashboard.complete(response) {
                Some(insight) => {
                    self.notifications.push(insight);
                    if self.notifications.len() > MAX_NOTIFICATIONS {
                        let excess = self.notifications.len() - MAX_NOTIFICATIONS;
                        self.notifications.drain(..excess);
                    }
                    true
                }
                None => false,
            },
            AdvisoryKind::ClinicalSummary => self.ehr.complete(response),
            AdvisoryKind::FinancialAnomalyScan => self.finance.complete(response),
        }
    }

    /// The most recent forecast notifications, oldest first.
    pub fn notifications(&self) -> &[AiInsight] {
        &self.notifications
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use aethelgard_contracts::advisory::ResponseStatus;

    use super::*;
    use crate::views::RequestState;

    fn generated(ticket: &AdvisoryTicket, text: &str) -> AdvisoryResponse {
        AdvisoryResponse {
            request_id: ticket.request_id,
            kind: ticket.kind,
            status: ResponseStatus::Generated,
            text: text.to_string(),
        }
    }

    // ── Route resolution ─────────────────────────────────────────────────────

    #[test]
    fn resolve_known_paths_and_fragments() {
        assert_eq!(Route::resolve("/"), Route::Dashboard);
        assert_eq!(Route::resolve("/ehr"), Route::Ehr);
        assert_eq!(Route::resolve("#/finance"), Route::Finance);
        assert_eq!(Route::resolve("#/inventory/"), Route::Inventory);
        assert_eq!(Route::resolve("#"), Route::Dashboard);
    }

    #[test]
    fn unknown_paths_redirect_to_dashboard() {
        assert_eq!(Route::resolve("/staff"), Route::Dashboard);
        assert_eq!(Route::resolve("/settings"), Route::Dashboard);
        assert_eq!(Route::resolve("nonsense"), Route::Dashboard);
    }

    #[test]
    fn next_wraps_in_sidebar_order() {
        assert_eq!(Route::Dashboard.next(), Route::Ehr);
        assert_eq!(Route::Inventory.next(), Route::Dashboard);
    }

    #[test]
    fn system_entries_have_no_route() {
        let (main, system) = sidebar_items();
        assert_eq!(main.len(), 4);
        assert!(main.iter().all(|i| i.route.is_some()));
        assert!(system.iter().all(|i| i.route.is_none()));
    }

    // ── Navigation & mounting ────────────────────────────────────────────────

    #[test]
    fn leaving_a_view_discards_its_pending_request() {
        let mut shell = Shell::new();
        let ticket = shell.trigger_current().unwrap();
        assert!(shell.dashboard.forecast_state().is_pending());

        shell.navigate(Route::Finance);
        assert!(!shell.apply(&generated(&ticket, "late forecast")));
        assert_eq!(shell.dashboard.forecast_state(), &RequestState::Idle);
        assert!(shell.notifications().is_empty());
    }

    #[test]
    fn renavigating_to_same_route_keeps_state() {
        let mut shell = Shell::new();
        shell.navigate(Route::Ehr);
        shell.ehr.select("P-1001");
        shell.navigate_path("#/ehr");
        assert!(shell.ehr.selected().is_some());
    }

    #[test]
    fn completions_route_by_kind() {
        let mut shell = Shell::new();
        let forecast = shell.trigger_current().unwrap();
        assert!(shell.apply(&generated(&forecast, "Rising.")));
        assert_eq!(shell.notifications().len(), 1);
        assert_eq!(shell.notifications()[0].content, "Rising.");

        shell.navigate(Route::Finance);
        let audit = shell.trigger_current().unwrap();
        assert!(shell.apply(&generated(&audit, "- TRX-9923 duplicates TRX-9922")));
        assert_eq!(
            shell.finance.audit_state().text(),
            Some("- TRX-9923 duplicates TRX-9922")
        );
    }

    #[test]
    fn notifications_keep_only_the_most_recent() {
        let mut shell = Shell::new();
        for i in 0..MAX_NOTIFICATIONS + 5 {
            let ticket = shell.trigger_current().unwrap();
            assert!(shell.apply(&generated(&ticket, &format!("forecast {}", i))));
        }

        let notes = shell.notifications();
        assert_eq!(notes.len(), MAX_NOTIFICATIONS);
        assert_eq!(notes[0].content, "forecast 5");
        assert_eq!(
            notes[MAX_NOTIFICATIONS - 1].content,
            format!("forecast {}", MAX_NOTIFICATIONS + 4)
        );
    }

    #[test]
    fn inventory_has_no_advisory_action() {
        let mut shell = Shell::new();
        shell.navigate(Route::Inventory);
        assert!(shell.trigger_current().is_none());
    }

    #[test]
    fn sidebar_toggle_is_a_plain_flag() {
        let mut shell = Shell::new();
        assert!(!shell.sidebar_open());
        shell.toggle_sidebar();
        assert!(shell.sidebar_open());
        shell.close_sidebar();
        assert!(!shell.sidebar_open());
    }
}
