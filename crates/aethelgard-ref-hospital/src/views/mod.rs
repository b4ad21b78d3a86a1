//! The four dashboard views.
//!
//! Each view owns its mock dataset and, where it has an advisory action,
//! an `AdvisorySlot`. Views never talk to the advisory client directly:
//! triggering an action yields an `AdvisoryTicket` for the dispatcher, and
//! the finished `AdvisoryResponse` is handed back through `complete`.

pub mod dashboard;
pub mod ehr;
pub mod finance;
pub mod inventory;
pub mod request;

pub use dashboard::DashboardView;
pub use ehr::EhrView;
pub use finance::FinanceView;
pub use inventory::InventoryView;
pub use request::{AdvisorySlot, AdvisoryTicket, RequestState};
