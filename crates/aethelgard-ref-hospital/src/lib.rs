//! # aethelgard-ref-hospital
//!
//! Reference hospital for the Aethelgard ERP dashboard.
//!
//! Four views share one navigation shell:
//!
//! 1. **Executive Dashboard**: KPI cards, weekly occupancy, and an
//!    occupancy forecast.
//! 2. **Patient EHR**: patient roster, chart, and a clinical assistant.
//! 3. **Core Finance**: the ledger, an anomaly audit, and ledger export.
//! 4. **Pharmacy Inventory**: stock cards with low-stock and shortage flags.
//!
//! All data is hardcoded and fictional. Advisory actions leave the process
//! only through `aethelgard-advisory`, driven by the [`dispatch`] module.

pub mod context;
pub mod dispatch;
pub mod icon;
pub mod mock_data;
pub mod shell;
pub mod views;

pub use dispatch::AdvisoryDispatcher;
pub use shell::{Route, Shell};
