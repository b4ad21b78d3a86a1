//! # aethelgard-contracts
//!
//! Shared records, advisory shapes, and error types for the Aethelgard
//! hospital ERP.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate beyond derived facts on the records themselves (signed
//! amounts, stock flags, search matching).

pub mod advisory;
pub mod error;
pub mod finance;
pub mod insight;
pub mod inventory;
pub mod patient;
