//! # aethelgard-advisory
//!
//! The AI advisory client for the Aethelgard hospital ERP.
//!
//! This crate provides:
//! - The `TextGenerator` trait, the seam between the client and a model backend
//! - `AdvisoryClient`, which owns templates, credentials, and fallback text
//! - `GeminiGenerator`, the HTTPS backend for the Gemini `generateContent` API
//! - `AdvisoryConfig`, loaded from TOML and/or the `API_KEY` environment variable
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aethelgard_advisory::{AdvisoryClient, AdvisoryConfig};
//!
//! let client = AdvisoryClient::gemini(AdvisoryConfig::from_env())?;
//! let text = client.forecast_bed_occupancy("Current avg occupancy 72%.");
//! ```

pub mod client;
pub mod config;
pub mod gemini;
pub mod template;
pub mod traits;

pub use client::AdvisoryClient;
pub use config::AdvisoryConfig;
pub use gemini::GeminiGenerator;
pub use traits::TextGenerator;
