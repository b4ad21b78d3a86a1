//! Error types for the Aethelgard workspace.
//!
//! The advisory client absorbs every backend failure into fixed fallback
//! text, so these errors surface only at the edges: loading configuration,
//! talking to the model endpoint, record lookups, and exporting the ledger.

use thiserror::Error;

/// The unified error type for the Aethelgard crates.
#[derive(Debug, Error)]
pub enum AethelgardError {
    /// A configuration file is missing, unreadable, or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// The model endpoint answered with a non-success status.
    #[error("model endpoint returned status {status}: {body}")]
    ModelError { status: u16, body: String },

    /// The model endpoint answered 2xx but the body could not be decoded.
    #[error("malformed model response: {reason}")]
    MalformedResponse { reason: String },

    /// A lookup by identifier found no matching record.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    /// Writing an exported dataset to disk failed.
    #[error("export failed: {reason}")]
    ExportFailed { reason: String },
}

/// Convenience alias used throughout the Aethelgard crates.
pub type AethelgardResult<T> = Result<T, AethelgardError>;
