//! Advisory client configuration.
//!
//! `AdvisoryConfig` is built explicitly and handed to the client's
//! constructor; the client never reads the process environment itself.
//! Loaders cover the usual sources: a TOML document, a file on disk, and
//! the `API_KEY` environment variable.
//!
//! Example TOML (every key optional):
//! ```toml
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! api_key = "..."
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use aethelgard_contracts::error::{AethelgardError, AethelgardResult};

/// Environment variable holding the model-access credential.
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Model-access credential. `None` puts the client in degraded mode.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Target model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API, without a trailing slash.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

impl AdvisoryConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `AethelgardError::ConfigError` if the TOML is malformed or
    /// carries keys of the wrong type.
    pub fn from_toml_str(s: &str) -> AethelgardResult<Self> {
        let config: AdvisoryConfig = toml::from_str(s).map_err(|e| AethelgardError::ConfigError {
            reason: format!("failed to parse advisory TOML: {}", e),
        })?;
        Ok(config.normalized())
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> AethelgardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AethelgardError::ConfigError {
            reason: format!("failed to read advisory config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Defaults plus whatever credential `API_KEY` holds.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Replace the credential with `API_KEY` when that variable is set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_key_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Layer an externally supplied credential over this one. Absent or
    /// blank values leave the current credential in place.
    fn with_key_override(self, key: Option<String>) -> Self {
        match key {
            Some(key) if !key.trim().is_empty() => {
                debug!(var = API_KEY_ENV, "credential taken from environment");
                self.with_api_key(key)
            }
            _ => self,
        }
    }

    /// Set the credential. Blank keys count as missing.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self.normalized()
    }

    /// The credential, if one is usable.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn normalized(mut self) -> Self {
        if self.api_key.as_deref().map(str::trim).map_or(false, str::is_empty) {
            self.api_key = None;
        }
        while self.endpoint.ends_with('/') {
            self.endpoint.pop();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = AdvisoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, AdvisoryConfig::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.credential().is_none());
    }

    #[test]
    fn toml_overrides_model_and_trims_endpoint() {
        let config = AdvisoryConfig::from_toml_str(
            r#"
            model = "gemini-2.0-pro"
            endpoint = "http://localhost:8080/v1beta/"
            api_key = "k-123"
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.endpoint, "http://localhost:8080/v1beta");
        assert_eq!(config.credential(), Some("k-123"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AdvisoryConfig::default().with_api_key("   ");
        assert!(config.credential().is_none());

        let from_toml = AdvisoryConfig::from_toml_str(r#"api_key = """#).unwrap();
        assert!(from_toml.credential().is_none());
    }

    #[test]
    fn blank_env_credential_keeps_file_key() {
        let config = AdvisoryConfig::from_toml_str(r#"api_key = "file-key""#).unwrap();

        let blank = config.clone().with_key_override(Some(String::new()));
        assert_eq!(blank.credential(), Some("file-key"));

        let spaces = config.clone().with_key_override(Some("  ".to_string()));
        assert_eq!(spaces.credential(), Some("file-key"));

        let unset = config.clone().with_key_override(None);
        assert_eq!(unset.credential(), Some("file-key"));
    }

    #[test]
    fn env_credential_replaces_file_key() {
        let config = AdvisoryConfig::from_toml_str(r#"api_key = "file-key""#)
            .unwrap()
            .with_key_override(Some("env-key".to_string()));
        assert_eq!(config.credential(), Some("env-key"));

        let fresh = AdvisoryConfig::default().with_key_override(Some("env-key".to_string()));
        assert_eq!(fresh.credential(), Some("env-key"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AdvisoryConfig::from_toml_str("model = 42").unwrap_err();
        assert!(matches!(err, AethelgardError::ConfigError { .. }));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AdvisoryConfig::from_file(Path::new("/nonexistent/advisory.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read advisory config"));
    }
}
