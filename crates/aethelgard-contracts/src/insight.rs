//! Notification-style wrapper around advisory text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsight {
    pub title: String,
    pub content: String,
    pub severity: InsightSeverity,
    pub timestamp: DateTime<Utc>,
}

impl AiInsight {
    /// Wrap advisory text, stamping it with the current time.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        severity: InsightSeverity,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            severity,
            timestamp: Utc::now(),
        }
    }
}
