//! Pharmacy and supply stock records shown in the Inventory view.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryCategory {
    Pharmaceutical,
    Surgical,
    Equipment,
}

impl fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InventoryCategory::Pharmaceutical => "Pharmaceutical",
            InventoryCategory::Surgical => "Surgical",
            InventoryCategory::Equipment => "Equipment",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub stock_level: u32,
    /// Unit label, e.g. "Capsules", "Box".
    pub unit: String,
    /// Safety stock. Below this the item is flagged.
    pub min_threshold: u32,
    /// `None` for non-perishables; serialized as "N/A".
    #[serde(with = "expiry")]
    pub expiry_date: Option<NaiveDate>,
    pub category: InventoryCategory,
    /// Demand forecast attached by the model, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_demand: Option<u32>,
}

impl InventoryItem {
    /// Stock has fallen below the safety threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_level < self.min_threshold
    }

    /// Forecast demand exceeds what is on hand.
    pub fn is_predicted_shortage(&self) -> bool {
        self.predicted_demand
            .map(|demand| demand > self.stock_level)
            .unwrap_or(false)
    }

    /// Alert text for the stock card, if the item needs attention.
    ///
    /// Low stock takes precedence over a predicted shortage.
    pub fn alert(&self) -> Option<&'static str> {
        if self.is_low_stock() {
            Some("Below safety threshold.")
        } else if self.is_predicted_shortage() {
            Some("AI predicts upcoming shortage based on disease trends.")
        } else {
            None
        }
    }

    pub fn expiry_label(&self) -> String {
        self.expiry_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Serde adapter mapping `None` to and from the literal "N/A".
mod expiry {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => s.serialize_str("N/A"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw == "N/A" {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
