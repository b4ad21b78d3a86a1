//! Patient records shown in the EHR view.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Admission status. Closed set; anything else fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Inpatient,
    Outpatient,
    Discharged,
    Critical,
}

impl PatientStatus {
    pub fn label(self) -> &'static str {
        match self {
            PatientStatus::Inpatient => "Inpatient",
            PatientStatus::Outpatient => "Outpatient",
            PatientStatus::Discharged => "Discharged",
            PatientStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The most recent vitals snapshot.
///
/// All three readings travel together: a patient either has a full
/// snapshot or none at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Blood pressure as charted, e.g. "140/90".
    pub bp: String,
    /// Heart rate in beats per minute.
    pub hr: u32,
    /// Body temperature in degrees Celsius.
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Medical record number, e.g. "P-1001".
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub admission_date: NaiveDate,
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_vitals: Option<Vitals>,
}

impl Patient {
    /// Case-insensitive match against name or MRN. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.id.to_lowercase().contains(&query)
    }
}
