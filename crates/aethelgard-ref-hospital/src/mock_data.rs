//! Simulated hospital data for the Aethelgard dashboard.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. Each function builds a fresh copy of the same literals, standing
//! in for the clinical, finance, and pharmacy databases of a real deployment.

use chrono::NaiveDate;

use aethelgard_contracts::{
    finance::{Transaction, TransactionCategory, TransactionKind, TransactionStatus},
    inventory::{InventoryCategory, InventoryItem},
    patient::{Gender, Patient, PatientStatus, Vitals},
};

use crate::icon::Icon;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

// ── Executive dashboard (mock) ────────────────────────────────────────────────

/// One headline KPI on the executive dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub sub: &'static str,
    pub icon: Icon,
    /// Percentage change against the previous period. Zero renders no badge.
    pub trend: i32,
}

/// Daily bed occupancy and active staff, one point per weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyPoint {
    pub day: &'static str,
    /// Occupied beds, percent.
    pub occupancy: u64,
    pub staff: u64,
}

pub fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Patients",
            value: "1,248",
            sub: "142 Admitted Today",
            icon: Icon::Users,
            trend: 12,
        },
        StatCard {
            title: "Revenue (MTD)",
            value: "$4.2M",
            sub: "Pending Claims: $850k",
            icon: Icon::DollarSign,
            trend: 8,
        },
        StatCard {
            title: "Bed Occupancy",
            value: "78%",
            sub: "Critical Care: 92%",
            icon: Icon::Activity,
            trend: -2,
        },
        StatCard {
            title: "Staff Active",
            value: "342",
            sub: "Nurse:Patient Ratio 1:4",
            icon: Icon::TrendingUp,
            trend: 0,
        },
    ]
}

pub fn weekly_occupancy() -> Vec<OccupancyPoint> {
    [
        ("Mon", 65, 40),
        ("Tue", 68, 42),
        ("Wed", 75, 45),
        ("Thu", 82, 48),
        ("Fri", 85, 50),
        ("Sat", 70, 40),
        ("Sun", 60, 35),
    ]
    .into_iter()
    .map(|(day, occupancy, staff)| OccupancyPoint { day, occupancy, staff })
    .collect()
}

// ── Patient records (mock) ────────────────────────────────────────────────────

pub fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "P-1001".to_string(),
            name: "Eleanor Rigby".to_string(),
            age: 72,
            gender: Gender::Female,
            status: PatientStatus::Inpatient,
            room_number: Some("ICU-04".to_string()),
            admission_date: ymd(2023, 10, 24),
            diagnosis: "Acute Congestive Heart Failure".to_string(),
            last_vitals: Some(Vitals {
                bp: "140/90".to_string(),
                hr: 88,
                temp: 37.1,
            }),
        },
        Patient {
            id: "P-1002".to_string(),
            name: "Father McKenzie".to_string(),
            age: 65,
            gender: Gender::Male,
            status: PatientStatus::Inpatient,
            room_number: Some("WD-102".to_string()),
            admission_date: ymd(2023, 10, 25),
            diagnosis: "Pneumonia (Viral)".to_string(),
            last_vitals: Some(Vitals {
                bp: "120/80".to_string(),
                hr: 76,
                temp: 38.5,
            }),
        },
        Patient {
            id: "P-1003".to_string(),
            name: "Desmond Jones".to_string(),
            age: 45,
            gender: Gender::Male,
            status: PatientStatus::Outpatient,
            room_number: None,
            admission_date: ymd(2023, 10, 26),
            diagnosis: "Type 2 Diabetes Checkup".to_string(),
            last_vitals: Some(Vitals {
                bp: "130/85".to_string(),
                hr: 72,
                temp: 36.6,
            }),
        },
    ]
}

/// Free-text admission notes shown beside the vitals panel.
pub fn clinical_notes() -> [&'static str; 2] {
    [
        "Patient presenting with shortness of breath and fatigue. History of hypertension.",
        "Labs ordered: CBC, BMP, BNP. Echocardiogram scheduled for tomorrow morning.",
    ]
}

// ── Ledger (mock) ─────────────────────────────────────────────────────────────

/// The five-entry ledger.
///
/// `TRX-9922` and `TRX-9923` are deliberate duplicates (same description,
/// amount, and vague reference) so the anomaly scan has something to find.
pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "TRX-9920".to_string(),
            date: ymd(2024, 3, 10),
            description: "Pharmaceutical Supply Inc - Invoice #442".to_string(),
            amount: 12500.00,
            kind: TransactionKind::Debit,
            category: TransactionCategory::Procurement,
            status: TransactionStatus::Pending,
            reference_id: "PO-5512".to_string(),
        },
        Transaction {
            id: "TRX-9921".to_string(),
            date: ymd(2024, 3, 10),
            description: "Insurance Claim Payout - Aetna".to_string(),
            amount: 4500.00,
            kind: TransactionKind::Credit,
            category: TransactionCategory::Billing,
            status: TransactionStatus::Cleared,
            reference_id: "CLM-1102".to_string(),
        },
        Transaction {
            id: "TRX-9922".to_string(),
            date: ymd(2024, 3, 11),
            description: "Consultant Fee - Unspecified".to_string(),
            amount: 9999.00,
            kind: TransactionKind::Debit,
            category: TransactionCategory::Operational,
            status: TransactionStatus::Pending,
            reference_id: "INV-000".to_string(),
        },
        Transaction {
            id: "TRX-9923".to_string(),
            date: ymd(2024, 3, 11),
            description: "Consultant Fee - Unspecified".to_string(),
            amount: 9999.00,
            kind: TransactionKind::Debit,
            category: TransactionCategory::Operational,
            status: TransactionStatus::Pending,
            reference_id: "INV-000".to_string(),
        },
        Transaction {
            id: "TRX-9924".to_string(),
            date: ymd(2024, 3, 12),
            description: "Cafeteria Revenue".to_string(),
            amount: 850.50,
            kind: TransactionKind::Credit,
            category: TransactionCategory::Operational,
            status: TransactionStatus::Cleared,
            reference_id: "POS-Daily".to_string(),
        },
    ]
}

// ── Pharmacy inventory (mock) ─────────────────────────────────────────────────

pub fn inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: "INV-001".to_string(),
            name: "Amoxicillin 500mg".to_string(),
            sku: "PH-AMX-500".to_string(),
            stock_level: 450,
            unit: "Capsules".to_string(),
            min_threshold: 400,
            expiry_date: Some(ymd(2025, 12, 1)),
            category: InventoryCategory::Pharmaceutical,
            predicted_demand: Some(800),
        },
        InventoryItem {
            id: "INV-002".to_string(),
            name: "Metformin 850mg".to_string(),
            sku: "PH-MET-850".to_string(),
            stock_level: 1200,
            unit: "Tabs".to_string(),
            min_threshold: 200,
            expiry_date: Some(ymd(2024, 8, 15)),
            category: InventoryCategory::Pharmaceutical,
            predicted_demand: Some(1250),
        },
        InventoryItem {
            id: "INV-003".to_string(),
            name: "Surgical Gloves (L)".to_string(),
            sku: "EQ-GLV-L".to_string(),
            stock_level: 50,
            unit: "Box".to_string(),
            min_threshold: 100,
            expiry_date: None,
            category: InventoryCategory::Surgical,
            predicted_demand: Some(120),
        },
    ]
}
