//! Ledger transactions shown in the Finance view.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry. The stored amount is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    Billing,
    Procurement,
    Payroll,
    Operational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Cleared,
    Pending,
    Flagged,
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionCategory::Billing => "Billing",
            TransactionCategory::Procurement => "Procurement",
            TransactionCategory::Payroll => "Payroll",
            TransactionCategory::Operational => "Operational",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Cleared => "Cleared",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Flagged => "Flagged",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Unsigned magnitude; see [`Transaction::signed_amount`].
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub status: TransactionStatus,
    /// External reference: purchase order, claim, invoice, or POS batch.
    pub reference_id: String,
}

impl Transaction {
    /// Amount with the sign implied by `kind`: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Credit => self.amount,
            TransactionKind::Debit => -self.amount,
        }
    }

    /// Ledger display form, e.g. "+$4,500.00" or "-$12,500.00".
    pub fn display_amount(&self) -> String {
        let sign = match self.kind {
            TransactionKind::Credit => '+',
            TransactionKind::Debit => '-',
        };
        format!("{}${}", sign, group_thousands(self.amount))
    }

    /// Case-insensitive match against id, description, or reference.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.id.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.reference_id.to_lowercase().contains(&query)
    }
}

/// Format a non-negative amount with two decimals and comma thousands separators.
fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{}", grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(12500.0), "12,500.00");
        assert_eq!(group_thousands(850.5), "850.50");
        assert_eq!(group_thousands(1234567.891), "1,234,567.89");
        assert_eq!(group_thousands(0.0), "0.00");
    }
}
