//! Ledger entry domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Kind of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Posted charge (positive amount)
    Charge,
    /// Payment received (negative amount)
    Payment,
    /// Correction or zero-amount audit record
    Adjustment,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "charge" => Some(Self::Charge),
            "payment" => Some(Self::Payment),
            "adjustment" => Some(Self::Adjustment),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only billing record for a reservation.
///
/// The reservation's balance is the sum of its entry amounts; nothing in
/// the system mutates a balance except by appending one of these.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: String,
    pub reservation_id: String,
    pub kind: EntryKind,
    /// Signed amount: charges positive, payments negative
    pub amount: Decimal,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        reservation_id: impl Into<String>,
        kind: EntryKind,
        amount: Decimal,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            reservation_id: reservation_id.into(),
            kind,
            amount,
            note,
            recorded_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_roundtrip() {
        for kind in [EntryKind::Charge, EntryKind::Payment, EntryKind::Adjustment] {
            assert_eq!(EntryKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntryKind::parse("refund"), None);
    }

    #[test]
    fn entry_carries_signed_amount() {
        let charge = LedgerEntry::new("r1", EntryKind::Charge, Decimal::new(4250, 2), None);
        let payment = LedgerEntry::new("r1", EntryKind::Payment, Decimal::new(-4250, 2), None);
        assert_eq!(charge.amount + payment.amount, Decimal::ZERO);
    }
}
