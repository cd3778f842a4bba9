//! Special-payment records.
//!
//! Records are transient computation outputs. The `id` is assigned for
//! downstream bookkeeping only; the engine never looks records up by it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing status of a special payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Computed by the engine, not yet reviewed.
    #[default]
    Calculated,
    /// Approved by payroll.
    Approved,
    /// Paid out.
    Paid,
}

/// Sick pay (Krankengeld) for an incapacity period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickPayRecord {
    /// Bookkeeping identifier.
    pub id: Uuid,
    /// First day of incapacity.
    pub start_date: NaiveDate,
    /// Last day of incapacity (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive day count.
    pub days: u32,
    /// Monthly gross / 30.
    pub daily_gross: Decimal,
    /// Monthly net / 30.
    pub daily_net: Decimal,
    /// Benefit per calendar day.
    pub pay_per_day: Decimal,
    /// Benefit for the whole period.
    pub total: Decimal,
    /// Latest possible end of benefit (start + 78 weeks).
    pub max_end_date: NaiveDate,
    /// Processing status.
    pub status: PaymentStatus,
}

/// Kind of maternity-related benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaternityBenefitKind {
    /// Maternity pay during the statutory protection period (Mutterschaftsgeld).
    ProtectionPeriod,
    /// Parental allowance (Elterngeld).
    ParentalLeave,
}

/// Maternity or parental benefit for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaternityBenefitRecord {
    /// Bookkeeping identifier.
    pub id: Uuid,
    /// Which benefit this record covers.
    pub kind: MaternityBenefitKind,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive day count.
    pub days: u32,
    /// Monthly gross / 30.
    pub daily_gross: Decimal,
    /// Daily amount paid by the health insurance or benefit office.
    pub insurance_per_day: Decimal,
    /// Daily employer top-up.
    pub employer_per_day: Decimal,
    /// Insurance share for the period.
    pub total_insurance: Decimal,
    /// Employer share for the period.
    pub total_employer: Decimal,
    /// Total benefit for the period.
    pub total: Decimal,
    /// Processing status.
    pub status: PaymentStatus,
}

/// Short-time work allowance (Kurzarbeitergeld) for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortTimeWorkRecord {
    /// Bookkeeping identifier.
    pub id: Uuid,
    /// First day of the settlement period.
    pub period_start: NaiveDate,
    /// Last day of the settlement period.
    pub period_end: NaiveDate,
    /// Contractual hours in the period.
    pub original_hours: Decimal,
    /// Hours actually worked.
    pub reduced_hours: Decimal,
    /// Reduction as a fraction (0.0 to 1.0).
    pub reduction: Decimal,
    /// Gross pay lost through the reduction.
    pub gross_loss: Decimal,
    /// Net pay lost through the reduction.
    pub net_loss: Decimal,
    /// Benefit rate in percent (67 with children, 60 without).
    pub benefit_rate: Decimal,
    /// Allowance for the period.
    pub benefit: Decimal,
    /// Processing status.
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_defaults_to_calculated() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Calculated);
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    #[test]
    fn test_maternity_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&MaternityBenefitKind::ProtectionPeriod).unwrap(),
            "\"protection_period\""
        );
        let kind: MaternityBenefitKind = serde_json::from_str("\"parental_leave\"").unwrap();
        assert_eq!(kind, MaternityBenefitKind::ParentalLeave);
    }
}
