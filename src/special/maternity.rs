//! Maternity pay and parental allowance.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{complete_tax, percent_of};
use crate::config::{MaternityConfig, TaxYearConfig};
use crate::models::{
    MaternityBenefitKind, MaternityBenefitRecord, PaymentStatus, TaxCalculationParams,
};

use super::inclusive_days;

/// Returns the statutory protection period around an expected delivery date.
///
/// The period starts the configured number of weeks before `due_date` (six)
/// and ends the configured number of weeks after it (eight).
pub fn protection_period(due_date: NaiveDate, config: &MaternityConfig) -> (NaiveDate, NaiveDate) {
    let before = Days::new(u64::from(config.weeks_before_birth) * 7);
    let after = Days::new(u64::from(config.weeks_after_birth) * 7);

    (
        due_date.checked_sub_days(before).unwrap_or(NaiveDate::MIN),
        due_date.checked_add_days(after).unwrap_or(NaiveDate::MAX),
    )
}

/// Calculates a maternity-related benefit for a period.
///
/// - **Protection period**: the insurance pays the daily gross up to the
///   daily cap (13 EUR); the employer tops up to the full daily gross.
/// - **Parental leave**: 65 % of the monthly net spread over 30 days, paid
///   entirely by the benefit office.
///
/// Daily amounts are based on a 30-day month.
pub fn calculate_maternity_benefit(
    kind: MaternityBenefitKind,
    params: &TaxCalculationParams,
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &TaxYearConfig,
) -> MaternityBenefitRecord {
    let rules = &config.special_payments.maternity;
    let daily_gross = params.gross_monthly().max(Decimal::ZERO) / rules.days_per_month;

    let (insurance_per_day, employer_per_day) = match kind {
        MaternityBenefitKind::ProtectionPeriod => {
            let insurance = daily_gross.min(rules.insurance_daily_cap);
            (insurance, daily_gross - insurance)
        }
        MaternityBenefitKind::ParentalLeave => {
            let net_monthly = complete_tax(params, config).net_monthly;
            let benefit = percent_of(net_monthly, rules.parental_benefit_rate) / rules.days_per_month;
            (benefit, Decimal::ZERO)
        }
    };

    let days = inclusive_days(start_date, end_date);
    let day_count = Decimal::from(days);
    let total_insurance = insurance_per_day * day_count;
    let total_employer = employer_per_day * day_count;

    MaternityBenefitRecord {
        id: Uuid::new_v4(),
        kind,
        start_date,
        end_date,
        days,
        daily_gross,
        insurance_per_day,
        employer_per_day,
        total_insurance,
        total_employer,
        total: total_insurance + total_employer,
        status: PaymentStatus::Calculated,
    }
}
