//! Sick pay (Krankengeld).

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{complete_tax, percent_of};
use crate::config::TaxYearConfig;
use crate::models::{PaymentStatus, SickPayRecord, TaxCalculationParams};

use super::inclusive_days;

/// Calculates sick pay for an incapacity period.
///
/// # Arguments
///
/// * `params` - Calculation parameters carrying the regular gross
/// * `start_date` - First day of incapacity
/// * `end_date` - Last day of incapacity (inclusive)
/// * `config` - Rate bundle for the tax year
///
/// # Returns
///
/// A [`SickPayRecord`] where `pay_per_day` is the lower of 70 % of the
/// daily gross and 90 % of the daily net, both based on a 30-day month.
/// The maximum benefit end date lies 78 weeks after the start.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::TaxCalculationParams;
/// use lohn_engine::special::calculate_sick_pay;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let params = TaxCalculationParams::for_yearly_gross(Decimal::from(42000));
/// let record = calculate_sick_pay(
///     &params,
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     loader.latest().unwrap(),
/// );
/// assert_eq!(record.days, 14);
/// ```
pub fn calculate_sick_pay(
    params: &TaxCalculationParams,
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &TaxYearConfig,
) -> SickPayRecord {
    let rules = &config.special_payments.sick_pay;
    let net_monthly = complete_tax(params, config).net_monthly;
    let gross_monthly = params.gross_monthly().max(Decimal::ZERO);

    let daily_gross = gross_monthly / rules.days_per_month;
    let daily_net = net_monthly / rules.days_per_month;
    let pay_per_day = percent_of(daily_gross, rules.gross_ratio)
        .min(percent_of(daily_net, rules.net_ratio))
        .max(Decimal::ZERO);

    let days = inclusive_days(start_date, end_date);
    let max_end_date = start_date
        .checked_add_days(Days::new(u64::from(rules.max_duration_weeks) * 7))
        .unwrap_or(NaiveDate::MAX);

    SickPayRecord {
        id: Uuid::new_v4(),
        start_date,
        end_date,
        days,
        daily_gross,
        daily_net,
        pay_per_day,
        total: pay_per_day * Decimal::from(days),
        max_end_date,
        status: PaymentStatus::Calculated,
    }
}
