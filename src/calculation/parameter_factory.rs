//! Translation from employee records to calculation parameters.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::TaxYearConfig;
use crate::models::{
    DEFAULT_HEALTH_ADDITIONAL_RATE, Employee, SalaryType, TaxCalculationParams, TaxClass,
};

/// Average weeks per month (13/3 = 52/12).
const WEEKS_PER_MONTH_NUMERATOR: Decimal = Decimal::from_parts(13, 0, 0, false, 0);
const WEEKS_PER_MONTH_DENOMINATOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Returns the age in completed years on `reference`.
///
/// Dates of birth after `reference` yield zero.
pub fn age_at(date_of_birth: NaiveDate, reference: NaiveDate) -> u32 {
    if reference <= date_of_birth {
        return 0;
    }

    let mut years = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Returns the monthly gross for the employee's salary data.
///
/// Hourly wages are converted with `rate × weekly hours × 13/3`. Negative
/// amounts or hours count as zero.
pub fn monthly_gross(employee: &Employee) -> Decimal {
    let amount = employee.salary.amount.max(Decimal::ZERO);
    match employee.salary.salary_type {
        SalaryType::Monthly => amount,
        SalaryType::Hourly => {
            let hours = employee.employment.weekly_hours.max(Decimal::ZERO);
            amount * hours * WEEKS_PER_MONTH_NUMERATOR / WEEKS_PER_MONTH_DENOMINATOR
        }
    }
}

/// Builds [`TaxCalculationParams`] for an employee as of `reference`.
///
/// - region and church-tax rate follow the federal state; the rate is zero
///   for non-members
/// - an unparseable tax class falls back to class I
/// - missing or negative optional numbers become zero
/// - the employee counts as childless when no child allowance is registered
///
/// A declared minijob whose gross exceeds the minijob threshold is logged;
/// the calculator still classifies by amount.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use lohn_engine::calculation::build_tax_params;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::Employee;
///
/// # fn run(employee: Employee) {
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let params = build_tax_params(&employee, reference, loader.latest().unwrap());
/// println!("age {} in {}", params.age, params.region);
/// # }
/// ```
pub fn build_tax_params(
    employee: &Employee,
    reference: NaiveDate,
    config: &TaxYearConfig,
) -> TaxCalculationParams {
    let personal = &employee.personal;
    let gross_monthly = monthly_gross(employee);

    let minijob_threshold = config.social_insurance.minijob.threshold;
    if employee.is_minijob() && gross_monthly > minijob_threshold {
        warn!(
            employee_id = %employee.id,
            gross_monthly = %gross_monthly,
            threshold = %minijob_threshold,
            "Declared minijob exceeds the minijob threshold"
        );
    }

    let child_allowances = personal
        .child_allowances
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let church_tax_rate = if personal.church_member {
        personal.federal_state.church_tax_rate()
    } else {
        Decimal::ZERO
    };

    TaxCalculationParams {
        gross_salary_yearly: gross_monthly * Decimal::from(12),
        tax_class: TaxClass::parse_lenient(&personal.tax_class),
        child_allowances,
        church_tax: personal.church_member,
        church_tax_rate,
        health_insurance_additional_rate: personal
            .health_insurance_additional_rate
            .unwrap_or(DEFAULT_HEALTH_ADDITIONAL_RATE)
            .max(Decimal::ZERO),
        region: personal.federal_state.region(),
        childless: child_allowances.is_zero(),
        age: age_at(personal.date_of_birth, reference),
    }
}
