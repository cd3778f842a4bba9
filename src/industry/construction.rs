//! Construction industry (Baugewerbe) rules.
//!
//! Covers the SOKA-BAU employer contribution, the vacation account, winter
//! allowance, hazard bonuses and the tariff wage table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::percent_of;
use crate::config::{ConstructionConfig, TaxYearConfig};
use crate::models::{Region, TradeGroup};

/// SOKA-BAU contribution for a gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SokaContribution {
    /// Gross the contribution is levied on.
    pub gross: Decimal,
    /// Contribution rate in percent.
    pub rate: Decimal,
    /// Employer share.
    pub employer: Decimal,
    /// Employee share, always zero.
    pub employee: Decimal,
}

/// Calculates the SOKA-BAU contribution. The employer bears it entirely.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::industry::soka_contributions;
/// use lohn_engine::models::Region;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let construction = &loader.latest().unwrap().construction;
/// let soka = soka_contributions(Decimal::from(3500), Region::West, construction);
/// assert_eq!(soka.employer, Decimal::from(532));
/// assert_eq!(soka.employee, Decimal::ZERO);
/// ```
pub fn soka_contributions(
    gross: Decimal,
    region: Region,
    config: &ConstructionConfig,
) -> SokaContribution {
    let gross = gross.max(Decimal::ZERO);
    let rate = config.soka_rate.for_region(region);

    SokaContribution {
        gross,
        rate,
        employer: percent_of(gross, rate),
        employee: Decimal::ZERO,
    }
}

/// State of a construction worker's vacation account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationAccount {
    /// Annual entitlement in days.
    pub entitlement: Decimal,
    /// Days carried over from the previous year.
    pub carried_over: Decimal,
    /// Days already taken.
    pub taken: Decimal,
    /// Days left.
    pub remaining: Decimal,
    /// Monthly gross divided by the working days per month.
    pub daily_rate: Decimal,
    /// Value of the remaining days including the vacation bonus.
    pub value: Decimal,
    /// Day on which remaining days lapse.
    pub expires_on: NaiveDate,
}

/// Calculates the vacation account for `year`.
///
/// `remaining = entitlement + carried_over - taken`, never below zero.
/// The value is `remaining × (gross / 21.75) × (1 + 14.5 %)`; remaining days
/// lapse on 31 March of the following year.
pub fn vacation_account(
    gross_monthly: Decimal,
    carried_over: Decimal,
    taken: Decimal,
    year: i32,
    config: &ConstructionConfig,
) -> VacationAccount {
    let carried_over = carried_over.max(Decimal::ZERO);
    let taken = taken.max(Decimal::ZERO);
    let remaining = (config.annual_vacation_days + carried_over - taken).max(Decimal::ZERO);

    let daily_rate = if config.working_days_per_month > Decimal::ZERO {
        gross_monthly.max(Decimal::ZERO) / config.working_days_per_month
    } else {
        Decimal::ZERO
    };
    let bonus_factor = Decimal::ONE + percent_of(Decimal::ONE, config.vacation_bonus);

    VacationAccount {
        entitlement: config.annual_vacation_days,
        carried_over,
        taken,
        remaining,
        daily_rate,
        value: remaining * daily_rate * bonus_factor,
        expires_on: NaiveDate::from_ymd_opt(year + 1, 3, 31).unwrap_or(NaiveDate::MAX),
    }
}

/// Winter allowance: `hours × rate`, only during the winter period.
pub fn winter_allowance(hours: Decimal, is_winter_period: bool, config: &ConstructionConfig) -> Decimal {
    if !is_winter_period {
        return Decimal::ZERO;
    }
    hours.max(Decimal::ZERO) * config.winter_allowance_per_hour
}

/// Hours worked under each hazard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HazardHours {
    /// Hours of dirty work.
    #[serde(default)]
    pub dirt: Decimal,
    /// Hours at height.
    #[serde(default)]
    pub height: Decimal,
    /// Hours of dangerous work.
    #[serde(default)]
    pub danger: Decimal,
}

/// Hazard bonuses per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HazardBonuses {
    /// Dirt bonus.
    pub dirt: Decimal,
    /// Height bonus.
    pub height: Decimal,
    /// Danger bonus.
    pub danger: Decimal,
    /// Sum of all categories.
    pub total: Decimal,
}

/// Calculates hazard bonuses as `hours × fixed rate` per category.
pub fn hazard_bonuses(hours: &HazardHours, config: &ConstructionConfig) -> HazardBonuses {
    let rates = &config.hazard_rates;
    let dirt = hours.dirt.max(Decimal::ZERO) * rates.dirt;
    let height = hours.height.max(Decimal::ZERO) * rates.height;
    let danger = hours.danger.max(Decimal::ZERO) * rates.danger;

    HazardBonuses {
        dirt,
        height,
        danger,
        total: dirt + height + danger,
    }
}

/// Tariff hourly wage for a region and trade group.
pub fn tariff_wage(region: Region, group: TradeGroup, config: &ConstructionConfig) -> Decimal {
    config.tariff_wages.wage(region, group)
}

/// Input for a construction payroll month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionPayrollInput {
    /// Legal area of the site.
    pub region: Region,
    /// Trade group of the worker.
    pub trade_group: TradeGroup,
    /// Hours worked in the month.
    pub hours_worked: Decimal,
    /// Agreed monthly gross; defaults to tariff wage × hours.
    #[serde(default)]
    pub base_gross: Option<Decimal>,
    /// Whether the month lies in the winter period.
    #[serde(default)]
    pub is_winter_period: bool,
    /// Hours eligible for the winter allowance.
    #[serde(default)]
    pub winter_hours: Decimal,
    /// Hazard hours per category.
    #[serde(default)]
    pub hazard_hours: HazardHours,
}

/// Construction payroll for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionPayroll {
    /// Tariff hourly wage for the trade group.
    pub tariff_wage: Decimal,
    /// Base gross before supplements.
    pub base_gross: Decimal,
    /// Winter allowance (tax-free).
    pub winter_allowance: Decimal,
    /// Hazard bonuses (taxable).
    pub hazard_bonuses: HazardBonuses,
    /// Base plus all supplements.
    pub total_gross: Decimal,
    /// Tax-free part of the total.
    pub tax_free: Decimal,
    /// Taxable part of the total.
    pub taxable: Decimal,
    /// SOKA-BAU contribution on the taxable gross, an employer cost.
    pub soka: SokaContribution,
}

/// Calculates the construction payroll for one month.
///
/// Winter allowance is tax-free; base gross and hazard bonuses are taxable.
/// The SOKA-BAU contribution is levied on the taxable gross and reported as
/// an employer cost outside the total.
pub fn calculate_construction_payroll(
    input: &ConstructionPayrollInput,
    config: &TaxYearConfig,
) -> ConstructionPayroll {
    let rules = &config.construction;
    let wage = tariff_wage(input.region, input.trade_group, rules);
    let base_gross = input
        .base_gross
        .unwrap_or_else(|| wage * input.hours_worked.max(Decimal::ZERO))
        .max(Decimal::ZERO);

    let winter = winter_allowance(input.winter_hours, input.is_winter_period, rules);
    let hazard = hazard_bonuses(&input.hazard_hours, rules);

    let total_gross = base_gross + winter + hazard.total;
    let taxable = base_gross + hazard.total;

    ConstructionPayroll {
        tariff_wage: wage,
        base_gross,
        winter_allowance: winter,
        hazard_bonuses: hazard,
        total_gross,
        tax_free: winter,
        taxable,
        soka: soka_contributions(taxable, input.region, rules),
    }
}
