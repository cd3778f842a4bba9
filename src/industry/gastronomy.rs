//! Gastronomy (hotel and restaurant) rules.
//!
//! Meal benefits in kind, tip treatment, split night bonuses and the minijob
//! overflow check.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{GastronomyConfig, TaxYearConfig};
use crate::models::MealType;

use super::sfn::{SfnBonus, SfnTaxation, days_touched, overlap_hours, sfn_taxation, sum_bonuses, sunday_hours};

/// Start of the early night window (20:00).
const NIGHT_EARLY_START_HOUR: u32 = 20;
/// End of the late night window (04:00).
const NIGHT_LATE_END_HOUR: u32 = 4;

/// Meal benefits in kind for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealBenefits {
    /// Value of the breakfasts.
    pub breakfast: Decimal,
    /// Value of the lunches.
    pub lunch: Decimal,
    /// Value of the dinners.
    pub dinner: Decimal,
    /// Sum of all meals.
    pub total: Decimal,
}

/// Values meals provided by the employer at the official rates.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::industry::meal_benefits;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let meals = meal_benefits(10, 0, 0, &loader.latest().unwrap().gastronomy);
/// assert_eq!(meals.total, Decimal::new(2170, 2));
/// ```
pub fn meal_benefits(
    breakfasts: u32,
    lunches: u32,
    dinners: u32,
    config: &GastronomyConfig,
) -> MealBenefits {
    let value = |meal: MealType, count: u32| config.meal_values.value(meal) * Decimal::from(count);

    let breakfast = value(MealType::Breakfast, breakfasts);
    let lunch = value(MealType::Lunch, lunches);
    let dinner = value(MealType::Dinner, dinners);

    MealBenefits {
        breakfast,
        lunch,
        dinner,
        total: breakfast + lunch + dinner,
    }
}

/// Tax treatment of tips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipsTreatment {
    /// Tip amount.
    pub amount: Decimal,
    /// Tax-free part.
    pub tax_free: Decimal,
    /// Taxable part.
    pub taxable: Decimal,
}

/// Splits tips into tax-free and taxable parts.
///
/// Tips paid directly by guests are wholly tax-free; tips distributed by the
/// employer are wholly taxable. There is no partial split.
pub fn tips_treatment(amount: Decimal, from_employer: bool) -> TipsTreatment {
    let amount = amount.max(Decimal::ZERO);
    if from_employer {
        TipsTreatment {
            amount,
            tax_free: Decimal::ZERO,
            taxable: amount,
        }
    } else {
        TipsTreatment {
            amount,
            tax_free: amount,
            taxable: Decimal::ZERO,
        }
    }
}

/// Hours per gastronomy SFN category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GastronomySfnHours {
    /// Night hours between 20:00 and 24:00.
    #[serde(default)]
    pub night_early: Decimal,
    /// Night hours between 00:00 and 04:00.
    #[serde(default)]
    pub night_late: Decimal,
    /// Sunday hours.
    #[serde(default)]
    pub sunday: Decimal,
    /// Public holiday hours.
    #[serde(default)]
    pub holiday: Decimal,
}

impl GastronomySfnHours {
    /// Derives night and Sunday hours from a shift's start and end.
    ///
    /// Holiday hours are not derived and stay zero.
    pub fn from_shift(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let mut hours = Self::default();

        for day in days_touched(start, end) {
            let midnight = day.and_time(NaiveTime::MIN);
            let early_start = midnight + Duration::hours(i64::from(NIGHT_EARLY_START_HOUR));
            let late_end = midnight + Duration::hours(i64::from(NIGHT_LATE_END_HOUR));

            hours.night_early += overlap_hours(start, end, early_start, midnight + Duration::days(1));
            hours.night_late += overlap_hours(start, end, midnight, late_end);
        }
        hours.sunday = sunday_hours(start, end);
        hours
    }
}

/// Gastronomy SFN bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GastronomySfn {
    /// Night bonus 20:00 to 24:00.
    pub night_early: SfnBonus,
    /// Night bonus 00:00 to 04:00.
    pub night_late: SfnBonus,
    /// Sunday bonus.
    pub sunday: SfnBonus,
    /// Holiday bonus.
    pub holiday: SfnBonus,
    /// Sum of all bonuses, tax-free under §3b EStG.
    pub total: Decimal,
    /// Tax treatment for the hourly rate.
    pub taxation: SfnTaxation,
}

/// Calculates gastronomy SFN bonuses on `hourly_rate`.
///
/// Night work is split into an early (25 %) and a late (40 %) window;
/// Sunday pays 50 % and holidays 125 %. The 50 EUR/h cap rule applies.
pub fn gastronomy_sfn(
    hourly_rate: Decimal,
    hours: &GastronomySfnHours,
    config: &TaxYearConfig,
) -> GastronomySfn {
    let rates = &config.gastronomy.sfn_rates;
    let cap = config.sfn.base_rate_cap;
    let bonus = |h: Decimal, rate: Decimal| SfnBonus::compute(h, hourly_rate, rate, cap);

    let night_early = bonus(hours.night_early, rates.night_early);
    let night_late = bonus(hours.night_late, rates.night_late);
    let sunday = bonus(hours.sunday, rates.sunday);
    let holiday = bonus(hours.holiday, rates.holiday);
    let total = sum_bonuses([&night_early, &night_late, &sunday, &holiday]);

    GastronomySfn {
        night_early,
        night_late,
        sunday,
        holiday,
        total,
        taxation: sfn_taxation(hourly_rate, cap),
    }
}

/// Result of the minijob overflow check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinijobCheck {
    /// Wage plus meal benefit.
    pub total: Decimal,
    /// Minijob threshold.
    pub threshold: Decimal,
    /// Amount left below the threshold, zero on overflow.
    pub headroom: Decimal,
    /// Whether the total exceeds the threshold.
    pub overflow: bool,
}

/// Checks whether wage plus meal benefit stays within the minijob threshold.
pub fn minijob_overflow_check(
    wage: Decimal,
    meal_benefit: Decimal,
    config: &TaxYearConfig,
) -> MinijobCheck {
    let threshold = config.social_insurance.minijob.threshold;
    let total = wage.max(Decimal::ZERO) + meal_benefit.max(Decimal::ZERO);

    MinijobCheck {
        total,
        threshold,
        headroom: (threshold - total).max(Decimal::ZERO),
        overflow: total > threshold,
    }
}

/// Input for a gastronomy payroll month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GastronomyPayrollInput {
    /// Monthly base gross.
    pub base_gross: Decimal,
    /// Hours worked; used to derive the hourly rate.
    pub hours_worked: Decimal,
    /// Breakfasts provided.
    #[serde(default)]
    pub breakfasts: u32,
    /// Lunches provided.
    #[serde(default)]
    pub lunches: u32,
    /// Dinners provided.
    #[serde(default)]
    pub dinners: u32,
    /// Tips received directly from guests.
    #[serde(default)]
    pub guest_tips: Decimal,
    /// Tips distributed by the employer.
    #[serde(default)]
    pub employer_tips: Decimal,
    /// SFN hours.
    #[serde(default)]
    pub sfn_hours: GastronomySfnHours,
}

/// Gastronomy payroll for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GastronomyPayroll {
    /// Base gross.
    pub base_gross: Decimal,
    /// Base gross divided by hours worked.
    pub hourly_rate: Decimal,
    /// Meal benefits in kind (taxable).
    pub meal_benefits: MealBenefits,
    /// Guest tips (tax-free).
    pub guest_tips: Decimal,
    /// Employer-distributed tips (taxable).
    pub employer_tips: Decimal,
    /// SFN bonuses.
    pub sfn: GastronomySfn,
    /// Base plus all categories.
    pub total_gross: Decimal,
    /// Tax-free part of the total.
    pub tax_free: Decimal,
    /// Taxable part of the total.
    pub taxable: Decimal,
    /// Minijob check on base gross plus meal benefit.
    pub minijob_check: MinijobCheck,
}

/// Calculates the gastronomy payroll for one month.
///
/// The hourly rate for SFN bonuses is `base_gross / hours_worked`, zero when
/// no hours were worked.
pub fn calculate_gastronomy_payroll(
    input: &GastronomyPayrollInput,
    config: &TaxYearConfig,
) -> GastronomyPayroll {
    let base_gross = input.base_gross.max(Decimal::ZERO);
    let hourly_rate = if input.hours_worked > Decimal::ZERO {
        base_gross / input.hours_worked
    } else {
        Decimal::ZERO
    };

    let meals = meal_benefits(input.breakfasts, input.lunches, input.dinners, &config.gastronomy);
    let guest = tips_treatment(input.guest_tips, false);
    let employer = tips_treatment(input.employer_tips, true);
    let sfn = gastronomy_sfn(hourly_rate, &input.sfn_hours, config);

    let total_gross = base_gross + meals.total + guest.amount + employer.amount + sfn.total;
    let tax_free = guest.tax_free + employer.tax_free + sfn.total;
    let taxable = base_gross + meals.total + guest.taxable + employer.taxable;

    GastronomyPayroll {
        base_gross,
        hourly_rate,
        meal_benefits: meals,
        guest_tips: guest.amount,
        employer_tips: employer.amount,
        sfn,
        total_gross,
        tax_free,
        taxable,
        minijob_check: minijob_overflow_check(base_gross, meals.total, config),
    }
}
