//! Nursing and shift-work rules.
//!
//! Tier-based hourly rates, blended night bonus, shift allowances, on-call
//! pay and a rotating shift-plan generator.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::percent_of;
use crate::config::{NursingConfig, TaxYearConfig};
use crate::models::{QualificationTier, ShiftType};

use super::sfn::{SfnBonus, SfnTaxation, sfn_taxation, sum_bonuses};

/// Hourly rate for a qualification tier.
pub fn hourly_rate(tier: QualificationTier, config: &NursingConfig) -> Decimal {
    config.tier_rates.rate(tier)
}

/// One planned or worked shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEntry {
    /// Day the shift starts.
    pub date: NaiveDate,
    /// Shift type.
    pub shift_type: ShiftType,
    /// Hours of the shift.
    pub hours: Decimal,
    /// Hours falling on a Sunday.
    #[serde(default)]
    pub sunday_hours: Decimal,
    /// Whether the day is a Sunday.
    #[serde(default)]
    pub is_sunday: bool,
    /// Whether the day is a public holiday.
    #[serde(default)]
    pub is_holiday: bool,
}

/// Rotates `pattern` across the days of a month.
///
/// Day `n` (zero-based) takes `pattern[n % pattern.len()]`; `None` entries
/// are days off. Sunday hours are marked from the calendar. An empty pattern
/// or an invalid month yields an empty plan.
///
/// # Example
///
/// ```
/// use lohn_engine::industry::generate_shift_plan;
/// use lohn_engine::models::ShiftType;
/// use rust_decimal::Decimal;
///
/// let pattern = [Some(ShiftType::Early), Some(ShiftType::Late), None];
/// let plan = generate_shift_plan(2025, 2, &pattern, Decimal::from(8));
/// assert_eq!(plan.len(), 19);
/// assert_eq!(plan[1].shift_type, ShiftType::Late);
/// ```
pub fn generate_shift_plan(
    year: i32,
    month: u32,
    pattern: &[Option<ShiftType>],
    hours_per_shift: Decimal,
) -> Vec<ShiftEntry> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    if pattern.is_empty() {
        return Vec::new();
    }

    let hours = hours_per_shift.max(Decimal::ZERO);
    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .enumerate()
        .filter_map(|(index, date)| {
            let shift_type = pattern[index % pattern.len()]?;
            let is_sunday = date.weekday() == Weekday::Sun;
            Some(ShiftEntry {
                date,
                shift_type,
                hours,
                sunday_hours: if is_sunday { hours } else { Decimal::ZERO },
                is_sunday,
                // TODO: look up the region-specific public-holiday calendar.
                is_holiday: false,
            })
        })
        .collect()
}

/// Hours per nursing SFN category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NursingSfnHours {
    /// Night hours.
    #[serde(default)]
    pub night: Decimal,
    /// Sunday hours.
    #[serde(default)]
    pub sunday: Decimal,
    /// Public holiday hours.
    #[serde(default)]
    pub holiday: Decimal,
    /// Christmas and May 1st hours.
    #[serde(default)]
    pub christmas: Decimal,
}

impl NursingSfnHours {
    /// Aggregates SFN hours from a list of shifts.
    ///
    /// Shifts on 25/26 December and 1 May, and late or night shifts on
    /// 24 December, count at the Christmas rate instead of the Sunday or
    /// holiday rate.
    pub fn from_shifts(shifts: &[ShiftEntry]) -> Self {
        shifts.iter().fold(Self::default(), |mut acc, shift| {
            if shift.shift_type == ShiftType::Night {
                acc.night += shift.hours;
            }
            if is_christmas_rate(shift) {
                acc.christmas += shift.hours;
            } else if shift.is_holiday {
                acc.holiday += shift.hours;
            } else {
                acc.sunday += shift.sunday_hours;
            }
            acc
        })
    }
}

fn is_christmas_rate(shift: &ShiftEntry) -> bool {
    match (shift.date.month(), shift.date.day()) {
        (12, 25) | (12, 26) | (5, 1) => true,
        (12, 24) => shift.shift_type != ShiftType::Early,
        _ => false,
    }
}

/// Nursing SFN bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursingSfn {
    /// Night bonus (blended rate).
    pub night: SfnBonus,
    /// Sunday bonus.
    pub sunday: SfnBonus,
    /// Holiday bonus.
    pub holiday: SfnBonus,
    /// Christmas bonus.
    pub christmas: SfnBonus,
    /// Sum of all bonuses, tax-free under §3b EStG.
    pub total: Decimal,
    /// Tax treatment for the hourly rate.
    pub taxation: SfnTaxation,
}

/// Calculates nursing SFN bonuses on `hourly_rate`.
///
/// All night hours share one blended rate (30 %), unlike gastronomy which
/// splits the night into two windows.
pub fn nursing_sfn(hourly_rate: Decimal, hours: &NursingSfnHours, config: &TaxYearConfig) -> NursingSfn {
    let rates = &config.nursing.sfn_rates;
    let cap = config.sfn.base_rate_cap;
    let bonus = |h: Decimal, rate: Decimal| SfnBonus::compute(h, hourly_rate, rate, cap);

    let night = bonus(hours.night, rates.night);
    let sunday = bonus(hours.sunday, rates.sunday);
    let holiday = bonus(hours.holiday, rates.holiday);
    let christmas = bonus(hours.christmas, rates.christmas);
    let total = sum_bonuses([&night, &sunday, &holiday, &christmas]);

    NursingSfn {
        night,
        sunday,
        holiday,
        christmas,
        total,
        taxation: sfn_taxation(hourly_rate, cap),
    }
}

/// Shift allowances summed per shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftAllowances {
    /// Early shift allowances.
    pub early: Decimal,
    /// Late shift allowances.
    pub late: Decimal,
    /// Night shift allowances.
    pub night: Decimal,
    /// Sum of all shift types.
    pub total: Decimal,
}

/// Sums shift allowances as `hours × rate` per shift type.
pub fn shift_allowances(shifts: &[ShiftEntry], config: &NursingConfig) -> ShiftAllowances {
    let mut allowances = ShiftAllowances::default();

    for shift in shifts {
        let amount = shift.hours.max(Decimal::ZERO) * config.shift_allowances.rate(shift.shift_type);
        match shift.shift_type {
            ShiftType::Early => allowances.early += amount,
            ShiftType::Late => allowances.late += amount,
            ShiftType::Night => allowances.night += amount,
        }
    }

    allowances.total = allowances.early + allowances.late + allowances.night;
    allowances
}

/// On-call pay: `hours × hourly_rate × percent`.
pub fn on_call_pay(hours: Decimal, hourly_rate: Decimal, percent: Decimal) -> Decimal {
    percent_of(hours.max(Decimal::ZERO) * hourly_rate.max(Decimal::ZERO), percent)
}

/// Input for a nursing payroll month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursingPayrollInput {
    /// Qualification tier.
    pub tier: QualificationTier,
    /// Hours worked in the month.
    pub hours_worked: Decimal,
    /// Shifts worked.
    #[serde(default)]
    pub shifts: Vec<ShiftEntry>,
    /// SFN hours; derived from `shifts` when absent.
    #[serde(default)]
    pub sfn_hours: Option<NursingSfnHours>,
    /// On-call hours.
    #[serde(default)]
    pub on_call_hours: Decimal,
    /// On-call percentage; defaults to the configured value.
    #[serde(default)]
    pub on_call_percent: Option<Decimal>,
}

/// Nursing payroll for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NursingPayroll {
    /// Hourly rate of the tier.
    pub hourly_rate: Decimal,
    /// Hourly rate × hours worked.
    pub base_gross: Decimal,
    /// SFN bonuses.
    pub sfn: NursingSfn,
    /// Shift allowances (taxable).
    pub shift_allowances: ShiftAllowances,
    /// On-call pay (taxable).
    pub on_call_pay: Decimal,
    /// Base plus all categories.
    pub total_gross: Decimal,
    /// Tax-free part of the total.
    pub tax_free: Decimal,
    /// Taxable part of the total.
    pub taxable: Decimal,
}

/// Calculates the nursing payroll for one month.
pub fn calculate_nursing_payroll(input: &NursingPayrollInput, config: &TaxYearConfig) -> NursingPayroll {
    let rules = &config.nursing;
    let rate = hourly_rate(input.tier, rules);
    let base_gross = rate * input.hours_worked.max(Decimal::ZERO);

    let sfn_hours = input
        .sfn_hours
        .unwrap_or_else(|| NursingSfnHours::from_shifts(&input.shifts));
    let sfn = nursing_sfn(rate, &sfn_hours, config);
    let allowances = shift_allowances(&input.shifts, rules);
    let on_call = on_call_pay(
        input.on_call_hours,
        rate,
        input.on_call_percent.unwrap_or(rules.on_call_percent),
    );

    let total_gross = base_gross + sfn.total + allowances.total + on_call;

    NursingPayroll {
        hourly_rate: rate,
        base_gross,
        sfn,
        shift_allowances: allowances,
        on_call_pay: on_call,
        total_gross,
        tax_free: sfn.total,
        taxable: base_gross + allowances.total + on_call,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bundle() -> TaxYearConfig {
        ConfigLoader::load("./config/de")
            .unwrap()
            .tax_year(2025)
            .unwrap()
            .clone()
    }

    fn shift(date: NaiveDate, shift_type: ShiftType, hours: &str) -> ShiftEntry {
        ShiftEntry {
            date,
            shift_type,
            hours: dec(hours),
            sunday_hours: Decimal::ZERO,
            is_sunday: false,
            is_holiday: false,
        }
    }

    #[test]
    fn test_tier_rates_increase() {
        let config = bundle();
        for pair in QualificationTier::ALL.windows(2) {
            assert!(hourly_rate(pair[1], &config.nursing) > hourly_rate(pair[0], &config.nursing));
        }
        assert_eq!(hourly_rate(QualificationTier::Nurse, &config.nursing), dec("20.50"));
    }

    #[test]
    fn test_blended_night_rate() {
        let config = bundle();
        let hours = NursingSfnHours {
            night: dec("10"),
            ..NursingSfnHours::default()
        };
        let sfn = nursing_sfn(dec("20"), &hours, &config);

        // 10 × 20 × 30 %
        assert_eq!(sfn.night.amount, dec("60"));
        assert_eq!(sfn.taxation, SfnTaxation::TaxFree);
    }

    #[test]
    fn test_christmas_and_holiday_rates() {
        let config = bundle();
        let hours = NursingSfnHours {
            holiday: dec("8"),
            christmas: dec("8"),
            ..NursingSfnHours::default()
        };
        let sfn = nursing_sfn(dec("20"), &hours, &config);

        assert_eq!(sfn.holiday.amount, dec("200"));
        assert_eq!(sfn.christmas.amount, dec("240"));
        assert_eq!(sfn.total, dec("440"));
    }

    #[test]
    fn test_shift_allowances_per_type() {
        let config = bundle();
        let shifts = vec![
            shift(date(2025, 3, 3), ShiftType::Early, "8"),
            shift(date(2025, 3, 4), ShiftType::Late, "8"),
            shift(date(2025, 3, 5), ShiftType::Night, "10"),
        ];
        let allowances = shift_allowances(&shifts, &config.nursing);

        assert_eq!(allowances.early, Decimal::ZERO);
        assert_eq!(allowances.late, dec("9.6"));
        assert_eq!(allowances.night, dec("25"));
        assert_eq!(allowances.total, dec("34.6"));
    }

    #[test]
    fn test_on_call_pay() {
        assert_eq!(on_call_pay(dec("20"), dec("20.50"), dec("25")), dec("102.5"));
        assert_eq!(on_call_pay(dec("-2"), dec("20.50"), dec("25")), Decimal::ZERO);
    }

    #[test]
    fn test_shift_plan_rotates_pattern_and_marks_sundays() {
        let pattern = [
            Some(ShiftType::Early),
            Some(ShiftType::Late),
            Some(ShiftType::Night),
            None,
        ];
        // March 2025 has 31 days, 2025-03-02 is a Sunday
        let plan = generate_shift_plan(2025, 3, &pattern, dec("8"));

        assert_eq!(plan.len(), 24);
        assert_eq!(plan[0].date, date(2025, 3, 1));
        assert_eq!(plan[0].shift_type, ShiftType::Early);
        assert_eq!(plan[1].date, date(2025, 3, 2));
        assert!(plan[1].is_sunday);
        assert_eq!(plan[1].sunday_hours, dec("8"));
        assert_eq!(plan[3].date, date(2025, 3, 5));
        assert!(plan.iter().all(|entry| !entry.is_holiday));
    }

    #[test]
    fn test_shift_plan_edge_cases() {
        assert!(generate_shift_plan(2025, 13, &[Some(ShiftType::Early)], dec("8")).is_empty());
        assert!(generate_shift_plan(2025, 3, &[], dec("8")).is_empty());
        assert!(generate_shift_plan(2025, 3, &[None], dec("8")).is_empty());
    }

    #[test]
    fn test_sfn_hours_from_shifts() {
        let mut sunday_night = shift(date(2025, 3, 2), ShiftType::Night, "8");
        sunday_night.is_sunday = true;
        sunday_night.sunday_hours = dec("8");

        let shifts = vec![
            sunday_night,
            shift(date(2025, 12, 24), ShiftType::Late, "8"),
            shift(date(2025, 12, 24), ShiftType::Early, "6"),
            shift(date(2025, 12, 25), ShiftType::Night, "10"),
        ];
        let hours = NursingSfnHours::from_shifts(&shifts);

        assert_eq!(hours.night, dec("18"));
        assert_eq!(hours.sunday, dec("8"));
        assert_eq!(hours.christmas, dec("18"));
        assert_eq!(hours.holiday, Decimal::ZERO);
    }

    #[test]
    fn test_payroll_totals_and_split() {
        let config = bundle();
        let shifts = generate_shift_plan(
            2025,
            3,
            &[Some(ShiftType::Night), Some(ShiftType::Late), None],
            dec("8"),
        );
        let input = NursingPayrollInput {
            tier: QualificationTier::Nurse,
            hours_worked: dec("160"),
            shifts,
            sfn_hours: None,
            on_call_hours: dec("10"),
            on_call_percent: None,
        };

        let payroll = calculate_nursing_payroll(&input, &config);

        assert_eq!(payroll.base_gross, dec("3280"));
        assert_eq!(payroll.on_call_pay, dec("51.25"));
        assert_eq!(
            payroll.total_gross,
            payroll.base_gross + payroll.sfn.total + payroll.shift_allowances.total + payroll.on_call_pay
        );
        assert_eq!(payroll.tax_free + payroll.taxable, payroll.total_gross);
        assert_eq!(payroll.tax_free, payroll.sfn.total);
        assert!(payroll.sfn.night.hours > Decimal::ZERO);
    }
}
