//! Sunday, holiday and night bonuses (SFN, §3b EStG).
//!
//! Bonuses are computed on the hourly rate capped at 50 EUR/h. They are
//! entirely tax-free only when the actual hourly rate is at or below the cap;
//! above it the result is flagged as partially taxable.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::percent_of;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Tax treatment of SFN bonuses for a given hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SfnTaxation {
    /// The hourly rate is at or below the cap; bonuses are wholly tax-free.
    #[default]
    TaxFree,
    /// The hourly rate exceeds the cap; pay above the capped base is taxable.
    PartiallyTaxable,
}

/// Classifies the tax treatment for an hourly rate against the cap.
pub fn sfn_taxation(hourly_rate: Decimal, cap: Decimal) -> SfnTaxation {
    if hourly_rate <= cap {
        SfnTaxation::TaxFree
    } else {
        SfnTaxation::PartiallyTaxable
    }
}

/// One SFN bonus category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SfnBonus {
    /// Hours in this category.
    pub hours: Decimal,
    /// Bonus rate in percent of the hourly rate.
    pub rate: Decimal,
    /// Hourly rate the bonus is computed on, at most the cap.
    pub base_rate: Decimal,
    /// Bonus on the capped base rate.
    pub amount: Decimal,
}

impl SfnBonus {
    /// Computes a bonus for `hours` at `rate` percent of `hourly_rate`
    /// capped at `cap`.
    ///
    /// Negative hours or rates count as zero.
    pub fn compute(hours: Decimal, hourly_rate: Decimal, rate: Decimal, cap: Decimal) -> Self {
        let hours = hours.max(Decimal::ZERO);
        let base_rate = hourly_rate.max(Decimal::ZERO).min(cap);

        Self {
            hours,
            rate,
            base_rate,
            amount: percent_of(hours * base_rate, rate),
        }
    }
}

/// Sums the amounts of several bonuses.
pub fn sum_bonuses<'a, I>(bonuses: I) -> Decimal
where
    I: IntoIterator<Item = &'a SfnBonus>,
{
    bonuses.into_iter().map(|b| b.amount).sum()
}

/// Hours of `[start, end)` falling inside `[window_start, window_end)`.
pub(crate) fn overlap_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Decimal {
    let from = start.max(window_start);
    let to = end.min(window_end);
    if to <= from {
        return Decimal::ZERO;
    }
    Decimal::from((to - from).num_minutes()) / MINUTES_PER_HOUR
}

/// Calendar days touched by `[start, end)`.
pub(crate) fn days_touched(start: NaiveDateTime, end: NaiveDateTime) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start.date();
    while day.and_time(NaiveTime::MIN) < end {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// Hours of `[start, end)` that fall on a Sunday.
pub fn sunday_hours(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    days_touched(start, end)
        .into_iter()
        .filter(|day| day.weekday() == Weekday::Sun)
        .map(|day| {
            let midnight = day.and_time(NaiveTime::MIN);
            overlap_hours(start, end, midnight, midnight + Duration::days(1))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_bonus_below_cap_is_wholly_tax_free() {
        let bonus = SfnBonus::compute(dec("8"), dec("20"), dec("25"), dec("50"));

        assert_eq!(bonus.amount, dec("40"));
        assert_eq!(bonus.base_rate, dec("20"));
        assert_eq!(sfn_taxation(dec("20"), dec("50")), SfnTaxation::TaxFree);
        assert_eq!(sfn_taxation(dec("50"), dec("50")), SfnTaxation::TaxFree);
    }

    #[test]
    fn test_bonus_above_cap_uses_capped_base() {
        let bonus = SfnBonus::compute(dec("10"), dec("60"), dec("50"), dec("50"));

        // 10 × 50 × 50 %, not 10 × 60 × 50 %
        assert_eq!(bonus.base_rate, dec("50"));
        assert_eq!(bonus.amount, dec("250"));
        assert_eq!(sfn_taxation(dec("60"), dec("50")), SfnTaxation::PartiallyTaxable);
    }

    #[test]
    fn test_negative_hours_yield_nothing() {
        let bonus = SfnBonus::compute(dec("-3"), dec("20"), dec("25"), dec("50"));
        assert_eq!(bonus.amount, Decimal::ZERO);
    }

    #[test]
    fn test_sum_bonuses() {
        let a = SfnBonus::compute(dec("2"), dec("60"), dec("50"), dec("50"));
        let b = SfnBonus::compute(dec("4"), dec("60"), dec("25"), dec("50"));

        // 2 × 50 × 50 % + 4 × 50 × 25 %
        assert_eq!(sum_bonuses([&a, &b]), dec("100"));
    }

    #[test]
    fn test_sunday_hours_across_midnight() {
        // 2025-03-15 is a Saturday
        let hours = sunday_hours(at(2025, 3, 15, 22, 0), at(2025, 3, 16, 6, 30));
        assert_eq!(hours, dec("6.5"));
        assert_eq!(sunday_hours(at(2025, 3, 17, 8, 0), at(2025, 3, 17, 16, 0)), Decimal::ZERO);
    }
}
