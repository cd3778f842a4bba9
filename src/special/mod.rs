//! Special payment types.
//!
//! Sick pay, maternity and parental benefits, and short-time work allowance.
//! Each calculator derives its net figures from the gross-to-net calculator
//! and returns a record carrying a fresh bookkeeping id.

mod maternity;
mod short_time_work;
mod sick_pay;

use chrono::NaiveDate;

pub use maternity::{calculate_maternity_benefit, protection_period};
pub use short_time_work::{
    calculate_short_time_work, reduction_fraction, validate_short_time_work,
};
pub use sick_pay::calculate_sick_pay;

/// Inclusive number of days between two dates; zero when `end` precedes `start`.
pub(crate) fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days() + 1;
    u32::try_from(days).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days(date(2025, 3, 1), date(2025, 3, 1)), 1);
        assert_eq!(inclusive_days(date(2025, 3, 1), date(2025, 3, 31)), 31);
        assert_eq!(inclusive_days(date(2025, 3, 10), date(2025, 3, 1)), 0);
    }
}
