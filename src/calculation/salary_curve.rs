//! Salary curve and marginal-rate sampling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxYearConfig;
use crate::models::TaxCalculationParams;

use super::gross_to_net::net_monthly_for;

/// One sample of the salary curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Monthly gross at this sample.
    pub gross_monthly: Decimal,
    /// Monthly net at this sample.
    pub net_monthly: Decimal,
    /// `(1 - Δnet/Δgross) × 100` against the previous sample.
    ///
    /// `None` for the first sample.
    pub marginal_rate: Option<Decimal>,
}

/// Lazily evaluates `steps + 1` equally spaced monthly gross amounts.
///
/// # Example
///
/// ```no_run
/// use lohn_engine::calculation::SalaryCurve;
/// use lohn_engine::config::ConfigLoader;
/// use lohn_engine::models::TaxCalculationParams;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/de").unwrap();
/// let params = TaxCalculationParams::default();
/// let curve = SalaryCurve::new(
///     Decimal::from(1000),
///     Decimal::from(6000),
///     10,
///     &params,
///     loader.latest().unwrap(),
/// );
///
/// for point in curve.skip(1) {
///     println!("{} → {:?}", point.gross_monthly, point.marginal_rate);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SalaryCurve<'a> {
    params: TaxCalculationParams,
    config: &'a TaxYearConfig,
    from: Decimal,
    step: Decimal,
    steps: u32,
    index: u64,
    previous: Option<(Decimal, Decimal)>,
}

impl<'a> SalaryCurve<'a> {
    /// Creates a curve over `[from, to]` split into `steps` intervals.
    ///
    /// Zero steps yields the single point `from`.
    pub fn new(
        from: Decimal,
        to: Decimal,
        steps: u32,
        params: &TaxCalculationParams,
        config: &'a TaxYearConfig,
    ) -> Self {
        let step = if steps == 0 {
            Decimal::ZERO
        } else {
            (to - from) / Decimal::from(steps)
        };

        Self {
            params: params.clone(),
            config,
            from,
            step,
            steps,
            index: 0,
            previous: None,
        }
    }
}

impl Iterator for SalaryCurve<'_> {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index > u64::from(self.steps) {
            return None;
        }

        let gross = self.from + self.step * Decimal::from(self.index);
        let net = net_monthly_for(gross, &self.params, self.config);

        let marginal_rate = self.previous.and_then(|(prev_gross, prev_net)| {
            let delta_gross = gross - prev_gross;
            if delta_gross.is_zero() {
                None
            } else {
                Some((Decimal::ONE - (net - prev_net) / delta_gross) * Decimal::ONE_HUNDRED)
            }
        });

        self.previous = Some((gross, net));
        self.index += 1;

        Some(CurvePoint {
            gross_monthly: gross,
            net_monthly: net,
            marginal_rate,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.steps) + 1).saturating_sub(self.index);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SalaryCurve<'_> {}

/// Collects the full curve over `[from, to]`.
pub fn salary_curve(
    from: Decimal,
    to: Decimal,
    steps: u32,
    params: &TaxCalculationParams,
    config: &TaxYearConfig,
) -> Vec<CurvePoint> {
    SalaryCurve::new(from, to, steps, params, config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bundle() -> TaxYearConfig {
        ConfigLoader::load("./config/de")
            .unwrap()
            .tax_year(2025)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_curve_has_steps_plus_one_points() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let points = salary_curve(dec("1000"), dec("5000"), 8, &params, &config);

        assert_eq!(points.len(), 9);
        assert_eq!(points[0].gross_monthly, dec("1000"));
        assert_eq!(points[8].gross_monthly, dec("5000"));
        assert_eq!(points[1].gross_monthly, dec("1500"));
    }

    #[test]
    fn test_only_first_point_lacks_marginal_rate() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let points = salary_curve(dec("1000"), dec("5000"), 4, &params, &config);

        assert!(points[0].marginal_rate.is_none());
        assert!(points[1..].iter().all(|p| p.marginal_rate.is_some()));
    }

    #[test]
    fn test_marginal_rate_in_minijob_range_is_zero() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let points = salary_curve(dec("100"), dec("500"), 4, &params, &config);

        for point in &points[1..] {
            assert_eq!(point.marginal_rate, Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_marginal_rate_is_positive_for_regular_income() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let points = salary_curve(dec("3000"), dec("6000"), 3, &params, &config);

        for point in &points[1..] {
            assert!(point.marginal_rate.unwrap() > Decimal::ZERO);
        }
    }

    #[test]
    fn test_iterator_is_lazy_and_sized() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let mut curve = SalaryCurve::new(dec("1000"), dec("2000"), 10, &params, &config);

        assert_eq!(curve.len(), 11);
        curve.next();
        assert_eq!(curve.len(), 10);
        assert_eq!(curve.nth(9).map(|p| p.gross_monthly), Some(dec("2000")));
        assert!(curve.next().is_none());
    }

    #[test]
    fn test_zero_steps_yields_single_point() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let points = salary_curve(dec("2500"), dec("9000"), 0, &params, &config);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].gross_monthly, dec("2500"));
    }

    #[test]
    fn test_widest_curve_is_sized_without_overflow() {
        let config = bundle();
        let params = TaxCalculationParams::default();
        let mut curve = SalaryCurve::new(dec("1000"), dec("5000"), u32::MAX, &params, &config);

        let points: Vec<_> = curve.by_ref().take(3).collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].gross_monthly, dec("1000"));
        assert!(points[1].gross_monthly > points[0].gross_monthly);

        let remaining = u64::from(u32::MAX) + 1 - 3;
        assert_eq!(curve.size_hint().0 as u64, remaining);
    }
}
