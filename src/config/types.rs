//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed rate bundle deserialized from one
//! YAML file per tax year. Rates are percentages, amounts are EUR.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{MealType, QualificationTier, Region, ShiftType, TaxClass, TradeGroup};

/// Metadata about the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Jurisdiction code (e.g. "DE").
    pub jurisdiction: String,
    /// Human-readable name of the rule set.
    pub name: String,
    /// URL of the official reference calculator.
    pub source_url: String,
}

/// One row of the monthly wage-tax table.
///
/// Classes I and IV share the `class_i` column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WageTaxRow {
    /// Upper salary bound of this row (inclusive).
    pub up_to: Decimal,
    /// Tax for classes I and IV.
    pub class_i: Decimal,
    /// Tax for class II.
    pub class_ii: Decimal,
    /// Tax for class III.
    pub class_iii: Decimal,
    /// Tax for class V.
    pub class_v: Decimal,
    /// Tax for class VI.
    pub class_vi: Decimal,
}

impl WageTaxRow {
    /// Returns the tax in the column for `tax_class`.
    pub fn tax_for(&self, tax_class: TaxClass) -> Decimal {
        match tax_class {
            TaxClass::I | TaxClass::IV => self.class_i,
            TaxClass::II => self.class_ii,
            TaxClass::III => self.class_iii,
            TaxClass::V => self.class_v,
            TaxClass::VI => self.class_vi,
        }
    }
}

/// Ordered wage-tax table, ascending by `up_to`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WageTaxTable {
    rows: Vec<WageTaxRow>,
}

impl WageTaxTable {
    /// Creates a table from rows; call [`WageTaxTable::validate`] before use.
    pub fn new(rows: Vec<WageTaxRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows in ascending order.
    pub fn rows(&self) -> &[WageTaxRow] {
        &self.rows
    }

    /// Checks the table is usable for lookup and extrapolation.
    ///
    /// Requires at least two rows, strictly increasing bounds, and
    /// non-decreasing tax in every column.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows.len() < 2 {
            return Err("wage tax table needs at least two rows".to_string());
        }
        for pair in self.rows.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.up_to <= prev.up_to {
                return Err(format!(
                    "wage tax table bounds must be strictly increasing ({} then {})",
                    prev.up_to, next.up_to
                ));
            }
            for class in TaxClass::ALL {
                if next.tax_for(class) < prev.tax_for(class) {
                    return Err(format!(
                        "wage tax for class {} decreases between {} and {}",
                        class, prev.up_to, next.up_to
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Solidarity surcharge parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SolidarityConfig {
    /// Yearly income tax below which no surcharge is due.
    pub free_threshold: Decimal,
    /// Surcharge rate in percent.
    pub rate: Decimal,
}

/// Wage-tax parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// Yearly work-expense allowance (Werbungskostenpauschale).
    pub work_expense_allowance: Decimal,
    /// Yearly special-expense allowance (Sonderausgabenpauschale).
    pub special_expense_allowance: Decimal,
    /// Yearly allowance per child (Kinderfreibetrag incl. BEA).
    pub child_allowance: Decimal,
    /// Solidarity surcharge.
    pub solidarity: SolidarityConfig,
    /// Monthly wage-tax table.
    pub wage_tax_table: WageTaxTable,
}

/// Employee/employer split of a contribution rate.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ContributionRates {
    /// Employee share in percent.
    pub employee: Decimal,
    /// Employer share in percent.
    pub employer: Decimal,
}

impl ContributionRates {
    /// Combined rate in percent.
    pub fn total(&self) -> Decimal {
        self.employee + self.employer
    }
}

/// Care-insurance rates.
#[derive(Debug, Clone, Deserialize)]
pub struct CareInsuranceRates {
    /// Employee share in percent, without surcharge.
    pub employee: Decimal,
    /// Employer share in percent.
    pub employer: Decimal,
    /// Surcharge for childless employees in percent (employee only).
    pub childless_surcharge: Decimal,
    /// Age from which the childless surcharge applies.
    pub surcharge_min_age: u32,
}

/// Yearly assessment ceilings of one legal area.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentCeilings {
    /// Ceiling for pension and unemployment insurance.
    pub pension_unemployment: Decimal,
    /// Ceiling for health and care insurance.
    pub health_care: Decimal,
}

/// Assessment ceilings by region.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalCeilings {
    /// West German states.
    pub west: AssessmentCeilings,
    /// East German states.
    pub east: AssessmentCeilings,
}

impl RegionalCeilings {
    /// Returns the ceilings for `region`.
    pub fn for_region(&self, region: Region) -> &AssessmentCeilings {
        match region {
            Region::West => &self.west,
            Region::East => &self.east,
        }
    }
}

/// Minijob parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MinijobConfig {
    /// Monthly earnings threshold (inclusive).
    pub threshold: Decimal,
    /// Employer flat-rate pension contribution in percent.
    pub employer_pension: Decimal,
    /// Employer flat-rate health contribution in percent.
    pub employer_health: Decimal,
    /// Employer flat wage tax in percent.
    pub employer_flat_tax: Decimal,
}

/// Midijob (transitional range) parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MidijobConfig {
    /// Monthly upper bound of the transitional range (inclusive).
    pub upper_bound: Decimal,
    /// Yearly factor F of the sliding-scale formula.
    pub factor: Decimal,
}

/// Social-insurance parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialInsuranceConfig {
    /// Pension insurance.
    pub pension: ContributionRates,
    /// Unemployment insurance.
    pub unemployment: ContributionRates,
    /// Health insurance general rate halves.
    pub health: ContributionRates,
    /// Care insurance.
    pub care: CareInsuranceRates,
    /// Yearly assessment ceilings.
    pub ceilings: RegionalCeilings,
    /// Minijob regime.
    pub minijob: MinijobConfig,
    /// Midijob regime.
    pub midijob: MidijobConfig,
}

/// Rules for tax-free Sunday, holiday and night bonuses (§3b EStG).
#[derive(Debug, Clone, Deserialize)]
pub struct SfnConfig {
    /// Hourly base rate up to which bonuses are tax-free.
    pub base_rate_cap: Decimal,
}

/// A rate that differs by region.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalRate {
    /// West German states.
    pub west: Decimal,
    /// East German states.
    pub east: Decimal,
}

impl RegionalRate {
    /// Returns the rate for `region`.
    pub fn for_region(&self, region: Region) -> Decimal {
        match region {
            Region::West => self.west,
            Region::East => self.east,
        }
    }
}

/// Hourly hazard bonuses in construction.
#[derive(Debug, Clone, Deserialize)]
pub struct HazardRates {
    /// Dirty work (Schmutzzulage).
    pub dirt: Decimal,
    /// Work at height (Höhenzulage).
    pub height: Decimal,
    /// Dangerous work (Gefahrenzulage).
    pub danger: Decimal,
}

/// Tariff hourly wages of one region by trade group.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeGroupWages {
    /// Lohngruppe 1.
    pub helper: Decimal,
    /// Lohngruppe 2.
    pub builder: Decimal,
    /// Lohngruppe 3.
    pub specialist: Decimal,
    /// Lohngruppe 4.
    pub skilled_worker: Decimal,
    /// Lohngruppe 5.
    pub foreman: Decimal,
    /// Lohngruppe 6.
    pub site_foreman: Decimal,
}

impl TradeGroupWages {
    /// Returns the hourly wage for `group`.
    pub fn wage(&self, group: TradeGroup) -> Decimal {
        match group {
            TradeGroup::Helper => self.helper,
            TradeGroup::Builder => self.builder,
            TradeGroup::Specialist => self.specialist,
            TradeGroup::SkilledWorker => self.skilled_worker,
            TradeGroup::Foreman => self.foreman,
            TradeGroup::SiteForeman => self.site_foreman,
        }
    }
}

/// Tariff hourly wages by region.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffWageTable {
    /// West German states.
    pub west: TradeGroupWages,
    /// East German states.
    pub east: TradeGroupWages,
}

impl TariffWageTable {
    /// Returns the hourly wage for a region and trade group.
    pub fn wage(&self, region: Region, group: TradeGroup) -> Decimal {
        match region {
            Region::West => self.west.wage(group),
            Region::East => self.east.wage(group),
        }
    }

    /// Checks wages rise strictly with rank and west exceeds east.
    pub fn validate(&self) -> Result<(), String> {
        for region in [Region::West, Region::East] {
            for pair in TradeGroup::ALL.windows(2) {
                let (lower, higher) = (pair[0], pair[1]);
                if self.wage(region, higher) <= self.wage(region, lower) {
                    return Err(format!(
                        "tariff wage for {:?} must exceed {:?} in the {} region",
                        higher, lower, region
                    ));
                }
            }
        }
        for group in TradeGroup::ALL {
            if self.wage(Region::West, group) <= self.wage(Region::East, group) {
                return Err(format!(
                    "west tariff wage for {:?} must exceed the east wage",
                    group
                ));
            }
        }
        Ok(())
    }
}

/// Construction industry parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstructionConfig {
    /// SOKA-BAU employer contribution rate in percent.
    pub soka_rate: RegionalRate,
    /// Annual vacation entitlement in days.
    pub annual_vacation_days: Decimal,
    /// Working days per month used to derive the daily rate.
    pub working_days_per_month: Decimal,
    /// Additional vacation pay in percent.
    pub vacation_bonus: Decimal,
    /// Winter allowance per hour worked in the winter period.
    pub winter_allowance_per_hour: Decimal,
    /// Hourly hazard bonuses.
    pub hazard_rates: HazardRates,
    /// Tariff hourly wages.
    pub tariff_wages: TariffWageTable,
}

/// Meal benefit-in-kind values (Sachbezugswerte).
#[derive(Debug, Clone, Deserialize)]
pub struct MealValues {
    /// Value per breakfast.
    pub breakfast: Decimal,
    /// Value per lunch.
    pub lunch: Decimal,
    /// Value per dinner.
    pub dinner: Decimal,
}

impl MealValues {
    /// Returns the value of one meal of `meal` type.
    pub fn value(&self, meal: MealType) -> Decimal {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }
}

/// Gastronomy SFN bonus rates in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct GastronomySfnRates {
    /// Night work 20:00 to 24:00.
    pub night_early: Decimal,
    /// Night work 00:00 to 04:00.
    pub night_late: Decimal,
    /// Sunday work.
    pub sunday: Decimal,
    /// Public holiday work.
    pub holiday: Decimal,
}

/// Gastronomy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct GastronomyConfig {
    /// Meal values.
    pub meal_values: MealValues,
    /// SFN bonus rates.
    pub sfn_rates: GastronomySfnRates,
}

/// Hourly rates by nursing qualification tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierRates {
    /// Nursing assistant.
    pub assistant: Decimal,
    /// Registered nurse.
    pub nurse: Decimal,
    /// Specialist nurse.
    pub specialist: Decimal,
    /// Ward lead.
    pub lead: Decimal,
}

impl TierRates {
    /// Returns the hourly rate for `tier`.
    pub fn rate(&self, tier: QualificationTier) -> Decimal {
        match tier {
            QualificationTier::Assistant => self.assistant,
            QualificationTier::Nurse => self.nurse,
            QualificationTier::Specialist => self.specialist,
            QualificationTier::Lead => self.lead,
        }
    }

    /// Checks rates rise strictly with the tier.
    pub fn validate(&self) -> Result<(), String> {
        for pair in QualificationTier::ALL.windows(2) {
            if self.rate(pair[1]) <= self.rate(pair[0]) {
                return Err(format!(
                    "nursing rate for {:?} must exceed {:?}",
                    pair[1], pair[0]
                ));
            }
        }
        Ok(())
    }
}

/// Nursing SFN bonus rates in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct NursingSfnRates {
    /// Blended rate for all night hours.
    pub night: Decimal,
    /// Sunday work.
    pub sunday: Decimal,
    /// Public holiday work.
    pub holiday: Decimal,
    /// Christmas Eve from 14:00, Christmas Days, May 1st.
    pub christmas: Decimal,
}

/// Hourly shift allowances by shift type.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftAllowanceRates {
    /// Early shift.
    pub early: Decimal,
    /// Late shift.
    pub late: Decimal,
    /// Night shift.
    pub night: Decimal,
}

impl ShiftAllowanceRates {
    /// Returns the hourly allowance for `shift_type`.
    pub fn rate(&self, shift_type: ShiftType) -> Decimal {
        match shift_type {
            ShiftType::Early => self.early,
            ShiftType::Late => self.late,
            ShiftType::Night => self.night,
        }
    }
}

/// Nursing parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct NursingConfig {
    /// Hourly rates by qualification tier.
    pub tier_rates: TierRates,
    /// SFN bonus rates.
    pub sfn_rates: NursingSfnRates,
    /// Hourly shift allowances.
    pub shift_allowances: ShiftAllowanceRates,
    /// Default on-call percentage of the hourly rate.
    pub on_call_percent: Decimal,
}

/// Sick pay parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SickPayConfig {
    /// Divisor turning monthly into daily amounts.
    pub days_per_month: Decimal,
    /// Cap relative to daily gross in percent.
    pub gross_ratio: Decimal,
    /// Cap relative to daily net in percent.
    pub net_ratio: Decimal,
    /// Maximum benefit duration in weeks.
    pub max_duration_weeks: u32,
}

/// Maternity and parental benefit parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MaternityConfig {
    /// Divisor turning monthly into daily amounts.
    pub days_per_month: Decimal,
    /// Daily maternity pay covered by insurance.
    pub insurance_daily_cap: Decimal,
    /// Parental allowance as percent of monthly net.
    pub parental_benefit_rate: Decimal,
    /// Protection period before expected delivery in weeks.
    pub weeks_before_birth: u32,
    /// Protection period after delivery in weeks.
    pub weeks_after_birth: u32,
}

/// Short-time work parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortTimeWorkConfig {
    /// Benefit rate for employees with children in percent.
    pub rate_with_children: Decimal,
    /// Benefit rate for employees without children in percent.
    pub rate_without_children: Decimal,
    /// Smallest admissible working-time reduction in percent.
    pub minimum_reduction: Decimal,
}

/// Special payments parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialPaymentsConfig {
    /// Sick pay.
    pub sick_pay: SickPayConfig,
    /// Maternity and parental benefits.
    pub maternity: MaternityConfig,
    /// Short-time work.
    pub short_time_work: ShortTimeWorkConfig,
}

/// The complete rate bundle for one tax year.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearConfig {
    /// The tax year the bundle is effective from.
    pub year: i32,
    /// Wage tax.
    pub tax: TaxConfig,
    /// Social insurance.
    pub social_insurance: SocialInsuranceConfig,
    /// SFN bonus cap.
    pub sfn: SfnConfig,
    /// Construction industry.
    pub construction: ConstructionConfig,
    /// Gastronomy industry.
    pub gastronomy: GastronomyConfig,
    /// Nursing industry.
    pub nursing: NursingConfig,
    /// Special payments.
    pub special_payments: SpecialPaymentsConfig,
}

impl TaxYearConfig {
    /// Parses and validates a bundle from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: TaxYearConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the table invariants the calculators rely on.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidConfig {
            year: self.year,
            message,
        };

        self.tax.wage_tax_table.validate().map_err(invalid)?;
        self.construction.tariff_wages.validate().map_err(invalid)?;
        self.nursing.tier_rates.validate().map_err(invalid)?;

        let social = &self.social_insurance;
        if social.midijob.upper_bound <= social.minijob.threshold {
            return Err(invalid(format!(
                "midijob upper bound {} must exceed the minijob threshold {}",
                social.midijob.upper_bound, social.minijob.threshold
            )));
        }
        for region in [Region::West, Region::East] {
            let ceilings = social.ceilings.for_region(region);
            if ceilings.pension_unemployment <= Decimal::ZERO
                || ceilings.health_care <= Decimal::ZERO
            {
                return Err(invalid(format!(
                    "assessment ceilings for the {} region must be positive",
                    region
                )));
            }
        }
        if self.construction.working_days_per_month <= Decimal::ZERO {
            return Err(invalid(
                "construction working days per month must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// The complete engine configuration: metadata plus all year bundles.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    /// Bundles sorted oldest first.
    years: Vec<TaxYearConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, years: Vec<TaxYearConfig>) -> Self {
        let mut sorted_years = years;
        sorted_years.sort_by_key(|bundle| bundle.year);
        Self {
            metadata,
            years: sorted_years,
        }
    }

    /// Returns the metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all year bundles, oldest first.
    pub fn years(&self) -> &[TaxYearConfig] {
        &self.years
    }
}
