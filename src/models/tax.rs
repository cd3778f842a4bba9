//! Tax calculation parameter and result models.
//!
//! [`TaxCalculationParams`] is the immutable input to the gross-to-net
//! calculator and [`TaxCalculationResult`] its complete output.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// German wage-tax class (Steuerklasse).
///
/// Serialized as the arabic digit string (`"1"` to `"6"`). Deserialization is
/// lenient: anything that cannot be parsed falls back to class I.
///
/// # Example
///
/// ```
/// use lohn_engine::models::TaxClass;
///
/// assert_eq!(TaxClass::parse_lenient("3"), TaxClass::III);
/// assert_eq!(TaxClass::parse_lenient("IV"), TaxClass::IV);
/// assert_eq!(TaxClass::parse_lenient("garbage"), TaxClass::I);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaxClass {
    /// Single, separated or divorced employees.
    #[default]
    I,
    /// Single parents with the relief amount.
    II,
    /// Married, partner in class V or without wages.
    III,
    /// Married, both partners with similar wages.
    IV,
    /// Married, partner in class III.
    V,
    /// Second and further employments.
    VI,
}

impl TaxClass {
    /// All tax classes in ascending order.
    pub const ALL: [TaxClass; 6] = [
        TaxClass::I,
        TaxClass::II,
        TaxClass::III,
        TaxClass::IV,
        TaxClass::V,
        TaxClass::VI,
    ];

    /// Parses a tax class, defaulting to class I for unparseable input.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Returns the arabic digit of the class.
    pub fn number(self) -> u8 {
        match self {
            TaxClass::I => 1,
            TaxClass::II => 2,
            TaxClass::III => 3,
            TaxClass::IV => 4,
            TaxClass::V => 5,
            TaxClass::VI => 6,
        }
    }
}

impl FromStr for TaxClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "I" => Ok(TaxClass::I),
            "2" | "II" => Ok(TaxClass::II),
            "3" | "III" => Ok(TaxClass::III),
            "4" | "IV" => Ok(TaxClass::IV),
            "5" | "V" => Ok(TaxClass::V),
            "6" | "VI" => Ok(TaxClass::VI),
            other => Err(EngineError::ValidationError {
                field: "tax_class".to_string(),
                message: format!("unknown tax class '{}'", other),
            }),
        }
    }
}

impl From<String> for TaxClass {
    fn from(value: String) -> Self {
        TaxClass::parse_lenient(&value)
    }
}

impl From<TaxClass> for String {
    fn from(value: TaxClass) -> Self {
        value.number().to_string()
    }
}

impl fmt::Display for TaxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roman = match self {
            TaxClass::I => "I",
            TaxClass::II => "II",
            TaxClass::III => "III",
            TaxClass::IV => "IV",
            TaxClass::V => "V",
            TaxClass::VI => "VI",
        };
        write!(f, "{}", roman)
    }
}

/// Legal area for social-insurance assessment ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// The former West German states.
    #[default]
    West,
    /// The former East German states including Berlin.
    East,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::West => write!(f, "west"),
            Region::East => write!(f, "east"),
        }
    }
}

/// Social-insurance regime selected by the monthly gross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentRegime {
    /// Marginal employment up to the minijob threshold.
    Minijob,
    /// Transitional range with sliding-scale contribution bases.
    Midijob,
    /// Flat-rate contributions on capped gross.
    Regular,
}

/// Input to the gross-to-net calculator.
///
/// Optional fields default when absent from JSON; the health-insurance
/// additional rate defaults to [`DEFAULT_HEALTH_ADDITIONAL_RATE`]. Negative
/// values in optional numeric fields are treated as zero by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationParams {
    /// Yearly gross salary in EUR.
    pub gross_salary_yearly: Decimal,
    /// Wage-tax class.
    #[serde(default)]
    pub tax_class: TaxClass,
    /// Number of child allowances (half allowances allowed, e.g. 0.5).
    #[serde(default)]
    pub child_allowances: Decimal,
    /// Whether church tax is levied.
    #[serde(default)]
    pub church_tax: bool,
    /// Church-tax rate in percent (8 or 9).
    #[serde(default)]
    pub church_tax_rate: Decimal,
    /// Health-insurance fund's additional rate in percent.
    #[serde(default = "default_health_additional_rate")]
    pub health_insurance_additional_rate: Decimal,
    /// Legal area for assessment ceilings.
    #[serde(default)]
    pub region: Region,
    /// Whether the childless care-insurance surcharge may apply.
    #[serde(default)]
    pub childless: bool,
    /// Age in completed years.
    #[serde(default = "default_age")]
    pub age: u32,
}

fn default_age() -> u32 {
    30
}

/// Health-insurance additional rate in percent assumed when none is given.
pub const DEFAULT_HEALTH_ADDITIONAL_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 1);

fn default_health_additional_rate() -> Decimal {
    DEFAULT_HEALTH_ADDITIONAL_RATE
}

impl Default for TaxCalculationParams {
    fn default() -> Self {
        Self {
            gross_salary_yearly: Decimal::ZERO,
            tax_class: TaxClass::I,
            child_allowances: Decimal::ZERO,
            church_tax: false,
            church_tax_rate: Decimal::ZERO,
            health_insurance_additional_rate: default_health_additional_rate(),
            region: Region::West,
            childless: false,
            age: default_age(),
        }
    }
}

impl TaxCalculationParams {
    /// Creates parameters for a yearly gross with all other fields defaulted.
    pub fn for_yearly_gross(gross_salary_yearly: Decimal) -> Self {
        Self {
            gross_salary_yearly,
            ..Self::default()
        }
    }

    /// Returns a copy with a different yearly gross.
    pub fn with_gross_yearly(&self, gross_salary_yearly: Decimal) -> Self {
        Self {
            gross_salary_yearly,
            ..self.clone()
        }
    }

    /// Returns a copy with a different monthly gross.
    pub fn with_gross_monthly(&self, gross_monthly: Decimal) -> Self {
        self.with_gross_yearly(gross_monthly * Decimal::from(12))
    }

    /// The monthly gross (yearly / 12).
    pub fn gross_monthly(&self) -> Decimal {
        self.gross_salary_yearly / Decimal::from(12)
    }

    /// Clamps negative numeric fields to zero.
    pub fn normalized(&self) -> Self {
        Self {
            gross_salary_yearly: self.gross_salary_yearly.max(Decimal::ZERO),
            child_allowances: self.child_allowances.max(Decimal::ZERO),
            church_tax_rate: self.church_tax_rate.max(Decimal::ZERO),
            health_insurance_additional_rate: self
                .health_insurance_additional_rate
                .max(Decimal::ZERO),
            ..self.clone()
        }
    }
}

/// Employee-side social-insurance contributions, yearly EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialContributions {
    /// Pension insurance (Rentenversicherung).
    pub pension: Decimal,
    /// Unemployment insurance (Arbeitslosenversicherung).
    pub unemployment: Decimal,
    /// Health insurance (Krankenversicherung).
    pub health: Decimal,
    /// Long-term care insurance (Pflegeversicherung).
    pub care: Decimal,
}

impl SocialContributions {
    /// Sum of all four branches.
    pub fn total(&self) -> Decimal {
        self.pension + self.unemployment + self.health + self.care
    }
}

/// Employer-side contributions, yearly EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Pension insurance share.
    pub pension: Decimal,
    /// Unemployment insurance share.
    pub unemployment: Decimal,
    /// Health insurance share.
    pub health: Decimal,
    /// Care insurance share.
    pub care: Decimal,
    /// Flat-rate wage tax paid by the employer (minijobs only).
    pub flat_tax: Decimal,
}

impl EmployerContributions {
    /// Sum of all employer-side amounts.
    pub fn total(&self) -> Decimal {
        self.pension + self.unemployment + self.health + self.care + self.flat_tax
    }
}

/// The complete result of a gross-to-net calculation.
///
/// Yearly figures unless the field name says otherwise. Amounts are not
/// rounded; two-decimal rounding is left to presentation.
///
/// Invariants: `net_yearly == gross_yearly - total_deductions` and
/// `employer_costs == gross_yearly + employer_contributions.total()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    /// The social-insurance regime that was applied.
    pub regime: EmploymentRegime,
    /// Yearly gross.
    pub gross_yearly: Decimal,
    /// Monthly gross.
    pub gross_monthly: Decimal,
    /// Taxable income after allowances, truncated to whole EUR.
    pub taxable_income: Decimal,
    /// Yearly wage tax (monthly table value × 12).
    pub income_tax: Decimal,
    /// Monthly wage tax as looked up in the table.
    pub income_tax_monthly: Decimal,
    /// Yearly solidarity surcharge.
    pub solidarity_tax: Decimal,
    /// Yearly church tax.
    pub church_tax: Decimal,
    /// Employee social-insurance contributions.
    pub employee_contributions: SocialContributions,
    /// Employer social-insurance contributions.
    pub employer_contributions: EmployerContributions,
    /// Income + solidarity + church tax.
    pub total_taxes: Decimal,
    /// Sum of employee contributions.
    pub total_social_contributions: Decimal,
    /// Taxes plus social contributions.
    pub total_deductions: Decimal,
    /// Yearly net.
    pub net_yearly: Decimal,
    /// Monthly net.
    pub net_monthly: Decimal,
    /// Gross plus employer contributions.
    pub employer_costs: Decimal,
}
