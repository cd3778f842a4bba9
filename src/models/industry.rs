//! Closed enumerations used by the industry payroll modules.

use serde::{Deserialize, Serialize};

/// Industry whose supplemental-pay rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Construction main trade (Bauhauptgewerbe).
    Construction,
    /// Hotels and restaurants.
    Gastronomy,
    /// Hospital and care-home nursing.
    Nursing,
}

/// Construction trade group (Lohngruppe), ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeGroup {
    /// Lohngruppe 1: unskilled helper.
    Helper,
    /// Lohngruppe 2: construction worker.
    Builder,
    /// Lohngruppe 3: specialist worker.
    Specialist,
    /// Lohngruppe 4: skilled tradesperson.
    SkilledWorker,
    /// Lohngruppe 5: foreman.
    Foreman,
    /// Lohngruppe 6: site foreman.
    SiteForeman,
}

impl TradeGroup {
    /// All trade groups in ascending rank.
    pub const ALL: [TradeGroup; 6] = [
        TradeGroup::Helper,
        TradeGroup::Builder,
        TradeGroup::Specialist,
        TradeGroup::SkilledWorker,
        TradeGroup::Foreman,
        TradeGroup::SiteForeman,
    ];
}

/// Nursing qualification tier, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationTier {
    /// Nursing assistant.
    Assistant,
    /// Registered nurse.
    Nurse,
    /// Specialist nurse (e.g. intensive care).
    Specialist,
    /// Ward or team lead.
    Lead,
}

impl QualificationTier {
    /// All tiers in ascending rank.
    pub const ALL: [QualificationTier; 4] = [
        QualificationTier::Assistant,
        QualificationTier::Nurse,
        QualificationTier::Specialist,
        QualificationTier::Lead,
    ];
}

/// Shift type in a rotating nursing roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Early shift, no premium.
    Early,
    /// Late shift.
    Late,
    /// Night shift.
    Night,
}

/// Meal type for benefit-in-kind valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast.
    Breakfast,
    /// Lunch.
    Lunch,
    /// Dinner.
    Dinner,
}
