//! Static criterion tables, one per scored vertical.
//!
//! Tables are plain data so they can be listed, serialised, and versioned independently of the
//! evaluator. Categorical labels are reproduced verbatim from the host form options, including
//! their inconsistent spacing and dashes.

mod franchise;
mod labour_law;
mod learning;
mod permanent;
mod temporary;

use serde::Serialize;

use super::domain::Vertical;

/// Ordered rule set for a single vertical.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CriterionTable {
    pub vertical: Vertical,
    pub revision: &'static str,
    pub policy: VerticalPolicy,
    /// Criterion ids of the mandatory checks, in the order they are reported as missing.
    pub mandatory_order: &'static [&'static str],
    pub criteria: &'static [Criterion],
}

impl CriterionTable {
    /// Upper bound of any score produced by this table.
    pub fn max_score(&self) -> u32 {
        self.criteria.iter().map(Criterion::max_points).sum()
    }

    /// Mandatory criteria in reporting order.
    pub fn mandatory(&self) -> impl Iterator<Item = (&'static Criterion, &'static MandatoryCheck)> {
        let criteria = self.criteria;
        self.mandatory_order.iter().filter_map(move |id| {
            let criterion = criteria.iter().find(|criterion| criterion.id == *id)?;
            criterion.mandatory.as_ref().map(|check| (criterion, check))
        })
    }

    pub fn criterion(&self, id: &str) -> Option<&'static Criterion> {
        self.criteria.iter().find(|criterion| criterion.id == id)
    }
}

/// Thresholds applied to a vertical's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerticalPolicy {
    pub minimum_score: u32,
    /// Denominator shown to users next to the score.
    pub display_max: u32,
    /// Score at which an attempted `Qualified` is promoted straight to `Converted`.
    pub auto_convert_at: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Criterion {
    pub id: &'static str,
    pub label: &'static str,
    pub rule: CriterionRule,
    /// Boolean field mirrored from this criterion's satisfaction on every evaluation.
    pub flag_field: Option<&'static str>,
    pub mandatory: Option<MandatoryCheck>,
}

impl Criterion {
    pub fn input_field(&self) -> &'static str {
        self.rule.field()
    }

    pub fn max_points(&self) -> u32 {
        self.rule.max_points()
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriterionRule {
    /// Satisfied when the field is truthy.
    Present { field: &'static str, points: u32 },
    /// Satisfied when the trimmed value is one of the accepted labels.
    OneOf {
        field: &'static str,
        accepted: &'static [&'static str],
        points: u32,
    },
    /// Trimmed value looked up in a label → points table.
    Tiered {
        field: &'static str,
        tiers: &'static [Tier],
    },
    /// Field holds a year; satisfied when the reference year is at least `years` later.
    MinimumYearsSince {
        field: &'static str,
        years: u32,
        points: u32,
    },
    AtLeast {
        field: &'static str,
        minimum: f64,
        points: u32,
    },
    GreaterThan {
        field: &'static str,
        bound: f64,
        points: u32,
    },
}

impl CriterionRule {
    pub fn field(&self) -> &'static str {
        match self {
            CriterionRule::Present { field, .. }
            | CriterionRule::OneOf { field, .. }
            | CriterionRule::Tiered { field, .. }
            | CriterionRule::MinimumYearsSince { field, .. }
            | CriterionRule::AtLeast { field, .. }
            | CriterionRule::GreaterThan { field, .. } => field,
        }
    }

    pub fn max_points(&self) -> u32 {
        match self {
            CriterionRule::Tiered { tiers, .. } => {
                tiers.iter().map(|tier| tier.points).max().unwrap_or(0)
            }
            CriterionRule::Present { points, .. }
            | CriterionRule::OneOf { points, .. }
            | CriterionRule::MinimumYearsSince { points, .. }
            | CriterionRule::AtLeast { points, .. }
            | CriterionRule::GreaterThan { points, .. } => *points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub label: &'static str,
    pub points: u32,
}

/// Requirement a mandatory criterion places on a lead before it may be qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MandatoryCheck {
    pub label: &'static str,
    pub basis: MandatoryBasis,
    /// Reported instead of `label` when an input is present but falls short.
    pub shortfall_label: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryBasis {
    /// The criterion itself must be satisfied.
    Satisfied,
    /// Only the raw input must be filled in.
    InputPresent,
}

pub(crate) const fn mandatory(label: &'static str) -> Option<MandatoryCheck> {
    Some(MandatoryCheck {
        label,
        basis: MandatoryBasis::Satisfied,
        shortfall_label: None,
    })
}

pub(crate) const fn mandatory_input(label: &'static str) -> Option<MandatoryCheck> {
    Some(MandatoryCheck {
        label,
        basis: MandatoryBasis::InputPresent,
        shortfall_label: None,
    })
}

pub(crate) const fn tier(label: &'static str, points: u32) -> Tier {
    Tier { label, points }
}

pub(crate) const COMPANY_TYPES: &[&str] = &["Private Limited", "Listed"];

/// Criterion table selected for a vertical.
pub fn table_for(vertical: Vertical) -> &'static CriterionTable {
    match vertical {
        Vertical::PermanentStaffing => &permanent::TABLE,
        Vertical::TemporaryStaffing => &temporary::TABLE,
        Vertical::LearningAndDevelopment => &learning::TABLE,
        Vertical::Franchise => &franchise::TABLE,
        Vertical::LabourLawCompliance => &labour_law::TABLE,
    }
}

impl Vertical {
    pub fn table(self) -> &'static CriterionTable {
        table_for(self)
    }

    pub fn policy(self) -> VerticalPolicy {
        table_for(self).policy
    }
}
