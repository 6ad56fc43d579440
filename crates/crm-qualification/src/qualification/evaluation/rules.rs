use super::config::LabelMatching;
use crate::qualification::criteria::{Criterion, CriterionRule, MandatoryBasis};
use crate::qualification::domain::{format_number, LeadRecord};

/// Inputs resolved once per evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleContext {
    pub reference_year: i32,
    pub matching: LabelMatching,
}

/// Outcome of applying one criterion to a record, without side effects.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Judgement {
    pub input_present: bool,
    /// Value echoed back in the breakdown, if the rule has one worth showing.
    pub shown: Option<String>,
    pub satisfied: bool,
    pub points: u32,
}

impl Judgement {
    fn not_provided() -> Self {
        Self {
            input_present: false,
            shown: None,
            satisfied: false,
            points: 0,
        }
    }

    fn scored(shown: Option<String>, points: u32) -> Self {
        Self {
            input_present: true,
            shown,
            satisfied: points > 0,
            points,
        }
    }

    fn unmet(shown: Option<String>) -> Self {
        Self::scored(shown, 0)
    }
}

pub(crate) fn judge(criterion: &Criterion, record: &LeadRecord, ctx: &RuleContext) -> Judgement {
    let field = criterion.input_field();
    if !record.is_truthy(field) {
        return Judgement::not_provided();
    }

    match criterion.rule {
        CriterionRule::Present { points, .. } => Judgement::scored(None, points),
        CriterionRule::OneOf {
            accepted, points, ..
        } => {
            let value = record.text(field);
            let hit = value.as_deref().is_some_and(|value| {
                accepted
                    .iter()
                    .any(|label| ctx.matching.matches(value, label))
            });
            if hit {
                Judgement::scored(value, points)
            } else {
                Judgement::unmet(value)
            }
        }
        CriterionRule::Tiered { tiers, .. } => {
            let value = record.text(field);
            let points = value.as_deref().and_then(|value| {
                tiers
                    .iter()
                    .find(|tier| ctx.matching.matches(value, tier.label))
                    .map(|tier| tier.points)
            });
            Judgement::scored(value, points.unwrap_or(0))
        }
        // The label already states the age bound, so no value is echoed.
        CriterionRule::MinimumYearsSince { years, points, .. } => match record.number(field) {
            Some(established) if f64::from(ctx.reference_year) - established >= f64::from(years) => {
                Judgement::scored(None, points)
            }
            _ => Judgement::unmet(None),
        },
        CriterionRule::AtLeast {
            minimum, points, ..
        } => threshold(record, field, points, |value| value >= minimum),
        CriterionRule::GreaterThan { bound, points, .. } => {
            threshold(record, field, points, |value| value > bound)
        }
    }
}

fn threshold(
    record: &LeadRecord,
    field: &str,
    points: u32,
    holds: impl Fn(f64) -> bool,
) -> Judgement {
    match record.number(field) {
        Some(value) => {
            let shown = Some(format_number(value));
            if holds(value) {
                Judgement::scored(shown, points)
            } else {
                Judgement::unmet(shown)
            }
        }
        None => Judgement::unmet(record.text(field)),
    }
}

/// Label to report when a mandatory criterion blocks qualification, or `None` when it holds.
pub(crate) fn mandatory_gap(criterion: &Criterion, judgement: &Judgement) -> Option<&'static str> {
    let check = criterion.mandatory.as_ref()?;
    let holds = match check.basis {
        MandatoryBasis::Satisfied => judgement.satisfied,
        MandatoryBasis::InputPresent => judgement.input_present,
    };
    if holds {
        return None;
    }

    match (judgement.input_present, check.shortfall_label) {
        (true, Some(shortfall)) => Some(shortfall),
        _ => Some(check.label),
    }
}

/// "Company Age (≥3 years)" -> "Company Age".
fn without_bound(label: &str) -> &str {
    label.split_once(" (").map_or(label, |(name, _)| name)
}

pub(crate) fn display_line(criterion: &Criterion, judgement: &Judgement) -> String {
    let label = criterion.label;
    if judgement.satisfied {
        return match &judgement.shown {
            Some(value) => format!("✓ {label} ({value}): {} pts", judgement.points),
            None => format!("✓ {label}: {} pts", judgement.points),
        };
    }

    if !judgement.input_present {
        return match criterion.rule {
            CriterionRule::Present { .. } => format!("✗ {label}: 0 pts"),
            CriterionRule::MinimumYearsSince { .. } => {
                format!("✗ {}: Not provided", without_bound(label))
            }
            _ => format!("✗ {label}: Not provided"),
        };
    }

    if let CriterionRule::MinimumYearsSince { .. } = criterion.rule {
        return format!("✗ {}: 0 pts", label.replacen('≥', "<", 1));
    }

    match &judgement.shown {
        Some(value) => format!("✗ {label} ({value}): 0 pts"),
        None => format!("✗ {label}: 0 pts"),
    }
}
