mod config;
mod policy;
pub(crate) mod rules;

pub use config::{EvaluationConfig, LabelMatching};
pub use policy::{decide, DecisionReason, QualificationDecision};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{FieldValue, LeadRecord, Vertical, SCORE_FIELD};
use rules::{display_line, judge, mandatory_gap, RuleContext};

/// Stateless evaluator that applies a vertical's criterion table to a lead.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub(crate) fn context(&self) -> RuleContext {
        RuleContext {
            reference_year: self.config.resolved_year(),
            matching: self.config.label_matching,
        }
    }

    /// Score a lead without touching it.
    ///
    /// A record whose `custom_vertical` does not name `vertical` yields a skipped outcome with
    /// a zero score and an empty breakdown.
    pub fn assess(&self, vertical: Vertical, record: &LeadRecord) -> EvaluationOutcome {
        self.assess_with(&self.context(), vertical, record)
    }

    /// Score a lead and write the derived flags and score back onto it.
    pub fn evaluate(&self, vertical: Vertical, record: &mut LeadRecord) -> EvaluationOutcome {
        self.evaluate_with(&self.context(), vertical, record)
    }

    /// Evaluate against whichever vertical the record names; `None` for unscored verticals.
    pub fn evaluate_record(&self, record: &mut LeadRecord) -> Option<EvaluationOutcome> {
        let vertical = record.vertical()?;
        Some(self.evaluate(vertical, record))
    }

    pub(crate) fn assess_with(
        &self,
        ctx: &RuleContext,
        vertical: Vertical,
        record: &LeadRecord,
    ) -> EvaluationOutcome {
        let table = vertical.table();
        if record.vertical() != Some(vertical) {
            return EvaluationOutcome::skipped(vertical);
        }

        let mut score = 0;
        let mut breakdown = Vec::with_capacity(table.criteria.len());
        let mut derived_flags = BTreeMap::new();
        let mut gaps = Vec::new();

        for criterion in table.criteria {
            let judgement = judge(criterion, record, ctx);
            score += judgement.points;

            if let Some(flag) = criterion.flag_field {
                derived_flags.insert(flag.to_string(), judgement.satisfied);
            }
            if let Some(gap) = mandatory_gap(criterion, &judgement) {
                gaps.push((criterion.id, gap));
            }

            breakdown.push(BreakdownEntry {
                criterion_id: criterion.id.to_string(),
                label: criterion.label.to_string(),
                satisfied: judgement.satisfied,
                points: judgement.points,
                display_label: display_line(criterion, &judgement),
            });
        }

        let missing_mandatory = table
            .mandatory()
            .filter_map(|(criterion, _)| {
                gaps.iter()
                    .find(|(id, _)| *id == criterion.id)
                    .map(|(_, gap)| gap.to_string())
            })
            .collect();

        EvaluationOutcome {
            vertical,
            applied: true,
            table_revision: table.revision.to_string(),
            score,
            max_score: table.max_score(),
            breakdown,
            derived_flags,
            missing_mandatory,
        }
    }

    pub(crate) fn evaluate_with(
        &self,
        ctx: &RuleContext,
        vertical: Vertical,
        record: &mut LeadRecord,
    ) -> EvaluationOutcome {
        let outcome = self.assess_with(ctx, vertical, record);
        if !outcome.applied {
            return outcome;
        }

        for (flag, set) in &outcome.derived_flags {
            record.set(flag, FieldValue::flag(*set));
        }
        record.set(SCORE_FIELD, FieldValue::Integer(i64::from(outcome.score)));

        debug!(
            vertical = %vertical,
            score = outcome.score,
            missing = ?outcome.missing_mandatory,
            "lead evaluated"
        );

        outcome
    }
}

/// One line of the score breakdown, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub criterion_id: String,
    pub label: String,
    pub satisfied: bool,
    pub points: u32,
    pub display_label: String,
}

/// Evaluation output: the score, its breakdown, and the flags mirrored onto the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub vertical: Vertical,
    /// False when the record belongs to a different vertical.
    pub applied: bool,
    pub table_revision: String,
    pub score: u32,
    pub max_score: u32,
    pub breakdown: Vec<BreakdownEntry>,
    pub derived_flags: BTreeMap<String, bool>,
    /// Labels of mandatory criteria that are not met, in table order.
    pub missing_mandatory: Vec<String>,
}

impl EvaluationOutcome {
    fn skipped(vertical: Vertical) -> Self {
        let table = vertical.table();
        Self {
            vertical,
            applied: false,
            table_revision: table.revision.to_string(),
            score: 0,
            max_score: table.max_score(),
            breakdown: Vec::new(),
            derived_flags: BTreeMap::new(),
            missing_mandatory: Vec::new(),
        }
    }

    pub fn mandatory_satisfied(&self) -> bool {
        self.applied && self.missing_mandatory.is_empty()
    }

    pub fn decision(&self) -> QualificationDecision {
        decide(self.vertical, self.score, self.mandatory_satisfied())
    }

    pub fn display_max(&self) -> u32 {
        self.vertical.policy().display_max
    }

    pub fn summary(&self) -> String {
        let decision = self.decision();
        format!(
            "{} score {} / {} ({}, minimum {})",
            self.vertical,
            self.score,
            self.display_max(),
            if decision.qualifies {
                "qualifies"
            } else {
                "does not qualify"
            },
            self.vertical.policy().minimum_score
        )
    }
}
