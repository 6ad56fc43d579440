//! Mandatory-criteria checks, independent of the total score.

use super::domain::{LeadRecord, Vertical};
use super::evaluation::rules::{judge, mandatory_gap, RuleContext};
use super::evaluation::EvaluationEngine;

impl EvaluationEngine {
    /// True when every mandatory criterion of `vertical` holds for the record.
    ///
    /// Records naming another vertical never pass.
    pub fn all_mandatory_satisfied(&self, vertical: Vertical, record: &LeadRecord) -> bool {
        record.vertical() == Some(vertical)
            && self
                .missing_with(&self.context(), vertical, record)
                .is_empty()
    }

    /// Labels of the mandatory criteria the record is missing, in table order.
    pub fn missing_mandatory(&self, vertical: Vertical, record: &LeadRecord) -> Vec<&'static str> {
        self.missing_with(&self.context(), vertical, record)
    }

    pub(crate) fn missing_with(
        &self,
        ctx: &RuleContext,
        vertical: Vertical,
        record: &LeadRecord,
    ) -> Vec<&'static str> {
        vertical
            .table()
            .mandatory()
            .filter_map(|(criterion, _)| mandatory_gap(criterion, &judge(criterion, record, ctx)))
            .collect()
    }
}
