//! Save-time status transition guard.
//!
//! Runs once per save attempt, after the latest field values are known:
//!
//! 1. A lead that was `Converted` may not be moved back to `Unqualified`.
//! 2. A lead asking for `Qualified` or `Converted` must pass the mandatory criteria and the
//!    vertical's minimum score; otherwise its status is forced back to `Unqualified` and the
//!    save is blocked.
//! 3. Verticals with an auto-convert threshold promote a `Qualified` lead straight to
//!    `Converted` once the score clears it.
//!
//! Rejections are the designed output of [`StatusTransitionGuard::validate`], not errors.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{LeadRecord, LeadStatus, Vertical};
use super::evaluation::{DecisionReason, EvaluationEngine, EvaluationOutcome};

const ILLEGAL_TRANSITION_MESSAGE: &str = "You cannot move a Converted lead back to Unqualified. \
     Please contact your administrator if you need to reverse this lead.";

/// Caller-held state for one save attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Status the lead held when it was last persisted.
    pub previous_status: Option<LeadStatus>,
    /// Skip the qualification-failure notice when the caller already showed it for this attempt.
    pub suppress_duplicate_message: bool,
}

impl ValidationContext {
    pub fn from_previous(previous_status: Option<LeadStatus>) -> Self {
        Self {
            previous_status,
            suppress_duplicate_message: false,
        }
    }
}

/// Blocking validation failures; each one aborts the save.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("invalid status change from {from} to {to}: {}", ILLEGAL_TRANSITION_MESSAGE)]
    IllegalTransition { from: LeadStatus, to: LeadStatus },
    #[error("lead unqualified, missing required criteria: {}", .missing.join(", "))]
    MissingMandatory { missing: Vec<String> },
    #[error("lead unqualified, score {score} / {display_max} is below the minimum of {minimum}")]
    ScoreTooLow {
        score: u32,
        minimum: u32,
        display_max: u32,
    },
}

impl ValidationFailure {
    /// Status written onto the record by the failure, if any.
    pub fn forced_status(&self) -> Option<LeadStatus> {
        match self {
            ValidationFailure::IllegalTransition { .. } => None,
            ValidationFailure::MissingMandatory { .. } | ValidationFailure::ScoreTooLow { .. } => {
                Some(LeadStatus::Unqualified)
            }
        }
    }

    pub fn reason(&self) -> Option<DecisionReason> {
        match self {
            ValidationFailure::IllegalTransition { .. } => None,
            ValidationFailure::MissingMandatory { .. } => Some(DecisionReason::MissingMandatory),
            ValidationFailure::ScoreTooLow { .. } => Some(DecisionReason::ScoreTooLow),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionVerdict {
    /// The record names another vertical; nothing was checked.
    Skipped,
    Accepted {
        status: Option<LeadStatus>,
        auto_converted: bool,
    },
    Rejected(ValidationFailure),
}

impl TransitionVerdict {
    pub fn blocks_save(&self) -> bool {
        matches!(self, TransitionVerdict::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeIndicator {
    Green,
    Red,
}

/// User-facing message produced by a save attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationNotice {
    pub title: String,
    pub lines: Vec<String>,
    pub indicator: NoticeIndicator,
}

impl QualificationNotice {
    fn red(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
            indicator: NoticeIndicator::Red,
        }
    }

    fn green(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
            indicator: NoticeIndicator::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub evaluation: EvaluationOutcome,
    pub verdict: TransitionVerdict,
    pub notice: Option<QualificationNotice>,
}

impl ValidationOutcome {
    pub fn blocks_save(&self) -> bool {
        self.verdict.blocks_save()
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        match &self.verdict {
            TransitionVerdict::Rejected(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusTransitionGuard {
    engine: EvaluationEngine,
}

impl StatusTransitionGuard {
    pub fn new(engine: EvaluationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Re-evaluate the lead and decide whether its pending status may be saved.
    ///
    /// The record is updated in place: derived flags and score always, status when the guard
    /// forces `Unqualified` or auto-converts.
    pub fn validate(
        &self,
        vertical: Vertical,
        record: &mut LeadRecord,
        context: &ValidationContext,
    ) -> ValidationOutcome {
        let ctx = self.engine.context();
        let evaluation = self.engine.evaluate_with(&ctx, vertical, record);
        if !evaluation.applied {
            return ValidationOutcome {
                evaluation,
                verdict: TransitionVerdict::Skipped,
                notice: None,
            };
        }

        let attempted = record.status();
        let policy = vertical.policy();

        if context.previous_status == Some(LeadStatus::Converted)
            && attempted == Some(LeadStatus::Unqualified)
        {
            info!(vertical = %vertical, "rejected Converted -> Unqualified transition");
            let failure = ValidationFailure::IllegalTransition {
                from: LeadStatus::Converted,
                to: LeadStatus::Unqualified,
            };
            // Never suppressed: the user must see why the save was refused.
            let notice = failure_notice(&failure);
            return ValidationOutcome {
                evaluation,
                verdict: TransitionVerdict::Rejected(failure),
                notice: Some(notice),
            };
        }

        let Some(status) = attempted.clone().filter(LeadStatus::requires_qualification) else {
            return ValidationOutcome {
                evaluation,
                verdict: TransitionVerdict::Accepted {
                    status: attempted,
                    auto_converted: false,
                },
                notice: None,
            };
        };

        let score = evaluation.score;
        let failure = if !evaluation.missing_mandatory.is_empty() {
            Some(ValidationFailure::MissingMandatory {
                missing: evaluation.missing_mandatory.clone(),
            })
        } else if score < policy.minimum_score {
            Some(ValidationFailure::ScoreTooLow {
                score,
                minimum: policy.minimum_score,
                display_max: policy.display_max,
            })
        } else {
            None
        };

        if let Some(failure) = failure {
            record.set_status(&LeadStatus::Unqualified);
            info!(
                vertical = %vertical,
                attempted = %status,
                score,
                reason = ?failure.reason(),
                "qualification gate forced lead to Unqualified"
            );
            let notice = (!context.suppress_duplicate_message).then(|| failure_notice(&failure));
            return ValidationOutcome {
                evaluation,
                verdict: TransitionVerdict::Rejected(failure),
                notice,
            };
        }

        if status == LeadStatus::Qualified
            && policy
                .auto_convert_at
                .is_some_and(|threshold| score >= threshold)
        {
            record.set_status(&LeadStatus::Converted);
            info!(vertical = %vertical, score, "lead auto-converted");
            let notice = QualificationNotice::green(
                "Lead Successfully Converted",
                vec![
                    format!("Final Score: {score} / {}", policy.display_max),
                    format!("{vertical} lead has met all qualification criteria"),
                ],
            );
            return ValidationOutcome {
                evaluation,
                verdict: TransitionVerdict::Accepted {
                    status: Some(LeadStatus::Converted),
                    auto_converted: true,
                },
                notice: Some(notice),
            };
        }

        let notice = (context.previous_status.as_ref() != Some(&status)).then(|| {
            QualificationNotice::green(
                "Lead Qualified",
                vec![format!("Score: {score} / {}", policy.display_max)],
            )
        });

        ValidationOutcome {
            evaluation,
            verdict: TransitionVerdict::Accepted {
                status: Some(status),
                auto_converted: false,
            },
            notice,
        }
    }

    /// Validate against whichever vertical the record names; unscored verticals are skipped.
    pub fn validate_record(
        &self,
        record: &mut LeadRecord,
        context: &ValidationContext,
    ) -> Option<ValidationOutcome> {
        let vertical = record.vertical()?;
        Some(self.validate(vertical, record, context))
    }
}

fn failure_notice(failure: &ValidationFailure) -> QualificationNotice {
    match failure {
        ValidationFailure::MissingMandatory { missing } => {
            let mut lines = vec!["Missing Required Criteria:".to_string()];
            lines.extend(missing.iter().cloned());
            QualificationNotice::red("Lead Unqualified", lines)
        }
        ValidationFailure::ScoreTooLow {
            score,
            minimum,
            display_max,
        } => QualificationNotice::red(
            "Lead Unqualified",
            vec![
                format!("Score: {score} / {display_max}"),
                format!("Minimum Required: {minimum}"),
            ],
        ),
        ValidationFailure::IllegalTransition { .. } => QualificationNotice::red(
            "Invalid Status Change",
            vec![ILLEGAL_TRANSITION_MESSAGE.to_string()],
        ),
    }
}
