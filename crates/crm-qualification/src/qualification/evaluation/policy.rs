use std::fmt;

use serde::{Deserialize, Serialize};

use crate::qualification::domain::Vertical;

/// Whether a lead may advance past `Unqualified`, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationDecision {
    pub qualifies: bool,
    pub reason: DecisionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    MissingMandatory,
    ScoreTooLow,
    Qualifies,
}

impl DecisionReason {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionReason::MissingMandatory => "missing_mandatory",
            DecisionReason::ScoreTooLow => "score_too_low",
            DecisionReason::Qualifies => "qualifies",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mandatory criteria are checked first and independently of the score.
pub fn decide(vertical: Vertical, score: u32, mandatory_ok: bool) -> QualificationDecision {
    let reason = if !mandatory_ok {
        DecisionReason::MissingMandatory
    } else if score < vertical.policy().minimum_score {
        DecisionReason::ScoreTooLow
    } else {
        DecisionReason::Qualifies
    };

    QualificationDecision {
        qualifies: reason == DecisionReason::Qualifies,
        reason,
    }
}
