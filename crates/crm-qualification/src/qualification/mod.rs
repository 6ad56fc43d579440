//! Per-vertical lead qualification: criterion tables, scoring, mandatory checks, and the
//! save-time status transition guard.
//!
//! The evaluator and guard are pure functions of the lead's field values plus an explicit
//! [`ValidationContext`]; persistence and user messaging are reached only through the
//! [`LeadRepository`] and [`QualificationNotifier`] traits used by the service facade.

pub mod catalog;
pub mod criteria;
pub mod domain;
pub mod evaluation;
pub mod guard;
pub mod import;
mod mandatory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use criteria::{
    table_for, Criterion, CriterionRule, CriterionTable, MandatoryBasis, MandatoryCheck, Tier,
    VerticalPolicy,
};
pub use domain::{FieldValue, LeadId, LeadRecord, LeadStatus, Vertical};
pub use evaluation::{
    decide, BreakdownEntry, DecisionReason, EvaluationConfig, EvaluationEngine,
    EvaluationOutcome, LabelMatching, QualificationDecision,
};
pub use guard::{
    NoticeIndicator, QualificationNotice, StatusTransitionGuard, TransitionVerdict,
    ValidationContext, ValidationFailure, ValidationOutcome,
};
pub use import::{read_leads, ImportError};
pub use repository::{
    LeadRepository, NotifyError, QualificationNotifier, RepositoryError, StoredLead,
};
pub use service::{LeadQualificationService, LeadServiceError, SavedLead};
