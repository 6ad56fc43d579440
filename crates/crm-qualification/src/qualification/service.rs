use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::warn;

use super::domain::{LeadId, LeadRecord, LeadStatus};
use super::evaluation::{EvaluationConfig, EvaluationEngine, EvaluationOutcome};
use super::guard::{StatusTransitionGuard, ValidationContext, ValidationFailure, ValidationOutcome};
use super::repository::{
    LeadRepository, NotifyError, QualificationNotifier, RepositoryError, StoredLead,
};

/// Service composing the evaluator, the transition guard, storage, and notices.
pub struct LeadQualificationService<R, N> {
    guard: Arc<StatusTransitionGuard>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Result of a save that the guard let through.
#[derive(Debug, Clone)]
pub struct SavedLead {
    pub lead: StoredLead,
    /// `None` when the lead belongs to a vertical without a criterion table.
    pub validation: Option<ValidationOutcome>,
}

impl<R, N> LeadQualificationService<R, N>
where
    R: LeadRepository + 'static,
    N: QualificationNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: EvaluationConfig) -> Self {
        let guard = StatusTransitionGuard::new(EvaluationEngine::new(config));
        Self {
            guard: Arc::new(guard),
            repository,
            notifier,
        }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        self.guard.engine()
    }

    /// Register a new lead. Status defaults to `Unqualified`; a lead created directly as
    /// `Qualified` or `Converted` must pass the same gate as a save.
    pub fn create(&self, mut record: LeadRecord) -> Result<SavedLead, LeadServiceError> {
        if record.status().is_none() {
            record.set_status(&LeadStatus::Unqualified);
        }

        let validation = self.check(&LeadId::draft(), &mut record, &ValidationContext::default())?;

        let id = next_lead_id();
        let lead = self
            .repository
            .insert(StoredLead { id, record })
            .inspect_err(|err| warn!(error = %err, "failed to insert lead"))?;

        self.publish(&lead.id, validation.as_ref())?;
        Ok(SavedLead { lead, validation })
    }

    /// Re-score a stored lead after one of its fields changed, persisting score and flags.
    ///
    /// Status is left alone; only [`save`](Self::save) moves it.
    pub fn refresh(&self, id: &LeadId) -> Result<Option<EvaluationOutcome>, LeadServiceError> {
        let mut lead = self.fetch(id)?;
        let Some(outcome) = self.engine().evaluate_record(&mut lead.record) else {
            return Ok(None);
        };

        self.repository
            .update(lead)
            .inspect_err(|err| warn!(lead = %id, error = %err, "failed to persist refreshed score"))?;
        Ok(Some(outcome))
    }

    /// Validate and persist an edited lead.
    ///
    /// The previously persisted status feeds the transition guard. Nothing is written when
    /// the guard blocks the save; the rejected record (status forced to `Unqualified` where
    /// the gate requires it) is handed back in the error.
    pub fn save(
        &self,
        id: &LeadId,
        mut record: LeadRecord,
        suppress_duplicate_message: bool,
    ) -> Result<SavedLead, LeadServiceError> {
        let existing = self.fetch(id)?;
        let context = ValidationContext {
            previous_status: existing.status(),
            suppress_duplicate_message,
        };

        let validation = self.check(id, &mut record, &context)?;

        let lead = StoredLead {
            id: id.clone(),
            record,
        };
        self.repository
            .update(lead.clone())
            .inspect_err(|err| warn!(lead = %id, error = %err, "failed to persist lead"))?;

        self.publish(id, validation.as_ref())?;
        Ok(SavedLead { lead, validation })
    }

    pub fn get(&self, id: &LeadId) -> Result<StoredLead, LeadServiceError> {
        self.fetch(id)
    }

    fn fetch(&self, id: &LeadId) -> Result<StoredLead, LeadServiceError> {
        let lead = self
            .repository
            .fetch(id)
            .inspect_err(|err| warn!(lead = %id, error = %err, "failed to load lead"))?
            .ok_or(RepositoryError::NotFound)?;
        Ok(lead)
    }

    /// Run the guard; rejected attempts publish their notice and come back as errors.
    fn check(
        &self,
        id: &LeadId,
        record: &mut LeadRecord,
        context: &ValidationContext,
    ) -> Result<Option<ValidationOutcome>, LeadServiceError> {
        let Some(validation) = self.guard.validate_record(record, context) else {
            return Ok(None);
        };

        if let Some(failure) = validation.failure() {
            self.publish(id, Some(&validation))?;
            return Err(LeadServiceError::Rejected {
                failure: failure.clone(),
                record: Box::new(record.clone()),
            });
        }

        Ok(Some(validation))
    }

    fn publish(
        &self,
        id: &LeadId,
        validation: Option<&ValidationOutcome>,
    ) -> Result<(), LeadServiceError> {
        if let Some(notice) = validation.and_then(|outcome| outcome.notice.as_ref()) {
            self.notifier
                .notify(id, notice)
                .inspect_err(|err| warn!(lead = %id, error = %err, "failed to deliver notice"))?;
        }
        Ok(())
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("save rejected: {failure}")]
    Rejected {
        failure: ValidationFailure,
        record: Box<LeadRecord>,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
