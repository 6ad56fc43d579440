use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::qualification::criteria::{Criterion, CriterionRule};
use crate::qualification::domain::{FieldValue, LeadId, LeadRecord, LeadStatus, Vertical};
use crate::qualification::domain::{STATUS_FIELD, VERTICAL_FIELD};
use crate::qualification::guard::{QualificationNotice, StatusTransitionGuard};
use crate::qualification::repository::{
    LeadRepository, NotifyError, QualificationNotifier, RepositoryError, StoredLead,
};
use crate::qualification::{EvaluationConfig, EvaluationEngine, LeadQualificationService};

pub(super) const REFERENCE_YEAR: i32 = 2025;

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig::with_reference_year(REFERENCE_YEAR)
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(evaluation_config())
}

pub(super) fn guard() -> StatusTransitionGuard {
    StatusTransitionGuard::new(engine())
}

pub(super) fn lead(vertical: Vertical) -> LeadRecord {
    LeadRecord::new().with(VERTICAL_FIELD, vertical.label())
}

pub(super) fn with_status(record: LeadRecord, status: LeadStatus) -> LeadRecord {
    record.with(STATUS_FIELD, status.label())
}

/// Permanent Staffing lead scoring 6 + 10 + 6 + 10 = 32 with every mandatory criterion met.
pub(super) fn permanent_scenario() -> LeadRecord {
    lead(Vertical::PermanentStaffing)
        .with("custom_company_establishment_year", REFERENCE_YEAR - 5)
        .with("custom_salary_offering", "20.01 and above")
        .with("website", "acme.com")
        .with("custom_recruitment_doability_approved", true)
}

/// Labour law lead with only its three mandatory checkboxes ticked: 9 + 6 + 9 = 24.
pub(super) fn labour_law_scenario() -> LeadRecord {
    lead(Vertical::LabourLawCompliance)
        .with("custom_scope_of_enquiry", true)
        .with("custom_exclusion_of_personal_grievances", true)
        .with("custom_not_a_sub_contracting_lead", true)
}

/// Input that earns a criterion its full points.
pub(super) fn best_value(criterion: &Criterion) -> FieldValue {
    match criterion.rule {
        CriterionRule::Present { .. } => FieldValue::Bool(true),
        CriterionRule::OneOf { accepted, .. } => FieldValue::text(accepted[0]),
        CriterionRule::Tiered { tiers, .. } => {
            let best = tiers
                .iter()
                .max_by_key(|tier| tier.points)
                .expect("tiered rule has tiers");
            FieldValue::text(best.label)
        }
        CriterionRule::MinimumYearsSince { years, .. } => {
            FieldValue::Integer(i64::from(REFERENCE_YEAR) - i64::from(years))
        }
        CriterionRule::AtLeast { minimum, .. } => FieldValue::Number(minimum),
        CriterionRule::GreaterThan { bound, .. } => FieldValue::Number(bound + 1.0),
    }
}

/// Lead satisfying every criterion of its vertical.
pub(super) fn maxed(vertical: Vertical) -> LeadRecord {
    let mut record = lead(vertical);
    for criterion in vertical.table().criteria {
        record.set(criterion.input_field(), best_value(criterion));
    }
    record
}

pub(super) fn build_service() -> (
    LeadQualificationService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        LeadQualificationService::new(repository.clone(), notifier.clone(), evaluation_config());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) leads: Arc<Mutex<HashMap<LeadId, StoredLead>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self, id: &LeadId) -> Option<StoredLead> {
        self.leads
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, lead: StoredLead) -> Result<StoredLead, RepositoryError> {
        let mut guard = self.leads.lock().expect("repository mutex poisoned");
        if guard.contains_key(&lead.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    fn update(&self, lead: StoredLead) -> Result<(), RepositoryError> {
        let mut guard = self.leads.lock().expect("repository mutex poisoned");
        guard.insert(lead.id.clone(), lead);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, RepositoryError> {
        let guard = self.leads.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<(LeadId, QualificationNotice)>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<(LeadId, QualificationNotice)> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

impl QualificationNotifier for MemoryNotifier {
    fn notify(&self, lead: &LeadId, notice: &QualificationNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push((lead.clone(), notice.clone()));
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _lead: StoredLead) -> Result<StoredLead, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _lead: StoredLead) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<StoredLead>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineNotifier;

impl QualificationNotifier for OfflineNotifier {
    fn notify(&self, _lead: &LeadId, _notice: &QualificationNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("desk offline".to_string()))
    }
}
