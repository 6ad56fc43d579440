//! End-to-end scenarios for the lead qualification workflow.
//!
//! Scenarios drive a lead through create, field refresh, and status saves using only the
//! public service facade, guard, and JSON record format.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crm_qualification::qualification::{
        EvaluationConfig, LeadId, LeadQualificationService, LeadRepository, NotifyError,
        QualificationNotice, QualificationNotifier, RepositoryError, StoredLead,
    };

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        leads: Mutex<HashMap<LeadId, StoredLead>>,
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

    #[derive(Default)]
    pub(super) struct RecordingNotifier {
        titles: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub(super) fn titles(&self) -> Vec<String> {
            self.titles.lock().expect("notice mutex poisoned").clone()
        }
    }

    impl QualificationNotifier for RecordingNotifier {
        fn notify(&self, _lead: &LeadId, notice: &QualificationNotice) -> Result<(), NotifyError> {
            self.titles
                .lock()
                .expect("notice mutex poisoned")
                .push(notice.title.clone());
            Ok(())
        }
    }

    pub(super) fn service() -> (
        LeadQualificationService<MemoryRepository, RecordingNotifier>,
        Arc<RecordingNotifier>,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LeadQualificationService::new(
            Arc::new(MemoryRepository::default()),
            notifier.clone(),
            EvaluationConfig::with_reference_year(2025),
        );
        (service, notifier)
    }
}

use common::service;
use crm_qualification::qualification::{
    LeadRecord, LeadServiceError, LeadStatus, StatusTransitionGuard, TransitionVerdict,
    ValidationContext, ValidationFailure, Vertical,
};

fn learning_lead() -> LeadRecord {
    serde_json::from_str(
        r#"{
            "custom_vertical": "Learning & Development",
            "custom_trainer_availability__scheduling_fit": 1,
            "custom_direct_delivery_no_subcontracting": true,
            "no_of_employees": "40",
            "custom_requested_training_timeline": "30 days to 60 Days"
        }"#,
    )
    .expect("valid lead json")
}

#[test]
fn learning_lead_walks_from_unqualified_to_converted() {
    let (service, notifier) = service();

    let created = service.create(learning_lead()).expect("lead created");
    let id = created.lead.id.clone();
    assert_eq!(created.lead.status(), Some(LeadStatus::Unqualified));
    assert_eq!(created.lead.record.score(), Some(33));

    let mut record = service.get(&id).expect("lead stored").record;
    record.set_status(&LeadStatus::Qualified);
    let qualified = service.save(&id, record, false).expect("qualifies");
    assert_eq!(qualified.lead.status(), Some(LeadStatus::Qualified));

    let mut record = qualified.lead.record.clone();
    record.set("custom_b2b_engagement", true);
    let converted = service.save(&id, record, false).expect("converts");
    assert_eq!(converted.lead.record.score(), Some(40));
    assert_eq!(converted.lead.status(), Some(LeadStatus::Converted));
    assert!(matches!(
        converted.validation.map(|outcome| outcome.verdict),
        Some(TransitionVerdict::Accepted {
            auto_converted: true,
            ..
        })
    ));

    let mut record = converted.lead.record.clone();
    record.set_status(&LeadStatus::Unqualified);
    match service.save(&id, record, false) {
        Err(LeadServiceError::Rejected {
            failure: ValidationFailure::IllegalTransition { .. },
            ..
        }) => {}
        other => panic!("expected illegal transition, got {other:?}"),
    }

    assert_eq!(
        service.get(&id).expect("lead stored").status(),
        Some(LeadStatus::Converted)
    );
    assert_eq!(
        notifier.titles(),
        vec![
            "Lead Qualified".to_string(),
            "Lead Successfully Converted".to_string(),
            "Invalid Status Change".to_string(),
        ]
    );
}

#[test]
fn guard_round_trips_record_json() {
    let guard = StatusTransitionGuard::default();
    let mut record = learning_lead();
    record.set_status(&LeadStatus::Qualified);

    let outcome = guard.validate(
        Vertical::LearningAndDevelopment,
        &mut record,
        &ValidationContext::default(),
    );
    assert!(!outcome.blocks_save());

    let json = serde_json::to_value(&record).expect("record serialises");
    assert_eq!(json["custom_qualification_score"], 33);
    assert_eq!(json["custom_number_of_employees__participants"], 1);
    assert_eq!(json["custom_urgency__timeline"], 1);
    assert_eq!(json["custom_turnover_ld"], 0);
    assert_eq!(json["status"], "Qualified");
}
