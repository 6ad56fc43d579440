use chrono::{Datelike, Local};

use super::common::*;
use crate::qualification::domain::{FieldValue, LeadRecord, Vertical, SCORE_FIELD};
use crate::qualification::{DecisionReason, EvaluationConfig, EvaluationEngine, LabelMatching};

#[test]
fn permanent_scenario_scores_32_and_qualifies() {
    // Anchored on the wall clock the way the lead form is.
    let engine = EvaluationEngine::default();
    let current_year = Local::now().date_naive().year();
    let record = lead(Vertical::PermanentStaffing)
        .with("custom_company_establishment_year", current_year - 5)
        .with("custom_salary_offering", "20.01 and above")
        .with("website", "acme.com")
        .with("custom_recruitment_doability_approved", true);

    let outcome = engine.assess(Vertical::PermanentStaffing, &record);

    assert!(outcome.applied);
    assert_eq!(outcome.score, 32);
    assert!(outcome.mandatory_satisfied());
    assert!(outcome.decision().qualifies);
    assert_eq!(outcome.decision().reason, DecisionReason::Qualifies);
}

#[test]
fn evaluate_writes_flags_and_score_onto_record() {
    let engine = engine();
    let mut record = permanent_scenario();

    let outcome = engine.evaluate(Vertical::PermanentStaffing, &mut record);

    assert_eq!(record.get(SCORE_FIELD), Some(&FieldValue::Integer(32)));
    assert_eq!(record.score(), Some(outcome.score));
    assert_eq!(
        record.get("custom_company_age__3_years"),
        Some(&FieldValue::Integer(1))
    );
    assert_eq!(
        record.get("custom_eligible_mandate_ctc__6l"),
        Some(&FieldValue::Integer(1))
    );
    assert_eq!(
        record.get("custom_turnover__50_cr"),
        Some(&FieldValue::Integer(0))
    );
    assert_eq!(
        outcome.derived_flags.get("custom_recent_openings_60_days"),
        Some(&false)
    );
    assert_eq!(outcome.table_revision, "perm-2025.2");
}

#[test]
fn breakdown_follows_table_order_with_display_lines() {
    let outcome = engine().assess(Vertical::PermanentStaffing, &permanent_scenario());

    let ids: Vec<&str> = outcome
        .breakdown
        .iter()
        .map(|entry| entry.criterion_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "company_age",
            "salary_offering",
            "website",
            "recruitment_doability",
            "positions_open",
            "recruitment_volume",
            "company_type",
            "turnover",
            "jd_completeness",
        ]
    );

    assert_eq!(
        outcome.breakdown[0].display_label,
        "✓ Company Age (≥3 years): 6 pts"
    );
    assert_eq!(outcome.breakdown[2].display_label, "✓ Verified Website: 6 pts");
    assert_eq!(
        outcome.breakdown[4].display_label,
        "✗ Positions Open: Not provided"
    );
    assert_eq!(outcome.breakdown[8].display_label, "✗ JD Completeness: 0 pts");
    let total: u32 = outcome.breakdown.iter().map(|entry| entry.points).sum();
    assert_eq!(total, outcome.score);
}

#[test]
fn labour_law_mandatory_booleans_score_24() {
    let outcome = engine().assess(Vertical::LabourLawCompliance, &labour_law_scenario());

    assert_eq!(outcome.score, 24);
    assert!(outcome.decision().qualifies);
    assert_eq!(outcome.display_max(), 44);
    assert_eq!(
        outcome.summary(),
        "Labour Law Advisory & Compliance score 24 / 44 (qualifies, minimum 6)"
    );
}

#[test]
fn temporary_low_turnover_tier_contributes_zero_points() {
    let mut record = lead(Vertical::TemporaryStaffing).with("custom_turnover_in_inr", "Less than 50 Cr");

    let outcome = engine().evaluate(Vertical::TemporaryStaffing, &mut record);
    let turnover = outcome
        .breakdown
        .iter()
        .find(|entry| entry.criterion_id == "turnover")
        .expect("turnover entry");

    assert_eq!(turnover.points, 0);
    assert!(!turnover.satisfied);
    assert_eq!(turnover.display_label, "✗ Turnover (Less than 50 Cr): 0 pts");
    assert_eq!(
        record.get("custom_turnover_temp"),
        Some(&FieldValue::Integer(0))
    );
}

#[test]
fn every_maxed_lead_reaches_the_table_maximum() {
    let engine = engine();
    for vertical in Vertical::ALL {
        let outcome = engine.assess(vertical, &maxed(vertical));
        assert_eq!(outcome.score, vertical.table().max_score(), "{vertical}");
        assert!(outcome.missing_mandatory.is_empty(), "{vertical}");
        assert!(outcome.breakdown.iter().all(|entry| entry.satisfied));
        assert!(outcome.derived_flags.values().all(|set| *set));
    }
}

#[test]
fn empty_lead_scores_zero() {
    let engine = engine();
    for vertical in Vertical::ALL {
        let outcome = engine.assess(vertical, &lead(vertical));
        assert_eq!(outcome.score, 0, "{vertical}");
        assert!(!outcome.decision().qualifies);
        assert_eq!(outcome.decision().reason, DecisionReason::MissingMandatory);
    }
}

#[test]
fn other_vertical_is_skipped_without_side_effects() {
    let mut record = maxed(Vertical::Franchise);
    let before = record.clone();

    let outcome = engine().evaluate(Vertical::PermanentStaffing, &mut record);

    assert!(!outcome.applied);
    assert_eq!(outcome.score, 0);
    assert!(outcome.breakdown.is_empty());
    assert!(!outcome.mandatory_satisfied());
    assert!(!outcome.decision().qualifies);
    assert_eq!(record, before);
}

#[test]
fn evaluate_record_dispatches_on_vertical_field() {
    let engine = engine();
    let mut franchise = maxed(Vertical::Franchise);
    let outcome = engine
        .evaluate_record(&mut franchise)
        .expect("franchise is scored");
    assert_eq!(outcome.vertical, Vertical::Franchise);
    assert_eq!(outcome.score, 64);

    let mut talent = LeadRecord::new().with("custom_vertical", "Talent Management");
    assert!(engine.evaluate_record(&mut talent).is_none());
    assert!(talent.get(SCORE_FIELD).is_none());
}

#[test]
fn evaluation_is_idempotent() {
    let engine = engine();
    for vertical in Vertical::ALL {
        let mut record = maxed(vertical).with("custom_turnover_in_inr", "unknown band");
        let first = engine.evaluate(vertical, &mut record);
        let after_first = record.clone();
        let second = engine.evaluate(vertical, &mut record);

        assert_eq!(first, second, "{vertical}");
        assert_eq!(record, after_first, "{vertical}");
    }
}

#[test]
fn numeric_text_inputs_are_parsed() {
    let record = lead(Vertical::LearningAndDevelopment).with("no_of_employees", " 12 ");
    let outcome = engine().assess(Vertical::LearningAndDevelopment, &record);

    let participants = &outcome.breakdown[3];
    assert_eq!(participants.criterion_id, "participants");
    assert_eq!(participants.points, 7);
    assert_eq!(
        participants.display_label,
        "✓ Number of Employees / Participants (12): 7 pts"
    );
}

#[test]
fn normalized_matching_recovers_cosmetic_label_drift() {
    let record = lead(Vertical::PermanentStaffing).with("custom_turnover_in_inr", "50 Cr to 200 Cr");
    let offices = lead(Vertical::LabourLawCompliance).with("custom_no_of_officesplants", "3-10 Regional Presence");

    let exact = engine();
    assert_eq!(exact.assess(Vertical::PermanentStaffing, &record).score, 0);
    assert_eq!(exact.assess(Vertical::LabourLawCompliance, &offices).score, 0);

    let normalized = EvaluationEngine::new(EvaluationConfig {
        label_matching: LabelMatching::Normalized,
        ..evaluation_config()
    });
    assert_eq!(normalized.assess(Vertical::PermanentStaffing, &record).score, 8);
    assert_eq!(
        normalized.assess(Vertical::LabourLawCompliance, &offices).score,
        8
    );
}

#[test]
fn company_age_follows_configured_reference_year() {
    let record = lead(Vertical::PermanentStaffing).with("custom_company_establishment_year", 2021);

    let early = EvaluationEngine::new(EvaluationConfig::with_reference_year(2023));
    let later = EvaluationEngine::new(EvaluationConfig::with_reference_year(2024));

    assert_eq!(early.assess(Vertical::PermanentStaffing, &record).score, 0);
    assert_eq!(later.assess(Vertical::PermanentStaffing, &record).score, 6);
}
