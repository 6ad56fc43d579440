use std::sync::Arc;

use crate::infra::{render_outcome, ConsoleNotifier, InMemoryLeadRepository};
use crm_qualification::error::AppError;
use crm_qualification::qualification::{
    EvaluationConfig, LeadQualificationService, LeadRecord, LeadRepository, LeadServiceError,
    LeadStatus,
};

/// Labour law lead whose mandatory boxes are ticked in a later edit.
fn demo_lead() -> LeadRecord {
    LeadRecord::new()
        .with("custom_vertical", "Labour Law Advisory & Compliance")
        .with("custom_sub_vertical", "Payroll Compliance")
        .with("custom_scope_of_enquiry", true)
        .with("custom_not_a_sub_contracting_lead", true)
        .with("custom_turnover_in_inr", "50 Cr to 200 Cr")
}

pub(crate) fn run_demo(config: EvaluationConfig) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(ConsoleNotifier::default());
    let service = LeadQualificationService::new(repository.clone(), notifier.clone(), config);

    println!("Lead qualification demo");
    let created = service.create(demo_lead())?;
    let id = created.lead.id.clone();
    println!("- Created {id} with status {}", display_status(created.lead.status()));
    if let Some(validation) = &created.validation {
        render_outcome(&validation.evaluation);
    }

    println!("\n- Sales marks the lead Qualified before grievances are excluded");
    let mut attempt = service.get(&id)?.record;
    attempt.set_status(&LeadStatus::Qualified);
    match service.save(&id, attempt, false) {
        Err(LeadServiceError::Rejected { failure, record }) => {
            println!("  Save blocked: {failure}");
            println!("  Form reverted to {}", display_status(record.status()));
        }
        Ok(saved) => println!("  Unexpectedly saved as {}", display_status(saved.lead.status())),
        Err(err) => return Err(err.into()),
    }

    println!("\n- Grievance exclusion confirmed; score refreshed");
    let mut edited = service.get(&id)?;
    edited.record.set("custom_exclusion_of_personal_grievances", true);
    repository.update(edited).map_err(LeadServiceError::from)?;
    if let Some(outcome) = service.refresh(&id)? {
        println!("  {}", outcome.summary());
    }

    println!("\n- Sales marks the lead Qualified again");
    let mut attempt = service.get(&id)?.record;
    attempt.set_status(&LeadStatus::Qualified);
    let saved = service.save(&id, attempt, false)?;
    println!("  Stored status: {}", display_status(saved.lead.status()));

    println!("\n- Someone tries to reopen the converted lead as Unqualified");
    let mut attempt = saved.lead.record.clone();
    attempt.set_status(&LeadStatus::Unqualified);
    if let Err(err) = service.save(&id, attempt, false) {
        println!("  {err}");
    }

    let stored = service.get(&id)?;
    println!(
        "\nFinal: {} status {} score {} ({} notices delivered)",
        stored.id,
        display_status(stored.status()),
        stored
            .record
            .score()
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string()),
        notifier.delivered()
    );
    match serde_json::to_string_pretty(&stored.record) {
        Ok(json) => println!("Stored record:\n{json}"),
        Err(err) => println!("Stored record unavailable: {err}"),
    }

    Ok(())
}

fn display_status(status: Option<LeadStatus>) -> String {
    status
        .map(|status| status.to_string())
        .unwrap_or_else(|| "(none)".to_string())
}
