use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::infra::{
    indicator_label, parse_status, parse_vertical, read_record, render_notice, render_outcome,
    resolve_vertical,
};
use crm_qualification::error::AppError;
use crm_qualification::qualification::catalog::{
    cascade_issues, shows_sub_service, sub_service_options, sub_vertical_options,
    vertical_labels,
};
use crm_qualification::qualification::{
    read_leads, CriterionRule, CriterionTable, EvaluationEngine, LeadRecord, LeadStatus,
    QualificationNotice, StatusTransitionGuard, TransitionVerdict, ValidationContext,
    ValidationOutcome, Vertical,
};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON lead record (field name -> value); `-` reads stdin
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Score against this vertical instead of the record's custom_vertical
    #[arg(long, value_parser = parse_vertical)]
    pub(crate) vertical: Option<Vertical>,
    /// Print the evaluation outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON lead record carrying the status being saved; `-` reads stdin
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Status the lead held when it was last persisted
    #[arg(long, value_parser = parse_status)]
    pub(crate) previous_status: Option<LeadStatus>,
    /// Skip the failure notice (already shown for this save attempt)
    #[arg(long)]
    pub(crate) suppress_duplicate_message: bool,
    /// Print the verdict and updated record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export of leads, header row holding field names
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write the scored CSV (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct TablesArgs {
    /// Only show this vertical's table
    #[arg(long, value_parser = parse_vertical)]
    pub(crate) vertical: Option<Vertical>,
    /// Print the tables as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Only show this vertical's options (scored or not)
    #[arg(long)]
    pub(crate) vertical: Option<String>,
}

pub(crate) fn evaluate(engine: &EvaluationEngine, args: EvaluateArgs) -> Result<(), AppError> {
    let mut record = read_record(&args.record)?;
    let vertical = resolve_vertical(args.vertical, &record)?;
    let outcome = engine.evaluate(vertical, &mut record);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if !outcome.applied {
        println!(
            "Record belongs to '{}', not {vertical}; nothing evaluated.",
            record.vertical_label().unwrap_or_default()
        );
        return Ok(());
    }
    render_outcome(&outcome);
    Ok(())
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    vertical: &'a str,
    score: Option<u32>,
    display_max: Option<u32>,
    verdict: &'static str,
    status: Option<String>,
    failure: Option<String>,
    notice: Option<&'a QualificationNotice>,
    record: &'a LeadRecord,
}

/// Guard result for one record; `outcome` is `None` for verticals without a criterion table.
struct GuardRun {
    vertical: String,
    outcome: Option<ValidationOutcome>,
    record: LeadRecord,
}

fn guard_record(
    guard: &StatusTransitionGuard,
    mut record: LeadRecord,
    context: &ValidationContext,
) -> Result<GuardRun, AppError> {
    let vertical = record.vertical_label().ok_or_else(|| {
        AppError::Usage("record has no custom_vertical to validate against".to_string())
    })?;
    let outcome = guard.validate_record(&mut record, context);
    Ok(GuardRun {
        vertical,
        outcome,
        record,
    })
}

impl GuardRun {
    fn verdict(&self) -> &'static str {
        match self.outcome.as_ref().map(|outcome| &outcome.verdict) {
            None | Some(TransitionVerdict::Skipped) => "skipped",
            Some(TransitionVerdict::Accepted {
                auto_converted: true,
                ..
            }) => "auto_converted",
            Some(TransitionVerdict::Accepted { .. }) => "accepted",
            Some(TransitionVerdict::Rejected(_)) => "rejected",
        }
    }

    fn status(&self) -> String {
        self.record
            .status()
            .map(|status| status.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    }

    fn report(&self) -> ValidationReport<'_> {
        let outcome = self.outcome.as_ref();
        ValidationReport {
            vertical: &self.vertical,
            score: outcome.map(|outcome| outcome.evaluation.score),
            display_max: outcome.map(|outcome| outcome.evaluation.display_max()),
            verdict: self.verdict(),
            status: self.record.status().map(|status| status.to_string()),
            failure: outcome
                .and_then(ValidationOutcome::failure)
                .map(ToString::to_string),
            notice: outcome.and_then(|outcome| outcome.notice.as_ref()),
            record: &self.record,
        }
    }

    fn render(&self) {
        let Some(outcome) = &self.outcome else {
            println!(
                "Vertical '{}' has no qualification criteria; save allowed with status {}",
                self.vertical,
                self.status()
            );
            return;
        };

        render_outcome(&outcome.evaluation);
        println!();
        if outcome.failure().is_none() {
            println!("Save {}; status now {}", self.verdict(), self.status());
        }
        if let Some(notice) = &outcome.notice {
            println!("Notice ({}):", indicator_label(notice.indicator));
            render_notice(notice, "  ");
        }
    }

    /// A blocked save becomes the command's error so the exit status reports it.
    fn into_result(self) -> Result<(), AppError> {
        match self.outcome.map(|outcome| outcome.verdict) {
            Some(TransitionVerdict::Rejected(failure)) => Err(AppError::Rejected(failure)),
            _ => Ok(()),
        }
    }
}

pub(crate) fn validate(
    guard: &StatusTransitionGuard,
    args: ValidateArgs,
) -> Result<(), AppError> {
    let record = read_record(&args.record)?;
    let context = ValidationContext {
        previous_status: args.previous_status,
        suppress_duplicate_message: args.suppress_duplicate_message,
    };

    let run = guard_record(guard, record, &context)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.report())?);
    } else {
        run.render();
    }
    run.into_result()
}

#[derive(Serialize)]
struct BatchRow {
    row: usize,
    vertical: String,
    score: Option<u32>,
    display_max: Option<u32>,
    qualifies: Option<bool>,
    reason: String,
    missing_mandatory: String,
    cascade_issues: String,
}

pub(crate) fn batch(engine: &EvaluationEngine, args: BatchArgs) -> Result<(), AppError> {
    let leads = read_leads(File::open(&args.input)?)?;
    let sink: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut qualified = 0;
    for (index, record) in leads.iter().enumerate() {
        let issues = cascade_issues(record)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        let row = match record.vertical() {
            Some(vertical) => {
                let outcome = engine.assess(vertical, record);
                let decision = outcome.decision();
                if decision.qualifies {
                    qualified += 1;
                }
                BatchRow {
                    row: index + 1,
                    vertical: vertical.label().to_string(),
                    score: Some(outcome.score),
                    display_max: Some(outcome.display_max()),
                    qualifies: Some(decision.qualifies),
                    reason: decision.reason.to_string(),
                    missing_mandatory: outcome.missing_mandatory.join("; "),
                    cascade_issues: issues,
                }
            }
            None => BatchRow {
                row: index + 1,
                vertical: record.vertical_label().unwrap_or_default(),
                score: None,
                display_max: None,
                qualifies: None,
                reason: "unscored_vertical".to_string(),
                missing_mandatory: String::new(),
                cascade_issues: issues,
            },
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(leads = leads.len(), qualified, "batch scoring complete");
    Ok(())
}

pub(crate) fn tables(args: TablesArgs) -> Result<(), AppError> {
    let selected: Vec<&'static CriterionTable> = match args.vertical {
        Some(vertical) => vec![vertical.table()],
        None => Vertical::ALL.iter().map(|vertical| vertical.table()).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for table in selected {
        let policy = table.policy;
        println!(
            "{} ({}) minimum {} / display max {} / computed max {}{}",
            table.vertical,
            table.revision,
            policy.minimum_score,
            policy.display_max,
            table.max_score(),
            policy
                .auto_convert_at
                .map(|threshold| format!(" / auto-convert at {threshold}"))
                .unwrap_or_default()
        );
        for criterion in table.criteria {
            let marker = if criterion.is_mandatory() { "*" } else { " " };
            println!(
                " {marker} {:<40} {:>2} pts  {}",
                criterion.label,
                criterion.max_points(),
                describe_rule(&criterion.rule)
            );
        }
        println!();
    }
    println!("* mandatory");
    Ok(())
}

fn describe_rule(rule: &CriterionRule) -> String {
    match rule {
        CriterionRule::Present { field, .. } => format!("{field} set"),
        CriterionRule::OneOf {
            field, accepted, ..
        } => format!("{field} in [{}]", accepted.join(", ")),
        CriterionRule::Tiered { field, tiers } => format!(
            "{field}: {}",
            tiers
                .iter()
                .map(|tier| format!("{:?}={}", tier.label, tier.points))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        CriterionRule::MinimumYearsSince { field, years, .. } => {
            format!("reference year - {field} >= {years}")
        }
        CriterionRule::AtLeast { field, minimum, .. } => format!("{field} >= {minimum}"),
        CriterionRule::GreaterThan { field, bound, .. } => format!("{field} > {bound}"),
    }
}

pub(crate) fn catalog(args: CatalogArgs) -> Result<(), AppError> {
    let verticals: Vec<String> = match args.vertical {
        Some(vertical) => {
            if sub_vertical_options(&vertical).is_empty() {
                return Err(AppError::Usage(format!("unknown vertical '{vertical}'")));
            }
            vec![vertical]
        }
        None => vertical_labels().map(str::to_string).collect(),
    };

    for vertical in verticals {
        let scored = if Vertical::from_label(&vertical).is_some() {
            ""
        } else {
            " (not scored)"
        };
        println!("{vertical}{scored}");
        for sub_vertical in sub_vertical_options(&vertical) {
            println!("  - {sub_vertical}");
            if shows_sub_service(sub_vertical) {
                for sub_service in sub_service_options(sub_vertical) {
                    println!("      . {sub_service}");
                }
            }
        }
    }
    Ok(())
}
