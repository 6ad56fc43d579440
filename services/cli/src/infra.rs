use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crm_qualification::error::AppError;
use crm_qualification::qualification::{
    BreakdownEntry, EvaluationOutcome, LeadId, LeadRecord, LeadRepository, LeadStatus,
    NoticeIndicator, NotifyError, QualificationNotice, QualificationNotifier, RepositoryError,
    StoredLead, Vertical,
};

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    leads: Arc<Mutex<HashMap<LeadId, StoredLead>>>,
}

impl LeadRepository for InMemoryLeadRepository {
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
        if guard.contains_key(&lead.id) {
            guard.insert(lead.id.clone(), lead);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, RepositoryError> {
        let guard = self.leads.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Prints notices the way the lead form would pop them up.
#[derive(Default, Clone)]
pub(crate) struct ConsoleNotifier {
    delivered: Arc<Mutex<usize>>,
}

impl ConsoleNotifier {
    pub(crate) fn delivered(&self) -> usize {
        *self.delivered.lock().expect("notice mutex poisoned")
    }
}

impl QualificationNotifier for ConsoleNotifier {
    fn notify(&self, lead: &LeadId, notice: &QualificationNotice) -> Result<(), NotifyError> {
        println!("  [{}] notice for {}", indicator_label(notice.indicator), lead);
        render_notice(notice, "    ");
        *self.delivered.lock().expect("notice mutex poisoned") += 1;
        Ok(())
    }
}

pub(crate) fn indicator_label(indicator: NoticeIndicator) -> &'static str {
    match indicator {
        NoticeIndicator::Green => "green",
        NoticeIndicator::Red => "red",
    }
}

pub(crate) fn render_notice(notice: &QualificationNotice, indent: &str) {
    println!("{indent}{}", notice.title);
    for line in &notice.lines {
        println!("{indent}  {line}");
    }
}

pub(crate) fn render_outcome(outcome: &EvaluationOutcome) {
    println!("{}", outcome.summary());
    println!("Table revision: {}", outcome.table_revision);
    println!("Breakdown:");
    for BreakdownEntry { display_label, .. } in &outcome.breakdown {
        println!("  {display_label}");
    }
    if outcome.missing_mandatory.is_empty() {
        println!("Mandatory criteria: all met");
    } else {
        println!("Missing mandatory criteria:");
        for label in &outcome.missing_mandatory {
            println!("  - {label}");
        }
    }
}

/// Read a JSON lead record from a file, or stdin when the path is `-`.
pub(crate) fn read_record(path: &Path) -> Result<LeadRecord, AppError> {
    let mut raw = String::new();
    if path == Path::new("-") {
        io::stdin().read_to_string(&mut raw)?;
    } else {
        File::open(path)?.read_to_string(&mut raw)?;
    }
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_vertical(raw: &str) -> Result<Vertical, String> {
    Vertical::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = Vertical::ALL.iter().map(|vertical| vertical.label()).collect();
        format!("'{raw}' is not a scored vertical (expected one of: {})", known.join(", "))
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<LeadStatus, String> {
    LeadStatus::from_label(raw).ok_or_else(|| "status must not be blank".to_string())
}

/// Vertical given on the command line, else the one the record names.
pub(crate) fn resolve_vertical(
    requested: Option<Vertical>,
    record: &LeadRecord,
) -> Result<Vertical, AppError> {
    if let Some(vertical) = requested {
        return Ok(vertical);
    }
    record.vertical().ok_or_else(|| {
        AppError::Usage(match record.vertical_label() {
            Some(label) => format!("vertical '{label}' has no qualification criteria"),
            None => "record has no custom_vertical; pass --vertical".to_string(),
        })
    })
}
