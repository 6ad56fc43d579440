use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadRecord, LeadStatus};
use super::guard::QualificationNotice;

/// A lead as persisted by the host system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLead {
    pub id: LeadId,
    pub record: LeadRecord,
}

impl StoredLead {
    pub fn status(&self) -> Option<LeadStatus> {
        self.record.status()
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, lead: StoredLead) -> Result<StoredLead, RepositoryError>;
    fn update(&self, lead: StoredLead) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("lead already exists")]
    Conflict,
    #[error("lead not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound surface for user-facing qualification messages (form pop-ups, chat, e-mail).
pub trait QualificationNotifier: Send + Sync {
    fn notify(&self, lead: &LeadId, notice: &QualificationNotice) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}
