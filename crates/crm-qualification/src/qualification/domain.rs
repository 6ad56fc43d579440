use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field carrying the business line a lead belongs to.
pub const VERTICAL_FIELD: &str = "custom_vertical";
/// Field carrying the lead lifecycle status.
pub const STATUS_FIELD: &str = "status";
/// Score field shared by every vertical.
pub const SCORE_FIELD: &str = "custom_qualification_score";
pub const SUB_VERTICAL_FIELD: &str = "custom_sub_vertical";
pub const SUB_SERVICE_FIELD: &str = "custom_subservice";

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl LeadId {
    /// Addresses notices about a lead that has not been stored yet.
    pub fn draft() -> Self {
        Self("new-lead".to_string())
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw value held by a lead field as the host form delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn flag(set: bool) -> Self {
        FieldValue::Integer(i64::from(set))
    }

    /// Checkbox-style truthiness: empty, zero, false and null are all unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(value) => *value,
            FieldValue::Integer(value) => *value != 0,
            FieldValue::Number(value) => *value != 0.0 && !value.is_nan(),
            FieldValue::Text(value) => !value.trim().is_empty(),
            FieldValue::Null => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Number(value) if value.is_finite() => Some(*value),
            FieldValue::Text(value) => value.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(value) => Some(value.trim().to_string()),
            FieldValue::Integer(value) => Some(value.to_string()),
            FieldValue::Number(value) => Some(format_number(*value)),
            FieldValue::Bool(_) | FieldValue::Null => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One lead as a flat mapping of field name to value.
///
/// The host framework owns persistence; the qualification engine reads criterion inputs and
/// writes derived flags, the score, and (through the guard) the status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl LeadRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    pub fn is_truthy(&self, field: &str) -> bool {
        self.get(field).map(FieldValue::is_truthy).unwrap_or(false)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    /// Trimmed text form of a field; `None` when absent, blank, or boolean.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field)
            .and_then(FieldValue::as_text)
            .filter(|value| !value.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn vertical_label(&self) -> Option<String> {
        self.text(VERTICAL_FIELD)
    }

    /// Scored vertical of the record, if it names one.
    pub fn vertical(&self) -> Option<Vertical> {
        self.vertical_label()
            .and_then(|label| Vertical::from_label(&label))
    }

    pub fn status(&self) -> Option<LeadStatus> {
        self.text(STATUS_FIELD)
            .and_then(|label| LeadStatus::from_label(&label))
    }

    pub fn set_status(&mut self, status: &LeadStatus) {
        self.set(STATUS_FIELD, status.label());
    }

    pub fn score(&self) -> Option<u32> {
        self.number(SCORE_FIELD)
            .filter(|score| *score >= 0.0)
            .map(|score| score as u32)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for LeadRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Business lines that carry a qualification rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Vertical {
    #[serde(rename = "Permanent Staffing")]
    PermanentStaffing,
    #[serde(rename = "Temporary Staffing")]
    TemporaryStaffing,
    #[serde(rename = "Learning & Development")]
    LearningAndDevelopment,
    #[serde(rename = "Franchise")]
    Franchise,
    #[serde(rename = "Labour Law Advisory & Compliance")]
    LabourLawCompliance,
}

impl Vertical {
    pub const ALL: [Vertical; 5] = [
        Vertical::PermanentStaffing,
        Vertical::TemporaryStaffing,
        Vertical::LearningAndDevelopment,
        Vertical::Franchise,
        Vertical::LabourLawCompliance,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Vertical::PermanentStaffing => "Permanent Staffing",
            Vertical::TemporaryStaffing => "Temporary Staffing",
            Vertical::LearningAndDevelopment => "Learning & Development",
            Vertical::Franchise => "Franchise",
            Vertical::LabourLawCompliance => "Labour Law Advisory & Compliance",
        }
    }

    /// Exact (trimmed) match against the labels the host stores in `custom_vertical`.
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|vertical| vertical.label() == trimmed)
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lead lifecycle status as far as qualification is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    Unqualified,
    Qualified,
    Converted,
    /// Any other host status (pipeline stages, terminal opportunity states).
    Other(String),
}

impl LeadStatus {
    /// Parse a trimmed status label; blank input means "no status".
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "" => None,
            "Unqualified" => Some(LeadStatus::Unqualified),
            "Qualified" => Some(LeadStatus::Qualified),
            "Converted" => Some(LeadStatus::Converted),
            other => Some(LeadStatus::Other(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LeadStatus::Unqualified => "Unqualified",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Converted => "Converted",
            LeadStatus::Other(label) => label,
        }
    }

    /// Statuses that may only be held by a lead passing the qualification gate.
    pub fn requires_qualification(&self) -> bool {
        matches!(self, LeadStatus::Qualified | LeadStatus::Converted)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
