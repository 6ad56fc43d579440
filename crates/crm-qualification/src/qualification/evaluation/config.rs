use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Evaluator settings shared across verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Year used for company-age criteria; the current local year when unset.
    pub reference_year: Option<i32>,
    pub label_matching: LabelMatching,
}

impl EvaluationConfig {
    pub fn with_reference_year(year: i32) -> Self {
        Self {
            reference_year: Some(year),
            ..Self::default()
        }
    }

    pub fn resolved_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| Local::now().date_naive().year())
    }
}

/// How categorical input values are compared with table labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMatching {
    /// Trimmed, case-sensitive equality.
    #[default]
    Exact,
    /// Case, dash style and whitespace are ignored.
    Normalized,
}

impl LabelMatching {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "normalized" | "normalised" => Some(Self::Normalized),
            _ => None,
        }
    }

    pub fn matches(self, input: &str, label: &str) -> bool {
        match self {
            LabelMatching::Exact => input.trim() == label,
            LabelMatching::Normalized => canonical_label(input) == canonical_label(label),
        }
    }
}

fn canonical_label(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| match ch {
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}
