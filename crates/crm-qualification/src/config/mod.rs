use std::env;
use std::fmt;

use crate::qualification::{EvaluationConfig, LabelMatching};

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the qualification engine and its front ends.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub qualification: QualificationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_year = match env::var("QUALIFICATION_REFERENCE_YEAR") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<i32>()
                    .map_err(|source| ConfigError::InvalidReferenceYear { source })?,
            ),
            _ => None,
        };

        let label_matching = match env::var("QUALIFICATION_LABEL_MATCHING") {
            Ok(value) if !value.trim().is_empty() => LabelMatching::parse(&value)
                .ok_or(ConfigError::InvalidLabelMatching { value })?,
            _ => LabelMatching::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            qualification: QualificationSettings {
                reference_year,
                label_matching,
            },
        })
    }

    pub fn evaluation(&self) -> EvaluationConfig {
        EvaluationConfig::from(&self.qualification)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs feeding the evaluation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualificationSettings {
    /// Calendar year used for company-age criteria; the local year when unset.
    pub reference_year: Option<i32>,
    pub label_matching: LabelMatching,
}

impl From<&QualificationSettings> for EvaluationConfig {
    fn from(settings: &QualificationSettings) -> Self {
        EvaluationConfig {
            reference_year: settings.reference_year,
            label_matching: settings.label_matching,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReferenceYear { source: std::num::ParseIntError },
    InvalidLabelMatching { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReferenceYear { .. } => {
                write!(f, "QUALIFICATION_REFERENCE_YEAR must be a calendar year")
            }
            ConfigError::InvalidLabelMatching { value } => write!(
                f,
                "QUALIFICATION_LABEL_MATCHING must be 'exact' or 'normalized', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidReferenceYear { source } => Some(source),
            ConfigError::InvalidLabelMatching { .. } => None,
        }
    }
}
