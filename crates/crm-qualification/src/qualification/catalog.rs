//! Vertical → sub-vertical → sub-service option lists shown on the lead form.
//!
//! Covers every vertical offered on the form, including "Talent Management", which has no
//! criterion table.

use super::domain::{LeadRecord, SUB_SERVICE_FIELD, SUB_VERTICAL_FIELD};

const SUB_VERTICALS: &[(&str, &[&str])] = &[
    (
        "Permanent Staffing",
        &["IT Recruitment", "Non IT Recruitment"],
    ),
    ("Talent Management", &["HR Consulting"]),
    (
        "Learning & Development",
        &["Posh training and compliance", "Corporate services", "Other"],
    ),
    (
        "Temporary Staffing",
        &[
            "General Staffing",
            "Technical Staffing",
            "Apprentice Staffing",
            "Specialised Staffing",
            "Managed Services",
        ],
    ),
    (
        "Labour Law Advisory & Compliance",
        &[
            "Labour Law advisory",
            "Registrations & Licenses",
            "Payroll Compliance",
            "Factory Compliance",
            "Apprenticeship Compliance ( NAPS & NATS )",
            "POSH Act Compliance",
            "Employer & Vendor's Compliance Audit",
            "Industrial Relations",
            "HR Operations Support",
        ],
    ),
    (
        "Franchise",
        &[
            "Total HR Solutions",
            "Staffing - Blue Collar Hiring",
            "Permanent Recruitment - Portal / White Collar Hiring",
            "Labour Law Compliance",
        ],
    ),
];

const SUB_SERVICES: &[(&str, &[&str])] = &[
    (
        "Posh training and compliance",
        &[
            "POSH Awareness (LMS)",
            "Posh Master Class",
            "Posh End-to-End Compliance",
            "Policy Drafting",
            "IC Committee Set Up",
            "IC Committee Refresher Training",
            "Posh Awareness",
        ],
    ),
    (
        "Corporate services",
        &[
            "Leadership Skills Training",
            "Functional Skills Training",
            "Technical Skills Training",
            "Soft Skills Training",
        ],
    ),
    (
        "Specialised Staffing",
        &["Gig Hiring", "PWD Hiring (Persons with Disabilities)"],
    ),
];

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> &'static [&'static str] {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, options)| *options)
        .unwrap_or(&[])
}

/// Every vertical label the form offers, scored or not.
pub fn vertical_labels() -> impl Iterator<Item = &'static str> {
    SUB_VERTICALS.iter().map(|(vertical, _)| *vertical)
}

/// Sub-verticals offered for a vertical label; empty for unknown labels.
pub fn sub_vertical_options(vertical: &str) -> &'static [&'static str] {
    lookup(SUB_VERTICALS, vertical.trim())
}

/// Sub-services offered for a sub-vertical label; empty when none apply.
pub fn sub_service_options(sub_vertical: &str) -> &'static [&'static str] {
    lookup(SUB_SERVICES, sub_vertical.trim())
}

/// Whether the sub-service field is shown for a sub-vertical.
pub fn shows_sub_service(sub_vertical: &str) -> bool {
    !sub_service_options(sub_vertical).is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeIssue {
    UnknownSubVertical {
        vertical: String,
        sub_vertical: String,
    },
    UnexpectedSubService {
        sub_vertical: String,
        sub_service: String,
    },
    UnknownSubService {
        sub_vertical: String,
        sub_service: String,
    },
}

impl std::fmt::Display for CascadeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CascadeIssue::UnknownSubVertical {
                vertical,
                sub_vertical,
            } => write!(f, "'{sub_vertical}' is not a sub-vertical of '{vertical}'"),
            CascadeIssue::UnexpectedSubService {
                sub_vertical,
                sub_service,
            } => write!(
                f,
                "sub-service '{sub_service}' set but '{sub_vertical}' has no sub-services"
            ),
            CascadeIssue::UnknownSubService {
                sub_vertical,
                sub_service,
            } => write!(f, "'{sub_service}' is not a sub-service of '{sub_vertical}'"),
        }
    }
}

/// Inconsistencies between a record's vertical, sub-vertical and sub-service.
pub fn cascade_issues(record: &LeadRecord) -> Vec<CascadeIssue> {
    let mut issues = Vec::new();
    let vertical = record.vertical_label().unwrap_or_default();
    let sub_vertical = record.text(SUB_VERTICAL_FIELD);
    let sub_service = record.text(SUB_SERVICE_FIELD);

    if let Some(sub_vertical) = &sub_vertical {
        if !sub_vertical_options(&vertical).contains(&sub_vertical.as_str()) {
            issues.push(CascadeIssue::UnknownSubVertical {
                vertical: vertical.clone(),
                sub_vertical: sub_vertical.clone(),
            });
        }
    }

    if let Some(sub_service) = sub_service {
        let sub_vertical = sub_vertical.unwrap_or_default();
        let options = sub_service_options(&sub_vertical);
        if options.is_empty() {
            issues.push(CascadeIssue::UnexpectedSubService {
                sub_vertical,
                sub_service,
            });
        } else if !options.contains(&sub_service.as_str()) {
            issues.push(CascadeIssue::UnknownSubService {
                sub_vertical,
                sub_service,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualification::domain::{Vertical, VERTICAL_FIELD};

    #[test]
    fn every_scored_vertical_has_sub_verticals() {
        for vertical in Vertical::ALL {
            assert!(
                !sub_vertical_options(vertical.label()).is_empty(),
                "{vertical} has no sub-verticals"
            );
        }
        assert_eq!(sub_vertical_options("Talent Management"), &["HR Consulting"]);
        assert!(sub_vertical_options("Facility Management").is_empty());
    }

    #[test]
    fn sub_service_visibility() {
        assert!(shows_sub_service("Posh training and compliance"));
        assert!(shows_sub_service("Corporate services"));
        assert!(shows_sub_service("Specialised Staffing"));
        assert!(!shows_sub_service("Other"));
        assert!(!shows_sub_service("General Staffing"));
    }

    #[test]
    fn reports_mismatched_cascade() {
        let record = LeadRecord::new()
            .with(VERTICAL_FIELD, "Franchise")
            .with(SUB_VERTICAL_FIELD, "Gig Economy")
            .with(SUB_SERVICE_FIELD, "Gig Hiring");

        let issues = cascade_issues(&record);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], CascadeIssue::UnknownSubVertical { .. }));
        assert!(matches!(issues[1], CascadeIssue::UnexpectedSubService { .. }));
    }

    #[test]
    fn consistent_record_has_no_issues() {
        let record = LeadRecord::new()
            .with(VERTICAL_FIELD, "Temporary Staffing")
            .with(SUB_VERTICAL_FIELD, "Specialised Staffing")
            .with(SUB_SERVICE_FIELD, "Gig Hiring");

        assert!(cascade_issues(&record).is_empty());
    }
}
