use super::{
    mandatory, mandatory_input, tier, Criterion, CriterionRule, CriterionTable, Tier,
    VerticalPolicy, COMPANY_TYPES,
};
use crate::qualification::domain::Vertical;

const VOLUME_TIERS: &[Tier] = &[
    tier("10 to 50", 6),
    tier("51 to 100", 9),
    tier("Above 100", 10),
];

// "Less than 50 Cr" is a recognised band that earns nothing.
const TURNOVER_TIERS: &[Tier] = &[
    tier("Less than 50 Cr", 0),
    tier("50 Cr to 200 Cr", 6),
    tier("200 and above", 9),
];

pub(super) const TABLE: CriterionTable = CriterionTable {
    vertical: Vertical::TemporaryStaffing,
    revision: "temp-2025.2",
    policy: VerticalPolicy {
        minimum_score: 8,
        display_max: 70,
        auto_convert_at: Some(50),
    },
    mandatory_order: &[
        "recruitment_doability",
        "employment_tenure",
        "minimum_wages",
        "compliance_scope",
    ],
    criteria: &[
        Criterion {
            id: "company_age",
            label: "Company Age (≥3 years)",
            rule: CriterionRule::MinimumYearsSince {
                field: "custom_company_establishment_year",
                years: 3,
                points: 6,
            },
            flag_field: Some("custom_company_establishment"),
            mandatory: None,
        },
        Criterion {
            id: "compliance_scope",
            label: "Compliance Scope (PF/ESI etc.)",
            rule: CriterionRule::Present {
                field: "custom_compliance_scope_pfesi_etc",
                points: 10,
            },
            flag_field: None,
            mandatory: mandatory("Compliance Scope (PF/ESI etc.)"),
        },
        Criterion {
            id: "minimum_wages",
            label: "Minimum Wages",
            rule: CriterionRule::Present {
                field: "custom_minimum_wages",
                points: 7,
            },
            flag_field: None,
            mandatory: mandatory("Minimum Wages"),
        },
        Criterion {
            id: "client_due_diligence",
            label: "Client Due Diligence",
            rule: CriterionRule::Present {
                field: "custom_client_due_diligence",
                points: 8,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "recruitment_doability",
            label: "Recruitment Do-ability Approved",
            rule: CriterionRule::Present {
                field: "custom_recruitment_doability_approved_temp",
                points: 10,
            },
            flag_field: None,
            mandatory: mandatory("Recruitment Do-ability Approved"),
        },
        Criterion {
            id: "company_type",
            label: "Company Type",
            rule: CriterionRule::OneOf {
                field: "custom_company_type",
                accepted: COMPANY_TYPES,
                points: 6,
            },
            flag_field: Some("custom_company_temp"),
            mandatory: None,
        },
        Criterion {
            id: "employment_tenure",
            label: "Employment Tenure",
            rule: CriterionRule::GreaterThan {
                field: "custom_employment_tenure_temp",
                bound: 1.0,
                points: 6,
            },
            flag_field: Some("custom_employment_tenure"),
            mandatory: mandatory_input("Employment Tenure"),
        },
        Criterion {
            id: "recruitment_volume",
            label: "Recruitment Volume",
            rule: CriterionRule::Tiered {
                field: "custom_recruitment_volume",
                tiers: VOLUME_TIERS,
            },
            flag_field: Some("custom_multilocation_presence"),
            mandatory: None,
        },
        Criterion {
            id: "turnover",
            label: "Turnover",
            rule: CriterionRule::Tiered {
                field: "custom_turnover_in_inr",
                tiers: TURNOVER_TIERS,
            },
            flag_field: Some("custom_turnover_temp"),
            mandatory: None,
        },
    ],
};
