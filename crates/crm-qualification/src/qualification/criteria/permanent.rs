use super::{
    mandatory, tier, Criterion, CriterionRule, CriterionTable, Tier, VerticalPolicy,
    COMPANY_TYPES,
};
use crate::qualification::domain::Vertical;

const SALARY_TIERS: &[Tier] = &[
    tier("5.01 to 8lakhs", 6),
    tier("8 to 12LPA", 8),
    tier("12 to 20 LPA", 9),
    tier("20.01 and above", 10),
];

const POSITIONS_OPEN_TIERS: &[Tier] = &[tier("Less than 60 Days", 10), tier("60 to 120 Days", 5)];

const VOLUME_TIERS: &[Tier] = &[
    tier("1 to 3", 5),
    tier("4 to 6", 6),
    tier("7 and Above", 10),
];

const TURNOVER_TIERS: &[Tier] = &[
    tier("Less than 50 Cr", 6),
    tier("50 Cr to 200Cr", 8),
    tier("200 Cr and Above", 9),
];

pub(super) const TABLE: CriterionTable = CriterionTable {
    vertical: Vertical::PermanentStaffing,
    revision: "perm-2025.2",
    policy: VerticalPolicy {
        minimum_score: 12,
        display_max: 100,
        auto_convert_at: None,
    },
    mandatory_order: &[
        "recruitment_doability",
        "company_age",
        "salary_offering",
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
            flag_field: Some("custom_company_age__3_years"),
            mandatory: mandatory("Company Age (≥3 Years)"),
        },
        Criterion {
            id: "salary_offering",
            label: "Salary Offering",
            rule: CriterionRule::Tiered {
                field: "custom_salary_offering",
                tiers: SALARY_TIERS,
            },
            flag_field: Some("custom_eligible_mandate_ctc__6l"),
            mandatory: mandatory("Eligible Mandate (CTC ≥ 6L)"),
        },
        Criterion {
            id: "website",
            label: "Verified Website",
            rule: CriterionRule::Present {
                field: "website",
                points: 6,
            },
            flag_field: Some("custom_verified_client_websitedomain_check"),
            mandatory: None,
        },
        Criterion {
            id: "recruitment_doability",
            label: "Recruitment Do-ability",
            rule: CriterionRule::Present {
                field: "custom_recruitment_doability_approved",
                points: 10,
            },
            flag_field: None,
            mandatory: mandatory("Recruitment Do-ability Approved"),
        },
        Criterion {
            id: "positions_open",
            label: "Positions Open",
            rule: CriterionRule::Tiered {
                field: "custom_positions_open_from",
                tiers: POSITIONS_OPEN_TIERS,
            },
            flag_field: Some("custom_recent_openings_60_days"),
            mandatory: None,
        },
        Criterion {
            id: "recruitment_volume",
            label: "Recruitment Volume",
            rule: CriterionRule::Tiered {
                field: "custom_recruitment_volume_perm",
                tiers: VOLUME_TIERS,
            },
            flag_field: Some("custom_multiple_openings"),
            mandatory: None,
        },
        Criterion {
            id: "company_type",
            label: "Company Type",
            rule: CriterionRule::OneOf {
                field: "custom_company_type",
                accepted: COMPANY_TYPES,
                points: 6,
            },
            flag_field: Some("custom_company_type_private_ltd__listed"),
            mandatory: None,
        },
        Criterion {
            id: "turnover",
            label: "Turnover",
            rule: CriterionRule::Tiered {
                field: "custom_turnover_in_inr",
                tiers: TURNOVER_TIERS,
            },
            flag_field: Some("custom_turnover__50_cr"),
            mandatory: None,
        },
        Criterion {
            id: "jd_completeness",
            label: "JD Completeness",
            rule: CriterionRule::Present {
                field: "custom_jd_completeness",
                points: 8,
            },
            flag_field: None,
            mandatory: None,
        },
    ],
};
