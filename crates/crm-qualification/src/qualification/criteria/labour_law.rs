use super::{mandatory, tier, Criterion, CriterionRule, CriterionTable, Tier, VerticalPolicy};
use crate::qualification::domain::Vertical;

// Option labels carry an en-dash, runs of spaces, and a tab exactly as the host form stores them.
const OFFICE_TIERS: &[Tier] = &[
    tier("1\u{2013}2   Single / Local Operation", 6),
    tier("3\u{2013}10 Regional Presence", 8),
    tier("11+\t Multi-location / National Presence", 10),
];

const TURNOVER_TIERS: &[Tier] = &[
    tier("Less than 50 Cr", 6),
    tier("50 Cr to 200 Cr", 8),
    tier("200 and above", 10),
];

pub(super) const TABLE: CriterionTable = CriterionTable {
    vertical: Vertical::LabourLawCompliance,
    revision: "llc-2025.2",
    policy: VerticalPolicy {
        minimum_score: 6,
        display_max: 44,
        auto_convert_at: Some(30),
    },
    mandatory_order: &[
        "scope_of_enquiry",
        "exclusion_of_grievances",
        "not_subcontracting",
    ],
    criteria: &[
        Criterion {
            id: "scope_of_enquiry",
            label: "Scope of Enquiry",
            rule: CriterionRule::Present {
                field: "custom_scope_of_enquiry",
                points: 9,
            },
            flag_field: None,
            mandatory: mandatory("Scope of Enquiry"),
        },
        Criterion {
            id: "exclusion_of_grievances",
            label: "Exclusion of Personal Grievances",
            rule: CriterionRule::Present {
                field: "custom_exclusion_of_personal_grievances",
                points: 6,
            },
            flag_field: None,
            mandatory: mandatory("Exclusion of Personal Grievances"),
        },
        Criterion {
            id: "not_subcontracting",
            label: "Not a Sub-contracting Lead",
            rule: CriterionRule::Present {
                field: "custom_not_a_sub_contracting_lead",
                points: 9,
            },
            flag_field: None,
            mandatory: mandatory("Not a Sub-contracting Lead"),
        },
        Criterion {
            id: "offices_plants",
            label: "Number of Offices/Plants",
            rule: CriterionRule::Tiered {
                field: "custom_no_of_officesplants",
                tiers: OFFICE_TIERS,
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
            flag_field: Some("custom_turnover"),
            mandatory: None,
        },
    ],
};
