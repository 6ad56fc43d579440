use super::{mandatory, tier, Criterion, CriterionRule, CriterionTable, Tier, VerticalPolicy};
use crate::qualification::domain::Vertical;

const ENGAGEMENT_TIERS: &[Tier] = &[
    tier("Full-time (Active Operational Involvement)", 10),
    tier("Part-time (Supervisory / Oversight Role)", 7),
    tier("Undecided / To be discussed", 3),
];

pub(super) const TABLE: CriterionTable = CriterionTable {
    vertical: Vertical::Franchise,
    revision: "franchise-2025.2",
    policy: VerticalPolicy {
        minimum_score: 12,
        display_max: 64,
        auto_convert_at: None,
    },
    mandatory_order: &[
        "recruitment_investment",
        "team_hiring",
        "target_city",
    ],
    criteria: &[
        Criterion {
            id: "local_connections",
            label: "Local Connections",
            rule: CriterionRule::Present {
                field: "custom_local_connections",
                points: 8,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "office_space",
            label: "Office Space",
            rule: CriterionRule::Present {
                field: "custom_office_space_franchise",
                points: 7,
            },
            flag_field: Some("custom_office_space"),
            mandatory: None,
        },
        Criterion {
            id: "recruitment_investment",
            label: "Recruitment Investment",
            rule: CriterionRule::Present {
                field: "custom_recruitment_investment",
                points: 10,
            },
            flag_field: None,
            mandatory: mandatory("Recruitment Investment"),
        },
        Criterion {
            id: "target_city",
            label: "Target City",
            rule: CriterionRule::Present {
                field: "custom_target_city",
                points: 9,
            },
            flag_field: None,
            mandatory: mandatory("Target City"),
        },
        Criterion {
            id: "financial_readiness",
            label: "Financial Readiness",
            rule: CriterionRule::Present {
                field: "custom_financial_readiness",
                points: 10,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "team_hiring",
            label: "Team Hiring",
            rule: CriterionRule::Present {
                field: "custom_team_hiring",
                points: 10,
            },
            flag_field: None,
            mandatory: mandatory("Team Hiring"),
        },
        Criterion {
            id: "engagement_intent",
            label: "Franchisee Engagement",
            rule: CriterionRule::Tiered {
                field: "custom__franchisee_engagement_intent",
                tiers: ENGAGEMENT_TIERS,
            },
            flag_field: Some("custom_active_involvement"),
            mandatory: None,
        },
    ],
};
