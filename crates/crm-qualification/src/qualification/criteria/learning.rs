use super::{
    mandatory_input, tier, Criterion, CriterionRule, CriterionTable, MandatoryBasis,
    MandatoryCheck, Tier, VerticalPolicy,
};
use crate::qualification::domain::Vertical;

const TURNOVER_TIERS: &[Tier] = &[
    tier("Less than 50 Cr", 5),
    tier("50 Cr to 200 Cr", 7),
    tier("200 and above", 9),
];

const TIMELINE_TIERS: &[Tier] = &[
    tier("Less Than 30 Days", 10),
    tier("30 days to 60 Days", 8),
    tier("60 Days and Above", 6),
];

pub(super) const TABLE: CriterionTable = CriterionTable {
    vertical: Vertical::LearningAndDevelopment,
    revision: "ld-2025.2",
    policy: VerticalPolicy {
        minimum_score: 20,
        display_max: 47,
        auto_convert_at: Some(40),
    },
    mandatory_order: &[
        "participants",
        "training_timeline",
    ],
    criteria: &[
        Criterion {
            id: "trainer_availability",
            label: "Trainer Availability / Scheduling Fit",
            rule: CriterionRule::Present {
                field: "custom_trainer_availability__scheduling_fit",
                points: 9,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "direct_delivery",
            label: "Direct Delivery (No Subcontracting)",
            rule: CriterionRule::Present {
                field: "custom_direct_delivery_no_subcontracting",
                points: 9,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "b2b_engagement",
            label: "B2B Engagement",
            rule: CriterionRule::Present {
                field: "custom_b2b_engagement",
                points: 7,
            },
            flag_field: None,
            mandatory: None,
        },
        Criterion {
            id: "participants",
            label: "Number of Employees / Participants",
            rule: CriterionRule::AtLeast {
                field: "no_of_employees",
                minimum: 5.0,
                points: 7,
            },
            flag_field: Some("custom_number_of_employees__participants"),
            mandatory: Some(MandatoryCheck {
                label: "Number of Employees / Participants",
                basis: MandatoryBasis::Satisfied,
                shortfall_label: Some("Number of Employees / Participants (Minimum 5 required)"),
            }),
        },
        Criterion {
            id: "turnover",
            label: "Turnover",
            rule: CriterionRule::Tiered {
                field: "custom_turnover_in_inr",
                tiers: TURNOVER_TIERS,
            },
            flag_field: Some("custom_turnover_ld"),
            mandatory: None,
        },
        Criterion {
            id: "training_timeline",
            label: "Requested Training Timeline",
            rule: CriterionRule::Tiered {
                field: "custom_requested_training_timeline",
                tiers: TIMELINE_TIERS,
            },
            flag_field: Some("custom_urgency__timeline"),
            mandatory: mandatory_input("Requested Training Timeline"),
        },
    ],
};
