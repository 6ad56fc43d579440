//! Exhaustive checks over every subset of a vertical's satisfied criteria.

use super::common::*;
use crate::qualification::domain::{LeadRecord, Vertical};
use crate::qualification::EvaluationEngine;

fn subset_record(vertical: Vertical, mask: u32) -> LeadRecord {
    let mut record = lead(vertical);
    for (index, criterion) in vertical.table().criteria.iter().enumerate() {
        if mask & (1 << index) != 0 {
            record.set(criterion.input_field(), best_value(criterion));
        }
    }
    record
}

fn for_each_subset(mut check: impl FnMut(&EvaluationEngine, Vertical, u32)) {
    let engine = engine();
    for vertical in Vertical::ALL {
        let count = vertical.table().criteria.len() as u32;
        for mask in 0..(1u32 << count) {
            check(&engine, vertical, mask);
        }
    }
}

#[test]
fn score_is_bounded_by_table_maximum() {
    for_each_subset(|engine, vertical, mask| {
        let outcome = engine.assess(vertical, &subset_record(vertical, mask));
        assert!(outcome.score <= outcome.max_score, "{vertical} mask {mask:b}");
        assert_eq!(outcome.max_score, vertical.table().max_score());
    });
}

#[test]
fn satisfying_another_criterion_never_lowers_the_score() {
    for_each_subset(|engine, vertical, mask| {
        let base = engine.assess(vertical, &subset_record(vertical, mask)).score;
        let criteria = vertical.table().criteria;
        for (index, criterion) in criteria.iter().enumerate() {
            if mask & (1 << index) != 0 {
                continue;
            }
            let grown = engine
                .assess(vertical, &subset_record(vertical, mask | (1 << index)))
                .score;
            assert_eq!(grown, base + criterion.max_points(), "{vertical} {}", criterion.id);
        }
    });
}

#[test]
fn qualification_is_monotonic_in_satisfied_criteria() {
    for_each_subset(|engine, vertical, mask| {
        let qualifies = engine
            .assess(vertical, &subset_record(vertical, mask))
            .decision()
            .qualifies;
        if !qualifies {
            return;
        }
        let full = (1u32 << vertical.table().criteria.len()) - 1;
        assert!(engine
            .assess(vertical, &subset_record(vertical, full))
            .decision()
            .qualifies);
    });
}
