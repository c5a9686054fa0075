//! Property tests for expression module
//!
//! Property 1: Threshold normalization
//! Property 2: Postfix tree building
//! Property 3: Description rendering

use proptest::prelude::*;

use crate::criteria::{codes, ComparisonKind, Criterion, LogicalKind};
use crate::error::CriteriaError;
use crate::expression::ast::{DisplaySymbol, ExpressionNode};
use crate::expression::builder::{build_tree, try_build_tree};
use crate::expression::formatter::describe;
use crate::expression::normalizer::normalize;
use crate::names::NoNames;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Stats outside the enumerated set, so values render as plain numbers
fn stat_strategy() -> impl Strategy<Value = i32> {
    100..=400i32
}

fn value_strategy() -> impl Strategy<Value = i64> {
    -1000..=1000i64
}

fn comparison_kind_strategy() -> impl Strategy<Value = ComparisonKind> {
    prop_oneof![
        Just(ComparisonKind::Equal),
        Just(ComparisonKind::NotEqual),
        Just(ComparisonKind::LessThan),
        Just(ComparisonKind::GreaterThan),
        Just(ComparisonKind::BitSet),
        Just(ComparisonKind::BitNotSet),
    ]
}

fn binary_kind_strategy() -> impl Strategy<Value = LogicalKind> {
    prop_oneof![Just(LogicalKind::And), Just(LogicalKind::Or)]
}

/// Generate a single comparison record
fn leaf_criterion_strategy() -> impl Strategy<Value = Criterion> {
    (stat_strategy(), comparison_kind_strategy(), value_strategy())
        .prop_map(|(stat, kind, value)| Criterion::compare(stat, kind, value))
}

/// Generate a postfix list that encodes exactly one tree
fn well_formed_strategy() -> impl Strategy<Value = Vec<Criterion>> {
    let leaf = leaf_criterion_strategy().prop_map(|criterion| vec![criterion]);
    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone(), binary_kind_strategy()).prop_map(
                |(mut left, right, kind)| {
                    left.extend(right);
                    left.push(Criterion::logical(kind));
                    left
                }
            ),
            inner.prop_map(|mut operand| {
                operand.push(Criterion::logical(LogicalKind::Not));
                operand
            }),
        ]
    })
}

/// Generate arbitrary operator codes, including unknown ones
fn operator_code_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(codes::STAT_EQUAL),
        Just(codes::STAT_LESS_THAN),
        Just(codes::STAT_GREATER_THAN),
        Just(codes::OR),
        Just(codes::AND),
        Just(codes::STAT_BIT_SET),
        Just(codes::STAT_NOT_EQUAL),
        Just(codes::NOT),
        Just(codes::STAT_BIT_NOT_SET),
        -5..=200i32,
    ]
}

/// Generate an arbitrary, possibly malformed, postfix list
fn arbitrary_list_strategy() -> impl Strategy<Value = Vec<Criterion>> {
    prop::collection::vec(
        (0..=50i32, stat_strategy(), value_strategy(), operator_code_strategy())
            .prop_map(|(id, stat, value, operator)| Criterion::new(id, stat, value, operator)),
        0..=24,
    )
}

fn marker_count(criteria: &[Criterion], kind: LogicalKind) -> usize {
    let code = Criterion::logical(kind).operator;
    criteria.iter().filter(|c| c.operator == code).count()
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 1.1: Strict thresholds display as the adjacent inclusive bound
    #[test]
    fn prop_strict_thresholds_become_inclusive(
        stat in stat_strategy(),
        value in any::<i64>()
    ) {
        let above = normalize(&Criterion::compare(stat, ComparisonKind::GreaterThan, value), &NoNames);
        prop_assert_eq!(above.display_symbol, DisplaySymbol::AtLeast);
        prop_assert_eq!(above.display_value, value.saturating_add(1));

        let below = normalize(&Criterion::compare(stat, ComparisonKind::LessThan, value), &NoNames);
        prop_assert_eq!(below.display_symbol, DisplaySymbol::AtMost);
        prop_assert_eq!(below.display_value, value.saturating_sub(1));
    }

    /// Property 1.2: Non-strict comparisons keep their value
    #[test]
    fn prop_other_comparisons_keep_value(criterion in leaf_criterion_strategy()) {
        let leaf = normalize(&criterion, &NoNames);
        match leaf.display_symbol {
            DisplaySymbol::AtLeast | DisplaySymbol::AtMost => {}
            _ => prop_assert_eq!(leaf.display_value, criterion.value),
        }
        prop_assert_eq!(leaf.stat_id, criterion.stat);
        prop_assert!(!leaf.description.is_empty());
    }

    /// Property 2.1: A well-formed list builds one tree holding every leaf
    #[test]
    fn prop_well_formed_list_builds(criteria in well_formed_strategy()) {
        let tree = try_build_tree(&criteria, &NoNames);
        prop_assert!(matches!(tree, Ok(Some(_))), "Failed to build: {:?}", criteria);

        let tree = build_tree(&criteria, &NoNames).unwrap();
        let leaves = criteria.iter().filter(|c| !c.op().is_logical()).count();
        prop_assert_eq!(tree.leaf_count(), leaves);
        prop_assert!(tree.depth() <= criteria.len());
    }

    /// Property 2.2: Building never panics, and the lenient builder agrees
    /// with the strict one wherever the strict one succeeds
    #[test]
    fn prop_lenient_agrees_with_strict(criteria in arbitrary_list_strategy()) {
        let lenient = build_tree(&criteria, &NoNames);

        match try_build_tree(&criteria, &NoNames) {
            Ok(strict) => prop_assert_eq!(lenient, strict),
            Err(CriteriaError::TrailingOperands { count }) => {
                prop_assert!(count > 1);
                prop_assert!(lenient.is_some());
            }
            Err(CriteriaError::MissingOperands { required, available, .. }) => {
                prop_assert!(available < required);
                prop_assert!(lenient.is_none());
            }
            Err(CriteriaError::TooDeep { depth, limit, .. }) => {
                prop_assert!(depth > limit);
                prop_assert!(lenient.is_none());
            }
            Err(other) => prop_assert!(false, "Unexpected error: {}", other),
        }
    }

    /// Property 3.1: AND and OR render as one parenthesized infix pair
    #[test]
    fn prop_describe_binary_shape(
        left in leaf_criterion_strategy(),
        right in leaf_criterion_strategy(),
        kind in binary_kind_strategy()
    ) {
        let tree = build_tree(&[left, right, Criterion::logical(kind)], &NoNames);
        let expected = format!(
            "({} {} {})",
            normalize(&left, &NoNames).description,
            kind.name(),
            normalize(&right, &NoNames).description
        );
        prop_assert_eq!(describe(tree.as_ref()), expected);
    }

    /// Property 3.2: NOT renders as a prefix around its operand
    #[test]
    fn prop_describe_not_shape(operand in leaf_criterion_strategy()) {
        let tree = build_tree(&[operand, Criterion::logical(LogicalKind::Not)], &NoNames);
        let expected = format!("NOT ({})", normalize(&operand, &NoNames).description);
        prop_assert_eq!(describe(tree.as_ref()), expected);
    }

    /// Property 3.3: Descriptions carry one connective per marker and
    /// balanced parentheses
    #[test]
    fn prop_describe_balanced(criteria in well_formed_strategy()) {
        let tree: Option<ExpressionNode> = build_tree(&criteria, &NoNames);
        let text = describe(tree.as_ref());

        prop_assert_eq!(text.matches('(').count(), text.matches(')').count());
        prop_assert_eq!(text.matches(" AND ").count(), marker_count(&criteria, LogicalKind::And));
        prop_assert_eq!(text.matches(" OR ").count(), marker_count(&criteria, LogicalKind::Or));
        prop_assert_eq!(text.matches("NOT (").count(), marker_count(&criteria, LogicalKind::Not));
    }
}
