//! Criterion normalizer: one raw record to one display-ready leaf

use crate::criteria::{ComparisonKind, Criterion, Operator, StatValue};
use crate::expression::ast::{DisplayLeaf, DisplaySymbol, LogicalMarker, NormalizedEntry};
use crate::names::NameResolver;

/// Normalize one comparison criterion.
///
/// Strict thresholds become inclusive (`> V` shows as `≥ V+1`, `< V` as
/// `≤ V-1`). Logical and unknown codes are never rejected; they render as
/// `Op<code>` with the raw value.
pub fn normalize(criterion: &Criterion, names: &dyn NameResolver) -> DisplayLeaf {
    let stat_name = names.resolve_stat_name(criterion.stat);
    let raw = criterion.value;

    let (display_symbol, display_value) = match criterion.op() {
        Operator::Comparison(kind) => display_form(kind, raw),
        Operator::Logical(_) | Operator::Unknown(_) => {
            tracing::debug!(
                criterion_id = criterion.id,
                operator = criterion.operator,
                "Rendering unknown operator code verbatim"
            );
            (DisplaySymbol::Raw(criterion.operator), raw)
        }
    };

    let description = match display_symbol {
        DisplaySymbol::Has | DisplaySymbol::Lacks => format!(
            "{} {} flag {}",
            stat_name,
            display_symbol,
            names.resolve_flag_name(criterion.stat, display_value)
        ),
        DisplaySymbol::Raw(_) => format!("{} {} {}", stat_name, display_symbol, display_value),
        _ => format!(
            "{} {} {}",
            stat_name,
            display_symbol,
            names.resolve_value(criterion.stat, display_value)
        ),
    };

    DisplayLeaf {
        criterion_id: criterion.id,
        stat_id: criterion.stat,
        stat_name,
        display_value,
        display_symbol,
        description,
    }
}

/// Displayed symbol and threshold for a comparison kind
///
/// Strict bounds become inclusive by one step, saturating at the `StatValue`
/// range. `> StatValue::MAX` therefore displays as `≥ StatValue::MAX` and is
/// met by a current value of `MAX`, though the raw comparison never holds.
/// `< StatValue::MIN` behaves the same way at the other end.
#[inline]
pub fn display_form(kind: ComparisonKind, raw: StatValue) -> (DisplaySymbol, StatValue) {
    match kind {
        ComparisonKind::Equal => (DisplaySymbol::Equal, raw),
        ComparisonKind::NotEqual => (DisplaySymbol::NotEqual, raw),
        ComparisonKind::GreaterThan => (DisplaySymbol::AtLeast, raw.saturating_add(1)),
        ComparisonKind::LessThan => (DisplaySymbol::AtMost, raw.saturating_sub(1)),
        ComparisonKind::BitSet => (DisplaySymbol::Has, raw),
        ComparisonKind::BitNotSet => (DisplaySymbol::Lacks, raw),
    }
}

/// Normalize any criterion into a leaf or a logical marker
pub fn normalize_entry(criterion: &Criterion, names: &dyn NameResolver) -> NormalizedEntry {
    match criterion.op() {
        Operator::Logical(operator) => NormalizedEntry::Marker(LogicalMarker { operator }),
        Operator::Comparison(_) | Operator::Unknown(_) => {
            NormalizedEntry::Leaf(normalize(criterion, names))
        }
    }
}

/// Normalize a whole criteria list in input order
pub fn normalize_sequence(criteria: &[Criterion], names: &dyn NameResolver) -> Vec<NormalizedEntry> {
    criteria
        .iter()
        .map(|criterion| normalize_entry(criterion, names))
        .collect()
}
