//! Expression tree for decoded criteria

use smallvec::{smallvec, SmallVec};
use std::fmt;

use crate::criteria::{LogicalKind, StatId, StatValue};

/// Comparison symbol shown to the user, after strict thresholds are made inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySymbol {
    /// =
    Equal,
    /// ≠
    NotEqual,
    /// ≥ (from a strict greater-than)
    AtLeast,
    /// ≤ (from a strict less-than)
    AtMost,
    /// All bits of the value set
    Has,
    /// No bit of the value set
    Lacks,
    /// Unknown operator code, rendered as `Op<code>`.
    ///
    /// Such a leaf cannot be checked against a stat and counts as a pass:
    /// it never blocks a verdict and is counted as met.
    Raw(i32),
}

impl DisplaySymbol {
    pub fn is_flag(self) -> bool {
        matches!(self, DisplaySymbol::Has | DisplaySymbol::Lacks)
    }
}

impl fmt::Display for DisplaySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySymbol::Equal => f.write_str("="),
            DisplaySymbol::NotEqual => f.write_str("≠"),
            DisplaySymbol::AtLeast => f.write_str("≥"),
            DisplaySymbol::AtMost => f.write_str("≤"),
            DisplaySymbol::Has => f.write_str("has"),
            DisplaySymbol::Lacks => f.write_str("lacks"),
            DisplaySymbol::Raw(code) => write!(f, "Op{}", code),
        }
    }
}

/// Display-ready comparison leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLeaf {
    /// Id of the originating criterion, for traceability only
    pub criterion_id: i32,
    pub stat_id: StatId,
    pub stat_name: String,
    /// Threshold after the inclusive remap
    pub display_value: StatValue,
    pub display_symbol: DisplaySymbol,
    pub description: String,
}

impl DisplayLeaf {
    #[inline]
    pub fn is_logical_operator(&self) -> bool {
        false
    }

    #[inline]
    pub fn is_stat_requirement(&self) -> bool {
        true
    }

    /// Test the displayed comparison against a current value.
    ///
    /// Always true for [`DisplaySymbol::Raw`]: an unknown operator is treated
    /// as a passed requirement by both evaluators.
    pub fn is_satisfied_by(&self, current: StatValue) -> bool {
        let value = self.display_value;
        match self.display_symbol {
            DisplaySymbol::Equal => current == value,
            DisplaySymbol::NotEqual => current != value,
            DisplaySymbol::AtLeast => current >= value,
            DisplaySymbol::AtMost => current <= value,
            DisplaySymbol::Has => (current & value) == value,
            DisplaySymbol::Lacks => (current & value) == 0,
            DisplaySymbol::Raw(_) => true,
        }
    }
}

/// Flat-list stand-in for a logical operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalMarker {
    pub operator: LogicalKind,
}

impl LogicalMarker {
    pub fn operator_name(&self) -> &'static str {
        self.operator.name()
    }

    #[inline]
    pub fn is_logical_operator(&self) -> bool {
        true
    }

    /// Only AND markers act as separators in the flat list
    #[inline]
    pub fn is_separator(&self) -> bool {
        self.operator == LogicalKind::And
    }
}

/// One normalized entry of a flat criteria list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedEntry {
    Leaf(DisplayLeaf),
    Marker(LogicalMarker),
}

/// Logical node with its arity fixed by the variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalNode {
    And(Box<ExpressionNode>, Box<ExpressionNode>),
    Or(Box<ExpressionNode>, Box<ExpressionNode>),
    Not(Box<ExpressionNode>),
}

impl LogicalNode {
    pub fn operator(&self) -> LogicalKind {
        match self {
            LogicalNode::And(..) => LogicalKind::And,
            LogicalNode::Or(..) => LogicalKind::Or,
            LogicalNode::Not(_) => LogicalKind::Not,
        }
    }

    /// Operands in encounter order: `[left, right]` or `[operand]`
    pub fn operands(&self) -> SmallVec<[&ExpressionNode; 2]> {
        match self {
            LogicalNode::And(left, right) | LogicalNode::Or(left, right) => {
                smallvec![left.as_ref(), right.as_ref()]
            }
            LogicalNode::Not(operand) => smallvec![operand.as_ref()],
        }
    }
}

/// Decoded criteria expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Leaf(DisplayLeaf),
    Logical(LogicalNode),
}

impl ExpressionNode {
    pub fn and(left: ExpressionNode, right: ExpressionNode) -> Self {
        ExpressionNode::Logical(LogicalNode::And(Box::new(left), Box::new(right)))
    }

    pub fn or(left: ExpressionNode, right: ExpressionNode) -> Self {
        ExpressionNode::Logical(LogicalNode::Or(Box::new(left), Box::new(right)))
    }

    pub fn not(operand: ExpressionNode) -> Self {
        ExpressionNode::Logical(LogicalNode::Not(Box::new(operand)))
    }

    pub fn as_leaf(&self) -> Option<&DisplayLeaf> {
        match self {
            ExpressionNode::Leaf(leaf) => Some(leaf),
            ExpressionNode::Logical(_) => None,
        }
    }

    /// All leaves, left to right
    pub fn leaves(&self) -> Vec<&DisplayLeaf> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a DisplayLeaf>) {
        match self {
            ExpressionNode::Leaf(leaf) => out.push(leaf),
            ExpressionNode::Logical(node) => {
                for operand in node.operands() {
                    operand.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ExpressionNode::Leaf(_) => 1,
            ExpressionNode::Logical(node) => node.operands().iter().map(|n| n.leaf_count()).sum(),
        }
    }

    /// Depth of the tree; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            ExpressionNode::Leaf(_) => 1,
            ExpressionNode::Logical(node) => {
                1 + node
                    .operands()
                    .iter()
                    .map(|n| n.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(stat_id: StatId, symbol: DisplaySymbol, value: StatValue) -> DisplayLeaf {
        DisplayLeaf {
            criterion_id: 0,
            stat_id,
            stat_name: format!("Stat {}", stat_id),
            display_value: value,
            display_symbol: symbol,
            description: format!("Stat {} {} {}", stat_id, symbol, value),
        }
    }

    #[test]
    fn test_symbol_rendering() {
        assert_eq!(DisplaySymbol::Equal.to_string(), "=");
        assert_eq!(DisplaySymbol::NotEqual.to_string(), "≠");
        assert_eq!(DisplaySymbol::AtLeast.to_string(), "≥");
        assert_eq!(DisplaySymbol::AtMost.to_string(), "≤");
        assert_eq!(DisplaySymbol::Has.to_string(), "has");
        assert_eq!(DisplaySymbol::Lacks.to_string(), "lacks");
        assert_eq!(DisplaySymbol::Raw(999).to_string(), "Op999");
    }

    #[test]
    fn test_leaf_comparisons() {
        assert!(leaf(1, DisplaySymbol::AtLeast, 100).is_satisfied_by(100));
        assert!(!leaf(1, DisplaySymbol::AtLeast, 100).is_satisfied_by(99));
        assert!(leaf(1, DisplaySymbol::AtMost, 199).is_satisfied_by(199));
        assert!(!leaf(1, DisplaySymbol::AtMost, 199).is_satisfied_by(200));
        assert!(leaf(1, DisplaySymbol::Equal, 8).is_satisfied_by(8));
        assert!(leaf(1, DisplaySymbol::NotEqual, 8).is_satisfied_by(7));
        assert!(leaf(1, DisplaySymbol::Raw(999), 5).is_satisfied_by(0));
    }

    #[test]
    fn test_flag_comparisons() {
        let has = leaf(1, DisplaySymbol::Has, 0b0110);
        assert!(has.is_satisfied_by(0b1110));
        assert!(!has.is_satisfied_by(0b0100));

        let lacks = leaf(1, DisplaySymbol::Lacks, 0b0110);
        assert!(lacks.is_satisfied_by(0b1001));
        assert!(!lacks.is_satisfied_by(0b0010));
    }

    #[test]
    fn test_marker_flags() {
        let and = LogicalMarker { operator: LogicalKind::And };
        let or = LogicalMarker { operator: LogicalKind::Or };
        assert!(and.is_logical_operator());
        assert!(and.is_separator());
        assert!(!or.is_separator());
        assert_eq!(or.operator_name(), "OR");
    }

    #[test]
    fn test_tree_shape_helpers() {
        let tree = ExpressionNode::and(
            ExpressionNode::Leaf(leaf(1, DisplaySymbol::Equal, 1)),
            ExpressionNode::not(ExpressionNode::or(
                ExpressionNode::Leaf(leaf(2, DisplaySymbol::Equal, 2)),
                ExpressionNode::Leaf(leaf(3, DisplaySymbol::Equal, 3)),
            )),
        );

        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 4);
        let ids: Vec<StatId> = tree.leaves().iter().map(|l| l.stat_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        match &tree {
            ExpressionNode::Logical(node) => {
                assert_eq!(node.operator(), LogicalKind::And);
                assert_eq!(node.operands().len(), 2);
            }
            ExpressionNode::Leaf(_) => panic!("Expected logical root"),
        }
    }
}
