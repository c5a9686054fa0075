//! Requirement counter: how close is the actor to satisfying the expression?
//!
//! Every node gets a `(total, met, status)` annotation. An OR node always
//! counts as a single requirement, however many alternatives it nests, so
//! AND and OR fold their children with separate rules.

use crate::evaluation::snapshot::{lookup, StatSnapshot};
use crate::expression::{ExpressionNode, LogicalNode};

/// Met/unmet state of a counted node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementStatus {
    Met,
    Unmet,
    Partial,
}

impl RequirementStatus {
    /// `Met` when every slot is met (including zero of zero), `Unmet` when none
    #[inline]
    pub fn from_counts(met: u32, total: u32) -> Self {
        if met == total {
            RequirementStatus::Met
        } else if met == 0 {
            RequirementStatus::Unmet
        } else {
            RequirementStatus::Partial
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequirementStatus::Met => "met",
            RequirementStatus::Unmet => "unmet",
            RequirementStatus::Partial => "partial",
        }
    }
}

/// Expression node annotated with requirement counts.
///
/// A parallel tree borrowing the evaluated nodes; the expression itself is
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedNode<'a> {
    pub node: &'a ExpressionNode,
    pub total_count: u32,
    pub met_count: u32,
    pub status: RequirementStatus,
    pub children: Vec<CountedNode<'a>>,
}

/// Aggregate progress of a counted tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementProgress {
    pub met: u32,
    pub total: u32,
    pub status: RequirementStatus,
}

impl RequirementProgress {
    /// Progress of an expression with no requirements
    pub fn empty() -> Self {
        Self {
            met: 0,
            total: 0,
            status: RequirementStatus::Met,
        }
    }

    /// Met share in `0.0..=1.0`; no requirements counts as complete
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.met) / f64::from(self.total)
        }
    }
}

/// One line of a flattened counted tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedRow {
    pub depth: usize,
    /// Leaf description or operator name
    pub label: String,
    pub total_count: u32,
    pub met_count: u32,
    pub status: RequirementStatus,
}

impl<'a> CountedNode<'a> {
    pub fn progress(&self) -> RequirementProgress {
        RequirementProgress {
            met: self.met_count,
            total: self.total_count,
            status: self.status,
        }
    }

    #[inline]
    pub fn is_met(&self) -> bool {
        self.status == RequirementStatus::Met
    }

    /// Flatten pre-order into owned rows for progress display
    pub fn rows(&self) -> Vec<CountedRow> {
        let mut rows = Vec::new();
        self.push_rows(0, &mut rows);
        rows
    }

    fn push_rows(&self, depth: usize, rows: &mut Vec<CountedRow>) {
        let label = match self.node {
            ExpressionNode::Leaf(leaf) => leaf.description.clone(),
            ExpressionNode::Logical(node) => node.operator().name().to_string(),
        };
        rows.push(CountedRow {
            depth,
            label,
            total_count: self.total_count,
            met_count: self.met_count,
            status: self.status,
        });
        for child in &self.children {
            child.push_rows(depth + 1, rows);
        }
    }
}

/// Progress of an optional counted tree; `None` means no requirements
pub fn progress_of(counted: Option<&CountedNode<'_>>) -> RequirementProgress {
    counted.map_or_else(RequirementProgress::empty, CountedNode::progress)
}

/// Count met and total requirements of a tree against a snapshot
pub fn evaluate_counted<'a>(node: &'a ExpressionNode, stats: &StatSnapshot) -> CountedNode<'a> {
    match node {
        ExpressionNode::Leaf(leaf) => {
            let met_count = u32::from(leaf.is_satisfied_by(lookup(stats, leaf.stat_id)));
            counted(node, 1, met_count, Vec::new())
        }
        ExpressionNode::Logical(LogicalNode::And(left, right)) => {
            fold_and(node, evaluate_counted(left, stats), evaluate_counted(right, stats))
        }
        ExpressionNode::Logical(LogicalNode::Or(left, right)) => {
            fold_or(node, evaluate_counted(left, stats), evaluate_counted(right, stats))
        }
        ExpressionNode::Logical(LogicalNode::Not(operand)) => {
            fold_not(node, evaluate_counted(operand, stats))
        }
    }
}

/// AND adds up its children
fn fold_and<'a>(node: &'a ExpressionNode, left: CountedNode<'a>, right: CountedNode<'a>) -> CountedNode<'a> {
    let total = left.total_count + right.total_count;
    let met = left.met_count + right.met_count;
    counted(node, total, met, vec![left, right])
}

/// OR is one choice: a single slot, met when either child is fully met
fn fold_or<'a>(node: &'a ExpressionNode, left: CountedNode<'a>, right: CountedNode<'a>) -> CountedNode<'a> {
    let met = u32::from(left.is_met() || right.is_met());
    counted(node, 1, met, vec![left, right])
}

/// NOT is a single slot, met when its operand is not fully met
fn fold_not<'a>(node: &'a ExpressionNode, operand: CountedNode<'a>) -> CountedNode<'a> {
    let met = u32::from(!operand.is_met());
    counted(node, 1, met, vec![operand])
}

#[inline]
fn counted<'a>(
    node: &'a ExpressionNode,
    total_count: u32,
    met_count: u32,
    children: Vec<CountedNode<'a>>,
) -> CountedNode<'a> {
    CountedNode {
        node,
        total_count,
        met_count,
        status: RequirementStatus::from_counts(met_count, total_count),
        children,
    }
}
