//! Decision evaluator: can the actor satisfy the expression right now?

use crate::criteria::{StatId, StatValue};
use crate::evaluation::snapshot::{lookup, StatSnapshot};
use crate::expression::{DisplayLeaf, DisplaySymbol, ExpressionNode, LogicalNode};

/// A leaf comparison that blocks the expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetLeaf {
    pub criterion_id: i32,
    pub stat_id: StatId,
    pub stat_name: String,
    pub required_value: StatValue,
    pub current_value: StatValue,
    pub symbol: DisplaySymbol,
    /// The leaf holds under a NOT, so holding it is the problem
    pub negated: bool,
    pub description: String,
}

impl UnmetLeaf {
    fn new(leaf: &DisplayLeaf, current_value: StatValue, negated: bool) -> Self {
        Self {
            criterion_id: leaf.criterion_id,
            stat_id: leaf.stat_id,
            stat_name: leaf.stat_name.clone(),
            required_value: leaf.display_value,
            current_value,
            symbol: leaf.display_symbol,
            negated,
            description: leaf.description.clone(),
        }
    }

    /// How far the current value is from an inclusive bound.
    ///
    /// Positive for a missing amount (`≥`) or an excess (`≤`); `None` for
    /// comparisons without a distance.
    pub fn delta(&self) -> Option<StatValue> {
        if self.negated {
            return None;
        }
        match self.symbol {
            DisplaySymbol::AtLeast => Some(self.required_value.saturating_sub(self.current_value)),
            DisplaySymbol::AtMost => Some(self.current_value.saturating_sub(self.required_value)),
            _ => None,
        }
    }
}

/// Pass/fail verdict plus the leaves in the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationVerdict {
    pub can_satisfy: bool,
    pub unmet_leaves: Vec<UnmetLeaf>,
}

impl EvaluationVerdict {
    pub fn satisfied() -> Self {
        Self {
            can_satisfy: true,
            unmet_leaves: Vec::new(),
        }
    }

    fn unsatisfied(unmet_leaves: Vec<UnmetLeaf>) -> Self {
        Self {
            can_satisfy: false,
            unmet_leaves,
        }
    }
}

/// Evaluate a tree against a snapshot.
///
/// An absent tree is trivially satisfied. A failed OR reports every leaf of
/// both branches as alternatives, including ones that hold on their own; a
/// satisfied OR reports none.
pub fn evaluate_decision(node: Option<&ExpressionNode>, stats: &StatSnapshot) -> EvaluationVerdict {
    match node {
        Some(node) => decide(node, stats),
        None => EvaluationVerdict::satisfied(),
    }
}

fn decide(node: &ExpressionNode, stats: &StatSnapshot) -> EvaluationVerdict {
    match node {
        ExpressionNode::Leaf(leaf) => {
            let current = lookup(stats, leaf.stat_id);
            if leaf.is_satisfied_by(current) {
                EvaluationVerdict::satisfied()
            } else {
                EvaluationVerdict::unsatisfied(vec![UnmetLeaf::new(leaf, current, false)])
            }
        }
        ExpressionNode::Logical(LogicalNode::And(left, right)) => {
            let left = decide(left, stats);
            let right = decide(right, stats);
            let can_satisfy = left.can_satisfy && right.can_satisfy;
            let mut unmet_leaves = left.unmet_leaves;
            unmet_leaves.extend(right.unmet_leaves);
            EvaluationVerdict {
                can_satisfy,
                unmet_leaves,
            }
        }
        ExpressionNode::Logical(LogicalNode::Or(left, right)) => {
            if decide(left, stats).can_satisfy {
                return EvaluationVerdict::satisfied();
            }
            if decide(right, stats).can_satisfy {
                return EvaluationVerdict::satisfied();
            }
            EvaluationVerdict::unsatisfied(alternative_leaves(node, stats))
        }
        ExpressionNode::Logical(LogicalNode::Not(operand)) => {
            if decide(operand, stats).can_satisfy {
                EvaluationVerdict::unsatisfied(offending_leaves(operand, stats))
            } else {
                EvaluationVerdict::satisfied()
            }
        }
    }
}

/// Every leaf of a failed OR, listed as options the actor could pursue
fn alternative_leaves(node: &ExpressionNode, stats: &StatSnapshot) -> Vec<UnmetLeaf> {
    node.leaves()
        .into_iter()
        .map(|leaf| UnmetLeaf::new(leaf, lookup(stats, leaf.stat_id), false))
        .collect()
}

/// Leaves that currently hold inside a satisfied NOT operand
fn offending_leaves(operand: &ExpressionNode, stats: &StatSnapshot) -> Vec<UnmetLeaf> {
    let leaves = operand.leaves();
    let holding: Vec<UnmetLeaf> = leaves
        .iter()
        .filter_map(|leaf| {
            let current = lookup(stats, leaf.stat_id);
            leaf.is_satisfied_by(current)
                .then(|| UnmetLeaf::new(leaf, current, true))
        })
        .collect();

    if !holding.is_empty() {
        return holding;
    }
    // Operand holds through a nested NOT; report its leaves as the condition
    leaves
        .iter()
        .map(|leaf| UnmetLeaf::new(leaf, lookup(stats, leaf.stat_id), true))
        .collect()
}
