//! Description formatter

use std::fmt;

use crate::expression::ast::{ExpressionNode, LogicalNode};

/// Render a tree as parenthesized text; `None` renders as an empty string
pub fn describe(node: Option<&ExpressionNode>) -> String {
    node.map(ToString::to_string).unwrap_or_default()
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Leaf(leaf) => f.write_str(&leaf.description),
            ExpressionNode::Logical(LogicalNode::And(left, right)) => {
                write!(f, "({} AND {})", left, right)
            }
            ExpressionNode::Logical(LogicalNode::Or(left, right)) => {
                write!(f, "({} OR {})", left, right)
            }
            ExpressionNode::Logical(LogicalNode::Not(operand)) => write!(f, "NOT ({})", operand),
        }
    }
}
