//! Postfix (RPN) tree builder

use smallvec::SmallVec;

use crate::criteria::{Criterion, LogicalKind, Operator};
use crate::error::{CriteriaError, Result};
use crate::expression::ast::ExpressionNode;
use crate::expression::normalizer::normalize;
use crate::names::NameResolver;

/// Deepest tree the builder accepts; a single leaf has depth 1.
///
/// Evaluation, formatting and drop all recurse over the tree, so the cap
/// bounds their stack use however long the criteria list is.
pub const MAX_DEPTH: usize = 256;

/// Stack entry: a subtree and its depth
struct Operand {
    node: ExpressionNode,
    depth: usize,
}

type OperandStack = SmallVec<[Operand; 8]>;

/// Build an expression tree from a postfix criteria list.
///
/// Never fails: an empty list, an operator short of operands, or nesting
/// deeper than [`MAX_DEPTH`] yields `None`, which callers treat as "no
/// requirements". When several nodes are left on the stack, the last one
/// pushed is the root.
pub fn build_tree(criteria: &[Criterion], names: &dyn NameResolver) -> Option<ExpressionNode> {
    match assemble(criteria, names) {
        Ok(mut stack) => {
            if stack.len() > 1 {
                tracing::debug!(
                    remaining = stack.len(),
                    "Criteria left un-combined operands; using the last pushed root"
                );
            }
            stack.pop().map(|operand| operand.node)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Malformed criteria list, treating as no requirements");
            None
        }
    }
}

/// Strict variant of [`build_tree`] that reports why a list is malformed
pub fn try_build_tree(
    criteria: &[Criterion],
    names: &dyn NameResolver,
) -> Result<Option<ExpressionNode>> {
    let mut stack = assemble(criteria, names)?;
    if stack.len() > 1 {
        return Err(CriteriaError::TrailingOperands { count: stack.len() });
    }
    Ok(stack.pop().map(|operand| operand.node))
}

fn assemble(criteria: &[Criterion], names: &dyn NameResolver) -> Result<OperandStack> {
    let mut stack = OperandStack::new();

    for (position, criterion) in criteria.iter().enumerate() {
        match criterion.op() {
            Operator::Logical(kind) => {
                let available = stack.len();
                let operand = combine(kind, &mut stack).ok_or(CriteriaError::MissingOperands {
                    operator: kind.name(),
                    position,
                    required: kind.arity(),
                    available,
                })?;
                if operand.depth > MAX_DEPTH {
                    return Err(CriteriaError::TooDeep {
                        depth: operand.depth,
                        position,
                        limit: MAX_DEPTH,
                    });
                }
                stack.push(operand);
            }
            Operator::Comparison(_) | Operator::Unknown(_) => {
                stack.push(Operand {
                    node: ExpressionNode::Leaf(normalize(criterion, names)),
                    depth: 1,
                });
            }
        }
    }

    Ok(stack)
}

/// Pop the operands of `kind`; the first pop is the right-hand operand
fn combine(kind: LogicalKind, stack: &mut OperandStack) -> Option<Operand> {
    if stack.len() < kind.arity() {
        return None;
    }
    match kind {
        LogicalKind::And | LogicalKind::Or => {
            let right = stack.pop()?;
            let left = stack.pop()?;
            let depth = 1 + left.depth.max(right.depth);
            let node = match kind {
                LogicalKind::And => ExpressionNode::and(left.node, right.node),
                _ => ExpressionNode::or(left.node, right.node),
            };
            Some(Operand { node, depth })
        }
        LogicalKind::Not => stack.pop().map(|operand| Operand {
            depth: operand.depth + 1,
            node: ExpressionNode::not(operand.node),
        }),
    }
}
