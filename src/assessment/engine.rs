//! Requirement engine: one set of name tables, the whole pipeline

use crate::criteria::Criterion;
use crate::error::Result;
use crate::evaluation::{
    evaluate_counted, evaluate_decision, progress_of, CountedRow, EvaluationVerdict,
    RequirementProgress, StatSnapshot,
};
use crate::expression::{
    build_tree, describe, normalize_sequence, try_build_tree, ExpressionNode, NormalizedEntry,
};
use crate::names::NameTables;
use crate::requirement::{aggregate_flat, FlatRequirement};

/// Width of a rendered progress bar in cells
pub const PROGRESS_BAR_CELLS: usize = 10;

/// Everything a caller shows for one criteria list and one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementAssessment {
    pub description: String,
    pub verdict: EvaluationVerdict,
    pub progress: RequirementProgress,
    /// Counted tree flattened pre-order; empty when there are no requirements
    pub rows: Vec<CountedRow>,
    pub progress_bar: String,
}

/// Render a progress bar string from a progress value (0.0 to 1.0)
/// Returns a 10-character string like "██████░░░░"
#[inline]
pub fn render_progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * PROGRESS_BAR_CELLS as f64).round() as usize;
    let filled = filled.min(PROGRESS_BAR_CELLS);
    let empty = PROGRESS_BAR_CELLS - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Criteria engine bound to a set of name tables
#[derive(Debug, Clone, Default)]
pub struct RequirementEngine {
    names: NameTables,
}

impl RequirementEngine {
    pub fn new(names: NameTables) -> Self {
        Self { names }
    }

    /// Engine with the built-in Profession/Breed/Gender/Level names
    pub fn with_core_names() -> Self {
        Self::new(NameTables::core())
    }

    pub fn names(&self) -> &NameTables {
        &self.names
    }

    pub fn build(&self, criteria: &[Criterion]) -> Option<ExpressionNode> {
        build_tree(criteria, &self.names)
    }

    pub fn try_build(&self, criteria: &[Criterion]) -> Result<Option<ExpressionNode>> {
        try_build_tree(criteria, &self.names)
    }

    pub fn normalize(&self, criteria: &[Criterion]) -> Vec<NormalizedEntry> {
        normalize_sequence(criteria, &self.names)
    }

    pub fn describe(&self, criteria: &[Criterion]) -> String {
        describe(self.build(criteria).as_ref())
    }

    pub fn decide(&self, criteria: &[Criterion], stats: &StatSnapshot) -> EvaluationVerdict {
        evaluate_decision(self.build(criteria).as_ref(), stats)
    }

    pub fn count(&self, criteria: &[Criterion], stats: &StatSnapshot) -> RequirementProgress {
        let tree = self.build(criteria);
        let counted = tree.as_ref().map(|tree| evaluate_counted(tree, stats));
        progress_of(counted.as_ref())
    }

    pub fn aggregate(&self, criteria: &[Criterion]) -> Vec<FlatRequirement> {
        aggregate_flat(criteria, &self.names)
    }

    /// Build once, then run the formatter and both evaluators
    pub fn assess(&self, criteria: &[Criterion], stats: &StatSnapshot) -> RequirementAssessment {
        let tree = self.build(criteria);
        assess_tree(tree.as_ref(), stats)
    }
}

/// Assess an already built tree
pub fn assess_tree(tree: Option<&ExpressionNode>, stats: &StatSnapshot) -> RequirementAssessment {
    let verdict = evaluate_decision(tree, stats);
    let counted = tree.map(|tree| evaluate_counted(tree, stats));
    let progress = progress_of(counted.as_ref());
    let rows = counted.map(|counted| counted.rows()).unwrap_or_default();

    RequirementAssessment {
        description: describe(tree),
        verdict,
        progress,
        rows,
        progress_bar: render_progress_bar(progress.fraction()),
    }
}
