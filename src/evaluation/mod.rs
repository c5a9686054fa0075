//! Evaluation of expression trees against a stat snapshot
//!
//! Two evaluators answer different questions about the same tree:
//! [`evaluate_decision`] gives a verdict plus the blocking leaves, while
//! [`evaluate_counted`] gives met/total counts for progress display. Their
//! notions of "unmet" differ on purpose for OR groups.

mod counting;
mod decision;
mod snapshot;


pub use counting::*;
pub use decision::*;
pub use snapshot::*;
