//! Assessment facade
//!
//! Ties name tables, tree building, description and both evaluators
//! together behind [`RequirementEngine`].

mod engine;
#[cfg(feature = "python")]
mod report;

pub use engine::*;
#[cfg(feature = "python")]
pub use report::*;
