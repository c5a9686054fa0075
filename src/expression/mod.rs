//! Expression trees decoded from postfix criteria
//!
//! This module turns a flat criteria list into an [`ExpressionNode`] tree
//! (normalizing every comparison into a display-ready leaf) and renders
//! trees back to parenthesized text.

mod ast;
mod builder;
mod formatter;
mod normalizer;

#[cfg(test)]
mod property_tests;

pub use ast::*;
pub use builder::*;
pub use formatter::*;
pub use normalizer::*;
