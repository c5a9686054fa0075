//! Raw criterion records and operator decoding
//!
//! Criteria arrive as a flat postfix list: comparisons push a leaf, logical
//! operators combine the leaves before them.

mod operator;
mod record;

pub use operator::*;
pub use record::*;
