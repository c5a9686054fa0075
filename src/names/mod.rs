//! Name resolution for stats, enumerated values and bit flags
//!
//! The engine never owns the game's lookup tables. Hosts hand in a
//! [`NameResolver`]; [`NameTables`] is the serde-loadable implementation.

mod resolver;
pub mod stats;
mod tables;

pub use resolver::*;
pub use tables::*;
