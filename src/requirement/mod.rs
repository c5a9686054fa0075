//! Flat requirement aggregation

mod aggregator;

pub use aggregator::*;
