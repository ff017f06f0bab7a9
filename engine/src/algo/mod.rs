//! Building blocks for random room graphs.

pub mod assignment;
pub mod generation;
pub mod reachability;
