//! Data structures used by algorithms.

pub mod graph;
