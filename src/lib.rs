//! flowgraph: depth-bounded flow exploration.
//!
//! Loads a weighted directed edge list, restricts it to a selected set of
//! labels, enumerates the simple paths reachable from a start label within a
//! depth bound, and emits the indexed Sankey links that survive both.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod graph;
pub mod observability;
pub mod source;
pub mod types;
pub mod viz;
