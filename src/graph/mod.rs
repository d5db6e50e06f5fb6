//! Graph layer: label indexing, subgraph filtering, path enumeration and
//! the recompute pipeline that joins them.

pub mod filter;
pub mod labels;
pub mod links;
pub mod paths;
pub mod pipeline;
