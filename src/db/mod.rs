//! Storage layer: SQLite schema and the flows store.

pub mod schema;
pub mod store;
