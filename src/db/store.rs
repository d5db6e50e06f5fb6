//! SQLite storage for flow datasets.
//!
//! Uses `rusqlite` with `prepare_cached` so repeated loads and inserts reuse
//! compiled statements.

use rusqlite::{params, Connection, Row};

use crate::db::schema::{has_flows_table, initialize_database, open_read_only};
use crate::error::{FlowGraphError, Result};
use crate::types::Edge;

// ---------------------------------------------------------------------------
// FlowStats
// ---------------------------------------------------------------------------

/// Aggregate statistics about a stored dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStats {
    pub rows: usize,
    pub pairs: usize,
    pub labels: usize,
    pub total_value: f64,
}

// ---------------------------------------------------------------------------
// FlowStore
// ---------------------------------------------------------------------------

/// Typed wrapper around a flows database.
pub struct FlowStore {
    pub conn: Connection,
}

impl std::fmt::Debug for FlowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowStore").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// SQL constants
// ---------------------------------------------------------------------------

const INSERT_FLOW_SQL: &str = "INSERT INTO flows (source, target, value) VALUES (?1, ?2, ?3)";

const DELETE_FLOWS_SQL: &str = "DELETE FROM flows";

const SELECT_FLOWS_SQL: &str = "SELECT source, target, value FROM flows ORDER BY id";

const COUNT_LABELS_SQL: &str = "\
SELECT count(*) FROM (
    SELECT source AS label FROM flows
    UNION
    SELECT target AS label FROM flows
)";

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<Edge> {
    Ok(Edge {
        source: row.get(0)?,
        target: row.get(1)?,
        value: row.get(2)?,
    })
}

// ---------------------------------------------------------------------------
// Implementation
// ---------------------------------------------------------------------------

impl FlowStore {
    /// Open (or create) the database at `db_path` with the flows schema.
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = initialize_database(db_path)?;
        Ok(Self { conn })
    }

    /// Open an existing flows database for reading. Nothing is created or
    /// migrated; a database without a `flows` table is rejected.
    pub fn open_existing(db_path: &str) -> Result<Self> {
        let conn = open_read_only(db_path)?;
        if !has_flows_table(&conn)? {
            return Err(FlowGraphError::UnsupportedSource(format!(
                "{db_path} has no flows table"
            )));
        }
        Ok(Self { conn })
    }

    /// Wrap an already-initialized connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Append edges inside a single transaction.
    pub fn insert_edges(&self, edges: &[Edge]) -> Result<()> {
        self.write_edges(edges, false)
    }

    /// Replace every stored row with `edges` inside a single transaction.
    pub fn replace_edges(&self, edges: &[Edge]) -> Result<()> {
        self.write_edges(edges, true)
    }

    fn write_edges(&self, edges: &[Edge], clear: bool) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = if clear {
            tx.execute(DELETE_FLOWS_SQL, [])?
        } else {
            0
        };
        {
            let mut stmt = tx.prepare_cached(INSERT_FLOW_SQL)?;
            for edge in edges {
                stmt.execute(params![edge.source, edge.target, edge.value])?;
            }
        }
        tx.commit()?;
        tracing::debug!(rows = edges.len(), removed, "wrote flow rows");
        Ok(())
    }

    /// Every stored row, in insertion order.
    pub fn load_edges(&self) -> Result<Vec<Edge>> {
        let mut stmt = self.conn.prepare_cached(SELECT_FLOWS_SQL)?;
        let rows = stmt.query_and_then([], row_to_edge)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub fn get_stats(&self) -> Result<FlowStats> {
        let (rows, total_value): (i64, f64) = self.conn.query_row(
            "SELECT count(*), coalesce(sum(value), 0.0) FROM flows",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let pairs: i64 = self.conn.query_row(
            "SELECT count(*) FROM (SELECT DISTINCT source, target FROM flows)",
            [],
            |row| row.get(0),
        )?;
        let labels: i64 = self.conn.query_row(COUNT_LABELS_SQL, [], |row| row.get(0))?;

        Ok(FlowStats {
            rows: rows as usize,
            pairs: pairs as usize,
            labels: labels as usize,
            total_value,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
