//! Dataset loading.
//!
//! Reads a raw edge list from disk, choosing the reader from the file
//! extension: `.json` for a JSON array of `{source, target, value}` objects,
//! `.db` / `.sqlite` / `.sqlite3` for a flows database.

use std::path::Path;

use crate::db::store::FlowStore;
use crate::error::{FlowGraphError, Result};
use crate::types::Edge;

/// Supported on-disk dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    Sqlite,
}

impl SourceKind {
    /// Detect the format from the file extension (case-insensitive).
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "db" | "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Load every edge from `path`.
pub fn load_edges(path: &Path) -> Result<Vec<Edge>> {
    let kind = SourceKind::detect(path)
        .ok_or_else(|| FlowGraphError::UnsupportedSource(path.display().to_string()))?;

    let edges = match kind {
        SourceKind::Json => read_json(path)?,
        SourceKind::Sqlite => {
            if !path.exists() {
                return Err(FlowGraphError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("database not found: {}", path.display()),
                )));
            }
            // Loading is a read: open_existing never creates schema or
            // switches the journal mode.
            let db_path = path
                .to_str()
                .ok_or_else(|| FlowGraphError::Other(format!("non UTF-8 path: {}", path.display())))?;
            FlowStore::open_existing(db_path)?.load_edges()?
        }
    };

    tracing::info!(path = %path.display(), edges = edges.len(), "loaded dataset");
    Ok(edges)
}

/// Parse a JSON edge list.
pub fn read_json(path: &Path) -> Result<Vec<Edge>> {
    let contents = std::fs::read_to_string(path)?;
    parse_json(&contents)
}

pub fn parse_json(contents: &str) -> Result<Vec<Edge>> {
    Ok(serde_json::from_str(contents)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
