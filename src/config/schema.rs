//! Configuration data structures for flowgraph.
//!
//! Defines the YAML config format: dataset location, selection defaults and
//! HTTP server settings. Every field has a default, so an empty file is a
//! valid config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::labels::LabelIndex;
use crate::types::{Selection, TraversalScope};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for flowgraph.
///
/// Loaded from YAML files, environment variables, and CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraphConfig {
    /// Dataset to load when no `--data` flag is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Defaults for the interactive selection.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// HTTP server settings for `flowgraph serve`.
    #[serde(default)]
    pub server: ServerConfig,
}

// ---------------------------------------------------------------------------
// SelectionConfig
// ---------------------------------------------------------------------------

/// Selection defaults and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Depth used when the caller does not give one.
    #[serde(default = "default_depth")]
    pub default_depth: u32,

    /// Largest depth a caller may request.
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: u32,

    /// Start label used when the caller does not give one. Falls back to
    /// the first label of the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_start: Option<String>,

    /// Which graph the path enumerator walks.
    #[serde(default)]
    pub scope: TraversalScope,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            max_depth_limit: default_max_depth_limit(),
            default_start: None,
            scope: TraversalScope::default(),
        }
    }
}

impl SelectionConfig {
    /// Fill in whatever the caller left out and validate the result.
    ///
    /// The start label falls back to `default_start`, then to the first
    /// label of the dataset. `included` of `None` selects every label.
    pub fn resolve(
        &self,
        labels: &LabelIndex,
        start: Option<&str>,
        depth: Option<i64>,
        included: Option<Vec<String>>,
        scope: Option<TraversalScope>,
    ) -> Result<Selection> {
        let start = start
            .or(self.default_start.as_deref())
            .or_else(|| labels.label(0))
            .unwrap_or_default();
        if !labels.contains(start) {
            tracing::warn!(start, "start label is not in the dataset; the diagram will be empty");
        }
        let depth = depth.unwrap_or(i64::from(self.default_depth));

        Ok(
            Selection::from_raw(start, depth, included, labels.labels(), self.max_depth_limit)?
                .with_scope(scope.unwrap_or(self.scope)),
        )
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_depth() -> u32 {
    2
}

fn default_max_depth_limit() -> u32 {
    20
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
