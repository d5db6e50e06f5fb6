//! Core domain types for flowgraph.
//!
//! Everything here is plain data: edges as they arrive from the loading
//! layer, the aggregated edges produced by the subgraph filter, enumerated
//! paths, and the indexed links handed to the renderer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{FlowGraphError, Result};

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A raw weighted edge. Duplicate `(source, target)` pairs are additive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    /// True when the edge starts and ends at the same label.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A `(source, target)` label pair, used as the join key between the
/// filtered subgraph and the reachable-edge set.
pub type EdgePair = (String, String);

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A label together with its dense index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    pub index: usize,
}

// ---------------------------------------------------------------------------
// FilteredEdge
// ---------------------------------------------------------------------------

/// An aggregated edge inside the selected subgraph, annotated with the
/// resolved indices of both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredEdge {
    pub source: String,
    pub target: String,
    pub source_index: usize,
    pub target_index: usize,
    pub value: f64,
}

impl FilteredEdge {
    pub fn pair(&self) -> (&str, &str) {
        (self.source.as_str(), self.target.as_str())
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A simple directed path from `start`. `sequence` never repeats a label
/// and `depth == sequence.len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub start: String,
    pub current: String,
    pub depth: u32,
    pub sequence: Vec<String>,
}

// ---------------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------------

/// One output link of the Sankey diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source_index: usize,
    pub target_index: usize,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// TraversalScope
// ---------------------------------------------------------------------------

/// Which graph the path enumerator walks before the final join.
///
/// `Included` walks only the selected subgraph; `Full` walks every edge,
/// so a pair can become reachable through nodes outside the selection.
/// Links are confined to the included set either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalScope {
    #[default]
    Included,
    Full,
}

impl TraversalScope {
    /// Parse from a loose string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "included" | "filtered" | "subgraph" => Some(Self::Included),
            "full" | "all" | "raw" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for TraversalScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The interactive selection driving one recompute: start label, depth
/// bound, included labels, and traversal scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub max_depth: u32,
    pub start: String,
    pub included: BTreeSet<String>,
    pub scope: TraversalScope,
}

impl Selection {
    pub fn new<I, S>(start: impl Into<String>, max_depth: u32, included: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_depth,
            start: start.into(),
            included: included.into_iter().map(Into::into).collect(),
            scope: TraversalScope::default(),
        }
    }

    pub fn with_scope(mut self, scope: TraversalScope) -> Self {
        self.scope = scope;
        self
    }

    /// Build a selection from untrusted input (CLI flags, query strings).
    ///
    /// A negative depth or one above `max_depth_limit` is rejected; a depth
    /// of zero is accepted and simply yields an empty diagram. `included`
    /// of `None` selects every label in `all_labels`.
    pub fn from_raw(
        start: &str,
        depth: i64,
        included: Option<Vec<String>>,
        all_labels: &[String],
        max_depth_limit: u32,
    ) -> Result<Self> {
        if depth < 0 {
            return Err(FlowGraphError::InvalidSelection(format!(
                "depth must not be negative (got {depth})"
            )));
        }
        if depth > i64::from(max_depth_limit) {
            return Err(FlowGraphError::InvalidSelection(format!(
                "depth {depth} exceeds the limit of {max_depth_limit}"
            )));
        }
        let included: BTreeSet<String> = match included {
            Some(labels) => labels
                .into_iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            None => all_labels.iter().cloned().collect(),
        };
        Ok(Self {
            max_depth: depth as u32,
            start: start.to_string(),
            included,
            scope: TraversalScope::default(),
        })
    }
}

/// Split a comma-separated label list, dropping blank entries.
pub fn split_labels(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
