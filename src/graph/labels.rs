//! Canonical label ↔ index mapping.
//!
//! Indices are the positions of the labels in ascending sorted order, so the
//! same edge list always produces the same numbering. The mapping is built
//! once per dataset load and is read-only afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Edge, Node};

/// Sorted distinct labels and their dense indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelIndex {
    /// Collect every source and target label from `edges`.
    ///
    /// An empty edge list yields an empty index.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let distinct: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        let labels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Self { labels, index }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.labels.iter().enumerate().map(|(index, label)| Node {
            label: label.clone(),
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
