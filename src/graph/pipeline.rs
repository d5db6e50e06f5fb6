//! Recompute pipeline: filter → enumerate → join.
//!
//! A [`FlowSession`] owns one loaded edge list and its label index. Each
//! call to [`FlowSession::recompute`] derives the diagram from scratch for
//! the given [`Selection`]; nothing but the label index survives between
//! calls, so the session can be shared freely across threads.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::filter::{aggregate_edges, filter_subgraph};
use crate::graph::labels::LabelIndex;
use crate::graph::links::aggregate_links;
use crate::graph::paths::{Adjacency, PathEnumerator};
use crate::types::{Edge, EdgePair, FilteredEdge, Link, Path, Selection, TraversalScope};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Index-aligned node labels plus the links between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyDiagram {
    pub nodes: Vec<String>,
    pub links: Vec<Link>,
}

impl SankeyDiagram {
    /// The column-oriented `node`/`link` shape a Plotly Sankey trace takes.
    pub fn to_plotly(&self) -> serde_json::Value {
        serde_json::json!({
            "node": { "label": self.nodes },
            "link": {
                "source": self.links.iter().map(|l| l.source_index).collect::<Vec<_>>(),
                "target": self.links.iter().map(|l| l.target_index).collect::<Vec<_>>(),
                "value": self.links.iter().map(|l| l.value).collect::<Vec<_>>(),
            },
        })
    }
}

/// The intermediate results behind one diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub scope: TraversalScope,
    pub filtered: Vec<FilteredEdge>,
    pub reachable: BTreeSet<EdgePair>,
    pub paths: Vec<Path>,
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// FlowSession
// ---------------------------------------------------------------------------

/// One loaded dataset, ready to answer selections.
#[derive(Debug, Clone)]
pub struct FlowSession {
    edges: Vec<Edge>,
    labels: LabelIndex,
}

impl FlowSession {
    /// Index the labels of `edges`. This is the only work done up front.
    pub fn new(edges: Vec<Edge>) -> Self {
        let labels = LabelIndex::from_edges(&edges);
        tracing::info!(
            edges = edges.len(),
            labels = labels.len(),
            self_loops = edges.iter().filter(|e| e.is_self_loop()).count(),
            "flow session loaded"
        );
        Self { edges, labels }
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Produce the diagram for `selection`.
    pub fn recompute(&self, selection: &Selection) -> SankeyDiagram {
        let filtered = filter_subgraph(&self.edges, &self.labels, &selection.included);
        let traversal = self.traversal_edges(selection, &filtered);
        let graph = Adjacency::from_edges(&traversal);
        let reachable =
            PathEnumerator::new(&graph).reachable_pairs(&selection.start, selection.max_depth);
        let links = aggregate_links(&filtered, &reachable);

        tracing::debug!(
            start = %selection.start,
            depth = selection.max_depth,
            scope = %selection.scope,
            filtered = filtered.len(),
            walked = graph.edge_count(),
            reachable = reachable.len(),
            links = links.len(),
            "recomputed diagram"
        );

        SankeyDiagram {
            nodes: self.labels.labels().to_vec(),
            links,
        }
    }

    /// Like [`recompute`](Self::recompute) but keeps every intermediate
    /// result, including the enumerated paths.
    pub fn trace(&self, selection: &Selection) -> Trace {
        let filtered = filter_subgraph(&self.edges, &self.labels, &selection.included);
        let enumeration = {
            let traversal = self.traversal_edges(selection, &filtered);
            let graph = Adjacency::from_edges(&traversal);
            PathEnumerator::new(&graph).enumerate(&selection.start, selection.max_depth)
        };
        let links = aggregate_links(&filtered, &enumeration.reachable);

        Trace {
            scope: selection.scope,
            filtered,
            reachable: enumeration.reachable,
            paths: enumeration.paths,
            links,
        }
    }

    /// The aggregated edges the enumerator walks for `selection.scope`.
    fn traversal_edges<'s>(
        &self,
        selection: &Selection,
        filtered: &'s [FilteredEdge],
    ) -> Cow<'s, [FilteredEdge]> {
        match selection.scope {
            TraversalScope::Included => Cow::Borrowed(filtered),
            TraversalScope::Full => Cow::Owned(aggregate_edges(&self.edges, &self.labels)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
