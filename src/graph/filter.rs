//! Subgraph restriction and edge aggregation.
//!
//! Raw edges sharing a `(source, target)` pair are summed into one
//! [`FilteredEdge`]. The output is ordered by `(source, target)` so that
//! identical inputs always produce identical edge lists.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::labels::LabelIndex;
use crate::types::{Edge, FilteredEdge};

/// Aggregate every raw edge without restriction.
///
/// This is the graph walked when the traversal scope is the full graph.
pub fn aggregate_edges(edges: &[Edge], labels: &LabelIndex) -> Vec<FilteredEdge> {
    aggregate(edges.iter().map(|e| (e.source.as_str(), e.target.as_str(), e.value)), labels)
}

/// Keep only edges whose endpoints are both in `included`, summing values
/// per `(source, target)` pair.
///
/// An empty `included` set yields an empty list. Labels in `included` that
/// the index does not know simply match nothing.
pub fn filter_subgraph(
    edges: &[Edge],
    labels: &LabelIndex,
    included: &BTreeSet<String>,
) -> Vec<FilteredEdge> {
    if included.is_empty() {
        return Vec::new();
    }

    aggregate(
        edges
            .iter()
            .filter(|e| included.contains(&e.source) && included.contains(&e.target))
            .map(|e| (e.source.as_str(), e.target.as_str(), e.value)),
        labels,
    )
}

/// Aggregate already-aggregated edges again. Because every pair is already
/// unique this returns an equal list.
pub fn reaggregate(edges: &[FilteredEdge], labels: &LabelIndex) -> Vec<FilteredEdge> {
    aggregate(
        edges.iter().map(|e| (e.source.as_str(), e.target.as_str(), e.value)),
        labels,
    )
}

fn aggregate<'a>(
    triples: impl Iterator<Item = (&'a str, &'a str, f64)>,
    labels: &LabelIndex,
) -> Vec<FilteredEdge> {
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for (source, target, value) in triples {
        *sums.entry((source, target)).or_insert(0.0) += value;
    }

    sums.into_iter()
        .filter_map(|((source, target), value)| {
            // Every label in a loaded edge list is indexed; anything else
            // comes from a foreign edge list and cannot be rendered.
            let source_index = labels.index_of(source)?;
            let target_index = labels.index_of(target)?;
            Some(FilteredEdge {
                source: source.to_string(),
                target: target.to_string(),
                source_index,
                target_index,
                value,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn sample_edges() -> Vec<Edge> {
        vec![
            Edge::new("A", "B", 5.0),
            Edge::new("B", "C", 3.0),
            Edge::new("A", "C", 2.0),
            Edge::new("C", "A", 1.0),
        ]
    }

    fn pairs(edges: &[FilteredEdge]) -> Vec<(&str, &str)> {
        edges.iter().map(FilteredEdge::pair).collect()
    }

    #[test]
    fn full_selection_keeps_every_pair() {
        let edges = sample_edges();
        let idx = LabelIndex::from_edges(&edges);
        let out = filter_subgraph(&edges, &idx, &set(&["A", "B", "C"]));
        assert_eq!(
            pairs(&out),
            vec![("A", "B"), ("A", "C"), ("B", "C"), ("C", "A")]
        );
        assert_eq!(out, aggregate_edges(&edges, &idx));
    }

    #[test]
    fn excluded_label_drops_touching_edges() {
        let edges = sample_edges();
        let idx = LabelIndex::from_edges(&edges);
        let out = filter_subgraph(&edges, &idx, &set(&["A", "B"]));
        assert_eq!(
            out,
            vec![FilteredEdge {
                source: "A".into(),
                target: "B".into(),
                source_index: 0,
                target_index: 1,
                value: 5.0,
            }]
        );
    }

    #[test]
    fn duplicate_pairs_are_summed() {
        let edges = vec![
            Edge::new("A", "B", 1.5),
            Edge::new("A", "B", 2.5),
            Edge::new("B", "A", 4.0),
        ];
        let idx = LabelIndex::from_edges(&edges);
        let out = filter_subgraph(&edges, &idx, &set(&["A", "B"]));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pair(), ("A", "B"));
        assert_eq!(out[0].value, 4.0);
        assert_eq!(out[1].value, 4.0);
    }

    #[test]
    fn empty_selection_yields_nothing() {
        let edges = sample_edges();
        let idx = LabelIndex::from_edges(&edges);
        assert!(filter_subgraph(&edges, &idx, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn unknown_labels_match_nothing() {
        let edges = sample_edges();
        let idx = LabelIndex::from_edges(&edges);
        assert!(filter_subgraph(&edges, &idx, &set(&["X", "Y"])).is_empty());
        assert_eq!(filter_subgraph(&edges, &idx, &set(&["A", "B", "X"])).len(), 1);
    }

    #[test]
    fn self_loops_survive_filtering() {
        let edges = vec![Edge::new("A", "A", 2.0), Edge::new("A", "B", 1.0)];
        let idx = LabelIndex::from_edges(&edges);
        let out = filter_subgraph(&edges, &idx, &set(&["A", "B"]));
        assert_eq!(pairs(&out), vec![("A", "A"), ("A", "B")]);
    }

    #[test]
    fn reaggregation_is_a_no_op() {
        let edges = vec![
            Edge::new("A", "B", 1.0),
            Edge::new("A", "B", 1.0),
            Edge::new("B", "C", 7.0),
        ];
        let idx = LabelIndex::from_edges(&edges);
        let once = aggregate_edges(&edges, &idx);
        assert_eq!(reaggregate(&once, &idx), once);
    }

    #[test]
    fn edges_carry_resolved_indices() {
        let edges = sample_edges();
        let idx = LabelIndex::from_edges(&edges);
        for e in aggregate_edges(&edges, &idx) {
            assert_eq!(idx.label(e.source_index), Some(e.source.as_str()));
            assert_eq!(idx.label(e.target_index), Some(e.target.as_str()));
        }
    }
}
