//! Property-based tests for flowgraph using proptest.
//!
//! These tests verify invariants that must hold for all possible edge lists
//! and selections, finding edge cases that unit tests might miss.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use flowgraph::graph::filter::{aggregate_edges, filter_subgraph, reaggregate};
use flowgraph::graph::labels::LabelIndex;
use flowgraph::graph::links::aggregate_links;
use flowgraph::graph::paths::{Adjacency, PathEnumerator};
use flowgraph::graph::pipeline::FlowSession;
use flowgraph::types::{Edge, Selection, TraversalScope};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Labels from a small alphabet so that graphs are dense and cyclic.
fn arb_label() -> impl Strategy<Value = String> {
    "[a-f]".prop_map(|s| s)
}

/// Integer-valued weights keep floating point sums exact in any order.
fn arb_edge() -> impl Strategy<Value = Edge> {
    (arb_label(), arb_label(), 1u32..100u32)
        .prop_map(|(source, target, value)| Edge::new(source, target, f64::from(value)))
}

fn arb_edges() -> impl Strategy<Value = Vec<Edge>> {
    prop::collection::vec(arb_edge(), 0..24)
}

fn arb_included() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(arb_label(), 0..6)
}

// ===========================================================================
// Path invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn paths_never_repeat_a_label(edges in arb_edges(), start in arb_label(), depth in 0u32..5) {
        let labels = LabelIndex::from_edges(&edges);
        let full = aggregate_edges(&edges, &labels);
        let graph = Adjacency::from_edges(&full);
        for path in PathEnumerator::new(&graph).enumerate(&start, depth).paths {
            let distinct: BTreeSet<&String> = path.sequence.iter().collect();
            prop_assert_eq!(distinct.len(), path.sequence.len(), "repeated label in {:?}", path.sequence);
        }
    }

    #[test]
    fn path_depth_matches_sequence(edges in arb_edges(), start in arb_label(), depth in 0u32..5) {
        let labels = LabelIndex::from_edges(&edges);
        let full = aggregate_edges(&edges, &labels);
        let graph = Adjacency::from_edges(&full);
        for path in PathEnumerator::new(&graph).enumerate(&start, depth).paths {
            prop_assert!(path.depth >= 1 && path.depth <= depth);
            prop_assert_eq!(path.depth as usize, path.sequence.len() - 1);
            prop_assert_eq!(path.sequence.first(), Some(&start));
            prop_assert_eq!(path.sequence.last(), Some(&path.current));
        }
    }

    #[test]
    fn reachable_pairs_are_consecutive_path_steps(edges in arb_edges(), start in arb_label(), depth in 0u32..5) {
        let labels = LabelIndex::from_edges(&edges);
        let full = aggregate_edges(&edges, &labels);
        let graph = Adjacency::from_edges(&full);
        let e = PathEnumerator::new(&graph).enumerate(&start, depth);
        let from_paths: BTreeSet<(String, String)> = e
            .paths
            .iter()
            .flat_map(|p| p.sequence.windows(2).map(|w| (w[0].clone(), w[1].clone())))
            .collect();
        prop_assert_eq!(e.reachable, from_paths);
    }
}

// ===========================================================================
// Filter invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn full_selection_sums_every_pair(edges in arb_edges()) {
        let labels = LabelIndex::from_edges(&edges);
        let all: BTreeSet<String> = labels.labels().iter().cloned().collect();

        let mut expected: BTreeMap<(String, String), f64> = BTreeMap::new();
        for e in &edges {
            *expected.entry((e.source.clone(), e.target.clone())).or_insert(0.0) += e.value;
        }

        let actual: BTreeMap<(String, String), f64> = filter_subgraph(&edges, &labels, &all)
            .into_iter()
            .map(|e| ((e.source, e.target), e.value))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn filtered_edges_stay_inside_selection(edges in arb_edges(), included in arb_included()) {
        let labels = LabelIndex::from_edges(&edges);
        for e in filter_subgraph(&edges, &labels, &included) {
            prop_assert!(included.contains(&e.source));
            prop_assert!(included.contains(&e.target));
        }
    }

    #[test]
    fn reaggregation_is_idempotent(edges in arb_edges(), included in arb_included()) {
        let labels = LabelIndex::from_edges(&edges);
        let once = filter_subgraph(&edges, &labels, &included);
        prop_assert_eq!(reaggregate(&once, &labels), once);
    }

    #[test]
    fn label_indices_ignore_edge_order(edges in arb_edges()) {
        let mut reversed = edges.clone();
        reversed.reverse();
        prop_assert_eq!(LabelIndex::from_edges(&edges), LabelIndex::from_edges(&reversed));
    }
}

// ===========================================================================
// Link invariants
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn links_are_the_intersection(
        edges in arb_edges(),
        included in arb_included(),
        start in arb_label(),
        depth in 0u32..5,
    ) {
        let labels = LabelIndex::from_edges(&edges);
        let filtered = filter_subgraph(&edges, &labels, &included);
        let graph = Adjacency::from_edges(&filtered);
        let reachable = PathEnumerator::new(&graph).reachable_pairs(&start, depth);
        let links = aggregate_links(&filtered, &reachable);

        let expected: Vec<(usize, usize, f64)> = filtered
            .iter()
            .filter(|e| reachable.contains(&(e.source.clone(), e.target.clone())))
            .map(|e| (e.source_index, e.target_index, e.value))
            .collect();
        let actual: Vec<(usize, usize, f64)> = links
            .iter()
            .map(|l| (l.source_index, l.target_index, l.value))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn link_endpoints_are_included(
        edges in arb_edges(),
        included in arb_included(),
        start in arb_label(),
        depth in 0u32..5,
    ) {
        let session = FlowSession::new(edges);
        for scope in [TraversalScope::Included, TraversalScope::Full] {
            let sel = Selection::new(start.clone(), depth, included.clone()).with_scope(scope);
            let d = session.recompute(&sel);
            for l in &d.links {
                prop_assert!(included.contains(&d.nodes[l.source_index]));
                prop_assert!(included.contains(&d.nodes[l.target_index]));
            }
        }
    }

    #[test]
    fn unknown_start_or_zero_depth_is_empty(edges in arb_edges(), included in arb_included(), depth in 0u32..5) {
        let session = FlowSession::new(edges);
        prop_assert!(session.recompute(&Selection::new("zz", depth, included.clone())).links.is_empty());
        prop_assert!(session.recompute(&Selection::new("a", 0, included)).links.is_empty());
    }

    #[test]
    fn deeper_search_never_loses_links(edges in arb_edges(), start in arb_label(), depth in 0u32..4) {
        let session = FlowSession::new(edges);
        let all = session.labels().labels().to_vec();
        let shallow = session.recompute(&Selection::new(start.clone(), depth, all.clone())).links;
        let deep = session.recompute(&Selection::new(start, depth + 1, all)).links;
        for l in &shallow {
            prop_assert!(deep.contains(l));
        }
    }

    #[test]
    fn full_scope_is_a_superset(
        edges in arb_edges(),
        included in arb_included(),
        start in arb_label(),
        depth in 0u32..5,
    ) {
        let session = FlowSession::new(edges);
        let sel = Selection::new(start, depth, included);
        let narrow = session.recompute(&sel).links;
        let wide = session.recompute(&sel.clone().with_scope(TraversalScope::Full)).links;
        for l in &narrow {
            prop_assert!(wide.contains(l));
        }
    }
}
