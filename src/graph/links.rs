//! Join of the filtered subgraph with the reachable-edge set.

use std::collections::BTreeSet;

use crate::types::{EdgePair, FilteredEdge, Link};

/// Keep every filtered edge whose `(source, target)` pair was reached,
/// projecting its indices and aggregated value.
///
/// `reachable` is a set, so a pair reached along several paths still
/// contributes its value exactly once. Output order follows `filtered`.
pub fn aggregate_links(filtered: &[FilteredEdge], reachable: &BTreeSet<EdgePair>) -> Vec<Link> {
    let keys: BTreeSet<(&str, &str)> = reachable
        .iter()
        .map(|(source, target)| (source.as_str(), target.as_str()))
        .collect();

    filtered
        .iter()
        .filter(|e| keys.contains(&e.pair()))
        .map(|e| Link {
            source_index: e.source_index,
            target_index: e.target_index,
            value: e.value,
        })
        .collect()
}
