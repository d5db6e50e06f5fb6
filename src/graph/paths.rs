//! Depth-bounded enumeration of simple directed paths.
//!
//! The traversal is an explicit frontier expansion over an arena of path
//! records. Each record stores its last node, its parent record and its
//! depth, so a path's full sequence is recovered by walking parent links.
//! Cycle prevention is path-local: a node may not reappear within one path,
//! but the same node can show up on many different paths.
//!
//! The number of paths grows as (branching factor)^max_depth. Depths are
//! small, user-chosen integers, so the full enumeration is kept.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{EdgePair, FilteredEdge, Path};

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Outgoing neighbour lists, keyed and ordered by label.
#[derive(Debug, Clone, Default)]
pub struct Adjacency<'a> {
    out: BTreeMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    /// Build from `(source, target)` pairs. Duplicate pairs collapse.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut sets: BTreeMap<&'a str, BTreeSet<&'a str>> = BTreeMap::new();
        for (source, target) in pairs {
            sets.entry(source).or_default().insert(target);
        }
        Self {
            out: sets
                .into_iter()
                .map(|(source, targets)| (source, targets.into_iter().collect()))
                .collect(),
        }
    }

    pub fn from_edges(edges: &'a [FilteredEdge]) -> Self {
        Self::from_pairs(edges.iter().map(FilteredEdge::pair))
    }

    pub fn neighbors(&self, label: &str) -> &[&'a str] {
        self.out.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.out.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything one enumeration produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Deduplicated `(source, target)` pairs used by at least one path.
    pub reachable: BTreeSet<EdgePair>,
    /// Every path with depth >= 1, in the order it was discovered.
    pub paths: Vec<Path>,
}

/// One entry in the path arena.
#[derive(Debug, Clone, Copy)]
struct PathRecord<'a> {
    node: &'a str,
    parent: Option<usize>,
    depth: u32,
}

// ---------------------------------------------------------------------------
// PathEnumerator
// ---------------------------------------------------------------------------

/// Enumerates cycle-free paths over an [`Adjacency`].
pub struct PathEnumerator<'g, 'a> {
    graph: &'g Adjacency<'a>,
}

impl<'g, 'a> PathEnumerator<'g, 'a> {
    pub fn new(graph: &'g Adjacency<'a>) -> Self {
        Self { graph }
    }

    /// The set of edges that occur in at least one simple path of at most
    /// `max_depth` edges starting at `start`.
    ///
    /// An unknown `start` or a `max_depth` of zero yields an empty set.
    pub fn reachable_pairs(&self, start: &str, max_depth: u32) -> BTreeSet<EdgePair> {
        let mut reachable = BTreeSet::new();
        self.expand(start, max_depth, |arena, id| {
            let rec = arena[id];
            if let Some(parent) = rec.parent {
                reachable.insert((arena[parent].node.to_string(), rec.node.to_string()));
            }
        });
        reachable
    }

    /// Like [`reachable_pairs`](Self::reachable_pairs) but also materializes
    /// every enumerated path.
    pub fn enumerate(&self, start: &str, max_depth: u32) -> Enumeration {
        let mut out = Enumeration::default();
        self.expand(start, max_depth, |arena, id| {
            let rec = arena[id];
            if let Some(parent) = rec.parent {
                out.reachable
                    .insert((arena[parent].node.to_string(), rec.node.to_string()));
            }
            let sequence: Vec<String> = sequence_of(arena, id)
                .into_iter()
                .map(str::to_string)
                .collect();
            out.paths.push(Path {
                start: start.to_string(),
                current: rec.node.to_string(),
                depth: rec.depth,
                sequence,
            });
        });
        out
    }

    /// Frontier expansion. `on_extend` sees every successful extension
    /// right after it is pushed to the arena.
    fn expand<F>(&self, start: &str, max_depth: u32, mut on_extend: F)
    where
        F: FnMut(&[PathRecord<'_>], usize),
    {
        if max_depth == 0 {
            return;
        }

        let mut arena: Vec<PathRecord<'_>> = vec![PathRecord {
            node: start,
            parent: None,
            depth: 0,
        }];
        let mut frontier: Vec<usize> = vec![0];

        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();

            for &id in &frontier {
                let rec = arena[id];
                if rec.depth >= max_depth {
                    continue;
                }

                for &next in self.graph.neighbors(rec.node) {
                    if path_contains(&arena, id, next) {
                        continue;
                    }
                    let child = arena.len();
                    arena.push(PathRecord {
                        node: next,
                        parent: Some(id),
                        depth: rec.depth + 1,
                    });
                    on_extend(&arena, child);
                    if rec.depth + 1 < max_depth {
                        next_frontier.push(child);
                    }
                }
            }

            frontier = next_frontier;
        }

        tracing::debug!(
            start,
            max_depth,
            paths = arena.len() - 1,
            "path enumeration finished"
        );
    }
}

/// True when `label` already occurs on the path ending at record `id`.
fn path_contains(arena: &[PathRecord<'_>], id: usize, label: &str) -> bool {
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        if arena[i].node == label {
            return true;
        }
        cursor = arena[i].parent;
    }
    false
}

/// The labels of the path ending at record `id`, start first.
fn sequence_of<'s>(arena: &[PathRecord<'s>], id: usize) -> Vec<&'s str> {
    let mut seq = Vec::with_capacity(arena[id].depth as usize + 1);
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        seq.push(arena[i].node);
        cursor = arena[i].parent;
    }
    seq.reverse();
    seq
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
