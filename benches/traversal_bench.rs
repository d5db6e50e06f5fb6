//! Benchmarks for the recompute pipeline on dense, cyclic graphs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use flowgraph::graph::pipeline::FlowSession;
use flowgraph::types::{Edge, Selection};

/// Every node links to the next `fanout` nodes, wrapping around.
fn ring_graph(nodes: usize, fanout: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(nodes * fanout);
    for i in 0..nodes {
        for step in 1..=fanout {
            let j = (i + step) % nodes;
            edges.push(Edge::new(format!("node_{i}"), format!("node_{j}"), (i + j) as f64));
        }
    }
    edges
}

fn bench_recompute(c: &mut Criterion) {
    let session = FlowSession::new(ring_graph(30, 3));
    let all = session.labels().labels().to_vec();

    let mut group = c.benchmark_group("recompute");
    for depth in [2u32, 4, 6, 8] {
        let selection = Selection::new("node_0", depth, all.clone());
        group.bench_with_input(BenchmarkId::from_parameter(depth), &selection, |b, sel| {
            b.iter(|| black_box(session.recompute(black_box(sel))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
