//! Evaluation Benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phenograph_core::{FunctionId, Graph, GraphConfig, NodeId};

/// A balanced binary tree `depth` levels tall; every node reads two children.
///
/// Invalidation revisits a node once per path from the mutated node, so its
/// cost grows with the number of paths through the graph. In a tree each leaf
/// has one path to the root, which keeps the walk at `depth + 1` visits.
fn binary_tree(config: GraphConfig, depth: u32) -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::with_config(config);
    let mut level: Vec<NodeId> = (0..1usize << depth)
        .map(|i| graph.add_constant(i as f64))
        .collect();
    let leaf = level[0];

    for height in 0..depth as usize {
        let function = FunctionId::ALL[1 + height % (FunctionId::COUNT - 1)];
        level = level
            .chunks(2)
            .map(|children| {
                let node = graph.add_function(function);
                graph.add_inputs(node, children).unwrap();
                node
            })
            .collect();
    }

    (graph, level[0], leaf)
}

fn bench_cached_read(c: &mut Criterion) {
    let (mut graph, root, _) = binary_tree(GraphConfig::default(), 10);
    graph.output(root).unwrap();

    c.bench_function("cached_read", |b| {
        b.iter(|| black_box(graph.output(root).unwrap()));
    });
}

fn bench_invalidate_and_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("invalidate_and_read");

    for depth in [4, 8, 12] {
        let (mut graph, root, leaf) = binary_tree(GraphConfig::default(), depth);
        let mut value = 0.0;
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                value += 1.0;
                graph.set_default_output(leaf, value).unwrap();
                black_box(graph.output(root).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_wide_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_reduction");

    for (name, config) in [
        ("sequential", GraphConfig::sequential()),
        ("parallel", GraphConfig { parallel_threshold: 1 }),
    ] {
        let mut graph = Graph::with_config(config);
        let inputs: Vec<NodeId> = (0..100_000).map(|i| graph.add_constant(i as f64)).collect();
        let root = graph.add_function(FunctionId::Sin);
        graph.add_inputs(root, &inputs).unwrap();

        group.bench_function(name, |b| {
            b.iter(|| {
                graph.set_function(root, FunctionId::Sin).unwrap();
                black_box(graph.output(root).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_read,
    bench_invalidate_and_read,
    bench_wide_reduction
);
criterion_main!(benches);
