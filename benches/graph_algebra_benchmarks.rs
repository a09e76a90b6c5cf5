// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use cim_graph_algebra::theory::operations::TransitiveClosure;
use cim_graph_algebra::{
    universe, ExecutionContext, Graph, GraphMorphism, Multispan, Name, NamingStrategy, Operation,
    PartitionAlgorithm, Triple,
};

fn n(s: impl Into<String>) -> Name {
    Name::identifier(s)
}

/// `prefix0 -> prefix1 -> ... -> prefix{len-1}`
fn path(prefix: &str, len: usize) -> Arc<Graph> {
    let nodes = (0..len).map(|i| Triple::node(n(format!("{prefix}{i}"))));
    let edges = (1..len).map(|i| {
        Triple::new(
            n(format!("{prefix}{}", i - 1)),
            n(format!("{prefix}e{i}")),
            n(format!("{prefix}{i}")),
        )
    });
    Arc::new(Graph::create(n(prefix), nodes.chain(edges).collect::<Vec<_>>()).unwrap())
}

/// Every element of a path onto the single loop
fn collapse(name: &str, graph: &Arc<Graph>) -> GraphMorphism {
    let mapping = graph.elements().map(|t| {
        let image = if t.is_node() { "0" } else { "00" };
        (t.label().clone(), n(image))
    });
    GraphMorphism::create(n(name), graph.clone(), Arc::clone(&universe::LOOP), mapping.collect::<Vec<_>>())
        .unwrap()
}

fn bench_pullback(c: &mut Criterion) {
    let mut group = c.benchmark_group("pullback");
    for size in [10, 50, 100] {
        let left = collapse("f", &path("a", size));
        let right = collapse("g", &path("b", size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(left.pullback(&right).unwrap()));
        });
    }
    group.finish();
}

fn bench_colimit(c: &mut Criterion) {
    let mut group = c.benchmark_group("colimit");
    for size in [10, 100, 500] {
        let apex = path("s", size);
        let legs: Vec<(Arc<Graph>, GraphMorphism)> = ["l", "r"]
            .iter()
            .map(|side| {
                let target = path(side, size);
                let mapping = apex.elements().map(|t| {
                    let rename = |x: &Name| n(x.to_string().replacen('s', side, 1));
                    (t.label().clone(), rename(t.label()))
                });
                let leg = GraphMorphism::create(
                    n(format!("m{side}")),
                    apex.clone(),
                    target.clone(),
                    mapping.collect::<Vec<_>>(),
                )
                .unwrap();
                (target, leg)
            })
            .collect();
        let span = Multispan::create(
            n("span"),
            apex.clone(),
            legs.iter().map(|(g, _)| g.clone()).collect(),
            legs.iter().map(|(_, m)| m.clone()).collect(),
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(span.colimit(n("glued"), &NamingStrategy::default()).unwrap()));
        });
    }
    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut partition = PartitionAlgorithm::new(0..size);
                for i in (0..size).step_by(3) {
                    partition.relate(&i, &((i * 7 + 1) % size));
                }
                black_box(partition.get_result())
            });
        });
    }
    group.finish();
}

fn bench_transitive_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("transitive_closure");
    for size in [5, 10, 20] {
        let instance = collapse("chain", &path("c", size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut ctx = ExecutionContext::default();
                black_box(TransitiveClosure.execute(&instance, &mut ctx).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_pullback,
    bench_colimit,
    bench_partition,
    bench_transitive_closure
);
criterion_main!(benches);
