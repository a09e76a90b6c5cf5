// Copyright 2025 Cowboy AI, LLC.

//! Algebraic laws of morphisms and partitions, checked on generated graphs

use std::collections::BTreeSet;
use std::sync::Arc;

use cim_graph_algebra::{Graph, GraphMorphism, Name, PartitionAlgorithm, Triple};
use proptest::collection::vec;
use proptest::prelude::*;

/// A graph with nodes `0..nodes` and edges between node indices
#[derive(Debug, Clone)]
struct Shape {
    nodes: usize,
    edges: Vec<(usize, usize)>,
}

fn shape() -> impl Strategy<Value = Shape> {
    (1usize..6)
        .prop_flat_map(|nodes| (Just(nodes), vec((0..nodes, 0..nodes), 0..10)))
        .prop_map(|(nodes, edges)| Shape { nodes, edges })
}

fn node(graph: &str, index: usize) -> Name {
    Name::identifier(format!("{graph}{index}"))
}

fn complete_edge(graph: &str, source: usize, target: usize) -> Name {
    Name::identifier(format!("{graph}{source}_{target}"))
}

fn build(graph: &str, shape: &Shape) -> Arc<Graph> {
    let nodes = (0..shape.nodes).map(|i| Triple::node(node(graph, i)));
    let edges = shape.edges.iter().enumerate().map(|(k, (s, t))| {
        Triple::new(
            node(graph, *s),
            Name::identifier(format!("{graph}e{k}")),
            node(graph, *t),
        )
    });
    Arc::new(Graph::create(Name::identifier(graph), nodes.chain(edges).collect::<Vec<_>>()).unwrap())
}

/// Every pair of nodes joined by exactly one edge, loops included
fn complete(graph: &str, size: usize) -> Arc<Graph> {
    let mut elements: Vec<Triple> = (0..size).map(|i| Triple::node(node(graph, i))).collect();
    for s in 0..size {
        for t in 0..size {
            elements.push(Triple::new(
                node(graph, s),
                complete_edge(graph, s, t),
                node(graph, t),
            ));
        }
    }
    Arc::new(Graph::create(Name::identifier(graph), elements).unwrap())
}

/// The morphism out of `shape` that sends node `i` to `assign[i]` in a complete graph
fn out_of_shape(
    name: &str,
    domain: &str,
    shape: &Shape,
    codomain: &str,
    size: usize,
    assign: &[usize],
) -> GraphMorphism {
    let f = |i: usize| assign[i] % size;
    let mut mapping: Vec<(Name, Name)> = (0..shape.nodes)
        .map(|i| (node(domain, i), node(codomain, f(i))))
        .collect();
    for (k, (s, t)) in shape.edges.iter().enumerate() {
        mapping.push((
            Name::identifier(format!("{domain}e{k}")),
            complete_edge(codomain, f(*s), f(*t)),
        ));
    }
    GraphMorphism::create(
        Name::identifier(name),
        build(domain, shape),
        complete(codomain, size),
        mapping,
    )
    .unwrap()
}

/// The morphism between complete graphs induced by a node assignment
fn between_complete(
    name: &str,
    domain: &str,
    from: usize,
    codomain: &str,
    to: usize,
    assign: &[usize],
) -> GraphMorphism {
    let f = |i: usize| assign[i] % to;
    let mut mapping: Vec<(Name, Name)> =
        (0..from).map(|i| (node(domain, i), node(codomain, f(i)))).collect();
    for s in 0..from {
        for t in 0..from {
            mapping.push((complete_edge(domain, s, t), complete_edge(codomain, f(s), f(t))));
        }
    }
    GraphMorphism::create(
        Name::identifier(name),
        complete(domain, from),
        complete(codomain, to),
        mapping,
    )
    .unwrap()
}

fn sorted(mut mappings: Vec<(Name, Name)>) -> Vec<(Name, Name)> {
    mappings.sort();
    mappings
}

proptest! {
    #[test]
    fn generated_morphisms_are_total_homomorphisms(
        g in shape(),
        assign in vec(0usize..4, 6),
    ) {
        let f = out_of_shape("f", "A", &g, "B", 4, &assign);
        prop_assert!(f.verify());
        prop_assert!(f.is_total());
        prop_assert!(f.hom_prop_violations().is_empty());
    }

    #[test]
    fn images_of_edges_connect_images_of_endpoints(
        g in shape(),
        assign in vec(0usize..3, 6),
    ) {
        let f = out_of_shape("f", "A", &g, "B", 3, &assign);
        for edge in f.domain().edges() {
            let image = f.apply(edge).unwrap();
            prop_assert_eq!(f.map(edge.source()), Some(image.source()));
            prop_assert_eq!(f.map(edge.target()), Some(image.target()));
        }
    }

    #[test]
    fn composition_is_associative(
        g in shape(),
        a in vec(0usize..4, 6),
        b in vec(0usize..4, 4),
        c in vec(0usize..3, 4),
    ) {
        let f = out_of_shape("f", "A", &g, "B", 4, &a);
        let gm = between_complete("g", "B", 4, "C", 4, &b);
        let h = between_complete("h", "C", 4, "D", 3, &c);

        let left = f.compose(&gm).unwrap().compose(&h).unwrap();
        let right = f.compose(&gm.compose(&h).unwrap()).unwrap();
        prop_assert_eq!(sorted(left.mappings()), sorted(right.mappings()));
        prop_assert!(left.agrees_with(&right));
    }

    #[test]
    fn identities_are_neutral(g in shape(), a in vec(0usize..4, 6)) {
        let f = out_of_shape("f", "A", &g, "B", 4, &a);
        let before = GraphMorphism::identity(f.domain().clone()).compose(&f).unwrap();
        let after = f.compose(&GraphMorphism::identity(f.codomain().clone())).unwrap();
        prop_assert_eq!(sorted(before.mappings()), sorted(f.mappings()));
        prop_assert_eq!(sorted(after.mappings()), sorted(f.mappings()));
    }

    #[test]
    fn relating_is_idempotent(pairs in vec((0u8..12, 0u8..12), 0..20)) {
        let mut once = PartitionAlgorithm::new(0u8..12);
        for (a, b) in &pairs {
            once.relate(a, b);
        }
        let first = once.get_result();
        for (a, b) in &pairs {
            once.relate(a, b);
            once.relate(b, a);
        }
        prop_assert_eq!(once.get_result(), first.clone());

        let covered: BTreeSet<u8> = first.iter().flatten().copied().collect();
        prop_assert_eq!(covered.len(), 12);
        for (a, b) in &pairs {
            prop_assert!(once.same_class(a, b));
        }
    }
}
