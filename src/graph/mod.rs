// Copyright 2025 Cowboy AI, LLC.

//! Immutable named graphs
//!
//! A [`Graph`] is a named set of [`Triple`]s keyed by label. It can only be
//! obtained through a validating constructor, which rejects dangling edges
//! and labels shared by different triples. Once built it is never mutated;
//! derived graphs are new values, or lazy [`proxy::GraphView`]s over a base.
//!
//! Graph equality is by name only. Callers that combine independently built
//! graphs must keep their names disjoint, which the sum constructions do by
//! prefixing every element with its graph's name.

pub mod proxy;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::hash::{Hash, Hasher};
use tracing::debug;

use crate::errors::{GraphError, GraphResult};
use crate::identifiers::Name;
use crate::triple::Triple;

pub use proxy::{GraphView, RenameFn};

/// An immutable, named set of triples without dangling edges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GraphData", into = "GraphData")]
pub struct Graph {
    name: Name,
    elements: IndexMap<Name, Triple>,
}

/// Serialized form of a graph; validated when read back
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphData {
    name: Name,
    elements: Vec<Triple>,
}

impl TryFrom<GraphData> for Graph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        Graph::create(data.name, data.elements)
    }
}

impl From<Graph> for GraphData {
    fn from(graph: Graph) -> Self {
        GraphData {
            name: graph.name,
            elements: graph.elements.into_values().collect(),
        }
    }
}

impl Graph {
    /// Build a graph, failing on dangling edges or labels used by different triples
    pub fn create<I>(name: Name, elements: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut map: IndexMap<Name, Triple> = IndexMap::new();
        for triple in elements {
            match map.get(triple.label()) {
                Some(existing) if existing != &triple => {
                    return Err(GraphError::DuplicateName {
                        name: triple.label().clone(),
                        existing: existing.clone(),
                        conflicting: triple,
                    });
                }
                Some(_) => {}
                None => {
                    map.insert(triple.label().clone(), triple);
                }
            }
        }

        let dangling = Self::dangling_edges_in(&map);
        if !dangling.is_empty() {
            let mut missing: Vec<Name> = Vec::new();
            for edge in &dangling {
                for end in [edge.source(), edge.target()] {
                    if !Self::is_node_in(&map, end) && !missing.contains(end) {
                        missing.push(end.clone());
                    }
                }
            }
            debug!(graph = %name, count = dangling.len(), "rejecting graph with dangling edges");
            return Err(GraphError::DanglingEdge {
                graph: name,
                edges: dangling,
                missing,
            });
        }

        Ok(Self {
            name,
            elements: map,
        })
    }

    /// Build a graph from elements known to be well-formed.
    ///
    /// Labels must be unique up to identical repeats: when two elements share
    /// a label the first one is kept. Only use it where uniqueness holds by
    /// construction; anything assembled from caller-supplied graphs goes
    /// through [`Graph::create`].
    pub(crate) fn from_trusted<I>(name: Name, elements: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut map = IndexMap::new();
        for triple in elements {
            map.entry(triple.label().clone()).or_insert(triple);
        }
        debug_assert!(Self::dangling_edges_in(&map).is_empty());
        Self {
            name,
            elements: map,
        }
    }

    /// The graph without elements
    pub fn empty(name: Name) -> Self {
        Self {
            name,
            elements: IndexMap::new(),
        }
    }

    /// Edges of a candidate element set whose endpoints are not node triples in it
    pub fn dangling_edges<'a, I>(elements: I) -> Vec<Triple>
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let all: Vec<&Triple> = elements.into_iter().collect();
        let nodes: HashSet<&Name> = all
            .iter()
            .filter(|t| t.is_node())
            .map(|t| t.label())
            .collect();
        all.into_iter()
            .filter(|t| t.is_edge())
            .filter(|t| !nodes.contains(t.source()) || !nodes.contains(t.target()))
            .cloned()
            .collect()
    }

    fn dangling_edges_in(map: &IndexMap<Name, Triple>) -> Vec<Triple> {
        map.values()
            .filter(|t| t.is_edge())
            .filter(|t| !Self::is_node_in(map, t.source()) || !Self::is_node_in(map, t.target()))
            .cloned()
            .collect()
    }

    fn is_node_in(map: &IndexMap<Name, Triple>, name: &Name) -> bool {
        map.get(name).map(Triple::is_node).unwrap_or(false)
    }

    /// The graph's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The element carrying `label`
    pub fn get(&self, label: &Name) -> Option<&Triple> {
        self.elements.get(label)
    }

    /// Whether the graph contains exactly this triple
    pub fn contains(&self, triple: &Triple) -> bool {
        self.elements.get(triple.label()) == Some(triple)
    }

    /// Whether some element carries `label`
    pub fn contains_name(&self, label: &Name) -> bool {
        self.elements.contains_key(label)
    }

    /// Whether `name` is a node of this graph
    pub fn contains_node(&self, name: &Name) -> bool {
        Self::is_node_in(&self.elements, name)
    }

    /// Whether `label` names an edge of this graph
    pub fn is_edge(&self, label: &Name) -> bool {
        self.elements.get(label).map(Triple::is_edge).unwrap_or(false)
    }

    /// Whether any element mentions `name` in any position
    pub fn mentions(&self, name: &Name) -> bool {
        self.contains_name(name) || self.elements.values().any(|t| t.mentions(name))
    }

    /// All elements, in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &Triple> {
        self.elements.values()
    }

    /// All node triples
    pub fn nodes(&self) -> impl Iterator<Item = &Triple> {
        self.elements.values().filter(|t| t.is_node())
    }

    /// All edge triples
    pub fn edges(&self) -> impl Iterator<Item = &Triple> {
        self.elements.values().filter(|t| t.is_edge())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the graph has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Edges leaving `node`
    pub fn outgoing(&self, node: &Name) -> Vec<&Triple> {
        self.edges().filter(|t| t.source() == node).collect()
    }

    /// Edges entering `node`
    pub fn incoming(&self, node: &Name) -> Vec<&Triple> {
        self.edges().filter(|t| t.target() == node).collect()
    }

    /// Whether `to` is reachable from `from` along outgoing edges
    pub fn exists_path(&self, from: &Name, to: &Name) -> bool {
        if !self.contains_node(from) || !self.contains_node(to) {
            return false;
        }
        let mut visited: HashSet<&Name> = HashSet::new();
        let mut queue: VecDeque<&Name> = VecDeque::new();
        queue.push_back(from);
        visited.insert(from);
        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            for edge in self.outgoing(current) {
                if visited.insert(edge.target()) {
                    queue.push_back(edge.target());
                }
            }
        }
        false
    }

    /// Whether every element of this graph is an element of `other`
    pub fn is_subgraph_of(&self, other: &Graph) -> bool {
        self.elements().all(|t| other.contains(t))
    }

    /// Qualify every element with this graph's name
    pub fn prefix(&self) -> Graph {
        Graph::from_trusted(
            self.name.clone(),
            self.elements().map(|t| t.prefix(&self.name)),
        )
    }

    /// Remove the namespace `prefix` from every element
    pub fn unprefix(&self, prefix: &Name) -> GraphResult<Graph> {
        Graph::create(self.name.clone(), self.elements().map(|t| t.unprefix(prefix)))
    }

    /// Rename every element; fails if the renaming identifies incompatible elements
    pub fn rename<F>(&self, name: Name, f: F) -> GraphResult<Graph>
    where
        F: Fn(&Name) -> Name,
    {
        Graph::create(name, self.elements().map(|t| t.rename(&f)))
    }

    /// Disjoint union of two graphs, named by merging their names
    pub fn sum(&self, other: &Graph) -> GraphResult<Graph> {
        Graph::multi_sum(
            Name::merge([self.name.clone(), other.name.clone()]),
            &[self, other],
        )
    }

    /// Disjoint union: each operand is prefixed with its own name, then all are unioned.
    ///
    /// Operands sharing a name but not their elements cannot be told apart
    /// after prefixing; that fails with `DuplicateName`.
    pub fn multi_sum(name: Name, graphs: &[&Graph]) -> GraphResult<Graph> {
        Graph::create(
            name,
            graphs
                .iter()
                .flat_map(|g| g.elements().map(move |t| t.prefix(&g.name))),
        )
    }

    /// Categorical product: pairs of nodes, and pairs of edges between them
    pub fn cartesian_product(&self, other: &Graph) -> Graph {
        let mut elements = Vec::new();
        for left in self.nodes() {
            for right in other.nodes() {
                elements.push(left.combine_with(right, Name::pair));
            }
        }
        for left in self.edges() {
            for right in other.edges() {
                elements.push(left.combine_with(right, Name::pair));
            }
        }
        // pairs of distinct labels are distinct
        Graph::from_trusted(self.name.times(&other.name), elements)
    }

    /// Whether two graphs have the same name and the same elements
    pub fn same_elements(&self, other: &Graph) -> bool {
        self.len() == other.len() && self.is_subgraph_of(other)
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Graph {}

impl Hash for Graph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphErrorKind;
    use pretty_assertions::assert_eq;

    fn chain() -> Graph {
        Graph::create(
            Name::identifier("G"),
            vec![
                Triple::node("A"),
                Triple::node("B"),
                Triple::node("C"),
                Triple::edge("A", "f", "B"),
                Triple::edge("B", "g", "C"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_dangling_edge() {
        let result = Graph::create(
            Name::identifier("G"),
            vec![Triple::node("A"), Triple::edge("A", "f", "B")],
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind(), GraphErrorKind::DanglingEdge);
        match err {
            GraphError::DanglingEdge { edges, missing, .. } => {
                assert_eq!(edges, vec![Triple::edge("A", "f", "B")]);
                assert_eq!(missing, vec![Name::identifier("B")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_create_rejects_duplicate_labels() {
        let result = Graph::create(
            Name::identifier("G"),
            vec![
                Triple::node("A"),
                Triple::node("B"),
                Triple::edge("A", "f", "B"),
                Triple::edge("B", "f", "A"),
            ],
        );
        assert_eq!(result.unwrap_err().kind(), GraphErrorKind::DuplicateName);
    }

    #[test]
    fn test_queries() {
        let g = chain();
        assert_eq!(g.len(), 5);
        assert!(g.contains(&Triple::edge("A", "f", "B")));
        assert!(!g.contains(&Triple::edge("A", "f", "C")));
        assert!(g.contains_node(&Name::identifier("A")));
        assert!(!g.contains_node(&Name::identifier("f")));
        assert!(g.is_edge(&Name::identifier("f")));
        assert_eq!(g.outgoing(&Name::identifier("B")).len(), 1);
        assert_eq!(g.incoming(&Name::identifier("B")).len(), 1);
        assert_eq!(g.nodes().count(), 3);
        assert_eq!(g.edges().count(), 2);
    }

    #[test]
    fn test_exists_path() {
        let g = chain();
        assert!(g.exists_path(&Name::identifier("A"), &Name::identifier("C")));
        assert!(g.exists_path(&Name::identifier("A"), &Name::identifier("A")));
        assert!(!g.exists_path(&Name::identifier("C"), &Name::identifier("A")));
        assert!(!g.exists_path(&Name::identifier("A"), &Name::identifier("Z")));
    }

    #[test]
    fn test_equality_is_by_name() {
        let g = chain();
        let other = Graph::create(Name::identifier("G"), vec![Triple::node("X")]).unwrap();
        assert_eq!(g, other);
        assert!(!g.same_elements(&other));
    }

    #[test]
    fn test_sum_keeps_operands_disjoint() {
        let g = chain();
        let h = Graph::create(Name::identifier("H"), vec![Triple::node("A")]).unwrap();
        let sum = g.sum(&h).unwrap();

        assert_eq!(sum.len(), 6);
        assert!(sum.contains_node(&Name::identifier("A").prefix_with(&Name::identifier("G"))));
        assert!(sum.contains_node(&Name::identifier("A").prefix_with(&Name::identifier("H"))));
        assert_eq!(
            sum.name(),
            &Name::merge([Name::identifier("G"), Name::identifier("H")])
        );
    }

    #[test]
    fn test_sum_of_namesakes_reports_the_clash() {
        let g = chain();
        let namesake = Graph::create(
            Name::identifier("G"),
            vec![Triple::node("A"), Triple::node("Z"), Triple::edge("Z", "f", "A")],
        )
        .unwrap();
        let err = Graph::multi_sum(Name::identifier("S"), &[&g, &namesake]).unwrap_err();
        assert_eq!(err.kind(), GraphErrorKind::DuplicateName);

        // the same graph twice collapses onto itself
        let twice = Graph::multi_sum(Name::identifier("S"), &[&g, &g]).unwrap();
        assert_eq!(twice.len(), g.len());
    }

    #[test]
    fn test_cartesian_product() {
        let g = chain();
        let h = Graph::create(
            Name::identifier("H"),
            vec![Triple::node("x"), Triple::node("y"), Triple::edge("x", "k", "y")],
        )
        .unwrap();
        let product = g.cartesian_product(&h);
        assert_eq!(product.nodes().count(), 6);
        assert_eq!(product.edges().count(), 2);
        assert!(Graph::dangling_edges(product.elements()).is_empty());
    }

    #[test]
    fn test_serde_revalidates() {
        let g = chain();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert!(back.same_elements(&g));

        let broken = r#"{"name":{"Identifier":"G"},"elements":[{"source":{"Identifier":"A"},"label":{"Identifier":"f"},"target":{"Identifier":"B"}}]}"#;
        assert!(serde_json::from_str::<Graph>(broken).is_err());
    }
}
