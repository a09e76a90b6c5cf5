// Copyright 2025 Cowboy AI, LLC.

//! Colimits of graph diagrams
//!
//! A [`Multispan`] is an apex graph with morphisms into several diagram
//! graphs. Its colimit glues the diagram graphs along the elements the
//! apex witnesses as shared. Sharing is computed as a set of
//! [`EquivalenceClass`]es seeded per apex element and merged to a fixpoint;
//! each converged class becomes one element of the result, named by a
//! [`NamingStrategy`].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::limits::Cone;
use super::morphism::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::triple::Triple;

/// A set of elements, each qualified by the graph it lives in, that are identified
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquivalenceClass {
    members: BTreeSet<(Name, Triple)>,
}

impl EquivalenceClass {
    /// A class from `(graph name, element)` pairs
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (Name, Triple)>,
    {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// The members as `(graph name, element)` pairs
    pub fn members(&self) -> impl Iterator<Item = &(Name, Triple)> {
        self.members.iter()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the class has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the classes differ but share at least one member
    pub fn overlaps(&self, other: &EquivalenceClass) -> bool {
        self != other && !self.members.is_disjoint(&other.members)
    }

    /// The union of both classes
    pub fn merge(&self, other: &EquivalenceClass) -> EquivalenceClass {
        Self {
            members: self.members.union(&other.members).cloned().collect(),
        }
    }

    /// Move every member of `other` into this class
    pub fn absorb(&mut self, other: EquivalenceClass) {
        self.members.extend(other.members);
    }

    /// Whether `triple` of graph `graph` belongs to the class
    pub fn contains(&self, graph: &Name, triple: &Triple) -> bool {
        self.members.contains(&(graph.clone(), triple.clone()))
    }

    /// Whether the node `node` of graph `graph` belongs to the class
    pub fn contains_node(&self, graph: &Name, node: &Name) -> bool {
        self.contains(graph, &Triple::new(node.clone(), node.clone(), node.clone()))
    }

    /// Whether both elements are members, regardless of the graphs they live in
    pub fn relates(&self, first: &Triple, second: &Triple) -> bool {
        self.members.iter().any(|(_, t)| t == first) && self.members.iter().any(|(_, t)| t == second)
    }

    /// Whether both graph-qualified elements are members
    pub fn relates_in(
        &self,
        first_graph: &Name,
        first: &Triple,
        second_graph: &Name,
        second: &Triple,
    ) -> bool {
        self.contains(first_graph, first) && self.contains(second_graph, second)
    }

    /// Whether every member is a node
    pub fn is_node_class(&self) -> bool {
        self.members.iter().all(|(_, t)| t.is_node())
    }

    /// Whether every member is an edge
    pub fn is_edge_class(&self) -> bool {
        self.members.iter().all(|(_, t)| t.is_edge())
    }

    /// Member labels qualified by their graph
    pub fn qualified_labels(&self) -> Vec<Name> {
        self.members
            .iter()
            .map(|(graph, t)| t.label().prefix_with(graph))
            .collect()
    }

    /// The single node standing for a node class
    pub fn representative(&self, strategy: &NamingStrategy) -> Triple {
        let name = strategy.name(&self.qualified_labels());
        Triple::new(name.clone(), name.clone(), name)
    }

    /// The single edge standing for an edge class, with endpoints resolved
    /// through the representatives of the node classes
    pub fn proper_representative(
        &self,
        strategy: &NamingStrategy,
        node_representatives: &HashMap<(Name, Name), Name>,
    ) -> Option<Triple> {
        let (graph, first) = self.members.iter().next()?;
        let source = node_representatives.get(&(graph.clone(), first.source().clone()))?;
        let target = node_representatives.get(&(graph.clone(), first.target().clone()))?;
        Some(Triple::new(
            source.clone(),
            strategy.name(&self.qualified_labels()),
            target.clone(),
        ))
    }
}

/// How a set of identified names is turned into a single name
#[derive(Clone, Default)]
pub enum NamingStrategy {
    /// The merge of all names
    #[default]
    LeaveUnchanged,
    /// The rendered names, sorted and joined by `separator`
    Concatenate {
        /// Placed between the rendered names
        separator: String,
    },
    /// The first name qualified by the given namespace, without it; falls
    /// back to the merge when no name carries it
    PrecedenceToPrefix(Name),
    /// Any naming function
    Custom(Arc<dyn Fn(&[Name]) -> Name + Send + Sync>),
}

impl NamingStrategy {
    /// Name a set of identified names
    pub fn name(&self, names: &[Name]) -> Name {
        match self {
            NamingStrategy::LeaveUnchanged => Name::merge(names.iter().cloned()),
            NamingStrategy::Concatenate { separator } => {
                let mut rendered: Vec<String> = names.iter().map(ToString::to_string).collect();
                rendered.sort();
                rendered.dedup();
                Name::identifier(rendered.join(separator))
            }
            NamingStrategy::PrecedenceToPrefix(prefix) => {
                let mut sorted: Vec<&Name> = names.iter().collect();
                sorted.sort();
                sorted
                    .into_iter()
                    .find(|n| n.prefix() == Some(prefix))
                    .map(|n| n.unprefix(prefix))
                    .unwrap_or_else(|| Name::merge(names.iter().cloned()))
            }
            NamingStrategy::Custom(f) => f(names),
        }
    }
}

impl fmt::Debug for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStrategy::LeaveUnchanged => write!(f, "LeaveUnchanged"),
            NamingStrategy::Concatenate { separator } => f
                .debug_struct("Concatenate")
                .field("separator", separator)
                .finish(),
            NamingStrategy::PrecedenceToPrefix(prefix) => {
                f.debug_tuple("PrecedenceToPrefix").field(prefix).finish()
            }
            NamingStrategy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// The glued graph together with one injection per diagram graph
#[derive(Debug, Clone)]
pub struct Colimit {
    /// The glued graph
    pub graph: Arc<Graph>,
    /// Injections from each diagram graph, in diagram order
    pub injections: Vec<GraphMorphism>,
}

impl Cone for Colimit {
    fn apex(&self) -> &Arc<Graph> {
        &self.graph
    }

    fn legs(&self) -> Vec<&GraphMorphism> {
        self.injections.iter().collect()
    }
}

/// Pushout of a span: the glued graph and both injections
#[derive(Debug, Clone)]
pub struct Pushout {
    /// The pushout graph
    pub apex: Arc<Graph>,
    /// Injection of the left morphism's codomain
    pub left: GraphMorphism,
    /// Injection of the right morphism's codomain
    pub right: GraphMorphism,
}

impl Cone for Pushout {
    fn apex(&self) -> &Arc<Graph> {
        &self.apex
    }

    fn legs(&self) -> Vec<&GraphMorphism> {
        vec![&self.left, &self.right]
    }
}

/// An apex graph with morphisms into several diagram graphs
#[derive(Debug, Clone)]
pub struct Multispan {
    name: Name,
    apex: Arc<Graph>,
    nodes: Vec<Arc<Graph>>,
    edges: Vec<GraphMorphism>,
    classes: Vec<EquivalenceClass>,
    shared: BTreeSet<(Name, Triple)>,
}

impl Multispan {
    /// Validate the diagram and compute its converged equivalence classes
    pub fn create(
        name: Name,
        apex: Arc<Graph>,
        nodes: Vec<Arc<Graph>>,
        edges: Vec<GraphMorphism>,
    ) -> GraphResult<Self> {
        let mut seen: HashSet<&Name> = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.name()) {
                return Err(GraphError::ill_formed(format!(
                    "diagram graph {} occurs twice in {name}",
                    node.name()
                )));
            }
        }
        if seen.contains(apex.name()) {
            return Err(GraphError::ill_formed(format!(
                "apex {} of {name} is also a diagram graph",
                apex.name()
            )));
        }
        for edge in &edges {
            if edge.domain().name() != apex.name() {
                return Err(GraphError::CodomainMismatch {
                    expected: apex.name().clone(),
                    actual: edge.domain().name().clone(),
                });
            }
            if !seen.contains(edge.codomain().name()) {
                return Err(GraphError::ill_formed(format!(
                    "{} maps into {}, which is not a diagram graph of {name}",
                    edge.name(),
                    edge.codomain().name()
                )));
            }
        }
        if let Some(orphan) = nodes
            .iter()
            .find(|n| !edges.iter().any(|e| e.codomain().name() == n.name()))
        {
            return Err(GraphError::ill_formed(format!(
                "diagram graph {} of {name} is not the codomain of any morphism",
                orphan.name()
            )));
        }

        let mut shared = BTreeSet::new();
        let mut seeds = Vec::new();
        for element in apex.elements() {
            let mut members = vec![(apex.name().clone(), element.clone())];
            for edge in &edges {
                if let Some(image) = edge.apply(element) {
                    members.push((edge.codomain().name().clone(), image.clone()));
                }
            }
            shared.extend(members.iter().cloned());
            seeds.push(EquivalenceClass::new(members));
        }

        let classes = Self::converge(seeds);
        debug!(multispan = %name, classes = classes.len(), "converged equivalence classes");
        Ok(Self {
            name,
            apex,
            nodes,
            edges,
            classes,
            shared,
        })
    }

    /// Merge overlapping classes round by round until a round merges nothing.
    /// Every merging round reduces the class count, so this takes at most as
    /// many rounds as there are seeds.
    fn converge(mut classes: Vec<EquivalenceClass>) -> Vec<EquivalenceClass> {
        loop {
            let mut next: Vec<EquivalenceClass> = Vec::with_capacity(classes.len());
            let mut merged = false;
            for class in classes {
                match next
                    .iter_mut()
                    .find(|c| **c == class || c.overlaps(&class))
                {
                    Some(existing) => {
                        existing.absorb(class);
                        merged = true;
                    }
                    None => next.push(class),
                }
            }
            classes = next;
            if !merged {
                return classes;
            }
        }
    }

    /// The name of this diagram
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The apex graph
    pub fn apex(&self) -> &Arc<Graph> {
        &self.apex
    }

    /// The diagram graphs
    pub fn nodes(&self) -> &[Arc<Graph>] {
        &self.nodes
    }

    /// The morphisms from the apex
    pub fn edges(&self) -> &[GraphMorphism] {
        &self.edges
    }

    /// The converged equivalence classes
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    /// Whether the two elements are identified, wherever they live
    pub fn are_related(&self, first: &Triple, second: &Triple) -> bool {
        self.classes.iter().any(|c| c.relates(first, second))
    }

    /// Whether the two graph-qualified elements are identified
    pub fn are_related_in(
        &self,
        first_graph: &Name,
        first: &Triple,
        second_graph: &Name,
        second: &Triple,
    ) -> bool {
        self.classes
            .iter()
            .any(|c| c.relates_in(first_graph, first, second_graph, second))
    }

    /// The whole diagram as one graph: the prefixed apex and diagram graphs,
    /// with an edge from every apex node to each of its images
    pub fn internalize(&self, name: Name) -> GraphResult<Graph> {
        let apex_name = self.apex.name();
        let mut elements: Vec<Triple> = self.apex.elements().map(|t| t.prefix(apex_name)).collect();
        for node in &self.nodes {
            elements.extend(node.elements().map(|t| t.prefix(node.name())));
        }
        for edge in &self.edges {
            for node in self.apex.nodes() {
                if let Some(image) = edge.apply(node) {
                    elements.push(Triple::new(
                        node.label().prefix_with(apex_name),
                        edge.name().prefix_with(node.label()).prefix_with(apex_name),
                        image.label().prefix_with(edge.codomain().name()),
                    ));
                }
            }
        }
        Graph::create(name, elements)
    }

    /// Glue the diagram graphs along the shared elements
    pub fn colimit(&self, name: Name, strategy: &NamingStrategy) -> GraphResult<Colimit> {
        let mut representatives: HashMap<(Name, Name), Name> = HashMap::new();
        let mut elements: Vec<Triple> = Vec::new();

        for class in self.classes.iter().filter(|c| c.is_node_class()) {
            let representative = class.representative(strategy);
            for (graph, member) in class.members() {
                representatives.insert(
                    (graph.clone(), member.label().clone()),
                    representative.label().clone(),
                );
            }
            elements.push(representative);
        }

        let mut edge_representatives = Vec::new();
        for class in self.classes.iter().filter(|c| !c.is_node_class()) {
            if !class.is_edge_class() {
                return Err(GraphError::IllFormed {
                    reason: format!("{} identifies nodes with edges", self.name),
                    elements: class.members().map(|(_, t)| t.clone()).collect(),
                });
            }
            let representative = class
                .proper_representative(strategy, &representatives)
                .ok_or_else(|| GraphError::IllFormed {
                    reason: format!("edge class of {} has unresolved endpoints", self.name),
                    elements: class.members().map(|(_, t)| t.clone()).collect(),
                })?;
            edge_representatives.push((class, representative));
        }
        for (class, representative) in edge_representatives {
            for (graph, member) in class.members() {
                representatives.insert(
                    (graph.clone(), member.label().clone()),
                    representative.label().clone(),
                );
            }
            elements.push(representative);
        }

        let resolve = |graph: &Name, name: &Name| {
            representatives
                .get(&(graph.clone(), name.clone()))
                .cloned()
                .unwrap_or_else(|| name.prefix_with(graph))
        };

        for node in &self.nodes {
            let graph = node.name();
            elements.extend(
                node.elements()
                    .filter(|t| !self.shared.contains(&(graph.clone(), (*t).clone())))
                    .map(|t| t.rename(|n| resolve(graph, n))),
            );
        }

        let result = Arc::new(Graph::create(name, elements)?);
        let mut injections = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let mapping: Vec<(Name, Name)> = node
                .elements()
                .map(|t| (t.label().clone(), resolve(node.name(), t.label())))
                .collect();
            injections.push(GraphMorphism::create(
                result.name().injected_from(node.name()),
                node.clone(),
                result.clone(),
                mapping,
            )?);
        }

        info!(
            multispan = %self.name,
            colimit = %result.name(),
            size = result.len(),
            "computed colimit"
        );
        Ok(Colimit {
            graph: result,
            injections,
        })
    }
}

impl GraphMorphism {
    /// Glue the codomains of `self` and `other` along their shared domain
    pub fn pushout(&self, other: &GraphMorphism) -> GraphResult<Pushout> {
        if self.domain().name() != other.domain().name() {
            return Err(GraphError::CodomainMismatch {
                expected: self.domain().name().clone(),
                actual: other.domain().name().clone(),
            });
        }
        let name = Name::identifier("P.O.")
            .applied_to(&self.codomain().name().pair(other.codomain().name()));
        let span = Multispan::create(
            name.clone(),
            self.domain().clone(),
            vec![self.codomain().clone(), other.codomain().clone()],
            vec![self.clone(), other.clone()],
        )?;
        let Colimit { graph, injections } = span.colimit(name, &NamingStrategy::default())?;
        let mut legs = injections.into_iter();
        match (legs.next(), legs.next()) {
            (Some(left), Some(right)) => Ok(Pushout {
                apex: graph,
                left,
                right,
            }),
            _ => Err(GraphError::ill_formed("pushout lost an injection")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphErrorKind;
    use pretty_assertions::assert_eq;

    fn n(s: &str) -> Name {
        Name::identifier(s)
    }

    fn node_class(graph: &str, nodes: &[&str]) -> EquivalenceClass {
        EquivalenceClass::new(nodes.iter().map(|x| (n(graph), Triple::node(*x))))
    }

    #[test]
    fn test_overlap_and_merge() {
        let a = node_class("G", &["x", "y"]);
        let b = node_class("G", &["y", "z"]);
        let c = node_class("H", &["y"]);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert_eq!(a.merge(&b).len(), 3);
        assert!(a.merge(&b).is_node_class());
        assert!(c.relates(&Triple::node("y"), &Triple::node("y")));
        assert!(a.contains_node(&n("G"), &n("x")));
    }

    #[test]
    fn test_naming_strategies() {
        let names = vec![n("b").prefix_with(&n("H")), n("a").prefix_with(&n("G"))];

        assert_eq!(NamingStrategy::default().name(&names), Name::merge(names.clone()));
        assert_eq!(
            NamingStrategy::Concatenate {
                separator: "_".into()
            }
            .name(&names),
            n("G.a_H.b")
        );
        assert_eq!(NamingStrategy::PrecedenceToPrefix(n("H")).name(&names), n("b"));
        assert_eq!(
            NamingStrategy::PrecedenceToPrefix(n("K")).name(&names),
            Name::merge(names.clone())
        );
        let first = NamingStrategy::Custom(Arc::new(|ns: &[Name]| ns[0].clone()));
        assert_eq!(first.name(&names), names[0]);
    }

    #[test]
    fn test_converge_is_transitive() {
        let classes = Multispan::converge(vec![
            node_class("G", &["a", "b"]),
            node_class("G", &["c", "d"]),
            node_class("G", &["b", "c"]),
            node_class("G", &["e"]),
        ]);
        assert_eq!(classes.len(), 2);
        assert!(classes.iter().any(|c| c.len() == 4));
    }

    fn graph(name: &str, elements: Vec<Triple>) -> Arc<Graph> {
        Arc::new(Graph::create(n(name), elements).unwrap())
    }

    #[test]
    fn test_multispan_validation() {
        let apex = graph("S", vec![Triple::node("x")]);
        let g = graph("G", vec![Triple::node("a")]);
        let h = graph("H", vec![Triple::node("b")]);
        let m = GraphMorphism::create(n("m"), apex.clone(), g.clone(), vec![(n("x"), n("a"))])
            .unwrap();

        let orphan = Multispan::create(n("M"), apex.clone(), vec![g.clone(), h], vec![m.clone()]);
        assert_eq!(orphan.unwrap_err().kind(), GraphErrorKind::IllFormed);

        let duplicate = Multispan::create(n("M"), apex.clone(), vec![g.clone(), g.clone()], vec![m.clone()]);
        assert_eq!(duplicate.unwrap_err().kind(), GraphErrorKind::IllFormed);

        let wrong_domain = GraphMorphism::identity(g.clone());
        let mismatch = Multispan::create(n("M"), apex, vec![g], vec![wrong_domain]);
        assert_eq!(mismatch.unwrap_err().kind(), GraphErrorKind::CodomainMismatch);
    }

    #[test]
    fn test_internalize_links_apex_to_images() {
        let apex = graph("S", vec![Triple::node("x")]);
        let g = graph("G", vec![Triple::node("a")]);
        let m = GraphMorphism::create(n("m"), apex.clone(), g.clone(), vec![(n("x"), n("a"))])
            .unwrap();
        let span = Multispan::create(n("M"), apex, vec![g], vec![m]).unwrap();

        let internal = span.internalize(n("I")).unwrap();
        assert_eq!(internal.nodes().count(), 2);
        assert_eq!(internal.edges().count(), 1);
        let link = internal.edges().next().unwrap();
        assert_eq!(link.source(), &n("x").prefix_with(&n("S")));
        assert_eq!(link.target(), &n("a").prefix_with(&n("G")));
    }
}
