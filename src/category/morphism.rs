// Copyright 2025 Cowboy AI, LLC.

//! Partial, structure-preserving mappings between graphs
//!
//! A [`GraphMorphism`] is a named partial function on names together with a
//! fixed domain and codomain. Totality, injectivity and surjectivity are
//! derived properties. The homomorphism property (incidence preservation,
//! nodes to nodes and edges to edges) is what [`GraphMorphism::verify`]
//! checks, and every verifying constructor refuses to build a morphism that
//! violates it.

use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{GraphError, GraphResult};
use crate::graph::{Graph, GraphView, RenameFn};
use crate::identifiers::Name;
use crate::triple::Triple;

/// A named partial mapping from a domain graph into a codomain graph
#[derive(Debug, Clone)]
pub struct GraphMorphism {
    name: Name,
    domain: Arc<Graph>,
    codomain: Arc<Graph>,
    mapping: IndexMap<Name, Name>,
}

/// Classification of a morphism by its derived properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphismClass {
    /// The identity on a graph
    Identity,
    /// Total, injective and surjective
    Isomorphism,
    /// Every codomain element has a preimage
    Epic,
    /// No codomain element has more than one preimage
    Monic,
    /// None of the above
    General,
}

/// The ways a morphism can be constructed, each carrying only what it needs
#[derive(Clone)]
pub enum MorphismKind {
    /// The identity on `graph`
    Identity {
        /// The graph mapped onto itself
        graph: Arc<Graph>,
    },
    /// A bijective renaming of `graph` into a new graph `target_name`
    Isomorphism {
        /// Morphism name
        name: Name,
        /// The graph being renamed
        graph: Arc<Graph>,
        /// Name of the renamed copy
        target_name: Name,
        /// The renaming
        rename: RenameFn,
        /// Its inverse; must undo `rename` on every name of `graph`
        inverse: RenameFn,
    },
    /// The quotient of `graph` by a partition of its labels
    Epic {
        /// Morphism name
        name: Name,
        /// The graph being divided
        graph: Arc<Graph>,
        /// Name of the quotient graph
        target_name: Name,
        /// Classes of identified labels; labels outside any class stay distinct
        classes: BTreeSet<BTreeSet<Name>>,
    },
    /// The inclusion of a subgraph
    Monic {
        /// Morphism name
        name: Name,
        /// The included graph
        sub: Arc<Graph>,
        /// The including graph
        sup: Arc<Graph>,
    },
}

impl MorphismKind {
    /// Build the morphism described by this kind
    pub fn build(self) -> GraphResult<GraphMorphism> {
        match self {
            MorphismKind::Identity { graph } => Ok(GraphMorphism::identity(graph)),
            MorphismKind::Isomorphism {
                name,
                graph,
                target_name,
                rename,
                inverse,
            } => {
                let broken: Vec<Triple> = graph
                    .elements()
                    .filter(|t| inverse(&rename(t.label())) != *t.label())
                    .cloned()
                    .collect();
                if !broken.is_empty() {
                    return Err(GraphError::IllFormed {
                        reason: format!("renaming for {name} is not invertible"),
                        elements: broken,
                    });
                }
                let rename_for_view = rename.clone();
                let codomain = GraphView::base(graph.clone())
                    .renamed(move |n| rename_for_view(n))
                    .materialize(target_name)?;
                let mapping: Vec<(Name, Name)> = graph
                    .elements()
                    .map(|t| (t.label().clone(), rename(t.label())))
                    .collect();
                GraphMorphism::create(name, graph, Arc::new(codomain), mapping)
            }
            MorphismKind::Epic {
                name,
                graph,
                target_name,
                classes,
            } => {
                let mut quotient: IndexMap<Name, Name> = IndexMap::new();
                for class in &classes {
                    let merged = Name::merge(class.iter().cloned());
                    for member in class {
                        quotient.insert(member.clone(), merged.clone());
                    }
                }
                let project = |n: &Name| quotient.get(n).cloned().unwrap_or_else(|| n.clone());
                let codomain = Graph::create(target_name, graph.elements().map(|t| t.rename(project)))?;
                let mapping: Vec<(Name, Name)> = graph
                    .elements()
                    .map(|t| (t.label().clone(), project(t.label())))
                    .collect();
                GraphMorphism::create(name, graph, Arc::new(codomain), mapping)
            }
            MorphismKind::Monic { name, sub, sup } => GraphMorphism::inclusion(name, sub, sup),
        }
    }
}

impl GraphMorphism {
    /// Build a morphism, rejecting unknown names, ambiguous bindings and
    /// homomorphism violations
    pub fn create<I>(
        name: Name,
        domain: Arc<Graph>,
        codomain: Arc<Graph>,
        mapping: I,
    ) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (Name, Name)>,
    {
        let mut map: IndexMap<Name, Name> = IndexMap::new();
        for (from, to) in mapping {
            if !domain.contains_name(&from) {
                return Err(GraphError::UnknownMember {
                    name: from,
                    context: domain.name().clone(),
                });
            }
            match map.get(&from) {
                Some(existing) if existing != &to => {
                    return Err(GraphError::AmbiguousMapping {
                        name: from,
                        existing: existing.clone(),
                        requested: to,
                    });
                }
                _ => {
                    map.insert(from, to);
                }
            }
        }
        let morphism = Self {
            name,
            domain,
            codomain,
            mapping: map,
        };
        if let Some(undefined) = morphism.mapped_to_undefined().into_iter().next() {
            let image = morphism
                .map(undefined.label())
                .cloned()
                .unwrap_or_else(|| undefined.label().clone());
            return Err(GraphError::UnknownMember {
                name: image,
                context: morphism.codomain.name().clone(),
            });
        }
        let violations = morphism.hom_prop_violations();
        if !violations.is_empty() {
            return Err(GraphError::HomomorphismPropertyViolation {
                morphism: morphism.name.clone(),
                violations,
            });
        }
        debug!(morphism = %morphism.name, size = morphism.mapping.len(), "created morphism");
        Ok(morphism)
    }

    /// Assemble a morphism whose mapping has already been validated
    pub(crate) fn new_unchecked(
        name: Name,
        domain: Arc<Graph>,
        codomain: Arc<Graph>,
        mapping: IndexMap<Name, Name>,
    ) -> Self {
        Self {
            name,
            domain,
            codomain,
            mapping,
        }
    }

    /// The identity morphism on `graph`
    pub fn identity(graph: Arc<Graph>) -> Self {
        let mapping = graph
            .elements()
            .map(|t| (t.label().clone(), t.label().clone()))
            .collect();
        Self {
            name: Name::identifier("id").applied_to(graph.name()),
            domain: graph.clone(),
            codomain: graph,
            mapping,
        }
    }

    /// The inclusion of `sub` into `sup`
    pub fn inclusion(name: Name, sub: Arc<Graph>, sup: Arc<Graph>) -> GraphResult<Self> {
        let mapping: Vec<(Name, Name)> = sub
            .elements()
            .map(|t| (t.label().clone(), t.label().clone()))
            .collect();
        Self::create(name, sub, sup, mapping)
    }

    /// The morphism's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The domain graph
    pub fn domain(&self) -> &Arc<Graph> {
        &self.domain
    }

    /// The codomain graph
    pub fn codomain(&self) -> &Arc<Graph> {
        &self.codomain
    }

    /// The image of a name, if the morphism is defined there
    pub fn map(&self, name: &Name) -> Option<&Name> {
        self.mapping.get(name)
    }

    /// Whether the morphism is defined at `name`
    pub fn defined_at(&self, name: &Name) -> bool {
        self.mapping.contains_key(name)
    }

    /// The image of a domain element, provided it exists in the codomain
    pub fn apply(&self, triple: &Triple) -> Option<&Triple> {
        self.map(triple.label())
            .and_then(|image| self.codomain.get(image))
    }

    /// All domain elements that are mapped onto `target`
    pub fn preimage(&self, target: &Triple) -> Vec<Triple> {
        self.domain
            .elements()
            .filter(|t| self.apply(t) == Some(target))
            .cloned()
            .collect()
    }

    /// All domain names that are mapped onto `target`
    pub fn preimage_of_name(&self, target: &Name) -> Vec<Name> {
        self.mapping
            .iter()
            .filter(|(_, to)| *to == target)
            .map(|(from, _)| from.clone())
            .collect()
    }

    /// All domain elements whose label is mapped onto `label`
    pub fn select_by_label(&self, label: &Name) -> Vec<Triple> {
        self.domain
            .elements()
            .filter(|t| self.map(t.label()) == Some(label))
            .cloned()
            .collect()
    }

    /// The images of all domain elements
    pub fn image(&self) -> Vec<Triple> {
        let mut result: Vec<Triple> = Vec::new();
        for image in self.domain.elements().filter_map(|t| self.apply(t)) {
            if !result.contains(image) {
                result.push(image.clone());
            }
        }
        result
    }

    /// All bindings, nodes before edges
    pub fn mappings(&self) -> Vec<(Name, Name)> {
        let nodes = self.domain.nodes();
        let edges = self.domain.edges();
        nodes
            .chain(edges)
            .filter_map(|t| self.map(t.label()).map(|to| (t.label().clone(), to.clone())))
            .collect()
    }

    /// Instances of a type element: the preimage of `type_element`
    pub fn all_instances(&self, type_element: &Triple) -> Vec<Triple> {
        self.preimage(type_element)
    }

    /// Instances of the type element labelled `type_label`
    pub fn all_instances_of(&self, type_label: &Name) -> Vec<Triple> {
        self.select_by_label(type_label)
    }

    /// Names of the domain nodes typed by the node `type_node`
    pub fn all_node_instances(&self, type_node: &Name) -> Vec<Name> {
        self.domain
            .nodes()
            .filter(|t| self.map(t.label()) == Some(type_node))
            .map(|t| t.label().clone())
            .collect()
    }

    /// Instances of `type_edge` leaving `source`
    pub fn all_outgoing_instances(&self, type_edge: &Triple, source: &Name) -> Vec<Triple> {
        self.all_instances(type_edge)
            .into_iter()
            .filter(|t| t.source() == source)
            .collect()
    }

    /// Instances of `type_edge` entering `target`
    pub fn all_incoming_instances(&self, type_edge: &Triple, target: &Name) -> Vec<Triple> {
        self.all_instances(type_edge)
            .into_iter()
            .filter(|t| t.target() == target)
            .collect()
    }

    /// Pairs of instances of `first` and `second` that share their source
    pub fn all_src_coincident_instances(
        &self,
        first: &Triple,
        second: &Triple,
    ) -> Vec<(Triple, Triple)> {
        let seconds = self.all_instances(second);
        let mut result = Vec::new();
        for f in self.all_instances(first) {
            for s in seconds.iter().filter(|s| s.source() == f.source()) {
                result.push((f.clone(), s.clone()));
            }
        }
        result
    }

    /// Edges leaving `source` whose type is labelled `type_label`
    pub fn query_edge(&self, source: &Name, type_label: &Name) -> Vec<Triple> {
        self.domain
            .outgoing(source)
            .into_iter()
            .filter(|t| self.map(t.label()) == Some(type_label))
            .cloned()
            .collect()
    }

    /// Domain elements whose image name is not an element of the codomain
    pub fn mapped_to_undefined(&self) -> Vec<Triple> {
        self.domain
            .elements()
            .filter(|t| match self.map(t.label()) {
                Some(image) => !self.codomain.contains_name(image),
                None => false,
            })
            .cloned()
            .collect()
    }

    /// Domain elements whose existing image breaks the homomorphism property
    pub fn hom_prop_violations(&self) -> Vec<Triple> {
        self.domain
            .elements()
            .filter(|t| match self.apply(t) {
                Some(image) => {
                    if t.is_node() != image.is_node() {
                        return true;
                    }
                    t.is_edge()
                        && (self.map(t.source()) != Some(image.source())
                            || self.map(t.target()) != Some(image.target()))
                }
                None => false,
            })
            .cloned()
            .collect()
    }

    /// Whether the morphism is a well-formed (partial) homomorphism
    pub fn verify(&self) -> bool {
        self.mapping.keys().all(|k| self.domain.contains_name(k))
            && self.mapped_to_undefined().is_empty()
            && self.hom_prop_violations().is_empty()
    }

    /// Whether the morphism is defined on every domain element
    pub fn is_total(&self) -> bool {
        self.domain.elements().all(|t| self.defined_at(t.label()))
    }

    /// Whether no codomain element has more than one preimage
    pub fn is_injective(&self) -> bool {
        self.codomain
            .elements()
            .all(|t| self.preimage(t).len() <= 1)
    }

    /// Whether every codomain element has a preimage
    pub fn is_surjective(&self) -> bool {
        let image = self.image();
        self.codomain.elements().all(|t| image.contains(t))
    }

    /// Classify by derived properties
    pub fn classify(&self) -> MorphismClass {
        let identical = self.domain.name() == self.codomain.name()
            && self.domain.elements().all(|t| self.map(t.label()) == Some(t.label()));
        if identical {
            return MorphismClass::Identity;
        }
        let (total, injective, surjective) =
            (self.is_total(), self.is_injective(), self.is_surjective());
        match (total && injective && surjective, surjective, injective) {
            (true, _, _) => MorphismClass::Isomorphism,
            (false, true, _) => MorphismClass::Epic,
            (false, false, true) => MorphismClass::Monic,
            _ => MorphismClass::General,
        }
    }

    /// Sequential composition `self ; next`, undefined wherever either part is
    pub fn compose(&self, next: &GraphMorphism) -> GraphResult<GraphMorphism> {
        if self.codomain.name() != next.domain.name() {
            return Err(GraphError::CodomainMismatch {
                expected: self.codomain.name().clone(),
                actual: next.domain.name().clone(),
            });
        }
        let mapping = self
            .mapping
            .iter()
            .filter_map(|(from, via)| next.map(via).map(|to| (from.clone(), to.clone())))
            .collect();
        Ok(Self::new_unchecked(
            self.name.compose_sequentially(&next.name),
            self.domain.clone(),
            next.codomain.clone(),
            mapping,
        ))
    }

    /// Whether both morphisms share domain and codomain and map every domain name alike
    pub fn agrees_with(&self, other: &GraphMorphism) -> bool {
        self.domain.name() == other.domain.name()
            && self.codomain.name() == other.codomain.name()
            && self
                .domain
                .elements()
                .all(|t| self.map(t.label()) == other.map(t.label()))
    }

    /// The restriction of this morphism to a subgraph of its domain
    pub fn restrict(&self, sub: Arc<Graph>) -> GraphResult<GraphMorphism> {
        if !sub.is_subgraph_of(&self.domain) {
            let outside: Vec<Triple> = sub
                .elements()
                .filter(|t| !self.domain.contains(t))
                .cloned()
                .collect();
            return Err(GraphError::IllFormed {
                reason: format!("{} is not a subgraph of {}", sub.name(), self.domain.name()),
                elements: outside,
            });
        }
        let mapping = sub
            .elements()
            .filter_map(|t| self.map(t.label()).map(|to| (t.label().clone(), to.clone())))
            .collect();
        Ok(Self::new_unchecked(
            self.name.substitution(sub.name()),
            sub,
            self.codomain.clone(),
            mapping,
        ))
    }

    /// Flatten into a single graph whose names carry their type.
    ///
    /// Elements where the morphism is undefined are dropped, together with
    /// edges incident to dropped nodes.
    pub fn flatten(&self) -> GraphResult<Graph> {
        let undefined: Vec<Name> = self
            .domain
            .elements()
            .filter(|t| !self.defined_at(t.label()))
            .map(|t| t.label().clone())
            .collect();
        let mapping = self.mapping.clone();
        GraphView::base(self.domain.clone())
            .with_removes(undefined)
            .renamed(move |n| match mapping.get(n) {
                Some(type_name) => n.type_by(type_name),
                None => n.clone(),
            })
            .materialize(self.domain.name().type_by(self.codomain.name()))
    }

    /// Read a flattened graph back as a morphism into `codomain`
    pub fn unflatten(graph: &Graph, codomain: Arc<Graph>, name: Name) -> GraphResult<GraphMorphism> {
        let domain = graph.rename(graph.name().strip_type(), Name::strip_type)?;
        let mapping: Vec<(Name, Name)> = graph
            .elements()
            .filter_map(|t| {
                t.label()
                    .type_of()
                    .map(|type_name| (t.label().strip_type(), type_name.clone()))
            })
            .collect();
        Self::create(name, Arc::new(domain), codomain, mapping)
    }
}

impl PartialEq for GraphMorphism {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for GraphMorphism {}

impl std::fmt::Debug for MorphismKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MorphismKind::Identity { graph } => {
                f.debug_struct("Identity").field("graph", graph.name()).finish()
            }
            MorphismKind::Isomorphism { name, graph, .. } => f
                .debug_struct("Isomorphism")
                .field("name", name)
                .field("graph", graph.name())
                .finish_non_exhaustive(),
            MorphismKind::Epic { name, classes, .. } => f
                .debug_struct("Epic")
                .field("name", name)
                .field("classes", classes)
                .finish_non_exhaustive(),
            MorphismKind::Monic { name, sub, sup } => f
                .debug_struct("Monic")
                .field("name", name)
                .field("sub", sub.name())
                .field("sup", sup.name())
                .finish(),
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

    fn arrow_graph() -> Arc<Graph> {
        Arc::new(
            Graph::create(
                n("T"),
                vec![Triple::node("X"), Triple::node("Y"), Triple::edge("X", "r", "Y")],
            )
            .unwrap(),
        )
    }

    fn instance_graph() -> Arc<Graph> {
        Arc::new(
            Graph::create(
                n("I"),
                vec![
                    Triple::node("a"),
                    Triple::node("b"),
                    Triple::node("c"),
                    Triple::edge("a", "f", "b"),
                    Triple::edge("a", "g", "c"),
                ],
            )
            .unwrap(),
        )
    }

    fn typing() -> GraphMorphism {
        GraphMorphism::create(
            n("typing"),
            instance_graph(),
            arrow_graph(),
            vec![
                (n("a"), n("X")),
                (n("b"), n("Y")),
                (n("c"), n("Y")),
                (n("f"), n("r")),
                (n("g"), n("r")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_apply_and_preimage() {
        let m = typing();
        assert_eq!(
            m.apply(&Triple::edge("a", "f", "b")),
            Some(&Triple::edge("X", "r", "Y"))
        );
        assert_eq!(m.preimage(&Triple::edge("X", "r", "Y")).len(), 2);
        assert_eq!(m.all_node_instances(&n("Y")), vec![n("b"), n("c")]);
        assert_eq!(m.query_edge(&n("a"), &n("r")).len(), 2);
        assert_eq!(
            m.all_src_coincident_instances(
                &Triple::edge("X", "r", "Y"),
                &Triple::edge("X", "r", "Y")
            )
            .len(),
            4
        );
    }

    #[test]
    fn test_properties() {
        let m = typing();
        assert!(m.verify());
        assert!(m.is_total());
        assert!(!m.is_injective());
        assert!(m.is_surjective());
        assert_eq!(m.classify(), MorphismClass::Epic);
        assert_eq!(
            GraphMorphism::identity(arrow_graph()).classify(),
            MorphismClass::Identity
        );
    }

    #[test]
    fn test_mappings_list_nodes_first() {
        let m = typing();
        let mappings = m.mappings();
        assert_eq!(mappings.len(), 5);
        assert_eq!(mappings[3], (n("f"), n("r")));
    }

    #[test]
    fn test_create_rejects_incidence_violation() {
        let result = GraphMorphism::create(
            n("bad"),
            instance_graph(),
            arrow_graph(),
            vec![(n("a"), n("Y")), (n("b"), n("Y")), (n("f"), n("r"))],
        );
        let err = result.unwrap_err();
        assert_eq!(err.kind(), GraphErrorKind::HomomorphismPropertyViolation);
        assert_eq!(err.affected_names(), vec![n("f")]);
    }

    #[test]
    fn test_create_rejects_node_to_edge() {
        let result = GraphMorphism::create(
            n("bad"),
            instance_graph(),
            arrow_graph(),
            vec![(n("a"), n("r"))],
        );
        assert_eq!(
            result.unwrap_err().kind(),
            GraphErrorKind::HomomorphismPropertyViolation
        );
    }

    #[test]
    fn test_create_rejects_unknown_members() {
        let unknown_source = GraphMorphism::create(
            n("bad"),
            instance_graph(),
            arrow_graph(),
            vec![(n("zzz"), n("X"))],
        );
        assert_eq!(unknown_source.unwrap_err().kind(), GraphErrorKind::UnknownMember);

        let unknown_target = GraphMorphism::create(
            n("bad"),
            instance_graph(),
            arrow_graph(),
            vec![(n("a"), n("zzz"))],
        );
        assert_eq!(unknown_target.unwrap_err().kind(), GraphErrorKind::UnknownMember);
    }

    #[test]
    fn test_create_rejects_ambiguous_bindings() {
        let result = GraphMorphism::create(
            n("bad"),
            instance_graph(),
            arrow_graph(),
            vec![(n("a"), n("X")), (n("a"), n("Y"))],
        );
        assert_eq!(result.unwrap_err().kind(), GraphErrorKind::AmbiguousMapping);
    }

    #[test]
    fn test_partial_morphism_is_allowed() {
        let m = GraphMorphism::create(
            n("partial"),
            instance_graph(),
            arrow_graph(),
            vec![(n("a"), n("X"))],
        )
        .unwrap();
        assert!(m.verify());
        assert!(!m.is_total());
        assert!(m.apply(&Triple::edge("a", "f", "b")).is_none());
    }

    #[test]
    fn test_compose_with_identity() {
        let m = typing();
        let left = GraphMorphism::identity(instance_graph()).compose(&m).unwrap();
        let right = m.compose(&GraphMorphism::identity(arrow_graph())).unwrap();
        assert!(left.agrees_with(&m));
        assert!(right.agrees_with(&m));
    }

    #[test]
    fn test_compose_checks_codomain() {
        let m = typing();
        let err = m.compose(&m).unwrap_err();
        assert_eq!(err.kind(), GraphErrorKind::CodomainMismatch);
    }

    #[test]
    fn test_flatten_unflatten() {
        let partial = GraphMorphism::create(
            n("partial"),
            instance_graph(),
            arrow_graph(),
            vec![
                (n("a"), n("X")),
                (n("b"), n("Y")),
                (n("f"), n("r")),
            ],
        )
        .unwrap();

        let flat = partial.flatten().unwrap();
        // c and g are untyped and dropped
        assert_eq!(flat.len(), 3);
        assert!(flat.contains_node(&n("a").type_by(&n("X"))));
        assert_eq!(flat.name(), &n("I").type_by(&n("T")));

        let back = GraphMorphism::unflatten(&flat, arrow_graph(), n("back")).unwrap();
        assert_eq!(back.domain().name(), &n("I"));
        assert_eq!(back.map(&n("f")), Some(&n("r")));
        assert!(back.is_total());
    }

    #[test]
    fn test_isomorphism_kind() {
        let g = arrow_graph();
        let suffix = n("copy");
        let suffix_back = suffix.clone();
        let iso = MorphismKind::Isomorphism {
            name: n("iso"),
            graph: g,
            target_name: n("T2"),
            rename: Arc::new(move |x: &Name| x.prefix_with(&suffix)),
            inverse: Arc::new(move |x: &Name| x.unprefix(&suffix_back)),
        }
        .build()
        .unwrap();
        assert_eq!(iso.classify(), MorphismClass::Isomorphism);
    }

    #[test]
    fn test_non_invertible_isomorphism_is_rejected() {
        let iso = MorphismKind::Isomorphism {
            name: n("iso"),
            graph: arrow_graph(),
            target_name: n("T2"),
            rename: Arc::new(|x: &Name| x.copied()),
            inverse: Arc::new(|x: &Name| x.clone()),
        }
        .build();
        assert_eq!(iso.unwrap_err().kind(), GraphErrorKind::IllFormed);
    }

    #[test]
    fn test_epic_kind_builds_quotient() {
        let classes = BTreeSet::from([
            BTreeSet::from([n("b"), n("c")]),
            BTreeSet::from([n("f"), n("g")]),
        ]);
        let q = MorphismKind::Epic {
            name: n("q"),
            graph: instance_graph(),
            target_name: n("Q"),
            classes,
        }
        .build()
        .unwrap();
        assert_eq!(q.codomain().len(), 3);
        assert_eq!(q.classify(), MorphismClass::Epic);
    }

    #[test]
    fn test_monic_kind_is_inclusion() {
        let sub = Arc::new(Graph::create(n("S"), vec![Triple::node("a")]).unwrap());
        let incl = MorphismKind::Monic {
            name: n("incl"),
            sub,
            sup: instance_graph(),
        }
        .build()
        .unwrap();
        assert_eq!(incl.classify(), MorphismClass::Monic);
    }
}
