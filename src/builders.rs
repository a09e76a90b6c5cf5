// Copyright 2025 Cowboy AI, LLC.

//! Fluent construction of graphs, morphisms and sketches
//!
//! [`GraphBuilders`] accumulates nodes, edges and bindings and turns them
//! into results on demand. Results are pushed onto a stack and the most
//! recent one is handed out by the `fetch_result_*` methods.
//!
//! Two switches govern the builder, see [`BuilderPolicy`]:
//!
//! - `create_context`: edges create their missing endpoints, and a morphism
//!   without an explicit codomain gets the image of its bindings as codomain.
//! - `ignore_errors`: a resilient builder drops offending elements and
//!   bindings and keeps going, while a strict builder refuses to produce a
//!   result and reports the first error on fetch.
//!
//! In either mode every problem is recorded and available from
//! [`GraphBuilders::errors`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::category::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::sketch::{Diagram, Sketch};
use crate::theory::GraphTheory;
use crate::triple::Triple;

/// Switches controlling how forgiving a builder is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderPolicy {
    /// Create missing endpoints and codomains implicitly
    pub create_context: bool,
    /// Drop offending input instead of failing
    pub ignore_errors: bool,
}

impl Default for BuilderPolicy {
    fn default() -> Self {
        Self {
            create_context: false,
            ignore_errors: true,
        }
    }
}

impl BuilderPolicy {
    /// Fail on the first problem, create nothing implicitly
    pub fn strict() -> Self {
        Self {
            create_context: false,
            ignore_errors: false,
        }
    }

    /// Create context implicitly and drop offending input
    pub fn lenient() -> Self {
        Self {
            create_context: true,
            ignore_errors: true,
        }
    }
}

/// A finished construction
#[derive(Debug, Clone)]
pub enum BuildResult {
    /// A graph
    Graph(Arc<Graph>),
    /// A morphism
    Morphism(GraphMorphism),
    /// A sketch
    Sketch(Sketch),
}

impl BuildResult {
    fn describe(&self) -> &'static str {
        match self {
            BuildResult::Graph(_) => "graph",
            BuildResult::Morphism(_) => "morphism",
            BuildResult::Sketch(_) => "sketch",
        }
    }
}

/// Everything a builder has accumulated so far
#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    elements: IndexMap<Name, Triple>,
    bindings: IndexMap<Name, Name>,
    domain: Option<Arc<Graph>>,
    codomain: Option<Arc<Graph>>,
    carrier: Option<Arc<Graph>>,
    labels: Vec<Arc<dyn GraphTheory>>,
    diagrams: Vec<Diagram>,
    results: Vec<BuildResult>,
    errors: Vec<GraphError>,
}

impl BuilderState {
    /// Pending elements, not yet turned into a graph
    pub fn pending_elements(&self) -> impl Iterator<Item = &Triple> {
        self.elements.values()
    }

    /// Pending bindings, not yet turned into a morphism
    pub fn pending_bindings(&self) -> impl Iterator<Item = (&Name, &Name)> {
        self.bindings.iter()
    }

    /// Number of finished results
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    fn latest_graph(&self) -> Option<&Arc<Graph>> {
        match self.results.last() {
            Some(BuildResult::Graph(graph)) => Some(graph),
            _ => None,
        }
    }

    fn pop_graph(&mut self) -> Option<Arc<Graph>> {
        match self.results.last() {
            Some(BuildResult::Graph(_)) => match self.results.pop() {
                Some(BuildResult::Graph(graph)) => Some(graph),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Fluent builder for graphs, morphisms and sketches
#[derive(Debug, Clone, Default)]
pub struct GraphBuilders {
    policy: BuilderPolicy,
    state: BuilderState,
}

impl GraphBuilders {
    /// A builder following `policy`
    pub fn new(policy: BuilderPolicy) -> Self {
        Self {
            policy,
            state: BuilderState::default(),
        }
    }

    /// A builder that fails on the first problem
    pub fn strict() -> Self {
        Self::new(BuilderPolicy::strict())
    }

    /// A builder that drops offending input, without implicit context
    pub fn resilient() -> Self {
        Self::new(BuilderPolicy::default())
    }

    /// A builder that drops offending input and creates context implicitly
    pub fn lenient() -> Self {
        Self::new(BuilderPolicy::lenient())
    }

    /// Switch implicit context creation
    pub fn create_context(mut self, enabled: bool) -> Self {
        self.policy.create_context = enabled;
        self
    }

    /// Switch between resilient and strict handling of problems
    pub fn ignore_errors(mut self, enabled: bool) -> Self {
        self.policy.ignore_errors = enabled;
        self
    }

    /// The policy in force
    pub fn policy(&self) -> BuilderPolicy {
        self.policy
    }

    /// The accumulated state
    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    /// Every problem recorded so far
    pub fn errors(&self) -> &[GraphError] {
        &self.state.errors
    }

    fn record(&mut self, error: GraphError) {
        warn!(kind = %error.kind(), "{error}");
        self.state.errors.push(error);
    }

    fn add_element(&mut self, triple: Triple) {
        match self.state.elements.get(triple.label()) {
            Some(existing) if existing != &triple => {
                let error = GraphError::DuplicateName {
                    name: triple.label().clone(),
                    existing: existing.clone(),
                    conflicting: triple,
                };
                self.record(error);
            }
            Some(_) => {}
            None => {
                self.state.elements.insert(triple.label().clone(), triple);
            }
        }
    }

    /// Add a node
    pub fn node(mut self, name: impl Into<Name>) -> Self {
        self.add_element(Triple::node(name));
        self
    }

    /// Add an edge; with context creation its endpoints are added as nodes
    pub fn edge(
        mut self,
        source: impl Into<Name>,
        label: impl Into<Name>,
        target: impl Into<Name>,
    ) -> Self {
        let triple = Triple::new(source.into(), label.into(), target.into());
        if self.policy.create_context {
            for end in [triple.source().clone(), triple.target().clone()] {
                if !self.state.elements.contains_key(&end) {
                    self.add_element(Triple::node(end));
                }
            }
        }
        self.add_element(triple);
        self
    }

    /// Add a node together with its typing
    pub fn typed_node(self, name: impl Into<Name>, type_name: impl Into<Name>) -> Self {
        let name = name.into();
        self.node(name.clone()).map(name, type_name)
    }

    /// Add an edge together with the typing of all three of its names
    pub fn typed_edge(self, instance: &Triple, type_edge: &Triple) -> Self {
        self.edge(
            instance.source().clone(),
            instance.label().clone(),
            instance.target().clone(),
        )
        .map(instance.source().clone(), type_edge.source().clone())
        .map(instance.label().clone(), type_edge.label().clone())
        .map(instance.target().clone(), type_edge.target().clone())
    }

    /// Add every element of `graph` to the pending elements
    pub fn import_graph(mut self, graph: &Graph) -> Self {
        for triple in graph.elements() {
            self.add_element(triple.clone());
        }
        self
    }

    /// Add the domain of `morphism` and all its bindings
    pub fn import_morphism(mut self, morphism: &GraphMorphism) -> Self {
        self = self.import_graph(morphism.domain());
        for (from, to) in morphism.mappings() {
            self.state.bindings.insert(from, to);
        }
        self
    }

    /// Remove a pending edge and its binding
    pub fn undo_edge(mut self, label: &Name) -> Self {
        if self.state.elements.get(label).map(Triple::is_edge).unwrap_or(false) {
            self.state.elements.shift_remove(label);
            self.state.bindings.shift_remove(label);
        }
        self
    }

    /// Remove a pending node, its incident edges and all their bindings
    pub fn undo_node(mut self, name: &Name) -> Self {
        let incident: Vec<Name> = self
            .state
            .elements
            .values()
            .filter(|t| t.is_edge() && (t.source() == name || t.target() == name))
            .map(|t| t.label().clone())
            .collect();
        for label in incident {
            self = self.undo_edge(&label);
        }
        if self.state.elements.get(name).map(Triple::is_node).unwrap_or(false) {
            self.state.elements.shift_remove(name);
            self.state.bindings.shift_remove(name);
        }
        self
    }

    /// Use `graph` as the domain of the next morphism
    pub fn domain(mut self, graph: Arc<Graph>) -> Self {
        self.state.domain = Some(graph);
        self
    }

    /// Use `graph` as the codomain of the next morphism
    pub fn codomain(mut self, graph: Arc<Graph>) -> Self {
        self.state.codomain = Some(graph);
        self
    }

    /// Look up `name` in whatever the next morphism's domain will be
    fn domain_element(&self, name: &Name) -> Option<Option<Triple>> {
        if let Some(domain) = &self.state.domain {
            return Some(domain.get(name).cloned());
        }
        if self.state.elements.is_empty() {
            if let Some(graph) = self.state.latest_graph() {
                return Some(graph.get(name).cloned());
            }
        }
        if self.policy.create_context && self.state.elements.is_empty() {
            return None;
        }
        Some(self.state.elements.get(name).cloned())
    }

    /// Bind `from` to `to` in the next morphism.
    ///
    /// The binding is checked as far as the known domain and codomain allow:
    /// both names must exist, a name cannot be rebound elsewhere, and nodes
    /// and edges must keep their kind and incidence.
    pub fn map(mut self, from: impl Into<Name>, to: impl Into<Name>) -> Self {
        let (from, to) = (from.into(), to.into());

        if let Some(existing) = self.state.bindings.get(&from) {
            if existing != &to {
                let error = GraphError::AmbiguousMapping {
                    name: from,
                    existing: existing.clone(),
                    requested: to,
                };
                self.record(error);
            }
            return self;
        }

        let source = match self.domain_element(&from) {
            Some(Some(triple)) => Some(triple),
            Some(None) => {
                let context = self
                    .state
                    .domain
                    .as_ref()
                    .map(|d| d.name().clone())
                    .unwrap_or_else(|| Name::identifier("dom"));
                self.record(GraphError::UnknownMember {
                    name: from,
                    context,
                });
                return self;
            }
            None => None,
        };

        if let Some(codomain) = self.state.codomain.clone() {
            let Some(image) = codomain.get(&to) else {
                self.record(GraphError::UnknownMember {
                    name: to,
                    context: codomain.name().clone(),
                });
                return self;
            };
            if let Some(source) = source {
                let endpoint_clash = |end: &Name, expected: &Name| {
                    self.state
                        .bindings
                        .get(end)
                        .map(|bound| bound != expected)
                        .unwrap_or(false)
                };
                let violated = source.is_node() != image.is_node()
                    || (source.is_edge()
                        && (endpoint_clash(source.source(), image.source())
                            || endpoint_clash(source.target(), image.target())));
                if violated {
                    self.record(GraphError::HomomorphismPropertyViolation {
                        morphism: Name::identifier("pending"),
                        violations: vec![source],
                    });
                    return self;
                }
            }
        }

        debug!(from = %from, to = %to, "binding");
        self.state.bindings.insert(from, to);
        self
    }

    /// Turn the pending elements into a graph called `name`.
    ///
    /// Dangling edges are recorded; a strict builder then produces nothing,
    /// a resilient one drops them.
    pub fn graph(mut self, name: impl Into<Name>) -> Self {
        let name = name.into();
        let elements: Vec<Triple> = std::mem::take(&mut self.state.elements)
            .into_values()
            .collect();
        let dangling = Graph::dangling_edges(&elements);
        if !dangling.is_empty() {
            let mut missing: Vec<Name> = Vec::new();
            for edge in &dangling {
                for end in [edge.source(), edge.target()] {
                    let is_node = elements.iter().any(|t| t.is_node() && t.label() == end);
                    if !is_node && !missing.contains(end) {
                        missing.push(end.clone());
                    }
                }
            }
            self.record(GraphError::DanglingEdge {
                graph: name.clone(),
                edges: dangling.clone(),
                missing,
            });
            if !self.policy.ignore_errors {
                return self;
            }
        }

        let kept = elements.into_iter().filter(|t| !dangling.contains(t));
        match Graph::create(name, kept) {
            Ok(graph) => {
                debug!(graph = %graph.name(), size = graph.len(), "built graph");
                self.state.results.push(BuildResult::Graph(Arc::new(graph)));
            }
            Err(error) => self.record(error),
        }
        self
    }

    fn image_graph(&self, name: Name, domain: &Graph) -> GraphResult<Graph> {
        let bindings = &self.state.bindings;
        let image: Vec<Triple> = domain
            .elements()
            .filter_map(|t| t.map(|n| bindings.get(n).cloned()))
            .collect();
        Graph::create(name, image)
    }

    /// Turn the pending bindings into a morphism called `name`.
    ///
    /// The domain is the explicit domain, else a graph built from the
    /// pending elements, else the latest graph result. The codomain is the
    /// explicit codomain, else (with context creation) the image of the
    /// bindings.
    pub fn morphism(mut self, name: impl Into<Name>) -> Self {
        let name = name.into();

        let domain = match self.state.domain.take() {
            Some(domain) => Some(domain),
            None => {
                if !self.state.elements.is_empty() {
                    self = self.graph(Name::identifier("dom").applied_to(&name));
                }
                self.state.pop_graph()
            }
        };
        let Some(domain) = domain else {
            self.state.bindings.clear();
            self.state.codomain = None;
            self.record(GraphError::ill_formed(format!("no domain for morphism {name}")));
            return self;
        };

        let codomain = match self.state.codomain.take() {
            Some(codomain) => codomain,
            None if self.policy.create_context => {
                match self.image_graph(Name::identifier("cod").applied_to(&name), &domain) {
                    Ok(graph) => Arc::new(graph),
                    Err(error) => {
                        self.state.bindings.clear();
                        self.record(error);
                        return self;
                    }
                }
            }
            None => {
                self.state.bindings.clear();
                self.record(GraphError::ill_formed(format!("no codomain for morphism {name}")));
                return self;
            }
        };

        let mut bindings = std::mem::take(&mut self.state.bindings);
        let stray: Vec<Name> = bindings
            .keys()
            .filter(|k| !domain.contains_name(k))
            .cloned()
            .collect();
        for key in stray {
            bindings.shift_remove(&key);
            self.record(GraphError::UnknownMember {
                name: key,
                context: domain.name().clone(),
            });
        }

        loop {
            let candidate = GraphMorphism::new_unchecked(
                name.clone(),
                domain.clone(),
                codomain.clone(),
                bindings.clone(),
            );
            let undefined = candidate.mapped_to_undefined();
            let violations = candidate.hom_prop_violations();
            if undefined.is_empty() && violations.is_empty() {
                debug!(morphism = %name, size = bindings.len(), "built morphism");
                self.state.results.push(BuildResult::Morphism(candidate));
                return self;
            }
            for triple in &undefined {
                if let Some(image) = bindings.get(triple.label()) {
                    let error = GraphError::UnknownMember {
                        name: image.clone(),
                        context: codomain.name().clone(),
                    };
                    self.record(error);
                }
            }
            if !violations.is_empty() {
                self.record(GraphError::HomomorphismPropertyViolation {
                    morphism: name.clone(),
                    violations: violations.clone(),
                });
            }
            if !self.policy.ignore_errors {
                return self;
            }
            for triple in undefined.iter().chain(violations.iter()) {
                bindings.shift_remove(triple.label());
            }
        }
    }

    /// Begin a diagram labelled by `label`: its arity becomes the domain of
    /// the next binding and the latest graph (or explicit codomain) its
    /// carrier
    pub fn start_diagram(mut self, label: Arc<dyn GraphTheory>) -> Self {
        if self.state.carrier.is_none() {
            self.state.carrier = self
                .state
                .codomain
                .clone()
                .or_else(|| self.state.latest_graph().cloned());
        }
        self.state.domain = Some(label.arity());
        self.state.codomain = self.state.carrier.clone();
        self.state.labels.push(label);
        self
    }

    /// Finish the current diagram, binding its arity as mapped since
    /// [`start_diagram`](Self::start_diagram)
    pub fn end_diagram(mut self, name: impl Into<Name>) -> Self {
        let name = name.into();
        let Some(label) = self.state.labels.pop() else {
            self.record(GraphError::ill_formed(format!("diagram {name} was never started")));
            return self;
        };
        if self.state.carrier.is_none() {
            self.record(GraphError::ill_formed(format!("diagram {name} has no carrier")));
            return self;
        }
        let before = self.state.results.len();
        self = self.morphism(name.clone());
        if self.state.results.len() == before {
            return self;
        }
        match self.state.results.pop() {
            Some(BuildResult::Morphism(binding)) => {
                self.state.diagrams.push(Diagram::new(name, label, binding));
            }
            Some(other) => self.state.results.push(other),
            None => {}
        }
        self
    }

    /// Collect the finished diagrams into a sketch on their carrier
    pub fn sketch(mut self, name: impl Into<Name>) -> Self {
        let name = name.into();
        let carrier = match self.state.carrier.take() {
            Some(carrier) => {
                if self.state.latest_graph().map(|g| g.name()) == Some(carrier.name()) {
                    self.state.pop_graph();
                }
                carrier
            }
            None => match self.state.pop_graph() {
                Some(graph) => graph,
                None => {
                    self.record(GraphError::ill_formed(format!("sketch {name} has no carrier")));
                    return self;
                }
            },
        };
        let diagrams = std::mem::take(&mut self.state.diagrams);
        match Sketch::create(name, carrier, diagrams) {
            Ok(sketch) => self.state.results.push(BuildResult::Sketch(sketch)),
            Err(error) => self.record(error),
        }
        self
    }

    /// Forget all pending input, results and errors
    pub fn clear(mut self) -> Self {
        self.state = BuilderState::default();
        self
    }

    fn fetch(mut self, wanted: &'static str) -> GraphResult<BuildResult> {
        if !self.policy.ignore_errors {
            if let Some(error) = self.state.errors.first() {
                return Err(error.clone());
            }
        }
        match self.state.results.pop() {
            Some(result) if result.describe() == wanted => Ok(result),
            Some(other) => Err(GraphError::ill_formed(format!(
                "expected a {wanted} but the latest result is a {}",
                other.describe()
            ))),
            None => Err(GraphError::ill_formed(format!("no {wanted} was constructed"))),
        }
    }

    /// The latest result, which must be a graph
    pub fn fetch_result_graph(self) -> GraphResult<Arc<Graph>> {
        match self.fetch("graph")? {
            BuildResult::Graph(graph) => Ok(graph),
            _ => Err(GraphError::ill_formed("expected a graph")),
        }
    }

    /// The latest result, which must be a morphism
    pub fn fetch_result_morphism(self) -> GraphResult<GraphMorphism> {
        match self.fetch("morphism")? {
            BuildResult::Morphism(morphism) => Ok(morphism),
            _ => Err(GraphError::ill_formed("expected a morphism")),
        }
    }

    /// The latest result, which must be a sketch
    pub fn fetch_result_sketch(self) -> GraphResult<Sketch> {
        match self.fetch("sketch")? {
            BuildResult::Sketch(sketch) => Ok(sketch),
            _ => Err(GraphError::ill_formed("expected a sketch")),
        }
    }
}
