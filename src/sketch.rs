// Copyright 2025 Cowboy AI, LLC.

//! Sketches: graphs annotated with diagrams
//!
//! A [`Diagram`] binds the arity of a theory into a carrier graph. A
//! [`Sketch`] is a carrier together with its diagrams; an instance of the
//! carrier satisfies the sketch when the part of it seen through each
//! diagram satisfies that diagram's theory.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::category::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::theory::{GraphTheory, TheoryKind};
use crate::triple::Triple;

/// A theory applied to part of a carrier graph
#[derive(Clone)]
pub struct Diagram {
    name: Name,
    label: Arc<dyn GraphTheory>,
    binding: GraphMorphism,
}

impl Diagram {
    /// Create a diagram from its label and binding
    pub fn new(name: Name, label: Arc<dyn GraphTheory>, binding: GraphMorphism) -> Self {
        Self {
            name,
            label,
            binding,
        }
    }

    /// The diagram's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The theory this diagram states
    pub fn label(&self) -> &Arc<dyn GraphTheory> {
        &self.label
    }

    /// The morphism from the arity into the carrier
    pub fn binding(&self) -> &GraphMorphism {
        &self.binding
    }

    /// The shape of the label
    pub fn arity(&self) -> Arc<Graph> {
        self.label.arity()
    }

    /// Whether the binding is a total morphism out of the label's arity
    pub fn verify(&self) -> bool {
        self.binding.domain().name() == self.arity().name()
            && self.binding.verify()
            && self.binding.is_total()
    }

    /// Carrier elements that the label derives: images of output-arity
    /// elements that are not also input. Predicates derive nothing.
    pub fn generated_elements(&self) -> Vec<Triple> {
        let TheoryKind::Operation(operation) = self.label.kind() else {
            return Vec::new();
        };
        let input = operation.input_arity();
        let output = operation.output_arity();
        output
            .elements()
            .filter(|t| !input.contains(t))
            .filter_map(|t| self.binding.apply(t).cloned())
            .collect()
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("name", &self.name)
            .field("label", &self.label.name_as_str())
            .field("binding", self.binding.name())
            .finish()
    }
}

/// A carrier graph with diagrams on it
#[derive(Debug, Clone)]
pub struct Sketch {
    name: Name,
    carrier: Arc<Graph>,
    diagrams: Vec<Diagram>,
}

impl Sketch {
    /// Create a sketch; every diagram must bind into `carrier`
    pub fn create(name: Name, carrier: Arc<Graph>, diagrams: Vec<Diagram>) -> GraphResult<Self> {
        if let Some(stray) = diagrams
            .iter()
            .find(|d| d.binding.codomain().name() != carrier.name())
        {
            return Err(GraphError::CodomainMismatch {
                expected: carrier.name().clone(),
                actual: stray.binding.codomain().name().clone(),
            });
        }
        debug!(sketch = %name, diagrams = diagrams.len(), "created sketch");
        Ok(Self {
            name,
            carrier,
            diagrams,
        })
    }

    /// The sketch's name
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The annotated graph
    pub fn carrier(&self) -> &Arc<Graph> {
        &self.carrier
    }

    /// All diagrams
    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    /// Diagrams whose binding touches `element`
    pub fn diagrams_on(&self, element: &Triple) -> Vec<&Diagram> {
        self.diagrams
            .iter()
            .filter(|d| d.binding.image().contains(element))
            .collect()
    }

    /// The diagram called `name`
    pub fn diagram_by_name(&self, name: &Name) -> Option<&Diagram> {
        self.diagrams.iter().find(|d| d.name() == name)
    }

    /// Carrier elements derived by some operation diagram
    pub fn derived_elements(&self) -> Vec<Triple> {
        let mut derived: Vec<Triple> = Vec::new();
        for element in self.diagrams.iter().flat_map(Diagram::generated_elements) {
            if !derived.contains(&element) {
                derived.push(element);
            }
        }
        derived
    }

    /// Carrier elements no diagram derives
    pub fn ground_elements(&self) -> Vec<Triple> {
        let derived = self.derived_elements();
        self.carrier
            .elements()
            .filter(|t| !derived.contains(t))
            .cloned()
            .collect()
    }

    /// Whether some diagram derives `element`
    pub fn is_derived(&self, element: &Triple) -> bool {
        self.diagrams
            .iter()
            .any(|d| d.generated_elements().contains(element))
    }

    /// Whether every diagram is well-formed
    pub fn verify(&self) -> bool {
        self.diagrams.iter().all(Diagram::verify)
    }

    /// Whether `instance` is a valid instance of the carrier that satisfies
    /// every diagram.
    ///
    /// Each diagram is checked on the pullback of its binding along the
    /// instance, which types the relevant part of the instance by the
    /// diagram's arity.
    pub fn is_satisfied(&self, instance: &GraphMorphism) -> bool {
        if instance.codomain().name() != self.carrier.name() || !instance.verify() {
            return false;
        }
        self.diagrams.iter().all(|diagram| {
            match diagram.binding.pullback(instance) {
                Ok(pullback) => diagram.label.is_satisfied(&pullback.left),
                Err(_) => false,
            }
        })
    }
}
