// Copyright 2025 Cowboy AI, LLC.

//! Limits of graph diagrams
//!
//! The pullback of a cospan `A -f-> C <-g- B` pairs up the elements of `A`
//! and `B` that land on the same element of `C`. Its projections are the
//! first and second components of those pairs.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use super::morphism::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::identifiers::Name;

/// A universal cone or cocone: an apex graph with its legs
pub trait Cone {
    /// The apex graph
    fn apex(&self) -> &Arc<Graph>;

    /// The legs, in diagram order
    fn legs(&self) -> Vec<&GraphMorphism>;
}

/// Pullback of a cospan: the apex together with both projections
#[derive(Debug, Clone)]
pub struct Pullback {
    /// The pullback graph P
    pub apex: Arc<Graph>,
    /// Projection from P onto the domain of the left morphism
    pub left: GraphMorphism,
    /// Projection from P onto the domain of the right morphism
    pub right: GraphMorphism,
}

impl Pullback {
    /// Whether `left ; f` and `right ; g` agree on every apex element
    pub fn commutes(&self, f: &GraphMorphism, g: &GraphMorphism) -> bool {
        match (self.left.compose(f), self.right.compose(g)) {
            (Ok(via_f), Ok(via_g)) => via_f.agrees_with(&via_g),
            _ => false,
        }
    }
}

impl Cone for Pullback {
    fn apex(&self) -> &Arc<Graph> {
        &self.apex
    }

    fn legs(&self) -> Vec<&GraphMorphism> {
        vec![&self.left, &self.right]
    }
}

impl GraphMorphism {
    /// Pull back `self: A -> C` along `other: B -> C`.
    ///
    /// Every codomain element contributes the pairs of its preimages, so a
    /// partial morphism only contributes where it is defined.
    pub fn pullback(&self, other: &GraphMorphism) -> GraphResult<Pullback> {
        if self.codomain().name() != other.codomain().name() {
            return Err(GraphError::CodomainMismatch {
                expected: self.codomain().name().clone(),
                actual: other.codomain().name().clone(),
            });
        }

        let mut elements = Vec::new();
        for shared in self.codomain().elements() {
            let lefts = self.preimage(shared);
            if lefts.is_empty() {
                continue;
            }
            for right in other.preimage(shared) {
                for left in &lefts {
                    elements.push(left.combine_with(&right, Name::pair));
                }
            }
        }

        let apex_name = Name::identifier("P.B.")
            .applied_to(&self.domain().name().pair(other.domain().name()));
        let apex = Arc::new(Graph::create(apex_name, elements)?);

        let mut to_left: IndexMap<Name, Name> = IndexMap::new();
        let mut to_right: IndexMap<Name, Name> = IndexMap::new();
        for element in apex.elements() {
            let label = element.label();
            if let (Some(l), Some(r)) = (label.first_part(), label.second_part()) {
                to_left.insert(label.clone(), l.clone());
                to_right.insert(label.clone(), r.clone());
            }
        }
        debug!(apex = %apex.name(), size = apex.len(), "computed pullback");

        let left = GraphMorphism::new_unchecked(
            other.name().add_suffix(self.name()),
            apex.clone(),
            self.domain().clone(),
            to_left,
        );
        let right = GraphMorphism::new_unchecked(
            self.name().add_suffix(other.name()),
            apex.clone(),
            other.domain().clone(),
            to_right,
        );
        Ok(Pullback { apex, left, right })
    }
}
