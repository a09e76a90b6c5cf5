// Copyright 2025 Cowboy AI, LLC.

//! Built-in predicates
//!
//! Most predicates are stated over [`ARROW`](crate::universe::ARROW) and
//! constrain how arrow instances connect source and target instances.
//! Relations on a single node type live on [`LOOP`](crate::universe::LOOP),
//! comparisons of two parallel relations on [`CELL`](crate::universe::CELL).
//! Predicates on literal values are in [`values`].

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::{GraphTheory, Predicate};
use crate::category::GraphMorphism;
use crate::identifiers::Name;
use crate::triple::Triple;
use crate::universe;

fn arrow_instances(instance: &GraphMorphism) -> Vec<Triple> {
    instance.all_instances(&universe::ARROW_THE_ARROW)
}

fn all_distinct<'a>(names: impl IntoIterator<Item = &'a Name>) -> bool {
    let mut seen = HashSet::new();
    names.into_iter().all(|n| seen.insert(n))
}

macro_rules! theory_impl {
    ($ty:ty, $arity:expr) => {
        impl $crate::theory::GraphTheory for $ty {
            fn name_as_str(&self) -> &str {
                self.label()
            }

            fn arity(&self) -> std::sync::Arc<$crate::graph::Graph> {
                std::sync::Arc::clone(&$arity)
            }

            fn kind(&self) -> $crate::theory::TheoryKind<'_> {
                $crate::theory::TheoryKind::Predicate(self)
            }
        }
    };
}

pub mod values;

pub use values::{
    BoolDT, EnumValue, FloatDT, HasAttributeValue, IntDT, IsValue, Range, Regex, StringDT,
};

/// Every source instance has at least one outgoing arrow instance
#[derive(Debug, Clone, Copy, Default)]
pub struct Total;

impl Total {
    fn label(&self) -> &str {
        "[total]"
    }
}

theory_impl!(Total, universe::ARROW);

impl Predicate for Total {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let arrows = arrow_instances(instance);
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| arrows.iter().any(|a| a.source() == node))
    }
}

/// No two arrow instances share a target
#[derive(Debug, Clone, Copy, Default)]
pub struct Injective;

impl Injective {
    fn label(&self) -> &str {
        "[injective]"
    }
}

theory_impl!(Injective, universe::ARROW);

impl Predicate for Injective {
    fn check(&self, instance: &GraphMorphism) -> bool {
        all_distinct(arrow_instances(instance).iter().map(Triple::target))
    }
}

/// Arrow instances leaving one source all reach different targets
#[derive(Debug, Clone, Copy, Default)]
pub struct Unique;

impl Unique {
    fn label(&self) -> &str {
        "[unique]"
    }
}

theory_impl!(Unique, universe::ARROW);

impl Predicate for Unique {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| {
                let outgoing = instance.all_outgoing_instances(&universe::ARROW_THE_ARROW, node);
                all_distinct(outgoing.iter().map(Triple::target))
            })
    }
}

fn within(count: usize, lower: Option<usize>, upper: Option<usize>) -> bool {
    lower.map(|lo| count >= lo).unwrap_or(true) && upper.map(|hi| count <= hi).unwrap_or(true)
}

fn multiplicity_label(lower: Option<usize>, upper: Option<usize>, side: char) -> String {
    let bound = |b: Option<usize>| b.map(|v| v.to_string()).unwrap_or_else(|| "*".to_string());
    format!("[{}..{}|{side}]", bound(lower), bound(upper))
}

/// Every target instance has between `lower` and `upper` incoming arrow
/// instances; `None` leaves that side unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMultiplicity {
    lower: Option<usize>,
    upper: Option<usize>,
    label: String,
}

impl SourceMultiplicity {
    /// Multiplicity `[lower..upper]` on the source side
    pub fn new(lower: Option<usize>, upper: Option<usize>) -> Self {
        Self {
            lower,
            upper,
            label: multiplicity_label(lower, upper, 's'),
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(SourceMultiplicity, universe::ARROW);

impl Predicate for SourceMultiplicity {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_TRG_NAME)
            .iter()
            .all(|node| {
                let incoming = instance.all_incoming_instances(&universe::ARROW_THE_ARROW, node);
                within(incoming.len(), self.lower, self.upper)
            })
    }
}

/// Every source instance has between `lower` and `upper` outgoing arrow
/// instances; `None` leaves that side unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMultiplicity {
    lower: Option<usize>,
    upper: Option<usize>,
    label: String,
}

impl TargetMultiplicity {
    /// Multiplicity `[lower..upper]` on the target side
    pub fn new(lower: Option<usize>, upper: Option<usize>) -> Self {
        Self {
            lower,
            upper,
            label: multiplicity_label(lower, upper, 't'),
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(TargetMultiplicity, universe::ARROW);

impl Predicate for TargetMultiplicity {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| {
                let outgoing = instance.all_outgoing_instances(&universe::ARROW_THE_ARROW, node);
                within(outgoing.len(), self.lower, self.upper)
            })
    }
}

/// Exactly one node instance
#[derive(Debug, Clone, Copy, Default)]
pub struct Singleton;

impl Singleton {
    fn label(&self) -> &str {
        "[singleton]"
    }
}

theory_impl!(Singleton, universe::ONE_NODE);

impl Predicate for Singleton {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ONE_NODE_THE_NODE)
            .len()
            == 1
    }
}

/// Forward and backward instances lead back to where they started
#[derive(Debug, Clone, Copy, Default)]
pub struct Inverse;

impl Inverse {
    fn label(&self) -> &str {
        "[inverse]"
    }
}

theory_impl!(Inverse, universe::CYCLE);

impl Predicate for Inverse {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let forward = instance.all_instances(&universe::CYCLE_FWD);
        let backward = instance.all_instances(&universe::CYCLE_BWD);
        let returns = |there: &[Triple], back: &[Triple]| {
            there.iter().all(|t| {
                back.iter()
                    .filter(|b| b.source() == t.target())
                    .all(|b| b.target() == t.source())
            })
        };
        returns(&forward, &backward) && returns(&backward, &forward)
    }
}

/// Every target instance has at least one incoming arrow instance
#[derive(Debug, Clone, Copy, Default)]
pub struct Surjective;

impl Surjective {
    fn label(&self) -> &str {
        "[surjective]"
    }
}

theory_impl!(Surjective, universe::ARROW);

impl Predicate for Surjective {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let arrows = arrow_instances(instance);
        instance
            .all_node_instances(&universe::ARROW_TRG_NAME)
            .iter()
            .all(|node| arrows.iter().any(|a| a.target() == node))
    }
}

/// No two arrow instances share a source
#[derive(Debug, Clone, Copy, Default)]
pub struct Function;

impl Function {
    fn label(&self) -> &str {
        "[function]"
    }
}

theory_impl!(Function, universe::ARROW);

impl Predicate for Function {
    fn check(&self, instance: &GraphMorphism) -> bool {
        all_distinct(arrow_instances(instance).iter().map(Triple::source))
    }
}

/// Arrow instances leaving one source carry pairwise distinct indices
#[derive(Debug, Clone, Copy, Default)]
pub struct Ordered;

impl Ordered {
    fn label(&self) -> &str {
        "[ordered]"
    }
}

theory_impl!(Ordered, universe::ARROW);

impl Predicate for Ordered {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| {
                let outgoing = instance.all_outgoing_instances(&universe::ARROW_THE_ARROW, node);
                let indices: Option<Vec<u64>> =
                    outgoing.iter().map(|t| t.label().index_value()).collect();
                indices
                    .map(|indices| {
                        let mut seen = HashSet::new();
                        indices.into_iter().all(|i| seen.insert(i))
                    })
                    .unwrap_or(false)
            })
    }
}

/// The type has no instances at all
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstractType;

impl AbstractType {
    fn label(&self) -> &str {
        "[abstract]"
    }
}

theory_impl!(AbstractType, universe::ONE_NODE);

impl Predicate for AbstractType {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ONE_NODE_THE_NODE)
            .is_empty()
    }
}

fn loop_instances(instance: &GraphMorphism) -> Vec<Triple> {
    instance.all_instances(&universe::LOOP_THE_LOOP)
}

/// No loop instance starts and ends at the same node
#[derive(Debug, Clone, Copy, Default)]
pub struct Irreflexive;

impl Irreflexive {
    fn label(&self) -> &str {
        "[irreflexive]"
    }
}

theory_impl!(Irreflexive, universe::LOOP);

impl Predicate for Irreflexive {
    fn check(&self, instance: &GraphMorphism) -> bool {
        loop_instances(instance)
            .iter()
            .all(|t| t.source() != t.target())
    }
}

/// Following loop instances never leads back to where one started
#[derive(Debug, Clone, Copy, Default)]
pub struct Acyclic;

impl Acyclic {
    fn label(&self) -> &str {
        "[acyclic]"
    }
}

theory_impl!(Acyclic, universe::LOOP);

/// Whether `to` can be reached from `from` along `edges`, in zero or more steps
fn reaches(edges: &[Triple], from: &Name, to: &Name) -> bool {
    let mut seen: HashSet<&Name> = HashSet::new();
    let mut queue: VecDeque<&Name> = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        if seen.insert(current) {
            queue.extend(
                edges
                    .iter()
                    .filter(|e| e.source() == current)
                    .map(Triple::target),
            );
        }
    }
    false
}

impl Predicate for Acyclic {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let edges = loop_instances(instance);
        // an edge closes a cycle when its source is reachable from its target
        edges
            .iter()
            .all(|e| !reaches(&edges, e.target(), e.source()))
    }
}

fn cell_targets<'a>(edges: &'a [Triple], source: &Name) -> HashSet<&'a Name> {
    edges
        .iter()
        .filter(|t| t.source() == source)
        .map(Triple::target)
        .collect()
}

/// The two sides of a cell relate exactly the same pairs of nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct Commutes;

impl Commutes {
    fn label(&self) -> &str {
        "[=]"
    }
}

theory_impl!(Commutes, universe::CELL);

impl Predicate for Commutes {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let lhs = instance.all_instances(&universe::CELL_LHS);
        let rhs = instance.all_instances(&universe::CELL_RHS);
        let sources: HashSet<&Name> = lhs.iter().map(Triple::source).collect();
        let rhs_sources: HashSet<&Name> = rhs.iter().map(Triple::source).collect();
        if sources != rhs_sources {
            return false;
        }
        sources
            .into_iter()
            .all(|s| cell_targets(&lhs, s) == cell_targets(&rhs, s))
    }
}

/// Every pair of nodes related by the left side of a cell is related by the
/// right side as well
#[derive(Debug, Clone, Copy, Default)]
pub struct Inclusion;

impl Inclusion {
    fn label(&self) -> &str {
        "[incl]"
    }
}

theory_impl!(Inclusion, universe::CELL);

impl Predicate for Inclusion {
    fn check(&self, instance: &GraphMorphism) -> bool {
        let rhs = instance.all_instances(&universe::CELL_RHS);
        instance
            .all_instances(&universe::CELL_LHS)
            .iter()
            .all(|l| cell_targets(&rhs, l.source()).contains(l.target()))
    }
}

/// Every built-in predicate with its default parameters
pub fn builtin() -> Vec<Arc<dyn GraphTheory>> {
    let mut theories: Vec<Arc<dyn GraphTheory>> = vec![
        Arc::new(Total),
        Arc::new(Injective),
        Arc::new(Unique),
        Arc::new(SourceMultiplicity::new(Some(0), None)),
        Arc::new(TargetMultiplicity::new(Some(0), None)),
        Arc::new(Singleton),
        Arc::new(Inverse),
        Arc::new(Surjective),
        Arc::new(Function),
        Arc::new(Ordered),
        Arc::new(AbstractType),
        Arc::new(Irreflexive),
        Arc::new(Acyclic),
        Arc::new(Commutes),
        Arc::new(Inclusion),
    ];
    theories.extend(values::builtin());
    theories
}
