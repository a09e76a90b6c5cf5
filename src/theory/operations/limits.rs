// Copyright 2025 Cowboy AI, LLC.

//! Limits and colimits computed inside a typed graph
//!
//! Nodes stand for objects and edges typed by one arity edge form a
//! relation. Products and coproducts are built from names, the universal
//! properties add the mediating edges for comparator cones that already
//! exist in the instance.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use super::{begin, finish, strip_types, ty};
use crate::category::GraphMorphism;
use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::partition::PartitionAlgorithm;
use crate::theory::{ExecutionContext, GraphTheory, Operation};
use crate::triple::Triple;
use crate::universe;

fn targets(instance: &GraphMorphism, relation: &Triple, source: &Name) -> BTreeSet<Name> {
    instance
        .all_outgoing_instances(relation, source)
        .iter()
        .map(|t| t.target().clone())
        .collect()
}

/// Adds a node `2` with an edge into every `0` on which the relations `010`
/// and `011` reach the same targets
#[derive(Debug, Clone, Copy, Default)]
pub struct Equalizer;

operation_theory!(Equalizer, "<[equalizer]>", crate::universe::EQUALIZER_DIAGRAM);

impl Equalizer {
    fn qualifying(instance: &GraphMorphism) -> HashSet<Name> {
        instance
            .all_node_instances(&ty("0"))
            .into_iter()
            .filter(|source| {
                targets(instance, &universe::CELL_LHS, source)
                    == targets(instance, &universe::CELL_RHS, source)
            })
            .collect()
    }
}

impl Operation for Equalizer {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::CELL)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_20)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        let mut qualifying: Vec<Name> = Self::qualifying(instance).into_iter().collect();
        qualifying.sort();
        for source in qualifying {
            let mediator = self.name().applied_to(&source);
            let inclusion = Triple::new(
                mediator.clone(),
                source.injected_from(&mediator),
                source.clone(),
            );
            builders = builders
                .typed_node(mediator, ty("2"))
                .typed_edge(&inclusion, &universe::EQUALIZER_MEDIATOR);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let qualifying = Self::qualifying(instance);
        instance.all_node_instances(&ty("0")).iter().all(|source| {
            let mediators = instance
                .all_incoming_instances(&universe::EQUALIZER_MEDIATOR, source)
                .len();
            mediators == usize::from(qualifying.contains(source))
        })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["20", "2"])
    }
}

/// Adds the quotient of the `1` nodes by the relation "reached from a common
/// source through `010` and `011`", with an edge from every member into its
/// class
#[derive(Debug, Clone, Copy, Default)]
pub struct Coequalizer;

operation_theory!(Coequalizer, "<[partition]>", crate::universe::COEQUALIZER_DIAGRAM);

impl Coequalizer {
    fn classes(instance: &GraphMorphism) -> BTreeSet<BTreeSet<Name>> {
        let mut partition = PartitionAlgorithm::new(instance.all_node_instances(&ty("1")));
        for (lhs, rhs) in
            instance.all_src_coincident_instances(&universe::CELL_LHS, &universe::CELL_RHS)
        {
            partition.relate(lhs.target(), rhs.target());
        }
        partition.get_result()
    }
}

impl Operation for Coequalizer {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::CELL)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::NODE_1)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_12)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for class in Self::classes(instance) {
            let quotient = self.name().applied_to(&Name::merge(class.iter().cloned()));
            builders = builders.typed_node(quotient.clone(), ty("2"));
            for member in &class {
                let projection = Triple::new(
                    member.clone(),
                    quotient.injected_from(member),
                    quotient.clone(),
                );
                builders = builders.typed_edge(&projection, &universe::COEQUALIZER_MEDIATOR);
            }
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let classes = Self::classes(instance);
        let mut quotients = HashSet::new();
        classes.iter().all(|class| {
            let mut shared: Option<Name> = None;
            let consistent = class.iter().all(|member| {
                let outgoing =
                    instance.all_outgoing_instances(&universe::COEQUALIZER_MEDIATOR, member);
                match outgoing.as_slice() {
                    [only] => shared.get_or_insert_with(|| only.target().clone()) == only.target(),
                    _ => false,
                }
            });
            consistent && shared.map(|q| quotients.insert(q)).unwrap_or(false)
        })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["12", "2"])
    }
}

/// Adds a node `0` for every pair of a `1` and a `2`, with projections onto
/// both components
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeProduct;

operation_theory!(NodeProduct, "<[product]>", crate::universe::SPAN);

impl Operation for NodeProduct {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_12)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_12)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::SPAN)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        let rights = instance.all_node_instances(&ty("2"));
        for left in instance.all_node_instances(&ty("1")) {
            for right in &rights {
                let product = left.pair(right);
                let first = Triple::new(
                    product.clone(),
                    product.projection_on(&ty("1")),
                    left.clone(),
                );
                let second = Triple::new(
                    product.clone(),
                    product.projection_on(&ty("2")),
                    right.clone(),
                );
                builders = builders
                    .typed_node(product, ty("0"))
                    .typed_edge(&first, &universe::SPAN_LEFT_LEG)
                    .typed_edge(&second, &universe::SPAN_RIGHT_LEG);
            }
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let expected = instance.all_node_instances(&ty("1")).len()
            * instance.all_node_instances(&ty("2")).len();
        let products = instance.all_node_instances(&ty("0"));
        if products.len() != expected {
            return false;
        }
        let mut components = HashSet::new();
        products.iter().all(|product| {
            let first = instance.all_outgoing_instances(&universe::SPAN_LEFT_LEG, product);
            let second = instance.all_outgoing_instances(&universe::SPAN_RIGHT_LEG, product);
            match (first.as_slice(), second.as_slice()) {
                ([l], [r]) => components.insert((l.target().clone(), r.target().clone())),
                _ => false,
            }
        })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["01", "02", "0"])
    }
}

/// Adds a node `0` for every `1` and every `2`, with an injection edge from
/// the original into its copy
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeCoproduct;

operation_theory!(NodeCoproduct, "<[coproduct]>", crate::universe::COSPAN);

impl Operation for NodeCoproduct {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_12)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_12)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::COSPAN)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        let sides: [(&str, &Triple); 2] = [
            ("1", &*universe::COSPAN_LEFT_LEG),
            ("2", &*universe::COSPAN_RIGHT_LEG),
        ];
        for (side, leg) in sides {
            let side = ty(side);
            for node in instance.all_node_instances(&side) {
                let copy = node.copied().add_suffix(&side);
                let injection = Triple::new(node.clone(), node.injected_from(&side), copy.clone());
                builders = builders
                    .typed_node(copy, ty("0"))
                    .typed_edge(&injection, leg);
            }
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let lefts = instance.all_node_instances(&ty("1"));
        let rights = instance.all_node_instances(&ty("2"));
        let sums = instance.all_node_instances(&ty("0"));
        let injected_once = |nodes: &[Name], leg: &Triple| {
            nodes
                .iter()
                .all(|n| instance.all_outgoing_instances(leg, n).len() == 1)
        };
        sums.len() == lefts.len() + rights.len()
            && injected_once(&lefts, &*universe::COSPAN_LEFT_LEG)
            && injected_once(&rights, &*universe::COSPAN_RIGHT_LEG)
            && sums.iter().all(|sum| {
                instance
                    .all_incoming_instances(&universe::COSPAN_LEFT_LEG, sum)
                    .len()
                    + instance
                        .all_incoming_instances(&universe::COSPAN_RIGHT_LEG, sum)
                        .len()
                    == 1
            })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["10", "20", "0"])
    }
}

/// Adds the mediating edge `30` from every comparator `3` with legs `31` and
/// `32` into a product `0` whose projections end where those legs end
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductUniversalProp;

operation_theory!(
    ProductUniversalProp,
    "<[synchronize]>",
    crate::universe::PRODUCT_MEDIATOR_DIAGRAM
);

impl ProductUniversalProp {
    fn matching_products(instance: &GraphMorphism, left: &Name, right: &Name) -> Vec<Name> {
        instance
            .all_node_instances(&ty("0"))
            .into_iter()
            .filter(|product| {
                targets(instance, &universe::SPAN_LEFT_LEG, product).contains(left)
                    && targets(instance, &universe::SPAN_RIGHT_LEG, product).contains(right)
            })
            .collect()
    }

    fn comparators(instance: &GraphMorphism) -> Vec<(Triple, Triple)> {
        instance.all_src_coincident_instances(
            &universe::PRODUCT_COMPARATOR_LEFT,
            &universe::PRODUCT_COMPARATOR_RIGHT,
        )
    }
}

impl Operation for ProductUniversalProp {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PRODUCT_CONE)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_03)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_30)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for (left, right) in Self::comparators(instance) {
            let products = Self::matching_products(instance, left.target(), right.target());
            if let Some(product) = products.first() {
                let mediator = Triple::new(
                    left.source().clone(),
                    left.label().pair(right.label()),
                    product.clone(),
                );
                builders = builders.typed_edge(&mediator, &universe::PRODUCT_MEDIATOR);
            }
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        Self::comparators(instance).iter().all(|(left, right)| {
            let products = Self::matching_products(instance, left.target(), right.target());
            let label = left.label().pair(right.label());
            let mediators: Vec<Triple> = instance
                .all_outgoing_instances(&universe::PRODUCT_MEDIATOR, left.source())
                .into_iter()
                .filter(|m| m.label() == &label)
                .collect();
            match mediators.as_slice() {
                [] => products.is_empty(),
                [only] => products.contains(only.target()),
                _ => false,
            }
        })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["30"])
    }
}

/// Adds the mediating edge `03` out of a coproduct `0` for every comparator
/// leg `13` or `23` whose source is injected into it
#[derive(Debug, Clone, Copy, Default)]
pub struct CoproductUniversalProp;

operation_theory!(
    CoproductUniversalProp,
    "<[case]>",
    crate::universe::COPRODUCT_MEDIATOR_DIAGRAM
);

impl CoproductUniversalProp {
    /// Each comparator leg with the mediator it calls for, if its source is
    /// injected anywhere
    fn required(instance: &GraphMorphism) -> Vec<(Triple, Option<Triple>)> {
        let sides: [(&Triple, &Triple); 2] = [
            (
                &*universe::COSPAN_LEFT_LEG,
                &*universe::COPRODUCT_COMPARATOR_LEFT,
            ),
            (
                &*universe::COSPAN_RIGHT_LEG,
                &*universe::COPRODUCT_COMPARATOR_RIGHT,
            ),
        ];
        let mut required = Vec::new();
        for (injection, comparator) in sides {
            for leg in instance.all_instances(comparator) {
                let mediator = instance
                    .all_outgoing_instances(injection, leg.source())
                    .first()
                    .map(|inj| {
                        Triple::new(
                            inj.target().clone(),
                            leg.label().copied(),
                            leg.target().clone(),
                        )
                    });
                required.push((leg, mediator));
            }
        }
        required
    }
}

impl Operation for CoproductUniversalProp {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::COPRODUCT_COCONE)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_03)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_03)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for (_, mediator) in Self::required(instance) {
            if let Some(mediator) = mediator {
                builders = builders.typed_edge(&mediator, &universe::COPRODUCT_MEDIATOR);
            }
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let mediators = instance.all_instances(&universe::COPRODUCT_MEDIATOR);
        Self::required(instance).iter().all(|(leg, required)| {
            let label = leg.label().copied();
            let present = mediators.iter().filter(|m| m.label() == &label);
            match required {
                Some(required) => {
                    let present: Vec<&Triple> = present.collect();
                    present.len() == 1 && present[0] == required
                }
                None => present.count() == 0,
            }
        })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["03"])
    }
}
