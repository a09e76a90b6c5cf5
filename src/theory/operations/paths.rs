// Copyright 2025 Cowboy AI, LLC.

//! Operations on edge relations: composition, inversion and closures

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{begin, finish, strip, strip_types, ty};
use crate::category::GraphMorphism;
use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::theory::{ExecutionContext, GraphTheory, Operation};
use crate::triple::Triple;
use crate::universe;

fn endpoints(t: &Triple) -> (Name, Name) {
    (t.source().clone(), t.target().clone())
}

/// How many of `edges` run between each pair of nodes
fn endpoint_counts(edges: Vec<Triple>) -> HashMap<(Name, Name), usize> {
    let mut counts: HashMap<(Name, Name), usize> = HashMap::new();
    for edge in edges {
        *counts.entry(endpoints(&edge)).or_default() += 1;
    }
    counts
}

/// Adds the composite `0 -02-> 2` of every path along `01` then `12`
#[derive(Debug, Clone, Copy, Default)]
pub struct Compose;

operation_theory!(Compose, "<[compose]>", crate::universe::TRIANGLE);

impl Compose {
    fn composites(instance: &GraphMorphism) -> Vec<Triple> {
        let mut composites = Vec::new();
        for first in instance.all_instances(&universe::CHAIN_FST) {
            for second in instance.all_outgoing_instances(&universe::CHAIN_SND, first.target()) {
                composites.extend(first.compose(&second));
            }
        }
        composites
    }
}

impl Operation for Compose {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::CHAIN)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_02)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_02)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for composite in Self::composites(instance) {
            builders = builders.typed_edge(&composite, &universe::TRIANGLE_HYP);
        }
        finish(self, builders, instance, context)
    }

    /// As many `02` edges between two nodes as there are paths
    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        endpoint_counts(Self::composites(instance))
            == endpoint_counts(instance.all_instances(&universe::TRIANGLE_HYP))
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["02"])
    }
}

/// Adds `1 -12-> 2` for every pair of `10` and `20` edges meeting in the
/// same node, composing the first with the reverse of the second
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeIncident;

operation_theory!(
    ComposeIncident,
    "<[composeIncident]>",
    crate::universe::INCIDENCE_TRIANGLE
);

impl ComposeIncident {
    fn composites(instance: &GraphMorphism) -> Vec<Triple> {
        let mut composites = Vec::new();
        for left in instance.all_instances(&universe::COSPAN_LEFT_LEG) {
            for right in
                instance.all_incoming_instances(&universe::COSPAN_RIGHT_LEG, left.target())
            {
                composites.extend(left.compose(&right.inverse()));
            }
        }
        composites
    }
}

impl Operation for ComposeIncident {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::COSPAN)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::PAIR_12)
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
        for composite in Self::composites(instance) {
            builders = builders.typed_edge(&composite, &universe::INCIDENCE_TRIANGLE_HYP);
        }
        finish(self, builders, instance, context)
    }

    /// As many `12` edges between two nodes as there are meeting legs
    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        endpoint_counts(Self::composites(instance))
            == endpoint_counts(instance.all_instances(&universe::INCIDENCE_TRIANGLE_HYP))
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["12"])
    }
}

/// Adds the reverse `1 -10-> 0` of every `01` edge
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

operation_theory!(Invert, "<[invert]>", crate::universe::CYCLE);

impl Operation for Invert {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ARROW)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::PAIR)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::ARROW_10)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for forward in instance.all_instances(&universe::CYCLE_FWD) {
            builders = builders.typed_edge(&forward.inverse(), &universe::CYCLE_BWD);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let forward: HashSet<(Name, Name)> = instance
            .all_instances(&universe::CYCLE_FWD)
            .iter()
            .map(endpoints)
            .collect();
        let backward: HashSet<(Name, Name)> = instance
            .all_instances(&universe::CYCLE_BWD)
            .iter()
            .map(|t| endpoints(&t.inverse()))
            .collect();
        forward == backward
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["10"])
    }
}

/// Closes the `00` relation under composition
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitiveClosure;

operation_theory!(TransitiveClosure, "<[transitiveClosure]>", crate::universe::LOOP);

impl Operation for TransitiveClosure {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::LOOP)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::LOOP)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::LOOP)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        let mut edges = instance.all_instances(&universe::LOOP_THE_LOOP);
        let mut direct: HashSet<(Name, Name)> = edges.iter().map(endpoints).collect();
        loop {
            let mut added = Vec::new();
            for first in &edges {
                for second in &edges {
                    if let Some(composite) = first.compose(second) {
                        if direct.insert(endpoints(&composite)) {
                            added.push(composite);
                        }
                    }
                }
            }
            if added.is_empty() {
                break;
            }
            for edge in &added {
                builders = builders.typed_edge(edge, &universe::LOOP_THE_LOOP);
            }
            edges.extend(added);
        }
        finish(self, builders, instance, context)
    }

    /// Every two-step path is bridged by at least one direct edge
    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let edges = instance.all_instances(&universe::LOOP_THE_LOOP);
        let direct: HashSet<(Name, Name)> = edges.iter().map(endpoints).collect();
        edges.iter().all(|first| {
            edges
                .iter()
                .filter_map(|second| first.compose(second))
                .all(|composite| direct.contains(&endpoints(&composite)))
        })
    }

    /// Removes every edge that is literally the composite of two others
    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        let edges = instance.all_instances(&universe::LOOP_THE_LOOP);
        let composites: HashSet<Triple> = edges
            .iter()
            .flat_map(|first| edges.iter().filter_map(move |second| first.compose(second)))
            .collect();
        strip(self, instance, |t, _| composites.contains(t))
    }
}

/// Adds a loop `n -00-> n` on every node
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflexiveClosure;

operation_theory!(ReflexiveClosure, "<[reflexiveClosure]>", crate::universe::LOOP);

impl ReflexiveClosure {
    fn generated_loop(&self, node: &Name) -> Triple {
        Triple::new(node.clone(), self.name().applied_to(node), node.clone())
    }
}

impl Operation for ReflexiveClosure {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::LOOP)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for node in instance.all_node_instances(&ty("0")) {
            builders = builders.typed_edge(&self.generated_loop(&node), &universe::LOOP_THE_LOOP);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        instance.all_node_instances(&ty("0")).iter().all(|node| {
            instance
                .all_outgoing_instances(&universe::LOOP_THE_LOOP, node)
                .iter()
                .any(|t| t.target() == node)
        })
    }

    /// Removes only the loops this operation generates
    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip(self, instance, |t, _| {
            t.is_edge() && t == &self.generated_loop(t.source())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::typed_instance;
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(s: &str) -> Name {
        Name::identifier(s)
    }

    fn chain() -> GraphMorphism {
        typed_instance(
            Compose.arity(),
            &[("a", "0"), ("b", "1"), ("c", "2"), ("d", "2")],
            &[
                ("a", "f", "b", "01"),
                ("b", "g", "c", "12"),
                ("b", "h", "d", "12"),
            ],
        )
    }

    #[test]
    fn test_compose_adds_one_edge_per_path() {
        let mut ctx = ExecutionContext::default();
        let result = Compose.execute(&chain(), &mut ctx).unwrap();
        assert!(Compose.is_executed_correctly(&result));
        let mut composites = result.all_instances(&universe::TRIANGLE_HYP);
        composites.sort_by(|x, y| x.target().cmp(y.target()));
        assert_eq!(
            composites,
            vec![
                Triple::new(n("a"), n("f").compose_sequentially(&n("g")), n("c")),
                Triple::new(n("a"), n("f").compose_sequentially(&n("h")), n("d")),
            ]
        );
    }

    #[test]
    fn test_compose_detects_missing_and_extra_edges() {
        let input = chain();
        assert!(!Compose.is_executed_correctly(&input));
        let extra = typed_instance(
            Compose.arity(),
            &[("a", "0"), ("c", "2")],
            &[("a", "x", "c", "02")],
        );
        assert!(!Compose.is_executed_correctly(&extra));
    }

    #[test]
    fn test_compose_incident_joins_legs_meeting_in_a_node() {
        let mut ctx = ExecutionContext::default();
        // two left legs and one right leg into o, one right leg into the lonely p
        let input = typed_instance(
            ComposeIncident.arity(),
            &[("o", "0"), ("p", "0"), ("a", "1"), ("b", "1"), ("c", "2"), ("d", "2")],
            &[
                ("a", "f", "o", "10"),
                ("b", "g", "o", "10"),
                ("c", "h", "o", "20"),
                ("d", "k", "p", "20"),
            ],
        );
        assert!(!ComposeIncident.is_executed_correctly(&input));

        let result = ComposeIncident.execute(&input, &mut ctx).unwrap();
        assert!(ComposeIncident.is_executed_correctly(&result));
        let mut composites = result.all_instances(&universe::INCIDENCE_TRIANGLE_HYP);
        composites.sort_by(|x, y| x.source().cmp(y.source()));
        assert_eq!(
            composites,
            vec![
                Triple::new(n("a"), n("f").compose_sequentially(&n("h").inverse()), n("c")),
                Triple::new(n("b"), n("g").compose_sequentially(&n("h").inverse()), n("c")),
            ]
        );

        let undone = ComposeIncident.undo(&result).unwrap();
        assert!(undone.domain().same_elements(input.domain()));
    }

    #[test]
    fn test_invert() {
        let mut ctx = ExecutionContext::default();
        let input = typed_instance(
            Invert.arity(),
            &[("a", "0"), ("b", "1")],
            &[("a", "f", "b", "01")],
        );
        let result = Invert.execute(&input, &mut ctx).unwrap();
        assert!(Invert.is_executed_correctly(&result));
        assert!(result
            .domain()
            .contains(&Triple::new(n("b"), n("f").inverse(), n("a"))));
        let undone = Invert.undo(&result).unwrap();
        assert!(!Invert.is_executed_correctly(&undone));
    }

    #[test]
    fn test_transitive_closure_reaches_fixpoint() {
        let mut ctx = ExecutionContext::default();
        let input = typed_instance(
            TransitiveClosure.arity(),
            &[("a", "0"), ("b", "0"), ("c", "0"), ("d", "0")],
            &[
                ("a", "f", "b", "00"),
                ("b", "g", "c", "00"),
                ("c", "h", "d", "00"),
            ],
        );
        let result = TransitiveClosure.execute(&input, &mut ctx).unwrap();
        assert!(TransitiveClosure.is_executed_correctly(&result));
        // a->c, b->d, a->d
        assert_eq!(result.domain().edges().count(), 6);
        assert!(result.domain().exists_path(&n("a"), &n("d")));

        let undone = TransitiveClosure.undo(&result).unwrap();
        assert!(undone.domain().same_elements(input.domain()));
    }

    #[test]
    fn test_transitive_closure_on_cycle() {
        let mut ctx = ExecutionContext::default();
        let input = typed_instance(
            TransitiveClosure.arity(),
            &[("a", "0"), ("b", "0")],
            &[("a", "f", "b", "00"), ("b", "g", "a", "00")],
        );
        let result = TransitiveClosure.execute(&input, &mut ctx).unwrap();
        assert!(TransitiveClosure.is_executed_correctly(&result));
        assert_eq!(result.domain().edges().count(), 4);
    }

    #[test]
    fn test_reflexive_closure_undo_keeps_user_loops() {
        let mut ctx = ExecutionContext::default();
        let input = typed_instance(
            ReflexiveClosure.arity(),
            &[("a", "0"), ("b", "0")],
            &[("a", "own", "a", "00")],
        );
        assert!(!ReflexiveClosure.is_executed_correctly(&input));
        let result = ReflexiveClosure.execute(&input, &mut ctx).unwrap();
        assert!(ReflexiveClosure.is_executed_correctly(&result));
        assert_eq!(result.domain().edges().count(), 3);

        let undone = ReflexiveClosure.undo(&result).unwrap();
        assert_eq!(undone.domain().edges().count(), 1);
        assert!(undone.domain().contains(&Triple::edge("a", "own", "a")));
    }

    #[test]
    fn test_fix_is_idempotent() {
        let mut ctx = ExecutionContext::default();
        let once = Compose.fix(&chain(), &mut ctx).unwrap();
        let twice = Compose.fix(&once, &mut ctx).unwrap();
        assert_eq!(once, twice);
        assert!(once.domain().same_elements(twice.domain()));
    }
}
