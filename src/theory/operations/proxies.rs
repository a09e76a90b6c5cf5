// Copyright 2025 Cowboy AI, LLC.

//! Proxy arrows: a fresh edge out of every source node, or into every target
//! node. A constant arrow is a proxy whose targets all coincide in one
//! literal.

use std::sync::Arc;

use super::{begin, finish, strip, strip_types, ty};
use crate::category::GraphMorphism;
use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::identifiers::{Name, Value};
use crate::theory::{ExecutionContext, GraphTheory, Operation, TheoryKind};
use crate::triple::Triple;
use crate::universe;

/// Gives every `0` node a fresh outgoing `01` edge into a fresh `1` node
#[derive(Debug, Clone, Copy, Default)]
pub struct Proxy;

operation_theory!(Proxy, "<[proxy]>", crate::universe::ARROW);

impl Operation for Proxy {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ARROW)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for node in instance.all_node_instances(&universe::ARROW_SRC_NAME) {
            let proxy = self.name().applied_to(&node);
            let target = proxy.add_suffix(&universe::ARROW_TRG_NAME);
            let arrow = Triple::new(
                node.clone(),
                proxy.add_suffix(&universe::ARROW_LBL_NAME),
                target.clone(),
            );
            builders = builders
                .typed_node(target, ty("1"))
                .typed_edge(&arrow, &universe::ARROW_THE_ARROW);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| {
                instance
                    .all_outgoing_instances(&universe::ARROW_THE_ARROW, node)
                    .len()
                    == 1
            })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["01", "1"])
    }
}

/// Gives every `1` node a fresh incoming `01` edge out of a fresh `0` node
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseProxy;

operation_theory!(InverseProxy, "<[inverseProxy]>", crate::universe::ARROW);

impl Operation for InverseProxy {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::NODE_1)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&super::NODE_1)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ARROW)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for node in instance.all_node_instances(&universe::ARROW_TRG_NAME) {
            let proxy = self.name().applied_to(&node);
            let source = proxy.add_suffix(&universe::ARROW_SRC_NAME);
            let arrow = Triple::new(
                source.clone(),
                proxy.add_suffix(&universe::ARROW_LBL_NAME),
                node.clone(),
            );
            builders = builders
                .typed_node(source, ty("0"))
                .typed_edge(&arrow, &universe::ARROW_THE_ARROW);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ARROW_TRG_NAME)
            .iter()
            .all(|node| {
                instance
                    .all_incoming_instances(&universe::ARROW_THE_ARROW, node)
                    .len()
                    == 1
            })
    }

    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        strip_types(self, instance, &["01", "0"])
    }
}

/// Gives every `0` node an `01` edge into one fixed literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantValue {
    value: Value,
    label: String,
}

impl ConstantValue {
    /// Arrows into `value`
    pub fn new(value: Value) -> Self {
        Self {
            label: format!("<[constant({value})]>"),
            value,
        }
    }

    /// The literal every arrow points to
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn constant(&self) -> Name {
        Name::Value(self.value.clone())
    }

    fn arrow_from(&self, node: &Name) -> Triple {
        Triple::new(node.clone(), self.name().applied_to(node), self.constant())
    }
}

impl GraphTheory for ConstantValue {
    fn name_as_str(&self) -> &str {
        &self.label
    }

    fn arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ARROW)
    }

    fn kind(&self) -> TheoryKind<'_> {
        TheoryKind::Operation(self)
    }
}

impl Operation for ConstantValue {
    fn input_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn overlap_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ONE_NODE)
    }

    fn output_arity(&self) -> Arc<Graph> {
        Arc::clone(&universe::ARROW)
    }

    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        let mut builders = begin(self, instance, context)?;
        for node in instance.all_node_instances(&universe::ARROW_SRC_NAME) {
            builders = builders
                .typed_node(self.constant(), ty("1"))
                .typed_edge(&self.arrow_from(&node), &universe::ARROW_THE_ARROW);
        }
        finish(self, builders, instance, context)
    }

    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool {
        let arrows = instance.all_instances(&universe::ARROW_THE_ARROW);
        instance
            .all_node_instances(&universe::ARROW_SRC_NAME)
            .iter()
            .all(|node| arrows.contains(&self.arrow_from(node)))
    }

    /// Removes the generated arrows, and the literal once nothing else
    /// points to it
    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism> {
        let generated = |t: &Triple| t.is_edge() && t == &self.arrow_from(t.source());
        let constant = self.constant();
        let shared = instance
            .domain()
            .edges()
            .any(|e| (e.source() == &constant || e.target() == &constant) && !generated(e));
        strip(self, instance, |t, type_name| {
            if t.is_node() {
                !shared && t.label() == &constant && type_name == &ty("1")
            } else {
                type_name == &*universe::ARROW_LBL_NAME && generated(t)
            }
        })
    }
}
