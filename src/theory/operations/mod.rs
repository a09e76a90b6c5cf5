// Copyright 2025 Cowboy AI, LLC.

//! Built-in operations
//!
//! Every operation reads the input part of its arity, adds the output part
//! through a resilient builder and names its results after itself:
//! executing `op` on `m: I -> A` yields `op(m): op(I) -> arity`. Undoing
//! keeps the instance's names and removes the output-typed elements.
//!
//! - [`limits`]: equalizers, coequalizers, products, coproducts and their
//!   mediating arrows
//! - [`paths`]: composition, inversion and closures of edge relations
//! - [`proxies`]: fresh arrows for every source or target node, and arrows
//!   into a constant

use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{info, warn};

use super::{ExecutionContext, GraphTheory, Operation};
use crate::builders::GraphBuilders;
use crate::category::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::identifiers::{Name, Value};
use crate::triple::Triple;

macro_rules! operation_theory {
    ($ty:ty, $name:literal, $arity:expr) => {
        impl $crate::theory::GraphTheory for $ty {
            fn name_as_str(&self) -> &str {
                $name
            }

            fn arity(&self) -> std::sync::Arc<$crate::graph::Graph> {
                std::sync::Arc::clone(&$arity)
            }

            fn kind(&self) -> $crate::theory::TheoryKind<'_> {
                $crate::theory::TheoryKind::Operation(self)
            }
        }
    };
}

pub mod limits;
pub mod paths;
pub mod proxies;

pub use limits::{
    Coequalizer, CoproductUniversalProp, Equalizer, NodeCoproduct, NodeProduct,
    ProductUniversalProp,
};
pub use paths::{Compose, ComposeIncident, Invert, ReflexiveClosure, TransitiveClosure};
pub use proxies::{ConstantValue, InverseProxy, Proxy};

fn shape(name: &str, nodes: &[&str], edges: &[(&str, &str, &str)]) -> Arc<Graph> {
    let elements = nodes
        .iter()
        .map(|n| Triple::node(*n))
        .chain(edges.iter().map(|(s, l, t)| Triple::edge(*s, *l, *t)));
    Arc::new(Graph::from_trusted(Name::identifier(name), elements))
}

/// Partial shapes used as input, overlap and output arities
pub(crate) static NODE_1: Lazy<Arc<Graph>> = Lazy::new(|| shape("NODE_1", &["1"], &[]));
pub(crate) static PAIR_02: Lazy<Arc<Graph>> = Lazy::new(|| shape("PAIR_02", &["0", "2"], &[]));
pub(crate) static PAIR_03: Lazy<Arc<Graph>> = Lazy::new(|| shape("PAIR_03", &["0", "3"], &[]));
pub(crate) static PAIR_12: Lazy<Arc<Graph>> = Lazy::new(|| shape("PAIR_12", &["1", "2"], &[]));
pub(crate) static ARROW_02: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_02", &["0", "2"], &[("0", "02", "2")]));
pub(crate) static ARROW_03: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_03", &["0", "3"], &[("0", "03", "3")]));
pub(crate) static ARROW_10: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_10", &["0", "1"], &[("1", "10", "0")]));
pub(crate) static ARROW_12: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_12", &["1", "2"], &[("1", "12", "2")]));
pub(crate) static ARROW_20: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_20", &["0", "2"], &[("2", "20", "0")]));
pub(crate) static ARROW_30: Lazy<Arc<Graph>> =
    Lazy::new(|| shape("ARROW_30", &["0", "3"], &[("3", "30", "0")]));
pub(crate) static PRODUCT_CONE: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "PRODUCT_CONE",
        &["0", "1", "2", "3"],
        &[
            ("0", "01", "1"),
            ("0", "02", "2"),
            ("3", "31", "1"),
            ("3", "32", "2"),
        ],
    )
});
pub(crate) static COPRODUCT_COCONE: Lazy<Arc<Graph>> = Lazy::new(|| {
    shape(
        "COPRODUCT_COCONE",
        &["0", "1", "2", "3"],
        &[
            ("1", "10", "0"),
            ("2", "20", "0"),
            ("1", "13", "3"),
            ("2", "23", "3"),
        ],
    )
});

/// Shorthand for positional type names
pub(crate) fn ty(name: &str) -> Name {
    Name::identifier(name)
}

fn check_typing(op: &dyn Operation, instance: &GraphMorphism) -> GraphResult<Arc<Graph>> {
    let arity = op.arity();
    if instance.codomain().is_subgraph_of(&arity) {
        Ok(arity)
    } else {
        Err(GraphError::CodomainMismatch {
            expected: arity.name().clone(),
            actual: instance.codomain().name().clone(),
        })
    }
}

/// A builder holding `instance`, ready to receive elements typed over the
/// operation's arity
pub(crate) fn begin(
    op: &dyn Operation,
    instance: &GraphMorphism,
    context: &ExecutionContext,
) -> GraphResult<GraphBuilders> {
    let arity = check_typing(op, instance)?;
    Ok(context
        .builders()
        .import_morphism(instance)
        .codomain(arity))
}

/// Build the executed instance out of `builders`. Elements the builder had
/// to drop are logged and recorded on `context`.
pub(crate) fn finish(
    op: &dyn Operation,
    builders: GraphBuilders,
    instance: &GraphMorphism,
    context: &mut ExecutionContext,
) -> GraphResult<GraphMorphism> {
    let builders = builders
        .graph(op.name().applied_to(instance.domain().name()))
        .morphism(op.name().applied_to(instance.name()));
    let dropped = builders.errors().to_vec();
    if !dropped.is_empty() {
        warn!(
            operation = op.name_as_str(),
            instance = %instance.name(),
            dropped = dropped.len(),
            "operation output dropped"
        );
        context.record_dropped(dropped);
    }
    let result = builders.fetch_result_morphism()?;
    info!(
        operation = op.name_as_str(),
        instance = %instance.name(),
        added = result.domain().len().saturating_sub(instance.domain().len()),
        "executed operation"
    );
    Ok(result)
}

/// Remove from `instance` every element `doomed` picks out by element and
/// type, keeping the instance's names. Removing a node removes its incident
/// edges too.
pub(crate) fn strip<F>(
    op: &dyn Operation,
    instance: &GraphMorphism,
    doomed: F,
) -> GraphResult<GraphMorphism>
where
    F: Fn(&Triple, &Name) -> bool,
{
    let arity = check_typing(op, instance)?;
    let mut builders = GraphBuilders::resilient()
        .import_morphism(instance)
        .codomain(arity);
    let typed = |t: &Triple| instance.map(t.label()).map(|type_name| doomed(t, type_name));
    for edge in instance.domain().edges() {
        if typed(edge) == Some(true) {
            builders = builders.undo_edge(edge.label());
        }
    }
    for node in instance.domain().nodes() {
        if typed(node) == Some(true) {
            builders = builders.undo_node(node.label());
        }
    }
    builders
        .graph(instance.domain().name().clone())
        .morphism(instance.name().clone())
        .fetch_result_morphism()
}

/// Remove every element typed by one of `types`
pub(crate) fn strip_types(
    op: &dyn Operation,
    instance: &GraphMorphism,
    types: &[&str],
) -> GraphResult<GraphMorphism> {
    let types: Vec<Name> = types.iter().map(|t| ty(t)).collect();
    strip(op, instance, |_, type_name| types.contains(type_name))
}

/// Every built-in operation
pub fn builtin() -> Vec<Arc<dyn GraphTheory>> {
    vec![
        Arc::new(Equalizer),
        Arc::new(Coequalizer),
        Arc::new(Compose),
        Arc::new(ComposeIncident),
        Arc::new(Invert),
        Arc::new(NodeProduct),
        Arc::new(NodeCoproduct),
        Arc::new(ProductUniversalProp),
        Arc::new(CoproductUniversalProp),
        Arc::new(TransitiveClosure),
        Arc::new(ReflexiveClosure),
        Arc::new(Proxy),
        Arc::new(InverseProxy),
        Arc::new(ConstantValue::new(Value::Bool(true))),
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// An instance `i: I -> codomain` given as typed nodes `(name, type)` and
    /// typed edges `(source, label, target, type)`
    pub(crate) fn typed_instance(
        codomain: Arc<Graph>,
        nodes: &[(&str, &str)],
        edges: &[(&str, &str, &str, &str)],
    ) -> GraphMorphism {
        let mut elements = Vec::new();
        let mut mapping = Vec::new();
        for (node, type_name) in nodes {
            elements.push(Triple::node(*node));
            mapping.push((Name::identifier(*node), Name::identifier(*type_name)));
        }
        for (source, label, target, type_name) in edges {
            elements.push(Triple::edge(*source, *label, *target));
            mapping.push((Name::identifier(*label), Name::identifier(*type_name)));
        }
        let domain = Arc::new(Graph::create(Name::identifier("I"), elements).unwrap());
        GraphMorphism::create(Name::identifier("i"), domain, codomain, mapping).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::TheoryKind;

    #[test]
    fn test_arities_split_consistently() {
        for theory in builtin() {
            let TheoryKind::Operation(op) = theory.kind() else {
                panic!("{} is not an operation", theory.name_as_str());
            };
            let arity = theory.arity();
            let (input, overlap, output) =
                (op.input_arity(), op.overlap_arity(), op.output_arity());
            assert!(input.is_subgraph_of(&arity), "{}", theory.name_as_str());
            assert!(output.is_subgraph_of(&arity), "{}", theory.name_as_str());
            assert!(overlap.is_subgraph_of(&input), "{}", theory.name_as_str());
            assert!(overlap.is_subgraph_of(&output), "{}", theory.name_as_str());
            assert!(
                arity.elements().all(|t| input.contains(t) || output.contains(t)),
                "{}",
                theory.name_as_str()
            );
        }
    }

    #[test]
    fn test_operation_names_are_distinct() {
        let mut names: Vec<String> = builtin()
            .iter()
            .map(|t| t.name_as_str().to_string())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 14);
    }
}
