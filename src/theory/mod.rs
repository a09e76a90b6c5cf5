// Copyright 2025 Cowboy AI, LLC.

//! Graph theories: predicates and operations over shape graphs
//!
//! A theory is stated over a shape graph, its arity. An instance of a theory
//! is a morphism into that arity, i.e. a graph typed by the shape.
//!
//! - A [`Predicate`] only checks an instance.
//! - An [`Operation`] is a free construction: its arity splits into an input
//!   part and an output part that share an overlap. Executing it extends an
//!   instance of the input part with the output elements it derives.
//!   [`Operation::undo`] removes everything the operation could have
//!   produced, and [`Operation::fix`] repairs an instance that was not
//!   executed correctly.

pub mod context;
pub mod operations;
pub mod predicates;

use std::fmt;
use std::sync::Arc;

use crate::category::GraphMorphism;
use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::identifiers::Name;

pub use context::ExecutionContext;

/// A predicate or operation together with the shape it is stated over
pub trait GraphTheory: Send + Sync + fmt::Debug {
    /// The theory's name as written in diagrams, e.g. `<[compose]>`
    fn name_as_str(&self) -> &str;

    /// The theory's name
    fn name(&self) -> Name {
        Name::identifier(self.name_as_str())
    }

    /// The shape graph instances are typed over
    fn arity(&self) -> Arc<Graph>;

    /// Access to the predicate or operation behind this theory
    fn kind(&self) -> TheoryKind<'_>;

    /// Whether `instance` is typed over the arity and satisfies the theory.
    ///
    /// Predicates must hold; operations must have been executed correctly.
    fn is_satisfied(&self, instance: &GraphMorphism) -> bool {
        if instance.codomain().name() != self.arity().name() {
            return false;
        }
        match self.kind() {
            TheoryKind::Predicate(predicate) => predicate.check(instance),
            TheoryKind::Operation(operation) => operation.is_executed_correctly(instance),
        }
    }
}

/// The two flavours of theory
#[derive(Clone, Copy)]
pub enum TheoryKind<'a> {
    /// A checking theory
    Predicate(&'a dyn Predicate),
    /// A constructing theory
    Operation(&'a dyn Operation),
}

impl fmt::Debug for TheoryKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheoryKind::Predicate(p) => f.debug_tuple("Predicate").field(p).finish(),
            TheoryKind::Operation(o) => f.debug_tuple("Operation").field(o).finish(),
        }
    }
}

/// A property of typed graphs
pub trait Predicate: GraphTheory {
    /// Whether the property holds for `instance`; the instance's typing is
    /// not re-checked here
    fn check(&self, instance: &GraphMorphism) -> bool;
}

/// A free construction on typed graphs
pub trait Operation: GraphTheory {
    /// The part of the arity an execution reads
    fn input_arity(&self) -> Arc<Graph>;

    /// The part of the arity shared by input and output
    fn overlap_arity(&self) -> Arc<Graph>;

    /// The part of the arity an execution writes
    fn output_arity(&self) -> Arc<Graph>;

    /// Extend `instance` with the derived output elements; the result is
    /// typed over the full arity
    fn execute(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism>;

    /// Whether `instance` contains exactly the output this operation derives
    fn is_executed_correctly(&self, instance: &GraphMorphism) -> bool;

    /// Remove the output elements this operation could have produced,
    /// keeping the instance's names
    fn undo(&self, instance: &GraphMorphism) -> GraphResult<GraphMorphism>;

    /// `instance` if it was executed correctly, otherwise the re-execution of
    /// its undone form
    fn fix(
        &self,
        instance: &GraphMorphism,
        context: &mut ExecutionContext,
    ) -> GraphResult<GraphMorphism> {
        if self.is_executed_correctly(instance) {
            Ok(instance.clone())
        } else {
            let undone = self.undo(instance)?;
            self.execute(&undone, context)
        }
    }
}

/// Every built-in predicate and operation
pub fn builtin() -> Vec<Arc<dyn GraphTheory>> {
    let mut theories = predicates::builtin();
    theories.extend(operations::builtin());
    theories
}
