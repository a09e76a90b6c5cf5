// Copyright 2025 Cowboy AI, LLC.

//! # CIM Graph Algebra
//!
//! Category-theoretic algebra over directed multigraphs for the Composable
//! Information Machine.
//!
//! This crate provides the building blocks for model-driven tooling on top of
//! typed graphs:
//! - **Names and Triples**: Structured identifiers and the `(source, label, target)`
//!   elements every graph is made of
//! - **Graphs**: Immutable, named graphs that never contain dangling edges
//! - **Morphisms**: Partial structure-preserving maps with composition,
//!   pullbacks and flattening into typed graphs
//! - **Colimits**: Gluing graphs along shared parts through multispans and
//!   equivalence classes
//! - **Builders**: An incremental, validating way to assemble graphs,
//!   morphisms and sketches
//! - **Theories**: Predicates and free operations stated over shape graphs
//!
//! ## Design Principles
//!
//! 1. **Immutability**: Graphs and morphisms never change after construction;
//!    every operation returns a new value
//! 2. **Structured Names**: Derived elements carry names that record how they
//!    were derived
//! 3. **Explicit Errors**: Malformed input is reported through [`GraphError`]
//!    with the offending names attached
//! 4. **Typed Graphs**: An instance is a morphism into a shape, and shapes are
//!    graphs too

#![warn(missing_docs)]

pub mod builders;
pub mod category;
pub mod errors;
pub mod graph;
pub mod identifiers;
pub mod partition;
pub mod sketch;
pub mod theory;
pub mod triple;
pub mod universe;

// Re-export core types
pub use builders::{BuildResult, BuilderPolicy, GraphBuilders};
pub use category::{
    Colimit, Cone, EquivalenceClass, GraphMorphism, MorphismClass, MorphismKind, Multispan,
    NamingStrategy, Pullback, Pushout,
};
pub use errors::{GraphError, GraphErrorKind, GraphResult};
pub use graph::{Graph, GraphView};
pub use identifiers::Name;
pub use partition::PartitionAlgorithm;
pub use sketch::{Diagram, Sketch};
pub use theory::context::NameGeneration;
pub use theory::{ExecutionContext, GraphTheory, Operation, Predicate, TheoryKind};
pub use triple::Triple;
