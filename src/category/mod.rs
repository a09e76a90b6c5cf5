// Copyright 2025 Cowboy AI, LLC.

//! Category theory on graphs
//!
//! Graphs and their morphisms form a category. This module provides the
//! morphisms themselves together with the universal constructions used to
//! relate and combine graphs: pullbacks on the limit side, multispan
//! colimits and pushouts on the colimit side.

pub mod colimits;
pub mod limits;
pub mod morphism;

pub use colimits::{Colimit, EquivalenceClass, Multispan, NamingStrategy, Pushout};
pub use limits::{Cone, Pullback};
pub use morphism::{GraphMorphism, MorphismClass, MorphismKind};
