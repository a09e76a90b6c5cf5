// Copyright 2025 Cowboy AI, LLC.

//! Error types for graph algebra operations

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::identifiers::Name;
use crate::triple::{display_triples, Triple};

/// The kinds of failures a construction can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphErrorKind {
    /// An edge references a node that does not exist
    DanglingEdge,
    /// A referenced name is absent from a known domain or codomain
    UnknownMember,
    /// A name was rebound to a different target
    AmbiguousMapping,
    /// A mapping breaks incidence or maps nodes to edges (or vice versa)
    HomomorphismPropertyViolation,
    /// A result was requested of the wrong kind, or the input is malformed
    IllFormed,
    /// Two different elements share one label
    DuplicateName,
    /// Two morphisms that should meet in a common graph do not
    CodomainMismatch,
}

impl fmt::Display for GraphErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GraphErrorKind::DanglingEdge => "DANGLING_EDGE",
            GraphErrorKind::UnknownMember => "UNKNOWN_MEMBER",
            GraphErrorKind::AmbiguousMapping => "AMBIGUOUS_MAPPING",
            GraphErrorKind::HomomorphismPropertyViolation => "HOMOMORPHISM_PROPERTY_VIOLATION",
            GraphErrorKind::IllFormed => "ILL_FORMED",
            GraphErrorKind::DuplicateName => "DUPLICATE_NAME",
            GraphErrorKind::CodomainMismatch => "CODOMAIN_MISMATCH",
        };
        write!(f, "{s}")
    }
}

/// Errors that can occur while building or combining graphs and morphisms
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Edges whose endpoints are not nodes of the graph
    #[error("Dangling edges in {graph}: {} (missing nodes: {})", display_triples(.edges), display_names(.missing))]
    DanglingEdge {
        /// The graph under construction
        graph: Name,
        /// The offending edges
        edges: Vec<Triple>,
        /// The endpoint names that are not nodes
        missing: Vec<Name>,
    },

    /// A name that is not a member of the graph it is looked up in
    #[error("Unknown member {name} in {context}")]
    UnknownMember {
        /// The missing name
        name: Name,
        /// The graph or morphism that was searched
        context: Name,
    },

    /// Rebinding a name to a different target
    #[error("Ambiguous mapping: {name} is bound to {existing}, cannot rebind to {requested}")]
    AmbiguousMapping {
        /// The name being bound
        name: Name,
        /// Its current binding
        existing: Name,
        /// The rejected binding
        requested: Name,
    },

    /// Domain elements whose image breaks the homomorphism property
    #[error("Homomorphism property violated by {morphism} at {}", display_triples(.violations))]
    HomomorphismPropertyViolation {
        /// The morphism under construction
        morphism: Name,
        /// The offending domain elements
        violations: Vec<Triple>,
    },

    /// Malformed input or a result of the wrong kind
    #[error("Ill-formed: {reason}")]
    IllFormed {
        /// What is wrong
        reason: String,
        /// Elements involved, if any
        elements: Vec<Triple>,
    },

    /// Two different triples carrying the same label
    #[error("Duplicate name {name}: {existing} conflicts with {conflicting}")]
    DuplicateName {
        /// The shared label
        name: Name,
        /// The element already present
        existing: Triple,
        /// The rejected element
        conflicting: Triple,
    },

    /// Morphisms that were expected to share a graph
    #[error("Codomain mismatch: expected {expected}, found {actual}")]
    CodomainMismatch {
        /// The graph required by the construction
        expected: Name,
        /// The graph that was supplied
        actual: Name,
    },
}

impl GraphError {
    /// The kind of this error
    pub fn kind(&self) -> GraphErrorKind {
        match self {
            GraphError::DanglingEdge { .. } => GraphErrorKind::DanglingEdge,
            GraphError::UnknownMember { .. } => GraphErrorKind::UnknownMember,
            GraphError::AmbiguousMapping { .. } => GraphErrorKind::AmbiguousMapping,
            GraphError::HomomorphismPropertyViolation { .. } => {
                GraphErrorKind::HomomorphismPropertyViolation
            }
            GraphError::IllFormed { .. } => GraphErrorKind::IllFormed,
            GraphError::DuplicateName { .. } => GraphErrorKind::DuplicateName,
            GraphError::CodomainMismatch { .. } => GraphErrorKind::CodomainMismatch,
        }
    }

    /// Shorthand for an [`GraphError::IllFormed`] without elements
    pub fn ill_formed(reason: impl Into<String>) -> Self {
        GraphError::IllFormed {
            reason: reason.into(),
            elements: Vec::new(),
        }
    }

    /// The names this error is about
    pub fn affected_names(&self) -> Vec<Name> {
        match self {
            GraphError::DanglingEdge { missing, .. } => missing.clone(),
            GraphError::UnknownMember { name, .. } => vec![name.clone()],
            GraphError::AmbiguousMapping { name, .. } => vec![name.clone()],
            GraphError::HomomorphismPropertyViolation { violations, .. } => {
                violations.iter().map(|t| t.label().clone()).collect()
            }
            GraphError::IllFormed { elements, .. } => {
                elements.iter().map(|t| t.label().clone()).collect()
            }
            GraphError::DuplicateName { name, .. } => vec![name.clone()],
            GraphError::CodomainMismatch { actual, .. } => vec![actual.clone()],
        }
    }
}

fn display_names(names: &[Name]) -> String {
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for graph algebra operations
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::DanglingEdge {
            graph: Name::identifier("G"),
            edges: vec![Triple::edge("A", "f", "B")],
            missing: vec![Name::identifier("B")],
        };
        assert_eq!(
            err.to_string(),
            "Dangling edges in G: (A)-[f]->(B) (missing nodes: B)"
        );
        assert_eq!(err.kind(), GraphErrorKind::DanglingEdge);
        assert_eq!(err.affected_names(), vec![Name::identifier("B")]);
    }

    #[test]
    fn test_kind_display_uses_constant_names() {
        assert_eq!(
            GraphErrorKind::HomomorphismPropertyViolation.to_string(),
            "HOMOMORPHISM_PROPERTY_VIOLATION"
        );
        assert_eq!(GraphError::ill_formed("x").kind(), GraphErrorKind::IllFormed);
    }
}
