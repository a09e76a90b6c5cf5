// Copyright 2025 Cowboy AI, LLC.

//! The single representation unit for nodes and edges
//!
//! A [`Triple`] is `(source, label, target)`. It is a node iff all three
//! components are the same name, otherwise it is an edge.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::Name;

/// A graph element: a node when `source == label == target`, an edge otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    source: Name,
    label: Name,
    target: Name,
}

impl Triple {
    /// Create a triple from its three components
    pub fn new(source: Name, label: Name, target: Name) -> Self {
        Self {
            source,
            label,
            target,
        }
    }

    /// Create a node triple
    pub fn node(name: impl Into<Name>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            label: name.clone(),
            target: name,
        }
    }

    /// Create an edge triple
    pub fn edge(source: impl Into<Name>, label: impl Into<Name>, target: impl Into<Name>) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            target: target.into(),
        }
    }

    /// Source name
    pub fn source(&self) -> &Name {
        &self.source
    }

    /// Label name; for nodes this is the node's name
    pub fn label(&self) -> &Name {
        &self.label
    }

    /// Target name
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Whether this triple is a node
    pub fn is_node(&self) -> bool {
        self.source == self.label && self.label == self.target
    }

    /// Whether this triple is an edge
    pub fn is_edge(&self) -> bool {
        !self.is_node()
    }

    /// Whether `name` occurs as any component
    pub fn mentions(&self, name: &Name) -> bool {
        &self.source == name || &self.label == name || &self.target == name
    }

    /// The distinct names of this triple
    pub fn names(&self) -> Vec<&Name> {
        if self.is_node() {
            vec![&self.label]
        } else {
            vec![&self.source, &self.label, &self.target]
        }
    }

    /// Qualify every component with a namespace
    pub fn prefix(&self, prefix: &Name) -> Self {
        self.rename(|n| n.prefix_with(prefix))
    }

    /// Remove the namespace `prefix` from every component
    pub fn unprefix(&self, prefix: &Name) -> Self {
        self.rename(|n| n.unprefix(prefix))
    }

    /// Remove every namespace from every component
    pub fn unprefix_all(&self) -> Self {
        self.rename(Name::unprefix_all)
    }

    /// The namespace shared by all three components, if there is one
    pub fn common_prefix(&self) -> Option<&Name> {
        let prefix = self.source.prefix()?;
        if self.label.prefix() == Some(prefix) && self.target.prefix() == Some(prefix) {
            Some(prefix)
        } else {
            None
        }
    }

    /// Apply a total renaming to every component
    pub fn rename<F>(&self, f: F) -> Self
    where
        F: Fn(&Name) -> Name,
    {
        Self {
            source: f(&self.source),
            label: f(&self.label),
            target: f(&self.target),
        }
    }

    /// Apply a partial mapping to every component; fails if any component is unmapped
    pub fn map<F>(&self, f: F) -> Option<Self>
    where
        F: Fn(&Name) -> Option<Name>,
    {
        Some(Self {
            source: f(&self.source)?,
            label: f(&self.label)?,
            target: f(&self.target)?,
        })
    }

    /// Combine two triples component-wise
    pub fn combine_with<F>(&self, other: &Triple, f: F) -> Self
    where
        F: Fn(&Name, &Name) -> Name,
    {
        Self {
            source: f(&self.source, &other.source),
            label: f(&self.label, &other.label),
            target: f(&self.target, &other.target),
        }
    }

    /// Sequential composition, defined iff both are edges and `self.target == next.source`
    pub fn compose(&self, next: &Triple) -> Option<Self> {
        if self.is_edge() && next.is_edge() && self.target == next.source {
            Some(Self {
                source: self.source.clone(),
                label: self.label.compose_sequentially(&next.label),
                target: next.target.clone(),
            })
        } else {
            None
        }
    }

    /// The reversed edge; nodes are their own inverse
    pub fn inverse(&self) -> Self {
        if self.is_node() {
            self.clone()
        } else {
            Self {
                source: self.target.clone(),
                label: self.label.inverse(),
                target: self.source.clone(),
            }
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_node() {
            write!(f, "({})", self.label)
        } else {
            write!(f, "({})-[{}]->({})", self.source, self.label, self.target)
        }
    }
}

/// Render a list of triples for diagnostics
pub(crate) fn display_triples(triples: &[Triple]) -> String {
    triples
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
