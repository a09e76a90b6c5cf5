// Copyright 2025 Cowboy AI, LLC.

//! Lazy modification views over an immutable graph
//!
//! "Modifying" a graph never touches it. A [`GraphView`] layers additions,
//! removals or a renaming over a base and answers queries by delegating to
//! that base. [`GraphView::materialize`] turns a view into a new graph.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::errors::GraphResult;
use crate::graph::Graph;
use crate::identifiers::Name;
use crate::triple::Triple;

/// A total renaming of names, shared between views and morphism constructions
pub type RenameFn = Arc<dyn Fn(&Name) -> Name + Send + Sync>;

/// A graph seen through a stack of modifications
#[derive(Clone)]
pub enum GraphView {
    /// The unmodified graph
    Base(Arc<Graph>),
    /// The base plus extra elements
    WithAdds {
        /// The view being extended
        base: Box<GraphView>,
        /// Elements added on top
        added: Vec<Triple>,
    },
    /// The base minus the elements carrying the given labels.
    /// Removing a node also hides every edge incident to it.
    WithRemoves {
        /// The view being reduced
        base: Box<GraphView>,
        /// Labels to hide
        removed: BTreeSet<Name>,
    },
    /// The base with every name renamed
    Renamed {
        /// The view being renamed
        base: Box<GraphView>,
        /// The renaming
        rename: RenameFn,
    },
}

impl GraphView {
    /// View of an unmodified graph
    pub fn base(graph: Arc<Graph>) -> Self {
        GraphView::Base(graph)
    }

    /// Add elements on top of this view
    pub fn with_adds(self, added: Vec<Triple>) -> Self {
        GraphView::WithAdds {
            base: Box::new(self),
            added,
        }
    }

    /// Hide the elements carrying the given labels
    pub fn with_removes<I>(self, removed: I) -> Self
    where
        I: IntoIterator<Item = Name>,
    {
        GraphView::WithRemoves {
            base: Box::new(self),
            removed: removed.into_iter().collect(),
        }
    }

    /// Rename every name of this view
    pub fn renamed<F>(self, rename: F) -> Self
    where
        F: Fn(&Name) -> Name + Send + Sync + 'static,
    {
        GraphView::Renamed {
            base: Box::new(self),
            rename: Arc::new(rename),
        }
    }

    fn hides(removed: &BTreeSet<Name>, triple: &Triple) -> bool {
        removed.contains(triple.label())
            || removed.contains(triple.source())
            || removed.contains(triple.target())
    }

    /// All visible elements
    pub fn elements(&self) -> Vec<Triple> {
        match self {
            GraphView::Base(graph) => graph.elements().cloned().collect(),
            GraphView::WithAdds { base, added } => {
                let mut result = base.elements();
                for triple in added {
                    if !result.iter().any(|t| t.label() == triple.label()) {
                        result.push(triple.clone());
                    }
                }
                result
            }
            GraphView::WithRemoves { base, removed } => base
                .elements()
                .into_iter()
                .filter(|t| !Self::hides(removed, t))
                .collect(),
            GraphView::Renamed { base, rename } => base
                .elements()
                .into_iter()
                .map(|t| t.rename(|n| rename(n)))
                .collect(),
        }
    }

    /// Whether the view shows exactly this triple
    pub fn contains(&self, triple: &Triple) -> bool {
        match self {
            GraphView::Base(graph) => graph.contains(triple),
            GraphView::WithAdds { base, added } => base.contains(triple) || added.contains(triple),
            GraphView::WithRemoves { base, removed } => {
                !Self::hides(removed, triple) && base.contains(triple)
            }
            GraphView::Renamed { base, rename } => base
                .elements()
                .iter()
                .any(|t| &t.rename(|n| rename(n)) == triple),
        }
    }

    /// The visible element carrying `label`
    pub fn get(&self, label: &Name) -> Option<Triple> {
        match self {
            GraphView::Base(graph) => graph.get(label).cloned(),
            GraphView::WithAdds { base, added } => base
                .get(label)
                .or_else(|| added.iter().find(|t| t.label() == label).cloned()),
            GraphView::WithRemoves { base, removed } => {
                base.get(label).filter(|t| !Self::hides(removed, t))
            }
            GraphView::Renamed { base, rename } => base
                .elements()
                .into_iter()
                .map(|t| t.rename(|n| rename(n)))
                .find(|t| t.label() == label),
        }
    }

    /// Visible edges leaving `node`
    pub fn outgoing(&self, node: &Name) -> Vec<Triple> {
        match self {
            GraphView::Base(graph) => graph.outgoing(node).into_iter().cloned().collect(),
            GraphView::WithAdds { base, added } => {
                let mut result = base.outgoing(node);
                result.extend(
                    added
                        .iter()
                        .filter(|t| t.is_edge() && t.source() == node)
                        .cloned(),
                );
                result
            }
            GraphView::WithRemoves { base, removed } => {
                if removed.contains(node) {
                    return Vec::new();
                }
                base.outgoing(node)
                    .into_iter()
                    .filter(|t| !Self::hides(removed, t))
                    .collect()
            }
            GraphView::Renamed { .. } => self
                .elements()
                .into_iter()
                .filter(|t| t.is_edge() && t.source() == node)
                .collect(),
        }
    }

    /// Visible edges entering `node`
    pub fn incoming(&self, node: &Name) -> Vec<Triple> {
        match self {
            GraphView::Base(graph) => graph.incoming(node).into_iter().cloned().collect(),
            GraphView::WithAdds { base, added } => {
                let mut result = base.incoming(node);
                result.extend(
                    added
                        .iter()
                        .filter(|t| t.is_edge() && t.target() == node)
                        .cloned(),
                );
                result
            }
            GraphView::WithRemoves { base, removed } => {
                if removed.contains(node) {
                    return Vec::new();
                }
                base.incoming(node)
                    .into_iter()
                    .filter(|t| !Self::hides(removed, t))
                    .collect()
            }
            GraphView::Renamed { .. } => self
                .elements()
                .into_iter()
                .filter(|t| t.is_edge() && t.target() == node)
                .collect(),
        }
    }

    /// Freeze the view into a new, validated graph
    pub fn materialize(&self, name: Name) -> GraphResult<Graph> {
        Graph::create(name, self.elements())
    }
}

impl From<Arc<Graph>> for GraphView {
    fn from(graph: Arc<Graph>) -> Self {
        GraphView::Base(graph)
    }
}

impl fmt::Debug for GraphView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphView::Base(graph) => f.debug_tuple("Base").field(graph.name()).finish(),
            GraphView::WithAdds { base, added } => f
                .debug_struct("WithAdds")
                .field("base", base)
                .field("added", added)
                .finish(),
            GraphView::WithRemoves { base, removed } => f
                .debug_struct("WithRemoves")
                .field("base", base)
                .field("removed", removed)
                .finish(),
            GraphView::Renamed { base, .. } => {
                f.debug_struct("Renamed").field("base", base).finish_non_exhaustive()
            }
        }
    }
}
