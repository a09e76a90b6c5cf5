// Copyright 2025 Cowboy AI, LLC.

//! Execution context for operations
//!
//! Everything an execution takes from its environment comes from here:
//! fresh names, the time of execution and free-form meta information.
//! Executions that draw only on the context are reproducible.
//!
//! Output an execution had to drop, because it clashed with the instance,
//! is kept on the context so callers can inspect it afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::builders::GraphBuilders;
use crate::errors::GraphError;
use crate::identifiers::Name;

/// How fresh names are generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameGeneration {
    /// `prefix` followed by a running counter; deterministic
    Counter {
        /// Put in front of every generated name
        prefix: String,
    },
    /// Random v4 UUIDs
    Uuid,
}

impl Default for NameGeneration {
    fn default() -> Self {
        NameGeneration::Counter {
            prefix: "_".to_string(),
        }
    }
}

/// Environment of an operation execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    naming: NameGeneration,
    counter: u64,
    started_at: DateTime<Utc>,
    meta: HashMap<String, String>,
    #[serde(skip)]
    dropped: Vec<GraphError>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(NameGeneration::default())
    }
}

impl ExecutionContext {
    /// A context stamped with the current time
    pub fn new(naming: NameGeneration) -> Self {
        Self {
            naming,
            counter: 0,
            started_at: Utc::now(),
            meta: HashMap::new(),
            dropped: Vec::new(),
        }
    }

    /// Fix the execution time, for replaying an execution
    pub fn at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Attach a piece of meta information
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Meta information stored under `key`
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Time of execution
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn fresh(&mut self, kind: &str) -> Name {
        match &self.naming {
            NameGeneration::Counter { prefix } => {
                self.counter += 1;
                Name::identifier(format!("{prefix}{kind}{}", self.counter))
            }
            NameGeneration::Uuid => Name::identifier(Uuid::new_v4().to_string()),
        }
    }

    /// A name for a node about to be created
    pub fn generate_new_node_name(&mut self) -> Name {
        self.fresh("n")
    }

    /// A label for an edge about to be created
    pub fn generate_new_edge_label(&mut self) -> Name {
        self.fresh("e")
    }

    /// Problems that made executions drop part of their output, oldest first
    pub fn dropped_output(&self) -> &[GraphError] {
        &self.dropped
    }

    pub(crate) fn record_dropped(&mut self, errors: impl IntoIterator<Item = GraphError>) {
        self.dropped.extend(errors);
    }

    /// A builder for the results of an execution: resilient and without
    /// implicit context creation
    pub fn builders(&self) -> GraphBuilders {
        GraphBuilders::resilient()
    }
}
