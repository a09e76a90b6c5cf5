// Copyright 2025 Cowboy AI, LLC.

//! Predicates on literal values
//!
//! Data types are predicates over [`ONE_NODE`](crate::universe::ONE_NODE):
//! every instance of the node must be a literal of the right kind. Attribute
//! predicates are stated over [`ARROW`](crate::universe::ARROW) and look at
//! the literals arrows point to.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::category::GraphMorphism;
use crate::errors::{GraphError, GraphResult};
use crate::identifiers::{Name, Value};
use crate::theory::{GraphTheory, Predicate};
use crate::universe;

fn all_values<F>(instance: &GraphMorphism, accept: F) -> bool
where
    F: Fn(&Value) -> bool,
{
    instance
        .all_node_instances(&universe::ONE_NODE_THE_NODE)
        .iter()
        .all(|node| node.as_value().map(&accept).unwrap_or(false))
}

macro_rules! data_type {
    ($(#[$doc:meta])* $ty:ident, $label:literal, $accept:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl $ty {
            fn label(&self) -> &str {
                $label
            }
        }

        theory_impl!($ty, universe::ONE_NODE);

        impl Predicate for $ty {
            fn check(&self, instance: &GraphMorphism) -> bool {
                all_values(instance, $accept)
            }
        }
    };
}

data_type!(
    /// Every instance is a literal of some kind
    IsValue,
    "[value]",
    |_| true
);

data_type!(
    /// Every instance is an integer literal
    IntDT,
    "[int]",
    |v| matches!(v, Value::Int(_))
);

data_type!(
    /// Every instance is a string literal
    StringDT,
    "[string]",
    |v| matches!(v, Value::Str(_))
);

data_type!(
    /// Every instance is a boolean literal
    BoolDT,
    "[bool]",
    |v| matches!(v, Value::Bool(_))
);

data_type!(
    /// Every instance is a number; integers count as floats
    FloatDT,
    "[float]",
    |v| matches!(v, Value::Float(_) | Value::Int(_))
);

/// Every instance is one of a fixed set of names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    allowed: BTreeSet<Name>,
    label: String,
}

impl EnumValue {
    /// An enumeration of `literals`
    pub fn new(literals: impl IntoIterator<Item = Name>) -> Self {
        let allowed: BTreeSet<Name> = literals.into_iter().collect();
        let listed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        Self {
            label: format!("[enum{{{}}}]", listed.join(", ")),
            allowed,
        }
    }

    /// The admitted names
    pub fn literals(&self) -> impl Iterator<Item = &Name> {
        self.allowed.iter()
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(EnumValue, universe::ONE_NODE);

impl Predicate for EnumValue {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ONE_NODE_THE_NODE)
            .iter()
            .all(|node| self.allowed.contains(node))
    }
}

/// Every number instance lies within `lower..=upper`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    lower: f64,
    upper: f64,
    label: String,
}

impl Range {
    /// Numbers between `lower` and `upper`, both included
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            label: format!("[range({lower},{upper})]"),
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(Range, universe::ONE_NODE);

impl Predicate for Range {
    fn check(&self, instance: &GraphMorphism) -> bool {
        all_values(instance, |v| {
            let number = match v {
                Value::Int(i) => *i as f64,
                other => match other.as_f64() {
                    Some(f) => f,
                    None => return false,
                },
            };
            self.lower <= number && number <= self.upper
        })
    }
}

/// Every instance is a string literal or identifier matching a pattern as a
/// whole
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: regex::Regex,
    label: String,
}

impl Regex {
    /// Compile `pattern`; it must match the entire string
    pub fn new(pattern: &str) -> GraphResult<Self> {
        let compiled = regex::Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| GraphError::ill_formed(format!("invalid pattern {pattern}: {e}")))?;
        Ok(Self {
            pattern: compiled,
            label: format!("[regex({pattern})]"),
        })
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(Regex, universe::ONE_NODE);

impl Predicate for Regex {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_node_instances(&universe::ONE_NODE_THE_NODE)
            .iter()
            .all(|node| match node {
                Name::Identifier(id) => self.pattern.is_match(id),
                other => match other.as_value() {
                    Some(Value::Str(s)) => self.pattern.is_match(s),
                    _ => false,
                },
            })
    }
}

/// Every arrow instance points at one particular literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasAttributeValue {
    value: Value,
    label: String,
}

impl HasAttributeValue {
    /// Arrows into `value`
    pub fn new(value: Value) -> Self {
        Self {
            label: format!("[hasValue({value})]"),
            value,
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

theory_impl!(HasAttributeValue, universe::ARROW);

impl Predicate for HasAttributeValue {
    fn check(&self, instance: &GraphMorphism) -> bool {
        instance
            .all_instances(&universe::ARROW_THE_ARROW)
            .iter()
            .all(|t| t.target().as_value() == Some(&self.value))
    }
}

/// Every value predicate with its default parameters
pub fn builtin() -> Vec<Arc<dyn GraphTheory>> {
    let mut theories: Vec<Arc<dyn GraphTheory>> = vec![
        Arc::new(IsValue),
        Arc::new(IntDT),
        Arc::new(StringDT),
        Arc::new(BoolDT),
        Arc::new(FloatDT),
        Arc::new(EnumValue::new(Vec::new())),
        Arc::new(Range::new(f64::MIN, f64::MAX)),
        Arc::new(HasAttributeValue::new(Value::Bool(true))),
    ];
    if let Ok(any) = Regex::new(".*") {
        theories.push(Arc::new(any));
    }
    theories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::triple::Triple;
    use test_case::test_case;

    fn n(s: &str) -> Name {
        Name::identifier(s)
    }

    /// Instances of the single node type
    fn nodes(names: Vec<Name>) -> GraphMorphism {
        let elements: Vec<Triple> = names.iter().cloned().map(Triple::node).collect();
        let mapping: Vec<(Name, Name)> = names.into_iter().map(|m| (m, n("0"))).collect();
        GraphMorphism::create(
            n("i"),
            Arc::new(Graph::create(n("I"), elements).unwrap()),
            Arc::clone(&universe::ONE_NODE),
            mapping,
        )
        .unwrap()
    }

    fn mixed() -> Vec<Name> {
        vec![Name::int_value(1), Name::string_value("one")]
    }

    #[test_case(&IntDT, vec![Name::int_value(1), Name::int_value(2)], true ; "ints are ints")]
    #[test_case(&IntDT, vec![Name::float_value(1.5)], false ; "floats are not ints")]
    #[test_case(&StringDT, vec![Name::string_value("a")], true ; "strings")]
    #[test_case(&StringDT, vec![n("a")], false ; "identifiers are not strings")]
    #[test_case(&BoolDT, vec![Name::bool_value(false)], true ; "bools")]
    #[test_case(&BoolDT, vec![Name::int_value(0)], false ; "zero is not false")]
    #[test_case(&FloatDT, vec![Name::float_value(0.5), Name::int_value(3)], true ; "ints are floats")]
    #[test_case(&FloatDT, vec![Name::string_value("0.5")], false ; "numeric strings are not floats")]
    #[test_case(&IsValue, mixed(), true ; "any literal")]
    #[test_case(&IsValue, vec![Name::int_value(1), n("x")], false ; "identifier among literals")]
    fn test_data_types(predicate: &dyn GraphTheory, instances: Vec<Name>, expected: bool) {
        assert_eq!(predicate.is_satisfied(&nodes(instances)), expected);
    }

    #[test]
    fn test_literals_behind_namespaces_count() {
        let namespaced = Name::int_value(7).prefix_with(&n("G"));
        assert!(IntDT.is_satisfied(&nodes(vec![namespaced])));
    }

    #[test]
    fn test_enum_value() {
        let colors = EnumValue::new([n("red"), n("green")]);
        assert!(colors.is_satisfied(&nodes(vec![n("red")])));
        assert!(!colors.is_satisfied(&nodes(vec![n("red"), n("blue")])));
        assert_eq!(colors.name_as_str(), "[enum{green, red}]");
        assert_eq!(colors.literals().count(), 2);
    }

    #[test]
    fn test_range() {
        let percent = Range::new(0.0, 100.0);
        assert!(percent.is_satisfied(&nodes(vec![Name::int_value(0), Name::float_value(99.5)])));
        assert!(!percent.is_satisfied(&nodes(vec![Name::int_value(101)])));
        assert!(!percent.is_satisfied(&nodes(vec![Name::string_value("50")])));
    }

    #[test]
    fn test_regex_matches_whole_labels() {
        let lower = Regex::new("[a-z]+").unwrap();
        assert!(lower.is_satisfied(&nodes(vec![n("abc"), Name::string_value("xyz")])));
        assert!(!lower.is_satisfied(&nodes(vec![n("abc1")])));
        assert!(!lower.is_satisfied(&nodes(vec![Name::int_value(1)])));
        assert_eq!(lower.name_as_str(), "[regex([a-z]+)]");
    }

    #[test]
    fn test_invalid_regex_is_ill_formed() {
        let error = Regex::new("(").unwrap_err();
        assert_eq!(error.kind(), crate::errors::GraphErrorKind::IllFormed);
    }

    #[test]
    fn test_has_attribute_value() {
        let flagged = |target: Name| {
            let elements = vec![
                Triple::node("a"),
                Triple::node(target.clone()),
                Triple::new(n("a"), n("flag"), target.clone()),
            ];
            GraphMorphism::create(
                n("i"),
                Arc::new(Graph::create(n("I"), elements).unwrap()),
                Arc::clone(&universe::ARROW),
                vec![(n("a"), n("0")), (target, n("1")), (n("flag"), n("01"))],
            )
            .unwrap()
        };
        let enabled = HasAttributeValue::new(Value::Bool(true));
        assert!(enabled.is_satisfied(&flagged(Name::bool_value(true))));
        assert!(!enabled.is_satisfied(&flagged(Name::bool_value(false))));
        assert!(!enabled.is_satisfied(&flagged(n("true"))));
    }

    #[test]
    fn test_builtin_value_predicates() {
        let names: Vec<String> = builtin()
            .iter()
            .map(|t| t.name_as_str().to_string())
            .collect();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"[regex(.*)]".to_string()));
    }
}
