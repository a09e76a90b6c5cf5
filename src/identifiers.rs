// Copyright 2025 Cowboy AI, LLC.

//! Structural names for graph elements, graphs and morphisms
//!
//! A [`Name`] is compared purely by its structure: two names are the same
//! iff they were built from the same parts by the same combinators. All
//! other identity in this crate (triples, graphs, morphisms) rests on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value carried by a name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal, stored by its bit pattern so that it is hashable
    Float(u64),
    /// String literal
    Str(String),
}

impl Value {
    /// Create a floating point literal
    pub fn float(value: f64) -> Self {
        Value::Float(value.to_bits())
    }

    /// The floating point content, if this is a float literal
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Value::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Binary name combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `first ; second`, the label of a composite edge or morphism
    Sequence,
    /// `(first, second)`, an element of a pullback or product
    Pair,
    /// `first(second)`, an operation applied to an argument
    AppliedTo,
    /// `first <- second`, an injection of `second` into `first`
    InjectedFrom,
    /// `first -> second`, a projection of `first` onto the component `second`
    ProjectionOn,
    /// `first_second`, a derived name carrying a suffix
    Suffix,
    /// `first[second]`, a diagram with a substituted binding
    Substitution,
    /// `first x second`, a cartesian product
    Product,
}

/// Unary name combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnaryOp {
    /// The reverse of an edge or morphism
    Inverse,
    /// A fresh copy of an element
    Copied,
}

/// An opaque, structurally comparable identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Name {
    /// A plain identifier
    Identifier(String),
    /// A literal value
    Value(Value),
    /// A namespace-qualified name
    Prefixed {
        /// The namespace
        prefix: Box<Name>,
        /// The qualified name
        name: Box<Name>,
    },
    /// A name annotated with its type, `base : type`
    Typed {
        /// The annotated name
        name: Box<Name>,
        /// Its type
        type_name: Box<Name>,
    },
    /// A binary combination of two names
    Binary {
        /// The combinator
        op: BinaryOp,
        /// Left operand
        first: Box<Name>,
        /// Right operand
        second: Box<Name>,
    },
    /// A unary combination
    Unary {
        /// The combinator
        op: UnaryOp,
        /// The operand
        name: Box<Name>,
    },
    /// The name of an equivalence class: a sorted, duplicate free list of members
    Merge(Vec<Name>),
    /// A name disambiguated by an index
    Indexed {
        /// The repeated name
        name: Box<Name>,
        /// Its index
        index: u64,
    },
}

impl Name {
    /// Create a plain identifier
    pub fn identifier(id: impl Into<String>) -> Self {
        Name::Identifier(id.into())
    }

    /// Create a string literal name
    pub fn string_value(value: impl Into<String>) -> Self {
        Name::Value(Value::Str(value.into()))
    }

    /// Create an integer literal name
    pub fn int_value(value: i64) -> Self {
        Name::Value(Value::Int(value))
    }

    /// Create a float literal name
    pub fn float_value(value: f64) -> Self {
        Name::Value(Value::float(value))
    }

    /// Create a boolean literal name
    pub fn bool_value(value: bool) -> Self {
        Name::Value(Value::Bool(value))
    }

    /// Merge several names into the name of their equivalence class.
    ///
    /// Nested merges are flattened and members are sorted, so merging is
    /// associative and commutative. Merging a single name yields that name.
    pub fn merge<I>(names: I) -> Self
    where
        I: IntoIterator<Item = Name>,
    {
        let mut members = Vec::new();
        for name in names {
            match name {
                Name::Merge(inner) => members.extend(inner),
                other => members.push(other),
            }
        }
        members.sort();
        members.dedup();
        if members.len() == 1 {
            members.remove(0)
        } else {
            Name::Merge(members)
        }
    }

    fn binary(op: BinaryOp, first: &Name, second: &Name) -> Self {
        Name::Binary {
            op,
            first: Box::new(first.clone()),
            second: Box::new(second.clone()),
        }
    }

    /// Qualify this name with a namespace
    pub fn prefix_with(&self, prefix: &Name) -> Self {
        Name::Prefixed {
            prefix: Box::new(prefix.clone()),
            name: Box::new(self.clone()),
        }
    }

    /// The outermost namespace of this name
    pub fn prefix(&self) -> Option<&Name> {
        match self {
            Name::Prefixed { prefix, .. } => Some(prefix),
            _ => None,
        }
    }

    /// Whether `prefix` qualifies this name at any level of its namespace chain
    pub fn has_prefix(&self, prefix: &Name) -> bool {
        match self {
            Name::Prefixed { prefix: p, name } => p.as_ref() == prefix || name.has_prefix(prefix),
            _ => false,
        }
    }

    /// Remove the namespace `prefix` from this name, keeping any other qualification
    pub fn unprefix(&self, prefix: &Name) -> Self {
        match self {
            Name::Prefixed { prefix: p, name } if p.as_ref() == prefix => name.as_ref().clone(),
            Name::Prefixed { prefix: p, name } => name.unprefix(prefix).prefix_with(p),
            other => other.clone(),
        }
    }

    /// Remove the outermost namespace
    pub fn unprefix_top(&self) -> Self {
        match self {
            Name::Prefixed { name, .. } => name.as_ref().clone(),
            other => other.clone(),
        }
    }

    /// Remove every namespace qualification
    pub fn unprefix_all(&self) -> Self {
        match self {
            Name::Prefixed { name, .. } => name.unprefix_all(),
            other => other.clone(),
        }
    }

    /// Annotate this name with a type
    pub fn type_by(&self, type_name: &Name) -> Self {
        Name::Typed {
            name: Box::new(self.clone()),
            type_name: Box::new(type_name.clone()),
        }
    }

    /// Whether this name carries a type annotation
    pub fn is_typed(&self) -> bool {
        matches!(self, Name::Typed { .. })
    }

    /// The type annotation, if any
    pub fn type_of(&self) -> Option<&Name> {
        match self {
            Name::Typed { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    /// This name without its type annotation
    pub fn strip_type(&self) -> Self {
        match self {
            Name::Typed { name, .. } => name.as_ref().clone(),
            other => other.clone(),
        }
    }

    /// Sequential composition `self ; next`
    pub fn compose_sequentially(&self, next: &Name) -> Self {
        Self::binary(BinaryOp::Sequence, self, next)
    }

    /// The pair `(self, other)`
    pub fn pair(&self, other: &Name) -> Self {
        Self::binary(BinaryOp::Pair, self, other)
    }

    /// `self(argument)`
    pub fn applied_to(&self, argument: &Name) -> Self {
        Self::binary(BinaryOp::AppliedTo, self, argument)
    }

    /// The injection of `origin` into `self`
    pub fn injected_from(&self, origin: &Name) -> Self {
        Self::binary(BinaryOp::InjectedFrom, self, origin)
    }

    /// The projection of `self` onto the component `component`
    pub fn projection_on(&self, component: &Name) -> Self {
        Self::binary(BinaryOp::ProjectionOn, self, component)
    }

    /// `self` carrying the suffix `suffix`
    pub fn add_suffix(&self, suffix: &Name) -> Self {
        Self::binary(BinaryOp::Suffix, self, suffix)
    }

    /// `self` with the binding `substitute`
    pub fn substitution(&self, substitute: &Name) -> Self {
        Self::binary(BinaryOp::Substitution, self, substitute)
    }

    /// `self x other`
    pub fn times(&self, other: &Name) -> Self {
        Self::binary(BinaryOp::Product, self, other)
    }

    /// The inverse of this name. Inverting twice yields the original name.
    pub fn inverse(&self) -> Self {
        match self {
            Name::Unary {
                op: UnaryOp::Inverse,
                name,
            } => name.as_ref().clone(),
            other => Name::Unary {
                op: UnaryOp::Inverse,
                name: Box::new(other.clone()),
            },
        }
    }

    /// A copy of this name
    pub fn copied(&self) -> Self {
        Name::Unary {
            op: UnaryOp::Copied,
            name: Box::new(self.clone()),
        }
    }

    /// This name disambiguated by `index`
    pub fn index(&self, index: u64) -> Self {
        Name::Indexed {
            name: Box::new(self.clone()),
            index,
        }
    }

    /// The index this name carries, ignoring namespaces
    pub fn index_value(&self) -> Option<u64> {
        match self {
            Name::Indexed { index, .. } => Some(*index),
            Name::Prefixed { name, .. } => name.index_value(),
            _ => None,
        }
    }

    /// The literal behind this name, ignoring namespaces
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Name::Value(value) => Some(value),
            Name::Prefixed { name, .. } => name.as_value(),
            _ => None,
        }
    }

    /// The first component of a composite name.
    ///
    /// For binary combinations this is the left operand, for prefixed names
    /// the namespace.
    pub fn first_part(&self) -> Option<&Name> {
        match self {
            Name::Binary { first, .. } => Some(first),
            Name::Prefixed { prefix, .. } => Some(prefix),
            _ => None,
        }
    }

    /// The second component of a composite name.
    ///
    /// For binary combinations this is the right operand, for prefixed names
    /// the qualified name.
    pub fn second_part(&self) -> Option<&Name> {
        match self {
            Name::Binary { second, .. } => Some(second),
            Name::Prefixed { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The members of a merged name, or the name itself
    pub fn members(&self) -> Vec<&Name> {
        match self {
            Name::Merge(members) => members.iter().collect(),
            other => vec![other],
        }
    }
}

impl From<&str> for Name {
    fn from(id: &str) -> Self {
        Name::identifier(id)
    }
}

impl From<String> for Name {
    fn from(id: String) -> Self {
        Name::Identifier(id)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Identifier(id) => write!(f, "{id}"),
            Name::Value(value) => write!(f, "{value}"),
            Name::Prefixed { prefix, name } => write!(f, "{prefix}.{name}"),
            Name::Typed { name, type_name } => write!(f, "{name} : {type_name}"),
            Name::Binary { op, first, second } => match op {
                BinaryOp::Sequence => write!(f, "{first};{second}"),
                BinaryOp::Pair => write!(f, "({first}, {second})"),
                BinaryOp::AppliedTo => write!(f, "{first}({second})"),
                BinaryOp::InjectedFrom => write!(f, "{first}<-{second}"),
                BinaryOp::ProjectionOn => write!(f, "{first}->{second}"),
                BinaryOp::Suffix => write!(f, "{first}_{second}"),
                BinaryOp::Substitution => write!(f, "{first}[{second}]"),
                BinaryOp::Product => write!(f, "{first} x {second}"),
            },
            Name::Unary { op, name } => match op {
                UnaryOp::Inverse => write!(f, "{name}^-1"),
                UnaryOp::Copied => write!(f, "{name}'"),
            },
            Name::Merge(members) => {
                write!(f, "{{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, "}}")
            }
            Name::Indexed { name, index } => write!(f, "{name}#{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_structural_equality() {
        let a = Name::identifier("a").prefix_with(&Name::identifier("G"));
        let b = Name::identifier("a").prefix_with(&Name::identifier("G"));
        assert_eq!(a, b);
        assert_ne!(a, Name::identifier("a"));
    }

    #[test]
    fn test_prefixing_round_trip() {
        let g = Name::identifier("G");
        let h = Name::identifier("H");
        let name = Name::identifier("x").prefix_with(&g).prefix_with(&h);

        assert_eq!(name.prefix(), Some(&h));
        assert!(name.has_prefix(&g));
        assert_eq!(name.unprefix(&g), Name::identifier("x").prefix_with(&h));
        assert_eq!(name.unprefix(&h), Name::identifier("x").prefix_with(&g));
        assert_eq!(name.unprefix_all(), Name::identifier("x"));
    }

    #[test]
    fn test_typing() {
        let typed = Name::identifier("alice").type_by(&Name::identifier("Person"));
        assert!(typed.is_typed());
        assert_eq!(typed.type_of(), Some(&Name::identifier("Person")));
        assert_eq!(typed.strip_type(), Name::identifier("alice"));
    }

    #[test]
    fn test_inverse_is_involutive() {
        let f = Name::identifier("f");
        assert_ne!(f.inverse(), f);
        assert_eq!(f.inverse().inverse(), f);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = Name::identifier("a");
        let b = Name::identifier("b");
        let c = Name::identifier("c");

        let left = Name::merge([Name::merge([a.clone(), b.clone()]), c.clone()]);
        let right = Name::merge([c.clone(), Name::merge([b.clone(), a.clone()])]);
        assert_eq!(left, right);
        assert_eq!(Name::merge([a.clone()]), a);
        assert_eq!(left.members().len(), 3);
    }

    #[test]
    fn test_values_and_indices_look_through_namespaces() {
        let g = Name::identifier("G");
        let five = Name::int_value(5).prefix_with(&g);
        assert_eq!(five.as_value(), Some(&Value::Int(5)));
        assert_eq!(Name::identifier("5").as_value(), None);
        assert_eq!(Name::identifier("f").index(2).prefix_with(&g).index_value(), Some(2));
        assert_eq!(Name::identifier("f").index_value(), None);
    }

    #[test]
    fn test_pair_parts() {
        let pair = Name::identifier("x").pair(&Name::identifier("y"));
        assert_eq!(pair.first_part(), Some(&Name::identifier("x")));
        assert_eq!(pair.second_part(), Some(&Name::identifier("y")));
        assert_eq!(Name::identifier("x").first_part(), None);
    }

    #[test_case(Name::identifier("f").compose_sequentially(&Name::identifier("g")), "f;g" ; "sequence")]
    #[test_case(Name::identifier("x").pair(&Name::identifier("y")), "(x, y)" ; "pair")]
    #[test_case(Name::identifier("op").applied_to(&Name::identifier("G")), "op(G)" ; "application")]
    #[test_case(Name::identifier("f").inverse(), "f^-1" ; "inverse")]
    #[test_case(Name::merge([Name::identifier("b"), Name::identifier("a")]), "{a, b}" ; "merge")]
    #[test_case(Name::identifier("x").prefix_with(&Name::identifier("G")), "G.x" ; "prefix")]
    #[test_case(Name::string_value("hi"), "\"hi\"" ; "string literal")]
    fn test_display(name: Name, expected: &str) {
        assert_eq!(name.to_string(), expected);
    }

    #[test]
    fn test_float_values_are_hashable_and_comparable() {
        let a = Name::float_value(1.5);
        let b = Name::float_value(1.5);
        assert_eq!(a, b);
        match a {
            Name::Value(v) => assert_eq!(v.as_f64(), Some(1.5)),
            _ => panic!("expected a value"),
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let name = Name::identifier("x")
            .pair(&Name::int_value(3))
            .type_by(&Name::identifier("T"));
        let json = serde_json::to_string(&name).unwrap();
        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);
    }
}
