//! Restriction tree nodes and the construction seam
//!
//! The parser never builds nodes itself. Every node shape it needs is
//! produced through a [`RestrictionFactory`], resolved once by the caller
//! and passed explicitly into the parse entry point. This module provides
//! both the seam and a default implementation: a closed [`Restriction`]
//! enum covering exactly the shapes the grammar can produce, plus
//! [`TreeFactory`], which is generic over the per-atom leaf builder so
//! callers can validate or rewrite atoms while parsing.

use serde::Serialize;
use std::fmt;

/// A node in a parsed restriction tree.
///
/// The grammar only ever produces these five shapes: leaf atoms, AND/OR
/// groups over ordered children, flag predicates, and use-conditionals
/// pairing a flag predicate with an AND payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    /// A plain atom, kept verbatim.
    Leaf(String),
    /// All children must hold; children keep encounter order.
    And(Vec<Restriction>),
    /// At least one child must hold; children keep encounter order.
    Or(Vec<Restriction>),
    /// Predicate over a named use flag, optionally negated.
    FlagMatch { flag: String, negate: bool },
    /// A use-conditional: the payload applies only when the predicate holds.
    Conditional {
        predicate: Box<Restriction>,
        payload: Box<Restriction>,
    },
}

impl Restriction {
    /// Leaf atom texts in encounter order, across all nesting levels.
    ///
    /// Flag predicates are not leaves; a conditional contributes only the
    /// leaves of its payload.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Restriction::Leaf(token) => out.push(token),
            Restriction::And(children) | Restriction::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Restriction::FlagMatch { .. } => {}
            Restriction::Conditional { payload, .. } => payload.collect_leaves(out),
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Leaf(token) => write!(f, "{}", token),
            Restriction::And(children) => write!(f, "And({} children)", children.len()),
            Restriction::Or(children) => write!(f, "Or({} children)", children.len()),
            Restriction::FlagMatch { flag, negate } => {
                write!(f, "FlagMatch({}{})", if *negate { "!" } else { "" }, flag)
            }
            Restriction::Conditional { predicate, .. } => {
                write!(f, "Conditional({})", predicate)
            }
        }
    }
}

/// Construction seam between the parser and the restriction-tree library.
///
/// One method per node shape the grammar can produce. The parser treats the
/// factory as a black box: any method may fail, and such failures abort the
/// parse, wrapped into a
/// [`ParseError`](crate::depset::errors::ParseError) that preserves the
/// factory's message and the span of the token or group being built.
///
/// `finalize` is forwarded as `true` on every group the parser builds;
/// factories whose node types have no open/finalized distinction can ignore
/// it.
pub trait RestrictionFactory {
    type Node;
    type Error: fmt::Display;

    /// Build a leaf restriction from a plain atom token, passed verbatim.
    fn leaf(&self, token: &str) -> Result<Self::Node, Self::Error>;

    /// Combine an ordered child sequence into an AND group.
    fn and_group(&self, children: Vec<Self::Node>, finalize: bool)
        -> Result<Self::Node, Self::Error>;

    /// Combine an ordered child sequence into an OR group.
    fn or_group(&self, children: Vec<Self::Node>, finalize: bool)
        -> Result<Self::Node, Self::Error>;

    /// Build the value predicate for a use flag.
    fn flag_match(&self, flag: &str, negate: bool) -> Result<Self::Node, Self::Error>;

    /// Wrap a predicate and an AND payload into a use-conditional.
    fn use_conditional(
        &self,
        predicate: Self::Node,
        payload: Self::Node,
    ) -> Result<Self::Node, Self::Error>;
}

/// Leaf builder signature used by the verbatim [`TreeFactory`].
pub type LeafFn = fn(&str) -> Result<Restriction, String>;

/// Factory producing the built-in [`Restriction`] tree.
pub struct TreeFactory<L = LeafFn> {
    leaf: L,
}

impl TreeFactory<LeafFn> {
    /// Factory whose leaves keep the atom text verbatim.
    pub fn verbatim() -> Self {
        TreeFactory {
            leaf: |token| Ok(Restriction::Leaf(token.to_string())),
        }
    }
}

impl<L> TreeFactory<L>
where
    L: Fn(&str) -> Result<Restriction, String>,
{
    /// Factory with an injected per-atom leaf builder.
    ///
    /// The builder is invoked once per plain atom, in encounter order; a
    /// returned error aborts the parse with that message.
    pub fn new(leaf: L) -> Self {
        TreeFactory { leaf }
    }
}

impl<L> RestrictionFactory for TreeFactory<L>
where
    L: Fn(&str) -> Result<Restriction, String>,
{
    type Node = Restriction;
    type Error = String;

    fn leaf(&self, token: &str) -> Result<Restriction, String> {
        (self.leaf)(token)
    }

    fn and_group(&self, children: Vec<Restriction>, _finalize: bool) -> Result<Restriction, String> {
        Ok(Restriction::And(children))
    }

    fn or_group(&self, children: Vec<Restriction>, _finalize: bool) -> Result<Restriction, String> {
        Ok(Restriction::Or(children))
    }

    fn flag_match(&self, flag: &str, negate: bool) -> Result<Restriction, String> {
        Ok(Restriction::FlagMatch {
            flag: flag.to_string(),
            negate,
        })
    }

    fn use_conditional(
        &self,
        predicate: Restriction,
        payload: Restriction,
    ) -> Result<Restriction, String> {
        Ok(Restriction::Conditional {
            predicate: Box::new(predicate),
            payload: Box::new(payload),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_in_encounter_order() {
        let tree = Restriction::And(vec![
            Restriction::Leaf("a".to_string()),
            Restriction::Or(vec![
                Restriction::Leaf("b".to_string()),
                Restriction::Leaf("c".to_string()),
            ]),
            Restriction::Conditional {
                predicate: Box::new(Restriction::FlagMatch {
                    flag: "x".to_string(),
                    negate: false,
                }),
                payload: Box::new(Restriction::And(vec![Restriction::Leaf("d".to_string())])),
            },
        ]);
        assert_eq!(tree.leaves(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_verbatim_factory_keeps_atom_text() {
        let factory = TreeFactory::verbatim();
        assert_eq!(
            factory.leaf("dev-lang/rust").unwrap(),
            Restriction::Leaf("dev-lang/rust".to_string())
        );
    }

    #[test]
    fn test_json_shape() {
        let node = Restriction::FlagMatch {
            flag: "doc".to_string(),
            negate: true,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"flag_match":{"flag":"doc","negate":true}}"#);
    }
}
