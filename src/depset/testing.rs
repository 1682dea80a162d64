//! Factories for building expected restriction trees in tests.
//!
//! Test assertions compare whole trees by equality; these helpers keep the
//! expected side readable. Not intended for non-test use.

use crate::depset::tree::Restriction;

pub fn leaf(token: &str) -> Restriction {
    Restriction::Leaf(token.to_string())
}

pub fn leaves(tokens: &[&str]) -> Vec<Restriction> {
    tokens.iter().map(|token| leaf(token)).collect()
}

pub fn and(children: Vec<Restriction>) -> Restriction {
    Restriction::And(children)
}

pub fn or(children: Vec<Restriction>) -> Restriction {
    Restriction::Or(children)
}

pub fn flag(name: &str, negate: bool) -> Restriction {
    Restriction::FlagMatch {
        flag: name.to_string(),
        negate,
    }
}

/// A use-conditional over `flag_name` wrapping `payload`.
pub fn conditional(flag_name: &str, negate: bool, payload: Restriction) -> Restriction {
    Restriction::Conditional {
        predicate: Box::new(flag(flag_name, negate)),
        payload: Box::new(payload),
    }
}
