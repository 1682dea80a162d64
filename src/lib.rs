//! # depset
//!
//! A parser for dependency specification expressions.
//!
//! Expressions are whitespace-delimited: plain atoms, `( ... )` groups,
//! `|| ( ... )` or-groups, and `flag? ( ... )` use-conditionals (optionally
//! negated with a leading `!`). Parsing produces an ordered sequence of
//! restriction nodes; node construction itself is injected through the
//! [`RestrictionFactory`](depset::tree::RestrictionFactory) seam so callers
//! decide what a leaf atom becomes.
//!
//! For the grammar and its error cases, see the
//! [parsing module](depset::parsing).

pub mod depset;
