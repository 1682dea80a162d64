//! Recursive-descent parser for depset expressions
//!
//! Grammar, all tokens whitespace-delimited:
//!
//! ```text
//! depset      := item*
//! item        := atom | group | or-group | conditional
//! group       := "(" item+ ")"
//! or-group    := "||" group
//! conditional := ["!"] flag "?" group
//! ```
//!
//! The parser runs a single forward pass over the token stream produced by
//! [`lexing::tokenize`](crate::depset::lexing::tokenize), recursing once per
//! `(`-group. Each nesting level accumulates its children, in encounter
//! order, into a frame that starts small and grows by doubling; on success
//! the frame becomes the node set for that level, on any error every open
//! frame is dropped and no partial tree escapes.
//!
//! Spacing is strict: `(` and `)` must stand alone as tokens, and an atom
//! containing either parenthesis is rejected rather than passed to the leaf
//! builder. `(`-groups, or-groups, and conditional payloads must be
//! non-empty. Or-groups can be disabled per parse for dialects that forbid
//! them, in which case a well-formed `||` is still a stray `|`.
//!
//! End of input ends any frame normally, so an unclosed group parses; the
//! reverse (a `)` with no open frame) is an error.

use std::ops::Range;

use crate::depset::errors::ParseError;
use crate::depset::lexing::tokenize;
use crate::depset::tree::{Restriction, RestrictionFactory, TreeFactory};

/// Hard cap on `(`-group nesting.
///
/// Recursion depth tracks input nesting, so a pathological run of opening
/// parens has to fail as a parse error before it can exhaust the native
/// stack.
pub const MAX_NESTING_DEPTH: usize = 64;

const INITIAL_FRAME_CAPACITY: usize = 8;

/// Successful parse output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepSet<N> {
    /// Top-level restriction nodes, in encounter order.
    pub restrictions: Vec<N>,
    /// True iff any use-conditional occurs anywhere in the tree. Sticky:
    /// set the first time one is built, never reset.
    pub has_conditionals: bool,
}

/// Parse an expression, building nodes through `factory`.
///
/// `enable_or` controls whether `|| ( ... )` groups are accepted; when
/// false they fail as a stray `|`. The first error anywhere aborts the
/// whole parse.
pub fn parse_depset<F: RestrictionFactory>(
    dep_str: &str,
    factory: &F,
    enable_or: bool,
) -> Result<DepSet<F::Node>, ParseError> {
    let words: Vec<Range<usize>> = tokenize(dep_str)
        .into_iter()
        .map(|(_, span)| span)
        .collect();
    let mut parser = Parser {
        dep_str,
        words,
        pos: 0,
        factory,
        enable_or,
        has_conditionals: false,
    };
    let restrictions = parser.parse_frame(0)?;
    Ok(DepSet {
        restrictions,
        has_conditionals: parser.has_conditionals,
    })
}

/// Parse with the built-in verbatim tree factory.
pub fn parse(dep_str: &str, enable_or: bool) -> Result<DepSet<Restriction>, ParseError> {
    parse_depset(dep_str, &TreeFactory::verbatim(), enable_or)
}

struct Parser<'a, F> {
    dep_str: &'a str,
    words: Vec<Range<usize>>,
    pos: usize,
    factory: &'a F,
    enable_or: bool,
    has_conditionals: bool,
}

impl<'a, F: RestrictionFactory> Parser<'a, F> {
    /// One nesting level. `depth` 0 is the implicit top-level frame.
    fn parse_frame(&mut self, depth: usize) -> Result<Vec<F::Node>, ParseError> {
        let mut children: Vec<F::Node> = Vec::with_capacity(INITIAL_FRAME_CAPACITY);
        let dep_str = self.dep_str;

        while self.pos < self.words.len() {
            let span = self.words[self.pos].clone();
            let word: &'a str = &dep_str[span.clone()];

            let item = if word.starts_with('(') {
                if word.len() != 1 {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "either a space or end of string is required after (",
                        span,
                    ));
                }
                self.pos += 1;
                let nested = self.parse_group(depth, span.clone())?;
                let group_span = span.start..self.end_of_consumed(span.end);
                if nested.is_empty() {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "empty payload",
                        group_span,
                    ));
                }
                self.build(group_span, |f| f.and_group(nested, true))?
            } else if word.starts_with(')') {
                if depth == 0 {
                    return Err(ParseError::new(self.dep_str, ") found without matching ("));
                }
                if word.len() != 1 {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "either a space or end of string is required after )",
                        span,
                    ));
                }
                self.pos += 1;
                break;
            } else if word.ends_with('?') {
                let flag_text = &word[..word.len() - 1];
                if flag_text.is_empty() || flag_text == "!" {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "empty use conditional",
                        span,
                    ));
                }
                let (flag, negate) = match flag_text.strip_prefix('!') {
                    Some(rest) => (rest, true),
                    None => (flag_text, false),
                };
                self.pos += 1;
                self.expect_group_open(span.clone())?;
                let nested = self.parse_group(depth, span.clone())?;
                let group_span = span.start..self.end_of_consumed(span.end);
                if nested.is_empty() {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "empty payload",
                        group_span,
                    ));
                }
                let payload = self.build(group_span.clone(), |f| f.and_group(nested, true))?;
                let predicate = self.build(span.clone(), |f| f.flag_match(flag, negate))?;
                let node = self.build(group_span, |f| f.use_conditional(predicate, payload))?;
                self.has_conditionals = true;
                node
            } else if word.starts_with('|') {
                if !word.starts_with("||") || !self.enable_or {
                    return Err(ParseError::new(self.dep_str, "stray |"));
                }
                if word.len() != 2 {
                    // "||(..." and friends: the group opener has to stand alone.
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "( has to be the next token for a conditional",
                        span,
                    ));
                }
                self.pos += 1;
                self.expect_group_open(span.clone())?;
                let nested = self.parse_group(depth, span.clone())?;
                let group_span = span.start..self.end_of_consumed(span.end);
                if nested.is_empty() {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "empty payload",
                        group_span,
                    ));
                }
                self.build(group_span, |f| f.or_group(nested, true))?
            } else {
                if word.contains('(') {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "missing space before (",
                        span,
                    ));
                }
                if word.contains(')') {
                    return Err(ParseError::with_span(
                        self.dep_str,
                        "missing space before )",
                        span,
                    ));
                }
                self.pos += 1;
                self.build(span, |f| f.leaf(word))?
            };

            children.push(item);
        }

        Ok(children)
    }

    /// Recurse into the frame opened by a consumed `(`, enforcing the depth
    /// cap. `at` is the span of the construct that opened the group.
    fn parse_group(&mut self, depth: usize, at: Range<usize>) -> Result<Vec<F::Node>, ParseError> {
        if depth + 1 >= MAX_NESTING_DEPTH {
            return Err(ParseError::with_span(
                self.dep_str,
                "maximum nesting depth exceeded",
                at,
            ));
        }
        self.parse_frame(depth + 1)
    }

    /// The next token must be exactly `(`; consumed on success. `at` is the
    /// span of the `||` or `flag?` token requiring it.
    fn expect_group_open(&mut self, at: Range<usize>) -> Result<(), ParseError> {
        if self.pos < self.words.len() {
            let span = self.words[self.pos].clone();
            if &self.dep_str[span.clone()] == "(" {
                self.pos += 1;
                return Ok(());
            }
            return Err(ParseError::with_span(
                self.dep_str,
                "( has to be the next token for a conditional",
                at.start..span.end,
            ));
        }
        Err(ParseError::with_span(
            self.dep_str,
            "( has to be the next token for a conditional",
            at,
        ))
    }

    /// End position of the region consumed so far, falling back to
    /// `at_least` when nothing past it was consumed.
    fn end_of_consumed(&self, at_least: usize) -> usize {
        if self.pos == 0 {
            return at_least;
        }
        self.words[self.pos - 1].end.max(at_least)
    }

    /// Run a factory method, wrapping its error with the active span.
    fn build<T>(
        &self,
        span: Range<usize>,
        op: impl FnOnce(&'a F) -> Result<T, F::Error>,
    ) -> Result<T, ParseError> {
        op(self.factory)
            .map_err(|err| ParseError::with_span(self.dep_str, err.to_string(), span))
    }
}
