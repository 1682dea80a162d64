//! Base tokenization for depset expressions
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where expression strings become token streams.
//!
//! The token alphabet is deliberately minimal: a token is a maximal run of
//! non-whitespace characters, where whitespace is exactly space, tab, and
//! newline. All further classification (group delimiters, `||`, trailing `?`)
//! happens in the parser, which only ever looks at the token's exact
//! substring. Tokens therefore carry their byte span into the original
//! input; the input itself is never copied or mutated here.

use logos::Logos;
use std::ops::Range;

/// A single expression token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n]+")]
pub enum Token {
    /// A maximal run of non-whitespace characters.
    #[regex(r"[^ \t\n]+")]
    Word,
}

/// Tokenize an expression with location information.
///
/// Returns tokens paired with their byte spans into `source`. The empty
/// string (or an all-whitespace string) yields no tokens.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
