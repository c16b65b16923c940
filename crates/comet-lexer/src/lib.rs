// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # comet-lexer
//!
//! A streaming tokenizer for JavaScript-like source text.
//!
//! ## Overview
//!
//! This crate turns raw source text into positioned, classified tokens
//! without building a syntax tree:
//! - One-token lookahead with [`Lexer::peek`] and [`Lexer::next`]
//! - Caller-driven division-vs-regex disambiguation for `/`
//! - Template literals split around `${`...`}` interpolations
//! - Comment capture through [`Lexer::take_pending_comment`]
//! - A single save/restore checkpoint for speculative scanning
//!
//! Tokens borrow from the input, so the source string must outlive both
//! the lexer and any tokens kept around.
//!
//! ## Quick Start
//!
//! ```rust
//! use comet_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("let x = 40 + 2;")?;
//! assert_eq!(lexer.peek().text, "let");
//!
//! let first = lexer.next(false)?;
//! assert_eq!(first.kind, TokenKind::Word);
//! # Ok::<(), comet_lexer::LexError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scanner;
pub mod token;
pub mod words;

// Re-exports for convenience
pub use error::{LexError, Result};
pub use scanner::{Lexer, MAX_DEPTH};
pub use token::{Token, TokenFlags, TokenKind};
pub use words::{WordClass, classify_word};

/// Tokenizes `source` from start to finish, feeding every produced
/// token to `callback` in order.
///
/// Pending comments are delivered just before the token they precede.
/// The slash ambiguity is resolved with a one-token heuristic: `/` is
/// treated as division whenever the previous token could end a value
/// (see [`Token::ends_value`]). The terminal token is passed to the
/// callback before returning.
///
/// # Examples
///
/// ```rust
/// use comet_lexer::TokenKind;
///
/// let mut kinds = Vec::new();
/// comet_lexer::for_each_token("1 + 2", |token| kinds.push(token.kind))?;
/// assert_eq!(
///     kinds,
///     [TokenKind::Number, TokenKind::Op, TokenKind::Number, TokenKind::Eof],
/// );
/// # Ok::<(), comet_lexer::LexError>(())
/// ```
pub fn for_each_token<'s, F>(source: &'s str, mut callback: F) -> Result<()>
where
    F: FnMut(Token<'s>),
{
    let mut lexer = Lexer::new(source)?;
    let mut has_value = false;
    loop {
        if let Some(comment) = lexer.take_pending_comment() {
            callback(comment);
        }
        let token = lexer.next(has_value)?;
        callback(token);
        if token.kind == TokenKind::Eof {
            return Ok(());
        }
        has_value = token.ends_value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &str) -> Vec<(TokenKind, String)> {
        let mut out = Vec::new();
        for_each_token(source, |token| out.push((token.kind, token.text.to_string()))).unwrap();
        out
    }

    #[test]
    fn test_driver_yields_comments_in_order() {
        assert_eq!(
            collect("x; // done"),
            vec![
                (TokenKind::Word, "x".to_string()),
                (TokenKind::Semicolon, ";".to_string()),
                (TokenKind::Comment, "// done".to_string()),
                (TokenKind::Eof, String::new()),
            ],
        );
    }

    #[test]
    fn test_driver_resolves_division() {
        // after a symbol the slash divides
        assert_eq!(
            collect("a / b")[1],
            (TokenKind::Op, "/".to_string()),
        );
        // after an operator it opens a regex
        assert_eq!(
            collect("b = /x/g")[2],
            (TokenKind::Regex, "/x/g".to_string()),
        );
        // a keyword does not end a value
        assert_eq!(
            collect("return /x/")[1],
            (TokenKind::Regex, "/x/".to_string()),
        );
    }

    #[test]
    fn test_driver_stops_on_error() {
        let mut count = 0;
        let result = for_each_token("a @", |_| count += 1);
        assert!(matches!(result, Err(LexError::UnexpectedChar { offset: 2, .. })));
        assert_eq!(count, 0);
    }
}
