// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the tokenizer

use thiserror::Error;

/// Result type for tokenizer operations
pub type Result<T> = std::result::Result<T, LexError>;

/// Errors that can occur while tokenizing.
///
/// Every error carries enough position information for a caller to point
/// at the offending byte. Once an error has been returned the lexer is in
/// an unspecified state; the only safe actions are dropping it or
/// restoring a previously saved checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// A byte matched no token rule
    #[error("unexpected character at offset {offset} (line {line})")]
    UnexpectedChar {
        /// Byte offset of the offending character
        offset: usize,
        /// 1-based line number at the offending character
        line: u32,
    },

    /// A close token with no matching open, a close of the wrong kind for
    /// a template interpolation, or open brackets left at end of input
    #[error("unbalanced nesting at offset {offset} (line {line})")]
    Unbalanced {
        /// Byte offset where the imbalance was detected
        offset: usize,
        /// 1-based line number at that offset
        line: u32,
    },

    /// Bracket nesting exceeded the fixed stack capacity
    #[error("bracket nesting too deep at offset {offset} (line {line})")]
    StackOverflow {
        /// Byte offset of the open bracket that overflowed
        offset: usize,
        /// 1-based line number at that offset
        line: u32,
    },

    /// An internal invariant was violated; a defect in the scanner, not
    /// in the input text
    #[error("internal inconsistency: {0}")]
    Internal(&'static str),

    /// Reserved for constructs deliberately left unhandled
    #[error("not implemented: {0}")]
    Unimplemented(&'static str),
}

impl LexError {
    /// Byte offset associated with this error, if it points into the input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            LexError::UnexpectedChar { offset, .. }
            | LexError::Unbalanced { offset, .. }
            | LexError::StackOverflow { offset, .. } => Some(*offset),
            LexError::Internal(_) | LexError::Unimplemented(_) => None,
        }
    }

    /// Line number associated with this error, if it points into the input.
    pub fn line(&self) -> Option<u32> {
        match self {
            LexError::UnexpectedChar { line, .. }
            | LexError::Unbalanced { line, .. }
            | LexError::StackOverflow { line, .. } => Some(*line),
            LexError::Internal(_) | LexError::Unimplemented(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexError::UnexpectedChar { offset: 12, line: 3 };
        assert_eq!(
            err.to_string(),
            "unexpected character at offset 12 (line 3)"
        );

        let err = LexError::Internal("checkpoint never saved");
        assert_eq!(
            err.to_string(),
            "internal inconsistency: checkpoint never saved"
        );
    }

    #[test]
    fn test_error_position_accessors() {
        let err = LexError::Unbalanced { offset: 4, line: 1 };
        assert_eq!(err.offset(), Some(4));
        assert_eq!(err.line(), Some(1));

        let err = LexError::Unimplemented("lookbehind");
        assert_eq!(err.offset(), None);
        assert_eq!(err.line(), None);
    }
}
