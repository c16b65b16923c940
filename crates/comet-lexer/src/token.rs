//! Token definitions for the streaming tokenizer.

use crate::words;

/// Bit flags carrying contextual annotations on a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFlags(u32);

impl TokenFlags {
    /// The token starts on the same line the previous token ended on.
    pub const SAME_LINE: TokenFlags = TokenFlags(1);

    /// Returns the empty flag set.
    pub const fn empty() -> Self {
        TokenFlags(0)
    }

    /// Returns true if all flags in `other` are set.
    pub fn contains(self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets all flags in `other`.
    pub fn insert(&mut self, other: TokenFlags) {
        self.0 |= other.0;
    }

    /// Returns the raw bits.
    pub fn bits(self) -> u32 {
        self.0
    }
}

/// A classified, positioned slice of source text.
///
/// Tokens borrow from the source buffer and are `Copy`, so callers can
/// retain as many as they like for the lifetime of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    /// Raw token text, a slice of the original source
    pub text: &'s str,
    /// Byte offset of the token start within the source
    pub offset: usize,
    /// 1-based line number at the token start
    pub line: u32,
    /// Classification tag
    pub kind: TokenKind,
    /// Contextual annotations
    pub flags: TokenFlags,
}

impl<'s> Token<'s> {
    /// Returns the length of this token in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if this token has no text (end-of-input, or the
    /// unresolved slash placeholder).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset one past the end of this token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Returns true if this token starts on the same line the previous
    /// token ended on.
    pub fn same_line(&self) -> bool {
        self.flags.contains(TokenFlags::SAME_LINE)
    }

    /// Returns true if this token can end a value expression, meaning a
    /// `/` after it reads as division rather than the start of a regex
    /// literal.
    ///
    /// Words count when they are not keywords, so `null`, `true`,
    /// `false`, and plain identifiers all read as values while `return`
    /// does not. The grammar cannot be resolved exactly without a full
    /// parse; this is the token-level approximation.
    pub fn ends_value(&self) -> bool {
        match self.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Regex | TokenKind::Close => true,
            TokenKind::Word => !words::classify_word(self.text).is_keyword(),
            _ => false,
        }
    }
}

/// The different kinds of tokens.
///
/// `Symbol`, `Keyword`, and `Label` are never produced by the scanner;
/// they exist for callers that reclassify `Word` tokens through
/// [`classify_word`](crate::words::classify_word).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// Identifier-like word, not yet classified as symbol or keyword
    Word,
    /// `;`
    Semicolon,
    /// Operator such as `+`, `===`, `>>>=`, or a resolved `/`
    Op,
    /// `:`
    Colon,
    /// `{`
    Brace,
    /// `[`
    Bracket,
    /// `(`
    Paren,
    /// `?`
    Ternary,
    /// `)`, `]`, or `}`
    Close,
    /// String or template-literal fragment, delimiters included
    String,
    /// Regex literal such as `/foo/g`, including trailing flags
    Regex,
    /// Numeric literal, scanned permissively
    Number,
    /// A `Word` reclassified as an ordinary identifier
    Symbol,
    /// A `Word` reclassified as a keyword
    Keyword,
    /// A `Word` reclassified as a label
    Label,
    /// `//` or `/* */` comment
    Comment,
    /// `=>`
    Arrow,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Spread,
    /// The two-character `${` opening a template interpolation
    TemplateBrace,
    /// Placeholder for a `/` whose meaning is unknown until the caller
    /// supplies value context; zero length, resolved by `next`
    Slash,
}

impl TokenKind {
    /// Returns true if this token opens a nesting level.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            TokenKind::Paren | TokenKind::Bracket | TokenKind::Brace | TokenKind::TemplateBrace
        )
    }

    /// Returns true if this token closes a nesting level.
    pub fn is_close(self) -> bool {
        matches!(self, TokenKind::Close)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Eof => "eof",
            TokenKind::Word => "word",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Op => "op",
            TokenKind::Colon => "colon",
            TokenKind::Brace => "brace",
            TokenKind::Bracket => "bracket",
            TokenKind::Paren => "paren",
            TokenKind::Ternary => "ternary",
            TokenKind::Close => "close",
            TokenKind::String => "string",
            TokenKind::Regex => "regex",
            TokenKind::Number => "number",
            TokenKind::Symbol => "symbol",
            TokenKind::Keyword => "keyword",
            TokenKind::Label => "label",
            TokenKind::Comment => "comment",
            TokenKind::Arrow => "arrow",
            TokenKind::Comma => "comma",
            TokenKind::Dot => "dot",
            TokenKind::Spread => "spread",
            TokenKind::TemplateBrace => "t-brace",
            TokenKind::Slash => "slash",
        };
        f.pad(name)
    }
}
