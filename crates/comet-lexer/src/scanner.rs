//! The scanner: classification of raw source bytes into tokens.
//!
//! [`Lexer`] keeps exactly one token of lookahead. Every call to
//! [`Lexer::next`] hands out the lookahead and scans the following token,
//! so an error in that following token surfaces from the call that
//! triggered the scan, one token early.

use crate::error::{LexError, Result};
use crate::token::{Token, TokenFlags, TokenKind};

/// Maximum bracket nesting depth. Exceeding it is a hard error, not a
/// reallocation.
pub const MAX_DEPTH: usize = 256;

/// Work the next scan owes before ordinary classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    /// No interrupted construct.
    Normal,
    /// A template literal stopped right before `${`; the next scan must
    /// emit the two-character brace and push a tagged stack slot.
    PendingTemplateBrace,
    /// A `}` closed a template interpolation; the next scan re-enters the
    /// enclosing literal mid-string.
    ResumeTemplate,
}

/// Snapshot for [`Lexer::restore_checkpoint`].
#[derive(Debug, Clone, Copy)]
struct Checkpoint<'s> {
    lookahead: Token<'s>,
    line: u32,
    depth: usize,
}

/// Streaming tokenizer over a borrowed source buffer.
///
/// Construction scans the first token, so [`Lexer::peek`] and
/// [`Lexer::next`] are valid immediately. Instances are independent and
/// hold no shared state; the source must outlive the lexer and every
/// token it produces.
pub struct Lexer<'s> {
    source: &'s str,
    /// Already-scanned token handed out by the next [`Lexer::next`] call.
    lookahead: Token<'s>,
    /// 1-based line number at the scan head.
    line: u32,
    mode: ScanMode,
    /// First comment skipped while scanning the current lookahead.
    pending: Option<Token<'s>>,
    /// One tag per open bracket: true for a template `${` slot.
    stack: [bool; MAX_DEPTH],
    depth: usize,
    checkpoint: Option<Checkpoint<'s>>,
}

impl<'s> Lexer<'s> {
    /// Binds `source` and primes the lookahead with the first token.
    ///
    /// Fails when the first token is already malformed, for example an
    /// unmatched close at the start of input.
    pub fn new(source: &'s str) -> Result<Self> {
        let mut lexer = Self {
            source,
            lookahead: Token {
                text: &source[..0],
                offset: 0,
                line: 1,
                kind: TokenKind::Eof,
                flags: TokenFlags::empty(),
            },
            line: 1,
            mode: ScanMode::Normal,
            pending: None,
            stack: [false; MAX_DEPTH],
            depth: 0,
            checkpoint: None,
        };
        lexer.scan_next()?;
        Ok(lexer)
    }

    /// The already-scanned lookahead token, without advancing.
    ///
    /// Idempotent. When the upcoming token starts with `/` this is the
    /// zero-length [`TokenKind::Slash`] placeholder; only [`Lexer::next`]
    /// can widen it, because division vs regex depends on caller context.
    pub fn peek(&self) -> Token<'s> {
        self.lookahead
    }

    /// 1-based line number at the scan head.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Number of currently open parens, brackets and braces, counting
    /// the lookahead token.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the lookahead token and scans the one after it.
    ///
    /// `has_value` reports whether the previously returned token could
    /// end a value expression. It settles a slash placeholder: after a
    /// value, `/` is the division operator (`/` or `/=`); otherwise it
    /// opens a regex literal. For any other lookahead the flag is
    /// ignored.
    ///
    /// At end of input the terminal token is returned again without
    /// rescanning.
    pub fn next(&mut self, has_value: bool) -> Result<Token<'s>> {
        if self.lookahead.kind == TokenKind::Slash {
            let at = self.lookahead.offset;
            let (len, kind) = if has_value {
                (self.consume_slash_op(at), TokenKind::Op)
            } else {
                (self.consume_regex(at), TokenKind::Regex)
            };
            self.lookahead.text = &self.source[at..at + len];
            self.lookahead.kind = kind;
        }

        let out = self.lookahead;
        if out.kind != TokenKind::Eof {
            self.scan_next()?;
        }
        Ok(out)
    }

    /// The comment that directly preceded the current lookahead, if any.
    ///
    /// Consuming: a second call returns `None` until another comment is
    /// skipped. A run of consecutive comments keeps only the first.
    pub fn take_pending_comment(&mut self) -> Option<Token<'s>> {
        self.pending.take()
    }

    /// Records the current position in the single checkpoint slot,
    /// replacing any earlier snapshot.
    pub fn save_checkpoint(&mut self) {
        self.checkpoint = Some(Checkpoint {
            lookahead: self.lookahead,
            line: self.line,
            depth: self.depth,
        });
    }

    /// Rolls scanning back to the last [`Lexer::save_checkpoint`] call.
    ///
    /// Only the lookahead token, line number and depth are restored; the
    /// scan mode, pending comment and stack tags are not part of the
    /// snapshot, so a checkpoint must not span an interrupted template
    /// literal. The slot stays valid for repeated restores.
    pub fn restore_checkpoint(&mut self) -> Result<()> {
        match self.checkpoint {
            Some(c) => {
                self.lookahead = c.lookahead;
                self.line = c.line;
                self.depth = c.depth;
                Ok(())
            }
            None => Err(LexError::Internal("checkpoint never saved")),
        }
    }

    /// Scans the token after the current lookahead and installs it.
    fn scan_next(&mut self) -> Result<()> {
        let mut head = self.lookahead.end();
        let line_before = self.line;
        self.pending = None;

        // interrupted template literals win over everything else, and
        // their continuation is literal text: no trivia skipping here
        match self.mode {
            ScanMode::PendingTemplateBrace => {
                // the arming scan saw both bytes of `${`
                self.mode = ScanMode::Normal;
                self.push_open(head, true)?;
                self.lookahead =
                    self.make_token(head, 2, TokenKind::TemplateBrace, self.line, line_before);
                return Ok(());
            }
            ScanMode::ResumeTemplate => {
                self.mode = ScanMode::Normal;
                if head < self.source.len() {
                    let line = self.line;
                    let len = self.consume_string_from(head, head, b'`');
                    self.lookahead =
                        self.make_token(head, len, TokenKind::String, line, line_before);
                    return Ok(());
                }
            }
            ScanMode::Normal => {}
        }

        // whitespace, then any run of comments; only the first comment
        // of the run is retained for take_pending_comment
        head = self.skip_space(head);
        let comment_line = self.line;
        let mut comment_len = self.consume_comment(head);
        if comment_len > 0 {
            self.pending = Some(self.make_token(
                head,
                comment_len,
                TokenKind::Comment,
                comment_line,
                line_before,
            ));
            while comment_len > 0 {
                head += comment_len;
                head = self.skip_space(head);
                comment_len = self.consume_comment(head);
            }
        }

        let line = self.line;
        let bytes = self.source.as_bytes();
        let Some(&c) = bytes.get(head) else {
            if self.depth != 0 {
                return Err(LexError::Unbalanced { offset: head, line });
            }
            self.lookahead = self.make_token(head, 0, TokenKind::Eof, line, line_before);
            return Ok(());
        };

        let (len, kind) = match c {
            // a bare slash cannot be classified here: whether it divides
            // or opens a regex is decided by the caller through next()
            b'/' => (0, TokenKind::Slash),
            b';' => (1, TokenKind::Semicolon),
            b'?' => (1, TokenKind::Ternary),
            b':' => (1, TokenKind::Colon),
            b',' => (1, TokenKind::Comma),
            b'(' => {
                self.push_open(head, false)?;
                (1, TokenKind::Paren)
            }
            b'[' => {
                self.push_open(head, false)?;
                (1, TokenKind::Bracket)
            }
            b'{' => {
                self.push_open(head, false)?;
                (1, TokenKind::Brace)
            }
            b')' | b']' => {
                // a template slot can only be closed by `}`
                if self.pop_close(head)? {
                    return Err(LexError::Unbalanced { offset: head, line });
                }
                (1, TokenKind::Close)
            }
            b'}' => {
                if self.pop_close(head)? {
                    self.mode = ScanMode::ResumeTemplate;
                }
                (1, TokenKind::Close)
            }
            b'\'' | b'"' | b'`' => (
                self.consume_string_from(head, head + 1, c),
                TokenKind::String,
            ),
            _ => {
                if let Some(op) = self.scan_operator(head) {
                    op
                } else if c.is_ascii_digit()
                    || (c == b'.' && matches!(bytes.get(head + 1), Some(n) if n.is_ascii_digit()))
                {
                    (self.scan_number(head), TokenKind::Number)
                } else if c == b'.' {
                    if bytes.get(head + 1) == Some(&b'.') && bytes.get(head + 2) == Some(&b'.') {
                        (3, TokenKind::Spread)
                    } else {
                        (1, TokenKind::Dot)
                    }
                } else {
                    let len = self.scan_word(head);
                    if len == 0 {
                        return Err(LexError::UnexpectedChar { offset: head, line });
                    }
                    (len, TokenKind::Word)
                }
            }
        };

        self.lookahead = self.make_token(head, len, kind, line, line_before);
        Ok(())
    }

    fn make_token(
        &self,
        offset: usize,
        len: usize,
        kind: TokenKind,
        line: u32,
        line_before: u32,
    ) -> Token<'s> {
        let mut flags = TokenFlags::empty();
        if line == line_before {
            flags.insert(TokenFlags::SAME_LINE);
        }
        Token {
            text: &self.source[offset..offset + len],
            offset,
            line,
            kind,
            flags,
        }
    }

    fn push_open(&mut self, offset: usize, template: bool) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(LexError::StackOverflow {
                offset,
                line: self.line,
            });
        }
        self.stack[self.depth] = template;
        self.depth += 1;
        Ok(())
    }

    /// Pops one nesting level, reporting whether it was a template slot.
    fn pop_close(&mut self, offset: usize) -> Result<bool> {
        if self.depth == 0 {
            return Err(LexError::Unbalanced {
                offset,
                line: self.line,
            });
        }
        self.depth -= 1;
        Ok(self.stack[self.depth])
    }

    fn skip_space(&mut self, mut at: usize) -> usize {
        let bytes = self.source.as_bytes();
        while let Some(&c) = bytes.get(at) {
            if !is_space(c) {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            at += 1;
        }
        at
    }

    /// Length of the comment at `at`, or 0 if there is none. A line
    /// comment runs to but not including the newline. A closed block
    /// comment advances the line counter past its body; an unclosed one
    /// runs to end of input without advancing it.
    fn consume_comment(&mut self, at: usize) -> usize {
        let bytes = self.source.as_bytes();
        if bytes.get(at) != Some(&b'/') {
            return 0;
        }
        match bytes.get(at + 1).copied() {
            Some(b'/') => match self.source[at + 2..].find('\n') {
                Some(i) => 2 + i,
                None => self.source.len() - at,
            },
            Some(b'*') => match self.source[at + 2..].find("*/") {
                Some(i) => {
                    let body = &self.source[at + 2..at + 2 + i];
                    self.line += body.bytes().filter(|&b| b == b'\n').count() as u32;
                    2 + i + 2
                }
                None => self.source.len() - at,
            },
            _ => 0,
        }
    }

    /// Scans string content for the literal starting at `at`, beginning
    /// from `content` (one past the quote, or equal to `at` when
    /// resuming a template). Returns the total length from `at`.
    ///
    /// `\` escapes the following byte without interpreting it. Inside a
    /// backtick literal an unescaped `${` stops the scan short of the
    /// dollar and arms [`ScanMode::PendingTemplateBrace`]. An
    /// unterminated literal runs to end of input. Newlines, escaped or
    /// not, advance the line counter.
    fn consume_string_from(&mut self, at: usize, content: usize, delim: u8) -> usize {
        let bytes = self.source.as_bytes();
        let mut p = content;
        while p < bytes.len() {
            let mut c = bytes[p];
            if c == delim {
                return p + 1 - at;
            }
            if c == b'\\' {
                p += 1;
                if p >= bytes.len() {
                    break;
                }
                c = bytes[p];
            } else if delim == b'`' && c == b'$' && bytes.get(p + 1) == Some(&b'{') {
                self.mode = ScanMode::PendingTemplateBrace;
                return p - at;
            }
            if c == b'\n' {
                self.line += 1;
            }
            p += 1;
        }
        bytes.len() - at
    }

    /// Consumes an operator cluster: repeats of the head character up to
    /// its cap, then an optional compound `=`, with `=>` and the doubled
    /// `++` `--` `||` `&&` forms as fixed shapes.
    fn scan_operator(&self, at: usize) -> Option<(usize, TokenKind)> {
        let bytes = self.source.as_bytes();
        let start = bytes[at];
        // how many identical characters may repeat: ** and the shifts
        let allowed = match start {
            b'=' | b'&' | b'|' | b'^' | b'~' | b'!' | b'%' | b'+' | b'-' => 1,
            b'*' | b'<' => 2,
            b'>' => 3,
            _ => return None,
        };

        let mut len = 1;
        while len < allowed && bytes.get(at + len) == Some(&start) {
            len += 1;
        }

        let next = bytes.get(at + len).copied().unwrap_or(0);
        if start == b'=' && next == b'>' {
            return Some((2, TokenKind::Arrow));
        }

        if next == start && matches!(start, b'+' | b'-' | b'|' | b'&') {
            // ++ -- || &&, exactly two
            len += 1;
        } else if next == b'=' {
            len += 1;
            if matches!(start, b'=' | b'!') && bytes.get(at + len) == Some(&b'=') {
                len += 1; // === and !==
            }
        }
        Some((len, TokenKind::Op))
    }

    /// Greedy number scan through alphanumerics and dots, so malformed
    /// forms like `0x1g` or `1.2.3` still come out as a single token.
    fn scan_number(&self, at: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut len = 1;
        while let Some(&c) = bytes.get(at + len) {
            if !(c.is_ascii_alphanumeric() || c == b'.') {
                break;
            }
            len += 1;
        }
        len
    }

    /// Scans a word: letters, digits, `$`, `_`, high bytes, and blind
    /// backslash escapes. An escape takes the next byte verbatim, and a
    /// brace form like `\u{1f600}` runs to its closing `}`. Returns 0
    /// when `at` does not start a word.
    fn scan_word(&self, at: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut len = 0;
        loop {
            let Some(&c) = bytes.get(at + len) else { break };
            if c == b'\\' {
                len += 2;
                if at + len > bytes.len() {
                    return bytes.len() - at;
                }
                if bytes.get(at + len) == Some(&b'{') {
                    while let Some(&b) = bytes.get(at + len) {
                        len += 1;
                        if b == b'}' {
                            break;
                        }
                    }
                }
                continue;
            }
            let valid = if len == 0 {
                is_word_start(c)
            } else {
                is_word_part(c)
            };
            if !valid {
                break;
            }
            len += 1;
        }
        len
    }

    fn consume_slash_op(&self, at: usize) -> usize {
        if self.source.as_bytes().get(at + 1) == Some(&b'=') {
            2
        } else {
            1
        }
    }

    /// Scans a regex literal including trailing flags. A newline or end
    /// of input cuts the literal short at that point, without advancing
    /// the line counter.
    fn consume_regex(&self, at: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut in_class = false;
        let mut p = at;
        loop {
            let Some(&c) = bytes.get(p) else {
                return bytes.len() - at;
            };
            match c {
                b'/' if !in_class && p != at => {
                    // eat trailing flags
                    p += 1;
                    while matches!(bytes.get(p), Some(f) if f.is_ascii_alphanumeric()) {
                        p += 1;
                    }
                    return p - at;
                }
                b'\n' => return p - at,
                b'[' => in_class = true,
                b']' => in_class = false,
                b'\\' => p += 1,
                _ => {}
            }
            p += 1;
        }
    }
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'$' || c == b'_' || c >= 0x80
}

fn is_word_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'$' || c == b'_' || c >= 0x80
}
