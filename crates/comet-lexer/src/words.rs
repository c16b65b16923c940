//! Keyword capability tables.
//!
//! Classification is driven by fixed space-delimited word lists rather
//! than one big table, because most capabilities overlap only partially:
//! `yield` is a keyword, ASI-sensitive, and expression-leading, while
//! `catch` is a keyword and control-only. Callers get all capabilities in
//! one [`WordClass`] lookup and pick the bits they care about.

// nb. does not contain 'in' or 'instanceof', as they are ops
// does not contain 'super', treated as symbol
const KEYWORDS: &str = "await break case catch class const continue debugger default delete \
    do else enum export extends finally for function if implements import interface let new \
    package private protected public return static switch throw try typeof var void while \
    with yield";

const RESERVED_EXTRA: &str = "null true false";

// control keywords that are not exprs
const CONTROL: &str = "catch do if for switch while with";

const ASI: &str = "break continue return throw yield";

// keywords that may cause declarations (function is hoisted, class _technically_ isn't)
const HOIST: &str = "class function";

// keywords that operate on something and return a value
//   e.g. 'void 1' returns undefined
const EXPR: &str = "await delete new typeof void yield";

const DECL: &str = "var let const";

// keywords that may optionally have a label (and only a label) following them
const LABEL: &str = "break continue";

fn in_list(list: &str, word: &str) -> bool {
    list.split_ascii_whitespace().any(|w| w == word)
}

/// The capabilities of a single word.
///
/// An ordinary symbol reports false for everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordClass {
    keyword: bool,
    reserved: bool,
    control: bool,
    asi: bool,
    hoist: bool,
    expr: bool,
    decl: bool,
    label: bool,
}

impl WordClass {
    /// True for statement keywords like `if` or `return`.
    pub fn is_keyword(self) -> bool {
        self.keyword
    }

    /// True for keywords plus the literal words `null`, `true`, `false`.
    pub fn is_reserved(self) -> bool {
        self.reserved
    }

    /// True for control keywords that are not expressions, like `while`.
    pub fn is_control(self) -> bool {
        self.control
    }

    /// True for keywords where a following newline triggers automatic
    /// semicolon insertion, like `return`.
    pub fn is_asi(self) -> bool {
        self.asi
    }

    /// True for `class` and `function`, which introduce hoisted names.
    pub fn is_hoist(self) -> bool {
        self.hoist
    }

    /// True for keywords that operate on a value and yield one, like
    /// `typeof`.
    pub fn is_expr(self) -> bool {
        self.expr
    }

    /// True for the declaration keywords `var`, `let`, `const`.
    pub fn is_decl(self) -> bool {
        self.decl
    }

    /// True for `break` and `continue`, which may be followed by a label.
    pub fn is_label(self) -> bool {
        self.label
    }

    /// True when the word has no special meaning at all.
    pub fn is_symbol(self) -> bool {
        !self.reserved
    }
}

/// Looks up every capability of `word` in one pass.
///
/// Stateless and pure; safe to call any number of times. Words outside
/// 2..=10 ASCII lowercase letters can never match, so they short-circuit
/// to an ordinary symbol.
pub fn classify_word(word: &str) -> WordClass {
    // no keyword is <2 ('if' etc) or >10 ('implements') chars, a-z only
    if word.len() < 2 || word.len() > 10 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return WordClass::default();
    }

    let keyword = in_list(KEYWORDS, word);
    WordClass {
        keyword,
        reserved: keyword || in_list(RESERVED_EXTRA, word),
        control: in_list(CONTROL, word),
        asi: in_list(ASI, word),
        hoist: in_list(HOIST, word),
        expr: in_list(EXPR, word),
        decl: in_list(DECL, word),
        label: in_list(LABEL, word),
    }
}

/// Iterates every keyword, in list order.
pub fn keywords() -> impl Iterator<Item = &'static str> {
    KEYWORDS.split_ascii_whitespace()
}

/// Iterates every reserved word: keywords plus `null`, `true`, `false`.
pub fn reserved_words() -> impl Iterator<Item = &'static str> {
    KEYWORDS
        .split_ascii_whitespace()
        .chain(RESERVED_EXTRA.split_ascii_whitespace())
}
