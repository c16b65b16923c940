// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interactive shell for exploring comet token streams.

use comet_lexer::{LexError, Lexer, Token, TokenKind, classify_word, words};
use owo_colors::OwoColorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;

/// Shell configuration constants
const HISTORY_FILE: &str = ".comet_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// Shell commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Load,
}

impl ReplCommand {
    /// Parse a shell command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        if !input.starts_with('.') {
            return None;
        }

        let parts: Vec<&str> = input[1..].splitn(2, char::is_whitespace).collect();
        let cmd = parts.first()?.to_lowercase();
        let arg = parts.get(1).copied();

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the shell"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".load <file>", "Tokenize a source file"),
        ]
    }
}

/// Helper struct for rustyline that provides completion, hints, and
/// validation
struct CometHelper {
    /// Reserved words and shell commands for completion
    keywords: Vec<String>,
}

impl CometHelper {
    fn new() -> Self {
        let keywords = words::reserved_words()
            .map(String::from)
            .chain(
                ReplCommand::all_commands()
                    .iter()
                    .map(|&(cmd, _)| cmd.split(' ').next().unwrap_or(cmd).to_string()),
            )
            .collect();

        Self { keywords }
    }
}

/// Byte index where the word ending at `pos` begins. Steps back over
/// word characters and lands past the separator's full UTF-8 sequence,
/// never inside it.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rfind(|&(_, c)| !c.is_alphanumeric() && c != '_' && c != '.')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

impl Completer for CometHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for CometHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        let start = word_start(line, line.len());
        let word = &line[start..];
        if word.len() < 2 {
            return None;
        }

        // Find first matching keyword
        self.keywords
            .iter()
            .find(|kw| kw.starts_with(word) && kw.len() > word.len())
            .map(|kw| kw[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for CometHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        // Basic syntax highlighting
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars();
        let mut current_word = String::new();

        while let Some(c) = chars.next() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                current_word.push(c);
            } else {
                if !current_word.is_empty() {
                    result.push_str(&highlight_word(&current_word));
                    current_word.clear();
                }
                // Color operators and punctuation
                let colored = match c {
                    '(' | ')' | '[' | ']' | '{' | '}' => c.to_string().yellow().to_string(),
                    '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' => {
                        c.to_string().cyan().to_string()
                    }
                    '"' | '\'' | '`' => c.to_string().green().to_string(),
                    '.' if line.starts_with('.') => c.to_string().magenta().to_string(),
                    _ => c.to_string(),
                };
                result.push_str(&colored);
            }
        }

        if !current_word.is_empty() {
            result.push_str(&highlight_word(&current_word));
        }

        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn highlight_word(word: &str) -> String {
    let class = classify_word(word);

    if class.is_keyword() {
        word.magenta().bold().to_string()
    } else if class.is_reserved() {
        word.blue().to_string()
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        word.yellow().to_string()
    } else {
        word.to_string()
    }
}

impl Validator for CometHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if is_complete(ctx.input()) {
            Ok(ValidationResult::Valid(None))
        } else {
            Ok(ValidationResult::Incomplete)
        }
    }
}

/// Decides whether `input` reads as a finished statement or the start of
/// a longer one, by running the scanner over it. Open nesting that
/// reaches the end of input holds the prompt for more lines, as does a
/// trailing operator or an unclosed string literal.
///
/// Scan errors before the end of input count as complete; evaluation
/// surfaces them with a proper diagnostic.
fn is_complete(input: &str) -> bool {
    let mut lexer = match Lexer::new(input) {
        Ok(lexer) => lexer,
        Err(err) => return !open_at_end(&err, input),
    };

    let mut last: Option<Token<'_>> = None;
    let mut has_value = false;
    loop {
        let token = match lexer.next(has_value) {
            Ok(token) => token,
            Err(err) => return !open_at_end(&err, input),
        };
        if token.kind == TokenKind::Eof {
            break;
        }
        has_value = token.ends_value();
        last = Some(token);
    }

    let Some(last) = last else {
        return true;
    };

    match last.kind {
        TokenKind::Op
        | TokenKind::Arrow
        | TokenKind::Comma
        | TokenKind::Dot
        | TokenKind::Spread
        | TokenKind::Ternary => false,
        TokenKind::String => string_is_closed(last.text),
        _ => true,
    }
}

/// True for the unbalanced-nesting error reported at end of input, the
/// one scan error more lines can still fix.
fn open_at_end(err: &LexError, input: &str) -> bool {
    matches!(err, LexError::Unbalanced { offset, .. } if *offset == input.len())
}

/// Whether a quoted string token ends with its own closing delimiter.
/// The scanner clamps unterminated literals at end of input rather than
/// erroring, so closedness has to be read back off the token text.
/// Template tail fragments do not start with a quote and are left alone.
fn string_is_closed(text: &str) -> bool {
    let bytes = text.as_bytes();
    let delim = match bytes.first() {
        Some(&b'"') | Some(&b'\'') | Some(&b'`') => bytes[0],
        _ => return true,
    };

    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == delim => return true,
            _ => i += 1,
        }
    }
    false
}

impl Helper for CometHelper {}

/// The interactive token-stream explorer
pub struct Repl {
    editor: Editor<CometHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new shell instance
    pub fn new() -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CometHelper::new()));

        // Determine history file path
        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("comet")
            .join(HISTORY_FILE);

        // Create parent directory if it doesn't exist
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Load history
        let _ = editor.load_history(&history_path);

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Run the shell main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = self.format_prompt(false);

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    // Check for shell commands
                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    // Tokenize the input
                    self.eval_and_print(trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        // Save history
        let _ = self.editor.save_history(&self.history_path);

        self.print_goodbye();
        Ok(())
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!(
            "{}",
            r#"    ____                     _   "#.bright_cyan().bold()
        );
        println!(
            "{}",
            r#"   / ___|___  _ __ ___   ___| |_ "#.bright_cyan().bold()
        );
        println!(
            "{}",
            r#"  | |   / _ \| '_ ` _ \ / _ \ __|"#.bright_cyan().bold()
        );
        println!(
            "{}",
            r#"  | |__| (_) | | | | | |  __/ |_ "#.bright_cyan().bold()
        );
        println!(
            "{}",
            r#"   \____\___/|_| |_| |_|\___|\__|"#.bright_cyan().bold()
        );
        println!();
        println!(
            "  {} {} {}",
            "Comet Tokenizer".white().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!(
            "  {}",
            "A streaming tokenizer for JavaScript-like source".dimmed()
        );
        println!();
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn print_goodbye(&self) {
        println!();
        println!("{}", "Goodbye! 👋".bright_cyan());
        println!();
    }

    fn format_prompt(&self, multiline: bool) -> String {
        if multiline {
            format!("{} ", "...".dimmed())
        } else {
            format!("{} ", "comet>".bright_green().bold())
        }
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => {
                self.print_help();
                CommandResult::Continue
            }
            ReplCommand::Exit => CommandResult::Exit,
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[H");
                CommandResult::Continue
            }
            ReplCommand::Version => {
                self.print_version();
                CommandResult::Continue
            }
            ReplCommand::Load => {
                if let Some(path) = arg {
                    self.load_file(path);
                } else {
                    eprintln!(
                        "{}: {} {}",
                        "Error".red().bold(),
                        ".load".cyan(),
                        "requires a file path".dimmed()
                    );
                }
                CommandResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Shell Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }

        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!(
            "  {:16} {}",
            "Ctrl+C".yellow(),
            "Cancel current input".dimmed()
        );
        println!("  {:16} {}", "Ctrl+D".yellow(), "Exit shell".dimmed());
        println!("  {:16} {}", "Ctrl+L".yellow(), "Clear screen".dimmed());
        println!("  {:16} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!("  {:16} {}", "↑/↓".yellow(), "Navigate history".dimmed());
        println!();
    }

    fn print_version(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!();
        println!("{}: {}", "Comet".bright_cyan().bold(), version.yellow());
        println!("{}: {}", "License".dimmed(), env!("CARGO_PKG_LICENSE"));
        println!();
    }

    fn load_file(&self, path: &str) {
        let path = std::path::Path::new(path.trim());

        match std::fs::read_to_string(path) {
            Ok(source) => {
                crate::tokenize_and_print(&source);
            }
            Err(e) => {
                eprintln!("{}: {}: {}", "Error".red().bold(), path.display(), e);
            }
        }
    }

    fn eval_and_print(&self, input: &str) {
        crate::tokenize_and_print(input);
    }
}

/// Result of executing a shell command
enum CommandResult {
    Continue,
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(
            ReplCommand::parse(".help"),
            Some((ReplCommand::Help, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".exit"),
            Some((ReplCommand::Exit, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".load test.js"),
            Some((ReplCommand::Load, Some("test.js")))
        ));
        assert!(ReplCommand::parse("not a command").is_none());
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete("(1 + 2)"));
        assert!(is_complete("let a = { b: 1 };"));
        assert!(is_complete("function f() { return 1; }"));
        assert!(is_complete("'string with (unbalanced'"));
        assert!(is_complete("`closed ${a} template`"));

        assert!(!is_complete("(1 + 2"));
        assert!(!is_complete("let a = { b: 1"));
        assert!(!is_complete("1 +"));
        assert!(!is_complete("a ?"));
        assert!(!is_complete("f(a,"));
        assert!(!is_complete("`template"));
    }

    #[test]
    fn test_bad_input_is_complete() {
        // Mismatched closes and stray bytes never resolve with more
        // lines, so they pass through for a diagnostic instead.
        assert!(is_complete("foo)"));
        assert!(is_complete("\u{1}"));
    }

    #[test]
    fn test_string_is_closed() {
        assert!(string_is_closed("'done'"));
        assert!(string_is_closed("\"\""));
        assert!(string_is_closed("'it\\'s'"));
        assert!(string_is_closed("tail`"));

        assert!(!string_is_closed("'open"));
        assert!(!string_is_closed("`"));
        assert!(!string_is_closed("'trailing\\'"));
    }

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("let x", 5), 4);
        assert_eq!(word_start(".he", 3), 0);
        assert_eq!(word_start("a+b", 3), 2);
        // a multibyte separator must not split mid-sequence
        let line = "€ret";
        assert_eq!(word_start(line, line.len()), '€'.len_utf8());
        assert_eq!(&line[word_start(line, line.len())..], "ret");
    }
}
