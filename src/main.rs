// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Comet - a streaming tokenizer for JavaScript-like source
//!
//! This is the main entry point for the comet CLI/REPL.
//!
//! ## Features
//!
//! - Tokenizes files, inline code, or stdin into an annotated table
//! - Interactive shell with syntax highlighting and history
//! - Async file reads with tokio

mod repl;

use clap::Parser;
use comet_lexer::{LexError, Token, TokenKind, classify_word, for_each_token};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "comet",
    about = "Streaming tokenizer for JavaScript-like source text",
    version,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Source file to tokenize
    script: Option<PathBuf>,

    /// Tokenize source given on the command line
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Start the interactive shell
    #[arg(short = 'i', long = "interactive", alias = "repl")]
    interactive: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("comet=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("comet=warn")
            .init();
    }

    // Determine execution mode
    if let Some(code) = cli.eval {
        // Tokenize inline code
        if !tokenize_and_print(&code) {
            std::process::exit(1);
        }
    } else if let Some(script_path) = cli.script {
        // Tokenize a source file
        let source = match tokio::fs::read_to_string(&script_path).await {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {}: {}", "Error".red().bold(), script_path.display(), e);
                std::process::exit(1);
            }
        };
        tracing::debug!("read {} bytes from {}", source.len(), script_path.display());
        if !tokenize_and_print(&source) {
            std::process::exit(1);
        }
    } else if cli.interactive || atty::is(atty::Stream::Stdin) {
        // Start the interactive shell
        tracing::debug!("starting interactive shell");
        repl::Repl::new()?.run()?;
    } else {
        // Read from stdin
        let mut code = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut code)?;
        tracing::debug!("read {} bytes from stdin", code.len());
        if !tokenize_and_print(&code) {
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Tokenizes `source` and prints one row per token: nesting depth, flag
/// bits plus a line-break marker, line number, kind, and the raw text.
/// Comments get rows of their own, in source order.
///
/// Returns false if the scan stopped on an error. Rows produced before
/// the error are still printed, followed by a diagnostic on stderr.
pub(crate) fn tokenize_and_print(source: &str) -> bool {
    let mut depth = 0usize;
    let mut count = 0usize;

    let result = for_each_token(source, |token| {
        if token.kind == TokenKind::Eof {
            return;
        }
        if token.kind.is_open() {
            depth += 1;
        }
        let mark = if token.same_line() { ' ' } else { '*' };
        println!(
            "{}\t{}{}\t{:>4}.{:<9} {}",
            depth,
            token.flags.bits(),
            mark,
            token.line,
            token.kind,
            paint(&token)
        );
        if token.kind.is_close() {
            depth -= 1;
        }
        count += 1;
    });

    match result {
        Ok(()) => {
            eprintln!("{}", format!(">> {} tokens", count).dimmed());
            true
        }
        Err(err) => {
            print_lex_error(source, &err);
            false
        }
    }
}

/// Picks a display color for a token's text, mirroring the shell
/// highlighter.
fn paint(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Word => {
            let class = classify_word(token.text);
            if class.is_keyword() {
                token.text.magenta().bold().to_string()
            } else if class.is_reserved() {
                token.text.blue().to_string()
            } else {
                token.text.to_string()
            }
        }
        TokenKind::String | TokenKind::Regex => token.text.green().to_string(),
        TokenKind::Number => token.text.yellow().to_string(),
        TokenKind::Comment => token.text.dimmed().to_string(),
        kind if kind.is_open() || kind.is_close() => token.text.yellow().to_string(),
        _ => token.text.to_string(),
    }
}

/// Prints a scan error, and when the error carries a position, the
/// offending source line with a caret under the failing column.
pub(crate) fn print_lex_error(source: &str, err: &LexError) {
    eprintln!("{}: {}", "Error".red().bold(), err);

    let (Some(offset), Some(line)) = (err.offset(), err.line()) else {
        return;
    };

    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);

    eprintln!("{} {}", format!("{:>5} |", line).dimmed(), &source[start..end]);
    eprintln!(
        "{} {}{}",
        format!("{:>5} |", "").dimmed(),
        " ".repeat(offset - start),
        "^".red().bold()
    );
}
