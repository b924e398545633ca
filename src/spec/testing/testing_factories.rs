//! Token factories
//!
//! Short constructors for the tokens the external lexer would produce, so tests can spell out a
//! token stream line by line:
//!
//! ```rust-example
//! let tokens = vec![
//!     spec_heading("Spec Heading", 1),
//!     scenario("Scenario Heading", 2),
//!     step("Step with inline table", 3),
//!     table_header(["id", "name"]),
//!     table_row(["1", "foo"]),
//! ];
//! ```
//!
//! Table tokens carry no line number; use `.at(n)` when a test checks one.

use crate::spec::token::{Token, TokenKind};

pub fn spec_heading(value: &str, line: usize) -> Token {
    Token::new(TokenKind::Spec, value)
        .at(line)
        .with_line_text(format!("# {}", value))
}

pub fn scenario(value: &str, line: usize) -> Token {
    Token::new(TokenKind::Scenario, value)
        .at(line)
        .with_line_text(format!("## {}", value))
}

/// A step token; `value` is the text after the `* ` marker
pub fn step(value: &str, line: usize) -> Token {
    Token::new(TokenKind::Step, value)
        .at(line)
        .with_line_text(format!("* {}", value))
}

pub fn tags<const N: usize>(names: [&str; N], line: usize) -> Token {
    Token::new(TokenKind::Tag, format!("tags: {}", names.join(", ")))
        .at(line)
        .with_args(names)
}

pub fn table_header<const N: usize>(cells: [&str; N]) -> Token {
    Token::new(TokenKind::TableHeader, "").with_args(cells)
}

pub fn table_row<const N: usize>(cells: [&str; N]) -> Token {
    Token::new(TokenKind::TableRow, "").with_args(cells)
}

/// A table token that keeps its source line, as passthrough rendering needs
pub fn raw_table_line(kind: TokenKind, line_text: &str, line: usize) -> Token {
    let cells: Vec<String> = line_text
        .trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect();
    Token::new(kind, "")
        .at(line)
        .with_line_text(line_text)
        .with_args(cells)
}

pub fn teardown(line: usize) -> Token {
    Token::new(TokenKind::TearDown, "____")
        .at(line)
        .with_line_text("____")
}

pub fn comment(text: &str, line: usize) -> Token {
    Token::new(TokenKind::Comment, text)
        .at(line)
        .with_line_text(text)
}
