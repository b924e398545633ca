//! Step Text Extraction
//!
//! Splits a step value as written by the author into the literal step text, with every argument
//! replaced by a `{}` placeholder, and the ordered arguments.
//!
//! Handles quoted (static) and angle-bracketed (dynamic / special) arguments. Inside either
//! delimiter `\"` is a literal quote, so `"say \"hi\""` is the static value `say "hi"`. This
//! undoes the escaping the formatter applies. Any other backslash is kept as written.

use crate::spec::ast::{Argument, PLACEHOLDER};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `<file:...>` and `<table:...>` prefixes, spaces around the kind allowed
static SPECIAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(file|table)\s*:").expect("special prefix pattern is valid"));

/// Extracted data for a step line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTextData {
    /// Literal text with `{}` in place of every argument
    pub text: String,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepTextError {
    /// An opening `"` or `<` was never closed
    #[error("Argument opened with '{delimiter}' at column {column} is not closed with '{}'", closing(*.delimiter))]
    Unterminated { delimiter: char, column: usize },
}

fn closing(delimiter: char) -> char {
    if delimiter == '<' {
        '>'
    } else {
        '"'
    }
}

enum Scan {
    Literal,
    Static { start: usize },
    Dynamic { start: usize },
}

/// Parse a raw step value into text and arguments.
pub fn extract_step_text(value: &str) -> Result<StepTextData, StepTextError> {
    let mut text = String::with_capacity(value.len());
    let mut args = Vec::new();
    let mut buffer = String::new();
    let mut state = Scan::Literal;
    let mut chars = value.chars().enumerate().peekable();

    while let Some((column, ch)) = chars.next() {
        match state {
            Scan::Literal => match ch {
                '"' => state = Scan::Static { start: column },
                '<' => state = Scan::Dynamic { start: column },
                _ => text.push(ch),
            },
            Scan::Static { .. } | Scan::Dynamic { .. } if ch == '\\' => {
                if let Some((_, '"')) = chars.peek() {
                    chars.next();
                    buffer.push('"');
                } else {
                    buffer.push('\\');
                }
            }
            Scan::Static { .. } => {
                if ch == '"' {
                    args.push(Argument::static_value(std::mem::take(&mut buffer)));
                    text.push_str(PLACEHOLDER);
                    state = Scan::Literal;
                } else {
                    buffer.push(ch);
                }
            }
            Scan::Dynamic { .. } => {
                if ch == '>' {
                    args.push(classify_angle_argument(std::mem::take(&mut buffer)));
                    text.push_str(PLACEHOLDER);
                    state = Scan::Literal;
                } else {
                    buffer.push(ch);
                }
            }
        }
    }

    match state {
        Scan::Literal => Ok(StepTextData { text, args }),
        Scan::Static { start } => Err(StepTextError::Unterminated {
            delimiter: '"',
            column: start + 1,
        }),
        Scan::Dynamic { start } => Err(StepTextError::Unterminated {
            delimiter: '<',
            column: start + 1,
        }),
    }
}

fn classify_angle_argument(content: String) -> Argument {
    let kind = SPECIAL_PREFIX
        .captures(&content)
        .and_then(|captures| captures.get(1))
        .map(|kind| kind.as_str() == "file");
    match kind {
        Some(true) => Argument::special_string(content),
        Some(false) => Argument::special_table(content),
        None => Argument::dynamic(content),
    }
}
