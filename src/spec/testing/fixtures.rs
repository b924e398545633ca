//! Line classifier for canonical text
//!
//! The real lexer lives outside this crate. Round-trip tests still need to read formatted output
//! back into tokens, so this module classifies the lines of canonical text the same way:
//!
//! ```text
//! Heading + ===== underline   -> Spec
//! Heading + ----- underline   -> Scenario
//! # Heading / ## Heading      -> Spec / Scenario
//! * step                      -> Step (trailing spaces dropped)
//! tags: a, b                  -> Tag
//! |a|b|                       -> TableHeader, then TableRow (|---| separators skipped)
//! ___                         -> TearDown
//! anything else               -> Comment
//! ```
//!
//! Blank lines produce no token.

use crate::spec::token::{Token, TokenKind};

/// Classify every line of `text`
pub fn tokenize(text: &str) -> Vec<Token> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tokens = Vec::new();
    let mut in_table = false;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let line_number = index + 1;
        let trimmed = line.trim();
        index += 1;

        if trimmed.is_empty() {
            in_table = false;
            continue;
        }

        if trimmed.starts_with('|') {
            if is_separator(trimmed) {
                continue;
            }
            let kind = if in_table {
                TokenKind::TableRow
            } else {
                TokenKind::TableHeader
            };
            in_table = true;
            tokens.push(
                Token::new(kind, "")
                    .at(line_number)
                    .with_line_text(line)
                    .with_args(table_cells(trimmed)),
            );
            continue;
        }
        in_table = false;

        if let Some(kind) = lines.get(index).and_then(|next| underline_kind(next)) {
            index += 1;
            tokens.push(Token::new(kind, trimmed).at(line_number).with_line_text(line));
            continue;
        }

        let token = if let Some(heading) = trimmed.strip_prefix("## ") {
            Token::new(TokenKind::Scenario, heading.trim())
        } else if let Some(heading) = trimmed.strip_prefix("# ") {
            Token::new(TokenKind::Spec, heading.trim())
        } else if let Some(value) = trimmed.strip_prefix('*') {
            Token::new(TokenKind::Step, value.trim())
        } else if let Some(list) = trimmed.strip_prefix("tags:") {
            Token::new(TokenKind::Tag, trimmed).with_args(
                list.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty()),
            )
        } else if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '_') {
            Token::new(TokenKind::TearDown, trimmed)
        } else {
            Token::new(TokenKind::Comment, line)
        };
        tokens.push(token.at(line_number).with_line_text(line));
    }
    tokens
}

fn underline_kind(line: &str) -> Option<TokenKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c == '=') {
        Some(TokenKind::Spec)
    } else if trimmed.chars().all(|c| c == '-') {
        Some(TokenKind::Scenario)
    } else {
        None
    }
}

fn is_separator(line: &str) -> bool {
    let inner = line.trim_matches('|');
    !inner.is_empty() && inner.chars().all(|c| c == '-' || c == '|' || c == ' ')
}

fn table_cells(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_canonical_text() {
        let tokens = tokenize(
            "Spec\n====\ntags: a, b\nScenario\n--------\n* step \"x\" \n     |id|\n     |--|\n     |1 |\n____\n* cleanup\nnote\n",
        );
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Spec,
                TokenKind::Tag,
                TokenKind::Scenario,
                TokenKind::Step,
                TokenKind::TableHeader,
                TokenKind::TableRow,
                TokenKind::TearDown,
                TokenKind::Step,
                TokenKind::Comment,
            ]
        );
        assert_eq!(tokens[1].args, vec!["a", "b"]);
        assert_eq!(tokens[3].value, "step \"x\"");
        assert_eq!(tokens[5].args, vec!["1"]);
        assert_eq!(tokens[5].line_number, 9);
    }

    #[test]
    fn test_hash_headings() {
        let tokens = tokenize("# Spec\n## Scenario\n");
        assert_eq!(tokens[0].kind, TokenKind::Spec);
        assert_eq!(tokens[0].value, "Spec");
        assert_eq!(tokens[1].kind, TokenKind::Scenario);
    }
}
