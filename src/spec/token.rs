//! Line tokens handed over by the external lexer
//!
//!     The lexer that turns raw characters into tokens lives outside this crate. Its contract is
//!     simple: every meaningful source line becomes exactly one [Token], classified into a
//!     [TokenKind], carrying its trimmed value, its 1-based line number and the untouched source
//!     line. Table lines and tag lines additionally carry their cells / tag names in `args`.
//!
//! Token Kinds
//!
//!         - Spec: `# Heading` or a heading underlined with `=`
//!         - Scenario: `## Heading` or a heading underlined with `-`
//!         - Step: `* step text`, value is the text after the marker
//!         - Tag: `tags: a, b`, args hold the tag names
//!         - TableHeader / TableRow: `|a|b|`, args hold the trimmed cells
//!         - TearDown: a line of three or more `_`, value is the line itself
//!         - Comment: any other line, value is the line itself
//!
//!     Blank lines are not tokens. Tokens are serde-serializable so that a lexer in another
//!     process can hand them over as JSON; every field except `kind` defaults when missing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classification of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Spec,
    Scenario,
    Step,
    Tag,
    TableHeader,
    TableRow,
    TearDown,
    Comment,
}

impl TokenKind {
    pub fn is_table(&self) -> bool {
        matches!(self, TokenKind::TableHeader | TokenKind::TableRow)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Spec => "Spec",
            TokenKind::Scenario => "Scenario",
            TokenKind::Step => "Step",
            TokenKind::Tag => "Tag",
            TokenKind::TableHeader => "TableHeader",
            TokenKind::TableRow => "TableRow",
            TokenKind::TearDown => "TearDown",
            TokenKind::Comment => "Comment",
        };
        write!(f, "{}", name)
    }
}

/// A single classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub line_number: usize,
    /// The source line exactly as written, used for passthrough rendering
    #[serde(default)]
    pub line_text: String,
    /// Table cells or tag names
    #[serde(default)]
    pub args: Vec<String>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            line_number: 0,
            line_text: String::new(),
            args: Vec::new(),
        }
    }

    /// Preferred builder: `at(line_number)`
    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_line_text(mut self, line_text: impl Into<String>) -> Self {
        self.line_text = line_text.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}({:?}) @{}", self.kind, self.value, self.line_number)
        } else {
            write!(
                f,
                "{}({:?}, [{}]) @{}",
                self.kind,
                self.value,
                self.args.join(", "),
                self.line_number
            )
        }
    }
}
