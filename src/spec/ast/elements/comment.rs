//! Comment element
//!
//!     Any line that is not a heading, step, tag, table or teardown marker is a comment. Its text
//!     is kept verbatim so the formatter can hand it back untouched.

use super::super::traits::{AstNode, Visitor};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub line_number: usize,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_number: 0,
        }
    }

    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }
}

impl AstNode for Comment {
    fn node_type(&self) -> &'static str {
        "Comment"
    }

    fn display_label(&self) -> String {
        self.text.trim_end().to_string()
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_comment(self);
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comment({:?})", self.text)
    }
}
