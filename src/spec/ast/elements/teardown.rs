//! Teardown block
//!
//!     The teardown is the step sequence run after every scenario of a specification, whatever
//!     their outcome. It starts at a marker line of underscores, which is kept verbatim, and runs
//!     to the end of the file:
//!
//!         ____
//!         * Close the browser

use super::super::traits::{AstNode, Visitor};
use super::comment::Comment;
use super::step::Step;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TearDown {
    pub marker: String,
    pub steps: Vec<Step>,
    /// Comments after the last teardown step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trailing_comments: Vec<Comment>,
    pub line_number: usize,
}

impl TearDown {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            steps: Vec::new(),
            trailing_comments: Vec::new(),
            line_number: 0,
        }
    }

    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }
}

impl AstNode for TearDown {
    fn node_type(&self) -> &'static str {
        "TearDown"
    }

    fn display_label(&self) -> String {
        format!("{} ({} steps)", self.marker, self.steps.len())
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_teardown(self);
        for step in &self.steps {
            step.accept(visitor);
        }
        for comment in &self.trailing_comments {
            comment.accept(visitor);
        }
        visitor.leave_teardown(self);
    }
}
