//! Step element
//!
//!     A step is a single executable instruction. Its `text` is the literal step text with every
//!     argument replaced by a [PLACEHOLDER], and `args` holds those arguments left to right:
//!
//!         * Login as "admin" with <password>
//!
//!     becomes text `Login as {} with {}` with a Static and a Dynamic argument.
//!
//! Concepts
//!
//!     The same type models both sides of a concept (macro):
//!
//!         - the definition: `is_concept` set, `concept_steps` holds the body
//!         - an invocation: `is_concept` set, `concept_bindings` pairs every argument with the
//!           definition parameter at the same position. The body is not copied in; expanding it
//!           is up to whoever executes the specification.
//!
//!     Comments directly above a step belong to it (`leading_comments`) so they travel with the
//!     step when it is rendered.

use super::super::traits::{AstNode, Visitor};
use super::argument::Argument;
use super::comment::Comment;
use super::table::DataTable;
use serde::Serialize;
use std::fmt;

/// Marks the position of an argument in a step's text
pub const PLACEHOLDER: &str = "{}";

/// A concept invocation argument paired with the parameter it fills
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptBinding {
    pub parameter: String,
    pub argument: Argument,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Step {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_table: Option<DataTable>,
    pub is_concept: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concept_steps: Vec<Step>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub concept_bindings: Vec<ConceptBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<Comment>,
    pub line_number: usize,
    #[serde(skip)]
    pub line_text: String,
}

impl Step {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Preferred builder: `at(line_number)`
    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.args = args;
        self
    }

    pub fn with_line_text(mut self, line_text: impl Into<String>) -> Self {
        self.line_text = line_text.into();
        self
    }

    pub fn with_inline_table(mut self, table: DataTable) -> Self {
        self.inline_table = Some(table);
        self
    }

    pub fn with_leading_comments(mut self, comments: Vec<Comment>) -> Self {
        self.leading_comments = comments;
        self
    }

    /// Turn this step into a concept definition with the given body
    pub fn as_concept(mut self, body: Vec<Step>) -> Self {
        self.is_concept = true;
        self.concept_steps = body;
        self
    }

    pub fn placeholder_count(&self) -> usize {
        self.text.matches(PLACEHOLDER).count()
    }

    /// Names a concept definition declares, in order (the values of its dynamic arguments)
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(Argument::text)
    }

    pub fn binding(&self, parameter: &str) -> Option<&Argument> {
        self.concept_bindings
            .iter()
            .find(|binding| binding.parameter == parameter)
            .map(|binding| &binding.argument)
    }
}

impl AstNode for Step {
    fn node_type(&self) -> &'static str {
        if self.is_concept {
            "Concept"
        } else {
            "Step"
        }
    }

    fn display_label(&self) -> String {
        let mut label = self.text.clone();
        for arg in &self.args {
            if let Some(position) = label.find(PLACEHOLDER) {
                label.replace_range(position..position + PLACEHOLDER.len(), &arg.to_string());
            }
        }
        label
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_step(self);
        for step in &self.concept_steps {
            step.accept(visitor);
        }
        if let Some(table) = &self.inline_table {
            table.accept(visitor);
        }
        visitor.leave_step(self);
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step('{}', {} args)", self.text, self.args.len())
    }
}
