//! Treeviz formatter
//!
//! One line per node, indented two spaces per nesting level, so a specification can be scanned
//! at a glance:
//!
//! ```text
//! ⧉ Checkout
//!   ☰ |item|price| (2 rows)
//!   § Pay by card
//!     • enter card "4111"
//!     ≔ login as <user>
//!   ⊥ ____ (1 steps)
//!     • clean up
//! ```
//!
//! Labels are truncated to 30 characters.
//!
//! Icons
//!     Specification: ⧉
//!     Scenario: §
//!     Step: •
//!     Concept invocation: ≔
//!     DataTable: ☰
//!     Passthrough: ℣
//!     Comment: "
//!     TearDown: ⊥

use super::registry::{FormatError, Formatter};
use crate::spec::ast::{
    AstNode, Comment, DataTable, PassthroughBlock, Scenario, Specification, Step, TearDown,
    Visitor,
};

const MAX_LABEL_CHARS: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node_type: &str) -> &'static str {
    match node_type {
        "Specification" => "⧉",
        "Scenario" => "§",
        "Concept" => "≔",
        "DataTable" => "☰",
        "Passthrough" => "℣",
        "Comment" => "\"",
        "TearDown" => "⊥",
        _ => "•",
    }
}

struct TreevizVisitor {
    out: String,
    depth: usize,
}

impl TreevizVisitor {
    fn line(&mut self, node: &dyn AstNode) {
        let label = node.display_label();
        let label = truncate(label.lines().next().unwrap_or(""), MAX_LABEL_CHARS);
        self.out.push_str(&"  ".repeat(self.depth));
        self.out.push_str(icon(node.node_type()));
        self.out.push(' ');
        self.out.push_str(&label);
        self.out.push('\n');
    }

    fn open(&mut self, node: &dyn AstNode) {
        self.line(node);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Visitor for TreevizVisitor {
    fn visit_specification(&mut self, spec: &Specification) {
        self.open(spec);
    }
    fn leave_specification(&mut self, _spec: &Specification) {
        self.close();
    }

    fn visit_scenario(&mut self, scenario: &Scenario) {
        self.open(scenario);
    }
    fn leave_scenario(&mut self, _scenario: &Scenario) {
        self.close();
    }

    fn visit_step(&mut self, step: &Step) {
        self.open(step);
    }
    fn leave_step(&mut self, _step: &Step) {
        self.close();
    }

    fn visit_table(&mut self, table: &DataTable) {
        self.line(table);
    }
    fn visit_passthrough(&mut self, block: &PassthroughBlock) {
        self.line(block);
    }
    fn visit_comment(&mut self, comment: &Comment) {
        self.line(comment);
    }

    fn visit_teardown(&mut self, teardown: &TearDown) {
        self.open(teardown);
    }
    fn leave_teardown(&mut self, _teardown: &TearDown) {
        self.close();
    }
}

pub fn to_treeviz_str(spec: &Specification) -> String {
    let mut visitor = TreevizVisitor {
        out: String::new(),
        depth: 0,
    };
    spec.accept(&mut visitor);
    visitor.out
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, spec: &Specification) -> Result<String, FormatError> {
        Ok(to_treeviz_str(spec))
    }

    fn description(&self) -> &str {
        "One line per node tree view"
    }
}
