//! Specification element
//!
//!     The specification is the root node built from one spec file:
//!
//!         Spec Heading
//!         ============
//!         tags: login, fast
//!              |user |
//!              |-----|
//!              |alice|
//!         * A context step, run before every scenario
//!         Scenario Heading
//!         ----------------
//!         * Example step
//!         ____
//!         * A teardown step
//!
//!     There is at most one heading. The optional data table bound to the specification is kept
//!     in `items` at the position it was written (see [Specification::data_table]).
//!
//!     Comments written above the heading are kept in `leading_comments` so re-rendering puts
//!     them back above it.

use super::super::traits::{AstNode, Visitor};
use super::comment::Comment;
use super::content_item::SpecItem;
use super::scenario::Scenario;
use super::step::Step;
use super::table::DataTable;
use super::teardown::TearDown;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Specification {
    pub heading: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<Comment>,
    pub items: Vec<SpecItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teardown: Option<TearDown>,
    pub line_number: usize,
}

impl Specification {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_items(mut self, items: Vec<SpecItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_teardown(mut self, teardown: TearDown) -> Self {
        self.teardown = Some(teardown);
        self
    }

    /// The data table bound to the whole specification, if any
    pub fn data_table(&self) -> Option<&DataTable> {
        self.items.iter().find_map(|item| match item {
            SpecItem::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn iter_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.items.iter().filter_map(SpecItem::as_scenario)
    }

    /// Steps written directly under the specification, outside any scenario
    pub fn iter_context_steps(&self) -> impl Iterator<Item = &Step> {
        self.items.iter().filter_map(SpecItem::as_step)
    }

    pub fn teardown_steps(&self) -> &[Step] {
        self.teardown
            .as_ref()
            .map(|teardown| teardown.steps.as_slice())
            .unwrap_or(&[])
    }

    /// Every step in document order: context steps, scenario steps, then teardown steps
    pub fn iter_all_steps(&self) -> impl Iterator<Item = &Step> {
        self.items
            .iter()
            .flat_map(item_steps)
            .chain(self.teardown_steps().iter())
    }

    pub fn last_scenario_mut(&mut self) -> Option<&mut Scenario> {
        self.items.iter_mut().rev().find_map(|item| match item {
            SpecItem::Scenario(scenario) => Some(scenario),
            _ => None,
        })
    }
}

fn item_steps(item: &SpecItem) -> Vec<&Step> {
    match item {
        SpecItem::Step(step) => vec![step],
        SpecItem::Scenario(scenario) => scenario.iter_steps().collect(),
        _ => Vec::new(),
    }
}

impl AstNode for Specification {
    fn node_type(&self) -> &'static str {
        "Specification"
    }

    fn display_label(&self) -> String {
        self.heading.clone()
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_specification(self);
        for comment in &self.leading_comments {
            comment.accept(visitor);
        }
        for item in &self.items {
            item.accept(visitor);
        }
        if let Some(teardown) = &self.teardown {
            teardown.accept(visitor);
        }
        visitor.leave_specification(self);
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Specification('{}', {} items)",
            self.heading,
            self.items.len()
        )
    }
}
