//! Scenario element
//!
//!     A scenario is a named group of steps inside a specification:
//!
//!         Scenario Heading
//!         ----------------
//!         tags: smoke
//!         * Example step
//!
//!     Tags, when present, come right after the heading. Scenarios never nest and never own a
//!     teardown: steps after the teardown marker always belong to the specification.

use super::super::traits::{AstNode, Visitor};
use super::content_item::ScenarioItem;
use super::step::Step;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub heading: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub items: Vec<ScenarioItem>,
    pub line_number: usize,
}

impl Scenario {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            tags: Vec::new(),
            items: Vec::new(),
            line_number: 0,
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

    pub fn with_items(mut self, items: Vec<ScenarioItem>) -> Self {
        self.items = items;
        self
    }

    pub fn iter_steps(&self) -> impl Iterator<Item = &Step> {
        self.items.iter().filter_map(ScenarioItem::as_step)
    }

    pub fn last_step_mut(&mut self) -> Option<&mut Step> {
        match self.items.last_mut() {
            Some(ScenarioItem::Step(step)) => Some(step),
            _ => None,
        }
    }
}

impl AstNode for Scenario {
    fn node_type(&self) -> &'static str {
        "Scenario"
    }

    fn display_label(&self) -> String {
        self.heading.clone()
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_scenario(self);
        for item in &self.items {
            item.accept(visitor);
        }
        visitor.leave_scenario(self);
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scenario('{}', {} items)",
            self.heading,
            self.items.len()
        )
    }
}
