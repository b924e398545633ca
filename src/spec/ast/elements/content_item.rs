//! Content items
//!
//! `SpecItem` and `ScenarioItem` are the wrappers for everything that can appear in a
//! specification body and a scenario body respectively. A scenario item has no scenario
//! variant, so scenarios cannot nest.

use super::super::traits::{AstNode, Visitor};
use super::comment::Comment;
use super::scenario::Scenario;
use super::step::Step;
use super::table::{DataTable, PassthroughBlock};
use serde::Serialize;

/// Anything that can appear directly under a specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SpecItem {
    Scenario(Scenario),
    Step(Step),
    Comment(Comment),
    Table(DataTable),
    Passthrough(PassthroughBlock),
}

/// Anything that can appear inside a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ScenarioItem {
    Step(Step),
    Comment(Comment),
    Table(DataTable),
    Passthrough(PassthroughBlock),
}

impl SpecItem {
    pub fn as_scenario(&self) -> Option<&Scenario> {
        match self {
            SpecItem::Scenario(scenario) => Some(scenario),
            _ => None,
        }
    }

    pub fn as_step(&self) -> Option<&Step> {
        match self {
            SpecItem::Step(step) => Some(step),
            _ => None,
        }
    }

    fn node(&self) -> &dyn AstNode {
        match self {
            SpecItem::Scenario(scenario) => scenario,
            SpecItem::Step(step) => step,
            SpecItem::Comment(comment) => comment,
            SpecItem::Table(table) => table,
            SpecItem::Passthrough(block) => block,
        }
    }
}

impl ScenarioItem {
    pub fn as_step(&self) -> Option<&Step> {
        match self {
            ScenarioItem::Step(step) => Some(step),
            _ => None,
        }
    }

    fn node(&self) -> &dyn AstNode {
        match self {
            ScenarioItem::Step(step) => step,
            ScenarioItem::Comment(comment) => comment,
            ScenarioItem::Table(table) => table,
            ScenarioItem::Passthrough(block) => block,
        }
    }
}

impl AstNode for SpecItem {
    fn node_type(&self) -> &'static str {
        self.node().node_type()
    }

    fn display_label(&self) -> String {
        self.node().display_label()
    }

    fn line_number(&self) -> usize {
        self.node().line_number()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        self.node().accept(visitor)
    }
}

impl AstNode for ScenarioItem {
    fn node_type(&self) -> &'static str {
        self.node().node_type()
    }

    fn display_label(&self) -> String {
        self.node().display_label()
    }

    fn line_number(&self) -> usize {
        self.node().line_number()
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        self.node().accept(visitor)
    }
}

impl From<ScenarioItem> for SpecItem {
    fn from(item: ScenarioItem) -> Self {
        match item {
            ScenarioItem::Step(step) => SpecItem::Step(step),
            ScenarioItem::Comment(comment) => SpecItem::Comment(comment),
            ScenarioItem::Table(table) => SpecItem::Table(table),
            ScenarioItem::Passthrough(block) => SpecItem::Passthrough(block),
        }
    }
}

impl TryFrom<SpecItem> for ScenarioItem {
    type Error = Scenario;

    /// Fails with the scenario itself when the item is a scenario
    fn try_from(item: SpecItem) -> Result<Self, Self::Error> {
        match item {
            SpecItem::Scenario(scenario) => Err(scenario),
            SpecItem::Step(step) => Ok(ScenarioItem::Step(step)),
            SpecItem::Comment(comment) => Ok(ScenarioItem::Comment(comment)),
            SpecItem::Table(table) => Ok(ScenarioItem::Table(table)),
            SpecItem::Passthrough(block) => Ok(ScenarioItem::Passthrough(block)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_does_not_convert_into_scenario_item() {
        let item = SpecItem::Scenario(Scenario::new("Nested"));
        assert!(ScenarioItem::try_from(item).is_err());

        let step = SpecItem::Step(Step::new("a step"));
        assert!(matches!(
            ScenarioItem::try_from(step),
            Ok(ScenarioItem::Step(_))
        ));
    }

    #[test]
    fn test_node_type_delegates() {
        assert_eq!(SpecItem::Comment(Comment::new("x")).node_type(), "Comment");
        assert_eq!(
            ScenarioItem::Passthrough(PassthroughBlock::new(1)).node_type(),
            "Passthrough"
        );
    }
}
