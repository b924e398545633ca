//! AST traits - Common interfaces for uniform node access
//!
//! This module defines the common traits that provide uniform access
//! to AST node information across all node types.

use super::elements::{
    Comment, DataTable, PassthroughBlock, Scenario, Specification, Step, TearDown,
};

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn line_number(&self) -> usize;
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// Visitor trait for traversing the AST
///
/// Implement this trait to walk the AST. Each visit method corresponds to a node type.
/// Default implementations are empty, so you only need to override the methods you care about.
///
/// # Example
///
/// ```ignore
/// struct StepCounter(usize);
///
/// impl Visitor for StepCounter {
///     fn visit_step(&mut self, _step: &Step) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = StepCounter(0);
/// spec.accept(&mut counter);
/// ```
pub trait Visitor {
    fn visit_specification(&mut self, _spec: &Specification) {}
    fn leave_specification(&mut self, _spec: &Specification) {}

    fn visit_scenario(&mut self, _scenario: &Scenario) {}
    fn leave_scenario(&mut self, _scenario: &Scenario) {}

    fn visit_step(&mut self, _step: &Step) {}
    fn leave_step(&mut self, _step: &Step) {}

    fn visit_table(&mut self, _table: &DataTable) {}
    fn visit_passthrough(&mut self, _block: &PassthroughBlock) {}
    fn visit_comment(&mut self, _comment: &Comment) {}

    fn visit_teardown(&mut self, _teardown: &TearDown) {}
    fn leave_teardown(&mut self, _teardown: &TearDown) {}
}
