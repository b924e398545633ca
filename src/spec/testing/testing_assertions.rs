//! Fluent assertion API for specification trees

use crate::spec::ast::{
    ArgumentKind, AstNode, Comment, DataTable, PassthroughBlock, Scenario, ScenarioItem, SpecItem,
    Specification, Step, TearDown,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a specification
pub fn assert_spec(spec: &Specification) -> SpecAssertion<'_> {
    SpecAssertion { spec }
}

fn summarize<'a>(nodes: impl Iterator<Item = &'a dyn AstNode>) -> String {
    nodes
        .map(|node| node.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Specification Assertions
// ============================================================================

pub struct SpecAssertion<'a> {
    spec: &'a Specification,
}

impl<'a> SpecAssertion<'a> {
    pub fn heading(self, expected: &str) -> Self {
        assert_eq!(self.spec.heading, expected, "specification heading");
        self
    }

    pub fn tags(self, expected: &[&str]) -> Self {
        assert_eq!(self.spec.tags, expected, "specification tags");
        self
    }

    pub fn leading_comment_count(self, expected: usize) -> Self {
        assert_eq!(
            self.spec.leading_comments.len(),
            expected,
            "specification leading comments"
        );
        self
    }

    /// Assert the number of items in the specification
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.spec.items.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {} items: [{}]",
            expected,
            actual,
            summarize(self.spec.items.iter().map(|item| item as &dyn AstNode))
        );
        self
    }

    /// Assert on a specific item by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ItemAssertion<'a>),
    {
        assert!(
            index < self.spec.items.len(),
            "Item index {} out of bounds (specification has {} items)",
            index,
            self.spec.items.len()
        );
        assertion(ItemAssertion {
            item: ItemRef::Spec(&self.spec.items[index]),
            context: format!("items[{}]", index),
        });
        self
    }

    /// Assert on the n-th scenario, skipping other items
    pub fn scenario<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ScenarioAssertion<'a>),
    {
        let scenario = self
            .spec
            .iter_scenarios()
            .nth(index)
            .unwrap_or_else(|| panic!("scenario {} not found", index));
        assertion(ScenarioAssertion {
            scenario,
            context: format!("scenarios[{}]", index),
        });
        self
    }

    pub fn data_table<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TableAssertion<'a>),
    {
        let table = self
            .spec
            .data_table()
            .unwrap_or_else(|| panic!("Expected a specification data table, found none"));
        assertion(TableAssertion {
            table,
            context: "data_table".to_string(),
        });
        self
    }

    pub fn no_teardown(self) -> Self {
        assert!(
            self.spec.teardown.is_none(),
            "Expected no teardown, found {:?}",
            self.spec.teardown
        );
        self
    }

    pub fn teardown<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TearDownAssertion<'a>),
    {
        let teardown = self
            .spec
            .teardown
            .as_ref()
            .unwrap_or_else(|| panic!("Expected a teardown, found none"));
        assertion(TearDownAssertion { teardown });
        self
    }
}

// ============================================================================
// Item Assertions
// ============================================================================

#[derive(Clone, Copy)]
enum ItemRef<'a> {
    Spec(&'a SpecItem),
    Scenario(&'a ScenarioItem),
}

impl<'a> ItemRef<'a> {
    fn node_type(self) -> &'static str {
        match self {
            ItemRef::Spec(item) => item.node_type(),
            ItemRef::Scenario(item) => item.node_type(),
        }
    }

    fn step(self) -> Option<&'a Step> {
        match self {
            ItemRef::Spec(SpecItem::Step(step)) | ItemRef::Scenario(ScenarioItem::Step(step)) => {
                Some(step)
            }
            _ => None,
        }
    }

    fn comment(self) -> Option<&'a Comment> {
        match self {
            ItemRef::Spec(SpecItem::Comment(c)) | ItemRef::Scenario(ScenarioItem::Comment(c)) => {
                Some(c)
            }
            _ => None,
        }
    }

    fn table(self) -> Option<&'a DataTable> {
        match self {
            ItemRef::Spec(SpecItem::Table(t)) | ItemRef::Scenario(ScenarioItem::Table(t)) => {
                Some(t)
            }
            _ => None,
        }
    }

    fn passthrough(self) -> Option<&'a PassthroughBlock> {
        match self {
            ItemRef::Spec(SpecItem::Passthrough(b))
            | ItemRef::Scenario(ScenarioItem::Passthrough(b)) => Some(b),
            _ => None,
        }
    }
}

pub struct ItemAssertion<'a> {
    item: ItemRef<'a>,
    context: String,
}

impl<'a> ItemAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.item.node_type()
        )
    }

    pub fn assert_scenario(self) -> ScenarioAssertion<'a> {
        match self.item {
            ItemRef::Spec(SpecItem::Scenario(scenario)) => ScenarioAssertion {
                scenario,
                context: self.context,
            },
            _ => self.mismatch("Scenario"),
        }
    }

    /// Also matches concept invocations
    pub fn assert_step(self) -> StepAssertion<'a> {
        match self.item.step() {
            Some(step) => StepAssertion {
                step,
                context: self.context,
            },
            None => self.mismatch("Step"),
        }
    }

    pub fn assert_comment(self) -> CommentAssertion<'a> {
        match self.item.comment() {
            Some(comment) => CommentAssertion {
                comment,
                context: self.context,
            },
            None => self.mismatch("Comment"),
        }
    }

    pub fn assert_table(self) -> TableAssertion<'a> {
        match self.item.table() {
            Some(table) => TableAssertion {
                table,
                context: self.context,
            },
            None => self.mismatch("DataTable"),
        }
    }

    pub fn assert_passthrough(self) -> PassthroughAssertion<'a> {
        match self.item.passthrough() {
            Some(block) => PassthroughAssertion {
                block,
                context: self.context,
            },
            None => self.mismatch("Passthrough"),
        }
    }
}

// ============================================================================
// Scenario Assertions
// ============================================================================

pub struct ScenarioAssertion<'a> {
    scenario: &'a Scenario,
    context: String,
}

impl<'a> ScenarioAssertion<'a> {
    pub fn heading(self, expected: &str) -> Self {
        assert_eq!(
            self.scenario.heading, expected,
            "{}: scenario heading",
            self.context
        );
        self
    }

    pub fn tags(self, expected: &[&str]) -> Self {
        assert_eq!(self.scenario.tags, expected, "{}: scenario tags", self.context);
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.scenario.items.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} items, found {} items: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.scenario.items.iter().map(|item| item as &dyn AstNode))
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ItemAssertion<'a>),
    {
        assert!(
            index < self.scenario.items.len(),
            "{}: Item index {} out of bounds (scenario has {} items)",
            self.context,
            index,
            self.scenario.items.len()
        );
        assertion(ItemAssertion {
            item: ItemRef::Scenario(&self.scenario.items[index]),
            context: format!("{}.items[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Step Assertions
// ============================================================================

pub struct StepAssertion<'a> {
    step: &'a Step,
    context: String,
}

impl<'a> StepAssertion<'a> {
    /// The literal text, placeholders included
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.step.text, expected, "{}: step text", self.context);
        self
    }

    pub fn arg_count(self, expected: usize) -> Self {
        assert_eq!(
            self.step.args.len(),
            expected,
            "{}: Expected {} args, found {:?}",
            self.context,
            expected,
            self.step.args
        );
        self
    }

    /// Assert kind and text (value, or name for the special kinds) of one argument
    pub fn arg(self, index: usize, kind: ArgumentKind, text: &str) -> Self {
        let arg = self
            .step
            .args
            .get(index)
            .unwrap_or_else(|| panic!("{}: no argument {}", self.context, index));
        assert_eq!(arg.kind, kind, "{}: args[{}] kind", self.context, index);
        assert_eq!(arg.text(), text, "{}: args[{}] text", self.context, index);
        self
    }

    pub fn is_concept(self, expected: bool) -> Self {
        assert_eq!(
            self.step.is_concept, expected,
            "{}: is_concept",
            self.context
        );
        self
    }

    /// Assert the argument bound to a concept parameter
    pub fn binding(self, parameter: &str, value: &str) -> Self {
        let arg = self.step.binding(parameter).unwrap_or_else(|| {
            panic!(
                "{}: no binding for parameter '{}' in {:?}",
                self.context, parameter, self.step.concept_bindings
            )
        });
        assert_eq!(arg.text(), value, "{}: binding '{}'", self.context, parameter);
        self
    }

    pub fn leading_comments(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .step
            .leading_comments
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(actual, expected, "{}: leading comments", self.context);
        self
    }

    pub fn no_inline_table(self) -> Self {
        assert!(
            self.step.inline_table.is_none(),
            "{}: Expected no inline table",
            self.context
        );
        self
    }

    pub fn inline_table<F>(self, assertion: F) -> Self
    where
        F: FnOnce(TableAssertion<'a>),
    {
        let table = self
            .step
            .inline_table
            .as_ref()
            .unwrap_or_else(|| panic!("{}: Expected an inline table", self.context));
        assertion(TableAssertion {
            table,
            context: format!("{}.inline_table", self.context),
        });
        self
    }
}

// ============================================================================
// Table, Passthrough and Comment Assertions
// ============================================================================

pub struct TableAssertion<'a> {
    table: &'a DataTable,
    context: String,
}

impl<'a> TableAssertion<'a> {
    pub fn headers(self, expected: &[&str]) -> Self {
        assert_eq!(self.table.headers, expected, "{}: headers", self.context);
        self
    }

    pub fn row_count(self, expected: usize) -> Self {
        assert_eq!(self.table.rows.len(), expected, "{}: rows", self.context);
        self
    }

    pub fn row(self, index: usize, expected: &[&str]) -> Self {
        let row = self
            .table
            .rows
            .get(index)
            .unwrap_or_else(|| panic!("{}: no row {}", self.context, index));
        assert_eq!(row, expected, "{}: rows[{}]", self.context, index);
        self
    }
}

pub struct PassthroughAssertion<'a> {
    block: &'a PassthroughBlock,
    context: String,
}

impl<'a> PassthroughAssertion<'a> {
    pub fn lines(self, expected: &[&str]) -> Self {
        assert_eq!(self.block.lines, expected, "{}: raw lines", self.context);
        self
    }
}

pub struct CommentAssertion<'a> {
    comment: &'a Comment,
    context: String,
}

impl<'a> CommentAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.comment.text, expected, "{}: comment", self.context);
        self
    }
}

// ============================================================================
// Teardown Assertions
// ============================================================================

pub struct TearDownAssertion<'a> {
    teardown: &'a TearDown,
}

impl<'a> TearDownAssertion<'a> {
    pub fn marker(self, expected: &str) -> Self {
        assert_eq!(self.teardown.marker, expected, "teardown marker");
        self
    }

    pub fn step_count(self, expected: usize) -> Self {
        assert_eq!(self.teardown.steps.len(), expected, "teardown steps");
        self
    }

    pub fn step<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StepAssertion<'a>),
    {
        let step = self
            .teardown
            .steps
            .get(index)
            .unwrap_or_else(|| panic!("teardown step {} not found", index));
        assertion(StepAssertion {
            step,
            context: format!("teardown.steps[{}]", index),
        });
        self
    }

    pub fn trailing_comments(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .teardown
            .trailing_comments
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(actual, expected, "teardown trailing comments");
        self
    }
}
