//! Element types of the specification AST
//!
//!     Specification
//!       ├── tags
//!       ├── items: SpecItem*
//!       │     ├── Scenario
//!       │     │     ├── tags
//!       │     │     └── items: ScenarioItem*  (Step | Comment | DataTable | PassthroughBlock)
//!       │     ├── Step (context steps, run before every scenario)
//!       │     ├── Comment
//!       │     ├── DataTable (the specification's data table)
//!       │     └── PassthroughBlock
//!       └── teardown: TearDown?
//!             └── steps: Step*

pub mod argument;
pub mod comment;
pub mod content_item;
pub mod scenario;
pub mod specification;
pub mod step;
pub mod table;
pub mod teardown;

pub use argument::{Argument, ArgumentKind};
pub use comment::Comment;
pub use content_item::{ScenarioItem, SpecItem};
pub use scenario::Scenario;
pub use specification::Specification;
pub use step::{ConceptBinding, Step, PLACEHOLDER};
pub use table::{DataTable, PassthroughBlock};
pub use teardown::TearDown;
