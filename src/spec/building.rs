//! Building: tokens to Specification
//!
//!     The builder walks the token stream once, front to back, keeping track of which container
//!     is open (the specification, the latest scenario, or the teardown) and whether the previous
//!     token was a step (the only position where a table becomes an inline table).
//!
//!     Building never fails. Tokens that cannot be placed are skipped and reported as
//!     [Diagnostic](crate::spec::ast::Diagnostic)s, and the rest of the stream is still built.
//!
//! Layout
//!
//!     - `extraction` splits raw step values into text + arguments (pure, no AST context)
//!     - `builder` holds the placement rules and produces the tree

pub mod builder;
pub mod extraction;

pub use builder::{build_specification, SpecBuilder};
pub use extraction::{extract_step_text, StepTextData, StepTextError};
