//! AST definitions for specification documents
//!
//!     This module provides the tree the builder produces and the formatter consumes, together
//!     with the diagnostics type shared by every stage.
//!
//! Specification and Scenarios
//!
//!     A specification file holds exactly one specification. The specification node carries the
//!     heading, the spec-level tags, an ordered list of items and the optional teardown block.
//!     Scenarios are the named groups of steps inside it; unlike sessions in other outline formats
//!     they never nest: a scenario cannot hold another scenario, nor a teardown.
//!
//!     This nesting rule is enforced by the types: the specification holds [SpecItem]s while a
//!     scenario holds [ScenarioItem]s, which have no scenario variant.
//!
//! Steps and Arguments
//!
//!     A step keeps its literal text with every argument replaced by a `{}` placeholder, and the
//!     arguments themselves in order. This is the shape concept signatures are matched on, so two
//!     steps differing only in argument values share the same text.
//!
//! Tables
//!
//!     A table directly below a step is that step's inline table. A table directly below the
//!     specification heading (before any step or scenario) is the specification's data table.
//!     Table-shaped lines anywhere else are not tables at all: they are kept as a
//!     [PassthroughBlock] and re-emitted byte for byte.
//!
//! ## Modules
//!
//! - `elements` - AST node type definitions organized by element type
//! - `traits` - Common traits for AST nodes (AstNode, Visitor)
//! - `diagnostics` - Structured, non fatal problems found while building

pub mod diagnostics;
pub mod elements;
pub mod traits;

pub use diagnostics::{has_errors, Diagnostic, DiagnosticSeverity};
pub use elements::{
    Argument, ArgumentKind, Comment, ConceptBinding, DataTable, PassthroughBlock, Scenario,
    ScenarioItem, SpecItem, Specification, Step, TearDown, PLACEHOLDER,
};
pub use traits::{AstNode, Visitor};
