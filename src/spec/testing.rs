//! Testing utilities for specification trees
//!
//! # Builder Testing Guidelines
//!
//! This module provides three tools that builder and formatter tests are expected to use:
//!
//! 1. **[factories]** - one-line constructors for the tokens the external lexer produces
//! 2. **[fixtures]** - a classifier that turns canonical text back into tokens, for round trips
//! 3. **[assert_spec](fn@assert_spec)** - fluent assertions over the built tree
//!
//! ## Rule 1: Spell token streams with the factories
//!
//! Tests feed the builder tokens, not text. Writing `Token` literals by hand buries the
//! interesting part (which kind, which value) under field noise:
//!
//! ```rust-example
//! use crate::spec::testing::factories::*;
//!
//! let tokens = vec![
//!     spec_heading("Spec Heading", 1),
//!     scenario("Scenario Heading", 2),
//!     step("Example step", 3),
//! ];
//! ```
//!
//! ## Rule 2: Always Use assert_spec for AST Verification
//!
//! Counting nodes says little. What a builder test wants to pin down is the shape of the tree
//! and the content of every node, and matching on nested enums by hand gets long fast:
//!
//! ```rust-example
//! match &spec.items[0] {
//!     SpecItem::Scenario(s) => {
//!         assert_eq!(s.heading, "Login");
//!         match &s.items[0] {
//!             ScenarioItem::Step(step) => assert_eq!(step.text, "open {}"),
//!             _ => panic!("Expected step"),
//!         }
//!     }
//!     _ => panic!("Expected scenario"),
//! }
//! ```
//!
//! With the fluent API the same test becomes:
//!
//! ```rust-example
//! use crate::spec::testing::assert_spec;
//!
//! assert_spec(&spec)
//!     .heading("Spec Heading")
//!     .item(0, |item| {
//!         item.assert_scenario()
//!             .heading("Login")
//!             .item(0, |i| i.assert_step().text("open {}").arg_count(1));
//!     });
//! ```
//!
//! ## Rule 3: Compare canonical text exactly
//!
//! Canonical output has significant trailing whitespace (the space after a step with an inline
//! table). Compare it with `assert_eq!` on full strings, or with `insta` snapshots where no line
//! ends in a space.

mod testing_assertions;
mod testing_factories;

pub mod fixtures;

pub use testing_assertions::{
    assert_spec, CommentAssertion, ItemAssertion, PassthroughAssertion, ScenarioAssertion,
    SpecAssertion, StepAssertion, TableAssertion, TearDownAssertion,
};

// Public submodule path: crate::spec::testing::factories
pub mod factories {
    pub use super::testing_factories::*;
}
