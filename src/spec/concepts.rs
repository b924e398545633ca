//! Concepts: reusable step sequences
//!
//!     A concept is a macro: a named, parameterised sequence of steps defined in a concept file
//!     and invoked from specifications like any other step.
//!
//!         # Login as <user>
//!         * Open the login page
//!         * Enter <user> in the name field
//!
//!     Its signature is the literal text of the defining step with placeholders, here
//!     `Login as {}`, which is exactly the text of any step that invokes it (`* Login as "bob"`).
//!
//! Lifecycle
//!
//!     The [ConceptDictionary] is built once per run, by feeding every concept file through
//!     [build_concepts], and is read-only afterwards. It is passed explicitly to the
//!     specification builder; there is no global registry.

pub mod builder;
pub mod dictionary;

pub use builder::{build_concepts, ConceptBuilder};
pub use dictionary::{Concept, ConceptDictionary, ConceptError};
