//! # specmd
//!
//! Document model, builder and canonical formatter for markdown-like test specifications.
//!
//! File Layout
//!
//!     The crate does not lex raw text: an external lexer classifies every source line into a
//!     typed [Token](spec::token::Token) and this crate takes it from there.
//!
//!     src/spec
//!       ├── token       The token stream contract with the external lexer
//!       ├── ast         Specification, Scenario, Step, DataTable and friends
//!       ├── concepts    Concept (macro) definitions and their dictionary
//!       ├── building    Tokens + dictionary -> Specification (with diagnostics)
//!       ├── formats     Specification -> canonical text, tree visualisation
//!       └── testing     Token factories, fixture classifier and AST assertions
//!
//!     So the general flow is tokens -> building -> ast -> formats.
//!
//! For testing guidelines, see the [testing module](spec::testing).

pub mod spec;

pub use spec::ast::{Diagnostic, DiagnosticSeverity, Specification, Step};
pub use spec::building::build_specification;
pub use spec::concepts::{build_concepts, Concept, ConceptDictionary, ConceptError};
pub use spec::formats::{format_concepts, format_specification, format_step};
pub use spec::token::{Token, TokenKind};
