//! Output formats for specifications
//!
//! This module contains the format implementations for turning a built [Specification] back
//! into text:
//! - canonical: the normalised source form written back to spec and concept files
//! - treeviz: a one line per node view of the tree, for debugging
//!
//! Both are registered in the [FormatRegistry] under their names.
//!
//! [Specification]: crate::spec::ast::Specification

pub mod canonical;
pub mod registry;
pub mod treeviz;

pub use canonical::{
    format_concepts, format_specification, format_step, render_step_text, CanonicalFormatter,
    FormatOptions,
};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
