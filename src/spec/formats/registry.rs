//! Format registry for specification output
//!
//! Each output format implements the [Formatter] trait and is looked up by name in a
//! [FormatRegistry], so front ends can select a format from user input.

use super::canonical::CanonicalFormatter;
use super::treeviz::TreevizFormatter;
use crate::spec::ast::Specification;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
}

/// A named way of rendering a specification
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g. "canonical", "treeviz")
    fn name(&self) -> &str;

    fn serialize(&self, spec: &Specification) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

impl Formatter for CanonicalFormatter {
    fn name(&self) -> &str {
        "canonical"
    }

    fn serialize(&self, spec: &Specification) -> Result<String, FormatError> {
        Ok(self.format_specification(spec))
    }

    fn description(&self) -> &str {
        "Normalised specification source"
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, spec: &Specification, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(spec)
    }

    /// Format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// A registry holding the canonical and treeviz formats. The canonical format uses
    /// `canonical` as its options.
    pub fn with_canonical(canonical: CanonicalFormatter) -> Self {
        let mut registry = Self::new();
        registry.register(canonical);
        registry.register(TreevizFormatter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_canonical(CanonicalFormatter::new())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
