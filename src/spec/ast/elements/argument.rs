//! Step arguments
//!
//!     Arguments are the parameter values embedded in a step line. Their delimiter decides their
//!     kind:
//!
//!         - "value": Static, a literal string
//!         - <value>: Dynamic, a reference to a data table column or concept parameter
//!         - <file:path>: SpecialString, the contents of a file
//!         - <table:path>: SpecialTable, a table loaded from a file
//!
//!     Static and Dynamic arguments carry a `value`; the special kinds carry a `name`, the
//!     resource identifier, and leave `value` empty.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArgumentKind {
    Static,
    Dynamic,
    SpecialString,
    SpecialTable,
}

impl ArgumentKind {
    pub fn is_special(&self) -> bool {
        matches!(self, ArgumentKind::SpecialString | ArgumentKind::SpecialTable)
    }
}

/// A single argument of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub kind: ArgumentKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Argument {
    pub fn static_value(value: impl Into<String>) -> Self {
        Self {
            kind: ArgumentKind::Static,
            value: value.into(),
            name: String::new(),
        }
    }

    pub fn dynamic(value: impl Into<String>) -> Self {
        Self {
            kind: ArgumentKind::Dynamic,
            value: value.into(),
            name: String::new(),
        }
    }

    pub fn special_string(name: impl Into<String>) -> Self {
        Self {
            kind: ArgumentKind::SpecialString,
            value: String::new(),
            name: name.into(),
        }
    }

    pub fn special_table(name: impl Into<String>) -> Self {
        Self {
            kind: ArgumentKind::SpecialTable,
            value: String::new(),
            name: name.into(),
        }
    }

    /// The text that ends up between the delimiters: `name` for special kinds, `value` otherwise
    pub fn text(&self) -> &str {
        if self.kind.is_special() {
            &self.name
        } else {
            &self.value
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ArgumentKind::Static => write!(f, "\"{}\"", self.value),
            _ => write!(f, "<{}>", self.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_uses_name_for_special_kinds() {
        assert_eq!(Argument::special_table("table:users.csv").text(), "table:users.csv");
        assert_eq!(Argument::dynamic("id").text(), "id");
        assert!(Argument::special_string("file:a.txt").value.is_empty());
    }
}
