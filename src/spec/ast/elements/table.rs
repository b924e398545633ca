//! Table elements
//!
//!     Two node types share the table syntax:
//!
//!         - DataTable: a real table, either inline below a step (the step runs once per row) or
//!           bound to the whole specification. Rendered with aligned columns.
//!         - PassthroughBlock: table lines found where no table may appear, for example right
//!           below a scenario heading. They carry no meaning and are kept as raw lines.
//!
//!     A DataTable row is expected to have one cell per header. Rows that do not are still stored
//!     as written; the builder reports them.

use super::super::traits::{AstNode, Visitor};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub line_number: usize,
}

impl DataTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            line_number: 0,
        }
    }

    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_row(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.column_index(header).is_some()
    }

    /// Cell value at `row` for the column named `header`
    pub fn get(&self, row: usize, header: &str) -> Option<&str> {
        let column = self.column_index(header)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Number of columns, counting cells of rows longer than the header
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Width of every column: the widest header or cell in characters
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for cells in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (index, cell) in cells.iter().enumerate() {
                widths[index] = widths[index].max(cell.chars().count());
            }
        }
        widths
    }

    pub fn is_row_malformed(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.len() != self.headers.len())
    }
}

impl AstNode for DataTable {
    fn node_type(&self) -> &'static str {
        "DataTable"
    }

    fn display_label(&self) -> String {
        format!("|{}| ({} rows)", self.headers.join("|"), self.rows.len())
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_table(self);
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataTable({} columns, {} rows)",
            self.headers.len(),
            self.rows.len()
        )
    }
}

/// Table-shaped lines in a position where no table is allowed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PassthroughBlock {
    pub lines: Vec<String>,
    pub line_number: usize,
}

impl PassthroughBlock {
    pub fn new(line_number: usize) -> Self {
        Self {
            lines: Vec::new(),
            line_number,
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl AstNode for PassthroughBlock {
    fn node_type(&self) -> &'static str {
        "Passthrough"
    }

    fn display_label(&self) -> String {
        format!("{} raw lines", self.lines.len())
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_passthrough(self);
    }
}
