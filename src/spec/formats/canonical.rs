//! Canonical formatter
//!
//!     Renders a [Specification], a single [Step] or a whole [ConceptDictionary] in the one
//!     normalised source form. Formatting is a pure function of the tree: re-building the output
//!     and formatting it again gives the same text.
//!
//! Layout
//!
//!         Spec Heading
//!         ============
//!         tags: fast, login
//!         Scenario Heading
//!         ----------------
//!         * Login as "admin" with <password>
//!         * Create users
//!              |id|name |
//!              |--|-----|
//!              |1 |alice|
//!
//!     Underlines are exactly as long as the heading in characters. A step with an inline table
//!     keeps one space after its text where the table argument sits. Table lines are indented by
//!     five spaces and padded to the widest cell of each column. Passthrough blocks and comments
//!     are emitted verbatim.
//!
//! Escaping
//!
//!     Every `"` inside an argument value is written as `\"`, whatever the delimiter, so the line
//!     reads back to the same arguments.

use crate::spec::ast::{
    Argument, ArgumentKind, Comment, DataTable, PassthroughBlock, Scenario, ScenarioItem,
    SpecItem, Specification, Step, TearDown, PLACEHOLDER,
};
use crate::spec::concepts::ConceptDictionary;
use std::collections::BTreeMap;

/// Layout knobs of the canonical form. The defaults are the canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces in front of every aligned table line
    pub table_indent: usize,
    pub spec_underline: char,
    pub scenario_underline: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            table_indent: 5,
            spec_underline: '=',
            scenario_underline: '-',
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanonicalFormatter {
    options: FormatOptions,
}

impl CanonicalFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format_specification(&self, spec: &Specification) -> String {
        let mut out = String::new();
        for comment in &spec.leading_comments {
            push_comment(&mut out, comment);
        }
        self.push_heading(&mut out, &spec.heading, self.options.spec_underline);
        push_tags(&mut out, &spec.tags);

        for item in &spec.items {
            match item {
                SpecItem::Scenario(scenario) => self.push_scenario(&mut out, scenario),
                SpecItem::Step(step) => self.push_step(&mut out, step),
                SpecItem::Comment(comment) => push_comment(&mut out, comment),
                SpecItem::Table(table) => self.push_table(&mut out, table),
                SpecItem::Passthrough(block) => push_passthrough(&mut out, block),
            }
        }

        if let Some(teardown) = &spec.teardown {
            self.push_teardown(&mut out, teardown);
        }
        out
    }

    /// A step line with its leading comments and inline table
    pub fn format_step(&self, step: &Step) -> String {
        let mut out = String::new();
        self.push_step(&mut out, step);
        out
    }

    /// Concept files keyed by source file. Concepts of one file appear in definition order, each
    /// followed by its own body only. Body steps that invoke another concept are left out.
    pub fn format_concepts(&self, dictionary: &ConceptDictionary) -> BTreeMap<String, String> {
        let mut files: BTreeMap<String, String> = BTreeMap::new();
        for concept in dictionary.iter_ordered() {
            let out = files.entry(concept.source_file.clone()).or_default();
            let definition = &concept.definition;
            for comment in &definition.leading_comments {
                push_comment(out, comment);
            }
            out.push_str("# ");
            out.push_str(&render_step_text(definition));
            out.push('\n');
            for step in definition.concept_steps.iter().filter(|step| !step.is_concept) {
                self.push_step(out, step);
            }
            for comment in &concept.trailing_comments {
                push_comment(out, comment);
            }
        }
        files
    }

    fn push_heading(&self, out: &mut String, heading: &str, underline: char) {
        out.push_str(heading);
        out.push('\n');
        out.extend(std::iter::repeat(underline).take(heading.chars().count()));
        out.push('\n');
    }

    fn push_scenario(&self, out: &mut String, scenario: &Scenario) {
        self.push_heading(out, &scenario.heading, self.options.scenario_underline);
        push_tags(out, &scenario.tags);
        for item in &scenario.items {
            match item {
                ScenarioItem::Step(step) => self.push_step(out, step),
                ScenarioItem::Comment(comment) => push_comment(out, comment),
                ScenarioItem::Table(table) => self.push_table(out, table),
                ScenarioItem::Passthrough(block) => push_passthrough(out, block),
            }
        }
    }

    fn push_step(&self, out: &mut String, step: &Step) {
        for comment in &step.leading_comments {
            push_comment(out, comment);
        }
        out.push_str("* ");
        out.push_str(&render_step_text(step));
        match &step.inline_table {
            Some(table) => {
                out.push_str(" \n");
                self.push_table(out, table);
            }
            None => out.push('\n'),
        }
    }

    fn push_table(&self, out: &mut String, table: &DataTable) {
        let widths = table.column_widths();
        let indent = " ".repeat(self.options.table_indent);

        let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        push_table_line(out, &indent, &table.headers, &widths);
        push_table_line(out, &indent, &separator, &widths);
        for row in &table.rows {
            push_table_line(out, &indent, row, &widths);
        }
    }

    fn push_teardown(&self, out: &mut String, teardown: &TearDown) {
        out.push_str(&teardown.marker);
        out.push('\n');
        for step in &teardown.steps {
            self.push_step(out, step);
        }
        for comment in &teardown.trailing_comments {
            push_comment(out, comment);
        }
    }
}

/// Format a specification with the canonical options.
pub fn format_specification(spec: &Specification) -> String {
    CanonicalFormatter::new().format_specification(spec)
}

/// Format one step with the canonical options.
pub fn format_step(step: &Step) -> String {
    CanonicalFormatter::new().format_step(step)
}

/// Format every concept of `dictionary`, keyed by source file.
pub fn format_concepts(dictionary: &ConceptDictionary) -> BTreeMap<String, String> {
    CanonicalFormatter::new().format_concepts(dictionary)
}

/// The step text with every placeholder replaced by its argument, left to right.
///
/// Placeholders without an argument stay as `{}` and surplus arguments are dropped; both are
/// logged.
pub fn render_step_text(step: &Step) -> String {
    let mut rendered = String::with_capacity(step.text.len());
    let mut rest = step.text.as_str();
    let mut index = 0;

    while let Some(position) = rest.find(PLACEHOLDER) {
        rendered.push_str(&rest[..position]);
        match step.args.get(index) {
            Some(arg) => rendered.push_str(&render_argument(arg)),
            None => rendered.push_str(PLACEHOLDER),
        }
        index += 1;
        rest = &rest[position + PLACEHOLDER.len()..];
    }
    rendered.push_str(rest);

    if index != step.args.len() {
        tracing::warn!(
            line = step.line_number,
            text = %step.text,
            placeholders = index,
            args = step.args.len(),
            "placeholder count does not match argument count"
        );
    }
    rendered
}

fn render_argument(arg: &Argument) -> String {
    let escaped = arg.text().replace('"', "\\\"");
    match arg.kind {
        ArgumentKind::Static => format!("\"{}\"", escaped),
        ArgumentKind::Dynamic | ArgumentKind::SpecialString | ArgumentKind::SpecialTable => {
            format!("<{}>", escaped)
        }
    }
}

fn push_tags(out: &mut String, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    out.push_str("tags: ");
    out.push_str(&tags.join(", "));
    out.push('\n');
}

fn push_comment(out: &mut String, comment: &Comment) {
    out.push_str(&comment.text);
    if !comment.text.ends_with('\n') {
        out.push('\n');
    }
}

fn push_passthrough(out: &mut String, block: &PassthroughBlock) {
    for line in &block.lines {
        out.push_str(line);
        out.push('\n');
    }
}

fn push_table_line(out: &mut String, indent: &str, cells: &[String], widths: &[usize]) {
    out.push_str(indent);
    out.push('|');
    for (column, width) in widths.iter().enumerate() {
        let cell = cells.get(column).map(String::as_str).unwrap_or("");
        out.push_str(cell);
        let padding = width.saturating_sub(cell.chars().count());
        out.extend(std::iter::repeat(' ').take(padding));
        out.push('|');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underline_counts_characters() {
        let spec = Specification::new("Übersicht");
        assert_eq!(format_specification(&spec), "Übersicht\n=========\n");
    }

    #[test]
    fn test_surplus_placeholder_is_kept() {
        let step = Step::new("compare {} with {}").with_args(vec![Argument::static_value("a")]);
        assert_eq!(render_step_text(&step), "compare \"a\" with {}");
    }

    #[test]
    fn test_surplus_argument_is_dropped() {
        let step = Step::new("open").with_args(vec![Argument::dynamic("page")]);
        assert_eq!(render_step_text(&step), "open");
    }

    #[test]
    fn test_comment_newline_not_doubled() {
        let mut out = String::new();
        push_comment(&mut out, &Comment::new("already terminated\n"));
        push_comment(&mut out, &Comment::new("bare"));
        assert_eq!(out, "already terminated\nbare\n");
    }

    #[test]
    fn test_short_row_is_padded_to_every_column() {
        let table = DataTable::new(["id", "name"]).with_row(["1"]);
        let mut out = String::new();
        CanonicalFormatter::new().push_table(&mut out, &table);
        assert_eq!(out, "     |id|name|\n     |--|----|\n     |1 |    |\n");
    }

    #[test]
    fn test_custom_options() {
        let formatter = CanonicalFormatter::with_options(FormatOptions {
            table_indent: 2,
            spec_underline: '#',
            scenario_underline: '~',
        });
        let spec = Specification::new("Spec").with_items(vec![
            SpecItem::Table(DataTable::new(["a"]).with_row(["1"])),
            SpecItem::Scenario(Scenario::new("Sc")),
        ]);
        assert_eq!(
            formatter.format_specification(&spec),
            "Spec\n####\n  |a|\n  |-|\n  |1|\nSc\n~~\n"
        );
    }
}
