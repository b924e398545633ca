//! Property-based tests for canonical formatting
//!
//! These tests pin down the guarantees of the canonical form:
//! - heading underlines are exactly as long as the heading
//! - every cell of an aligned table column has the same width
//! - quotes in arguments are escaped so the step reads back to the same arguments
//! - formatting, re-reading and formatting again changes nothing

use proptest::prelude::*;
use specmd::spec::ast::{
    Argument, DataTable, Scenario, ScenarioItem, SpecItem, Specification, Step, TearDown,
};
use specmd::spec::building::{build_specification, extract_step_text};
use specmd::spec::concepts::ConceptDictionary;
use specmd::spec::formats::{format_specification, format_step, render_step_text};
use specmd::spec::testing::fixtures::tokenize;

/// Headings and step text: words without any syntax of their own
fn words_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z]{0,7}( [a-z]{1,8}){0,3}"
}

fn cell_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

/// Argument values, quotes and backslashes included. A backslash is never the last character
/// or directly before a quote: `\"` always reads back as a quote.
fn value_strategy() -> impl Strategy<Value = String> {
    "([a-z \"]|\\\\[a-z]){0,10}"
}

fn table_strategy() -> impl Strategy<Value = DataTable> {
    (1usize..4).prop_flat_map(|columns| {
        (
            prop::collection::vec(cell_strategy(), columns),
            prop::collection::vec(prop::collection::vec(cell_strategy(), columns), 0..4),
        )
            .prop_map(|(headers, rows)| {
                rows.into_iter()
                    .fold(DataTable::new(headers), |table, row| table.with_row(row))
            })
    })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    (
        words_strategy(),
        prop::option::of("([a-z ]|\\\\[a-z]){0,8}"),
        prop::option::of(table_strategy()),
    )
        .prop_map(|(text, arg, table)| {
            let mut step = match arg {
                Some(value) => Step::new(format!("{} {{}}", text))
                    .with_args(vec![Argument::static_value(value)]),
                None => Step::new(text),
            };
            step.inline_table = table;
            step
        })
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..3)
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        words_strategy(),
        tags_strategy(),
        prop::collection::vec(step_strategy(), 0..4),
    )
        .prop_map(|(heading, tags, steps)| {
            Scenario::new(heading)
                .with_tags(tags)
                .with_items(steps.into_iter().map(ScenarioItem::Step).collect())
        })
}

fn spec_strategy() -> impl Strategy<Value = Specification> {
    (
        words_strategy(),
        tags_strategy(),
        prop::option::of(table_strategy()),
        prop::collection::vec(step_strategy(), 0..2),
        prop::collection::vec(scenario_strategy(), 0..3),
        prop::option::of(prop::collection::vec(step_strategy(), 0..3)),
    )
        .prop_map(|(heading, tags, table, context, scenarios, teardown)| {
            let mut items: Vec<SpecItem> = Vec::new();
            items.extend(table.map(SpecItem::Table));
            items.extend(context.into_iter().map(SpecItem::Step));
            items.extend(scenarios.into_iter().map(SpecItem::Scenario));
            let spec = Specification::new(heading).with_tags(tags).with_items(items);
            match teardown {
                Some(steps) => spec.with_teardown(TearDown::new("____").with_steps(steps)),
                None => spec,
            }
        })
}

proptest! {
    #[test]
    fn test_underline_matches_heading_length(heading in "[^\n\r]{1,40}") {
        let formatted = format_specification(&Specification::new(heading.clone()));
        let lines: Vec<&str> = formatted.lines().collect();

        prop_assert_eq!(lines[0], heading.as_str());
        prop_assert_eq!(lines[1].chars().count(), heading.chars().count());
        prop_assert!(lines[1].chars().all(|c| c == '='));
    }

    #[test]
    fn test_scenario_underline_uses_dashes(heading in words_strategy()) {
        let spec = Specification::new("Spec")
            .with_items(vec![SpecItem::Scenario(Scenario::new(heading.clone()))]);
        let formatted = format_specification(&spec);
        let expected = format!("{}\n{}\n", heading, "-".repeat(heading.chars().count()));

        prop_assert!(formatted.ends_with(&expected));
    }

    #[test]
    fn test_table_columns_are_aligned(table in table_strategy()) {
        let formatted = format_step(&Step::new("add").with_inline_table(table.clone()));
        let widths = table.column_widths();

        for line in formatted.lines().skip(1) {
            prop_assert!(line.starts_with("     |"));
            let cells: Vec<&str> = line.trim_start().trim_matches('|').split('|').collect();
            prop_assert_eq!(cells.len(), widths.len());
            for (cell, width) in cells.iter().zip(&widths) {
                prop_assert_eq!(cell.chars().count(), *width);
            }
        }
    }

    #[test]
    fn test_quotes_are_escaped_for_every_argument_kind(
        static_value in value_strategy(),
        dynamic_value in value_strategy(),
        file in value_strategy(),
        table in value_strategy(),
    ) {
        let args = vec![
            Argument::static_value(static_value),
            Argument::dynamic(dynamic_value),
            Argument::special_string(format!("file:{}", file)),
            Argument::special_table(format!("table:{}", table)),
        ];
        let step = Step::new("check {}, {}, {} and {}").with_args(args.clone());
        let rendered = render_step_text(&step);

        let quotes: usize = args.iter().map(|arg| arg.text().matches('"').count()).sum();
        prop_assert_eq!(rendered.matches("\\\"").count(), quotes);

        let data = extract_step_text(&rendered).unwrap();
        prop_assert_eq!(data.text, step.text);
        prop_assert_eq!(data.args, args);
    }

    #[test]
    fn test_format_is_idempotent(spec in spec_strategy()) {
        let formatted = format_specification(&spec);
        let (rebuilt, diagnostics) =
            build_specification(&tokenize(&formatted), &ConceptDictionary::new());

        prop_assert!(diagnostics.is_empty(), "{:?}\n{}", diagnostics, formatted);
        prop_assert_eq!(format_specification(&rebuilt), formatted);
    }
}
