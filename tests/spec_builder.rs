//! Building specifications from token streams
//!
//! Follows the testing guidelines in `specmd::spec::testing`:
//! - token streams are spelled with the factories
//! - trees are verified with assert_spec, content and structure rather than counts alone

use rstest::rstest;
use specmd::spec::ast::diagnostics::{
    CODE_MALFORMED_TABLE, CODE_STEP_SYNTAX, CODE_STRUCTURE, CODE_UNRESOLVED_PARAMETER,
};
use specmd::spec::ast::{has_errors, ArgumentKind, Diagnostic, Specification};
use specmd::spec::building::build_specification;
use specmd::spec::concepts::{build_concepts, ConceptDictionary};
use specmd::spec::testing::assert_spec;
use specmd::spec::testing::factories::*;
use specmd::spec::token::{Token, TokenKind};

fn build(tokens: &[Token]) -> (Specification, Vec<Diagnostic>) {
    build_specification(tokens, &ConceptDictionary::new())
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .collect()
}

#[test]
fn test_heading_tags_and_scenarios() {
    let (spec, diagnostics) = build(&[
        spec_heading("My Spec Heading", 1),
        tags(["tag1", "tag2"], 2),
        scenario("Scenario Heading", 3),
        tags(["tag3", "tag4"], 4),
        step("Example step", 5),
        scenario("Scenario Heading1", 6),
        step("Example step", 7),
    ]);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_spec(&spec)
        .heading("My Spec Heading")
        .tags(&["tag1", "tag2"])
        .item_count(2)
        .item(0, |item| {
            item.assert_scenario()
                .heading("Scenario Heading")
                .tags(&["tag3", "tag4"])
                .item_count(1)
                .item(0, |i| {
                    i.assert_step().text("Example step").arg_count(0);
                });
        })
        .item(1, |item| {
            item.assert_scenario().heading("Scenario Heading1").tags(&[]);
        })
        .no_teardown();
}

#[test]
fn test_step_arguments_are_extracted() {
    let (spec, _) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        step("upload <file:data.csv> as \"report\" into <table:target.csv>", 3),
    ]);

    assert_spec(&spec).scenario(0, |scenario| {
        scenario.item(0, |item| {
            item.assert_step()
                .text("upload {} as {} into {}")
                .arg_count(3)
                .arg(0, ArgumentKind::SpecialString, "file:data.csv")
                .arg(1, ArgumentKind::Static, "report")
                .arg(2, ArgumentKind::SpecialTable, "table:target.csv");
        });
    });
}

#[test]
fn test_teardown_isolation() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        scenario("First", 2),
        step("one", 3),
        scenario("Second", 4),
        step("two", 5),
        teardown(6),
        step("cleanup one", 7),
        step("cleanup two", 8),
    ]);

    assert!(diagnostics.is_empty());
    assert_spec(&spec)
        .scenario(0, |s| {
            s.item_count(1);
        })
        .scenario(1, |s| {
            s.item_count(1).item(0, |i| {
                i.assert_step().text("two");
            });
        })
        .teardown(|t| {
            t.marker("____")
                .step_count(2)
                .step(0, |s| {
                    s.text("cleanup one");
                })
                .step(1, |s| {
                    s.text("cleanup two");
                });
        });
}

#[test]
fn test_inline_table_attaches_to_previous_step() {
    let (spec, _) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        step("Step with inline table", 3),
        table_header(["id", "name"]),
        table_row(["1", "foo"]),
        table_row(["2", "bar"]),
        step("next", 6),
    ]);

    assert_spec(&spec).scenario(0, |scenario| {
        scenario
            .item_count(2)
            .item(0, |item| {
                item.assert_step().inline_table(|table| {
                    table
                        .headers(&["id", "name"])
                        .row_count(2)
                        .row(0, &["1", "foo"])
                        .row(1, &["2", "bar"]);
                });
            })
            .item(1, |item| {
                item.assert_step().text("next").no_inline_table();
            });
    });
}

#[test]
fn test_spec_data_table_before_first_scenario() {
    let (spec, _) = build(&[
        spec_heading("Spec", 1),
        table_header(["user", "role"]),
        table_row(["alice", "admin"]),
        scenario("Scenario", 4),
        step("login as <user>", 5),
    ]);

    assert_spec(&spec)
        .data_table(|table| {
            table.headers(&["user", "role"]).row(0, &["alice", "admin"]);
        })
        .item(0, |item| {
            item.assert_table().row_count(1);
        })
        .scenario(0, |s| {
            s.item(0, |i| {
                i.assert_step().arg(0, ArgumentKind::Dynamic, "user");
            });
        });
}

#[test]
fn test_table_after_scenario_heading_is_passthrough() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        raw_table_line(TokenKind::TableHeader, " |id|name|", 3),
        raw_table_line(TokenKind::TableRow, "|1|foo|", 4),
        step("Example step", 5),
    ]);

    assert!(diagnostics.is_empty());
    assert_spec(&spec).scenario(0, |scenario| {
        scenario
            .item_count(2)
            .item(0, |item| {
                item.assert_passthrough().lines(&[" |id|name|", "|1|foo|"]);
            })
            .item(1, |item| {
                item.assert_step().no_inline_table();
            });
    });
}

#[test]
fn test_comment_between_step_and_table_breaks_attachment() {
    let (spec, _) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        step("step", 3),
        comment("interrupt", 4),
        raw_table_line(TokenKind::TableHeader, "|a|", 5),
    ]);

    assert_spec(&spec).scenario(0, |scenario| {
        scenario
            .item_count(3)
            .item(0, |i| {
                i.assert_step().no_inline_table();
            })
            .item(1, |i| {
                i.assert_comment().text("interrupt");
            })
            .item(2, |i| {
                i.assert_passthrough().lines(&["|a|"]);
            });
    });
}

#[test]
fn test_comments_before_tags_stay_in_the_scenario() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        comment("tagged below", 3),
        tags(["smoke"], 4),
        step("step", 5),
    ]);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_spec(&spec).scenario(0, |scenario| {
        scenario
            .tags(&["smoke"])
            .item_count(2)
            .item(0, |i| {
                i.assert_comment().text("tagged below");
            })
            .item(1, |i| {
                i.assert_step().text("step").leading_comments(&[]);
            });
    });
}

#[test]
fn test_comments_before_steps_lead_them() {
    let (spec, _) = build(&[
        comment("file header", 1),
        spec_heading("Spec", 2),
        scenario("Scenario", 3),
        comment("first", 4),
        comment("second", 5),
        step("step", 6),
        comment("dangling", 7),
    ]);

    assert_spec(&spec)
        .leading_comment_count(1)
        .scenario(0, |scenario| {
            scenario
                .item_count(2)
                .item(0, |i| {
                    i.assert_step().leading_comments(&["first", "second"]);
                })
                .item(1, |i| {
                    i.assert_comment().text("dangling");
                });
        });
}

#[test]
fn test_concept_invocation_is_bound() {
    let mut dictionary = ConceptDictionary::new();
    let concept_diagnostics = build_concepts(
        &[
            spec_heading("login as <user> with <password>", 1),
            step("enter <user>", 2),
            step("enter <password>", 3),
        ],
        "auth.cpt",
        &mut dictionary,
    );
    assert!(concept_diagnostics.is_empty());

    let (spec, diagnostics) = build_specification(
        &[
            spec_heading("Spec", 1),
            scenario("Scenario", 2),
            step("login as \"bob\" with \"secret\"", 3),
            step("logout", 4),
        ],
        &dictionary,
    );

    assert!(diagnostics.is_empty());
    assert_spec(&spec).scenario(0, |scenario| {
        scenario
            .item(0, |i| {
                i.assert_step()
                    .is_concept(true)
                    .binding("user", "bob")
                    .binding("password", "secret");
            })
            .item(1, |i| {
                i.assert_step().is_concept(false);
            });
    });
}

#[test]
fn test_malformed_row_is_kept_and_reported() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        step("step", 3),
        table_header(["a", "b"]),
        table_row(["1"]).at(5),
    ]);

    assert_eq!(codes(&diagnostics), vec![CODE_MALFORMED_TABLE]);
    assert_eq!(diagnostics[0].line_number, 5);
    assert_spec(&spec).scenario(0, |s| {
        s.item(0, |i| {
            i.assert_step().inline_table(|t| {
                t.row(0, &["1"]);
            });
        });
    });
}

#[test]
fn test_second_data_table_becomes_passthrough() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        raw_table_line(TokenKind::TableHeader, "|a|", 2),
        raw_table_line(TokenKind::TableRow, "|1|", 3),
        comment("between", 4),
        raw_table_line(TokenKind::TableHeader, "|b|", 5),
    ]);

    assert_eq!(codes(&diagnostics), vec![CODE_STRUCTURE]);
    assert_spec(&spec)
        .item_count(3)
        .item(0, |i| {
            i.assert_table().headers(&["a"]);
        })
        .item(1, |i| {
            i.assert_comment().text("between");
        })
        .item(2, |i| {
            i.assert_passthrough().lines(&["|b|"]);
        });
}

#[test]
fn test_unterminated_argument_skips_step() {
    let (spec, diagnostics) = build(&[
        spec_heading("Spec", 1),
        scenario("Scenario", 2),
        step("say \"hello", 3),
        step("wave", 4),
    ]);

    assert_eq!(codes(&diagnostics), vec![CODE_STEP_SYNTAX]);
    assert_spec(&spec).scenario(0, |s| {
        s.item_count(1).item(0, |i| {
            i.assert_step().text("wave");
        });
    });
}

#[test]
fn test_unresolved_dynamic_parameter_warns() {
    let (_, diagnostics) = build(&[
        spec_heading("Spec", 1),
        table_header(["user"]),
        scenario("Scenario", 3),
        step("login as <user>", 4),
        step("open <page>", 5),
    ]);

    assert_eq!(codes(&diagnostics), vec![CODE_UNRESOLVED_PARAMETER]);
    assert_eq!(diagnostics[0].line_number, 5);
    assert!(!has_errors(&diagnostics));
}

#[rstest]
#[case::second_spec_tags(
    vec![spec_heading("Spec", 1), tags(["a"], 2), tags(["b"], 3)],
    3
)]
#[case::scenario_tags_after_steps(
    vec![spec_heading("Spec", 1), scenario("S", 2), step("x", 3), tags(["b"], 4)],
    4
)]
#[case::tags_after_teardown(
    vec![spec_heading("Spec", 1), teardown(2), tags(["b"], 3)],
    3
)]
#[case::scenario_after_teardown(
    vec![spec_heading("Spec", 1), teardown(2), scenario("S", 3)],
    3
)]
#[case::second_heading(vec![spec_heading("Spec", 1), spec_heading("Again", 2)], 2)]
#[case::second_teardown(vec![spec_heading("Spec", 1), teardown(2), teardown(3)], 3)]
#[case::teardown_table_without_step(
    vec![spec_heading("Spec", 1), teardown(2), table_header(["a"]).at(3), table_row(["1"])],
    3
)]
fn test_structural_problems_are_reported(#[case] tokens: Vec<Token>, #[case] line: usize) {
    let (spec, diagnostics) = build(&tokens);

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].code.as_deref(), Some(CODE_STRUCTURE));
    assert_eq!(diagnostics[0].line_number, line);
    assert!(diagnostics[0].is_error());
    assert_eq!(spec.heading, "Spec");
}

#[test]
fn test_tokens_before_heading_are_skipped() {
    let (spec, diagnostics) = build(&[
        step("too early", 1),
        scenario("too early", 2),
        spec_heading("Spec", 3),
        step("fine", 4),
    ]);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(Diagnostic::is_error));
    assert_spec(&spec).item_count(1).item(0, |i| {
        i.assert_step().text("fine");
    });
}
