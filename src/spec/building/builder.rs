//! Specification Builder
//!
//! This module contains the `SpecBuilder`, which walks the token stream produced by the external
//! lexer and constructs the [Specification] tree.
//!
//! # Placement Rules
//!
//! ```text
//! Spec        -> heading (first one wins, later ones are reported)
//! Tag         -> spec tags before the first scenario, scenario tags right after its heading
//!                (comments in between are flushed first)
//! Scenario    -> closes the previous scenario, opens a new one
//! Step        -> open container, or the teardown once the marker was seen
//! Table*      -> inline table of the step right before it
//!                | spec data table (no scenario, no step yet)
//!                | passthrough block (anywhere else)
//! TearDown    -> every following step goes to the teardown
//! Comment     -> buffered, attached to the next step or flushed as an item
//! ```

use crate::spec::ast::diagnostics::{
    CODE_MALFORMED_TABLE, CODE_STEP_SYNTAX, CODE_STRUCTURE, CODE_UNRESOLVED_PARAMETER,
};
use crate::spec::ast::{
    ArgumentKind, Comment, DataTable, Diagnostic, PassthroughBlock, Scenario, ScenarioItem,
    SpecItem, Specification, Step, TearDown,
};
use crate::spec::building::extraction::extract_step_text;
use crate::spec::concepts::ConceptDictionary;
use crate::spec::token::{Token, TokenKind};

/// Where the table lines currently being read end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableTarget {
    /// Inline table of the most recent step
    Step,
    /// The specification's data table
    SpecData,
    Passthrough,
    /// Table lines that have no valid home, dropped after one diagnostic
    Discard,
}

/// A builder that constructs a [Specification] from line tokens.
pub struct SpecBuilder<'a> {
    dictionary: &'a ConceptDictionary,
    spec: Specification,
    diagnostics: Vec<Diagnostic>,
    heading_seen: bool,
    pending_comments: Vec<Comment>,
    previous_was_step: bool,
    table_target: Option<TableTarget>,
}

/// Build a specification from tokens, resolving concept invocations against `dictionary`.
pub fn build_specification(
    tokens: &[Token],
    dictionary: &ConceptDictionary,
) -> (Specification, Vec<Diagnostic>) {
    SpecBuilder::new(dictionary).build(tokens)
}

impl<'a> SpecBuilder<'a> {
    pub fn new(dictionary: &'a ConceptDictionary) -> Self {
        Self {
            dictionary,
            spec: Specification::default(),
            diagnostics: Vec::new(),
            heading_seen: false,
            pending_comments: Vec::new(),
            previous_was_step: false,
            table_target: None,
        }
    }

    /// Consume the builder and build the specification.
    pub fn build(mut self, tokens: &[Token]) -> (Specification, Vec<Diagnostic>) {
        for token in tokens {
            self.process(token);
        }
        self.flush_comments();

        if !self.heading_seen {
            let line = tokens.first().map(|t| t.line_number).unwrap_or(1);
            self.structure_error(line, "Specification heading not found".to_string());
        }

        tracing::debug!(
            heading = %self.spec.heading,
            items = self.spec.items.len(),
            scenarios = self.spec.iter_scenarios().count(),
            diagnostics = self.diagnostics.len(),
            "built specification"
        );
        (self.spec, self.diagnostics)
    }

    fn process(&mut self, token: &Token) {
        if !token.kind.is_table() {
            self.table_target = None;
        }
        let after_step = std::mem::take(&mut self.previous_was_step);

        match token.kind {
            TokenKind::Spec => self.process_heading(token),
            TokenKind::Comment => self.process_comment(token),
            _ if !self.heading_seen => {
                tracing::trace!(%token, "token before heading");
                self.structure_error(
                    token.line_number,
                    format!(
                        "{} found before the specification heading",
                        describe(token.kind)
                    ),
                );
            }
            TokenKind::Scenario => self.process_scenario(token),
            TokenKind::Tag => self.process_tags(token),
            TokenKind::Step => self.process_step(token),
            TokenKind::TableHeader => self.process_table_header(token, after_step),
            TokenKind::TableRow => self.process_table_row(token),
            TokenKind::TearDown => self.process_teardown(token),
        }
    }

    fn process_heading(&mut self, token: &Token) {
        if self.heading_seen {
            self.structure_error(
                token.line_number,
                "Multiple specification headings found in the same file".to_string(),
            );
            return;
        }
        self.heading_seen = true;
        self.spec.heading = token.value.clone();
        self.spec.line_number = token.line_number;
    }

    fn process_comment(&mut self, token: &Token) {
        let text = if token.value.is_empty() {
            token.line_text.clone()
        } else {
            token.value.clone()
        };
        let comment = Comment::new(text).at(token.line_number);
        if self.heading_seen {
            self.pending_comments.push(comment);
        } else {
            self.spec.leading_comments.push(comment);
        }
    }

    fn process_scenario(&mut self, token: &Token) {
        if self.spec.teardown.is_some() {
            self.structure_error(
                token.line_number,
                "Scenario found after the teardown marker".to_string(),
            );
            return;
        }
        self.flush_comments();
        self.spec.items.push(SpecItem::Scenario(
            Scenario::new(token.value.clone()).at(token.line_number),
        ));
    }

    fn process_tags(&mut self, token: &Token) {
        if self.spec.teardown.is_some() {
            self.structure_error(
                token.line_number,
                "Tags are not allowed after the teardown marker".to_string(),
            );
            return;
        }
        self.flush_comments();
        let tags = tag_values(token);
        if let Some(scenario) = self.spec.last_scenario_mut() {
            let only_comments = scenario
                .items
                .iter()
                .all(|item| matches!(item, ScenarioItem::Comment(_)));
            if scenario.tags.is_empty() && only_comments {
                scenario.tags = tags;
            } else {
                let message = format!(
                    "Tags for scenario '{}' must directly follow its heading and be defined once",
                    scenario.heading
                );
                self.structure_error(token.line_number, message);
            }
        } else if self.spec.tags.is_empty() {
            self.spec.tags = tags;
        } else {
            self.structure_error(
                token.line_number,
                "Tags can be defined only once per specification".to_string(),
            );
        }
    }

    fn process_step(&mut self, token: &Token) {
        let data = match extract_step_text(&token.value) {
            Ok(data) => data,
            Err(err) => {
                self.diagnostics.push(
                    Diagnostic::error(token.line_number, err.to_string()).with_code(CODE_STEP_SYNTAX),
                );
                return;
            }
        };

        let mut step = Step::new(data.text)
            .with_args(data.args)
            .with_line_text(token.line_text.clone())
            .with_leading_comments(std::mem::take(&mut self.pending_comments))
            .at(token.line_number);
        self.dictionary.bind(&mut step);
        self.check_dynamic_args(&step);

        if let Some(teardown) = self.spec.teardown.as_mut() {
            teardown.steps.push(step);
        } else if let Some(scenario) = self.spec.last_scenario_mut() {
            scenario.items.push(ScenarioItem::Step(step));
        } else {
            self.spec.items.push(SpecItem::Step(step));
        }
        self.previous_was_step = true;
    }

    /// Dynamic arguments in a specification refer to columns of its data table
    fn check_dynamic_args(&mut self, step: &Step) {
        let table = self.spec.data_table();
        let unresolved: Vec<String> = step
            .args
            .iter()
            .filter(|arg| arg.kind == ArgumentKind::Dynamic)
            .filter(|arg| !table.is_some_and(|table| table.has_column(&arg.value)))
            .map(|arg| arg.value.clone())
            .collect();
        for name in unresolved {
            self.diagnostics.push(
                Diagnostic::warning(
                    step.line_number,
                    format!("Dynamic parameter <{}> could not be resolved", name),
                )
                .with_code(CODE_UNRESOLVED_PARAMETER),
            );
        }
    }

    fn process_table_header(&mut self, token: &Token, after_step: bool) {
        let target = match self.table_target {
            _ if after_step => TableTarget::Step,
            Some(TableTarget::Passthrough) | Some(TableTarget::Discard) => {
                self.append_stray_line(token);
                return;
            }
            Some(_) => {
                self.structure_error(
                    token.line_number,
                    "Table header found inside another table".to_string(),
                );
                self.stray_table_target(token.line_number)
            }
            None if self.in_spec_data_position() => {
                if self.spec.data_table().is_none() {
                    TableTarget::SpecData
                } else {
                    self.structure_error(
                        token.line_number,
                        "Multiple data tables found in the same specification".to_string(),
                    );
                    TableTarget::Passthrough
                }
            }
            None => self.stray_table_target(token.line_number),
        };

        let table = DataTable::new(token.args.clone()).at(token.line_number);
        match target {
            TableTarget::Step => {
                if let Some(step) = self.last_step_mut() {
                    step.inline_table = Some(table);
                }
            }
            TableTarget::SpecData => {
                self.flush_comments();
                self.spec.items.push(SpecItem::Table(table));
            }
            TableTarget::Passthrough => self.push_passthrough(token),
            TableTarget::Discard => {}
        }
        self.table_target = Some(target);
    }

    fn process_table_row(&mut self, token: &Token) {
        let target = match self.table_target {
            Some(target) => target,
            None => {
                let target = self.stray_table_target(token.line_number);
                if target == TableTarget::Passthrough {
                    self.diagnostics.push(
                        Diagnostic::warning(
                            token.line_number,
                            "Table row found without a table header".to_string(),
                        )
                        .with_code(CODE_STRUCTURE),
                    );
                    self.push_passthrough(token);
                }
                self.table_target = Some(target);
                return;
            }
        };

        let cells = token.args.clone();
        let actual = cells.len();
        let table = match target {
            TableTarget::Step => self
                .last_step_mut()
                .and_then(|step| step.inline_table.as_mut()),
            TableTarget::SpecData => match self.spec.items.last_mut() {
                Some(SpecItem::Table(table)) => Some(table),
                _ => None,
            },
            TableTarget::Passthrough | TableTarget::Discard => {
                self.append_stray_line(token);
                None
            }
        };

        let malformed = table.and_then(|table| {
            let expected = table.headers.len();
            table.add_row(cells);
            (expected != actual).then_some(expected)
        });
        if let Some(expected) = malformed {
            self.diagnostics.push(
                Diagnostic::error(
                    token.line_number,
                    format!(
                        "Table row has {} cells but the header has {} columns",
                        actual, expected
                    ),
                )
                .with_code(CODE_MALFORMED_TABLE),
            );
        }
    }

    fn process_teardown(&mut self, token: &Token) {
        if self.spec.teardown.is_some() {
            self.structure_error(
                token.line_number,
                "Multiple teardown markers found in the same specification".to_string(),
            );
            return;
        }
        self.flush_comments();
        let marker = if token.value.is_empty() {
            token.line_text.clone()
        } else {
            token.value.clone()
        };
        self.spec.teardown = Some(TearDown::new(marker).at(token.line_number));
    }

    /// Directly under the heading: no scenario, no step and no teardown yet
    fn in_spec_data_position(&self) -> bool {
        self.spec.teardown.is_none()
            && self
                .spec
                .items
                .iter()
                .all(|item| !matches!(item, SpecItem::Scenario(_) | SpecItem::Step(_)))
    }

    /// Target for table lines in a position where no table is valid
    fn stray_table_target(&mut self, line_number: usize) -> TableTarget {
        if self.spec.teardown.is_some() {
            self.structure_error(
                line_number,
                "Tables inside the teardown must directly follow a step".to_string(),
            );
            TableTarget::Discard
        } else {
            TableTarget::Passthrough
        }
    }

    fn append_stray_line(&mut self, token: &Token) {
        if self.table_target == Some(TableTarget::Passthrough) {
            if let Some(block) = self.current_passthrough_mut() {
                block.push_line(raw_line(token));
            }
        }
    }

    fn push_passthrough(&mut self, token: &Token) {
        self.flush_comments();
        let block = PassthroughBlock::new(token.line_number).with_line(raw_line(token));
        if let Some(scenario) = self.spec.last_scenario_mut() {
            scenario.items.push(ScenarioItem::Passthrough(block));
        } else {
            self.spec.items.push(SpecItem::Passthrough(block));
        }
    }

    fn current_passthrough_mut(&mut self) -> Option<&mut PassthroughBlock> {
        if self.spec.iter_scenarios().next().is_some() {
            match self.spec.last_scenario_mut()?.items.last_mut() {
                Some(ScenarioItem::Passthrough(block)) => Some(block),
                _ => None,
            }
        } else {
            match self.spec.items.last_mut() {
                Some(SpecItem::Passthrough(block)) => Some(block),
                _ => None,
            }
        }
    }

    /// The step created most recently, in whichever container holds it
    fn last_step_mut(&mut self) -> Option<&mut Step> {
        if self.spec.teardown.is_some() {
            return self
                .spec
                .teardown
                .as_mut()
                .and_then(|teardown| teardown.steps.last_mut());
        }
        if self.spec.iter_scenarios().next().is_some() {
            return self.spec.last_scenario_mut()?.last_step_mut();
        }
        match self.spec.items.last_mut() {
            Some(SpecItem::Step(step)) => Some(step),
            _ => None,
        }
    }

    /// Comments not followed by a step become items of the open container
    fn flush_comments(&mut self) {
        if self.pending_comments.is_empty() {
            return;
        }
        let comments = std::mem::take(&mut self.pending_comments);
        if let Some(teardown) = self.spec.teardown.as_mut() {
            teardown.trailing_comments.extend(comments);
        } else if let Some(scenario) = self.spec.last_scenario_mut() {
            scenario
                .items
                .extend(comments.into_iter().map(ScenarioItem::Comment));
        } else {
            self.spec
                .items
                .extend(comments.into_iter().map(SpecItem::Comment));
        }
    }

    fn structure_error(&mut self, line_number: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::error(line_number, message).with_code(CODE_STRUCTURE));
    }
}

fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Spec => "Specification heading",
        TokenKind::Scenario => "Scenario heading",
        TokenKind::Step => "Step",
        TokenKind::Tag => "Tag line",
        TokenKind::TableHeader => "Table header",
        TokenKind::TableRow => "Table row",
        TokenKind::TearDown => "Teardown marker",
        TokenKind::Comment => "Comment",
    }
}

/// Tag names from the token args, or parsed from the `tags:` line when the lexer left them out
fn tag_values(token: &Token) -> Vec<String> {
    if !token.args.is_empty() {
        return token.args.clone();
    }
    let value = token.value.trim();
    let list = match value.split_once(':') {
        Some((prefix, rest)) if prefix.trim().eq_ignore_ascii_case("tags") => rest,
        _ => value,
    };
    list.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// The source line of a table token, rebuilt from its cells if the lexer did not keep it
fn raw_line(token: &Token) -> String {
    if token.line_text.is_empty() {
        format!("|{}|", token.args.join("|"))
    } else {
        token.line_text.clone()
    }
}
