//! Concept file builder
//!
//! Reads the tokens of one concept file into the [ConceptDictionary]. A concept file uses the
//! specification heading syntax for definitions:
//!
//! ```text
//! Spec        -> opens a definition; its arguments are the parameters and must all be dynamic
//! Step        -> body step of the open definition
//! Table*      -> inline table of the body step right before it
//! Comment     -> leading comment of the next definition or body step
//! ```
//!
//! Scenarios, tags and the teardown marker have no meaning here and are reported.

use crate::spec::ast::diagnostics::{
    CODE_DUPLICATE_CONCEPT, CODE_MALFORMED_TABLE, CODE_STEP_SYNTAX, CODE_STRUCTURE,
    CODE_UNRESOLVED_PARAMETER,
};
use crate::spec::ast::{ArgumentKind, Comment, DataTable, Diagnostic, Step};
use crate::spec::building::extraction::extract_step_text;
use crate::spec::concepts::dictionary::{Concept, ConceptDictionary};
use crate::spec::token::{Token, TokenKind};

/// Build every concept in `tokens` and register it. Returns the problems found; concepts that
/// could not be built or registered are skipped.
pub fn build_concepts(
    tokens: &[Token],
    source_file: &str,
    dictionary: &mut ConceptDictionary,
) -> Vec<Diagnostic> {
    ConceptBuilder::new(source_file, dictionary).build(tokens)
}

pub struct ConceptBuilder<'a> {
    source_file: String,
    dictionary: &'a mut ConceptDictionary,
    diagnostics: Vec<Diagnostic>,
    /// Definition being read, body collected in `concept_steps`
    current: Option<Step>,
    /// Set while skipping the body of a rejected definition
    skipping: bool,
    pending_comments: Vec<Comment>,
    table: TableState,
    registered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Closed,
    /// Rows go to the inline table of the last body step
    Inline,
    /// Rows of a misplaced table, already reported
    Stray,
}

impl<'a> ConceptBuilder<'a> {
    pub fn new(source_file: impl Into<String>, dictionary: &'a mut ConceptDictionary) -> Self {
        Self {
            source_file: source_file.into(),
            dictionary,
            diagnostics: Vec::new(),
            current: None,
            skipping: false,
            pending_comments: Vec::new(),
            table: TableState::Closed,
            registered: 0,
        }
    }

    pub fn build(mut self, tokens: &[Token]) -> Vec<Diagnostic> {
        let mut previous_was_step = false;
        for token in tokens {
            let after_step = std::mem::take(&mut previous_was_step);
            if !token.kind.is_table() {
                self.table = TableState::Closed;
            }
            match token.kind {
                TokenKind::Spec => self.open_definition(token),
                TokenKind::Step => previous_was_step = self.push_body_step(token),
                TokenKind::TableHeader => self.open_table(token, after_step),
                TokenKind::TableRow => self.push_table_row(token),
                TokenKind::Comment => self.pending_comments.push(
                    Comment::new(comment_text(token)).at(token.line_number),
                ),
                TokenKind::Scenario | TokenKind::Tag | TokenKind::TearDown => {
                    tracing::trace!(%token, "token not valid in a concept file");
                    self.structure_error(
                        token.line_number,
                        format!("{} is not allowed in a concept file", token.kind),
                    );
                }
            }
        }
        self.finish_file();

        tracing::debug!(
            file = %self.source_file,
            concepts = self.registered,
            diagnostics = self.diagnostics.len(),
            "built concepts"
        );
        self.diagnostics
    }

    fn open_definition(&mut self, token: &Token) {
        self.close_definition();
        self.skipping = false;

        let data = match extract_step_text(&token.value) {
            Ok(data) => data,
            Err(err) => {
                self.step_syntax_error(token.line_number, err.to_string());
                self.skip_definition();
                return;
            }
        };
        if let Some(arg) = data.args.iter().find(|arg| arg.kind != ArgumentKind::Dynamic) {
            let message = format!(
                "Concept heading '{}' can only have dynamic parameters, found {}",
                token.value, arg
            );
            self.step_syntax_error(token.line_number, message);
            self.skip_definition();
            return;
        }

        let definition = Step::new(data.text)
            .with_args(data.args)
            .with_line_text(token.line_text.clone())
            .with_leading_comments(std::mem::take(&mut self.pending_comments))
            .at(token.line_number)
            .as_concept(Vec::new());
        self.current = Some(definition);
    }

    /// Returns whether a body step was added
    fn push_body_step(&mut self, token: &Token) -> bool {
        if self.skipping {
            self.pending_comments.clear();
            return false;
        }
        if self.current.is_none() {
            self.structure_error(
                token.line_number,
                "Step found before the first concept heading".to_string(),
            );
            return false;
        }
        let data = match extract_step_text(&token.value) {
            Ok(data) => data,
            Err(err) => {
                self.step_syntax_error(token.line_number, err.to_string());
                return false;
            }
        };

        let step = Step::new(data.text)
            .with_args(data.args)
            .with_line_text(token.line_text.clone())
            .with_leading_comments(std::mem::take(&mut self.pending_comments))
            .at(token.line_number);
        let unresolved: Vec<String> = match self.current.as_ref() {
            Some(definition) => step
                .args
                .iter()
                .filter(|arg| arg.kind == ArgumentKind::Dynamic)
                .filter(|arg| !definition.parameter_names().any(|name| name == arg.value))
                .map(|arg| arg.value.clone())
                .collect(),
            None => Vec::new(),
        };
        for name in unresolved {
            self.diagnostics.push(
                Diagnostic::warning(
                    token.line_number,
                    format!("Dynamic parameter <{}> is not a parameter of the concept", name),
                )
                .with_code(CODE_UNRESOLVED_PARAMETER),
            );
        }

        if let Some(definition) = self.current.as_mut() {
            definition.concept_steps.push(step);
        }
        true
    }

    fn open_table(&mut self, token: &Token, after_step: bool) {
        if self.skipping || self.table == TableState::Stray {
            return;
        }
        if !after_step {
            self.structure_error(
                token.line_number,
                "Tables in a concept file must directly follow a step".to_string(),
            );
            self.table = TableState::Stray;
            return;
        }
        if let Some(step) = self.last_body_step_mut() {
            step.inline_table = Some(DataTable::new(token.args.clone()).at(token.line_number));
            self.table = TableState::Inline;
        }
    }

    fn push_table_row(&mut self, token: &Token) {
        match self.table {
            _ if self.skipping => return,
            TableState::Stray => return,
            TableState::Closed => {
                self.structure_error(
                    token.line_number,
                    "Table row found without a table header".to_string(),
                );
                self.table = TableState::Stray;
                return;
            }
            TableState::Inline => {}
        }

        let cells = token.args.clone();
        let actual = cells.len();
        let malformed = self
            .last_body_step_mut()
            .and_then(|step| step.inline_table.as_mut())
            .and_then(|table| {
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

    fn last_body_step_mut(&mut self) -> Option<&mut Step> {
        self.current
            .as_mut()
            .and_then(|definition| definition.concept_steps.last_mut())
    }

    fn skip_definition(&mut self) {
        self.skipping = true;
        self.pending_comments.clear();
    }

    fn close_definition(&mut self) {
        self.close_definition_with(Vec::new());
    }

    fn close_definition_with(&mut self, trailing_comments: Vec<Comment>) {
        let Some(definition) = self.current.take() else {
            return;
        };
        let line_number = definition.line_number;
        let mut concept = Concept::new(definition, self.source_file.clone());
        concept.trailing_comments = trailing_comments;
        match self.dictionary.register(concept) {
            Ok(()) => self.registered += 1,
            Err(err) => self.diagnostics.push(
                Diagnostic::error(line_number, err.to_string()).with_code(CODE_DUPLICATE_CONCEPT),
            ),
        }
    }

    /// Comments left at the end of the file belong to the last concept
    fn finish_file(&mut self) {
        let comments = std::mem::take(&mut self.pending_comments);
        if self.current.is_none() && !comments.is_empty() {
            let line = comments.first().map(|c| c.line_number).unwrap_or(1);
            self.diagnostics.push(
                Diagnostic::warning(line, "Comments at the end of the file were dropped".to_string())
                    .with_code(CODE_STRUCTURE),
            );
        }
        self.close_definition_with(comments);
    }

    fn step_syntax_error(&mut self, line_number: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::error(line_number, message).with_code(CODE_STEP_SYNTAX));
    }

    fn structure_error(&mut self, line_number: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::error(line_number, message).with_code(CODE_STRUCTURE));
    }
}

fn comment_text(token: &Token) -> String {
    if token.value.is_empty() {
        token.line_text.clone()
    } else {
        token.value.clone()
    }
}
