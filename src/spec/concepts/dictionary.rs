//! Concept registry
//!
//! Maps a concept signature to its definition. Lookup order does not matter, but anything that
//! renders concepts must use [ConceptDictionary::iter_ordered], which sorts by source file and
//! then definition line, so output never depends on hash order.

use crate::spec::ast::{Comment, ConceptBinding, Step};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// A concept definition and the file it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    pub definition: Step,
    pub source_file: String,
    /// Comments after the last concept of a file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trailing_comments: Vec<Comment>,
}

impl Concept {
    pub fn new(mut definition: Step, source_file: impl Into<String>) -> Self {
        definition.is_concept = true;
        Self {
            definition,
            source_file: source_file.into(),
            trailing_comments: Vec::new(),
        }
    }

    pub fn signature(&self) -> &str {
        &self.definition.text
    }

    pub fn line_number(&self) -> usize {
        self.definition.line_number
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConceptError {
    #[error(
        "Duplicate concept definition '{signature}' in {source_file}:{line_number}, already defined in {existing_file}"
    )]
    Duplicate {
        signature: String,
        source_file: String,
        line_number: usize,
        existing_file: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ConceptDictionary {
    concepts: HashMap<String, Concept>,
}

impl ConceptDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concept. A signature that is already present is rejected and the first
    /// definition stays.
    pub fn register(&mut self, concept: Concept) -> Result<(), ConceptError> {
        if let Some(existing) = self.concepts.get(concept.signature()) {
            return Err(ConceptError::Duplicate {
                signature: concept.signature().to_string(),
                source_file: concept.source_file.clone(),
                line_number: concept.line_number(),
                existing_file: existing.source_file.clone(),
            });
        }
        self.concepts
            .insert(concept.signature().to_string(), concept);
        Ok(())
    }

    pub fn lookup(&self, signature: &str) -> Option<&Concept> {
        self.concepts.get(signature)
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.concepts.contains_key(signature)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Iterate in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    /// Concepts sorted by source file, then definition line
    pub fn iter_ordered(&self) -> Vec<&Concept> {
        let mut concepts: Vec<&Concept> = self.concepts.values().collect();
        concepts.sort_by(|a, b| {
            (a.source_file.as_str(), a.line_number(), a.signature()).cmp(&(
                b.source_file.as_str(),
                b.line_number(),
                b.signature(),
            ))
        });
        concepts
    }

    /// Mark `step` as an invocation if its text is a registered signature, binding its
    /// arguments to the definition's parameters by position. Returns whether it matched.
    pub fn bind(&self, step: &mut Step) -> bool {
        match self.lookup(&step.text) {
            Some(concept) => {
                step.is_concept = true;
                step.concept_bindings = bindings_for(&concept.definition, step);
                true
            }
            None => false,
        }
    }

    /// Mark body steps that invoke other registered concepts. Call once all concept files are
    /// registered; returns the number of steps marked.
    pub fn link_nested_invocations(&mut self) -> usize {
        let parameters: HashMap<String, Vec<String>> = self
            .concepts
            .iter()
            .map(|(signature, concept)| {
                let names = concept
                    .definition
                    .parameter_names()
                    .map(str::to_string)
                    .collect();
                (signature.clone(), names)
            })
            .collect();

        let mut linked = 0;
        for concept in self.concepts.values_mut() {
            for step in concept.definition.concept_steps.iter_mut() {
                if let Some(names) = parameters.get(&step.text) {
                    step.is_concept = true;
                    step.concept_bindings = names
                        .iter()
                        .zip(step.args.iter())
                        .map(|(name, arg)| ConceptBinding {
                            parameter: name.clone(),
                            argument: arg.clone(),
                        })
                        .collect();
                    linked += 1;
                }
            }
        }
        tracing::debug!(linked, concepts = self.concepts.len(), "linked nested concepts");
        linked
    }
}

fn bindings_for(definition: &Step, invocation: &Step) -> Vec<ConceptBinding> {
    definition
        .parameter_names()
        .zip(invocation.args.iter())
        .map(|(name, arg)| ConceptBinding {
            parameter: name.to_string(),
            argument: arg.clone(),
        })
        .collect()
}
