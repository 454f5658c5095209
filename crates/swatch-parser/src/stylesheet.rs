//! The parsed, not yet merged, contents of one style file.

use std::collections::HashMap;

use swatch_core::{identifier::KeyPath, value::RawValue};

use crate::{error::Diagnostic, span::Span};

/// One resolved `key = literal` line, under its full key path.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    path: KeyPath,
    value: RawValue,
    span: Span,
}

impl Assignment {
    pub fn new(path: KeyPath, value: RawValue, span: Span) -> Self {
        Self { path, value, span }
    }

    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    /// Span of the assignment line in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn into_parts(self) -> (KeyPath, RawValue) {
        (self.path, self.value)
    }
}

/// Assignments of one file in source order.
///
/// A path assigned twice appears twice; [`get`](Self::get) and merging in
/// order both see the later value.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    assignments: Vec<Assignment>,
    latest: HashMap<KeyPath, usize>,
    warnings: Vec<Diagnostic>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest value assigned to `path` in this file.
    pub fn get(&self, path: &KeyPath) -> Option<&RawValue> {
        self.latest
            .get(path)
            .map(|&index| self.assignments[index].value())
    }

    /// Append an assignment, returning the one it overrides.
    pub(crate) fn push(&mut self, assignment: Assignment) -> Option<&Assignment> {
        let index = self.assignments.len();
        let previous = self.latest.insert(assignment.path.clone(), index);
        self.assignments.push(assignment);
        previous.map(|index| &self.assignments[index])
    }

    pub(crate) fn set_warnings(&mut self, warnings: Vec<Diagnostic>) {
        self.warnings = warnings;
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    /// Number of assignments, duplicates included.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Non-fatal diagnostics reported while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

impl IntoIterator for Stylesheet {
    type Item = Assignment;
    type IntoIter = std::vec::IntoIter<Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stylesheet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
