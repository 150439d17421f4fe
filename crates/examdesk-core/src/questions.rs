//! Ordered question entries with position-independent keys.
//!
//! Keys let a view keep track of an entry (selection, error display) while
//! other entries are appended or removed. The list itself enforces nothing
//! about its length; the "at least one question" rule lives in the schema.

use std::fmt;

use uuid::Uuid;

use crate::draft::QuestionDraft;

/// Mark given to a question appended without one.
pub const DEFAULT_MARK: &str = "1";

/// Stable key of a question entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey(Uuid);

impl FieldKey {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question plus its key.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionEntry {
    key: FieldKey,
    pub question: QuestionDraft,
}

impl QuestionEntry {
    pub fn key(&self) -> FieldKey {
        self.key
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionList {
    entries: Vec<QuestionEntry>,
}

impl QuestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question; a blank mark is replaced by [`DEFAULT_MARK`].
    pub fn append(&mut self, mut question: QuestionDraft) -> FieldKey {
        if question.mark.trim().is_empty() {
            question.mark = DEFAULT_MARK.to_string();
        }
        let key = FieldKey::generate();
        self.entries.push(QuestionEntry { key, question });
        key
    }

    /// Remove the entry at `index`. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<QuestionDraft> {
        if index < self.entries.len() {
            Some(self.entries.remove(index).question)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionDraft> {
        self.entries.get(index).map(|e| &e.question)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut QuestionDraft> {
        self.entries.get_mut(index).map(|e| &mut e.question)
    }

    /// Current position of the entry with `key`.
    pub fn position(&self, key: FieldKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionDraft> {
        self.entries.iter().map(|e| &e.question)
    }
}

impl FromIterator<QuestionDraft> for QuestionList {
    fn from_iter<I: IntoIterator<Item = QuestionDraft>>(iter: I) -> Self {
        let mut list = Self::new();
        for question in iter {
            list.append(question);
        }
        list
    }
}
