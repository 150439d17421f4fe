//! Exam and question types as exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::ResourceId;

/// Optional free text that keeps its wire form: absent, `null` or a string.
///
/// The backend may omit a nullable text field, send `null` or send `""`.
/// Each form is written back exactly as it was read, so an unmodified exam
/// round-trips byte for byte. Use `#[serde(default, skip_serializing_if =
/// "WireText::is_absent")]` on fields of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WireText {
    #[default]
    Absent,
    Null,
    Text(String),
}

impl WireText {
    /// The text, or `""` when absent or null.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Absent | Self::Null => "",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Non-empty text, if any.
    pub fn non_empty(&self) -> Option<&str> {
        Some(self.as_str()).filter(|s| !s.is_empty())
    }

    /// Wire value for `text` typed into a form.
    ///
    /// Text equal to what `saved` displays keeps `saved` unchanged; cleared
    /// text becomes `blank`; anything else is sent as typed.
    pub fn from_form(text: &str, saved: Option<&WireText>, blank: WireText) -> WireText {
        match saved {
            Some(saved) if saved.as_str() == text => saved.clone(),
            _ if text.is_empty() => blank,
            _ => Self::Text(text.to_string()),
        }
    }
}

impl From<&str> for WireText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for WireText {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Serialize for WireText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for WireText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(text) => Self::Text(text),
            None => Self::Null,
        })
    }
}

/// An exam as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    /// Backend-assigned identifier.
    pub id: ResourceId,

    /// Exam title.
    pub title: String,

    /// Subject (e.g., "Physics").
    pub subject: String,

    /// Free-text grading instructions.
    #[serde(default, skip_serializing_if = "WireText::is_absent")]
    pub instructions: WireText,

    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,

    /// When the exam was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the exam was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single gradeable question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Absent until the question has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,

    /// Question text.
    pub text: String,

    /// Reference answer used for grading.
    pub ideal_answer: String,

    /// Optional grading note for this question.
    #[serde(default, skip_serializing_if = "WireText::is_absent")]
    pub instructions: WireText,

    /// Points awarded for a full answer (at least 1).
    pub mark: u32,
}

/// Request body for create (POST) and update (PUT, full replacement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPayload {
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "WireText::is_absent")]
    pub instructions: WireText,
    pub questions: Vec<Question>,
}

impl From<&Exam> for ExamPayload {
    fn from(exam: &Exam) -> Self {
        Self {
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            instructions: exam.instructions.clone(),
            questions: exam.questions.clone(),
        }
    }
}

impl Exam {
    /// Total marks across all questions.
    ///
    /// Summed as `u64`: every mark may be as large as `u32::MAX`.
    pub fn total_marks(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.mark)).sum()
    }

    /// Names of the writable fields where `payload` differs from this exam.
    pub fn differences(&self, payload: &ExamPayload) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.title != payload.title {
            changed.push("title");
        }
        if self.subject != payload.subject {
            changed.push("subject");
        }
        if self.instructions != payload.instructions {
            changed.push("instructions");
        }
        if self.questions != payload.questions {
            changed.push("questions");
        }
        changed
    }
}
