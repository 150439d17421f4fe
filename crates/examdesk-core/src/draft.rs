//! Editable exam drafts.
//!
//! A draft is the transient form copy of an exam. Every field is text so the
//! user can type anything; the schema decides what is acceptable and coerces
//! marks when the draft is turned into an [`ExamPayload`].

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FieldError, FieldErrors};
use crate::id::ResourceId;
use crate::model::{Exam, ExamPayload, Question, WireText};
use crate::questions::{QuestionList, DEFAULT_MARK};
use crate::schema;

/// Form state for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    /// Set when editing a persisted question.
    pub id: Option<ResourceId>,
    pub text: String,
    pub ideal_answer: String,
    /// Grading note; empty means none.
    pub instructions: String,
    /// Raw mark input, coerced by the schema.
    pub mark: String,
    /// The note as loaded from the backend; unchanged text is written back
    /// in this form.
    pub saved_instructions: Option<WireText>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            id: None,
            text: String::new(),
            ideal_answer: String::new(),
            instructions: String::new(),
            mark: DEFAULT_MARK.to_string(),
            saved_instructions: None,
        }
    }
}

impl QuestionDraft {
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            ideal_answer: question.ideal_answer.clone(),
            instructions: question.instructions.as_str().to_string(),
            mark: question.mark.to_string(),
            saved_instructions: Some(question.instructions.clone()),
        }
    }

    fn to_question(&self, index: usize) -> Result<Question, FieldError> {
        let mark = schema::coerce_mark(&self.mark)
            .map_err(|message| FieldError::new(schema::question_path(index, "mark"), message))?;

        Ok(Question {
            id: self.id.clone(),
            text: self.text.clone(),
            ideal_answer: self.ideal_answer.clone(),
            instructions: WireText::from_form(
                &self.instructions,
                self.saved_instructions.as_ref(),
                WireText::Absent,
            ),
            mark,
        })
    }
}

/// Form state for a whole exam.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamDraft {
    pub title: String,
    pub subject: String,
    pub instructions: String,
    pub questions: QuestionList,
    /// Instructions as loaded from the backend (see [`QuestionDraft`]).
    pub saved_instructions: Option<WireText>,
}

impl ExamDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a fetched exam (edit flow).
    pub fn from_exam(exam: &Exam) -> Self {
        Self {
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            instructions: exam.instructions.as_str().to_string(),
            questions: exam
                .questions
                .iter()
                .map(QuestionDraft::from_question)
                .collect(),
            saved_instructions: Some(exam.instructions.clone()),
        }
    }

    /// Validate the full draft and build the request body.
    pub fn to_payload(&self) -> Result<ExamPayload, FieldErrors> {
        schema::validate_exam(self).into_result()?;

        let mut errors = FieldErrors::new();
        let mut questions = Vec::with_capacity(self.questions.len());
        for (index, question) in self.questions.iter().enumerate() {
            match question.to_question(index) {
                Ok(q) => questions.push(q),
                Err(e) => errors.push(e),
            }
        }
        errors.into_result()?;

        Ok(ExamPayload {
            title: self.title.clone(),
            subject: self.subject.clone(),
            instructions: WireText::from_form(
                &self.instructions,
                self.saved_instructions.as_ref(),
                WireText::Text(String::new()),
            ),
            questions,
        })
    }
}

/// On-disk draft format (YAML or JSON) for non-interactive authoring.
///
/// ```yaml
/// title: Midterm
/// subject: Physics
/// instructions: Be lenient on units.
/// questions:
///   - text: Define force.
///     ideal_answer: F = ma
///     mark: 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftFile {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub instructions: String,

    #[serde(default)]
    pub questions: Vec<DraftFileQuestion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftFileQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub ideal_answer: String,

    #[serde(default)]
    pub instructions: Option<String>,

    /// Number or string; blank falls back to the default mark.
    #[serde(default, deserialize_with = "mark_as_text")]
    pub mark: String,
}

impl DraftFile {
    /// Parse YAML (JSON documents are accepted as well).
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn into_draft(self) -> ExamDraft {
        ExamDraft {
            title: self.title,
            subject: self.subject,
            instructions: self.instructions,
            questions: self
                .questions
                .into_iter()
                .map(|q| QuestionDraft {
                    id: q.id,
                    text: q.text,
                    ideal_answer: q.ideal_answer,
                    instructions: q.instructions.unwrap_or_default(),
                    mark: q.mark,
                    saved_instructions: None,
                })
                .collect(),
            saved_instructions: None,
        }
    }
}

fn mark_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMark {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<RawMark>::deserialize(deserializer)? {
        Some(RawMark::Int(n)) => n.to_string(),
        Some(RawMark::Float(f)) => f.to_string(),
        Some(RawMark::Text(s)) => s,
        None => String::new(),
    })
}
