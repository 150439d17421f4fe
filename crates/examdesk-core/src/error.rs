//! Error types for validation, uploads and the wizard.

use std::fmt;

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path (e.g., `title`, `questions[1].mark`).
    pub path: String,

    /// Message shown next to the field.
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All field errors produced by one validation pass, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// First error for an exact field path.
    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    /// Errors whose path belongs to question `index`.
    pub fn for_question(&self, index: usize) -> impl Iterator<Item = &FieldError> {
        let prefix = format!("questions[{}].", index);
        self.errors
            .iter()
            .filter(move |e| e.path.starts_with(&prefix))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Client-side rejection of an upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// File is not a PDF (by extension or content).
    #[error("only PDF files can be uploaded: {file_name}")]
    NotPdf { file_name: String },

    /// File has no content.
    #[error("file is empty: {file_name}")]
    Empty { file_name: String },

    /// File could not be read.
    #[error("failed to read {file_name}: {message}")]
    Io { file_name: String, message: String },
}

/// Wizard errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Current step (or the whole draft on submit) failed validation.
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),

    /// Backend rejected or failed the submission.
    #[error("submission failed: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    /// Submit was requested before reaching the review step.
    #[error("submit is only available on the review step")]
    NotOnReview,

    /// Advance was requested on the last step.
    #[error("already on the last step")]
    AtLastStep,

    /// The session was already submitted.
    #[error("the session has already been submitted")]
    Closed,
}

impl WizardError {
    /// Field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
