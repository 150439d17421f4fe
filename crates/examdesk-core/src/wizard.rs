//! Three-step exam authoring wizard.
//!
//! ```text
//! Details ──advance──▶ Questions ──advance──▶ Review ──submit──▶ (closed)
//!    ◀──retreat──          ◀──retreat──
//! ```
//!
//! `advance` is gated on the current step's rules; `retreat` never is.
//! Submission revalidates everything and is terminal on success.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::draft::ExamDraft;
use crate::error::{FieldErrors, WizardError};
use crate::id::ResourceId;
use crate::model::{Exam, ExamPayload};
use crate::schema;

/// Persistence seam used by [`ExamWizard::submit`].
#[async_trait]
pub trait ExamBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_exam(&self, payload: &ExamPayload) -> Result<Exam, Self::Error>;

    async fn update_exam(&self, id: &ResourceId, payload: &ExamPayload)
        -> Result<Exam, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Details = 1,
    Questions = 2,
    Review = 3,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Exam details",
            Self::Questions => "Questions",
            Self::Review => "Review",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Details => Some(Self::Questions),
            Self::Questions => Some(Self::Review),
            Self::Review => None,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Details | Self::Questions => Self::Details,
            Self::Review => Self::Questions,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of 3: {}", self.number(), self.title())
    }
}

/// Whether submission creates a new exam or replaces an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardMode {
    Create,
    /// Editing the exam the session was opened from.
    Edit(Box<Exam>),
}

type CompletionCallback = Box<dyn FnOnce(&Exam) + Send>;

/// One authoring session.
pub struct ExamWizard {
    step: WizardStep,
    mode: WizardMode,
    draft: ExamDraft,
    errors: FieldErrors,
    submitted: Option<Exam>,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for ExamWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamWizard")
            .field("step", &self.step)
            .field("mode", &self.mode)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("submitted", &self.submitted)
            .finish_non_exhaustive()
    }
}

impl ExamWizard {
    /// Start an empty create session.
    pub fn create() -> Self {
        Self::with_draft(WizardMode::Create, ExamDraft::new())
    }

    /// Start an edit session seeded from `exam`.
    pub fn edit(exam: Exam) -> Self {
        let draft = ExamDraft::from_exam(&exam);
        Self::with_draft(WizardMode::Edit(Box::new(exam)), draft)
    }

    pub fn with_draft(mode: WizardMode, draft: ExamDraft) -> Self {
        Self {
            step: WizardStep::Details,
            mode,
            draft,
            errors: FieldErrors::new(),
            submitted: None,
            on_complete: None,
        }
    }

    /// Run `callback` with the saved exam after a successful submit.
    pub fn on_complete(mut self, callback: impl FnOnce(&Exam) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn draft(&self) -> &ExamDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ExamDraft {
        &mut self.draft
    }

    /// Errors from the last failed transition or submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The saved exam, once submitted.
    pub fn submitted(&self) -> Option<&Exam> {
        self.submitted.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.submitted.is_some()
    }

    /// Validate the current step and move forward.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_open()?;
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;

        let errors = match self.step {
            WizardStep::Details => schema::validate_details(&self.draft),
            WizardStep::Questions => schema::validate_questions(&self.draft),
            WizardStep::Review => FieldErrors::new(),
        };

        if !errors.is_empty() {
            debug!(step = self.step.number(), errors = errors.len(), "step validation failed");
            self.errors = errors.clone();
            return Err(WizardError::Invalid(errors));
        }

        self.errors = FieldErrors::new();
        self.step = next;
        Ok(next)
    }

    /// Move back one step (stays on the first step).
    pub fn retreat(&mut self) -> WizardStep {
        self.errors = FieldErrors::new();
        self.step = self.step.previous();
        self.step
    }

    /// Top-level fields changed relative to the exam being edited.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let WizardMode::Edit(original) = &self.mode else {
            return Vec::new();
        };
        match self.draft.to_payload() {
            Ok(payload) => original.differences(&payload),
            Err(_) => Vec::new(),
        }
    }

    /// Validate everything and send the draft to `backend`.
    ///
    /// On failure the session stays on the review step and can be retried.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<&Exam, WizardError>
    where
        B: ExamBackend + ?Sized,
    {
        self.ensure_open()?;
        if self.step != WizardStep::Review {
            return Err(WizardError::NotOnReview);
        }

        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(WizardError::Invalid(errors));
            }
        };
        self.errors = FieldErrors::new();

        let result = match &self.mode {
            WizardMode::Create => backend.create_exam(&payload).await,
            WizardMode::Edit(original) => backend.update_exam(&original.id, &payload).await,
        };

        let exam = match result {
            Ok(exam) => exam,
            Err(e) => {
                error!(error = %e, "exam submission failed");
                return Err(WizardError::Backend(Box::new(e)));
            }
        };

        info!(id = %exam.id, questions = exam.questions.len(), "exam saved");
        if let Some(callback) = self.on_complete.take() {
            callback(&exam);
        }
        let saved = self.submitted.insert(exam);
        Ok(&*saved)
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.is_closed() {
            Err(WizardError::Closed)
        } else {
            Ok(())
        }
    }
}
