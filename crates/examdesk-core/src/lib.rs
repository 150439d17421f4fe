//! Exam authoring core.
//!
//! This crate holds everything the exam frontend does without touching the
//! network:
//!
//! - The exam data model as the backend serializes it
//! - Editable drafts and the question field array
//! - A declarative schema validator with mark coercion
//! - The three-step authoring wizard (details, questions, review)
//! - The client-side PDF upload gate
//!
//! # Quick Start
//!
//! ```no_run
//! use examdesk_core::{ExamWizard, QuestionDraft, WizardStep};
//!
//! let mut wizard = ExamWizard::create();
//! wizard.draft_mut().title = "Midterm".into();
//! wizard.draft_mut().subject = "Physics".into();
//! assert_eq!(wizard.advance().unwrap(), WizardStep::Questions);
//!
//! wizard.draft_mut().questions.append(QuestionDraft {
//!     text: "State Newton's second law.".into(),
//!     ideal_answer: "F = ma".into(),
//!     ..QuestionDraft::default()
//! });
//! assert_eq!(wizard.advance().unwrap(), WizardStep::Review);
//! ```
//!
//! Submission goes through the [`ExamBackend`] trait, implemented by the
//! `examdesk-client` crate.

pub mod draft;
pub mod error;
pub mod id;
pub mod model;
pub mod questions;
pub mod schema;
pub mod upload;
pub mod wizard;

pub use draft::{DraftFile, ExamDraft, QuestionDraft};
pub use error::{FieldError, FieldErrors, UploadError, WizardError};
pub use id::ResourceId;
pub use model::{Exam, ExamPayload, Question, WireText};
pub use questions::{FieldKey, QuestionEntry, QuestionList, DEFAULT_MARK};
pub use schema::{coerce_mark, validate_details, validate_exam, validate_questions};
pub use upload::{PdfDocument, PDF_MIME};
pub use wizard::{ExamBackend, ExamWizard, WizardMode, WizardStep};
