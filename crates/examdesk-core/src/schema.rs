//! Declarative validation rules for exam drafts.
//!
//! Rules are grouped by wizard step. The details step covers exam metadata;
//! the questions step covers the question list and every question in it.
//! Full validation is the union of both.

use crate::draft::{ExamDraft, QuestionDraft};
use crate::error::{FieldError, FieldErrors};

/// Smallest accepted mark.
pub const MIN_MARK: u32 = 1;

/// Smallest number of questions for a submittable exam.
pub const MIN_QUESTIONS: usize = 1;

#[derive(Debug, Clone, Copy)]
enum Check {
    /// Non-blank after trimming.
    Required,
    /// Coerces to a whole number >= the bound.
    WholeNumberAtLeast(u32),
}

struct TextRule<T: 'static> {
    field: &'static str,
    label: &'static str,
    value: fn(&T) -> &str,
    check: Check,
}

const DETAILS_RULES: &[TextRule<ExamDraft>] = &[
    TextRule {
        field: "title",
        label: "Title",
        value: exam_title,
        check: Check::Required,
    },
    TextRule {
        field: "subject",
        label: "Subject",
        value: exam_subject,
        check: Check::Required,
    },
];

const QUESTION_RULES: &[TextRule<QuestionDraft>] = &[
    TextRule {
        field: "text",
        label: "Question text",
        value: question_text,
        check: Check::Required,
    },
    TextRule {
        field: "ideal_answer",
        label: "Ideal answer",
        value: question_ideal_answer,
        check: Check::Required,
    },
    TextRule {
        field: "mark",
        label: "Mark",
        value: question_mark,
        check: Check::WholeNumberAtLeast(MIN_MARK),
    },
];

fn exam_title(d: &ExamDraft) -> &str {
    &d.title
}

fn exam_subject(d: &ExamDraft) -> &str {
    &d.subject
}

fn question_text(q: &QuestionDraft) -> &str {
    &q.text
}

fn question_ideal_answer(q: &QuestionDraft) -> &str {
    &q.ideal_answer
}

fn question_mark(q: &QuestionDraft) -> &str {
    &q.mark
}

/// Path of a per-question field, e.g. `questions[0].mark`.
pub fn question_path(index: usize, field: &str) -> String {
    format!("questions[{}].{}", index, field)
}

/// Coerce a raw mark to a whole number >= [`MIN_MARK`].
///
/// Accepts surrounding whitespace and integral decimals (`"3.0"`).
pub fn coerce_mark(raw: &str) -> Result<u32, String> {
    coerce_whole_number(raw, "Mark", MIN_MARK)
}

fn coerce_whole_number(raw: &str, label: &str, min: u32) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is required", label));
    }

    let value = match raw.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            let f: f64 = raw
                .parse()
                .ok()
                .filter(|f: &f64| f.is_finite())
                .ok_or_else(|| format!("{} must be a number", label))?;
            if f.fract() != 0.0 {
                return Err(format!("{} must be a whole number", label));
            }
            if f < f64::from(min) {
                return Err(format!("{} must be at least {}", label, min));
            }
            if f > f64::from(u32::MAX) {
                return Err(format!("{} is too large", label));
            }
            f as u32
        }
    };

    if value < min {
        return Err(format!("{} must be at least {}", label, min));
    }
    Ok(value)
}

fn apply<T>(rules: &[TextRule<T>], target: &T, path: impl Fn(&str) -> String) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for rule in rules {
        let value = (rule.value)(target);
        let failure = match rule.check {
            Check::Required if value.trim().is_empty() => {
                Some(format!("{} is required", rule.label))
            }
            Check::Required => None,
            Check::WholeNumberAtLeast(min) => coerce_whole_number(value, rule.label, min).err(),
        };
        if let Some(message) = failure {
            errors.push(FieldError::new(path(rule.field), message));
        }
    }
    errors
}

/// Rules of the details step (title, subject).
pub fn validate_details(draft: &ExamDraft) -> FieldErrors {
    apply(DETAILS_RULES, draft, str::to_string)
}

/// Rules of the questions step (list length, every question).
pub fn validate_questions(draft: &ExamDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.questions.len() < MIN_QUESTIONS {
        errors.push(FieldError::new(
            "questions",
            format!("Add at least {} question", MIN_QUESTIONS),
        ));
    }
    for (index, question) in draft.questions.iter().enumerate() {
        errors.extend(apply(QUESTION_RULES, question, |field| {
            question_path(index, field)
        }));
    }
    errors
}

/// Every rule.
pub fn validate_exam(draft: &ExamDraft) -> FieldErrors {
    let mut errors = validate_details(draft);
    errors.extend(validate_questions(draft));
    errors
}
