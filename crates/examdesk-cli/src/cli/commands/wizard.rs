//! `examdesk create` / `examdesk edit` - The three-step exam wizard.
//!
//! Interactive sessions prompt step by step and return to the review
//! prompt after a failed submit. With `--from FILE` the draft is read from
//! disk, validated as a whole and submitted once.

use std::io::{ErrorKind, IsTerminal};
use std::path::Path;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use examdesk_client::{ApiError, ExamApi};
use examdesk_core::{
    coerce_mark, validate_exam, DraftFile, ExamDraft, ExamWizard, QuestionDraft, WizardError,
    WizardMode, WizardStep,
};
use tracing::debug;

use super::{parse_id, report};
use crate::cli::args::{CreateArgs, EditArgs};
use crate::cli::render;
use crate::exit_codes::{BACKEND_ERROR, INPUT_ERROR, SUCCESS};

pub async fn create(args: CreateArgs, api: &ExamApi) -> Result<i32> {
    match args.from {
        Some(path) => {
            let draft = match load_draft(&path) {
                Ok(draft) => draft,
                Err(code) => return Ok(code),
            };
            run_batch(ExamWizard::with_draft(WizardMode::Create, draft), api, args.yes).await
        }
        None => {
            if let Err(code) = require_terminal() {
                return Ok(code);
            }
            run_interactive(ExamWizard::create(), api).await
        }
    }
}

pub async fn edit(args: EditArgs, api: &ExamApi) -> Result<i32> {
    let id = match parse_id(&args.id) {
        Ok(id) => id,
        Err(code) => return Ok(code),
    };

    let draft = match &args.from {
        Some(path) => match load_draft(path) {
            Ok(draft) => Some(draft),
            Err(code) => return Ok(code),
        },
        None => {
            if let Err(code) = require_terminal() {
                return Ok(code);
            }
            None
        }
    };

    let exam = match api.retrieve(Some(&id)).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            eprintln!("error: exam {} not found", id);
            return Ok(INPUT_ERROR);
        }
        Err(e) => return Ok(report(&e)),
    };

    match draft {
        Some(draft) => {
            let wizard = ExamWizard::with_draft(WizardMode::Edit(Box::new(exam)), draft);
            run_batch(wizard, api, args.yes).await
        }
        None => run_interactive(ExamWizard::edit(exam), api).await,
    }
}

fn load_draft(path: &Path) -> Result<ExamDraft, i32> {
    match DraftFile::load(path) {
        Ok(file) => Ok(file.into_draft()),
        Err(e) => {
            eprintln!("error: failed to read draft {}: {}", path.display(), e);
            Err(INPUT_ERROR)
        }
    }
}

fn require_terminal() -> Result<(), i32> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        eprintln!("error: the interactive wizard needs a terminal; pass --from FILE instead");
        Err(INPUT_ERROR)
    }
}

/// Print a wizard failure and return its exit code.
fn report_wizard(err: &WizardError) -> i32 {
    match err {
        WizardError::Invalid(errors) => {
            eprintln!("error: the exam is invalid:\n{}", render::field_errors(errors));
            INPUT_ERROR
        }
        WizardError::Backend(source) => {
            eprintln!("error: {}", err);
            source
                .downcast_ref::<ApiError>()
                .map(ApiError::exit_code)
                .unwrap_or(BACKEND_ERROR)
        }
        _ => {
            eprintln!("error: {}", err);
            INPUT_ERROR
        }
    }
}

async fn run_batch(mut wizard: ExamWizard, api: &ExamApi, yes: bool) -> Result<i32> {
    let errors = validate_exam(wizard.draft());
    if !errors.is_empty() {
        return Ok(report_wizard(&WizardError::Invalid(errors)));
    }

    while wizard.step() != WizardStep::Review {
        if let Err(e) = wizard.advance() {
            return Ok(report_wizard(&e));
        }
    }
    println!("{}", render::review(wizard.draft(), &wizard.changed_fields()));

    if !yes {
        if let Err(code) = require_terminal() {
            return Ok(code);
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Submit this exam?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Cancelled; nothing was saved.");
            return Ok(SUCCESS);
        }
    }

    match wizard.submit(api).await {
        Ok(exam) => {
            println!("\nSaved exam {} ({}).", exam.id, exam.title);
            Ok(SUCCESS)
        }
        Err(e) => Ok(report_wizard(&e)),
    }
}

enum Flow {
    Stay,
    Exit(i32),
}

type Prompted<T> = std::result::Result<T, dialoguer::Error>;

/// Exit code for a prompt that could not read from the terminal.
/// Ctrl-C is reported as a cancel.
fn prompt_failure(err: dialoguer::Error) -> i32 {
    let err = std::io::Error::from(err);
    if err.kind() == ErrorKind::Interrupted {
        println!("Cancelled; nothing was saved.");
    } else {
        eprintln!("error: could not read from the terminal: {}", err);
    }
    debug!(kind = ?err.kind(), "prompt failed");
    INPUT_ERROR
}

async fn run_interactive(mut wizard: ExamWizard, api: &ExamApi) -> Result<i32> {
    let theme = ColorfulTheme::default();
    loop {
        println!("\n{}", wizard.step());
        let flow = match wizard.step() {
            WizardStep::Details => details_step(&mut wizard, &theme),
            WizardStep::Questions => questions_step(&mut wizard, &theme),
            WizardStep::Review => review_step(&mut wizard, api, &theme).await,
        };
        match flow {
            Ok(Flow::Stay) => {}
            Ok(Flow::Exit(code)) => return Ok(code),
            Err(e) => return Ok(prompt_failure(e)),
        }
    }
}

fn details_step(wizard: &mut ExamWizard, theme: &ColorfulTheme) -> Prompted<Flow> {
    let draft = wizard.draft_mut();
    draft.title = prompt_text(theme, "Title", &draft.title)?;
    draft.subject = prompt_text(theme, "Subject", &draft.subject)?;
    draft.instructions = prompt_text(theme, "Grading instructions (optional)", &draft.instructions)?;

    match choose(theme, "Next", &["Continue to questions", "Cancel"])? {
        0 => Ok(advance(wizard)),
        _ => Ok(cancelled()),
    }
}

#[derive(Clone, Copy)]
enum QuestionAction {
    Add,
    Edit,
    Remove,
    Back,
    Continue,
    Cancel,
}

impl QuestionAction {
    fn label(self) -> &'static str {
        match self {
            Self::Add => "Add question",
            Self::Edit => "Edit question",
            Self::Remove => "Remove question",
            Self::Back => "Back to details",
            Self::Continue => "Continue to review",
            Self::Cancel => "Cancel",
        }
    }
}

fn questions_step(wizard: &mut ExamWizard, theme: &ColorfulTheme) -> Prompted<Flow> {
    println!("{}", render::question_list(wizard.draft(), wizard.errors()));
    if let Some(error) = wizard.errors().get("questions") {
        eprintln!("  ! {}", error.message);
    }

    let mut actions = vec![QuestionAction::Add];
    if !wizard.draft().questions.is_empty() {
        actions.extend([QuestionAction::Edit, QuestionAction::Remove]);
    }
    actions.extend([QuestionAction::Back, QuestionAction::Continue, QuestionAction::Cancel]);
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();

    let choice = choose(theme, "Questions", &labels)?;
    match actions.get(choice).copied().unwrap_or(QuestionAction::Cancel) {
        QuestionAction::Add => {
            let question = prompt_question(theme, &QuestionDraft::default())?;
            let key = wizard.draft_mut().questions.append(question);
            debug!(key = %key, "question added");
        }
        QuestionAction::Edit => {
            let index = pick_question(wizard.draft(), theme, "Edit which question?")?;
            if let Some(current) = wizard.draft().questions.get(index).cloned() {
                let updated = prompt_question(theme, &current)?;
                if let Some(slot) = wizard.draft_mut().questions.get_mut(index) {
                    *slot = updated;
                }
            }
        }
        QuestionAction::Remove => {
            let index = pick_question(wizard.draft(), theme, "Remove which question?")?;
            wizard.draft_mut().questions.remove(index);
        }
        QuestionAction::Back => {
            wizard.retreat();
        }
        QuestionAction::Continue => return Ok(advance(wizard)),
        QuestionAction::Cancel => return Ok(cancelled()),
    }
    Ok(Flow::Stay)
}

async fn review_step(
    wizard: &mut ExamWizard,
    api: &ExamApi,
    theme: &ColorfulTheme,
) -> Prompted<Flow> {
    println!("{}", render::review(wizard.draft(), &wizard.changed_fields()));

    let submit_label = match wizard.mode() {
        WizardMode::Create => "Create exam",
        WizardMode::Edit(_) => "Save changes",
    };
    match choose(theme, "Review", &[submit_label, "Back to questions", "Cancel"])? {
        0 => match wizard.submit(api).await {
            Ok(exam) => {
                println!("\nSaved exam {} ({}).", exam.id, exam.title);
                Ok(Flow::Exit(SUCCESS))
            }
            Err(e) => {
                report_wizard(&e);
                Ok(Flow::Stay)
            }
        },
        1 => {
            wizard.retreat();
            Ok(Flow::Stay)
        }
        _ => Ok(cancelled()),
    }
}

fn advance(wizard: &mut ExamWizard) -> Flow {
    match wizard.advance() {
        Ok(_) => {}
        Err(WizardError::Invalid(errors)) => {
            eprintln!("Please fix the following:\n{}", render::field_errors(&errors));
        }
        Err(e) => eprintln!("error: {}", e),
    }
    Flow::Stay
}

fn cancelled() -> Flow {
    println!("Cancelled; nothing was saved.");
    Flow::Exit(SUCCESS)
}

fn prompt_question(theme: &ColorfulTheme, current: &QuestionDraft) -> Prompted<QuestionDraft> {
    let mut question = current.clone();
    question.text = prompt_text(theme, "Question", &question.text)?;
    question.ideal_answer = prompt_text(theme, "Ideal answer", &question.ideal_answer)?;
    question.instructions =
        prompt_text(theme, "Marking instructions (optional)", &question.instructions)?;
    question.mark = prompt_text(theme, "Mark", &question.mark)?;
    if let Err(message) = coerce_mark(&question.mark) {
        eprintln!("  ! {}", message);
    }
    Ok(question)
}

fn pick_question(draft: &ExamDraft, theme: &ColorfulTheme, prompt: &str) -> Prompted<usize> {
    let labels: Vec<String> = draft
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q.text.trim()))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(labels.as_slice())
        .default(0)
        .interact()?;
    Ok(index)
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> Prompted<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn choose(theme: &ColorfulTheme, prompt: &str, items: &[&str]) -> Prompted<usize> {
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(index)
}
