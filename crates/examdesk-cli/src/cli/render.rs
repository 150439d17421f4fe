//! Text rendering for list, detail and review views.
//!
//! Functions return strings so commands decide where output goes.

use examdesk_client::ExamPage;
use examdesk_core::{coerce_mark, Exam, ExamDraft, FieldErrors};

const TITLE_WIDTH: usize = 40;

pub fn exam_table(exams: &[Exam]) -> String {
    if exams.is_empty() {
        return "No exams yet.".to_string();
    }

    let rows: Vec<[String; 5]> = exams
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                clip(&e.title, TITLE_WIDTH),
                clip(&e.subject, TITLE_WIDTH),
                e.questions.len().to_string(),
                e.total_marks().to_string(),
            ]
        })
        .collect();

    let header = ["ID", "TITLE", "SUBJECT", "QUESTIONS", "MARKS"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn exam_plain(exams: &[Exam]) -> String {
    exams
        .iter()
        .map(|e| format!("{}\t{}", e.id, e.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Paging hint shown under a table when the backend paginates.
pub fn page_footer(page: &ExamPage) -> Option<String> {
    if page.next.is_none() && page.previous.is_none() {
        return None;
    }
    let mut footer = format!("Showing {} of {} exams.", page.items.len(), page.count);
    if page.next.is_some() {
        footer.push_str(" More pages available (use --page or --all).");
    }
    Some(footer)
}

pub fn exam_detail(exam: &Exam) -> String {
    let mut out = format!("{}\n", exam.title);
    out.push_str(&format!("Subject:   {}\n", exam.subject));
    out.push_str(&format!("ID:        {}\n", exam.id));
    if let Some(created) = exam.created_at {
        out.push_str(&format!("Created:   {}\n", created.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(updated) = exam.updated_at {
        out.push_str(&format!("Updated:   {}\n", updated.format("%Y-%m-%d %H:%M UTC")));
    }
    if let Some(instructions) = exam.instructions.non_empty() {
        out.push_str(&format!("\nGrading instructions:\n  {}\n", instructions));
    }

    out.push_str(&format!(
        "\nQuestions ({}, {} marks total):\n",
        exam.questions.len(),
        exam.total_marks()
    ));
    for (index, q) in exam.questions.iter().enumerate() {
        out.push_str(&format!("\n  {}. {} [{} {}]\n", index + 1, q.text, q.mark, marks(q.mark)));
        out.push_str(&format!("     Ideal answer: {}\n", q.ideal_answer));
        if let Some(instructions) = q.instructions.non_empty() {
            out.push_str(&format!("     Instructions: {}\n", instructions));
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Summary shown on the review step. `changed` lists the fields that
/// differ from the exam being edited.
pub fn review(draft: &ExamDraft, changed: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Title:        {}\n", draft.title.trim()));
    out.push_str(&format!("Subject:      {}\n", draft.subject.trim()));
    if draft.instructions.trim().is_empty() {
        out.push_str("Instructions: (none)\n");
    } else {
        out.push_str(&format!("Instructions: {}\n", draft.instructions.trim()));
    }

    let total: u64 = draft
        .questions
        .iter()
        .filter_map(|q| coerce_mark(&q.mark).ok())
        .map(u64::from)
        .sum();
    out.push_str(&format!(
        "\n{} question(s), {} marks total\n",
        draft.questions.len(),
        total
    ));
    for (index, q) in draft.questions.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} [{}]\n",
            index + 1,
            clip(q.text.trim(), 60),
            q.mark.trim()
        ));
    }

    if !changed.is_empty() {
        out.push_str(&format!("\nChanged: {}\n", changed.join(", ")));
    }
    out.truncate(out.trim_end().len());
    out
}

/// Questions as a numbered list, with each question's errors inline.
pub fn question_list(draft: &ExamDraft, errors: &FieldErrors) -> String {
    if draft.questions.is_empty() {
        return "No questions yet.".to_string();
    }
    let mut out = String::new();
    for (index, q) in draft.questions.iter().enumerate() {
        let text = if q.text.trim().is_empty() {
            "(no text)"
        } else {
            q.text.trim()
        };
        out.push_str(&format!("  {}. {} [{}]\n", index + 1, clip(text, 60), q.mark.trim()));
        for error in errors.for_question(index) {
            out.push_str(&format!("       ! {}\n", error.message));
        }
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}: {}", e.path, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn clip(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

fn marks(n: u32) -> &'static str {
    if n == 1 {
        "mark"
    } else {
        "marks"
    }
}
