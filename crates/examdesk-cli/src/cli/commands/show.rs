//! `examdesk show` - Show one exam.

use anyhow::Result;
use examdesk_client::ExamApi;

use super::{parse_id, report, to_json};
use crate::cli::args::{DetailFormat, ShowArgs};
use crate::cli::render;
use crate::exit_codes::{INPUT_ERROR, SUCCESS};

pub async fn run(args: ShowArgs, api: &ExamApi) -> Result<i32> {
    let id = match parse_id(&args.id) {
        Ok(id) => id,
        Err(code) => return Ok(code),
    };

    let exam = match api.retrieve(Some(&id)).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            eprintln!("error: exam {} not found", id);
            return Ok(INPUT_ERROR);
        }
        Err(e) => return Ok(report(&e)),
    };

    match args.format {
        DetailFormat::Text => println!("{}", render::exam_detail(&exam)),
        DetailFormat::Json => println!("{}", to_json(&exam)?),
    }
    Ok(SUCCESS)
}
