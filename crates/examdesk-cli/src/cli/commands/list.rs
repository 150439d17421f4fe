//! `examdesk list` - List exams.

use anyhow::Result;
use examdesk_client::ExamApi;

use super::{report, to_json};
use crate::cli::args::{ListArgs, ListFormat};
use crate::cli::render;
use crate::exit_codes::SUCCESS;

pub async fn run(args: ListArgs, api: &ExamApi) -> Result<i32> {
    let (exams, footer) = if args.all {
        match api.list_all().await {
            Ok(exams) => (exams, None),
            Err(e) => return Ok(report(&e)),
        }
    } else {
        match api.list(args.page).await {
            Ok(page) => {
                let footer = render::page_footer(&page);
                (page.items, footer)
            }
            Err(e) => return Ok(report(&e)),
        }
    };

    match args.format {
        ListFormat::Table => {
            println!("{}", render::exam_table(&exams));
            if let Some(footer) = footer {
                println!("\n{}", footer);
            }
        }
        ListFormat::Json => println!("{}", to_json(&exams)?),
        ListFormat::Plain => {
            if !exams.is_empty() {
                println!("{}", render::exam_plain(&exams));
            }
        }
    }

    Ok(SUCCESS)
}
