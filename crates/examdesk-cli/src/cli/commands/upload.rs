//! `examdesk upload` - Upload a PDF document.

use anyhow::Result;
use examdesk_client::ExamApi;

use super::{report, to_json};
use crate::cli::args::UploadArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: UploadArgs, api: &ExamApi) -> Result<i32> {
    let receipt = match api.upload_file(&args.file).await {
        Ok(receipt) => receipt,
        Err(e) => return Ok(report(&e)),
    };

    if args.json {
        println!("{}", to_json(&receipt)?);
        return Ok(SUCCESS);
    }

    println!("Uploaded {}.", args.file.display());
    if let Some(file) = &receipt.file {
        println!("Stored as: {}", file);
    }
    if let Some(text) = &receipt.text {
        println!("\nExtracted text:\n{}", text);
    }
    Ok(SUCCESS)
}
