//! `examdesk delete` - Delete an exam after confirmation.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};
use examdesk_client::ExamApi;
use tracing::info;

use super::{parse_id, report};
use crate::cli::args::DeleteArgs;
use crate::exit_codes::SUCCESS;

pub async fn run(args: DeleteArgs, api: &ExamApi) -> Result<i32> {
    let id = match parse_id(&args.id) {
        Ok(id) => id,
        Err(code) => return Ok(code),
    };

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete exam {}? This cannot be undone.", id))
            .default(false)
            .interact()
            .unwrap_or(false);
    if !confirmed {
        println!("Cancelled.");
        return Ok(SUCCESS);
    }

    if let Err(e) = api.delete(&id).await {
        return Ok(report(&e));
    }
    info!(id = %id, "exam deleted");
    println!("Deleted exam {}.", id);
    Ok(SUCCESS)
}
