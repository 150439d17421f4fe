use super::args::*;

pub mod delete;
pub mod list;
pub mod show;
pub mod upload;
pub mod wizard;

use anyhow::Context;
use examdesk_client::{ApiError, ExamApi};
use examdesk_core::ResourceId;

use crate::exit_codes::{INPUT_ERROR, SUCCESS};

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    if let Command::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let api = match ExamApi::new(cli.api.client_config()) {
        Ok(api) => api,
        Err(e) => return Ok(report(&e)),
    };

    match cli.cmd {
        Command::List(args) => list::run(args, &api).await,
        Command::Show(args) => show::run(args, &api).await,
        Command::Create(args) => wizard::create(args, &api).await,
        Command::Edit(args) => wizard::edit(args, &api).await,
        Command::Delete(args) => delete::run(args, &api).await,
        Command::Upload(args) => upload::run(args, &api).await,
        Command::Version => Ok(SUCCESS),
    }
}

/// Print an API failure and return its exit code.
pub(crate) fn report(err: &ApiError) -> i32 {
    eprintln!("error: {}", err);
    err.exit_code()
}

/// Parse a user-supplied exam id; prints the error when it is unusable.
pub(crate) fn parse_id(raw: &str) -> Result<ResourceId, i32> {
    ResourceId::parse(raw).ok_or_else(|| {
        eprintln!("error: invalid exam id: {:?}", raw);
        INPUT_ERROR
    })
}

pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
