use clap::{Args, Parser, Subcommand, ValueEnum};
use examdesk_client::ClientConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "examdesk",
    version,
    about = "Author, review and manage exams on the grading backend"
)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List exams
    List(ListArgs),
    /// Show one exam with its questions
    Show(ShowArgs),
    /// Create an exam with the three-step wizard
    Create(CreateArgs),
    /// Edit an existing exam with the three-step wizard
    Edit(EditArgs),
    /// Delete an exam
    Delete(DeleteArgs),
    /// Upload a PDF document
    Upload(UploadArgs),
    Version,
}

/// Backend connection flags, shared by every command.
#[derive(Debug, Args, Clone, Default)]
pub struct ApiArgs {
    /// Backend base URL
    #[arg(long, global = true, env = "EXAMDESK_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "EXAMDESK_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "EXAMDESK_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl ApiArgs {
    /// Environment defaults overridden by whatever was given on the command line.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config = config.with_url(url.clone());
        }
        match self.token.as_deref().map(str::trim) {
            Some("") => config.token = None,
            Some(token) => config = config.with_token(token),
            None => {}
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(secs);
        }
        config
    }
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    /// Page number (paginated backends)
    #[arg(long, conflicts_with = "all")]
    pub page: Option<u32>,

    /// Follow `next` links and list every exam
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
    /// One `id<TAB>title` per line (machine-friendly)
    Plain,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Exam id
    pub id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: DetailFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DetailFormat {
    Text,
    Json,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    /// Read the draft from a YAML or JSON file instead of prompting
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Submit without the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct EditArgs {
    /// Exam id
    pub id: String,

    /// Replace the exam with the draft in this YAML or JSON file
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Submit without the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    /// Exam id
    pub id: String,

    /// Delete without the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct UploadArgs {
    /// PDF file to upload
    pub file: PathBuf,

    /// Print the backend response as JSON
    #[arg(long)]
    pub json: bool,
}
