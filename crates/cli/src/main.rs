//! `planboard` -- command-line front end for the content-planning backend.
//!
//! Lists, creates, edits and deletes content items, runs form validation
//! offline, marks items published and prints grouped analytics.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default                 | Description                     |
//! |--------------------------|----------|-------------------------|---------------------------------|
//! | `PLANBOARD_API_URL`      | no       | `http://localhost:5000` | Backend base URL                |
//! | `PLANBOARD_API_TOKEN`    | no       | --                      | Bearer token sent with requests |
//! | `PLANBOARD_TIMEOUT_SECS` | no       | `30`                    | Per-request timeout             |
//! | `PLANBOARD_PAGE_SIZE`    | no       | `10`                    | Rows per listed page            |
//! | `RUST_LOG`               | no       | `planboard_cli=info`    | Log filter (logs go to stderr)  |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use planboard_client::{ApiClient, ClientConfig, ClientError};
use planboard_core::types::DbId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod table;

use commands::{
    cmd_analytics, cmd_confirm_upload, cmd_create, cmd_delete, cmd_list, cmd_update,
    cmd_validate, format_field_errors, Ctx, EntityArg, UploadTarget,
};

/// planboard command-line interface.
#[derive(Parser, Debug)]
#[command(name = "planboard", author, version, about)]
struct Cli {
    /// Date used by the date rules instead of today (YYYY-MM-DD).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a collection as a table.
    List {
        #[arg(value_enum)]
        entity: EntityArg,
        /// Case-insensitive filter over the visible text columns.
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Defaults to PLANBOARD_PAGE_SIZE.
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Validate and create an item from a JSON form file.
    Create {
        #[arg(value_enum)]
        entity: EntityArg,
        #[arg(short, long)]
        data: PathBuf,
        /// Script document (video-idea only).
        #[arg(short, long)]
        attach: Option<PathBuf>,
    },
    /// Validate and replace an item from a JSON form file.
    Update {
        #[arg(value_enum)]
        entity: EntityArg,
        id: DbId,
        #[arg(short, long)]
        data: PathBuf,
        /// Replacement script document (video-idea only).
        #[arg(short, long)]
        attach: Option<PathBuf>,
    },
    /// Delete an item.
    Delete {
        #[arg(value_enum)]
        entity: EntityArg,
        id: DbId,
    },
    /// Check a JSON form file without sending it.
    Validate {
        #[arg(value_enum)]
        entity: EntityArg,
        #[arg(short, long)]
        data: PathBuf,
        /// Stored version of the item, for edit checks.
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Validate as an edit rather than a create.
        #[arg(long)]
        edit: bool,
        #[arg(short, long)]
        attach: Option<PathBuf>,
    },
    /// Record the published link of an item, marking it done.
    ConfirmUpload {
        #[arg(value_enum)]
        entity: UploadTarget,
        id: DbId,
        link: String,
    },
    /// Show analytics rows grouped by date and topic.
    Analytics {
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planboard_cli=info,planboard_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Loaded client configuration");

    let ctx = Ctx {
        api: ApiClient::new(&config)?,
        today: cli.today,
        page_size: config.page_size,
    };

    match cli.command {
        Commands::List {
            entity,
            search,
            page,
            per_page,
        } => cmd_list(&ctx, entity, search, page, per_page).await,
        Commands::Create {
            entity,
            data,
            attach,
        } => cmd_create(&ctx, entity, &data, attach.as_deref()).await,
        Commands::Update {
            entity,
            id,
            data,
            attach,
        } => cmd_update(&ctx, entity, id, &data, attach.as_deref()).await,
        Commands::Delete { entity, id } => cmd_delete(&ctx, entity, id).await,
        Commands::Validate {
            entity,
            data,
            previous,
            edit,
            attach,
        } => cmd_validate(
            &ctx,
            entity,
            &data,
            previous.as_deref(),
            edit,
            attach.as_deref(),
        ),
        Commands::ConfirmUpload { entity, id, link } => {
            cmd_confirm_upload(&ctx, entity, id, link).await
        }
        Commands::Analytics { search } => cmd_analytics(&ctx, search).await,
    }
}

/// Print an error the way a form would show it: field messages for
/// validation failures, one inline line for everything else.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Validation(errors)) => {
            eprintln!("Form has validation errors:");
            eprint!("{}", format_field_errors(errors));
        }
        Some(client_err) => {
            tracing::error!(error = %client_err, "Request failed");
            eprintln!("{}", client_err.inline_message());
        }
        None => eprintln!("Error: {err:#}"),
    }
}
