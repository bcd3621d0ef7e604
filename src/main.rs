//! drive_sheets CLI - Create, fill and file Google Sheets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use drive_sheets::auth::DEFAULT_SCOPES;
use drive_sheets::workflow;
use drive_sheets::{
    extract_id, Authenticator, Endpoints, GoogleServices, Table, ValueInputOption, WorkflowConfig,
};

/// CLI tool for publishing tables to Google Sheets.
#[derive(Parser)]
#[command(name = "drive_sheets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to service account JSON credentials file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every step: list, write CSV, create sheet, upload, move.
    Run {
        /// Destination folder URL or ID.
        #[arg(long, env = "TARGET_FOLDER_ID")]
        folder: String,

        /// Prefix of the generated sheet title.
        #[arg(long, env = "SHEET_TITLE_PREFIX", default_value = "reservation_test")]
        title_prefix: String,

        /// Where to write the local CSV copy of the table.
        #[arg(long, env = "CSV_OUTPUT", default_value = "example.csv")]
        csv_out: PathBuf,
    },

    /// List a few files to check Drive access.
    List {
        #[arg(long, default_value_t = 5)]
        page_size: u32,
    },

    /// Create an empty spreadsheet.
    CreateSheet {
        title: String,
    },

    /// Upload a local CSV into an existing spreadsheet.
    Upload {
        /// Spreadsheet URL or ID.
        spreadsheet: String,

        /// CSV file to upload.
        csv: PathBuf,

        /// Top-left cell of the upload in A1 notation.
        #[arg(long, default_value = "A1")]
        range: String,

        /// Parse values as if typed into the sheet (numbers, dates, formulas).
        #[arg(long)]
        user_entered: bool,
    },

    /// Move a file into a folder.
    Move {
        /// File URL or ID.
        file: String,

        /// Destination folder URL or ID.
        #[arg(long, short = 't')]
        to: String,

        /// Parent folder to remove the file from.
        #[arg(long, default_value = "root")]
        from: String,
    },

    /// Upload a CSV file as a new spreadsheet.
    Import {
        csv: PathBuf,

        /// Destination folder URL or ID.
        #[arg(long, short = 't')]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    execute(Cli::parse(), &Endpoints::default()).await
}

/// Build the run settings; `folder` may be a share link or a bare ID.
fn workflow_config(folder: &str, title_prefix: String, csv_out: PathBuf) -> Result<WorkflowConfig> {
    let folder_id =
        extract_id(folder).with_context(|| format!("Invalid folder URL or ID: {}", folder))?;
    let mut config = WorkflowConfig::new(folder_id);
    config.title_prefix = title_prefix;
    config.csv_path = csv_out;
    Ok(config)
}

async fn execute(cli: Cli, endpoints: &Endpoints) -> Result<()> {
    match cli.command {
        Commands::Run {
            folder,
            title_prefix,
            csv_out,
        } => {
            let config = workflow_config(&folder, title_prefix, csv_out)?;

            // Step failures are logged inside the run.
            workflow::run(&cli.credentials, endpoints, &config).await;
        }

        Commands::List { page_size } => {
            let services = connect(&cli.credentials, endpoints)?;
            let files = services
                .drive
                .list_files(page_size)
                .await
                .context("Failed to list files")?;

            if files.is_empty() {
                println!("No files found.");
            } else {
                println!("{:<44} {:<40} {}", "ID", "TYPE", "NAME");
                println!("{}", "-".repeat(100));
                for file in files {
                    println!("{}", file);
                }
            }
        }

        Commands::CreateSheet { title } => {
            let services = connect(&cli.credentials, endpoints)?;
            let id = services
                .sheets
                .create_spreadsheet(&title)
                .await
                .with_context(|| format!("Failed to create spreadsheet: {}", title))?;
            println!("{}", id);
        }

        Commands::Upload {
            spreadsheet,
            csv,
            range,
            user_entered,
        } => {
            let spreadsheet_id = extract_id(&spreadsheet)
                .with_context(|| format!("Invalid spreadsheet URL or ID: {}", spreadsheet))?;
            let table =
                Table::read_csv(&csv).with_context(|| format!("Failed to read {:?}", csv))?;

            let input_option = if user_entered {
                ValueInputOption::UserEntered
            } else {
                ValueInputOption::Raw
            };

            let services = connect(&cli.credentials, endpoints)?;
            let updated = services
                .sheets
                .update_values(&spreadsheet_id, &range, table.to_values(), input_option)
                .await
                .with_context(|| format!("Failed to upload to spreadsheet: {}", spreadsheet_id))?;

            println!(
                "Updated {} ({} cells)",
                updated.updated_range.as_deref().unwrap_or(&range),
                updated.updated_cells.unwrap_or_default()
            );
        }

        Commands::Move { file, to, from } => {
            let file_id =
                extract_id(&file).with_context(|| format!("Invalid file URL or ID: {}", file))?;
            let folder_id =
                extract_id(&to).with_context(|| format!("Invalid folder URL or ID: {}", to))?;

            let services = connect(&cli.credentials, endpoints)?;
            let metadata = services
                .drive
                .move_file(&file_id, &folder_id, &from)
                .await
                .with_context(|| format!("Failed to move file: {}", file_id))?;

            println!("OK ({} -> {})", metadata.id, metadata.parents.join(", "));
        }

        Commands::Import { csv, to } => {
            let folder_id = to
                .as_deref()
                .map(extract_id)
                .transpose()
                .context("Invalid folder URL or ID")?;

            let services = connect(&cli.credentials, endpoints)?;
            let metadata = services
                .drive
                .import_csv(&csv, folder_id.as_deref())
                .await
                .with_context(|| format!("Failed to import {:?}", csv))?;

            println!("OK ({})", metadata.id);
            if let Some(link) = metadata.web_view_link {
                println!("{}", link);
            }
        }
    }

    Ok(())
}

fn connect(credentials: &Path, endpoints: &Endpoints) -> Result<GoogleServices> {
    let auth = Authenticator::from_file(credentials, DEFAULT_SCOPES)
        .with_context(|| format!("Failed to load credentials from {:?}", credentials))?;
    Ok(GoogleServices::new(auth, endpoints))
}
