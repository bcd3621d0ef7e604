//! drive_sheets - Publish tabular data to Google Sheets with a service account.
//!
//! This library provides functionality to:
//! - Authenticate with a service account key (JWT bearer grant)
//! - List files visible in Google Drive
//! - Create a spreadsheet and upload rows into it
//! - Move a file into a Drive folder
//!
//! # Example
//!
//! ```no_run
//! use drive_sheets::auth::DEFAULT_SCOPES;
//! use drive_sheets::{Authenticator, SheetsClient, Table, ValueInputOption};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let auth = Authenticator::from_file("service-account.json", DEFAULT_SCOPES)?;
//!     let sheets = SheetsClient::new(auth);
//!
//!     let id = sheets.create_spreadsheet("Report").await?;
//!     let table = Table::sample_people();
//!     sheets
//!         .update_values(&id, "A1", table.to_values(), ValueInputOption::Raw)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod drive;
pub mod error;
pub mod models;
pub mod sheets;
pub mod table;
pub mod url_parser;
pub mod workflow;

// Re-exports for convenience
pub use auth::Authenticator;
pub use drive::DriveClient;
pub use error::{DriveError, Result};
pub use models::{FileMetadata, ValueInputOption};
pub use sheets::SheetsClient;
pub use table::Table;
pub use url_parser::extract_id;
pub use workflow::{Endpoints, GoogleServices, WorkflowConfig, WorkflowReport};
