//! The end-to-end run: authenticate, list, create sheet, upload, move.
//!
//! Each step logs its own failure and yields `None`; later steps that need
//! the missing value are skipped instead of being called with nothing.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{error, info, warn};

use crate::auth::{Authenticator, DEFAULT_SCOPES};
use crate::drive::{DriveClient, DRIVE_API_BASE, UPLOAD_API_BASE};
use crate::models::{FileMetadata, UpdateValuesResponse, ValueInputOption};
use crate::sheets::{SheetsClient, SHEETS_API_BASE};
use crate::table::Table;

/// Base URLs for every API the run touches.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub drive_api: String,
    pub drive_upload: String,
    pub sheets_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            drive_api: DRIVE_API_BASE.to_string(),
            drive_upload: UPLOAD_API_BASE.to_string(),
            sheets_api: SHEETS_API_BASE.to_string(),
        }
    }
}

/// Drive and Sheets clients sharing one authenticator.
#[derive(Clone)]
pub struct GoogleServices {
    pub drive: DriveClient,
    pub sheets: SheetsClient,
}

impl GoogleServices {
    pub fn new(auth: Authenticator, endpoints: &Endpoints) -> Self {
        Self {
            drive: DriveClient::with_base_urls(
                auth.clone(),
                &endpoints.drive_api,
                &endpoints.drive_upload,
            ),
            sheets: SheetsClient::with_base_url(auth, &endpoints.sheets_api),
        }
    }
}

/// Load credentials and build both clients.
pub fn authenticate(credentials: &Path, endpoints: &Endpoints) -> Option<GoogleServices> {
    match Authenticator::from_file(credentials, DEFAULT_SCOPES) {
        Ok(auth) => {
            info!(
                client_email = auth.client_email(),
                "Google API authentication succeeded"
            );
            Some(GoogleServices::new(auth, endpoints))
        }
        Err(e) => {
            error!(path = %credentials.display(), "Google API authentication failed: {}", e);
            None
        }
    }
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub target_folder_id: String,
    /// Parent the new sheet is detached from when moved.
    pub source_parent: String,
    pub title_prefix: String,
    pub csv_path: PathBuf,
    pub start_range: String,
    pub list_page_size: u32,
}

impl WorkflowConfig {
    pub fn new(target_folder_id: impl Into<String>) -> Self {
        Self {
            target_folder_id: target_folder_id.into(),
            source_parent: "root".to_string(),
            title_prefix: "reservation_test".to_string(),
            csv_path: PathBuf::from("example.csv"),
            start_range: "A1".to_string(),
            list_page_size: 5,
        }
    }

    /// `<prefix>_<YYYY-mm-dd-HH-MM-SS>` in local time.
    pub fn sheet_title(&self) -> String {
        format!(
            "{}_{}",
            self.title_prefix,
            Local::now().format("%Y-%m-%d-%H-%M-%S")
        )
    }
}

/// What each step of a run produced.
#[derive(Debug, Default)]
pub struct WorkflowReport {
    pub authenticated: bool,
    pub listed_files: Option<Vec<FileMetadata>>,
    pub csv_written: Option<PathBuf>,
    pub spreadsheet_id: Option<String>,
    pub uploaded: Option<UpdateValuesResponse>,
    pub moved: Option<FileMetadata>,
}

impl WorkflowReport {
    pub fn is_complete(&self) -> bool {
        self.authenticated
            && self.listed_files.is_some()
            && self.csv_written.is_some()
            && self.spreadsheet_id.is_some()
            && self.uploaded.is_some()
            && self.moved.is_some()
    }
}

/// List a handful of files to prove the Drive credentials work.
pub async fn verify_drive_access(
    drive: &DriveClient,
    page_size: u32,
) -> Option<Vec<FileMetadata>> {
    match drive.list_files(page_size).await {
        Ok(files) => {
            info!(count = files.len(), "Google Drive authentication test succeeded");
            for file in &files {
                info!(
                    id = %file.id,
                    name = file.name.as_deref().unwrap_or("-"),
                    "drive file"
                );
            }
            Some(files)
        }
        Err(e) => {
            error!("Google Drive authentication test failed: {}", e);
            None
        }
    }
}

pub fn write_local_csv(table: &Table, path: &Path) -> Option<PathBuf> {
    match table.write_csv(path) {
        Ok(()) => {
            info!(path = %path.display(), "local CSV written");
            Some(path.to_path_buf())
        }
        Err(e) => {
            error!(path = %path.display(), "failed to write local CSV: {}", e);
            None
        }
    }
}

pub async fn create_sheet(sheets: &SheetsClient, title: &str) -> Option<String> {
    match sheets.create_spreadsheet(title).await {
        Ok(id) => {
            info!(spreadsheet_id = %id, title, "spreadsheet created");
            Some(id)
        }
        Err(e) => {
            error!(title, "failed to create spreadsheet: {}", e);
            None
        }
    }
}

/// Upload the header row and data rows of `table` starting at `start_range`.
pub async fn upload_table(
    sheets: &SheetsClient,
    spreadsheet_id: &str,
    table: &Table,
    start_range: &str,
) -> Option<UpdateValuesResponse> {
    match sheets
        .update_values(
            spreadsheet_id,
            start_range,
            table.to_values(),
            ValueInputOption::Raw,
        )
        .await
    {
        Ok(updated) => {
            info!(
                spreadsheet_id,
                range = updated.updated_range.as_deref().unwrap_or(start_range),
                rows = updated.updated_rows.unwrap_or_default(),
                "data uploaded to spreadsheet"
            );
            Some(updated)
        }
        Err(e) => {
            error!(spreadsheet_id, "failed to upload data to spreadsheet: {}", e);
            None
        }
    }
}

pub async fn move_to_folder(
    drive: &DriveClient,
    file_id: &str,
    folder_id: &str,
    source_parent: &str,
) -> Option<FileMetadata> {
    match drive.move_file(file_id, folder_id, source_parent).await {
        Ok(metadata) => {
            info!(file_id, folder_id, parents = ?metadata.parents, "file moved");
            Some(metadata)
        }
        Err(e) => {
            error!(file_id, folder_id, "failed to move file: {}", e);
            None
        }
    }
}

/// Run every step in order against already-built clients.
pub async fn run_with(services: &GoogleServices, config: &WorkflowConfig) -> WorkflowReport {
    let mut report = WorkflowReport {
        authenticated: true,
        ..Default::default()
    };

    report.listed_files = verify_drive_access(&services.drive, config.list_page_size).await;

    let table = Table::sample_people();
    report.csv_written = write_local_csv(&table, &config.csv_path);

    report.spreadsheet_id = create_sheet(&services.sheets, &config.sheet_title()).await;

    let Some(spreadsheet_id) = report.spreadsheet_id.clone() else {
        warn!("no spreadsheet was created; skipping upload and move");
        return report;
    };

    report.uploaded = upload_table(
        &services.sheets,
        &spreadsheet_id,
        &table,
        &config.start_range,
    )
    .await;

    report.moved = move_to_folder(
        &services.drive,
        &spreadsheet_id,
        &config.target_folder_id,
        &config.source_parent,
    )
    .await;

    if report.is_complete() {
        info!("all steps completed successfully");
    } else {
        warn!("run finished with failed steps");
    }
    report
}

/// Authenticate from `credentials` and run every step.
pub async fn run(
    credentials: &Path,
    endpoints: &Endpoints,
    config: &WorkflowConfig,
) -> WorkflowReport {
    match authenticate(credentials, endpoints) {
        Some(services) => run_with(&services, config).await,
        None => {
            warn!("authentication failed; nothing else was attempted");
            WorkflowReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_title_format() {
        let mut config = WorkflowConfig::new("folder");
        config.title_prefix = "demo".to_string();
        let title = config.sheet_title();

        let stamp = title.strip_prefix("demo_").unwrap();
        assert_eq!(stamp.len(), "2024-01-01-00-00-00".len());
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H-%M-%S").is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = WorkflowConfig::new("folder");
        assert_eq!(config.source_parent, "root");
        assert_eq!(config.start_range, "A1");
        assert_eq!(config.list_page_size, 5);
        assert_eq!(config.csv_path, PathBuf::from("example.csv"));
    }

    #[test]
    fn test_empty_report_is_incomplete() {
        assert!(!WorkflowReport::default().is_complete());
    }

    #[test]
    fn test_authenticate_missing_file() {
        let services = authenticate(
            Path::new("/nonexistent/creds.json"),
            &Endpoints::default(),
        );
        assert!(services.is_none());
    }
}
