//! Google Drive API client.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::auth::Authenticator;
use crate::error::{check_response, DriveError, Result};
use crate::models::{FileListResponse, FileMetadata};

/// Base URL for Google Drive API v3.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Upload URL for Google Drive API v3.
pub const UPLOAD_API_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Mime type Drive converts uploads into when asked for a spreadsheet.
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Client for the Google Drive files API.
#[derive(Clone)]
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    pub fn new(auth: Authenticator) -> Self {
        Self::with_base_urls(auth, DRIVE_API_BASE, UPLOAD_API_BASE)
    }

    /// Create a client that talks to custom endpoints.
    pub fn with_base_urls(
        auth: Authenticator,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            http: Client::new(),
            api_base: api_base.into(),
            upload_base: upload_base.into(),
        }
    }

    /// List up to `page_size` files visible to the service account.
    pub async fn list_files(&self, page_size: u32) -> Result<Vec<FileMetadata>> {
        let token = self.auth.get_access_token().await?;
        let page_size = page_size.to_string();

        let response = self
            .http
            .get(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[
                ("pageSize", page_size.as_str()),
                ("fields", "files(id, name)"),
            ])
            .send()
            .await?;

        let list_response: FileListResponse = check_response(response).await?.json().await?;
        Ok(list_response.files)
    }

    /// Move a file by adding `add_parent` and dropping `remove_parent`.
    ///
    /// Files created through the Sheets API land in the service account's
    /// root, so callers usually pass `"root"` as `remove_parent`.
    pub async fn move_file(
        &self,
        file_id: &str,
        add_parent: &str,
        remove_parent: &str,
    ) -> Result<FileMetadata> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .patch(format!("{}/files/{}", self.api_base, file_id))
            .bearer_auth(&token)
            .query(&[
                ("addParents", add_parent),
                ("removeParents", remove_parent),
                ("fields", "id, parents"),
            ])
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let metadata: FileMetadata = check_response(response).await?.json().await?;
        Ok(metadata)
    }

    /// Upload a local CSV file and convert it into a Google spreadsheet.
    ///
    /// # Arguments
    /// * `local_path` - Path to the CSV file
    /// * `parent_id` - Destination folder, or `None` for the account root
    pub async fn import_csv<P: AsRef<Path>>(
        &self,
        local_path: P,
        parent_id: Option<&str>,
    ) -> Result<FileMetadata> {
        let local_path = local_path.as_ref();
        let name = local_path
            .file_stem()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DriveError::FileNotFound(local_path.display().to_string()))?;

        let token = self.auth.get_access_token().await?;
        let file_content = tokio::fs::read(local_path).await?;
        let source_mime = mime_guess::from_path(local_path)
            .first_or_text_plain()
            .to_string();

        let mut metadata = serde_json::json!({
            "name": name,
            "mimeType": SPREADSHEET_MIME_TYPE,
        });
        if let Some(parent_id) = parent_id {
            metadata["parents"] = serde_json::json!([parent_id]);
        }

        let metadata_part = Part::text(metadata.to_string()).mime_str("application/json")?;
        let file_part = Part::bytes(file_content)
            .file_name(name.to_string())
            .mime_str(&source_mime)?;

        let form = Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let response = self
            .http
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(&token)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id, name, mimeType, parents, webViewLink"),
            ])
            .multipart(form)
            .send()
            .await?;

        let metadata: FileMetadata = check_response(response).await?.json().await?;
        Ok(metadata)
    }
}
