//! Request and response payloads for the Drive, Sheets and OAuth2 APIs.

use serde::{Deserialize, Serialize};

/// Metadata for a file or folder in Google Drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl std::fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name.as_deref().unwrap_or("-");
        let mime = self.mime_type.as_deref().unwrap_or("-");
        write!(f, "{}\t{}\t{}", self.id, mime, name)
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileMetadata>,
}

/// Request body for spreadsheets.create.
#[derive(Debug, Serialize)]
pub struct CreateSpreadsheetRequest {
    pub properties: SpreadsheetProperties,
}

impl CreateSpreadsheetRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            properties: SpreadsheetProperties {
                title: title.into(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

/// Spreadsheet resource, trimmed to the fields requested.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,
}

/// How the Sheets API interprets uploaded values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Stored as-is, no formula or number parsing.
    #[default]
    Raw,
    /// Parsed as if typed into the UI.
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// Request body for spreadsheets.values.update.
#[derive(Debug, Serialize)]
pub struct ValueRange {
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Response from spreadsheets.values.update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u32>,
    #[serde(default)]
    pub updated_columns: Option<u32>,
    #[serde(default)]
    pub updated_cells: Option<u32>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Service account credentials from JSON file.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: Option<String>,
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_metadata_deserialize() {
        let json = r#"{
            "id": "abc123",
            "name": "report",
            "mimeType": "application/vnd.google-apps.spreadsheet",
            "parents": ["folder1"]
        }"#;

        let metadata: FileMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.id, "abc123");
        assert_eq!(metadata.name.as_deref(), Some("report"));
        assert_eq!(metadata.parents, vec!["folder1".to_string()]);
    }

    #[test]
    fn test_move_response_has_no_name() {
        let metadata: FileMetadata =
            serde_json::from_str(r#"{"id": "abc123", "parents": ["dest"]}"#).unwrap();
        assert!(metadata.name.is_none());
        assert_eq!(format!("{}", metadata), "abc123\t-\t-");
    }

    #[test]
    fn test_create_request_body() {
        let body = serde_json::to_value(CreateSpreadsheetRequest::titled("Report")).unwrap();
        assert_eq!(body, serde_json::json!({"properties": {"title": "Report"}}));
    }

    #[test]
    fn test_value_input_option() {
        assert_eq!(ValueInputOption::default().as_str(), "RAW");
        assert_eq!(ValueInputOption::UserEntered.as_str(), "USER_ENTERED");
    }

    #[test]
    fn test_update_values_response() {
        let json = r#"{
            "spreadsheetId": "s1",
            "updatedRange": "Sheet1!A1:C4",
            "updatedRows": 4,
            "updatedColumns": 3,
            "updatedCells": 12
        }"#;
        let response: UpdateValuesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.updated_range.as_deref(), Some("Sheet1!A1:C4"));
        assert_eq!(response.updated_rows, Some(4));
        assert_eq!(response.updated_cells, Some(12));
    }
}
