//! Google Sheets API client.

use reqwest::{Client, Url};

use crate::auth::Authenticator;
use crate::error::{check_response, DriveError, Result};
use crate::models::{
    CreateSpreadsheetRequest, Spreadsheet, UpdateValuesResponse, ValueInputOption, ValueRange,
};

/// Base URL for Google Sheets API v4.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Client for the Google Sheets spreadsheets API.
#[derive(Clone)]
pub struct SheetsClient {
    auth: Authenticator,
    http: Client,
    api_base: String,
}

impl SheetsClient {
    pub fn new(auth: Authenticator) -> Self {
        Self::with_base_url(auth, SHEETS_API_BASE)
    }

    pub fn with_base_url(auth: Authenticator, api_base: impl Into<String>) -> Self {
        Self {
            auth,
            http: Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Create an empty spreadsheet and return its ID.
    pub async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .post(format!("{}/spreadsheets", self.api_base))
            .bearer_auth(&token)
            .query(&[("fields", "spreadsheetId")])
            .json(&CreateSpreadsheetRequest::titled(title))
            .send()
            .await?;

        let spreadsheet: Spreadsheet = check_response(response).await?.json().await?;
        Ok(spreadsheet.spreadsheet_id)
    }

    /// Overwrite the cells starting at `range` with `values`.
    ///
    /// `range` is A1 notation; a single cell such as `A1` anchors the grid
    /// at its top left corner.
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<serde_json::Value>>,
        input_option: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        let token = self.auth.get_access_token().await?;

        let response = self
            .http
            .put(self.values_url(spreadsheet_id, range)?)
            .bearer_auth(&token)
            .query(&[("valueInputOption", input_option.as_str())])
            .json(&ValueRange { values })
            .send()
            .await?;

        let updated: UpdateValuesResponse = check_response(response).await?.json().await?;
        Ok(updated)
    }

    /// `.../spreadsheets/{id}/values/{range}` with each segment percent-encoded.
    ///
    /// Sheet names may contain `#`, `?` or `/`, which would otherwise end the path.
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        let invalid = || DriveError::InvalidUrlOrId(self.api_base.clone());

        let mut url = Url::parse(&self.api_base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["spreadsheets", spreadsheet_id, "values", range]);
        Ok(url)
    }
}
