//! Extract Drive file, folder and spreadsheet IDs from share URLs.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// Share link shapes, each capturing the ID in group 1.
static SHARE_LINKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://drive\.google\.com/drive/(?:u/\d+/)?folders/([a-zA-Z0-9_-]+)",
        r"^https?://drive\.google\.com/file/d/([a-zA-Z0-9_-]+)",
        r"^https?://docs\.google\.com/spreadsheets/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)",
        r"^https?://drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid share link regex"))
    .collect()
});

/// Drive and Sheets IDs are URL-safe base64-ish tokens.
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid ID regex"));

/// Resolve a share link or a bare ID to the ID the APIs expect.
///
/// Accepted links:
/// - Drive folders: `drive.google.com/drive/[u/N/]folders/<ID>`
/// - Drive files: `drive.google.com/file/d/<ID>/...`
/// - Spreadsheets: `docs.google.com/spreadsheets/[u/N/]d/<ID>/...`
/// - Legacy: `drive.google.com/open?id=<ID>`
///
/// ```
/// use drive_sheets::url_parser::extract_id;
///
/// let link = "https://docs.google.com/spreadsheets/d/1sheetXYZ/edit#gid=0";
/// assert_eq!(extract_id(link).unwrap(), "1sheetXYZ");
/// assert_eq!(extract_id("root").unwrap(), "root");
/// ```
pub fn extract_id(url_or_id: &str) -> Result<String> {
    let trimmed = url_or_id.trim();

    let from_link = SHARE_LINKS
        .iter()
        .find_map(|pattern| pattern.captures(trimmed)?.get(1));
    if let Some(id) = from_link {
        return Ok(id.as_str().to_string());
    }

    if ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidUrlOrId(url_or_id.to_string()))
}
