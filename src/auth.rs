//! Service account authentication for Google APIs.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DriveError, Result};
use crate::models::{ServiceAccountCredentials, TokenResponse};

/// Google OAuth2 token endpoint, used when the credentials omit `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Full access to Google Drive.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Read/write access to Google Sheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Scopes needed by the Drive and Sheets clients together.
pub const DEFAULT_SCOPES: &[&str] = &[DRIVE_SCOPE, SHEETS_SCOPE];

const TOKEN_LIFETIME_SECS: u64 = 3600;

/// JWT claims for service account authentication.
#[derive(Debug, Serialize)]
struct Claims {
    iss: String,   // Issuer (service account email)
    scope: String, // Space separated scopes
    aud: String,   // Audience (token endpoint)
    exp: u64,
    iat: u64,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: SystemTime,
}

/// Authenticator for Google APIs using service account credentials.
///
/// Cloning is cheap; clones share the token cache.
#[derive(Clone)]
pub struct Authenticator {
    credentials: Arc<ServiceAccountCredentials>,
    key: Arc<EncodingKey>,
    scopes: Arc<Vec<String>>,
    client: Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl Authenticator {
    /// Create a new authenticator from a service account JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P, scopes: &[&str]) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let credentials: ServiceAccountCredentials = serde_json::from_str(&content)?;
        Self::new(credentials, scopes)
    }

    /// Create a new authenticator from credentials.
    ///
    /// Fails if `private_key` is not a PEM encoded RSA key.
    pub fn new(credentials: ServiceAccountCredentials, scopes: &[&str]) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;
        Ok(Self {
            credentials: Arc::new(credentials),
            key: Arc::new(key),
            scopes: Arc::new(scopes.iter().map(|s| s.to_string()).collect()),
            client: Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Service account email the tokens are issued for.
    pub fn client_email(&self) -> &str {
        &self.credentials.client_email
    }

    fn token_uri(&self) -> &str {
        self.credentials
            .token_uri
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_URI)
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                // 60 second buffer before expiration
                let buffer = Duration::from_secs(60);
                if token.expires_at > SystemTime::now() + buffer {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let new_token = self.refresh_token().await?;

        {
            let mut cached = self.cached_token.write().await;
            *cached = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    fn claims(&self, now: u64) -> Claims {
        Claims {
            iss: self.credentials.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.token_uri().to_string(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        }
    }

    /// Exchange a signed JWT assertion for a fresh access token.
    async fn refresh_token(&self) -> Result<CachedToken> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DriveError::TokenRefreshError(e.to_string()))?
            .as_secs();

        let header = Header::new(Algorithm::RS256);
        let jwt = encode(&header, &self.claims(now), &self.key)?;

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &jwt),
        ];

        debug!(client_email = %self.credentials.client_email, "requesting access token");

        let response = self
            .client
            .post(self.token_uri())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;

        let expires_at = SystemTime::now() + Duration::from_secs(token_response.expires_in);

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(token_uri: Option<&str>) -> ServiceAccountCredentials {
        ServiceAccountCredentials {
            client_email: "test@example.iam.gserviceaccount.com".to_string(),
            private_key: include_str!("../tests/fixtures/service_account_key.pem").to_string(),
            token_uri: token_uri.map(String::from),
        }
    }

    #[test]
    fn test_claims_join_scopes() {
        let auth = Authenticator::new(credentials(None), DEFAULT_SCOPES).unwrap();
        let claims = auth.claims(1234567890);

        assert_eq!(claims.iss, "test@example.iam.gserviceaccount.com");
        assert_eq!(claims.scope, format!("{} {}", DRIVE_SCOPE, SHEETS_SCOPE));
        assert_eq!(claims.aud, DEFAULT_TOKEN_URI);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_claims_use_credential_token_uri() {
        let auth = Authenticator::new(
            credentials(Some("http://localhost:1234/token")),
            &[DRIVE_SCOPE],
        )
        .unwrap();
        let claims = auth.claims(0);

        assert_eq!(claims.aud, "http://localhost:1234/token");
        assert_eq!(claims.scope, DRIVE_SCOPE);
    }

    #[test]
    fn test_invalid_private_key_is_rejected_up_front() {
        let mut creds = credentials(None);
        creds.private_key = "not a pem".to_string();

        let result = Authenticator::new(creds, DEFAULT_SCOPES);
        assert!(matches!(result, Err(DriveError::JwtError(_))));
    }
}
