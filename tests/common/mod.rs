//! Shared fixtures for tests that talk to a mocked Google API.

#![allow(dead_code)]

use drive_sheets::auth::DEFAULT_SCOPES;
use drive_sheets::models::ServiceAccountCredentials;
use drive_sheets::{Authenticator, Endpoints, GoogleServices};
use mockito::{Mock, ServerGuard};
use serde_json::json;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const CLIENT_EMAIL: &str = "robot@project.iam.gserviceaccount.com";

/// Throwaway RSA key, only ever used to sign JWTs for the mock server.
pub const PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");

pub fn credentials(server: &ServerGuard) -> ServiceAccountCredentials {
    ServiceAccountCredentials {
        client_email: CLIENT_EMAIL.to_string(),
        private_key: PRIVATE_KEY.to_string(),
        token_uri: Some(format!("{}/token", server.url())),
    }
}

/// Credentials file contents pointing at the mock token endpoint.
pub fn credentials_json(server: &ServerGuard) -> String {
    json!({
        "type": "service_account",
        "client_email": CLIENT_EMAIL,
        "private_key": PRIVATE_KEY,
        "token_uri": format!("{}/token", server.url()),
    })
    .to_string()
}

pub fn authenticator(server: &ServerGuard) -> Authenticator {
    Authenticator::new(credentials(server), DEFAULT_SCOPES).unwrap()
}

pub fn endpoints(server: &ServerGuard) -> Endpoints {
    Endpoints {
        drive_api: format!("{}/drive/v3", server.url()),
        drive_upload: format!("{}/upload/drive/v3", server.url()),
        sheets_api: format!("{}/v4", server.url()),
    }
}

pub fn services(server: &ServerGuard) -> GoogleServices {
    GoogleServices::new(authenticator(server), &endpoints(server))
}

/// Token endpoint that hands out `ACCESS_TOKEN`, not yet registered.
pub fn token_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/token")
        .match_body(mockito::Matcher::UrlEncoded(
            "grant_type".into(),
            "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600
            })
            .to_string(),
        )
}

/// Register the token endpoint. Keep the returned mock alive for the test.
pub async fn mock_token(server: &mut ServerGuard) -> Mock {
    token_mock(server).create_async().await
}

pub fn bearer() -> String {
    format!("Bearer {}", ACCESS_TOKEN)
}
