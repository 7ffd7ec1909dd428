//! OAuth authentication module for France Travail API integration.
//!
//! The partner API uses the OAuth 2.0 client-credentials grant. Tokens are not cached:
//! every upstream call obtains a fresh one.

use log::{debug, error, info};
use reqwest::Client;
use serde::Deserialize;

use crate::config::FranceTravailConfig;
use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Builds the Authorization header value for OAuth 2.0 Bearer Token authentication.
///
/// # Format
///
/// ```text
/// Bearer YOUR_ACCESS_TOKEN_HERE
/// ```
///
/// # Example
///
/// ```rust
/// use ftgateway::build_bearer_auth_header;
///
/// let header = build_bearer_auth_header("your_access_token");
/// assert_eq!(header, "Bearer your_access_token");
/// ```
pub fn build_bearer_auth_header(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// Exchanges the configured client credentials for an access token.
///
/// Sends a form-encoded POST with `grant_type=client_credentials`, the client id and
/// secret, and the configured scope.
///
/// # Returns
///
/// - `Ok(String)`: The access token
/// - `Err(ApiError::Authentication)`: If the token endpoint does not answer 200
/// - `Err(ApiError::InvalidResponse)`: If the 200 body carries no `access_token`
/// - `Err(ApiError::Transport)`: If the endpoint cannot be reached
pub async fn fetch_access_token(client: &Client, config: &FranceTravailConfig) -> Result<String> {
    info!("Requesting access token from {}", config.token_url);

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("scope", config.scope.as_str()),
    ];

    let response = client
        .post(&config.token_url)
        .form(&params)
        .send()
        .await?;

    let status = response.status().as_u16();
    if status != 200 {
        error!("Token endpoint answered with status {}", status);
        return Err(ApiError::Authentication { status });
    }

    let body: TokenResponse = response.json().await?;
    match body.access_token {
        Some(token) if !token.is_empty() => {
            debug!("Access token received ({} characters)", token.len());
            Ok(token)
        }
        _ => {
            error!("Token endpoint answered 200 without an access_token");
            Err(ApiError::InvalidResponse(
                "token response has no access_token".to_string(),
            ))
        }
    }
}

/// Obtains a fresh token and returns the full `Authorization` header value.
pub async fn get_auth_header(client: &Client, config: &FranceTravailConfig) -> Result<String> {
    let token = fetch_access_token(client, config).await?;
    Ok(build_bearer_auth_header(&token))
}
