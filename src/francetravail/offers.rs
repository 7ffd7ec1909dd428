//! Job offer operations against the France Travail API.
//!
//! Both operations authenticate with a freshly issued client-credentials token, send one
//! GET request and shape the answer. Neither retries.

use std::sync::Arc;

use log::{debug, error, info};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use reqwest::Client;
use serde_json::Value;

use super::filters::SearchFilters;
use super::response::{sanitize_for_logging, shape_search_response, ProxyResponse};
use crate::config::FranceTravailConfig;
use crate::error::{ApiError, Result};
use crate::oauth::get_auth_header;

/// Client for the offers resource of the France Travail API.
#[derive(Debug, Clone)]
pub struct OffersClient {
    http: Client,
    config: Arc<FranceTravailConfig>,
}

impl OffersClient {
    /// Builds a client whose requests time out after `config.timeout`.
    pub fn new(config: FranceTravailConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(OffersClient {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &FranceTravailConfig {
        &self.config
    }

    /// Searches offers matching `filters`.
    ///
    /// Unset filters are not sent; `sort` defaults to 1. See
    /// [`shape_search_response`] for how each upstream status is handled.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] if no token could be obtained
    /// - [`ApiError::Upstream`] for 4xx/5xx answers, with the upstream status and message
    /// - [`ApiError::Transport`] if the API cannot be reached
    pub async fn search_offers(&self, filters: &SearchFilters) -> Result<ProxyResponse> {
        let params = filters.to_query_pairs();
        let url = format!("{}/search", self.config.offers_url);
        info!("Searching offers with {} parameter(s)", params.len());
        debug!("Search parameters: {:?}", params);

        let auth_header = get_auth_header(&self.http, &self.config).await?;

        let response = self
            .http
            .get(&url)
            .query(&params)
            .header(AUTHORIZATION, auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        info!("Search answered with status {}", status);
        debug!("Search response: {} bytes received", body.len());

        shape_search_response(status, content_range.as_deref(), &body)
    }

    /// Fetches a single offer by its identifier.
    ///
    /// The identifier is not validated beyond being percent-encoded as one path segment.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Upstream`] for any non-2xx answer, carrying the raw response text
    /// - [`ApiError::Transport`] (HTTP 500) on connection errors and timeouts
    pub async fn get_offer(&self, id: &str) -> Result<ProxyResponse> {
        let url = format!("{}/{}", self.config.offers_url, urlencoding::encode(id));
        info!("Fetching offer {}", sanitize_for_logging(id, 32));

        let auth_header = get_auth_header(&self.http, &self.config).await?;

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Offer request failed: {}", e);
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !response_is_success(status) {
            error!("Offer lookup failed - Status: {}", status);
            debug!("Error response: {}", sanitize_for_logging(&text, 200));
            return Err(ApiError::Upstream {
                status,
                message: text,
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ProxyResponse::new(status, body))
    }
}

fn response_is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
