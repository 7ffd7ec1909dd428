//! Configuration module for the gateway.
//!
//! This module contains the France Travail API credentials and endpoints, loaded once
//! at startup from environment variables, plus the server port lookup.

use log::{debug, error, info, warn};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

/// OAuth2 token endpoint for France Travail partner applications.
pub const DEFAULT_TOKEN_URL: &str =
    "https://francetravail.io/connexion/oauth2/access_token?realm=partenaire";

/// Base URL of the offers resource. Search lives under `/search`, details under `/{id}`.
pub const DEFAULT_OFFERS_URL: &str =
    "https://api.francetravail.io/partenaire/offresdemploi/v2/offres";

/// Scope requested with every client-credentials grant.
pub const OAUTH_SCOPE: &str = "api_offresdemploiv2 o2dsoffre";

/// Upper bound on a single upstream call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CLIENT_ID_VAR: &str = "FRANCE_TRAVAIL_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "FRANCE_TRAVAIL_CLIENT_SECRET";

/// Configuration struct for France Travail API access.
///
/// Holds the client-credentials pair used to obtain bearer tokens and the endpoints the
/// gateway talks to. Built once at process start and shared read-only afterwards.
#[derive(Clone)]
pub struct FranceTravailConfig {
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Token endpoint used for the client-credentials grant
    pub token_url: String,
    /// Base URL of the offers resource, without trailing slash
    pub offers_url: String,
    /// Scope sent with the token request
    pub scope: String,
    /// Timeout applied to every upstream request
    pub timeout: Duration,
}

impl fmt::Debug for FranceTravailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FranceTravailConfig")
            .field("client_id", &mask_secret(&self.client_id))
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .field("offers_url", &self.offers_url)
            .field("scope", &self.scope)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Masks a secret for logging, keeping at most the first and last eight characters.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    let prefix: String = chars.iter().take(8.min(len)).collect();

    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

/// Reads a required, non-empty environment variable.
fn read_required(name: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            info!("Found {} environment variable", name);
            debug!("{} (masked): {}", name, mask_secret(&value));
            Ok(value)
        }
        Ok(_) => {
            error!("{} is set but empty", name);
            Err(format!("Missing credentials: {} is empty", name).into())
        }
        Err(e) => {
            error!("Failed to load {} from environment: {}", name, e);
            Err(format!("Missing credentials: {} is not set", name).into())
        }
    }
}

/// Checks that an endpoint is an absolute http(s) URL and strips any trailing slash.
fn validate_url(name: &str, value: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let parsed = Url::parse(value).map_err(|e| format!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("{} must use http or https, got '{}'", name, parsed.scheme()).into());
    }
    Ok(value.trim_end_matches('/').to_string())
}

impl FranceTravailConfig {
    /// Creates a configuration with the given credentials and the production endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        FranceTravailConfig {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            offers_url: DEFAULT_OFFERS_URL.to_string(),
            scope: OAUTH_SCOPE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Replaces the token and offers endpoints, e.g. to point at a sandbox or a mock server.
    ///
    /// # Errors
    ///
    /// Fails if either value is not an absolute http(s) URL.
    pub fn with_endpoints(
        mut self,
        token_url: &str,
        offers_url: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        self.token_url = validate_url("token URL", token_url)?;
        self.offers_url = validate_url("offers URL", offers_url)?;
        Ok(self)
    }

    /// Creates a new `FranceTravailConfig` by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRANCE_TRAVAIL_CLIENT_ID`: OAuth2 client id of the partner application
    /// - `FRANCE_TRAVAIL_CLIENT_SECRET`: OAuth2 client secret of the partner application
    ///
    /// # Optional Environment Variables
    ///
    /// - `FRANCE_TRAVAIL_TOKEN_URL`: overrides the token endpoint
    /// - `FRANCE_TRAVAIL_OFFERS_URL`: overrides the offers base URL
    /// - `UPSTREAM_TIMEOUT_SECS`: timeout for upstream calls (defaults to 30)
    ///
    /// # Returns
    ///
    /// - `Ok(FranceTravailConfig)`: If both credentials are present and URLs are valid
    /// - `Err(...)`: If a credential is missing or empty, or an override is malformed
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ftgateway::FranceTravailConfig;
    ///
    /// std::env::set_var("FRANCE_TRAVAIL_CLIENT_ID", "my_client_id");
    /// std::env::set_var("FRANCE_TRAVAIL_CLIENT_SECRET", "my_client_secret");
    ///
    /// let config = FranceTravailConfig::from_env().unwrap();
    /// assert_eq!(config.client_id, "my_client_id");
    /// ```
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading France Travail configuration from environment variables");

        let client_id = read_required(CLIENT_ID_VAR)?;
        let client_secret = read_required(CLIENT_SECRET_VAR)?;
        let mut config = FranceTravailConfig::new(client_id, client_secret);

        if let Ok(token_url) = env::var("FRANCE_TRAVAIL_TOKEN_URL") {
            info!("Using token endpoint override: {}", token_url);
            config.token_url = validate_url("FRANCE_TRAVAIL_TOKEN_URL", &token_url)?;
        }

        if let Ok(offers_url) = env::var("FRANCE_TRAVAIL_OFFERS_URL") {
            info!("Using offers endpoint override: {}", offers_url);
            config.offers_url = validate_url("FRANCE_TRAVAIL_OFFERS_URL", &offers_url)?;
        }

        if let Ok(raw) = env::var("UPSTREAM_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid UPSTREAM_TIMEOUT_SECS '{}', keeping {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        info!("France Travail configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the variable is not set it defaults to 3000; an unparseable value is logged
/// and also falls back to 3000.
///
/// # Example
///
/// ```rust
/// use ftgateway::get_server_port;
///
/// // With no PORT set
/// std::env::remove_var("PORT");
/// assert_eq!(get_server_port(), 3000);
/// ```
pub fn get_server_port() -> u16 {
    match env::var("PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("PORT '{}' is not a valid port number, using 3000", raw);
            3000
        }),
        Err(_) => 3000,
    }
}
