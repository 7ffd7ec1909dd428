//! # ftgateway Library
//!
//! A thin HTTP gateway in front of the France Travail "Offres d'emploi v2" API. Requests are
//! authenticated with the OAuth 2.0 client-credentials grant, forwarded upstream, and
//! successful answers are cached in memory for ten minutes.
//!
//! ## Features
//!
//! - Offer search with every upstream filter, typed and validated at the boundary
//! - `Content-Range` pagination surfaced as `{start, end, total}`
//! - Offer detail by identifier
//! - Short-lived in-memory response cache keyed by a digest of the parameters
//! - CSV export of offers, companies, and skills (see the `export_offers` binary)
//!
//! ## Configuration
//!
//! - `FRANCE_TRAVAIL_CLIENT_ID`, `FRANCE_TRAVAIL_CLIENT_SECRET`: required credentials
//! - `FRANCE_TRAVAIL_TOKEN_URL`, `FRANCE_TRAVAIL_OFFERS_URL`: optional endpoint overrides
//! - `UPSTREAM_TIMEOUT_SECS`: upstream request timeout (defaults to 30)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a banner
//! - `GET /health`: Returns service health status
//! - `GET /offres`: Searches offers
//! - `GET /offres/{id}`: Returns one offer

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod francetravail;
pub mod handlers;
pub mod oauth;

// Re-export commonly used types and functions
pub use cache::{compute_cache_key, ResponseCache, DEFAULT_CACHE_TTL};
pub use config::{get_server_port, FranceTravailConfig};
pub use error::{ApiError, ExportError};
pub use export::{export_offers, save_offers_to_csv, ExportOutcome};
pub use francetravail::{OffersClient, Pagination, ProxyResponse, SearchFilters};
pub use handlers::{build_router, AppState};
pub use oauth::build_bearer_auth_header;
