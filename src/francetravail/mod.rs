//! France Travail API integration module.
//!
//! This module contains the typed search filters, the offers client, and the shaping of
//! upstream answers (status handling and `Content-Range` pagination).

mod filters;
mod offers;
mod pagination;
mod response;

// Re-export public API
pub use filters::{SearchFilters, DEFAULT_SORT};
pub use offers::OffersClient;
pub use pagination::{parse_content_range, Pagination};
pub use response::{shape_search_response, ProxyResponse, NO_RESULTS_MESSAGE};

// Crate-internal re-exports (used by tests)
#[allow(unused_imports)]
pub(crate) use response::{sanitize_for_logging, upstream_message};
