//! List query extractor
//!
//! Hands the raw query string to the query engine and reads the page window.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use folio_core::{query::query_param, PageRequest};

/// Raw list query plus the requested page
///
/// Never rejects: malformed fragments are dropped by the query engine and
/// unusable page values fall back to their defaults.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub raw: String,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn from_query_string(raw: &str) -> Self {
        let current = query_param(raw, "current");
        let page_size = query_param(raw, "pageSize");

        Self {
            raw: raw.to_string(),
            page: PageRequest::from_raw(current.as_deref(), page_size.as_deref()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query_string(parts.uri.query().unwrap_or_default()))
    }
}
