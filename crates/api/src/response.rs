//! Shared response envelope and header helpers for API handlers.
//!
//! Asset endpoints return bare entities with metadata in headers (entity
//! alerts, pagination); other endpoints use the `{ "data": ... }` envelope.

use axum::http::header::{HeaderName, LINK, LOCATION};
use axum::http::{HeaderMap, HeaderValue};
use innvo_core::pagination::Page;
use innvo_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Application name used to namespace alert keys and headers.
pub const APP_NAME: &str = "innvoApp";

pub const ALERT_HEADER: HeaderName = HeaderName::from_static("x-innvoapp-alert");
pub const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-innvoapp-params");
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");
pub const PAGE_NUMBER_HEADER: HeaderName = HeaderName::from_static("x-page-number");
pub const PAGE_SIZE_HEADER: HeaderName = HeaderName::from_static("x-page-size");

/// Entity lifecycle events announced through alert headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityAction {
    Created,
    Updated,
    Deleted,
}

impl EntityAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// Alert headers for an entity event, e.g.
/// `X-innvoApp-alert: innvoApp.asset.created` and `X-innvoApp-params: 1`.
pub fn entity_alert_headers(entity: &str, action: EntityAction, id: DbId) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ALERT_HEADER,
        header_value(format!("{APP_NAME}.{entity}.{}", action.as_str()))?,
    );
    headers.insert(PARAMS_HEADER, HeaderValue::from(id));
    Ok(headers)
}

/// `Location` header for a newly created resource.
pub fn location_header(headers: &mut HeaderMap, path: String) -> AppResult<()> {
    headers.insert(LOCATION, header_value(path)?);
    Ok(())
}

/// Pagination headers: totals plus an RFC 5988 `Link` header with
/// `next`, `prev`, `last` and `first` relations.
pub fn pagination_headers<T>(page: &Page<T>, base_path: &str) -> AppResult<HeaderMap> {
    let number = page.request.number();
    let size = page.request.size();
    let last = page.total_pages() - 1;

    let link = |target: i64, rel: &str| {
        format!("<{base_path}?pageNumber={target}&pageSize={size}>; rel=\"{rel}\"")
    };

    let mut links = Vec::with_capacity(4);
    if let Some(next) = number.checked_add(1).filter(|_| page.has_next()) {
        links.push(link(next, "next"));
    }
    if page.has_previous() {
        links.push(link(number - 1, "prev"));
    }
    links.push(link(last, "last"));
    links.push(link(0, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total));
    headers.insert(PAGE_NUMBER_HEADER, HeaderValue::from(number));
    headers.insert(PAGE_SIZE_HEADER, HeaderValue::from(size));
    headers.insert(LINK, header_value(links.join(","))?);
    Ok(headers)
}

fn header_value(value: String) -> AppResult<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| AppError::InternalError(format!("Invalid header value: {e}")))
}
