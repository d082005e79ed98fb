//! Shared query parameter types for API handlers.

use innvo_core::pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

/// Paging parameters (`?pageNumber=&pageSize=`, or `?page=&size=`).
///
/// Page numbers are zero-based. Values are validated by the store, so a
/// non-positive size is reported as a validation error rather than
/// silently corrected here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(alias = "page")]
    pub page_number: Option<i64>,
    #[serde(alias = "size")]
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(0)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
