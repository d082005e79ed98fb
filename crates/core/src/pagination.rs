//! Page requests and page results.
//!
//! Page numbers are zero-based. A request is validated once, up front, so
//! stores never see a non-positive page size.

use crate::error::CoreError;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a caller can request. Larger sizes are clamped.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// A validated request for one page of an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: i64,
    size: i64,
}

impl PageRequest {
    /// Validate raw paging input.
    ///
    /// - `size <= 0` and `number < 0` are rejected.
    /// - `size` above [`MAX_PAGE_SIZE`] is clamped.
    pub fn new(number: i64, size: i64) -> Result<Self, CoreError> {
        if size <= 0 {
            return Err(CoreError::Validation(format!(
                "Page size must be positive, got {size}"
            )));
        }
        if number < 0 {
            return Err(CoreError::Validation(format!(
                "Page number must not be negative, got {number}"
            )));
        }
        Ok(Self {
            number,
            size: size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Number of items preceding this page. Saturates instead of overflowing
    /// for absurd page numbers, which simply yields an empty page.
    pub fn offset(&self) -> i64 {
        self.number.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the metadata needed to navigate the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of live records in the whole collection.
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Total number of pages; an empty collection still has one (empty) page.
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            1
        } else {
            (self.total + self.request.size() - 1) / self.request.size()
        }
    }

    pub fn has_next(&self) -> bool {
        self.request.number() < self.total_pages() - 1
    }

    pub fn has_previous(&self) -> bool {
        self.request.number() > 0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn zero_page_size_is_rejected() {
        assert_matches!(PageRequest::new(0, 0), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::new(0, -3), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_page_number_is_rejected() {
        assert_matches!(PageRequest::new(-1, 10), Err(CoreError::Validation(_)));
    }

    #[test]
    fn oversized_page_is_clamped() {
        let req = PageRequest::new(0, MAX_PAGE_SIZE * 5).unwrap();
        assert_eq!(req.size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_number_times_size() {
        assert_eq!(PageRequest::new(3, 25).unwrap().offset(), 75);
        assert_eq!(PageRequest::new(i64::MAX, 25).unwrap().offset(), i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(0, 10).unwrap();
        assert_eq!(Page::<()>::new(vec![], 0, req).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], 10, req).total_pages(), 1);
        assert_eq!(Page::<()>::new(vec![], 11, req).total_pages(), 2);
    }

    #[test]
    fn navigation_flags() {
        let first = Page::<()>::new(vec![], 25, PageRequest::new(0, 10).unwrap());
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = Page::<()>::new(vec![], 25, PageRequest::new(2, 10).unwrap());
        assert!(!last.has_next());
        assert!(last.has_previous());

        let beyond = Page::<()>::new(vec![], 25, PageRequest::new(9, 10).unwrap());
        assert!(!beyond.has_next());
    }

    #[test]
    fn largest_page_number_has_no_next() {
        let page = Page::<()>::new(vec![], 25, PageRequest::new(i64::MAX, 10).unwrap());
        assert!(!page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.total_pages(), 3);
    }
}
