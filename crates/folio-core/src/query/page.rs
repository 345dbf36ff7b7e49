//! Page arithmetic and the list envelope

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A coerced, always-valid page request (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    current: u64,
    page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Non-positive values fall back to page 1 / size 10
    pub fn new(current: i64, page_size: i64) -> Self {
        Self {
            current: u64::try_from(current).ok().filter(|c| *c > 0).unwrap_or(1),
            page_size: u64::try_from(page_size)
                .ok()
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Coerce raw query-string values; anything unparseable is treated as absent
    pub fn from_raw(current: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0);
        Self::new(parse(current), parse(page_size))
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[inline]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip: `(current - 1) * page_size`, saturating
    #[inline]
    pub fn offset(&self) -> u64 {
        (self.current - 1).saturating_mul(self.page_size)
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Pagination metadata returned with every list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current: u64,
    pub page_size: u64,
    pub pages: u64,
    pub total: u64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            current: request.current,
            page_size: request.page_size,
            pages: total.div_ceil(request.page_size),
            total,
        }
    }
}

/// `{ meta, result }` list response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub meta: PageMeta,
    pub result: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn new(meta: PageMeta, result: Vec<T>) -> Self {
        Self { meta, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_defaults() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_raw(Some("abc"), Some("-5")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_raw(Some("0"), Some("0")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_raw(Some("3"), Some("25")),
            PageRequest::new(3, 25)
        );
        let page = PageRequest::from_raw(Some("3"), Some("25"));
        assert_eq!((page.current(), page.page_size()), (3, 25));
    }

    #[test]
    fn test_zero_window_is_never_constructible() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageMeta::new(page, 5).pages, 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 7).offset(), 14);
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX).offset(), u64::MAX);
    }

    #[test]
    fn test_meta_pages() {
        let meta = PageMeta::new(PageRequest::new(1, 10), 0);
        assert_eq!(meta.pages, 0);
        let meta = PageMeta::new(PageRequest::new(1, 10), 10);
        assert_eq!(meta.pages, 1);
        let meta = PageMeta::new(PageRequest::new(2, 10), 11);
        assert_eq!(meta.pages, 2);
        let meta = PageMeta::new(PageRequest::new(4, 10), 23);
        assert_eq!((meta.current, meta.pages, meta.total), (4, 3, 23));
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(PageRequest::new(2, 5), 12);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "current": 2, "pageSize": 5, "pages": 3, "total": 12 })
        );
    }
}
