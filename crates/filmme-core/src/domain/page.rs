//! Page-number pagination.

use crate::error::DomainError;

/// PostgreSQL's OFFSET is a signed 64-bit integer.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Zero-based page index, as paginators expect it.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    /// Rows skipped before this page. Saturates instead of wrapping.
    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.page_size)
    }
}

/// Default and maximum page sizes for one kind of listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl PaginationPolicy {
    pub const POSTS: PaginationPolicy = PaginationPolicy {
        default_page_size: 10,
        max_page_size: 50,
    };

    pub const COMMENTS: PaginationPolicy = PaginationPolicy {
        default_page_size: 20,
        max_page_size: 100,
    };

    /// Validate client-supplied paging parameters.
    ///
    /// Oversized pages are clamped to `max_page_size`; zero is rejected.
    /// A page whose first row lies beyond any addressable offset cannot
    /// exist and is reported as an invalid page.
    pub fn request(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<PageRequest, DomainError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::Validation("page must be at least 1".to_string()));
        }

        let page_size = match page_size {
            Some(0) => {
                return Err(DomainError::Validation(
                    "page_size must be at least 1".to_string(),
                ));
            }
            Some(size) => size.min(self.max_page_size),
            None => self.default_page_size,
        };

        let addressable = (page - 1)
            .checked_mul(page_size)
            .is_some_and(|offset| offset <= MAX_OFFSET);
        if !addressable {
            return Err(DomainError::InvalidPage(page));
        }

        Ok(PageRequest { page, page_size })
    }
}

/// One page of results plus the totals needed to render pagination links.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// The first page always exists, even when empty.
    pub fn is_out_of_range(&self) -> bool {
        self.page > 1 && self.page > self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
