//! Paged result envelope

use serde::Serialize;

/// One page of projected records plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedResult<T> {
    pub page_number: usize,
    pub page_size: usize,
    /// Items actually present in this page
    pub count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub data: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            page_number: self.page_number,
            page_size: self.page_size,
            count: self.count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
