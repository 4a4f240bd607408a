//! Listing query parameters

use crate::domain::DomainError;

/// Field used when a sort spec names none
pub const DEFAULT_SORT_FIELD: &str = "email";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only the literal `asc` sorts ascending, anything else is descending
    pub fn parse(value: &str) -> Self {
        if value == "asc" { Self::Asc } else { Self::Desc }
    }
}

/// `field:order` sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Parse `field:order`. A missing field falls back to `email`, a missing
    /// order to descending.
    pub fn parse(raw: &str) -> Self {
        let (field, order) = match raw.split_once(':') {
            Some((field, order)) => (field.trim(), SortOrder::parse(order.trim())),
            None => (raw.trim(), SortOrder::Desc),
        };

        let field = if field.is_empty() {
            DEFAULT_SORT_FIELD
        } else {
            field
        };

        Self::new(field, order)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortOrder::Desc)
    }
}

/// `field:substring` search specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub field: String,
    pub substring: String,
}

impl SearchSpec {
    pub fn new(field: impl Into<String>, substring: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            substring: substring.into(),
        }
    }

    /// Parse `field:substring`. Empty input means no search. Input without a
    /// separator names no searchable field and therefore filters nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        match raw.split_once(':') {
            Some((field, substring)) => Some(Self::new(field.trim(), substring)),
            None => Some(Self::new(raw.trim(), "")),
        }
    }
}

/// Validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page_number: usize,
    page_size: usize,
    sort: Option<SortSpec>,
    search: Option<SearchSpec>,
}

impl ListQuery {
    /// Both page number and page size must be at least 1
    pub fn new(page_number: usize, page_size: usize) -> Result<Self, DomainError> {
        if page_number < 1 {
            return Err(DomainError::validation("page_number must be at least 1"));
        }

        if page_size < 1 {
            return Err(DomainError::validation("page_size must be at least 1"));
        }

        Ok(Self {
            page_number,
            page_size,
            sort: None,
            search: None,
        })
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_search(mut self, search: SearchSpec) -> Self {
        self.search = Some(search);
        self
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn search(&self) -> Option<&SearchSpec> {
        self.search.as_ref()
    }
}
