//! Search, sort and slice a fetched collection

use std::cmp::Ordering;

use super::page::PagedResult;
use super::query::{ListQuery, SearchSpec, SortOrder, SortSpec};

/// Records the pipeline can search and sort by named field
pub trait Listable {
    /// Value of a searchable or sortable field, `None` for unknown fields
    fn field_value(&self, field: &str) -> Option<&str>;
}

/// Run the full pipeline: filter, sort, then slice one page
pub fn list_page<T: Listable>(records: Vec<T>, query: &ListQuery) -> PagedResult<T> {
    let mut records = match query.search() {
        Some(search) => filter(records, search),
        None => records,
    };

    let default_sort = SortSpec::default();
    sort(&mut records, query.sort().unwrap_or(&default_sort));

    slice(records, query.page_number(), query.page_size())
}

fn filter<T: Listable>(records: Vec<T>, search: &SearchSpec) -> Vec<T> {
    if !is_searchable(&search.field) {
        return records;
    }

    let needle = search.substring.to_lowercase();

    records
        .into_iter()
        .filter(|record| {
            record
                .field_value(&search.field)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

fn is_searchable(field: &str) -> bool {
    matches!(field, "email" | "name")
}

fn sort<T: Listable>(records: &mut [T], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let ordering = match (a.field_value(&spec.field), b.field_value(&spec.field)) {
            (Some(a), Some(b)) => compare_field(&spec.field, a, b),
            _ => Ordering::Equal,
        };

        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_field(field: &str, a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if field == "email" {
        compare_email(&a, &b)
    } else {
        a.cmp(&b)
    }
}

/// Local part first, then domain. Each compares code unit by code unit with
/// the shorter string first on a shared prefix, so `a@x` precedes `a1@x`.
fn compare_email(a: &str, b: &str) -> Ordering {
    let (a_local, a_domain) = a.split_once('@').unwrap_or((a, ""));
    let (b_local, b_domain) = b.split_once('@').unwrap_or((b, ""));

    a_local
        .encode_utf16()
        .cmp(b_local.encode_utf16())
        .then_with(|| a_domain.encode_utf16().cmp(b_domain.encode_utf16()))
}

fn slice<T>(records: Vec<T>, page_number: usize, page_size: usize) -> PagedResult<T> {
    let total = records.len();
    let start = page_number.saturating_sub(1).saturating_mul(page_size);
    let end = page_number.saturating_mul(page_size);

    let data: Vec<T> = records
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect();

    PagedResult {
        page_number,
        page_size,
        count: data.len(),
        total_pages: total.div_ceil(page_size),
        has_previous_page: page_number > 1,
        has_next_page: end < total,
        data,
    }
}
