//! Listing pipeline: exclusion, category filter, featured-first sort,
//! pagination, then shaping of the page slice.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::models::{ListQuery, ProductListItem, ProductListResult, ProductRecord, SortOption};

/// Run the full pipeline over a snapshot of the store.
pub fn list_products(
    records: Vec<ProductRecord>,
    query: &ListQuery,
    now: DateTime<Utc>,
) -> ProductListResult {
    let visible = filter_visible(records, query.category.as_deref());
    let sorted = sort_featured_first(visible, query.sort);

    let total = sorted.len();
    let items = paginate(sorted, query.page, query.page_size)
        .iter()
        .map(|record| ProductListItem::from_record(record, now))
        .collect();

    ProductListResult {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
        total_pages: total_pages(total, query.page_size),
    }
}

/// Drop discontinued records, then keep only the exact category when given.
pub fn filter_visible(records: Vec<ProductRecord>, category: Option<&str>) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter(|record| !record.discontinued)
        .filter(|record| category.is_none_or(|category| record.category == category))
        .collect()
}

/// Featured records first; each partition is stable-sorted on its own.
pub fn sort_featured_first(records: Vec<ProductRecord>, sort: SortOption) -> Vec<ProductRecord> {
    let (mut featured, mut regular): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|record| record.featured);

    if let Some(compare) = comparator(sort) {
        featured.sort_by(compare);
        regular.sort_by(compare);
    }

    featured.extend(regular);
    featured
}

type Comparator = fn(&ProductRecord, &ProductRecord) -> Ordering;

fn comparator(sort: SortOption) -> Option<Comparator> {
    match sort {
        SortOption::NameAsc => Some(by_name as Comparator),
        SortOption::NameDesc => Some(by_name_desc as Comparator),
        SortOption::Category => Some(by_category as Comparator),
        SortOption::DateCreated => Some(by_newest as Comparator),
        // No view-count data yet
        SortOption::Popularity => None,
    }
}

fn by_name(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    locale_cmp(&a.name, &b.name)
}

fn by_name_desc(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    locale_cmp(&b.name, &a.name)
}

fn by_category(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    locale_cmp(&a.category, &b.category).then_with(|| by_name(a, b))
}

fn by_newest(a: &ProductRecord, b: &ProductRecord) -> Ordering {
    b.date_created.cmp(&a.date_created)
}

/// The 1-based `page` of `page_size` items; past the end yields nothing.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Vec<T> {
    let size = page_size as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(size);
    items.into_iter().skip(start).take(size).collect()
}

pub fn total_pages(total: usize, page_size: u32) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as usize)
}

/// Case- and accent-insensitive ordering for Latin text.
///
/// Strings equal under folding fall back to their raw order, so the result
/// is a total order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(strip_accent)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
