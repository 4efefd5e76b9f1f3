//! Normalizes untrusted query and path input into typed requests.
//!
//! Every violation in a request is collected before returning, so clients
//! see all bad fields at once.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{ListQuery, ListQueryParams, SortOption, ViewMode, ALLOWED_PAGE_SIZES};

/// Category path segment for category-scoped listings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryPath {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,
}

fn violation(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err.add_param(Cow::Borrowed("value"), &value);
    err
}

/// Largest integer an IEEE double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Numeric coercion: any finite decimal or exponent notation with a whole
/// value ("12", "12.0", "1.2e1") is accepted.
fn parse_whole(raw: &str) -> Option<u64> {
    let n = raw.trim().parse::<f64>().ok()?;
    (n.is_finite() && n.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(&n)).then_some(n as u64)
}

fn parse_positive(raw: &str) -> Option<u64> {
    parse_whole(raw).filter(|n| *n >= 1)
}

/// Validate listing query parameters, applying defaults for absent fields.
pub fn validate_list_query(params: &ListQueryParams) -> Result<ListQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut query = ListQuery {
        category: params.category.clone(),
        ..ListQuery::default()
    };

    if let Some(raw) = params.sort.as_deref() {
        match SortOption::from_str(raw) {
            Ok(sort) => query.sort = sort,
            Err(_) => errors.add(
                "sort",
                violation(
                    "one_of",
                    "Sort must be one of name_asc, name_desc, category, date_created, popularity",
                    raw,
                ),
            ),
        }
    }

    if let Some(raw) = params.page.as_deref() {
        match parse_positive(raw).and_then(|n| u32::try_from(n).ok()) {
            Some(page) => query.page = page,
            None => errors.add(
                "page",
                violation("range", "Page must be a positive integer", raw),
            ),
        }
    }

    if let Some(raw) = params.page_size.as_deref() {
        match parse_whole(raw).and_then(|n| u32::try_from(n).ok()) {
            Some(size) if ALLOWED_PAGE_SIZES.contains(&size) => query.page_size = size,
            _ => errors.add(
                "pageSize",
                violation("one_of", "Page size must be 12, 24, 36, or 48", raw),
            ),
        }
    }

    if let Some(raw) = params.view.as_deref() {
        match ViewMode::from_str(raw) {
            Ok(view) => query.view = view,
            Err(_) => errors.add(
                "view",
                violation("one_of", "View must be one of grid, list, compact", raw),
            ),
        }
    }

    if errors.is_empty() {
        Ok(query)
    } else {
        Err(errors)
    }
}

/// Validate a product id path segment.
pub fn validate_id(raw: &str) -> Result<u64, ValidationErrors> {
    parse_positive(raw).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("id", violation("range", "Id must be a positive integer", raw));
        errors
    })
}

/// Validate a category path segment.
pub fn validate_category(raw: &str) -> Result<String, ValidationErrors> {
    let path = CategoryPath {
        category: raw.to_string(),
    };
    path.validate()?;
    Ok(path.category)
}
