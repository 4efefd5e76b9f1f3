use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Products per page when `pageSize` is omitted
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// The only page sizes a listing accepts
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [12, 24, 36, 48];
/// Store capacity when none is configured
pub const DEFAULT_MAX_RECORDS: usize = 10_000;
/// A product counts as new for this many days after creation
pub const NEW_PRODUCT_DAYS: i64 = 30;
pub const NAME_MAX_LENGTH: usize = 50;
pub const CODE_MAX_LENGTH: usize = 50;
pub const CATEGORY_MAX_LENGTH: usize = 100;

/// Listing sort criterion
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortOption {
    /// Name, A to Z
    NameAsc,
    /// Name, Z to A
    NameDesc,
    /// Category, then name A to Z
    Category,
    /// Newest first
    #[default]
    DateCreated,
    /// Reserved for view-count ranking; keeps store order
    Popularity,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Category,
        SortOption::DateCreated,
        SortOption::Popularity,
    ];
}

/// Catalog presentation mode requested by the client
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

/// Product as held by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Store-assigned identifier, never reused
    pub id: u64,
    pub name: String,
    pub code: String,
    pub category: String,
    /// Image URL or path
    pub primary_image: String,
    pub featured: bool,
    /// Flag as written; responses recompute it from `date_created`
    pub is_new: bool,
    pub on_promotion: bool,
    /// Hidden from listings, still fetchable by id
    pub discontinued: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl ProductRecord {
    /// Build a record from validated input, stamping both dates with `now`.
    pub fn new(id: u64, input: CreateProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            code: input.code,
            category: input.category,
            primary_image: input.primary_image,
            featured: input.featured,
            is_new: input.is_new,
            on_promotion: input.on_promotion,
            discontinued: input.discontinued,
            date_created: now,
            date_modified: now,
        }
    }

    /// Merge the provided fields. `id` and `date_created` are left alone.
    pub fn apply_update(&mut self, update: UpdateProduct, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(primary_image) = update.primary_image {
            self.primary_image = primary_image;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(is_new) = update.is_new {
            self.is_new = is_new;
        }
        if let Some(on_promotion) = update.on_promotion {
            self.on_promotion = on_promotion;
        }
        if let Some(discontinued) = update.discontinued {
            self.discontinued = discontinued;
        }
        self.date_modified = now;
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    #[validate(length(max = 50, message = "Code must be at most 50 characters"))]
    #[serde(default)]
    pub code: String,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub primary_image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub on_promotion: bool,
    #[serde(default)]
    pub discontinued: bool,
}

/// DTO for a partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "Code must be at most 50 characters"))]
    pub code: Option<String>,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    pub primary_image: Option<String>,
    pub featured: Option<bool>,
    pub is_new: Option<bool>,
    pub on_promotion: Option<bool>,
    pub discontinued: Option<bool>,
}

/// Raw listing query string, validated into [`ListQuery`]
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQueryParams {
    /// Exact, case-sensitive category to filter by
    pub category: Option<String>,
    /// name_asc | name_desc | category | date_created | popularity
    pub sort: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// 12 | 24 | 36 | 48
    pub page_size: Option<String>,
    /// grid | list | compact
    pub view: Option<String>,
}

/// Validated listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub sort: SortOption,
    pub page: u32,
    pub page_size: u32,
    pub view: ViewMode,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: None,
            sort: SortOption::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            view: ViewMode::default(),
        }
    }
}

/// Whether a product created at `date_created` is still new at `now`.
pub fn is_new_at(date_created: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(date_created) <= Duration::days(NEW_PRODUCT_DAYS)
}

/// List projection of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub category: String,
    pub primary_image: String,
    pub featured: bool,
    pub is_new: bool,
    pub on_promotion: bool,
}

impl ProductListItem {
    pub fn from_record(record: &ProductRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            code: record.code.clone(),
            category: record.category.clone(),
            primary_image: record.primary_image.clone(),
            featured: record.featured,
            is_new: is_new_at(record.date_created, now),
            on_promotion: record.on_promotion,
        }
    }
}

/// Single-product projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: u64,
    pub name: String,
    pub code: String,
    pub category: String,
    pub primary_image: String,
    pub featured: bool,
    pub is_new: bool,
    pub on_promotion: bool,
    pub discontinued: bool,
    pub date_created: DateTime<Utc>,
}

impl ProductDetail {
    pub fn from_record(record: &ProductRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            code: record.code.clone(),
            category: record.category.clone(),
            primary_image: record.primary_image.clone(),
            featured: record.featured,
            is_new: is_new_at(record.date_created, now),
            on_promotion: record.on_promotion,
            discontinued: record.discontinued,
            date_created: record.date_created,
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResult {
    pub items: Vec<ProductListItem>,
    /// Matching products across all pages
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
}
