use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::listing;
use crate::models::{
    CreateProduct, ListQueryParams, ProductDetail, ProductListResult, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::seed::{demo_record, DEMO_PRODUCTS};
use crate::validation::{validate_category, validate_id, validate_list_query};

/// Service layer for catalog business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Filtered, featured-first, paginated listing of active products
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListQueryParams) -> ProductResult<ProductListResult> {
        let query = validate_list_query(&params)?;
        let records = self.repository.get_all().await?;

        Ok(listing::list_products(records, &query, Utc::now()))
    }

    /// Get a product by ID, discontinued or not
    #[instrument(skip(self))]
    pub async fn get_product(&self, raw_id: &str) -> ProductResult<ProductDetail> {
        let id = validate_id(raw_id)?;

        self.repository
            .get_by_id(id)
            .await?
            .map(|record| ProductDetail::from_record(&record, Utc::now()))
            .ok_or_else(|| ProductError::NotFound("Product not found".to_string()))
    }

    /// Listing scoped to one category; the path category overrides any
    /// `category` query parameter.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        raw_category: &str,
        params: ListQueryParams,
    ) -> ProductResult<ProductListResult> {
        let category = validate_category(raw_category)?;
        let mut query = validate_list_query(&params)?;

        let records = self.repository.get_all().await?;
        let has_products = records
            .iter()
            .any(|record| record.category == category && !record.discontinued);
        if !has_products {
            return Err(ProductError::NotFound(
                "No products found in this category".to_string(),
            ));
        }

        query.category = Some(category);
        Ok(listing::list_products(records, &query, Utc::now()))
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ProductDetail> {
        input.validate()?;

        let record = self.repository.create(input).await?;
        Ok(ProductDetail::from_record(&record, Utc::now()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        raw_id: &str,
        input: UpdateProduct,
    ) -> ProductResult<ProductDetail> {
        let id = validate_id(raw_id)?;
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .map(|record| ProductDetail::from_record(&record, Utc::now()))
            .ok_or_else(|| ProductError::NotFound("Product not found".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, raw_id: &str) -> ProductResult<()> {
        let id = validate_id(raw_id)?;

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound("Product not found".to_string()));
        }

        Ok(())
    }

    /// Load the demonstration catalog, dated relative to `now`.
    ///
    /// Returns the number of records inserted.
    #[instrument(skip(self))]
    pub async fn seed_demo_catalog(&self, now: DateTime<Utc>) -> ProductResult<usize> {
        for index in 0..DEMO_PRODUCTS.len() {
            let id = self.repository.next_id().await?;
            let record = demo_record(index, id, now).ok_or_else(|| {
                ProductError::Internal(format!("No demo product at index {index}"))
            })?;
            self.repository.add(record).await?;
        }

        tracing::info!(count = DEMO_PRODUCTS.len(), "Seeded demo catalog");
        Ok(DEMO_PRODUCTS.len())
    }
}
