use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ProductRecord, UpdateProduct, DEFAULT_MAX_RECORDS};

/// Repository trait for the product record store
///
/// Identifiers are allocated by the store, strictly increasing and never
/// reused, even after deletes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Allocate the next identifier
    async fn next_id(&self) -> ProductResult<u64>;

    /// Insert a fully-formed record under its own id
    ///
    /// An id that is already stored is refused with `DuplicateId`; use
    /// `update` to change an existing record.
    async fn add(&self, record: ProductRecord) -> ProductResult<ProductRecord>;

    /// Allocate an id and insert a new record in one step
    async fn create(&self, input: CreateProduct) -> ProductResult<ProductRecord>;

    /// Every stored record, discontinued included
    async fn get_all(&self) -> ProductResult<Vec<ProductRecord>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: u64) -> ProductResult<Option<ProductRecord>>;

    /// Merge the provided fields into an existing record
    async fn update(&self, id: u64, input: UpdateProduct) -> ProductResult<Option<ProductRecord>>;

    /// Delete a product by ID
    async fn delete(&self, id: u64) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<usize>;

    async fn exists(&self, id: u64) -> ProductResult<bool>;

    /// Remove every record and reset the id counter
    async fn clear(&self) -> ProductResult<()>;
}

#[derive(Debug, Default)]
struct StoreState {
    records: BTreeMap<u64, ProductRecord>,
    current_id: u64,
}

impl StoreState {
    fn ensure_capacity(&self, max_records: usize) -> ProductResult<()> {
        if self.records.len() >= max_records {
            return Err(ProductError::CapacityExceeded { max: max_records });
        }
        Ok(())
    }
}

/// In-memory implementation of ProductRepository
///
/// Records and the id counter share one lock, so every operation is a single
/// critical section.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<StoreState>>,
    max_records: usize,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::with_max_records(DEFAULT_MAX_RECORDS)
    }

    pub fn with_max_records(max_records: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            max_records,
        }
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn next_id(&self) -> ProductResult<u64> {
        let mut state = self.state.write().await;
        state.current_id += 1;
        Ok(state.current_id)
    }

    async fn add(&self, record: ProductRecord) -> ProductResult<ProductRecord> {
        let mut state = self.state.write().await;
        if state.records.contains_key(&record.id) {
            return Err(ProductError::DuplicateId(record.id));
        }
        state.ensure_capacity(self.max_records)?;

        // An externally chosen id must not be handed out again later
        state.current_id = state.current_id.max(record.id);
        state.records.insert(record.id, record.clone());

        tracing::info!(product_id = record.id, "Added product");
        Ok(record)
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<ProductRecord> {
        let mut state = self.state.write().await;
        state.ensure_capacity(self.max_records)?;

        state.current_id += 1;
        let record = ProductRecord::new(state.current_id, input, Utc::now());
        state.records.insert(record.id, record.clone());

        tracing::info!(product_id = record.id, "Created product");
        Ok(record)
    }

    async fn get_all(&self) -> ProductResult<Vec<ProductRecord>> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> ProductResult<Option<ProductRecord>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn update(&self, id: u64, input: UpdateProduct) -> ProductResult<Option<ProductRecord>> {
        let mut state = self.state.write().await;

        let Some(record) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        record.apply_update(input, Utc::now());

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: u64) -> ProductResult<bool> {
        let mut state = self.state.write().await;

        if state.records.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> ProductResult<usize> {
        let state = self.state.read().await;
        Ok(state.records.len())
    }

    async fn exists(&self, id: u64) -> ProductResult<bool> {
        let state = self.state.read().await;
        Ok(state.records.contains_key(&id))
    }

    async fn clear(&self) -> ProductResult<()> {
        let mut state = self.state.write().await;
        state.records.clear();
        state.current_id = 0;

        tracing::info!("Cleared product store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            code: "MOV-9000".to_string(),
            category: "Quarto".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(input("Cama Box Queen Size")).await.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.date_created, product.date_modified);

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("A")).await.unwrap();
        let second = repo.create(input("B")).await.unwrap();
        assert!(repo.delete(second.id).await.unwrap());

        let third = repo.create(input("C")).await.unwrap();
        assert!(first.id < second.id && second.id < third.id);
        assert_eq!(repo.next_id().await.unwrap(), third.id + 1);
    }

    #[tokio::test]
    async fn test_add_advances_counter_past_explicit_id() {
        let repo = InMemoryProductRepository::new();
        let mut record = repo.create(input("A")).await.unwrap();
        record.id = 40;
        repo.add(record).await.unwrap();

        let next = repo.create(input("B")).await.unwrap();
        assert_eq!(next.id, 41);
    }

    #[tokio::test]
    async fn test_add_refuses_stored_id() {
        let repo = InMemoryProductRepository::with_max_records(1);
        let original = repo.create(input("A")).await.unwrap();

        let replacement = ProductRecord {
            name: "B".to_string(),
            ..original.clone()
        };
        assert!(matches!(
            repo.add(replacement).await,
            Err(ProductError::DuplicateId(1))
        ));

        assert_eq!(repo.get_by_id(1).await.unwrap(), Some(original));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_capacity_exceeded_does_not_consume_id() {
        let repo = InMemoryProductRepository::with_max_records(1);
        repo.create(input("A")).await.unwrap();

        let result = repo.create(input("B")).await;
        assert!(matches!(
            result,
            Err(ProductError::CapacityExceeded { max: 1 })
        ));

        let record = repo.get_by_id(1).await.unwrap().unwrap();
        assert!(matches!(
            repo.add(ProductRecord { id: 2, ..record }).await,
            Err(ProductError::CapacityExceeded { .. })
        ));
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(1).await.unwrap();
        assert_eq!(repo.create(input("C")).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(input("Guarda-Roupa")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    on_promotion: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.on_promotion);
        assert_eq!(updated.name, "Guarda-Roupa");
        assert_eq!(updated.date_created, created.date_created);
        assert!(updated.date_modified >= created.date_modified);

        let missing = repo.update(42, UpdateProduct::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_exists_and_count() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(input("Estante")).await.unwrap();

        assert!(repo.exists(product.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(!repo.exists(product.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_resets_counter() {
        let repo = InMemoryProductRepository::new();
        repo.create(input("A")).await.unwrap();
        repo.create(input("B")).await.unwrap();

        repo.clear().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_all().await.unwrap().is_empty());
        assert_eq!(repo.create(input("C")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = InMemoryProductRepository::new();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(input(&format!("P{i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(repo.count().await.unwrap(), 32);
    }
}
