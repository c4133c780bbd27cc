//! Product service: validation, scans, and lifecycle events.

use std::sync::Arc;

use common::EntityId;
use events::EventPublisher;
use repository::RepositoryExt;

use crate::error::DomainError;
use crate::lifecycle::{EventKind, emit};

use super::{Category, CreateProduct, Product, ProductFactory, ProductRepository, UpdateProduct};

/// Service for managing products.
///
/// Same shape as the user service without a uniqueness rule.
pub struct ProductService<R: ProductRepository> {
    repository: R,
    publisher: Arc<EventPublisher>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, publisher: Arc<EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates the input, stores the product and publishes `product.created`.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> Result<Product, DomainError> {
        let draft = ProductFactory::draft(&input)?;
        let product = self.repository.create(draft).await;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(product_id = %product.id(), "product created");

        emit(
            &self.publisher,
            EventKind::ProductCreated,
            product.id(),
            &product,
            product.created_at(),
        )
        .await?;
        Ok(product)
    }

    /// Applies a partial update and publishes `product.updated`.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: &EntityId,
        input: UpdateProduct,
    ) -> Result<Product, DomainError> {
        if !self.repository.exists(id).await {
            return Err(DomainError::not_found("Product", id));
        }
        let changes = ProductFactory::changes(&input)?;

        let product = self
            .repository
            .update(id, changes)
            .await
            .ok_or_else(|| DomainError::not_found("Product", id))?;

        metrics::counter!("products_updated_total").increment(1);
        tracing::info!(product_id = %product.id(), "product updated");

        emit(
            &self.publisher,
            EventKind::ProductUpdated,
            product.id(),
            &product,
            product.updated_at(),
        )
        .await?;
        Ok(product)
    }

    /// Removes a product and publishes `product.deleted` with the removed snapshot.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: &EntityId) -> Result<Product, DomainError> {
        let product = self
            .repository
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::not_found("Product", id))?;

        if !self.repository.delete(id).await {
            return Err(DomainError::not_found("Product", id));
        }

        metrics::counter!("products_deleted_total").increment(1);
        tracing::info!(product_id = %id, "product deleted");

        emit(
            &self.publisher,
            EventKind::ProductDeleted,
            id,
            &product,
            common::clock::now(),
        )
        .await?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &EntityId) -> Result<Product, DomainError> {
        self.repository
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    pub async fn get_all_products(&self) -> Vec<Product> {
        self.repository.find_all().await
    }

    pub async fn find_by_category(&self, category: Category) -> Vec<Product> {
        self.repository.find_by_category(category).await
    }

    pub async fn find_in_stock(&self) -> Vec<Product> {
        self.repository.find_in_stock().await
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// A blank query matches every product.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.repository.find_all().await;
        }
        self.repository
            .find_where(&|product: &Product| product.mentions(&needle))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repository::InMemoryRepository;

    fn service() -> ProductService<InMemoryRepository<Product>> {
        ProductService::new(InMemoryRepository::new(), Arc::new(EventPublisher::new()))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let product = service
            .create_product(CreateProduct::new("Desk Lamp", 24.99, "home", "Adjustable LED lamp"))
            .await
            .unwrap();

        assert!(product.in_stock());
        assert_eq!(service.get_product_by_id(&product.id()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_product_unchanged() {
        let service = service();
        let product = service
            .create_product(CreateProduct::new("Desk Lamp", 24.99, "home", "Adjustable LED lamp"))
            .await
            .unwrap();

        let err = service
            .update_product(
                &product.id(),
                UpdateProduct {
                    price: Some(-1.0),
                    ..UpdateProduct::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(service.get_product_by_id(&product.id()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_not_found_before_validation() {
        let service = service();
        let err = service
            .update_product(
                &EntityId::new(),
                UpdateProduct {
                    price: Some(-1.0),
                    ..UpdateProduct::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Product", .. }));
    }

    #[tokio::test]
    async fn test_search_matches_name_or_description() {
        let service = service();
        service
            .create_product(CreateProduct::new("Desk Lamp", 24.99, "home", "Adjustable LED lamp"))
            .await
            .unwrap();
        service
            .create_product(CreateProduct::new("Novel", 9.5, "books", "A gripping mystery story"))
            .await
            .unwrap();

        assert_eq!(service.search("LAMP").await.len(), 1);
        assert_eq!(service.search("mystery").await.len(), 1);
        assert_eq!(service.search("a").await.len(), 2);
        assert!(service.search("bicycle").await.is_empty());
        assert_eq!(service.search("   ").await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = service();
        let product = service
            .create_product(CreateProduct::new("Novel", 9.5, "books", "A gripping mystery story"))
            .await
            .unwrap();

        service.delete_product(&product.id()).await.unwrap();
        assert!(matches!(
            service.get_product_by_id(&product.id()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
