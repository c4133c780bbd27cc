//! Product-specific repository queries.

use async_trait::async_trait;
use repository::{InMemoryRepository, Repository, RepositoryExt};

use super::{Category, Product};

/// Storage capability needed by the product service.
#[async_trait]
pub trait ProductRepository: Repository<Product> {
    /// Products in `category`, in `find_all` order.
    async fn find_by_category(&self, category: Category) -> Vec<Product> {
        self.find_where(&|product: &Product| product.category() == category)
            .await
    }

    /// Products currently flagged as in stock.
    async fn find_in_stock(&self) -> Vec<Product> {
        self.find_where(&|product: &Product| product.in_stock()).await
    }
}

impl ProductRepository for InMemoryRepository<Product> {}
