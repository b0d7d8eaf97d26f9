//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing catalog operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Build a service over a repository that is also used elsewhere,
    /// e.g. by the order workflow.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Update a product. Orders already placed keep their price snapshot.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn sample() -> Product {
        Product::new(CreateProduct {
            name: "Chair".to_string(),
            price: 25000,
            image: "/uploads/chair.jpeg".to_string(),
        })
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.get_product(id).await;
        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_without_touching_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let result = service
            .create_product(CreateProduct {
                name: "Chair".to_string(),
                price: -5,
                image: "/uploads/chair.jpeg".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ProductError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let product = sample();
        let returned = product.clone();
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = ProductService::new(repo);
        let created = service
            .create_product(CreateProduct {
                name: "Chair".to_string(),
                price: 25000,
                image: "/uploads/chair.jpeg".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, product.id);
    }

    #[tokio::test]
    async fn test_update_product_validates_before_store() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(
                Uuid::now_v7(),
                UpdateProduct {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ProductError::InvalidInput(_))));
    }
}
