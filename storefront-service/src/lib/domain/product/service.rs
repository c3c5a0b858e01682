use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::product::errors::ProductError;
use crate::product::models::Product;
use crate::product::models::ProductFields;
use crate::product::models::ProductId;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;

/// Domain service implementation for catalog operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(&self, fields: ProductFields) -> Result<Product, ProductError> {
        let product = Product {
            id: ProductId::new(),
            name: fields.name,
            price: fields.price,
            category: fields.category,
            subcategory: fields.subcategory,
            description: fields.description,
            image: fields.image,
            created_at: Utc::now(),
        };

        self.repository.create(product).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn replace_product(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<Product, ProductError> {
        self.repository.replace(id, fields).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        self.repository.delete(id).await
    }
}
