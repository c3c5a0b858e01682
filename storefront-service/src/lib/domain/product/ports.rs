use async_trait::async_trait;

use crate::product::errors::ProductError;
use crate::product::models::Product;
use crate::product::models::ProductFields;
use crate::product::models::ProductId;

/// Port for catalog service operations.
///
/// Authorization is not a concern here: callers reach these operations only
/// through routes the auth middleware has already gated, and the middleware
/// makes no role distinction.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Add a new product to the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn create_product(&self, fields: ProductFields) -> Result<Product, ProductError>;

    /// List every product, unfiltered and unpaginated.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Replace every caller-supplied field of an existing product.
    ///
    /// # Errors
    /// * `NotFound` - no product with this id
    /// * `DatabaseError` - persistence failed
    async fn replace_product(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<Product, ProductError>;

    /// Remove a product from the catalog.
    ///
    /// References held in user carts and wishlists are left untouched; they
    /// resolve to nothing at read time.
    ///
    /// # Errors
    /// * `NotFound` - no product with this id
    /// * `DatabaseError` - persistence failed
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for the product catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a new product.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    /// Retrieve all products in insertion order.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Retrieve the products matching `ids`.
    ///
    /// Missing ids are skipped without error; duplicates in `ids` yield a
    /// single record. Callers re-expand against their own id sequence.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;

    /// Replace the stored fields of an existing product.
    ///
    /// # Errors
    /// * `NotFound` - no product with this id
    /// * `DatabaseError` - persistence failed
    async fn replace(&self, id: &ProductId, fields: ProductFields) -> Result<Product, ProductError>;

    /// Remove a product.
    ///
    /// # Errors
    /// * `NotFound` - no product with this id
    /// * `DatabaseError` - persistence failed
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
