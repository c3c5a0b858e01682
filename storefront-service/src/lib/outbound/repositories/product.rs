use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::product::errors::ProductError;
use crate::product::models::Product;
use crate::product::models::ProductFields;
use crate::product::models::ProductId;
use crate::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn product_from_row(row: PgRow) -> Result<Product, ProductError> {
        let db_err = |e: sqlx::Error| ProductError::DatabaseError(e.to_string());

        Ok(Product {
            id: ProductId(row.try_get("id").map_err(db_err)?),
            name: row.try_get("name").map_err(db_err)?,
            price: row.try_get("price").map_err(db_err)?,
            category: row.try_get("category").map_err(db_err)?,
            subcategory: row.try_get("subcategory").map_err(db_err)?,
            description: row.try_get("description").map_err(db_err)?,
            image: row.try_get("image").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, category, subcategory, description, image, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.category)
        .bind(&product.subcategory)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(product)
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, category, subcategory, description, image, created_at
            FROM products
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::product_from_row).collect()
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, name, price, category, subcategory, description, image, created_at
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::product_from_row).collect()
    }

    async fn replace(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<Product, ProductError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, category = $4, subcategory = $5, description = $6, image = $7
            WHERE id = $1
            RETURNING id, name, price, category, subcategory, description, image, created_at
            "#,
        )
        .bind(id.0)
        .bind(&fields.name)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(&fields.subcategory)
        .bind(&fields.description)
        .bind(&fields.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Self::product_from_row(row),
            None => Err(ProductError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
