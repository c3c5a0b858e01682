use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::credentials::EmailAddress;
use crate::credentials::Username;
use crate::product::models::ProductId;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: PgRow) -> Result<User, UserError> {
        let db_err = |e: sqlx::Error| UserError::DatabaseError(e.to_string());

        let cart: Vec<Uuid> = row.try_get("cart").map_err(db_err)?;
        let wishlist: Vec<Uuid> = row.try_get("wishlist").map_err(db_err)?;
        let purchased: Vec<Uuid> = row.try_get("purchased").map_err(db_err)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(db_err)?),
            username: Username::new(row.try_get("username").map_err(db_err)?)?,
            email: EmailAddress::new(row.try_get("email").map_err(db_err)?)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            cart: cart.into_iter().map(ProductId).collect(),
            wishlist: wishlist.into_iter().map(ProductId).collect(),
            purchased: purchased.into_iter().map(ProductId).collect(),
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }

    fn map_unique_violation(e: sqlx::Error, username: &Username, email: &EmailAddress) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                if db_err.constraint() == Some("users_username_key") {
                    return UserError::UsernameAlreadyExists(username.as_str().to_string());
                }
                if db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(email.as_str().to_string());
                }
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, cart, wishlist, purchased, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.cart.iter().map(|p| p.0).collect::<Vec<_>>())
        .bind(user.wishlist.iter().map(|p| p.0).collect::<Vec<_>>())
        .bind(user.purchased.iter().map(|p| p.0).collect::<Vec<_>>())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &user.username, &user.email))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, cart, wishlist, purchased, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::user_from_row).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, cart, wishlist, purchased, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::user_from_row).transpose()
    }

    async fn append_to_cart(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET cart = array_append(cart, $2)
            WHERE id = $1
            RETURNING cart
            "#,
        )
        .bind(id.0)
        .bind(product_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = row.ok_or_else(|| UserError::NotFound(id.to_string()))?;
        let cart: Vec<Uuid> = row
            .try_get("cart")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(cart.into_iter().map(ProductId).collect())
    }

    async fn append_to_wishlist(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET wishlist = array_append(wishlist, $2)
            WHERE id = $1
            RETURNING wishlist
            "#,
        )
        .bind(id.0)
        .bind(product_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = row.ok_or_else(|| UserError::NotFound(id.to_string()))?;
        let wishlist: Vec<Uuid> = row
            .try_get("wishlist")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(wishlist.into_iter().map(ProductId).collect())
    }

    async fn store_cart_and_purchased(
        &self,
        id: &UserId,
        cart: &[ProductId],
        purchased: &[ProductId],
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET cart = $2, purchased = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(cart.iter().map(|p| p.0).collect::<Vec<_>>())
        .bind(purchased.iter().map(|p| p.0).collect::<Vec<_>>())
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_profile(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &user.username, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
