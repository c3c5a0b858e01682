use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::admin::errors::AdminError;
use crate::admin::models::Admin;
use crate::admin::models::AdminId;
use crate::admin::ports::AdminRepository;
use crate::credentials::EmailAddress;
use crate::credentials::Username;

pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn admin_from_row(row: PgRow) -> Result<Admin, AdminError> {
        Ok(Admin {
            id: AdminId(
                row.try_get("id")
                    .map_err(|e| AdminError::DatabaseError(e.to_string()))?,
            ),
            username: Username::new(
                row.try_get("username")
                    .map_err(|e| AdminError::DatabaseError(e.to_string()))?,
            )?,
            email: EmailAddress::new(
                row.try_get("email")
                    .map_err(|e| AdminError::DatabaseError(e.to_string()))?,
            )?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| AdminError::DatabaseError(e.to_string()))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| AdminError::DatabaseError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn create(&self, admin: Admin) -> Result<Admin, AdminError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(admin.id.0)
        .bind(admin.username.as_str())
        .bind(admin.email.as_str())
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("admins_username_key") {
                        return AdminError::UsernameAlreadyExists(
                            admin.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("admins_email_key") {
                        return AdminError::EmailAlreadyExists(admin.email.as_str().to_string());
                    }
                }
            }
            AdminError::DatabaseError(e.to_string())
        })?;

        Ok(admin)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Admin>, AdminError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AdminError::DatabaseError(e.to_string()))?;

        row.map(Self::admin_from_row).transpose()
    }
}
