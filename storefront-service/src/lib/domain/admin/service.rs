use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::admin::errors::AdminError;
use crate::admin::models::Admin;
use crate::admin::models::AdminId;
use crate::admin::models::RegisterAdminCommand;
use crate::admin::ports::AdminRepository;
use crate::admin::ports::AdminServicePort;
use crate::credentials::Username;

/// Domain service implementation for admin accounts.
pub struct AdminService<AR>
where
    AR: AdminRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AdminService<AR>
where
    AR: AdminRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR> AdminServicePort for AdminService<AR>
where
    AR: AdminRepository,
{
    async fn register_admin(&self, command: RegisterAdminCommand) -> Result<Admin, AdminError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AdminError::Unknown(format!("Password hashing failed: {}", e)))?;

        let admin = Admin {
            id: AdminId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(admin).await
    }

    async fn get_admin_by_username(&self, username: &Username) -> Result<Admin, AdminError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(AdminError::NotFoundByUsername(username.to_string()))
    }
}
