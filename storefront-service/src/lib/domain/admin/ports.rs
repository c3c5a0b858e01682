use async_trait::async_trait;

use crate::admin::errors::AdminError;
use crate::admin::models::Admin;
use crate::admin::models::RegisterAdminCommand;
use crate::credentials::Username;

/// Port for admin account operations.
#[async_trait]
pub trait AdminServicePort: Send + Sync + 'static {
    /// Register a new admin with validated credentials.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is already taken
    /// * `EmailAlreadyExists` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn register_admin(&self, command: RegisterAdminCommand) -> Result<Admin, AdminError>;

    /// Retrieve an admin by unique username (login lookup).
    ///
    /// # Errors
    /// * `NotFoundByUsername` - no admin with this username
    /// * `DatabaseError` - persistence failed
    async fn get_admin_by_username(&self, username: &Username) -> Result<Admin, AdminError>;
}

/// Persistence operations for the admin aggregate.
#[async_trait]
pub trait AdminRepository: Send + Sync + 'static {
    /// Persist a new admin.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is already taken
    /// * `EmailAlreadyExists` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn create(&self, admin: Admin) -> Result<Admin, AdminError>;

    /// Retrieve an admin by username.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<Admin>, AdminError>;
}
