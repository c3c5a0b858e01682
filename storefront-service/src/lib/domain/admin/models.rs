use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::admin::errors::AdminIdError;
use crate::credentials::EmailAddress;
use crate::credentials::Username;

/// Admin aggregate entity.
///
/// Admins exist only to sign in and obtain tokens; the record is immutable
/// after signup and there is no delete route.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: AdminId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Admin unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdminId(pub Uuid);

impl AdminId {
    /// Generate a new random admin ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an admin ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - string is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AdminIdError> {
        Uuid::parse_str(s)
            .map(AdminId)
            .map_err(|e| AdminIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AdminId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new admin with validated credential fields.
#[derive(Debug)]
pub struct RegisterAdminCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterAdminCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}
