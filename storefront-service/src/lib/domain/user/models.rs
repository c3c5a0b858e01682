use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::credentials::EmailAddress;
use crate::credentials::Username;
use crate::product::models::ProductId;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Owns the shopper's cart, wishlist, and purchase history as ordered
/// sequences of product references. Duplicates are allowed and references
/// are not checked against the catalog; a referenced product may have been
/// deleted since it was added.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub cart: Vec<ProductId>,
    pub wishlist: Vec<ProductId>,
    pub purchased: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - string is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with validated credential fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to update a user's profile.
///
/// Both fields are optional to support partial updates; an omitted field
/// keeps its stored value. Passwords are not updatable through the profile.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
}

impl UpdateProfileCommand {
    pub fn new(username: Option<Username>, email: Option<EmailAddress>) -> Self {
        Self { username, email }
    }
}
