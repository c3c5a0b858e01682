use async_trait::async_trait;

use crate::credentials::Username;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::user::errors::UserError;
use crate::user::models::RegisterUserCommand;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::User;
use crate::user::models::UserId;

/// Port for user domain service operations.
///
/// Every per-user operation takes the id the auth middleware resolved from
/// the caller's token; there is no way to address another user's lists.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is already taken
    /// * `EmailAlreadyExists` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve a user by unique username (login lookup).
    ///
    /// # Errors
    /// * `NotFoundByUsername` - no user with this username
    /// * `DatabaseError` - persistence failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Append a product reference to the caller's cart.
    ///
    /// The reference is not checked against the catalog and duplicates are
    /// kept. Returns the updated cart.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn add_to_cart(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError>;

    /// Append a product reference to the caller's wishlist.
    ///
    /// Same semantics as [`add_to_cart`](Self::add_to_cart).
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn add_to_wishlist(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError>;

    /// Resolve the caller's cart references to current product records.
    ///
    /// Order and duplicates are preserved; a reference to a deleted product
    /// yields `None` in its slot.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn cart_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError>;

    /// Resolve the caller's wishlist references to current product records.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn wishlist_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError>;

    /// Record a purchase: append the product to the purchase history and
    /// drop the first matching cart entry, if any.
    ///
    /// Returns the updated purchase history. The two list writes are a
    /// single row update but there is no cross-request concurrency control;
    /// a concurrent cart mutation can be lost.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn purchase(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError>;

    /// Resolve the caller's purchase history to current product records.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn purchased_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError>;

    /// Update the caller's profile; omitted fields keep their value.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `UsernameAlreadyExists` - new username is already taken
    /// * `EmailAlreadyExists` - new email is already registered
    /// * `DatabaseError` - persistence failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Hard-delete the caller's account.
    ///
    /// No cascade: product references in other rows do not exist, and the
    /// caller's token keeps verifying but stops resolving.
    ///
    /// # Errors
    /// * `NotFound` - subject id does not resolve to a user
    /// * `DatabaseError` - persistence failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is already taken
    /// * `EmailAlreadyExists` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Atomically append a product reference to the stored cart.
    ///
    /// Returns the updated cart.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - persistence failed
    async fn append_to_cart(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError>;

    /// Atomically append a product reference to the stored wishlist.
    ///
    /// Returns the updated wishlist.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - persistence failed
    async fn append_to_wishlist(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError>;

    /// Overwrite the stored cart and purchase history in one statement.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - persistence failed
    async fn store_cart_and_purchased(
        &self,
        id: &UserId,
        cart: &[ProductId],
        purchased: &[ProductId],
    ) -> Result<(), UserError>;

    /// Update the stored username and email.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `UsernameAlreadyExists` - new username is already taken
    /// * `EmailAlreadyExists` - new email is already registered
    /// * `DatabaseError` - persistence failed
    async fn update_profile(&self, user: User) -> Result<User, UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - user does not exist
    /// * `DatabaseError` - persistence failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
