use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::credentials::Username;
use crate::product::models::Product;
use crate::product::models::ProductId;
use crate::product::ports::ProductRepository;
use crate::user::errors::UserError;
use crate::user::models::RegisterUserCommand;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Needs the product repository alongside the user repository: list reads
/// resolve stored product references to their current records.
pub struct UserService<UR, PR>
where
    UR: UserRepository,
    PR: ProductRepository,
{
    repository: Arc<UR>,
    product_repository: Arc<PR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, PR> UserService<UR, PR>
where
    UR: UserRepository,
    PR: ProductRepository,
{
    pub fn new(repository: Arc<UR>, product_repository: Arc<PR>) -> Self {
        Self {
            repository,
            product_repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn require_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Expand a reference sequence into current product records, keeping
    /// order and duplicates. References to deleted products become `None`.
    async fn resolve_references(
        &self,
        references: &[ProductId],
    ) -> Result<Vec<Option<Product>>, UserError> {
        if references.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.product_repository.find_by_ids(references).await?;
        let by_id: HashMap<ProductId, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();

        Ok(references
            .iter()
            .map(|id| by_id.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl<UR, PR> UserServicePort for UserService<UR, PR>
where
    UR: UserRepository,
    PR: ProductRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            cart: Vec::new(),
            wishlist: Vec::new(),
            purchased: Vec::new(),
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn add_to_cart(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        self.repository.append_to_cart(id, product_id).await
    }

    async fn add_to_wishlist(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        self.repository.append_to_wishlist(id, product_id).await
    }

    async fn cart_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError> {
        let user = self.require_user(id).await?;
        self.resolve_references(&user.cart).await
    }

    async fn wishlist_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError> {
        let user = self.require_user(id).await?;
        self.resolve_references(&user.wishlist).await
    }

    async fn purchase(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        let mut user = self.require_user(id).await?;

        user.purchased.push(product_id);
        // Drop the first matching cart entry; later duplicates stay
        if let Some(position) = user.cart.iter().position(|entry| *entry == product_id) {
            user.cart.remove(position);
        }

        self.repository
            .store_cart_and_purchased(id, &user.cart, &user.purchased)
            .await?;

        Ok(user.purchased)
    }

    async fn purchased_contents(&self, id: &UserId) -> Result<Vec<Option<Product>>, UserError> {
        let user = self.require_user(id).await?;
        self.resolve_references(&user.purchased).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.require_user(id).await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        self.repository.update_profile(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::credentials::EmailAddress;
    use crate::product::errors::ProductError;
    use crate::product::models::ProductFields;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn append_to_cart(&self, id: &UserId, product_id: ProductId) -> Result<Vec<ProductId>, UserError>;
            async fn append_to_wishlist(&self, id: &UserId, product_id: ProductId) -> Result<Vec<ProductId>, UserError>;
            async fn store_cart_and_purchased(&self, id: &UserId, cart: &[ProductId], purchased: &[ProductId]) -> Result<(), UserError>;
            async fn update_profile(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: Product) -> Result<Product, ProductError>;
            async fn list_all(&self) -> Result<Vec<Product>, ProductError>;
            async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;
            async fn replace(&self, id: &ProductId, fields: ProductFields) -> Result<Product, ProductError>;
            async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
        }
    }

    fn test_user(id: UserId) -> User {
        User {
            id,
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            cart: Vec::new(),
            wishlist: Vec::new(),
            purchased: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn test_product(id: ProductId, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 20.0,
            category: "furniture".to_string(),
            subcategory: "lighting".to_string(),
            description: "A desk lamp".to_string(),
            image: "aW1hZ2U=".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.password_hash.starts_with("$argon2")
                    && user.cart.is_empty()
                    && user.wishlist.is_empty()
                    && user.purchased.is_empty()
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let command = RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let user = service.register_user(command).await.expect("register failed");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let command = RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let result = service.register_user(command).await;
        assert!(matches!(
            result,
            Err(UserError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let username = Username::new("nonexistent".to_string()).unwrap();
        let result = service.get_user_by_username(&username).await;
        assert!(matches!(result, Err(UserError::NotFoundByUsername(_))));
    }

    #[tokio::test]
    async fn test_add_to_cart_passthrough() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let product_id = ProductId::new();

        repository
            .expect_append_to_cart()
            .withf(move |id, pid| *id == user_id && *pid == product_id)
            .times(1)
            .returning(|_, pid| Ok(vec![pid]));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let cart = service
            .add_to_cart(&user_id, product_id)
            .await
            .expect("add failed");
        assert_eq!(cart, vec![product_id]);
    }

    #[tokio::test]
    async fn test_cart_contents_preserves_order_and_marks_deleted() {
        let mut repository = MockTestUserRepository::new();
        let mut products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let kept = ProductId::new();
        let deleted = ProductId::new();

        let mut user = test_user(user_id);
        user.cart = vec![kept, deleted, kept];

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        // Only one of the two referenced products still exists
        products
            .expect_find_by_ids()
            .times(1)
            .returning(move |_| Ok(vec![test_product(kept, "Lamp")]));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let contents = service.cart_contents(&user_id).await.expect("read failed");

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].as_ref().map(|p| p.id), Some(kept));
        assert!(contents[1].is_none());
        assert_eq!(contents[2].as_ref().map(|p| p.id), Some(kept));
    }

    #[tokio::test]
    async fn test_cart_contents_empty_cart_skips_catalog() {
        let mut repository = MockTestUserRepository::new();
        let mut products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let returned_user = test_user(user_id);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        products.expect_find_by_ids().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let contents = service.cart_contents(&user_id).await.expect("read failed");
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn test_purchase_removes_first_matching_cart_entry() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let wanted = ProductId::new();
        let other = ProductId::new();

        let mut user = test_user(user_id);
        user.cart = vec![wanted, other, wanted];

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_store_cart_and_purchased()
            .withf(move |id, cart, purchased| {
                *id == user_id && cart == [other, wanted] && purchased == [wanted]
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let purchased = service
            .purchase(&user_id, wanted)
            .await
            .expect("purchase failed");
        assert_eq!(purchased, vec![wanted]);
    }

    #[tokio::test]
    async fn test_purchase_product_not_in_cart_still_recorded() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let wanted = ProductId::new();
        let other = ProductId::new();

        let mut user = test_user(user_id);
        user.cart = vec![other];

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_store_cart_and_purchased()
            .withf(move |_, cart, purchased| cart == [other] && purchased == [wanted])
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let purchased = service
            .purchase(&user_id, wanted)
            .await
            .expect("purchase failed");
        assert_eq!(purchased, vec![wanted]);
    }

    #[tokio::test]
    async fn test_purchase_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let result = service.purchase(&UserId::new(), ProductId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        let user_id = UserId::new();
        let returned_user = test_user(user_id);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        repository
            .expect_update_profile()
            .withf(|user| {
                // Username untouched, only the email changes
                user.username.as_str() == "testuser" && user.email.as_str() == "new@example.com"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let command = UpdateProfileCommand {
            username: None,
            email: Some(EmailAddress::new("new@example.com".to_string()).unwrap()),
        };

        let user = service
            .update_profile(&user_id, command)
            .await
            .expect("update failed");
        assert_eq!(user.email.as_str(), "new@example.com");
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        let products = MockTestProductRepository::new();

        let user_id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(user_id.to_string())));

        let service = UserService::new(Arc::new(repository), Arc::new(products));

        let result = service.delete_user(&user_id).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
