use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use storefront_service::admin::errors::AdminError;
use storefront_service::admin::models::Admin;
use storefront_service::admin::ports::AdminRepository;
use storefront_service::admin::service::AdminService;
use storefront_service::credentials::Username;
use storefront_service::inbound::http::router::create_router;
use storefront_service::product::errors::ProductError;
use storefront_service::product::models::Product;
use storefront_service::product::models::ProductFields;
use storefront_service::product::models::ProductId;
use storefront_service::product::ports::ProductRepository;
use storefront_service::product::service::ProductService;
use storefront_service::user::errors::UserError;
use storefront_service::user::models::User;
use storefront_service::user::models::UserId;
use storefront_service::user::ports::UserRepository;
use storefront_service::user::service::UserService;

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let admin_repo = Arc::new(InMemoryAdminRepository::default());
        let user_repo = Arc::new(InMemoryUserRepository::default());
        let product_repo = Arc::new(InMemoryProductRepository::default());

        let admin_service = Arc::new(AdminService::new(admin_repo));
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&product_repo)));
        let product_service = Arc::new(ProductService::new(product_repo));

        let authenticator = Arc::new(Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
        ));

        let router = create_router(admin_service, user_service, product_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with a raw token header.
    ///
    /// The authorization header carries the bare token, no Bearer prefix.
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header("authorization", token)
    }

    /// Helper to make POST request with a raw token header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header("authorization", token)
    }

    /// Helper to make PUT request with a raw token header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header("authorization", token)
    }

    /// Helper to make DELETE request with a raw token header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header("authorization", token)
    }

    /// Sign up a user and log in, returning the access token
    pub async fn signup_and_login_user(&self, username: &str) -> String {
        let response = self
            .post("/api/user/signup")
            .json(&serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "password123",
            }))
            .send()
            .await
            .expect("Failed to execute signup request");
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .post("/api/user/login")
            .json(&serde_json::json!({
                "username": username,
                "password": "password123",
            }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status().as_u16(), 200);

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["token"].as_str().expect("Missing token").to_string()
    }

    /// Sign up an admin and log in, returning the access token
    pub async fn signup_and_login_admin(&self, username: &str) -> String {
        let response = self
            .post("/api/admin/signup")
            .json(&serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "password123",
            }))
            .send()
            .await
            .expect("Failed to execute signup request");
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .post("/api/admin/login")
            .json(&serde_json::json!({
                "username": username,
                "password": "password123",
            }))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(response.status().as_u16(), 200);

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["token"].as_str().expect("Missing token").to_string()
    }

    /// Create a product through the API using the given token, returning its id
    pub async fn create_product(&self, token: &str, name: &str) -> String {
        let response = self
            .post_authenticated("/api/products", token)
            .json(&serde_json::json!({
                "name": name,
                "price": 9.99,
                "category": "electronics",
                "subcategory": "audio",
                "description": "test product",
                "image": "aGVsbG8=",
            }))
            .send()
            .await
            .expect("Failed to execute create product request");
        assert_eq!(response.status().as_u16(), 201);

        let response = self
            .get("/api/products")
            .send()
            .await
            .expect("Failed to execute list products request");
        let products: serde_json::Value =
            response.json().await.expect("Failed to parse products");

        products
            .as_array()
            .expect("Expected array body")
            .iter()
            .find(|p| p["name"] == name)
            .and_then(|p| p["id"].as_str())
            .expect("Created product missing from listing")
            .to_string()
    }
}

/// In-memory admin store, insertion ordered
#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: Mutex<Vec<Admin>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: Admin) -> Result<Admin, AdminError> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.username == admin.username) {
            return Err(AdminError::UsernameAlreadyExists(
                admin.username.to_string(),
            ));
        }
        if admins.iter().any(|a| a.email == admin.email) {
            return Err(AdminError::EmailAlreadyExists(admin.email.to_string()));
        }
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Admin>, AdminError> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().find(|a| &a.username == username).cloned())
    }
}

/// In-memory user store, insertion ordered
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn append_to_cart(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.cart.push(product_id);
        Ok(user.cart.clone())
    }

    async fn append_to_wishlist(
        &self,
        id: &UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.wishlist.push(product_id);
        Ok(user.wishlist.clone())
    }

    async fn store_cart_and_purchased(
        &self,
        id: &UserId,
        cart: &[ProductId],
        purchased: &[ProductId],
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.cart = cart.to_vec();
        user.purchased = purchased.to_vec();
        Ok(())
    }

    async fn update_profile(&self, updated: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != updated.id && u.username == updated.username)
        {
            return Err(UserError::UsernameAlreadyExists(
                updated.username.to_string(),
            ));
        }
        if users
            .iter()
            .any(|u| u.id != updated.id && u.email == updated.email)
        {
            return Err(UserError::EmailAlreadyExists(updated.email.to_string()));
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == updated.id)
            .ok_or_else(|| UserError::NotFound(updated.id.to_string()))?;
        user.username = updated.username.clone();
        user.email = updated.email.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);
        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// In-memory product store, insertion ordered
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.lock().unwrap();
        products.push(product.clone());
        Ok(product)
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.products.lock().unwrap();
        Ok(products.clone())
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn replace(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<Product, ProductError> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        product.name = fields.name;
        product.price = fields.price;
        product.category = fields.category;
        product.subcategory = fields.subcategory;
        product.description = fields.description;
        product.image = fields.image;
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != *id);
        if products.len() == before {
            return Err(ProductError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
