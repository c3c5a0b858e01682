pub mod admin;
pub mod product;
pub mod user;

pub use admin::PostgresAdminRepository;
pub use product::PostgresProductRepository;
pub use user::PostgresUserRepository;
