pub mod admin;
pub mod credentials;
pub mod product;
pub mod user;
