pub mod cart;
pub mod login;
pub mod profile;
pub mod purchases;
pub mod signup;
pub mod wishlist;
