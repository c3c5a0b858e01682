use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::login::admin_login;
use super::handlers::admin::signup::admin_signup;
use super::handlers::products::create_product::create_product;
use super::handlers::products::delete_product::delete_product;
use super::handlers::products::list_products::list_products;
use super::handlers::products::update_product::update_product;
use super::handlers::users::cart::add_to_cart;
use super::handlers::users::cart::get_cart;
use super::handlers::users::login::user_login;
use super::handlers::users::profile::delete_account;
use super::handlers::users::profile::update_profile;
use super::handlers::users::purchases::get_purchased;
use super::handlers::users::purchases::purchase;
use super::handlers::users::signup::user_signup;
use super::handlers::users::wishlist::add_to_wishlist;
use super::handlers::users::wishlist::get_wishlist;
use super::middleware::authenticate as auth_middleware;
use crate::admin::ports::AdminServicePort;
use crate::product::ports::ProductServicePort;
use crate::user::ports::UserServicePort;

/// Inline base64 image payloads make product bodies large; match the
/// original's 10mb JSON limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub admin_service: Arc<dyn AdminServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    admin_service: Arc<dyn AdminServicePort>,
    user_service: Arc<dyn UserServicePort>,
    product_service: Arc<dyn ProductServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        admin_service,
        user_service,
        product_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/admin/signup", post(admin_signup))
        .route("/api/admin/login", post(admin_login))
        .route("/api/user/signup", post(user_signup))
        .route("/api/user/login", post(user_login))
        .route("/api/products", get(list_products));

    let protected_routes = Router::new()
        .route("/api/user/cart", post(add_to_cart).get(get_cart))
        .route("/api/user/wishlist", post(add_to_wishlist).get(get_wishlist))
        .route("/api/user/purchase", post(purchase))
        .route("/api/user/purchased", get(get_purchased))
        .route("/api/user/update", put(update_profile))
        .route("/api/user/delete", delete(delete_account))
        .route("/api/products", post(create_product))
        .route("/api/products/:id", put(update_product))
        .route("/api/products/:id", delete(delete_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
