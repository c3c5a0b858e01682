use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ProductData;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductId;
use crate::user::models::UserId;

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Json(body): Json<ProductReferenceRequest>,
) -> Result<ApiSuccess<CartResponse>, ApiError> {
    let product_id = ProductId::from_string(&body.product_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let cart = state
        .user_service
        .add_to_cart(&UserId(subject.subject_id), product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CartResponse {
            message: "Product added to cart".to_string(),
            cart: cart.iter().map(ProductId::to_string).collect(),
        },
    ))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
) -> Result<ApiSuccess<Vec<Option<ProductData>>>, ApiError> {
    let contents = state
        .user_service
        .cart_contents(&UserId(subject.subject_id))
        .await
        .map_err(ApiError::from)?;

    // Deleted products stay in the sequence as null slots
    Ok(ApiSuccess::new(
        StatusCode::OK,
        contents
            .iter()
            .map(|entry| entry.as_ref().map(ProductData::from))
            .collect(),
    ))
}

/// HTTP request body carrying a single product reference (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductReferenceRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartResponse {
    pub message: String,
    pub cart: Vec<String>,
}
