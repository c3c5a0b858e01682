use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponse;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductFields;

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductFieldsRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .product_service
        .create_product(body.into_fields())
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                MessageResponse::new("Product added successfully"),
            )
        })
}

/// HTTP request body for product creation and replacement (raw JSON).
///
/// The image arrives as a base64 string and is stored as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductFieldsRequest {
    name: String,
    price: f64,
    category: String,
    subcategory: String,
    description: String,
    image: String,
}

impl ProductFieldsRequest {
    pub fn into_fields(self) -> ProductFields {
        ProductFields {
            name: self.name,
            price: self.price,
            category: self.category,
            subcategory: self.subcategory,
            description: self.description,
            image: self.image,
        }
    }
}
