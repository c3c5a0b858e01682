use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::handlers::products::create_product::ProductFieldsRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ProductData;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductId;

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductFieldsRequest>,
) -> Result<ApiSuccess<UpdateProductResponse>, ApiError> {
    let product_id =
        ProductId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let updated = state
        .product_service
        .replace_product(&product_id, body.into_fields())
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateProductResponse {
            message: "Product updated successfully".to_string(),
            updated_product: ProductData::from(&updated),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateProductResponse {
    pub message: String,
    #[serde(rename = "updatedProduct")]
    pub updated_product: ProductData,
}
