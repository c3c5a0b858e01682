use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::handlers::users::cart::ProductReferenceRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ProductData;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;
use crate::product::models::ProductId;
use crate::user::models::UserId;

pub async fn purchase(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Json(body): Json<ProductReferenceRequest>,
) -> Result<ApiSuccess<PurchaseResponse>, ApiError> {
    let product_id = ProductId::from_string(&body.product_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let purchased = state
        .user_service
        .purchase(&UserId(subject.subject_id), product_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PurchaseResponse {
            message: "Product purchased".to_string(),
            purchased_products: purchased.iter().map(ProductId::to_string).collect(),
        },
    ))
}

pub async fn get_purchased(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
) -> Result<ApiSuccess<Vec<Option<ProductData>>>, ApiError> {
    let contents = state
        .user_service
        .purchased_contents(&UserId(subject.subject_id))
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        contents
            .iter()
            .map(|entry| entry.as_ref().map(ProductData::from))
            .collect(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseResponse {
    pub message: String,
    #[serde(rename = "purchasedProducts")]
    pub purchased_products: Vec<String>,
}
