use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::credentials::Username;
use crate::inbound::http::handlers::admin::login::TokenResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn user_login(
    State(state): State<AppState>,
    Json(body): Json<UserLoginRequest>,
) -> Result<ApiSuccess<TokenResponse>, ApiError> {
    // An unknown username is NotFound, distinct from a failed password check
    let username = Username::new(body.username)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(ApiError::from)?;

    let claims = auth::Claims::for_subject(user.id);

    let result = state
        .authenticator
        .authenticate(&body.password, &user.password_hash, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            auth::AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::JwtError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponse {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserLoginRequest {
    username: String,
    password: String,
}
