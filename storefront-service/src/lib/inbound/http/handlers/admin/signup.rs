use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::admin::models::RegisterAdminCommand;
use crate::credentials::EmailAddress;
use crate::credentials::EmailError;
use crate::credentials::Username;
use crate::credentials::UsernameError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponse;
use crate::inbound::http::router::AppState;

pub async fn admin_signup(
    State(state): State<AppState>,
    Json(body): Json<AdminSignupRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .admin_service
        .register_admin(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::CREATED, MessageResponse::new("Admin created")))
}

/// HTTP request body for admin signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminSignupRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseAdminSignupError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl AdminSignupRequest {
    fn try_into_command(self) -> Result<RegisterAdminCommand, ParseAdminSignupError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterAdminCommand::new(username, email, self.password))
    }
}

impl From<ParseAdminSignupError> for ApiError {
    fn from(err: ParseAdminSignupError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
