use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::credentials::EmailAddress;
use crate::credentials::EmailError;
use crate::credentials::Username;
use crate::credentials::UsernameError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::MessageResponse;
use crate::inbound::http::router::AppState;
use crate::user::models::RegisterUserCommand;

pub async fn user_signup(
    State(state): State<AppState>,
    Json(body): Json<UserSignupRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::CREATED, MessageResponse::new("User created")))
}

/// HTTP request body for user signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSignupRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseUserSignupError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UserSignupRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseUserSignupError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        Ok(RegisterUserCommand::new(username, email, self.password))
    }
}

impl From<ParseUserSignupError> for ApiError {
    fn from(err: ParseUserSignupError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
