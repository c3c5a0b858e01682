use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
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
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::UserId;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .user_service
        .update_profile(&UserId(subject.subject_id), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponse::new("User updated")))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    state
        .user_service
        .delete_user(&UserId(subject.subject_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponse::new("User deleted")))
}

/// Both fields are optional; absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    username: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateProfileError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ParseUpdateProfileError> {
        let username = self.username.map(Username::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(UpdateProfileCommand::new(username, email))
    }
}

impl From<ParseUpdateProfileError> for ApiError {
    fn from(err: ParseUpdateProfileError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
