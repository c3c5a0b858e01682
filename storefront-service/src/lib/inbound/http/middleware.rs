use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::inbound::http::router::AppState;

/// Extension type carrying the identity a verified token was issued to.
///
/// The subject may be an admin or a user; the middleware makes no role
/// distinction, so any valid token satisfies any protected route.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSubject {
    pub subject_id: Uuid,
}

/// Middleware gating protected routes.
///
/// A missing token is rejected with 403 before any verification is
/// attempted. Every verification failure (bad signature, malformed token,
/// lapsed expiry, missing or unparseable subject) folds into a single 401;
/// callers learn nothing about which check failed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // The header slot carries the raw token, no scheme prefix
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "Token is required"
                })),
            )
                .into_response()
        })?;

    let token = header.to_str().map_err(|_| invalid_token())?;

    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        invalid_token()
    })?;

    let subject_id = claims
        .subject()
        .and_then(|sub| Uuid::parse_str(sub).ok())
        .ok_or_else(|| {
            tracing::warn!("Token verified but carries no usable subject");
            invalid_token()
        })?;

    req.extensions_mut()
        .insert(AuthenticatedSubject { subject_id });

    Ok(next.run(req).await)
}

fn invalid_token() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "message": "Invalid token"
        })),
    )
        .into_response()
}
