// Bearer token extraction for authenticated routes
use crate::application::auth_service::{AuthError, Principal};
use crate::presentation::app_state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

pub struct AuthenticatedUser {
    pub principal: Principal,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let principal = state.auth_service.verify(token)?;
        Ok(Self {
            principal,
            token: token.to_string(),
        })
    }
}

/// Token from an `Authorization` value; the scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self == AuthError::ExpiryOutOfRange {
            tracing::error!("Cannot issue token: {}", self);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": self.to_string() })),
            )
                .into_response();
        }
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}
