// handlers/public/auth.rs - POST /token

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{verify_password, AuthError};
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

/// POST /token - exchange username and password for a bearer token
///
/// Unknown users and wrong passwords get the same 401 so the response does not
/// reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = body?;
    let account = state
        .users
        .find_by_username(&payload.username)
        .await?
        .filter(|account| verify_password(account, &payload.password))
        .ok_or_else(|| {
            tracing::debug!("Failed login for '{}'", payload.username);
            AuthError::InvalidCredentials
        })?;

    let access_token = state.jwt.generate(&account.username)?;
    tracing::info!("Issued token for '{}'", account.username);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt.expiry_hours * 3600,
    }))
}
