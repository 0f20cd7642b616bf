use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::AppState;

/// Authenticated account resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub readonly: bool,
}

impl AuthUser {
    /// Mutations are refused for read-only accounts
    pub fn require_writable(&self) -> Result<(), ApiError> {
        if self.readonly {
            tracing::debug!("Rejected mutation by read-only user '{}'", self.username);
            return Err(ApiError::readonly_access(&self.username));
        }
        Ok(())
    }
}

/// JWT authentication middleware that validates tokens and loads the account
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(ApiError::invalid_jwt)?;
    let claims = state.jwt.validate(&token)?;

    let account = state.users.find_by_username(&claims.sub).await?.ok_or_else(|| {
        tracing::warn!("Token presented for unknown user '{}'", claims.sub);
        ApiError::invalid_jwt(format!("user '{}' does not exist", claims.sub))
    })?;

    request.extensions_mut().insert(AuthUser {
        username: account.username,
        readonly: account.readonly,
    });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
