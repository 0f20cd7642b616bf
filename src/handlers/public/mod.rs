// handlers/public/mod.rs - endpoints that need no token
pub mod auth;
pub mod phone_number_types;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::server::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Phonebook API",
        "version": version,
        "endpoints": {
            "token": "POST /token (public)",
            "health": "GET /health (public)",
            "list_unauthenticated": "GET /all_phone_number_types?offset&limit (public)",
            "list": "GET /get_phone_number_types?filters&order_by&order_type&offset&limit",
            "count": "GET /count_phone_number_types?filters",
            "get": "GET /get_phone_number_type/:id",
            "create": "POST /create_phone_number_type",
            "update": "PUT /update_phone_number_type/:id",
            "delete": "DELETE /delete_phone_number_type/:id",
        }
    }))
}

/// GET /health - pings both stores
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let database = state.phone_number_types.store().ping().await;
    let users = state.users.ping().await;

    match (database, users) {
        (Ok(()), Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
                "users": "ok"
            })),
        ),
        (database, users) => {
            if let Err(e) = &database {
                tracing::error!("Health check: database unavailable: {}", e);
            }
            if let Err(e) = &users {
                tracing::error!("Health check: user store unavailable: {}", e);
            }
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": if database.is_ok() { "ok" } else { "unavailable" },
                    "users": if users.is_ok() { "ok" } else { "unavailable" }
                })),
            )
        }
    }
}
