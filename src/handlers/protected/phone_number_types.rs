use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::phone_number_type::ENTITY_NAME;
use crate::database::models::{PhoneNumberType, PhoneNumberTypeInput};
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::middleware::AuthUser;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub filters: Option<String>,
}

/// GET /get_phone_number_types - filtered, ordered, paginated listing
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<FilterData>, QueryRejection>,
) -> Result<Json<Vec<PhoneNumberType>>, ApiError> {
    let Query(query) = query?;
    let records = state.phone_number_types.list(&query).await?;
    Ok(Json(records))
}

/// GET /count_phone_number_types - number of rows matching the filters
pub async fn count(
    State(state): State<AppState>,
    query: Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let count = state.phone_number_types.count(query.filters.as_deref()).await?;
    Ok(Json(json!({ "entity": ENTITY_NAME, "count": count })))
}

/// GET /get_phone_number_type/:id
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<PhoneNumberType>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.phone_number_types.get(id).await?))
}

/// POST /create_phone_number_type - returns the stored record
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<PhoneNumberTypeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PhoneNumberType>), ApiError> {
    user.require_writable()?;
    let Json(input) = body?;
    let id = state.phone_number_types.insert(&input).await?;
    let record = state.phone_number_types.get(id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /update_phone_number_type/:id - returns the stored record
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<PhoneNumberTypeInput>, JsonRejection>,
) -> Result<Json<PhoneNumberType>, ApiError> {
    user.require_writable()?;
    let Path(id) = path?;
    let Json(input) = body?;
    let id = state.phone_number_types.update(id, &input).await?;
    Ok(Json(state.phone_number_types.get(id).await?))
}

/// DELETE /delete_phone_number_type/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    user.require_writable()?;
    let Path(id) = path?;
    state.phone_number_types.delete(id).await?;
    Ok(Json(json!({
        "title": "Deleted",
        "description": format!("{} with id {} deleted", ENTITY_NAME, id)
    })))
}
