use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::PhoneNumberType;
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// GET /all_phone_number_types - paginated listing without filters or token
pub async fn list_all(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<PhoneNumberType>>, ApiError> {
    let Query(query) = query?;
    let data = FilterData {
        offset: query.offset,
        limit: query.limit,
        ..Default::default()
    };
    let records = state.phone_number_types.list(&data).await?;
    Ok(Json(records))
}
