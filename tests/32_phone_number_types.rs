mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, SEED, WRITER};

#[tokio::test]
async fn get_by_id_returns_record() -> Result<()> {
    let app = TestApp::spawn().await?;
    let res = app.get_as_writer("/get_phone_number_type/3").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], 3);
    assert_eq!(res.body["name"], "Home");
    assert!(res.body["modified_date"].is_string());
    Ok(())
}

#[tokio::test]
async fn get_missing_id_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let res = app.get_as_writer("/get_phone_number_type/42").await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.description().starts_with("NOT_FOUND"), "{}", res.body);
    assert_eq!(res.body["code"], 404);
    Ok(())
}

#[tokio::test]
async fn create_returns_stored_record() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let res = app
        .request(Method::POST, "/create_phone_number_type", Some(&token), Some(json!({ "name": "Fax" })))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["name"], "Fax");
    assert_eq!(res.body["id"], 6);

    let fetched = app.get("/get_phone_number_type/6", Some(&token)).await?;
    assert_eq!(fetched.body, res.body);
    Ok(())
}

#[tokio::test]
async fn update_replaces_name_and_touches_modified_date() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);
    let before = app.get("/get_phone_number_type/2", Some(&token)).await?;

    let res = app
        .request(Method::PUT, "/update_phone_number_type/2", Some(&token), Some(json!({ "name": "Mobile 2" })))
        .await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["id"], 2);
    assert_eq!(res.body["name"], "Mobile 2");

    let before_ts: chrono::DateTime<chrono::Utc> = serde_json::from_value(before.body["modified_date"].clone())?;
    let after_ts: chrono::DateTime<chrono::Utc> = serde_json::from_value(res.body["modified_date"].clone())?;
    assert!(after_ts >= before_ts);
    Ok(())
}

#[tokio::test]
async fn update_missing_id_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let res = app
        .request(Method::PUT, "/update_phone_number_type/99", Some(&token), Some(json!({ "name": "x" })))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_removes_record() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let res = app.request(Method::DELETE, "/delete_phone_number_type/1", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["title"], "Deleted");

    let gone = app.get("/get_phone_number_type/1", Some(&token)).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app.request(Method::DELETE, "/delete_phone_number_type/1", Some(&token), None).await?;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn count_reports_entity_and_total() -> Result<()> {
    let app = TestApp::spawn().await?;

    let all = app.get_as_writer("/count_phone_number_types").await?;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["entity"], "phone_number_type");
    assert_eq!(all.body["count"], SEED.len());

    let filtered = app.get_as_writer("/count_phone_number_types?filters=name_phrase:hom").await?;
    assert_eq!(filtered.body["count"], 3);
    Ok(())
}

#[tokio::test]
async fn public_listing_paginates_without_token() -> Result<()> {
    let app = TestApp::spawn().await?;

    let all = app.get("/all_phone_number_types", None).await?;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.names(), SEED.to_vec());

    let page = app.get("/all_phone_number_types?offset=1&limit=2", None).await?;
    assert_eq!(page.names(), vec!["Mobile", "Home"]);

    let bad = app.get("/all_phone_number_types?limit=-1", None).await?;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.description().starts_with("INVALID_SQL_VALUE"));
    Ok(())
}

#[tokio::test]
async fn public_listing_ignores_filters() -> Result<()> {
    let app = TestApp::spawn().await?;
    let res = app.get("/all_phone_number_types?filters=name_phrase:hom", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.names().len(), SEED.len());
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request_with_error_body() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let get = app.get("/get_phone_number_type/abc", Some(&token)).await?;
    assert_eq!(get.status, StatusCode::BAD_REQUEST);
    assert_eq!(get.body["code"], 400);
    assert!(get.description().starts_with("INVALID_PATH_PARAMETER"), "{}", get.body);

    let delete = app.request(Method::DELETE, "/delete_phone_number_type/abc", Some(&token), None).await?;
    assert_eq!(delete.status, StatusCode::BAD_REQUEST);
    assert!(delete.description().starts_with("INVALID_PATH_PARAMETER"), "{}", delete.body);
    Ok(())
}

#[tokio::test]
async fn body_without_name_is_bad_request_with_error_body() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let create = app
        .request(Method::POST, "/create_phone_number_type", Some(&token), Some(json!({ "nom": "x" })))
        .await?;
    assert_eq!(create.status, StatusCode::BAD_REQUEST);
    assert_eq!(create.body["code"], 400);
    assert_eq!(create.body["title"], "Bad Request");
    assert!(create.description().starts_with("INVALID_REQUEST_BODY"), "{}", create.body);

    let update = app
        .request(Method::PUT, "/update_phone_number_type/1", Some(&token), Some(json!({ "nom": "x" })))
        .await?;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
    assert!(update.description().starts_with("INVALID_REQUEST_BODY"), "{}", update.body);

    let unchanged = app.get("/get_phone_number_type/1", Some(&token)).await?;
    assert_eq!(unchanged.body["name"], "Cell");
    Ok(())
}

#[tokio::test]
async fn missing_body_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.token_for(WRITER.0);

    let res = app.request(Method::POST, "/create_phone_number_type", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.description().starts_with("INVALID_REQUEST_BODY"), "{}", res.body);
    Ok(())
}
