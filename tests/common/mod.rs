#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use phonebook_api::auth::{new_account, JwtSettings};
use phonebook_api::database::models::PhoneNumberTypeInput;
use phonebook_api::database::{InMemoryPhoneNumberTypeStore, InMemoryUserStore, UserStore};
use phonebook_api::providers::PhoneNumberTypeProvider;
use phonebook_api::server::{app, AppState};

pub const JWT_SECRET: &str = "test-secret";
pub const WRITER: (&str, &str) = ("writer", "writer-password");
pub const VIEWER: (&str, &str) = ("viewer", "viewer-password");

/// Seeded in this order, so ids run 1..=5.
pub const SEED: [&str; 5] = ["Cell", "Mobile", "Home", "Home 2", "Home em."];

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// `description` of an error body
    pub fn description(&self) -> &str {
        self.body["description"].as_str().unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.body
            .as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TestApp {
    /// Fresh app over in-memory stores with a writable and a read-only account
    pub async fn spawn() -> Result<Self> {
        let users = InMemoryUserStore::new();
        users.insert(new_account(WRITER.0, WRITER.1, false)).await?;
        users.insert(new_account(VIEWER.0, VIEWER.1, true)).await?;

        let provider = PhoneNumberTypeProvider::new(Arc::new(InMemoryPhoneNumberTypeStore::new()), 100);
        for name in SEED {
            provider
                .insert(&PhoneNumberTypeInput { name: name.to_string() })
                .await
                .context("failed to seed phone number types")?;
        }

        let state = AppState::new(provider, Arc::new(users), JwtSettings::new(JWT_SECRET, 1));
        Ok(Self { router: app(state.clone()), state })
    }

    pub fn token_for(&self, username: &str) -> String {
        self.state.jwt.generate(username).expect("token generation")
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    /// GET as the writable account
    pub async fn get_as_writer(&self, uri: &str) -> Result<TestResponse> {
        let token = self.token_for(WRITER.0);
        self.get(uri, Some(&token)).await
    }
}
