use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::JwtSettings;
use crate::database::UserStore;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::providers::PhoneNumberTypeProvider;

/// Handles shared by every request. Stores are injected here rather than
/// reached through globals.
#[derive(Clone)]
pub struct AppState {
    pub phone_number_types: Arc<PhoneNumberTypeProvider>,
    pub users: Arc<dyn UserStore>,
    pub jwt: JwtSettings,
}

impl AppState {
    pub fn new(phone_number_types: PhoneNumberTypeProvider, users: Arc<dyn UserStore>, jwt: JwtSettings) -> Self {
        Self {
            phone_number_types: Arc::new(phone_number_types),
            users,
            jwt,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(public_routes())
        // Protected API
        .merge(phone_number_type_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(public::auth::login))
        .route("/all_phone_number_types", get(public::phone_number_types::list_all))
}

fn phone_number_type_routes(state: AppState) -> Router<AppState> {
    use protected::phone_number_types as handlers;

    Router::new()
        .route("/get_phone_number_types", get(handlers::list))
        .route("/count_phone_number_types", get(handlers::count))
        .route("/get_phone_number_type/:id", get(handlers::get))
        .route("/create_phone_number_type", post(handlers::create))
        .route("/update_phone_number_type/:id", put(handlers::update))
        .route("/delete_phone_number_type/:id", delete(handlers::delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
