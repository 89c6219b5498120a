/// API route modules
pub mod assets;
pub mod health;
pub mod users;

use crate::{
    error::EndpointError,
    services::identity::DEFAULT_LIST_LIMIT,
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub type ApiResult<T> = std::result::Result<T, EndpointError>;

/// `?limit=` on listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    /// Requested page size; anything but a positive integer means the default
    pub fn limit(&self) -> u32 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// Build the application router
pub fn router(app_state: AppState) -> Router {
    // Static segments shadow `/:user`, so they answer GET by username too
    let user_routes = Router::new()
        .route(
            "/register",
            post(users::register)
                .get(|state: State<AppState>| users::get_user_named(state, "register")),
        )
        .route(
            "/login",
            post(users::login)
                .get(|state: State<AppState>| users::get_user_named(state, "login")),
        )
        .route(
            "/verify",
            post(users::verify)
                .get(|state: State<AppState>| users::get_user_named(state, "verify")),
        )
        .route(
            "/update",
            put(users::update_user)
                .get(|state: State<AppState>| users::get_user_named(state, "update")),
        )
        .route("/", get(users::list_users).delete(users::delete_user))
        .route("/:user", get(users::get_user).delete(users::delete_user));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/assets", get(assets::list_assets))
        .nest("/users", user_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: Option<&str>) -> u32 {
        LimitQuery {
            limit: raw.map(str::to_string),
        }
        .limit()
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(query(None), 10);
        assert_eq!(query(Some("2")), 2);
        assert_eq!(query(Some("0")), 10);
        assert_eq!(query(Some("-3")), 10);
        assert_eq!(query(Some("abc")), 10);
        assert_eq!(query(Some("")), 10);
    }
}
