// ============================================================================
// Recipe API - Router
// File: crates/recipe-api/src/router.rs
// ============================================================================
//! Route table and middleware pipeline

use axum::{
    extract::{DefaultBodyLimit, OriginalUri, Request},
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method, Uri},
    middleware,
    routing::{get, post, put},
    Router,
};
use recipe_shared::config::AppConfig;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::handlers::{
    admin, auth, collections, fallback, favorites, health, meal_plan, public_recipes, recipes, users,
};
use crate::state::AppState;

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route("/profile/password", put(users::change_password))
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list).post(recipes::create))
        .route("/{id}", get(recipes::get).put(recipes::update).delete(recipes::delete))
}

fn public_recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public_recipes::list))
        .route("/{id}", get(public_recipes::get))
}

fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list))
        .route("/{recipe_id}", post(favorites::add).delete(favorites::remove))
}

fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::list).post(collections::create))
        .route(
            "/{id}",
            get(collections::get)
                .put(collections::update)
                .delete(collections::delete),
        )
        .route(
            "/{id}/recipes/{recipe_id}",
            post(collections::add_recipe).delete(collections::remove_recipe),
        )
}

fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(meal_plan::list).post(meal_plan::create))
        .route("/shopping-list", get(meal_plan::shopping_list))
        .route("/{id}", put(meal_plan::update).delete(meal_plan::delete))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", axum::routing::delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::set_role))
        .route("/recipes", get(admin::list_recipes))
        .route("/recipes/{id}", axum::routing::delete(admin::delete_recipe))
        .route("/stats", get(admin::stats))
}

/// Every feature router under `/api`, plus the health check.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/recipes", recipe_routes())
        .nest("/favorites", favorite_routes())
        .nest("/collections", collection_routes())
        .nest("/meal-plan", meal_plan_routes())
        .nest("/admin", admin_routes())
        .nest("/public/recipes", public_recipe_routes())
}

/// The same routers again under their short, unprefixed paths.
fn alias_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/users", user_routes())
        .nest("/resource", recipe_routes())
        .nest("/public/recipes", public_recipe_routes())
        .nest("/favorites", favorite_routes())
        .nest("/collections", collection_routes())
        .nest("/meal-plan", meal_plan_routes())
        .nest("/admin", admin_routes())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Builds the application: routes, static files, not-found handler and the
/// middleware stack (outermost first: panic catcher, trace, CORS, body limit).
/// A trailing slash is ignored when matching routes.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let static_files = ServeDir::new(&config.app.static_dir)
        .append_index_html_on_directories(true)
        .call_fallback_on_method_not_allowed(true)
        .fallback(fallback::not_found.into_service());
    // Static lookups see the path as sent, so directory redirects still work
    let static_files = Router::new()
        .fallback_service(static_files)
        .layer(middleware::map_request(restore_original_uri));

    let routes = Router::new()
        .nest("/api", api_routes())
        .merge(alias_routes())
        .method_not_allowed_fallback(fallback::not_found)
        .fallback_service(static_files);

    let app = with_middleware(routes, &config).with_state(state);
    Router::new()
        .fallback_service(app)
        .layer(middleware::map_request(trim_trailing_slash))
}

fn with_middleware(router: Router<AppState>, config: &AppConfig) -> Router<AppState> {
    router
        .layer(DefaultBodyLimit::max(config.app.body_limit_bytes))
        .layer(cors_layer(&config.cors.allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CatchPanicLayer::custom(fallback::handle_panic))
}

async fn trim_trailing_slash(mut req: Request) -> Request {
    let path = req.uri().path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        let rebuilt = match req.uri().query() {
            Some(query) => format!("{trimmed}?{query}"),
            None => trimmed.to_string(),
        };
        if let Ok(uri) = rebuilt.parse::<Uri>() {
            *req.uri_mut() = uri;
        }
    }
    req
}

async fn restore_original_uri(OriginalUri(original): OriginalUri, mut req: Request) -> Request {
    *req.uri_mut() = original;
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use recipe_infrastructure::memory_repositories;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_json_500() {
        let config = AppConfig::default();
        let state = AppState::new(config.clone(), memory_repositories());
        let app = with_middleware(Router::new().route("/explode", get(explode)), &config).with_state(state);

        let response = app
            .oneshot(axum::http::Request::get("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let req = axum::http::Request::get("/api/recipes/?page=2").body(Body::empty()).unwrap();
        let req = trim_trailing_slash(req).await;
        assert_eq!(req.uri().path(), "/api/recipes");
        assert_eq!(req.uri().query(), Some("page=2"));

        let root = trim_trailing_slash(axum::http::Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(root.uri().path(), "/");
    }
}
