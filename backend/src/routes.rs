use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::{auth, handlers, AppState};

fn cors(config: &Config) -> CorsLayer {
    let mut origins = Vec::new();
    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => origins.push(origin),
        Err(_) => tracing::warn!(frontend_url = %config.frontend_url, "Ignoring unparseable FRONTEND_URL"),
    }
    // LAN or preview origins during development.
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        origins.extend(
            extra
                .split(',')
                .filter_map(|o| o.trim().parse::<HeaderValue>().ok()),
        );
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        // Entries
        .route(
            "/api/entries",
            get(handlers::entries::list_entries).post(handlers::entries::create_entry),
        )
        .route(
            "/api/entries/:id",
            get(handlers::entries::get_entry).delete(handlers::entries::delete_entry),
        )
        // Analytics
        .route("/api/analytics/moods", get(handlers::analytics::list_mood_analytics))
        .route("/api/analytics/summary", get(handlers::analytics::get_summary))
        .route("/api/analytics/happiness", get(handlers::analytics::get_happiness))
        // Rewinds
        .route("/api/rewinds/pending", get(handlers::rewinds::pending_rewind))
        .route("/api/rewinds/:year/:month", get(handlers::rewinds::get_rewind))
        // Birthday
        .route("/api/birthday", get(handlers::birthday::resolve_birthday))
        // Profile
        .route(
            "/api/profile",
            get(handlers::profile::get_profile).put(handlers::profile::upsert_profile),
        )
        .route(
            "/api/preferences",
            get(handlers::profile::get_preferences).put(handlers::profile::update_preferences),
        )
        // Prompts
        .route("/api/prompts", get(handlers::prompts::list_prompts))
        .route("/api/prompts/random", get(handlers::prompts::random_prompt))
        // Wellness
        .route(
            "/api/wellness",
            get(handlers::wellness::list_wellness).put(handlers::wellness::record_wellness),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
