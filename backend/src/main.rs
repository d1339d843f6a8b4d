use std::sync::Arc;

use solace_api::ai::HttpAnalysisService;
use solace_api::config::Config;
use solace_api::services::Services;
use solace_api::store::postgres::PgStore;
use solace_api::{db, routes, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solace_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let ai = HttpAnalysisService::new(&config.ai_service_url, config.ai_timeout_secs)
        .expect("Failed to build analysis service client");

    let services = Services::new(
        Arc::new(PgStore::new(pool)),
        Arc::new(ai),
        config.ai_model_version.clone(),
    );

    let app = routes::router(AppState {
        config: config.clone(),
        services,
    });

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
