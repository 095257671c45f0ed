mod config;
mod db;
mod errors;
mod handlers;
mod llm_client;
mod mailer;
mod models;
mod sentiment;
mod services;
mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection and schema bootstrap.
/// - Language-model and mail-relay clients.
/// - HTTP routes and middleware (CORS, body limit, request tracing).
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "email_reply_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Initialize the hosted language-model client
    let llm = LlmClient::new(config.llm_endpoint_url.clone(), config.llm_api_token.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize LLM client: {}", e))?;
    tracing::info!("LLM client initialized: {}", config.llm_endpoint_url);

    // Initialize the outbound mail relay
    let mailer = Mailer::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize SMTP transport: {}", e))?;
    tracing::info!("SMTP transport initialized: {}:{}", config.smtp_host, config.smtp_port);

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        db: db.pool.clone(),
        llm,
        mailer,
    });

    // Build the app. Email payloads are small; cap request bodies at 1MB.
    let app = Router::new()
        .route("/", get(handlers::home))
        .route("/generate_response", post(handlers::generate_response))
        .route("/submit_feedback", post(handlers::submit_feedback))
        .route("/feedback_stats", get(handlers::feedback_stats))
        .route("/send_email", post(handlers::send_email))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(1024 * 1024)))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
