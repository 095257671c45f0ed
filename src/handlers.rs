use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;
use crate::models::{
    FeedbackRequest, FeedbackResponse, FeedbackStats, GenerateRequest, GenerateResponse,
    SendEmailParams, SendEmailResponse,
};
use crate::services::{DispatchService, FeedbackService, ResponseService};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
///
/// All handles are opened once at process start and reused for the process
/// lifetime.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Client for the hosted text-generation endpoint.
    pub llm: LlmClient,
    /// Outbound mail relay.
    pub mailer: Mailer,
}

/// GET /
///
/// Liveness endpoint.
pub async fn home() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Email reply service is running!"
        })),
    )
}

/// POST /generate_response
///
/// Drafts a reply to the given email in the selected tone and stores the
/// interaction.
///
/// # Returns
///
/// * `Result<Json<GenerateResponse>, AppError>` - The generated reply with
///   its stored id, or a server error.
pub async fn generate_response(
    State(state): State<Arc<AppState>>,
    Json(query): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    tracing::info!("POST /generate_response - subject: {}", query.subject);

    let service = ResponseService::new(state.llm.clone(), state.db.clone());
    let response = service.generate(&query).await?;

    Ok(Json(response))
}

/// POST /submit_feedback
///
/// Stores user feedback for a generated reply.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(feedback): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    tracing::info!("POST /submit_feedback - email_id: {}", feedback.email_id);

    let service = FeedbackService::new(state.db.clone());
    let response = service
        .submit(&feedback.email_id, feedback.rating, &feedback.comment)
        .await?;

    Ok(Json(response))
}

/// GET /feedback_stats
///
/// Retrieves feedback analytics: average rating and total count.
pub async fn feedback_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeedbackStats>, AppError> {
    let service = FeedbackService::new(state.db.clone());
    let stats = service.stats().await?;

    Ok(Json(stats))
}

/// POST /send_email
///
/// Sends the latest stored reply for a subject to the given recipient. The
/// response returns as soon as transmission is scheduled; delivery itself is
/// best-effort and unconfirmed.
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SendEmailParams>,
) -> Result<Json<SendEmailResponse>, AppError> {
    tracing::info!(
        "POST /send_email - subject: {} recipient: {}",
        params.subject,
        params.recipient_email
    );

    let service = DispatchService::new(state.db.clone(), state.mailer.clone());
    let response = service.send(&params).await?;

    Ok(Json(response))
}
