use crate::errors::{AppError, ResultExt};
use crate::llm_client::LlmClient;
use crate::mailer::Mailer;
use crate::models::{
    FeedbackResponse, FeedbackStats, GenerateRequest, GenerateResponse, NewResponse,
    ResponseRecord, SendEmailParams, SendEmailResponse, Tone, DEFAULT_ACCURACY,
};
use crate::sentiment;
use crate::storage::{FeedbackStore, ResponseStore};
use sqlx::PgPool;
use std::time::Instant;

/// Rounds a seconds value to two decimal places for reporting.
pub fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Arithmetic mean of ratings rounded to two decimals; 0.0 for no ratings.
pub fn mean_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    round2(sum as f64 / ratings.len() as f64)
}

/// Concatenates the tone instruction and the raw email body into the model
/// prompt.
pub fn build_prompt(tone: Tone, email_body: &str) -> String {
    format!("{}\nEmail Content:\n{}", tone.instruction(), email_body)
}

/// Orchestrates reply generation: tone resolution, sentiment scoring, prompt
/// construction, model invocation, persistence, and timing.
pub struct ResponseService {
    llm: LlmClient,
    store: ResponseStore,
}

impl ResponseService {
    pub fn new(llm: LlmClient, pool: PgPool) -> Self {
        Self {
            llm,
            store: ResponseStore::new(pool),
        }
    }

    /// Generates a reply for the given email and stores the interaction.
    ///
    /// Unrecognized tones fall back to formal with a warning; they never fail
    /// the request. A model failure surfaces as `GenerationFailed` with
    /// nothing persisted. No retries; the caller must resubmit.
    pub async fn generate(&self, query: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        let start = Instant::now();

        let tone = Tone::resolve(&query.tone).unwrap_or_else(|| {
            tracing::warn!("Invalid tone received: {}, defaulting to 'formal'", query.tone);
            Tone::Formal
        });

        let polarity = sentiment::polarity(&query.email_body);
        let sentiment = sentiment::bucket(polarity);

        let prompt = build_prompt(tone, &query.email_body);
        let ai_response = self.llm.complete(&prompt).await?;

        let response_time = round2(start.elapsed().as_secs_f64());

        let id = self
            .store
            .insert(&NewResponse {
                subject: query.subject.clone(),
                email_body: query.email_body.clone(),
                ai_response: ai_response.clone(),
                response_time,
                accuracy: DEFAULT_ACCURACY,
                sentiment,
            })
            .await
            .context("Failed to store generated response")?;

        tracing::info!(
            "Email processed | subject: {} | sentiment: {} | response_time: {}s",
            query.subject,
            sentiment,
            response_time
        );

        Ok(GenerateResponse {
            email_id: id.to_string(),
            ai_response,
            response_time,
            accuracy: DEFAULT_ACCURACY,
            sentiment,
        })
    }
}

/// Records ratings for generated replies and serves aggregate statistics.
pub struct FeedbackService {
    store: FeedbackStore,
}

impl FeedbackService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: FeedbackStore::new(pool),
        }
    }

    /// Stores one feedback submission unconditionally: the referenced id is
    /// not verified and the rating is not range-checked.
    pub async fn submit(
        &self,
        email_id: &str,
        rating: i32,
        comment: &str,
    ) -> Result<FeedbackResponse, AppError> {
        self.store
            .insert(email_id, rating, comment)
            .await
            .context("Failed to store feedback")?;

        tracing::info!("Feedback submitted for email_id: {}", email_id);

        Ok(FeedbackResponse {
            message: "Feedback submitted successfully!".to_string(),
        })
    }

    /// Aggregate over all feedback rows. Zero rows is a defined result, not
    /// an error.
    pub async fn stats(&self) -> Result<FeedbackStats, AppError> {
        let ratings = self.store.all_ratings().await?;

        Ok(FeedbackStats {
            average_rating: mean_rating(&ratings),
            total_feedback: ratings.len() as i64,
        })
    }
}

/// Looks up the latest stored reply for a subject and transmits it to a
/// recipient on a background task.
pub struct DispatchService {
    store: ResponseStore,
    mailer: Mailer,
}

impl DispatchService {
    pub fn new(pool: PgPool, mailer: Mailer) -> Self {
        Self {
            store: ResponseStore::new(pool),
            mailer,
        }
    }

    /// Accepts a dispatch request and schedules transmission.
    ///
    /// The lookup miss is the only synchronous failure; once this returns,
    /// transmission is fire-and-forget. At most one attempt, no retry, and
    /// no delivery confirmation ever reaches the caller.
    pub async fn send(&self, params: &SendEmailParams) -> Result<SendEmailResponse, AppError> {
        let record = self
            .store
            .latest_by_subject(&params.subject)
            .await?
            .filter(|r| !r.ai_response.is_empty())
            .ok_or_else(|| {
                AppError::NotFound("No AI response found for this subject.".to_string())
            })?;

        self.spawn_transmission(record, params.recipient_email.clone(), params.subject.clone());

        Ok(SendEmailResponse {
            status: "Email is being sent in the background!".to_string(),
        })
    }

    /// Spawns the background transmission task (non-blocking).
    ///
    /// On success the record is flagged as sent; on failure the error is
    /// logged and the record is left untouched.
    fn spawn_transmission(&self, record: ResponseRecord, recipient: String, subject: String) {
        let mailer = self.mailer.clone();
        let store = self.store.clone();

        tokio::spawn(async move {
            tracing::info!("Starting background email transmission to {}", recipient);

            let reply_subject = format!("Re: {}", subject);
            match mailer
                .send_plain(&recipient, &reply_subject, &record.ai_response)
                .await
            {
                Ok(()) => {
                    if let Err(e) = store.mark_email_sent(record.id).await {
                        tracing::error!("Failed to record email transmission: {}", e);
                    }
                    tracing::info!("Email sent successfully to {}", recipient);
                }
                Err(e) => {
                    tracing::error!("Email sending failed: {}", e);
                }
            }
        });
    }
}
