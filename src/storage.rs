use crate::errors::AppError;
use crate::models::{FeedbackRecord, NewResponse, ResponseRecord};
use sqlx::PgPool;
use uuid::Uuid;

/// Persistence operations for generated responses.
#[derive(Clone)]
pub struct ResponseStore {
    pool: PgPool,
}

impl ResponseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one record; the store assigns `id` and `created_at`.
    pub async fn insert(&self, new: &NewResponse) -> Result<Uuid, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO generated_responses
                (subject, email_body, ai_response, response_time, accuracy, sentiment)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new.subject)
        .bind(&new.email_body)
        .bind(&new.ai_response)
        .bind(new.response_time)
        .bind(new.accuracy)
        .bind(new.sentiment.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Most recently inserted record for a subject.
    ///
    /// Subjects are not unique; concurrent inserts for the same subject race
    /// and whichever committed last is returned.
    pub async fn latest_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<ResponseRecord>, AppError> {
        let record = sqlx::query_as::<_, ResponseRecord>(
            r#"
            SELECT * FROM generated_responses
            WHERE subject = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Flags a record as transmitted. The flag never transitions back.
    pub async fn mark_email_sent(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE generated_responses
            SET email_sent = TRUE, email_sent_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!("No response record found to mark as sent: id={}", id);
        }

        Ok(())
    }
}

/// Persistence operations for feedback submissions.
#[derive(Clone)]
pub struct FeedbackStore {
    pool: PgPool,
}

impl FeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one feedback row and returns it. `email_id` is stored as
    /// given; the store does not check that it references an existing
    /// response.
    pub async fn insert(
        &self,
        email_id: &str,
        rating: i32,
        comment: &str,
    ) -> Result<FeedbackRecord, AppError> {
        let record = sqlx::query_as::<_, FeedbackRecord>(
            r#"
            INSERT INTO response_feedback (email_id, rating, comment)
            VALUES ($1, $2, $3)
            RETURNING id, email_id, rating, comment, submitted_at
            "#,
        )
        .bind(email_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Full scan of all ratings, projection only. Used for aggregation.
    pub async fn all_ratings(&self) -> Result<Vec<i32>, AppError> {
        let ratings =
            sqlx::query_scalar::<_, i32>("SELECT rating FROM response_feedback ORDER BY submitted_at")
                .fetch_all(&self.pool)
                .await?;

        Ok(ratings)
    }
}
