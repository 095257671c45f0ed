use sqlx::{postgres::PgPoolOptions, PgPool};

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Self::bootstrap_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Create the two tables this service owns if they do not exist yet.
    /// Records are insert-only apart from the send-completion flags.
    async fn bootstrap_schema(pool: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS generated_responses (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                subject TEXT NOT NULL,
                email_body TEXT NOT NULL,
                ai_response TEXT NOT NULL,
                response_time DOUBLE PRECISION NOT NULL,
                accuracy DOUBLE PRECISION NOT NULL,
                sentiment TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                email_sent BOOLEAN,
                email_sent_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(pool)
        .await?;

        // email_id is a loose reference; no foreign key on purpose, feedback
        // is accepted even for ids the store has never seen.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS response_feedback (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT NOT NULL DEFAULT '',
                submitted_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
