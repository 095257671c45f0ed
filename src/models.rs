use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Placeholder accuracy score stored with every generated response.
/// Not computed; kept as a fixed baseline until a real quality metric exists.
pub const DEFAULT_ACCURACY: f64 = 4.0;

// ============ Database Models ============

/// A generated reply persisted by the response flow.
///
/// Created once per successful generation; the only later mutation is the
/// send-completion flag set by the dispatch flow.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Store-assigned identifier, exposed to clients as an opaque string.
    pub id: Uuid,
    /// Subject of the inbound email.
    pub subject: String,
    /// Raw body of the inbound email.
    pub email_body: String,
    /// The model-generated reply text.
    pub ai_response: String,
    /// Wall-clock generation time in seconds, rounded to two decimals.
    pub response_time: f64,
    /// Fixed placeholder score (see [`DEFAULT_ACCURACY`]).
    pub accuracy: f64,
    /// Sentiment bucket of the inbound body ("positive"/"neutral"/"negative").
    pub sentiment: String,
    /// Timestamp of insertion.
    pub created_at: DateTime<Utc>,
    /// Set to true once the reply was transmitted; NULL until then.
    pub email_sent: Option<bool>,
    /// Transmission timestamp; NULL until the reply was transmitted.
    pub email_sent_at: Option<DateTime<Utc>>,
}

/// Field set for inserting a new [`ResponseRecord`]; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub subject: String,
    pub email_body: String,
    pub ai_response: String,
    pub response_time: f64,
    pub accuracy: f64,
    pub sentiment: Sentiment,
}

/// A user rating tied to a previously generated response.
///
/// `email_id` is a loose reference: the store never verifies it points at an
/// existing [`ResponseRecord`]. Insert-only, immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub email_id: String,
    pub rating: i32,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

// ============ Domain Types ============

/// Sentiment bucket derived from the polarity of an email body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named style directive applied to prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Formal,
    Friendly,
    Apologetic,
}

impl Tone {
    /// Resolves a free-form tone string, case-insensitively.
    /// Returns `None` for anything outside the known set; callers fall back
    /// to [`Tone::Formal`] rather than rejecting the request.
    pub fn resolve(input: &str) -> Option<Tone> {
        match input.to_lowercase().as_str() {
            "formal" => Some(Tone::Formal),
            "friendly" => Some(Tone::Friendly),
            "apologetic" => Some(Tone::Apologetic),
            _ => None,
        }
    }

    /// Instruction sentence prepended to the model prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Formal => "Write a professional and well-structured response.",
            Tone::Friendly => "Write a warm, casual, and friendly response.",
            Tone::Apologetic => "Write a polite and apologetic response.",
        }
    }
}

// ============ Request / Response Payloads ============

/// Body of `POST /generate_response`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub subject: String,
    pub email_body: String,
    pub tone: String,
}

/// Successful response of `POST /generate_response`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub email_id: String,
    pub ai_response: String,
    pub response_time: f64,
    pub accuracy: f64,
    pub sentiment: Sentiment,
}

/// Body of `POST /submit_feedback`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub email_id: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// Successful response of `POST /submit_feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Response of `GET /feedback_stats`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackStats {
    pub average_rating: f64,
    pub total_feedback: i64,
}

/// Query parameters of `POST /send_email`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailParams {
    pub recipient_email: String,
    pub subject: String,
}

/// Immediate response of `POST /send_email`; transmission continues in the
/// background after this is returned.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_comment_defaults_to_empty() {
        let feedback: FeedbackRequest =
            serde_json::from_str(r#"{"email_id": "abc", "rating": 4}"#).unwrap();
        assert_eq!(feedback.email_id, "abc");
        assert_eq!(feedback.rating, 4);
        assert_eq!(feedback.comment, "");
    }

    #[test]
    fn tone_resolution_is_case_insensitive() {
        assert_eq!(Tone::resolve("formal"), Some(Tone::Formal));
        assert_eq!(Tone::resolve("FRIENDLY"), Some(Tone::Friendly));
        assert_eq!(Tone::resolve("Apologetic"), Some(Tone::Apologetic));
        assert_eq!(Tone::resolve("sarcastic"), None);
        assert_eq!(Tone::resolve(""), None);
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            r#""positive""#
        );
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            r#""negative""#
        );
    }

    #[test]
    fn generate_response_shape() {
        let response = GenerateResponse {
            email_id: "6f1a".to_string(),
            ai_response: "Thank you for reaching out.".to_string(),
            response_time: 1.23,
            accuracy: DEFAULT_ACCURACY,
            sentiment: Sentiment::Neutral,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["sentiment"], "neutral");
        assert_eq!(value["accuracy"], 4.0);
        assert_eq!(value["response_time"], 1.23);
    }
}
