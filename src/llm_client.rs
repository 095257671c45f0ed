use crate::errors::AppError;
use serde_json::json;

/// Client for the hosted text-generation endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    endpoint_url: String,
    api_token: String,
}

impl LlmClient {
    /// Creates a new `LlmClient`.
    ///
    /// The underlying HTTP client carries no request timeout: generation
    /// latency is unbounded and the call runs to completion or failure.
    ///
    /// # Arguments
    ///
    /// * `endpoint_url` - The URL of the hosted model endpoint.
    /// * `api_token` - The API token for authentication.
    pub fn new(endpoint_url: String, api_token: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            AppError::GenerationFailed(format!("Failed to create LLM client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint_url,
            api_token,
        })
    }

    /// Requests a completion for the given prompt.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - The generated text, or
    ///   `GenerationFailed` on any transport, provider, or payload error.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "return_full_text": false
            }
        });

        let response = self
            .client
            .post(&self.endpoint_url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::GenerationFailed(format!("LLM request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GenerationFailed(format!(
                "LLM endpoint returned {}: {}",
                status, error_text
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            AppError::GenerationFailed(format!("Failed to parse LLM response: {}", e))
        })?;

        // The hosted inference API returns [{"generated_text": ...}]; some
        // deployments return the object unwrapped.
        let generated = payload
            .get(0)
            .and_then(|entry| entry.get("generated_text"))
            .or_else(|| payload.get("generated_text"))
            .and_then(|text| text.as_str());

        match generated {
            Some(text) => Ok(text.to_string()),
            None => Err(AppError::GenerationFailed(format!(
                "LLM response missing 'generated_text' field: {}",
                payload
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LlmClient::new("https://example.com".to_string(), "token".to_string());
        assert!(client.is_ok());
    }
}
