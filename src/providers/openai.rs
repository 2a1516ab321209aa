use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ProviderError;
use crate::providers::SplitProvider;

/// System prompt instructing the model to insert `###` separators without
/// altering any word of the input
const SEGMENT_SYSTEM_PROMPT: &str = r#"Segment multiple texts into shorter sentences without altering the original text, retaining any errors or repetitions present.

- Do not modify the original text, maintaining any spelling errors, grammatical mistakes, or repetition.
- Try to limit the length of each sentence to fewer than 40 words while preserving the complete meaning.
- Use the separator `###` to split long texts.
- Process all input sentences and return them in the SAME ORDER.
- If a sentence is already short enough (under 40 words), return it unchanged without separators.

# Input Format

The input will be a JSON object with a key "sentences" containing an array of texts to process.

# Output Format

Return a JSON object with a key "results" containing an array of processed texts (with or without ### separators) in the same order as the input.

# Important Notes

- The number of items in "results" MUST equal the number of items in "sentences"
- Maintain the exact order of sentences
- Only use ### for sentences that need splitting
- Each segment should be a complete, meaningful unit"#;

/// OpenAI-compatible client for the text segmentation service
#[derive(Debug)]
pub struct OpenAISplitter {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Chat completions endpoint URL
    endpoint: String,
    /// Model name
    model: String,
}

/// Chat message object
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    role: String,
    /// Content of the message
    content: String,
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model name to use
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Response format constraint
    response_format: serde_json::Value,
    /// Temperature for generation
    temperature: f32,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Response choices
    choices: Vec<ChatChoice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The generated message
    message: ChatMessage,
}

/// The JSON document the model is asked to produce
#[derive(Debug, Deserialize)]
struct SplitResults {
    /// Processed texts in input order
    results: Vec<String>,
}

impl OpenAISplitter {
    /// Default chat completions endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.openai.com/v1/chat/completions";

    /// Create a new splitter client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(request_timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl SplitProvider for OpenAISplitter {
    async fn split_sentences(&self, sentences: &[String]) -> Result<Vec<String>, ProviderError> {
        let payload = json!({ "sentences": sentences }).to_string();
        debug!(
            "Requesting split of {} sentences from {}",
            sentences.len(),
            self.model
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SEGMENT_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: payload,
                },
            ],
            response_format: json!({ "type": "json_object" }),
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Splitter API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ProviderError::ParseError("response has no choices".to_string()))?;

        let parsed: SplitResults = serde_json::from_str(content).map_err(|e| {
            error!(
                "Failed to parse splitter JSON: {}. Raw content (first 200 chars): {}",
                e,
                content.chars().take(200).collect::<String>()
            );
            ProviderError::ParseError(e.to_string())
        })?;

        Ok(parsed.results)
    }
}
