use crate::config::OpenAiSettings;
use crate::services::completion::{CompletionError, CompletionRequest, CompletionService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat-completions client
///
/// Sends each prompt as a single user message and returns the content of the
/// first choice. No retries are attempted.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client. Without a timeout the reqwest default applies.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CompletionError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key,
            model,
            client,
        })
    }

    /// Build a client from settings, or `None` when no API key is configured
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Option<Self>, CompletionError> {
        let Some(api_key) = settings.configured_key() else {
            return Ok(None);
        };

        Self::new(
            settings.base_url.clone(),
            api_key.to_string(),
            settings.model.clone(),
            settings.timeout_secs.map(Duration::from_secs),
        )
        .map(Some)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = ChatCompletionBody {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            "Requesting completion from {} (model: {}, temperature: {})",
            url,
            self.model,
            request.temperature
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(CompletionError::ApiError { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> OpenAiClient {
        OpenAiClient::new(
            server.url(),
            "test_key".to_string(),
            "gpt-4o-mini".to_string(),
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "Return JSON array only".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
        }
    }

    #[test]
    fn test_from_settings_without_key() {
        let settings = OpenAiSettings {
            api_key: Some(String::new()),
            ..OpenAiSettings::default()
        };

        assert!(OpenAiClient::from_settings(&settings).unwrap().is_none());
    }

    #[test]
    fn test_from_settings_with_key() {
        let settings = OpenAiSettings {
            api_key: Some("sk-test".to_string()),
            ..OpenAiSettings::default()
        };

        let client = OpenAiClient::from_settings(&settings).unwrap().unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
        assert_eq!(client.api_key, "sk-test");
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test_key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "Return JSON array only"}],
                "max_tokens": 2000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#)
            .create_async()
            .await;

        let text = client_for(&server).complete(&request()).await.unwrap();

        assert_eq!(text, "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();

        match err {
            CompletionError::ApiError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }
}
