use crate::config::GenerationSettings;
use crate::core::{
    fallback::{fallback_assignments, fallback_developers, fallback_tickets},
    parse::{parse_records, ParseError},
    prompts::{developers_prompt, match_prompt, tickets_prompt},
};
use crate::models::{Assignment, Developer, MatchRequest, Ticket};
use crate::services::{CompletionError, CompletionRequest, CompletionService};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;
use validator::Validate;

/// Errors surfaced to callers of the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("OpenAI API key not configured")]
    NotConfigured,
}

/// Reasons a completion attempt is abandoned in favour of the fallback
#[derive(Debug, Error)]
enum AttemptError {
    #[error("failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Front door to the completion service
///
/// Every operation either returns what the model produced, once it parses and
/// validates, or a deterministic fallback. The only hard failure is matching
/// without a configured completion service.
#[derive(Clone)]
pub struct MatchingGateway {
    completions: Option<Arc<dyn CompletionService>>,
    generation: GenerationSettings,
}

impl MatchingGateway {
    pub fn new(completions: Option<Arc<dyn CompletionService>>, generation: GenerationSettings) -> Self {
        Self {
            completions,
            generation,
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(None, GenerationSettings::default())
    }

    pub fn is_configured(&self) -> bool {
        self.completions.is_some()
    }

    /// Assign tickets to developers
    pub async fn match_tickets(&self, request: &MatchRequest) -> Result<Vec<Assignment>, GatewayError> {
        let completions = self.completions.as_deref().ok_or(GatewayError::NotConfigured)?;

        let span = tracing::info_span!(
            "match_tickets",
            request_id = %uuid::Uuid::new_v4(),
            developers = request.developers.len(),
            tickets = request.tickets.len(),
        );

        let assignments = async {
            let attempt: Result<Vec<Assignment>, AttemptError> =
                match match_prompt(&request.developers, &request.tickets) {
                    Ok(prompt) => {
                        self.request_records(completions, prompt, self.generation.match_temperature)
                            .await
                    }
                    Err(e) => Err(e.into()),
                };

            match attempt {
                Ok(assignments) => {
                    tracing::info!("Model produced {} assignments", assignments.len());
                    assignments
                }
                Err(e) => {
                    tracing::warn!("Falling back to positional matching: {}", e);
                    fallback_assignments(&request.developers, &request.tickets)
                }
            }
        }
        .instrument(span)
        .await;

        Ok(assignments)
    }

    /// Produce `count` developer profiles, capped at `max_count`
    pub async fn generate_developers(&self, count: usize) -> Vec<Developer> {
        let count = self.capped(count);
        self.generate(
            "generate_developers",
            count,
            developers_prompt(count),
            self.generation.developer_temperature,
            fallback_developers,
        )
        .await
    }

    /// Produce `count` tickets, capped at `max_count`
    pub async fn generate_tickets(&self, count: usize) -> Vec<Ticket> {
        let count = self.capped(count);
        self.generate(
            "generate_tickets",
            count,
            tickets_prompt(count),
            self.generation.ticket_temperature,
            fallback_tickets,
        )
        .await
    }

    fn capped(&self, count: usize) -> usize {
        if count > self.generation.max_count {
            tracing::warn!("Requested {} records, capping at {}", count, self.generation.max_count);
        }
        count.min(self.generation.max_count)
    }

    async fn generate<T>(
        &self,
        operation: &'static str,
        count: usize,
        prompt: String,
        temperature: f32,
        fallback: fn(usize) -> Vec<T>,
    ) -> Vec<T>
    where
        T: DeserializeOwned + Validate,
    {
        let Some(completions) = self.completions.as_deref() else {
            tracing::debug!("{}: completion service not configured, using placeholders", operation);
            return fallback(count);
        };

        let span = tracing::info_span!("generate", operation, request_id = %uuid::Uuid::new_v4(), count);

        async {
            match self.request_records(completions, prompt, temperature).await {
                Ok(records) => {
                    tracing::info!("Model produced {} of {} requested records", records.len(), count);
                    records
                }
                Err(e) => {
                    tracing::warn!("Falling back to placeholder records: {}", e);
                    fallback(count)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn request_records<T>(
        &self,
        completions: &dyn CompletionService,
        prompt: String,
        temperature: f32,
    ) -> Result<Vec<T>, AttemptError>
    where
        T: DeserializeOwned + Validate,
    {
        let request = CompletionRequest {
            prompt,
            temperature,
            max_tokens: self.generation.max_tokens,
        };

        let text = completions.complete(&request).await?;
        Ok(parse_records(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a fixed reply and records what it was asked
    struct Canned {
        reply: Option<String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl Canned {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionService for Canned {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone().ok_or(CompletionError::EmptyResponse)
        }
    }

    fn gateway(service: Arc<Canned>) -> MatchingGateway {
        MatchingGateway::new(Some(service), GenerationSettings::default())
    }

    fn sample_request() -> MatchRequest {
        MatchRequest {
            developers: fallback_developers(2),
            tickets: fallback_tickets(3),
        }
    }

    #[tokio::test]
    async fn test_match_requires_configuration() {
        let result = MatchingGateway::unconfigured().match_tickets(&sample_request()).await;
        assert!(matches!(result, Err(GatewayError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_match_uses_model_reply() {
        let service = Canned::replying(
            "```json\n[{\"ticketId\":\"TASK-003\",\"developerName\":\"Developer 2\",\"reason\":\"skills\",\"matchScore\":88.0}]\n```",
        );
        let assignments = gateway(service.clone()).match_tickets(&sample_request()).await.unwrap();

        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].ticket_id, "TASK-003");

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, 0.3);
        assert_eq!(seen[0].max_tokens, 2000);
    }

    #[tokio::test]
    async fn test_match_falls_back_on_failure() {
        let assignments = gateway(Canned::failing()).match_tickets(&sample_request()).await.unwrap();

        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().all(|a| a.match_score == 75.0));
    }

    #[tokio::test]
    async fn test_match_falls_back_on_wrong_schema() {
        let service = Canned::replying(r#"[{"ticket": "TASK-001"}]"#);
        let assignments = gateway(service).match_tickets(&sample_request()).await.unwrap();

        assert_eq!(assignments, fallback_assignments(&fallback_developers(2), &fallback_tickets(3)));
    }

    #[tokio::test]
    async fn test_generation_temperatures() {
        let service = Canned::replying("[]");
        let gateway = gateway(service.clone());

        gateway.generate_developers(4).await;
        gateway.generate_tickets(4).await;

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen[0].temperature, 0.8);
        assert_eq!(seen[1].temperature, 0.7);
        assert!(seen[0].prompt.contains("Generate 4"));
    }

    #[tokio::test]
    async fn test_generate_caps_count() {
        let generation = GenerationSettings {
            max_count: 5,
            ..GenerationSettings::default()
        };
        let gateway = MatchingGateway::new(None, generation);

        assert_eq!(gateway.generate_tickets(usize::MAX).await.len(), 5);
        assert_eq!(gateway.generate_developers(3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_generate_falls_back_on_garbage() {
        let developers = gateway(Canned::replying("Sorry, I can't help with that."))
            .generate_developers(3)
            .await;

        assert_eq!(developers, fallback_developers(3));
    }
}
