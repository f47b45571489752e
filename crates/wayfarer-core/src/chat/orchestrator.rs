//! Chat orchestrator: profile + query + memory context -> agent -> memory.

use std::sync::Arc;

use tracing::{Instrument, debug, info_span};

use wayfarer_types::error::ChatError;
use wayfarer_types::memory::MemoryHit;
use wayfarer_types::user::UserProfile;

use crate::agent::executor::AgentExecutor;
use crate::memory::store::MemoryStore;

const INSTRUCTION: &str = "Using the above information, fetch relevant weather data and travel details. \
Provide a detailed travel recommendation with citations.";

/// Prior responses retrieved per turn; the prompt carries at most one.
const CONTEXT_HITS: usize = 1;

/// Processes one chat turn end to end.
///
/// The memory store is shared with the rest of the application; the
/// orchestrator only reads from it before the agent runs and appends to it
/// afterwards.
pub struct ChatOrchestrator {
    memory: Arc<MemoryStore>,
    agent: AgentExecutor,
}

impl ChatOrchestrator {
    pub fn new(memory: Arc<MemoryStore>, agent: AgentExecutor) -> Self {
        Self { memory, agent }
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    /// Answer `query` for the user described by `profile`.
    ///
    /// The response is returned verbatim and appended to memory. An
    /// embedding failure on either side of the agent call fails the turn.
    /// Only the empty string is rejected; whitespace is passed through.
    pub async fn process(&self, query: &str, profile: &UserProfile) -> Result<String, ChatError> {
        if query.is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        let span = info_span!("chat.process", user.email = %profile.email);
        async {
            let hits = self.memory.search(query, CONTEXT_HITS).await?;
            debug!(context_hits = hits.len(), "memory context retrieved");

            let prompt = build_prompt(profile, query, &hits);
            let response = self.agent.run(&prompt).await?;

            self.memory.add(&response).await?;
            Ok::<_, ChatError>(response)
        }
        .instrument(span)
        .await
    }
}

/// One-line description of the user for the prompt header.
pub fn profile_line(profile: &UserProfile) -> String {
    let preferences =
        serde_json::to_string(&profile.travel_preferences).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Email: {}, Full Name: {}, Preferences: {}",
        profile.email,
        profile.full_name.as_deref().unwrap_or_default(),
        preferences
    )
}

/// Assemble the agent input from profile, query, and retrieved memories.
///
/// Only the nearest hit (the first) is used. The context line is present
/// (possibly empty) so the layout is always four lines.
pub fn build_prompt(profile: &UserProfile, query: &str, hits: &[MemoryHit]) -> String {
    let context = hits
        .first()
        .map(|hit| format!("Relevant historical data: {}", hit.text))
        .unwrap_or_default();

    format!(
        "User Profile: {}\nUser Query: {query}\n{context}\n{INSTRUCTION}",
        profile_line(profile)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use wayfarer_types::agent::AgentConfig;
    use wayfarer_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};
    use wayfarer_types::user::TravelPreferences;

    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::provider::LlmProvider;
    use crate::memory::store::tests::test_store;
    use crate::tool::registry::ToolRegistry;

    /// Answers immediately and remembers the question it was given.
    #[derive(Clone, Default)]
    struct AnsweringProvider {
        questions: Arc<Mutex<Vec<String>>>,
    }

    impl LlmProvider for AnsweringProvider {
        fn name(&self) -> &str {
            "answering"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let prompt = request.messages[0].content.clone();
            let mut questions = self.questions.lock().unwrap();
            questions.push(prompt);
            Ok(CompletionResponse {
                id: "r".to_string(),
                content: format!("Final Answer: recommendation #{}", questions.len()),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn profile() -> UserProfile {
        let mut prefs = TravelPreferences::new();
        prefs.insert("climate".to_string(), serde_json::json!("warm"));
        UserProfile {
            email: "a@x.com".to_string(),
            full_name: Some("A".to_string()),
            travel_preferences: prefs,
        }
    }

    fn orchestrator(provider: AnsweringProvider) -> ChatOrchestrator {
        let agent = AgentExecutor::new(
            BoxLlmProvider::new(provider),
            ToolRegistry::new(),
            AgentConfig {
                model: "m".to_string(),
                temperature: 0.0,
                max_tokens: 32,
                max_iterations: 15,
            },
        );
        ChatOrchestrator::new(Arc::new(test_store()), agent)
    }

    #[test]
    fn test_build_prompt_without_context() {
        let prompt = build_prompt(&profile(), "weather in Paris", &[]);
        assert_eq!(
            prompt,
            "User Profile: Email: a@x.com, Full Name: A, Preferences: {\"climate\":\"warm\"}\n\
             User Query: weather in Paris\n\
             \n\
             Using the above information, fetch relevant weather data and travel details. \
             Provide a detailed travel recommendation with citations."
        );
    }

    #[test]
    fn test_build_prompt_with_context() {
        let hits = vec![MemoryHit {
            position: 0,
            text: "Lisbon is mild in March.".to_string(),
            distance: 0.4,
        }];
        let prompt = build_prompt(&profile(), "spring trip", &hits);
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[2], "Relevant historical data: Lisbon is mild in March.");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_build_prompt_uses_only_nearest_hit() {
        let hits = vec![
            MemoryHit {
                position: 3,
                text: "Porto has cheap flights in April.".to_string(),
                distance: 0.1,
            },
            MemoryHit {
                position: 0,
                text: "Lisbon is mild in March.".to_string(),
                distance: 0.9,
            },
        ];
        let prompt = build_prompt(&profile(), "spring trip", &hits);
        assert!(prompt.contains("Relevant historical data: Porto has cheap flights in April.\n"));
        assert!(!prompt.contains("Lisbon"));
        assert_eq!(prompt.lines().count(), 4);
    }

    #[test]
    fn test_profile_line_without_name() {
        let profile = UserProfile {
            email: "b@x.com".to_string(),
            full_name: None,
            travel_preferences: TravelPreferences::new(),
        };
        assert_eq!(
            profile_line(&profile),
            "Email: b@x.com, Full Name: , Preferences: {}"
        );
    }

    #[tokio::test]
    async fn test_process_appends_response_to_memory() {
        let provider = AnsweringProvider::default();
        let chat = orchestrator(provider.clone());

        let response = chat.process("weather in Paris", &profile()).await.unwrap();
        assert_eq!(response, "recommendation #1");
        assert_eq!(chat.memory().len().await, 1);

        // Second turn sees the first answer as context.
        chat.process("weather in Paris", &profile()).await.unwrap();
        assert_eq!(chat.memory().len().await, 2);
        let questions = provider.questions.lock().unwrap();
        assert!(!questions[0].contains("Relevant historical data"));
        assert!(questions[1].contains("Relevant historical data: recommendation #1"));
    }

    #[tokio::test]
    async fn test_process_rejects_empty_query() {
        let chat = orchestrator(AnsweringProvider::default());
        let err = chat.process("", &profile()).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyQuery));
        assert!(chat.memory().is_empty().await);
    }

    #[tokio::test]
    async fn test_process_passes_whitespace_query_through() {
        let provider = AnsweringProvider::default();
        let chat = orchestrator(provider.clone());
        let response = chat.process("  ", &profile()).await.unwrap();
        assert_eq!(response, "recommendation #1");
        assert!(provider.questions.lock().unwrap()[0].contains("User Query:   \n"));
    }

    #[tokio::test]
    async fn test_process_injects_one_snippet_with_fuller_memory() {
        let provider = AnsweringProvider::default();
        let chat = orchestrator(provider.clone());
        chat.memory().add("weather in Paris is mild").await.unwrap();
        chat.memory().add("weather in Paris is rainy").await.unwrap();

        chat.process("weather in Paris", &profile()).await.unwrap();
        let questions = provider.questions.lock().unwrap();
        assert_eq!(questions[0].matches("weather in Paris is").count(), 1);
    }
}
