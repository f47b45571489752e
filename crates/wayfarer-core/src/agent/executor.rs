//! ReAct agent loop.
//!
//! AgentExecutor alternates between asking the LLM for the next step and
//! running the chosen tool, feeding each tool result back as an
//! observation, until the model produces a final answer or the iteration
//! cap is reached. OTel GenAI spans instrument every LLM call.

use std::time::Instant;

use tracing::{Instrument, debug, info, info_span, warn};

use wayfarer_types::agent::{
    AgentAction, AgentConfig, AgentParseError, AgentStep, ITERATION_LIMIT_MESSAGE,
};
use wayfarer_types::llm::{CompletionRequest, LlmError, Message};

use super::parser;
use super::prompt::{ReactPromptBuilder, stop_sequences};
use crate::llm::box_provider::BoxLlmProvider;
use crate::tool::registry::ToolRegistry;

/// Pseudo-tool name recorded in the scratchpad for unparseable turns.
const EXCEPTION_TOOL: &str = "_Exception";

/// Observation used when a parse error carries no model-facing message.
const INCOMPLETE_RESPONSE: &str = "Invalid or incomplete response";

/// Runs the tool-using agent for one prompt.
pub struct AgentExecutor {
    provider: BoxLlmProvider,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl AgentExecutor {
    pub fn new(provider: BoxLlmProvider, tools: ToolRegistry, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Run the loop for `input` and return the final answer.
    ///
    /// Tool failures and malformed model output never fail the run; only
    /// LLM errors do. Hitting the iteration cap returns a fixed message.
    pub async fn run(&self, input: &str) -> Result<String, LlmError> {
        let mut steps: Vec<(AgentAction, String)> = Vec::new();

        for iteration in 0..self.config.max_iterations {
            let prompt = ReactPromptBuilder::build(&self.tools, input, &steps);
            let text = self.complete(prompt).await?;

            match parser::parse(&text) {
                Ok(AgentStep::Finish { output, .. }) => {
                    info!(iterations = iteration + 1, "agent finished");
                    return Ok(output);
                }
                Ok(AgentStep::Action(action)) => {
                    let observation = self.invoke_tool(&action).await;
                    steps.push((action, observation));
                }
                Err(err) => {
                    warn!(iteration, error = %err, "unparseable agent step");
                    let observation = parse_error_observation(&err);
                    let action = AgentAction {
                        tool: EXCEPTION_TOOL.to_string(),
                        tool_input: observation.clone(),
                        log: text,
                    };
                    steps.push((action, observation));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "agent stopped at iteration limit"
        );
        Ok(ITERATION_LIMIT_MESSAGE.to_string())
    }

    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(prompt)],
            system: None,
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            stop_sequences: Some(stop_sequences()),
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await?;

        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
        Ok(response.content)
    }

    async fn invoke_tool(&self, action: &AgentAction) -> String {
        let Some(tool) = self.tools.get(&action.tool) else {
            debug!(tool = %action.tool, "model requested unknown tool");
            return format!(
                "{} is not a valid tool, try one of [{}].",
                action.tool,
                self.tools.names().join(", ")
            );
        };

        let started = Instant::now();
        let observation = tool.invoke(&action.tool_input).await;
        debug!(
            tool = tool.name(),
            input = %action.tool_input,
            latency_ms = started.elapsed().as_millis() as u64,
            "tool invoked"
        );
        observation
    }
}

fn parse_error_observation(err: &AgentParseError) -> String {
    match err {
        AgentParseError::MissingAction | AgentParseError::MissingActionInput => err.to_string(),
        AgentParseError::AmbiguousStep | AgentParseError::Unparseable(_) => {
            INCOMPLETE_RESPONSE.to_string()
        }
    }
}
