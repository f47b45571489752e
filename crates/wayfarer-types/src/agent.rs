//! Agent loop types: configuration and parsed reasoning steps.

use serde::{Deserialize, Serialize};

/// Message returned when the agent runs out of iterations without a
/// final answer.
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

/// Runtime configuration for a tool-using agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// LLM model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens per LLM call.
    pub max_tokens: u32,
    /// Upper bound on Thought/Action/Observation rounds.
    pub max_iterations: usize,
}

impl AgentConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 15;
}

/// A tool call decided by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentAction {
    /// Tool name as written by the model.
    pub tool: String,
    /// Input passed to the tool, trimmed of whitespace and double quotes.
    pub tool_input: String,
    /// Raw model output that produced this action (kept for the scratchpad).
    pub log: String,
}

/// One parsed model turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// Call a tool and feed its output back as an observation.
    Action(AgentAction),
    /// Stop and return this answer.
    Finish { output: String, log: String },
}

/// Why a model turn could not be parsed into an [`AgentStep`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentParseError {
    #[error("Invalid Format: Missing 'Action:' after 'Thought:'")]
    MissingAction,

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:'")]
    MissingActionInput,

    #[error("Parsing LLM output produced both a final answer and a parse-able action")]
    AmbiguousStep,

    #[error("Could not parse LLM output: `{0}`")]
    Unparseable(String),
}
