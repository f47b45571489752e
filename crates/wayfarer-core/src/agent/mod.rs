//! Tool-using agent for Wayfarer.
//!
//! The agent runs a zero-shot ReAct loop:
//! - `ReactPromptBuilder`: tool list + format instructions + question + scratchpad
//! - `parser`: turns a model completion into an action or a final answer
//! - `AgentExecutor`: alternates LLM calls and tool invocations until an answer

pub mod executor;
pub mod parser;
pub mod prompt;
