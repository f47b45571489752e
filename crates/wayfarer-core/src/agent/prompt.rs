//! ReAct prompt builder.
//!
//! Layout:
//! ```text
//! Answer the following questions as best you can. You have access to the following tools:
//!
//! {name}: {description}
//! ...
//!
//! Use the following format:
//! ... (Question / Thought / Action / Action Input / Observation / Final Answer)
//!
//! Begin!
//!
//! Question: {input}
//! Thought:{scratchpad}
//! ```

use wayfarer_types::agent::AgentAction;

use crate::tool::registry::ToolRegistry;

const PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

const SUFFIX: &str = "Begin!";

/// Prefix written before each tool result in the scratchpad.
pub const OBSERVATION_PREFIX: &str = "Observation: ";

/// Prefix that resumes the model's reasoning after an observation.
pub const THOUGHT_PREFIX: &str = "Thought:";

/// Stop sequences that keep the model from inventing its own observations.
pub fn stop_sequences() -> Vec<String> {
    vec![
        format!("\n{}", OBSERVATION_PREFIX.trim_end()),
        format!("\n\t{}", OBSERVATION_PREFIX.trim_end()),
    ]
}

fn format_instructions(tool_names: &str) -> String {
    format!(
        "Use the following format:\n\n\
         Question: the input question you must answer\n\
         Thought: you should always think about what to do\n\
         Action: the action to take, should be one of [{tool_names}]\n\
         Action Input: the input to the action\n\
         Observation: the result of the action\n\
         ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
         Thought: I now know the final answer\n\
         Final Answer: the final answer to the original input question"
    )
}

/// Builds the zero-shot ReAct prompt for one loop iteration.
pub struct ReactPromptBuilder;

impl ReactPromptBuilder {
    /// Render the full prompt for `question` given the steps taken so far.
    pub fn build(tools: &ToolRegistry, question: &str, steps: &[(AgentAction, String)]) -> String {
        let tool_list = tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n");
        let tool_names = tools.names().join(", ");

        format!(
            "{PREFIX}\n\n{tool_list}\n\n{}\n\n{SUFFIX}\n\nQuestion: {question}\n{THOUGHT_PREFIX}{}",
            format_instructions(&tool_names),
            Self::scratchpad(steps),
        )
    }

    /// Replay prior model output and observations so the model can continue.
    pub fn scratchpad(steps: &[(AgentAction, String)]) -> String {
        let mut out = String::new();
        for (action, observation) in steps {
            out.push_str(&action.log);
            out.push('\n');
            out.push_str(OBSERVATION_PREFIX);
            out.push_str(observation);
            out.push('\n');
            out.push_str(THOUGHT_PREFIX);
            out.push(' ');
        }
        out
    }
}
