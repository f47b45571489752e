//! ReAct output parser.
//!
//! A completion is either a tool call (`Action:` followed by
//! `Action Input:`) or a final answer (`Final Answer:`). Anything else is a
//! format error that the executor feeds back to the model.

use std::sync::LazyLock;

use regex::Regex;

use wayfarer_types::agent::{AgentAction, AgentParseError, AgentStep};

const FINAL_ANSWER: &str = "Final Answer:";

static ACTION_WITH_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("action pattern is valid")
});

static ACTION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)").expect("action pattern is valid"));

static INPUT_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)").expect("input pattern is valid")
});

/// Parse one model completion.
pub fn parse(text: &str) -> Result<AgentStep, AgentParseError> {
    let includes_answer = text.contains(FINAL_ANSWER);

    if let Some(caps) = ACTION_WITH_INPUT.captures(text) {
        if includes_answer {
            return Err(AgentParseError::AmbiguousStep);
        }
        let tool = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let tool_input = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_matches('"')
            .to_string();
        return Ok(AgentStep::Action(AgentAction {
            tool,
            tool_input,
            log: text.to_string(),
        }));
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        return Ok(AgentStep::Finish {
            output,
            log: text.to_string(),
        });
    }

    if !ACTION_ONLY.is_match(text) {
        Err(AgentParseError::MissingAction)
    } else if !INPUT_ONLY.is_match(text) {
        Err(AgentParseError::MissingActionInput)
    } else {
        Err(AgentParseError::Unparseable(text.to_string()))
    }
}
