//! Agent tool abstractions.
//!
//! A tool is a named capability the agent may call with a single string
//! input. Failures are part of the output text, so `invoke` is infallible.
//! Concrete tools (weather, travel data) live in wayfarer-infra.

pub mod box_tool;
pub mod registry;

/// Trait for agent-callable tools.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait Tool: Send + Sync {
    /// Name the model writes after `Action:`.
    fn name(&self) -> &str;

    /// One-line description shown to the model in the tool list.
    fn description(&self) -> &str;

    /// Run the tool. Errors are reported as a human-readable sentence.
    fn invoke(&self, input: &str) -> impl std::future::Future<Output = String> + Send;
}
