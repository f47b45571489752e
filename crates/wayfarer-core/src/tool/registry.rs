//! Name-indexed collection of agent tools.

use super::box_tool::BoxTool;

/// Ordered set of tools available to the agent.
///
/// Lookup ignores ASCII case; models frequently write `openweather` for
/// `OpenWeather`. Registration order is the order shown in the prompt.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<BoxTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name (ignoring case) is replaced.
    pub fn register(&mut self, tool: BoxTool) {
        self.tools
            .retain(|t| !t.name().eq_ignore_ascii_case(tool.name()));
        self.tools.push(tool);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: BoxTool) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&BoxTool> {
        let name = name.trim();
        self.tools.iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(BoxTool::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoxTool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::Tool;

    struct Echo {
        name: &'static str,
    }

    impl Tool for Echo {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Repeat the input."
        }

        async fn invoke(&self, input: &str) -> String {
            format!("{}: {input}", self.name)
        }
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let registry = ToolRegistry::new().with(BoxTool::new(Echo { name: "OpenWeather" }));
        let tool = registry.get(" openweather ").unwrap();
        assert_eq!(tool.invoke("Paris").await, "OpenWeather: Paris");
        assert!(registry.get("SerpApi").is_none());
    }

    #[test]
    fn test_names_keep_registration_order() {
        let registry = ToolRegistry::new()
            .with(BoxTool::new(Echo { name: "OpenWeather" }))
            .with(BoxTool::new(Echo { name: "SerpApi" }));
        assert_eq!(registry.names(), vec!["OpenWeather", "SerpApi"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(BoxTool::new(Echo { name: "SerpApi" }));
        registry.register(BoxTool::new(Echo { name: "serpapi" }));
        assert_eq!(registry.names(), vec!["serpapi"]);
    }
}
