//! BoxTool -- object-safe dynamic dispatch wrapper for Tool.

use std::future::Future;
use std::pin::Pin;

use super::Tool;

/// Object-safe version of [`Tool`] with boxed futures.
pub trait ToolDyn: Send + Sync {
    fn name_dyn(&self) -> &str;

    fn description_dyn(&self) -> &str;

    fn invoke_boxed<'a>(&'a self, input: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}

impl<T: Tool> ToolDyn for T {
    fn name_dyn(&self) -> &str {
        self.name()
    }

    fn description_dyn(&self) -> &str {
        self.description()
    }

    fn invoke_boxed<'a>(&'a self, input: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(self.invoke(input))
    }
}

/// Type-erased tool so heterogeneous tools can share one registry.
pub struct BoxTool {
    inner: Box<dyn ToolDyn + Send + Sync>,
}

impl BoxTool {
    pub fn new<T: Tool + 'static>(tool: T) -> Self {
        Self {
            inner: Box::new(tool),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name_dyn()
    }

    pub fn description(&self) -> &str {
        self.inner.description_dyn()
    }

    pub async fn invoke(&self, input: &str) -> String {
        self.inner.invoke_boxed(input).await
    }
}
