//! Uniform tool invocation layer.
//!
//! Every tool call the agent makes flows through here: lookup, execution,
//! then exactly one log entry whether the call succeeded or failed.

use std::sync::Arc;

use paperhound_core::error::ToolError;
use paperhound_core::tool::{ToolCall, ToolRegistry, ToolResult};
use tracing::{debug, warn};

use crate::logger::ToolLogger;

pub struct ToolInvoker {
    registry: ToolRegistry,
    logger: Arc<ToolLogger>,
}

impl ToolInvoker {
    pub fn new(registry: ToolRegistry, logger: Arc<ToolLogger>) -> Self {
        Self { registry, logger }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn logger(&self) -> &Arc<ToolLogger> {
        &self.logger
    }

    /// Execute one tool call, logging the outcome.
    ///
    /// An unknown tool is [`ToolError::NotFound`] and is logged as a failed
    /// invocation. Execution errors are logged before propagating.
    pub async fn invoke(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let Some(tool) = self.registry.get(&call.name) else {
            warn!(tool = %call.name, "tool not found");
            self.logger
                .append(&call.name, &call.arguments, false, "tool not found")
                .await?;
            return Err(ToolError::NotFound(call.name.clone()));
        };

        debug!(tool = %call.name, call_id = %call.id, "invoking tool");

        match tool.execute(call.arguments.clone()).await {
            Ok(mut result) => {
                result.call_id = call.id.clone();
                self.logger
                    .append(&call.name, &call.arguments, result.success, &result.output)
                    .await?;
                Ok(result)
            }
            Err(e) => {
                self.logger
                    .append(&call.name, &call.arguments, false, &e.to_string())
                    .await?;
                Err(e)
            }
        }
    }
}
