//! Page-state handling for browser tool calls.
//!
//! Actions attach a snapshot of the current accessibility tree only when the caller
//! asks for it (`includeSnapshot: true`); `browser_snapshot` always does. The snapshot
//! is captured fresh for every call and paginated against `maxTokens` / `page`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use soulbrowser_core_types::{ActionId, SoulError, ToolCall};
use soulbrowser_snapshot_paging::{PageStateEngine, PaginationRequest, PagingPolicyView};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::{ToolError, ToolResult};

/// Dedicated snapshot retrieval tool.
pub const SNAPSHOT_TOOL: &str = "browser_snapshot";

/// Whether a tool attaches page state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SnapshotMode {
    Always,
    OnRequest,
}

impl SnapshotMode {
    pub fn for_tool(tool: &str) -> Self {
        if tool == SNAPSHOT_TOOL {
            SnapshotMode::Always
        } else {
            SnapshotMode::OnRequest
        }
    }
}

/// Page-state arguments of a tool call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageStateParams {
    pub include_snapshot: bool,
    pub request: PaginationRequest,
}

impl PageStateParams {
    pub fn from_call(call: &ToolCall, default_max_tokens: i64) -> ToolResult<Self> {
        if !matches!(call.payload, Value::Null | Value::Object(_)) {
            return Err(ToolError::MalformedArguments);
        }

        let include_snapshot = bool_arg(call, "includeSnapshot")?.unwrap_or(false);
        let max_tokens = int_arg(call, "maxTokens")?.unwrap_or(default_max_tokens);
        let page = int_arg(call, "page")?.unwrap_or(0);

        Ok(Self {
            include_snapshot,
            request: PaginationRequest::new(max_tokens, page),
        })
    }

    pub fn wants_page_state(&self, tool: &str) -> bool {
        match SnapshotMode::for_tool(tool) {
            SnapshotMode::Always => true,
            SnapshotMode::OnRequest => self.include_snapshot,
        }
    }
}

fn bool_arg(call: &ToolCall, name: &'static str) -> ToolResult<Option<bool>> {
    match call.param(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(ToolError::invalid(name, "a boolean")),
    }
}

// Signed on purpose: negative values are reported inside the page state.
fn int_arg(call: &ToolCall, name: &'static str) -> ToolResult<Option<i64>> {
    let number = match call.param(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number,
        Some(_) => return Err(ToolError::invalid(name, "an integer")),
    };
    if let Some(value) = number.as_i64() {
        return Ok(Some(value));
    }
    // Integers above i64::MAX clamp to i64::MAX.
    if number.as_u64().is_some() {
        return Ok(Some(i64::MAX));
    }
    match number.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(Some(value as i64)),
        _ => Err(ToolError::invalid(name, "an integer")),
    }
}

/// Captures the current snapshot text from the automation layer.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn capture(&self) -> Result<String, SoulError>;
}

/// Snapshot source serving a fixed text, replaceable between calls.
#[derive(Debug, Default)]
pub struct StaticSnapshot {
    text: RwLock<String>,
}

impl StaticSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(text.into()),
        }
    }

    pub async fn replace(&self, text: impl Into<String>) {
        *self.text.write().await = text.into();
    }
}

#[async_trait]
impl SnapshotSource for StaticSnapshot {
    async fn capture(&self) -> Result<String, SoulError> {
        Ok(self.text.read().await.clone())
    }
}

/// Content of a tool response; absent sections are omitted, never emitted empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_state: Option<String>,
}

impl ToolResponse {
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if let Some(code) = &self.code {
            sections.push(format!("### Code\n{}", code));
        }
        if let Some(page_state) = &self.page_state {
            sections.push(format!("### Page state\n{}", page_state));
        }
        if sections.is_empty() {
            return "### Result\nNo output".to_string();
        }
        sections.join("\n\n")
    }
}

/// Attaches paginated page state to tool responses.
pub struct PageStateTool {
    policy: PagingPolicyView,
    engine: PageStateEngine,
    source: Arc<dyn SnapshotSource>,
}

impl PageStateTool {
    pub fn new(policy: PagingPolicyView, source: Arc<dyn SnapshotSource>) -> Self {
        let engine = PageStateEngine::from_policy(&policy);
        Self {
            policy,
            engine,
            source,
        }
    }

    /// Builds the response of `call`, whose action already ran and produced `code`.
    ///
    /// Argument errors and capture failures are returned as `ToolError`; budget and
    /// page problems end up in the page-state text.
    pub async fn respond(&self, call: &ToolCall, code: Option<String>) -> ToolResult<ToolResponse> {
        let action = ActionId::new();
        let params = PageStateParams::from_call(call, self.policy.default_max_tokens)?;
        if !params.wants_page_state(&call.tool) {
            debug!(action = %action, tool = %call.tool, "page state not requested");
            return Ok(ToolResponse {
                code,
                page_state: None,
            });
        }

        let snapshot = self.source.capture().await?;
        let page_state = if self.policy.enabled {
            self.engine.render(&snapshot, params.request)
        } else {
            snapshot
        };
        info!(
            action = %action,
            tool = %call.tool,
            max_tokens = params.request.max_tokens,
            page = params.request.page,
            chars = page_state.chars().count(),
            "page state attached"
        );

        Ok(ToolResponse {
            code,
            page_state: Some(page_state),
        })
    }
}
