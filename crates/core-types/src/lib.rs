use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type crossing crate boundaries (tool layer, snapshot sources, paging).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SoulError {
    #[error("{message}")]
    Message { message: String },
}

impl SoulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Identifies one tool invocation; used to correlate log lines of a single call.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde-full")]
pub type ToolPayload = serde_json::Value;

#[cfg(not(feature = "serde-full"))]
pub type ToolPayload = ();

/// A tool invocation as received from the outer tool-calling envelope.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolCall {
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub call_id: Option<String>,
    pub tool: String,
    #[cfg_attr(feature = "serde-full", serde(default, alias = "arguments"))]
    pub payload: ToolPayload,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, payload: ToolPayload) -> Self {
        Self {
            call_id: None,
            tool: tool.into(),
            payload,
        }
    }
}

#[cfg(feature = "serde-full")]
impl ToolCall {
    /// Looks up a named argument; non-object payloads have no arguments.
    pub fn param(&self, name: &str) -> Option<&serde_json::Value> {
        self.payload.as_object().and_then(|map| map.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soul_error_displays_message() {
        let err = SoulError::new("snapshot capture failed");
        assert_eq!(err.to_string(), "snapshot capture failed");
    }

    #[test]
    fn action_ids_are_unique() {
        assert_ne!(ActionId::new(), ActionId::new());
    }

    #[cfg(feature = "serde-full")]
    #[test]
    fn tool_call_accepts_arguments_alias() {
        let call: ToolCall = serde_json::from_value(serde_json::json!({
            "tool": "browser_snapshot",
            "arguments": { "maxTokens": 50 }
        }))
        .unwrap();
        assert_eq!(call.tool, "browser_snapshot");
        assert_eq!(call.param("maxTokens").and_then(|v| v.as_i64()), Some(50));
        assert!(call.param("page").is_none());
    }
}
