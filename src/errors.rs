//! Error types for the tool surface.
//!
//! Pagination problems (bad budget, page out of range) are not errors here: they are
//! rendered into the page-state text. `ToolError` covers what the tool layer cannot
//! answer at all.

use soulbrowser_core_types::SoulError;
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ToolError {
    #[error("invalid argument `{name}`: expected {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },
    #[error("tool arguments must be an object")]
    MalformedArguments,
    #[error("snapshot capture failed: {0}")]
    Snapshot(#[from] SoulError),
}

impl ToolError {
    pub fn invalid(name: &'static str, expected: &'static str) -> Self {
        Self::InvalidArgument { name, expected }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_the_field() {
        let err = ToolError::invalid("maxTokens", "an integer");
        assert_eq!(
            err.to_string(),
            "invalid argument `maxTokens`: expected an integer"
        );
    }

    #[test]
    fn snapshot_errors_keep_their_message() {
        let err = ToolError::from(SoulError::new("page crashed"));
        assert_eq!(err.to_string(), "snapshot capture failed: page crashed");
        assert_eq!(err, ToolError::Snapshot(SoulError::new("page crashed")));
    }
}
