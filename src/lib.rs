//! SoulBrowser page-state library
//!
//! Exposes the tool surface and configuration for integration testing.

pub mod config;
pub mod errors;
pub mod tools;

pub use soulbrowser_snapshot_paging as paging;

pub use config::PageStateConfig;
pub use errors::{ToolError, ToolResult};
pub use tools::{
    PageStateParams, PageStateTool, SnapshotMode, SnapshotSource, StaticSnapshot, ToolResponse,
    SNAPSHOT_TOOL,
};
