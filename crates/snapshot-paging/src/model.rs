use std::fmt;

use serde::Serialize;

use crate::errors::PagingError;
use crate::hash::hash_text;

/// Budget applied when a caller does not pass `maxTokens`.
pub const DEFAULT_MAX_TOKENS: i64 = 24_000;

/// Caller supplied budget and page index, as received from the tool arguments.
///
/// Both fields stay signed so that negative input reaches validation and is
/// reported in the response instead of being rejected with the arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PaginationRequest {
    pub max_tokens: i64,
    pub page: i64,
}

impl PaginationRequest {
    pub fn new(max_tokens: i64, page: i64) -> Self {
        Self { max_tokens, page }
    }

    /// Returns `(max_tokens, page)` once both are in range.
    pub fn validate(&self) -> Result<(usize, usize), PagingError> {
        if self.max_tokens <= 0 {
            return Err(PagingError::NonPositiveBudget);
        }
        if self.page < 0 {
            return Err(PagingError::NegativePage);
        }
        let max_tokens = usize::try_from(self.max_tokens).unwrap_or(usize::MAX);
        let page = usize::try_from(self.page).unwrap_or(usize::MAX);
        Ok((max_tokens, page))
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS, 0)
    }
}

/// Content label of a full snapshot, letting callers detect that the upstream
/// state changed between two page requests.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct SnapshotDigest(pub String);

impl SnapshotDigest {
    pub fn of(text: &str) -> Self {
        Self(hash_text("ss", text))
    }
}

impl fmt::Display for SnapshotDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One contiguous slice of the snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Page<'a> {
    /// 0-based position in the partition.
    pub index: usize,
    #[serde(skip)]
    pub text: &'a str,
    pub tokens: usize,
    pub chars: usize,
    /// A single line larger than the budget, emitted whole.
    pub oversized: bool,
}

/// Full partition of a snapshot for one budget.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageSet<'a> {
    pub max_tokens: usize,
    pub total_tokens: usize,
    pub truncated: bool,
    pub pages: Vec<Page<'a>>,
}

impl<'a> PageSet<'a> {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Whole,
    Paged,
    OutOfRange,
    InvalidParameter,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Whole => "whole",
            OutcomeKind::Paged => "paged",
            OutcomeKind::OutOfRange => "out_of_range",
            OutcomeKind::InvalidParameter => "invalid_parameter",
        }
    }
}

/// Result of paginating one snapshot; every variant is a normal return value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginationOutcome<'a> {
    Whole {
        content: &'a str,
    },
    Paged {
        content: &'a str,
        /// 1-based page number surfaced to callers.
        page: usize,
        total_pages: usize,
        max_tokens: usize,
        digest: SnapshotDigest,
    },
    OutOfRange {
        /// The 0-based index the caller asked for.
        requested: usize,
        total_pages: usize,
    },
    InvalidParameter {
        reason: String,
    },
}

impl<'a> PaginationOutcome<'a> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            PaginationOutcome::Whole { .. } => OutcomeKind::Whole,
            PaginationOutcome::Paged { .. } => OutcomeKind::Paged,
            PaginationOutcome::OutOfRange { .. } => OutcomeKind::OutOfRange,
            PaginationOutcome::InvalidParameter { .. } => OutcomeKind::InvalidParameter,
        }
    }

    pub fn total_pages(&self) -> Option<usize> {
        match self {
            PaginationOutcome::Whole { .. } => Some(1),
            PaginationOutcome::Paged { total_pages, .. }
            | PaginationOutcome::OutOfRange { total_pages, .. } => Some(*total_pages),
            PaginationOutcome::InvalidParameter { .. } => None,
        }
    }
}

impl<'a> From<PagingError> for PaginationOutcome<'a> {
    fn from(err: PagingError) -> Self {
        PaginationOutcome::InvalidParameter {
            reason: err.to_string(),
        }
    }
}
