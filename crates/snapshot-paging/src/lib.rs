//! Token-budgeted pagination for page-state snapshots.
//!
//! Snapshot text produced by the structural serializer is sized with a fixed
//! characters-per-token heuristic, split on line boundaries into pages that fit a
//! caller supplied budget, and rendered with the truncation banners tool callers
//! match against.

pub mod api;
pub mod errors;
pub mod estimate;
pub mod format;
pub mod hash;
pub mod metrics;
pub mod model;
pub mod partition;
pub mod policy;

pub use api::{paginate, PageStateEngine, Paginator};
pub use errors::PagingError;
pub use estimate::{estimate, SizeEstimator, CHARS_PER_TOKEN};
pub use format::{ResponseFormatter, TRUNCATION_BANNER};
pub use model::{
    OutcomeKind, Page, PageSet, PaginationOutcome, PaginationRequest, SnapshotDigest,
    DEFAULT_MAX_TOKENS,
};
pub use policy::PagingPolicyView;
