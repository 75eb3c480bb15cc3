use thiserror::Error;

/// Rejections raised while validating a pagination request.
///
/// These never abort a tool call: the paginator folds them into
/// [`PaginationOutcome::InvalidParameter`](crate::model::PaginationOutcome).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PagingError {
    #[error("maxTokens must be positive")]
    NonPositiveBudget,
    #[error("page must be non-negative")]
    NegativePage,
}
