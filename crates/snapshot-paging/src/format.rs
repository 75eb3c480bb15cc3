use crate::model::PaginationOutcome;

/// Leading marker of every truncated page; callers match on it literally.
pub const TRUNCATION_BANNER: &str = "⚠️ Snapshot Truncated";

/// Renders pagination outcomes into the page-state text contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResponseFormatter {
    show_digest: bool,
}

impl ResponseFormatter {
    pub fn new() -> Self {
        Self { show_digest: true }
    }

    pub fn with_digest(mut self, show_digest: bool) -> Self {
        self.show_digest = show_digest;
        self
    }

    pub fn format(&self, outcome: &PaginationOutcome<'_>) -> String {
        match outcome {
            PaginationOutcome::Whole { content } => (*content).to_string(),
            PaginationOutcome::Paged {
                content,
                page,
                total_pages,
                max_tokens,
                digest,
            } => {
                let continuation = if page < total_pages {
                    format!("Request page {} (0-based) to continue.\n", page)
                } else {
                    String::new()
                };
                let digest = if self.show_digest {
                    format!("Snapshot digest: {}\n", digest)
                } else {
                    String::new()
                };
                format!(
                    "{}\nContent exceeds {} tokens and was split into {} pages.\nPage {} of {}\n{}{}\n{}",
                    TRUNCATION_BANNER,
                    max_tokens,
                    total_pages,
                    page,
                    total_pages,
                    continuation,
                    digest,
                    content
                )
            }
            PaginationOutcome::OutOfRange {
                requested,
                total_pages,
            } => format!(
                "Error: Page {} out of range. Snapshot has {} page(s); valid page indexes are 0-{}.",
                requested,
                total_pages,
                total_pages.saturating_sub(1)
            ),
            PaginationOutcome::InvalidParameter { reason } => {
                format!("Error: Invalid parameter: {}", reason)
            }
        }
    }
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        Self::new()
    }
}
