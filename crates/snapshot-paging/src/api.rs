use std::time::Instant;

use tracing::debug;

use crate::estimate::SizeEstimator;
use crate::format::ResponseFormatter;
use crate::metrics;
use crate::model::{Page, PageSet, PaginationOutcome, PaginationRequest, SnapshotDigest};
use crate::partition::partition;
use crate::policy::PagingPolicyView;

/// Decides truncation and selects the requested page.
///
/// The partition is recomputed from `(text, max_tokens)` on every call and never
/// depends on which page was asked for, so repeated calls agree on page boundaries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Paginator {
    estimator: SizeEstimator,
}

impl Paginator {
    pub fn new(estimator: SizeEstimator) -> Self {
        Self { estimator }
    }

    /// Full partition for `max_tokens`; text that fits is a single page.
    pub fn page_set<'a>(&self, text: &'a str, max_tokens: usize) -> PageSet<'a> {
        let total_tokens = self.estimator.estimate(text);
        if total_tokens <= max_tokens {
            return PageSet {
                max_tokens,
                total_tokens,
                truncated: false,
                pages: vec![Page {
                    index: 0,
                    text,
                    tokens: total_tokens,
                    chars: text.chars().count(),
                    oversized: false,
                }],
            };
        }
        PageSet {
            max_tokens,
            total_tokens,
            truncated: true,
            pages: partition(text, max_tokens, &self.estimator),
        }
    }

    pub fn paginate<'a>(&self, text: &'a str, request: PaginationRequest) -> PaginationOutcome<'a> {
        let started = Instant::now();
        let outcome = self.evaluate(text, request);
        metrics::record_outcome(&outcome, started.elapsed());
        outcome
    }

    fn evaluate<'a>(&self, text: &'a str, request: PaginationRequest) -> PaginationOutcome<'a> {
        let (max_tokens, page) = match request.validate() {
            Ok(valid) => valid,
            Err(err) => {
                debug!(
                    max_tokens = request.max_tokens,
                    page = request.page,
                    "rejecting pagination request: {}",
                    err
                );
                return err.into();
            }
        };

        let total_tokens = self.estimator.estimate(text);
        if total_tokens <= max_tokens {
            return if page == 0 {
                PaginationOutcome::Whole { content: text }
            } else {
                PaginationOutcome::OutOfRange {
                    requested: page,
                    total_pages: 1,
                }
            };
        }

        let pages = partition(text, max_tokens, &self.estimator);
        let total_pages = pages.len();
        let oversized = pages.iter().filter(|p| p.oversized).count();
        metrics::record_partition(total_pages, oversized);
        debug!(
            total_tokens,
            max_tokens,
            total_pages,
            oversized,
            requested = page,
            "snapshot exceeds budget"
        );

        match pages.get(page) {
            Some(selected) => PaginationOutcome::Paged {
                content: selected.text,
                page: page + 1,
                total_pages,
                max_tokens,
                digest: SnapshotDigest::of(text),
            },
            None => PaginationOutcome::OutOfRange {
                requested: page,
                total_pages,
            },
        }
    }
}

/// Paginates with the default estimator.
pub fn paginate(text: &str, max_tokens: i64, page: i64) -> PaginationOutcome<'_> {
    Paginator::default().paginate(text, PaginationRequest::new(max_tokens, page))
}

/// Paginator and formatter configured from one policy.
#[derive(Clone, Debug)]
pub struct PageStateEngine {
    paginator: Paginator,
    formatter: ResponseFormatter,
}

impl PageStateEngine {
    pub fn new(paginator: Paginator, formatter: ResponseFormatter) -> Self {
        Self {
            paginator,
            formatter,
        }
    }

    pub fn from_policy(policy: &PagingPolicyView) -> Self {
        Self::new(Paginator::new(policy.estimator()), policy.formatter())
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn formatter(&self) -> &ResponseFormatter {
        &self.formatter
    }

    /// Paginates and formats in one step, producing the page-state field.
    pub fn render(&self, text: &str, request: PaginationRequest) -> String {
        let outcome = self.paginator.paginate(text, request);
        self.formatter.format(&outcome)
    }
}

impl Default for PageStateEngine {
    fn default() -> Self {
        Self::from_policy(&PagingPolicyView::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_text_is_whole_on_page_zero_only() {
        let text = "- heading \"Small Page\" [level=1]\n";
        assert_eq!(
            paginate(text, 1000, 0),
            PaginationOutcome::Whole { content: text }
        );
        assert_eq!(
            paginate(text, 1000, 1),
            PaginationOutcome::OutOfRange {
                requested: 1,
                total_pages: 1
            }
        );
    }

    #[test]
    fn empty_text_is_whole() {
        assert_eq!(paginate("", 1, 0), PaginationOutcome::Whole { content: "" });
    }

    #[test]
    fn invalid_parameters_are_values() {
        assert_eq!(
            paginate("anything", 0, 0),
            PaginationOutcome::InvalidParameter {
                reason: "maxTokens must be positive".into()
            }
        );
        assert_eq!(
            paginate("anything", 10, -1),
            PaginationOutcome::InvalidParameter {
                reason: "page must be non-negative".into()
            }
        );
    }

    #[test]
    fn page_set_matches_paginated_pages() {
        let text: String = (0..40).map(|i| format!("- row {i:03}\n")).collect();
        let paginator = Paginator::default();
        let set = paginator.page_set(&text, 10);
        assert!(set.truncated);
        assert_eq!(set.pages.iter().map(|p| p.text).collect::<String>(), text);
        for page in &set.pages {
            match paginator.paginate(&text, PaginationRequest::new(10, page.index as i64)) {
                PaginationOutcome::Paged {
                    content,
                    page: number,
                    total_pages,
                    ..
                } => {
                    assert_eq!(content, page.text);
                    assert_eq!(number, page.index + 1);
                    assert_eq!(total_pages, set.total_pages());
                }
                other => panic!("expected paged outcome, got {other:?}"),
            }
        }
    }

    #[test]
    fn engine_renders_with_policy_ratio() {
        let policy = PagingPolicyView {
            chars_per_token: 1,
            show_digest: false,
            ..PagingPolicyView::default()
        };
        let engine = PageStateEngine::from_policy(&policy);
        let rendered = engine.render("- a\n- b\n- c\n", PaginationRequest::new(8, 0));
        assert!(rendered.contains("Content exceeds 8 tokens"));
        assert!(rendered.contains("Page 1 of 2"));
        assert!(rendered.ends_with("- a\n- b\n"));
    }
}
