//! Process-wide paging counters.
//!
//! Relaxed atomics only; they never feed back into pagination decisions, so concurrent
//! tool calls stay independent of each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::model::{OutcomeKind, PaginationOutcome};

static OUTCOME_WHOLE: AtomicU64 = AtomicU64::new(0);
static OUTCOME_PAGED: AtomicU64 = AtomicU64::new(0);
static OUTCOME_OUT_OF_RANGE: AtomicU64 = AtomicU64::new(0);
static OUTCOME_INVALID: AtomicU64 = AtomicU64::new(0);

static PAGES_PRODUCED: AtomicU64 = AtomicU64::new(0);
static OVERSIZED_PAGES: AtomicU64 = AtomicU64::new(0);

static PAGINATE_LAT_NS: AtomicU64 = AtomicU64::new(0);
static PAGINATE_LAT_SAMPLES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutcomeCounters {
    pub whole: u64,
    pub paged: u64,
    pub out_of_range: u64,
    pub invalid_parameter: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PagingMetricSnapshot {
    pub outcomes: OutcomeCounters,
    pub pages_produced: u64,
    pub oversized_pages: u64,
    pub calls: u64,
    pub avg_ms: f64,
}

pub fn record_outcome(outcome: &PaginationOutcome<'_>, duration: Duration) {
    let counter = match outcome.kind() {
        OutcomeKind::Whole => &OUTCOME_WHOLE,
        OutcomeKind::Paged => &OUTCOME_PAGED,
        OutcomeKind::OutOfRange => &OUTCOME_OUT_OF_RANGE,
        OutcomeKind::InvalidParameter => &OUTCOME_INVALID,
    };
    counter.fetch_add(1, Ordering::Relaxed);
    record_latency(duration);
}

pub fn record_partition(pages: usize, oversized: usize) {
    PAGES_PRODUCED.fetch_add(pages as u64, Ordering::Relaxed);
    OVERSIZED_PAGES.fetch_add(oversized as u64, Ordering::Relaxed);
}

pub fn snapshot() -> PagingMetricSnapshot {
    let samples = PAGINATE_LAT_SAMPLES.load(Ordering::Relaxed);
    let total_ns = PAGINATE_LAT_NS.load(Ordering::Relaxed);
    let avg_ms = if samples == 0 {
        0.0
    } else {
        (total_ns as f64 / samples as f64) / 1_000_000.0
    };
    PagingMetricSnapshot {
        outcomes: OutcomeCounters {
            whole: OUTCOME_WHOLE.load(Ordering::Relaxed),
            paged: OUTCOME_PAGED.load(Ordering::Relaxed),
            out_of_range: OUTCOME_OUT_OF_RANGE.load(Ordering::Relaxed),
            invalid_parameter: OUTCOME_INVALID.load(Ordering::Relaxed),
        },
        pages_produced: PAGES_PRODUCED.load(Ordering::Relaxed),
        oversized_pages: OVERSIZED_PAGES.load(Ordering::Relaxed),
        calls: samples,
        avg_ms,
    }
}

fn record_latency(duration: Duration) {
    let nanos = duration.as_nanos().min(u128::from(u64::MAX)) as u64;
    PAGINATE_LAT_NS.fetch_add(nanos, Ordering::Relaxed);
    PAGINATE_LAT_SAMPLES.fetch_add(1, Ordering::Relaxed);
}
