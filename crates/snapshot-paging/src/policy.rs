use serde::{Deserialize, Serialize};

use crate::estimate::{SizeEstimator, CHARS_PER_TOKEN};
use crate::format::ResponseFormatter;
use crate::model::DEFAULT_MAX_TOKENS;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingPolicyView {
    /// When off, page state is returned whole regardless of size.
    pub enabled: bool,
    pub default_max_tokens: i64,
    pub chars_per_token: usize,
    pub show_digest: bool,
}

impl PagingPolicyView {
    pub fn estimator(&self) -> SizeEstimator {
        SizeEstimator::new(self.chars_per_token)
    }

    pub fn formatter(&self) -> ResponseFormatter {
        ResponseFormatter::new().with_digest(self.show_digest)
    }
}

impl Default for PagingPolicyView {
    fn default() -> Self {
        Self {
            enabled: true,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            chars_per_token: CHARS_PER_TOKEN,
            show_digest: true,
        }
    }
}
