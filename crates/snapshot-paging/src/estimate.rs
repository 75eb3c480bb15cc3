/// Characters counted as one token by the size heuristic.
pub const CHARS_PER_TOKEN: usize = 4;

/// Approximates the token size of snapshot text without a tokenizer.
///
/// Size is `ceil(chars / chars_per_token)` over Unicode scalar values. A paginator
/// holds exactly one estimator so the fit check and the page-boundary search agree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeEstimator {
    chars_per_token: usize,
}

impl SizeEstimator {
    /// A ratio of zero is clamped to one character per token.
    pub const fn new(chars_per_token: usize) -> Self {
        let chars_per_token = if chars_per_token == 0 {
            1
        } else {
            chars_per_token
        };
        Self { chars_per_token }
    }

    pub fn estimate(&self, text: &str) -> usize {
        self.tokens_for_chars(text.chars().count())
    }

    pub fn tokens_for_chars(&self, chars: usize) -> usize {
        chars / self.chars_per_token + usize::from(chars % self.chars_per_token != 0)
    }
}

impl Default for SizeEstimator {
    fn default() -> Self {
        Self::new(CHARS_PER_TOKEN)
    }
}

/// Estimates with the default ratio.
pub fn estimate(text: &str) -> usize {
    SizeEstimator::default().estimate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(estimate(""), 0);
    }

    #[test]
    fn rounds_partial_tokens_up() {
        assert_eq!(estimate("a"), 1);
        assert_eq!(estimate("abcd"), 1);
        assert_eq!(estimate("abcde"), 2);
        assert_eq!(estimate(&"x".repeat(96_000)), 24_000);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // four scalar values, nine bytes
        let text = "⚠️né";
        assert_eq!(text.chars().count(), 4);
        assert_eq!(estimate(text), 1);
    }

    #[test]
    fn zero_ratio_is_clamped() {
        let estimator = SizeEstimator::new(0);
        assert_eq!(estimator, SizeEstimator::new(1));
        assert_eq!(estimator.estimate("abc"), 3);
    }
}
