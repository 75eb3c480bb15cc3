use tracing::warn;

use crate::estimate::SizeEstimator;
use crate::model::Page;

/// Splits `text` into ordered pages whose estimated size stays within `max_tokens`.
///
/// Lines (each keeping its trailing `\n`) are appended greedily to the current page;
/// a page is closed at the last line break before the budget would be exceeded. A line
/// that alone exceeds the budget becomes its own oversized page: the bound is soft for
/// that case only, the line is never dropped or cut. Concatenating the returned pages
/// yields `text` byte for byte.
pub fn partition<'a>(text: &'a str, max_tokens: usize, estimator: &SizeEstimator) -> Vec<Page<'a>> {
    let max_tokens = max_tokens.max(1);
    let mut pages = Vec::new();
    let mut start = 0usize;
    let mut cursor = 0usize;
    let mut chars = 0usize;

    for line in text.split_inclusive('\n') {
        let line_chars = line.chars().count();

        if chars > 0 && estimator.tokens_for_chars(chars + line_chars) > max_tokens {
            push_page(&mut pages, &text[start..cursor], chars, estimator, false);
            start = cursor;
            chars = 0;
        }

        if chars == 0 && estimator.tokens_for_chars(line_chars) > max_tokens {
            let tokens = estimator.tokens_for_chars(line_chars);
            warn!(
                line_tokens = tokens,
                max_tokens,
                offset = cursor,
                "snapshot line exceeds page budget; emitting it as an oversized page"
            );
            cursor += line.len();
            push_page(&mut pages, &text[start..cursor], line_chars, estimator, true);
            start = cursor;
            continue;
        }

        chars += line_chars;
        cursor += line.len();
    }

    if chars > 0 {
        push_page(&mut pages, &text[start..cursor], chars, estimator, false);
    }
    pages
}

fn push_page<'a>(
    pages: &mut Vec<Page<'a>>,
    text: &'a str,
    chars: usize,
    estimator: &SizeEstimator,
    oversized: bool,
) {
    pages.push(Page {
        index: pages.len(),
        text,
        tokens: estimator.tokens_for_chars(chars),
        chars,
        oversized,
    });
}
