use crate::types::PageIndexSet;
use std::collections::BTreeSet;
use tracing::debug;

/// Parses expressions such as `1-3, 5, 8-10` into zero-based page indices.
///
/// Parsing is lenient: a token that is not a number, an inverted range, or a
/// page outside `1..=max_pages` is dropped on its own and never voids the
/// rest of the list.
pub struct PageRangeParser;

impl PageRangeParser {
    pub fn parse(expression: &str, max_pages: usize) -> PageIndexSet {
        if expression.trim().is_empty() {
            return PageIndexSet::default();
        }

        let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        let mut indices = BTreeSet::new();

        for token in compact.split(',') {
            if token.contains('-') {
                // Only the first two fields count, so `1-2-3` reads as `1-2`.
                let mut fields = token.split('-');
                let start = fields.next().unwrap_or_default();
                let end = fields.next().unwrap_or_default();
                match (start.parse::<i64>(), end.parse::<i64>()) {
                    (Ok(start), Ok(end)) if start <= end => {
                        Self::add_range(&mut indices, start, end, max_pages);
                    }
                    _ => debug!("Dropping page range token '{}'", token),
                }
            } else {
                match token.parse::<i64>() {
                    Ok(page) => Self::add_range(&mut indices, page, page, max_pages),
                    Err(_) => debug!("Dropping page token '{}'", token),
                }
            }
        }

        PageIndexSet::from_sorted(indices.into_iter().collect())
    }

    /// The expression covering every page, e.g. `1-12`.
    pub fn full_range(max_pages: usize) -> String {
        match max_pages {
            0 => String::new(),
            1 => "1".to_string(),
            n => format!("1-{}", n),
        }
    }

    fn add_range(indices: &mut BTreeSet<usize>, start: i64, end: i64, max_pages: usize) {
        // Clamp first so `1-4000000000` only walks the pages that exist.
        let lo = start.max(1);
        let hi = end.min(max_pages as i64);
        if lo > hi {
            return;
        }
        for page in lo..=hi {
            indices.insert((page - 1) as usize);
        }
    }
}
