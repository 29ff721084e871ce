//! Page-range filtering: which source pages counted as statement content.
//!
//! Classification happens upstream; this only filters and expands the ranges
//! it is handed.

use std::collections::BTreeSet;

use crate::statement::{PageRange, PageType};

/// Keep statement and attachment pages, drop promotional and blank ones.
pub fn filter_relevant(page_ranges: Vec<PageRange>) -> Vec<PageRange> {
    page_ranges
        .into_iter()
        .filter(|pr| matches!(pr.page_type, PageType::Statement | PageType::Attachment))
        .collect()
}

/// Sorted, de-duplicated page numbers covered by the ranges.
pub fn page_numbers(page_ranges: &[PageRange]) -> Vec<u32> {
    let mut pages = BTreeSet::new();
    for pr in page_ranges {
        for page in pr.start..=pr.end {
            pages.insert(page);
        }
    }
    pages.into_iter().collect()
}
