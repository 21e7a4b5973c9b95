//! Query layer: free-text + tag filtering over the record collections.
//!
//! These are pure functions over slices. Additional predicate filters
//! (status, priority, author, date window, effectiveness band) are applied by
//! the caller as successive passes; composition lives at the call site.

pub mod page;
pub mod sort;

pub use page::{page_window, Page, PageMark};
pub use sort::{sort_failures, sort_solutions, FailureSort, SolutionSort};

use crate::models::{Failure, Solution};

/// Keep failures where the query matches title/description/any tag and every
/// requested tag has a case-insensitive substring match against some record
/// tag. Empty query and empty tag set both match all.
pub fn search_failures(records: &[Failure], query: &str, tags: &[String]) -> Vec<Failure> {
    records
        .iter()
        .filter(|failure| {
            let matches_query = query.is_empty() || failure.matches_text(query);
            let matches_tags = tags.iter().all(|tag| failure.has_tag_matching(tag));
            matches_query && matches_tags
        })
        .cloned()
        .collect()
}

/// Solution counterpart of [`search_failures`], same matching rules.
pub fn search_solutions(records: &[Solution], query: &str, tags: &[String]) -> Vec<Solution> {
    records
        .iter()
        .filter(|solution| {
            let matches_query = query.is_empty() || solution.matches_text(query);
            let matches_tags = tags.iter().all(|tag| solution.has_tag_matching(tag));
            matches_query && matches_tags
        })
        .cloned()
        .collect()
}
