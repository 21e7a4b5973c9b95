//! Comparator-driven ordering for the record collections.

use crate::models::{Failure, Solution};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort keys for failure listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailureSort {
    #[default]
    DateDesc,
    DateAsc,
    Priority,
    Status,
}

/// Sort keys for solution listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SolutionSort {
    #[default]
    Effectiveness,
    Uses,
    Likes,
    DateDesc,
    DateAsc,
}

/// Order failures in place. `sort_by` is stable, so ties keep input order.
pub fn sort_failures(failures: &mut [Failure], sort: FailureSort) {
    match sort {
        FailureSort::DateDesc => failures.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FailureSort::DateAsc => failures.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        FailureSort::Priority => {
            failures.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()))
        }
        FailureSort::Status => {
            failures.sort_by(|a, b| a.status.label().cmp(b.status.label()))
        }
    }
}

/// Order solutions in place.
pub fn sort_solutions(solutions: &mut [Solution], sort: SolutionSort) {
    match sort {
        SolutionSort::Effectiveness => solutions.sort_by(|a, b| {
            b.effectiveness
                .partial_cmp(&a.effectiveness)
                .unwrap_or(Ordering::Equal)
        }),
        SolutionSort::Uses => solutions.sort_by(|a, b| b.uses.cmp(&a.uses)),
        SolutionSort::Likes => solutions.sort_by(|a, b| b.likes.cmp(&a.likes)),
        SolutionSort::DateDesc => solutions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SolutionSort::DateAsc => solutions.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::store::seed::load_seed;

    #[test]
    fn test_sort_key_wire_names() {
        let key: FailureSort = serde_json::from_str("\"date-desc\"").unwrap();
        assert_eq!(key, FailureSort::DateDesc);

        let key: SolutionSort = serde_json::from_str("\"effectiveness\"").unwrap();
        assert_eq!(key, SolutionSort::Effectiveness);
    }

    #[test]
    fn test_priority_sort_orders_critical_first() {
        let seed = load_seed().unwrap();
        let mut failures = seed.failures;
        sort_failures(&mut failures, FailureSort::Priority);

        let ranks: Vec<u8> = failures.iter().map(|f| f.priority.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(failures[0].priority, Priority::Critical);
        assert_eq!(failures.last().unwrap().priority, Priority::Low);
    }

    #[test]
    fn test_date_desc_is_non_increasing() {
        let seed = load_seed().unwrap();
        let mut failures = seed.failures;
        sort_failures(&mut failures, FailureSort::DateDesc);

        assert!(failures
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_status_sort_is_label_lexicographic() {
        let seed = load_seed().unwrap();
        let mut failures = seed.failures;
        sort_failures(&mut failures, FailureSort::Status);

        let labels: Vec<&str> = failures.iter().map(|f| f.status.label()).collect();
        let mut expected = labels.clone();
        expected.sort();
        assert_eq!(labels, expected);
        // "Closed" < "In Analysis" < "Open" < "Resolved"
        assert_eq!(labels.first(), Some(&"In Analysis"));
    }

    #[test]
    fn test_solution_numeric_sorts_descend() {
        let seed = load_seed().unwrap();

        let mut by_uses = seed.solutions.clone();
        sort_solutions(&mut by_uses, SolutionSort::Uses);
        assert!(by_uses.windows(2).all(|w| w[0].uses >= w[1].uses));
        assert_eq!(by_uses[0].id, 3); // 52 uses

        let mut by_likes = seed.solutions.clone();
        sort_solutions(&mut by_likes, SolutionSort::Likes);
        assert!(by_likes.windows(2).all(|w| w[0].likes >= w[1].likes));

        let mut by_effectiveness = seed.solutions;
        sort_solutions(&mut by_effectiveness, SolutionSort::Effectiveness);
        assert!(by_effectiveness
            .windows(2)
            .all(|w| w[0].effectiveness >= w[1].effectiveness));
        assert_eq!(by_effectiveness[0].id, 1); // 4.8
    }

    #[test]
    fn test_ties_keep_input_order() {
        let seed = load_seed().unwrap();
        let mut failures = seed.failures;
        sort_failures(&mut failures, FailureSort::Priority);

        // High-priority failures are 1, 4, 7 in seed order
        let highs: Vec<u32> = failures
            .iter()
            .filter(|f| f.priority == Priority::High)
            .map(|f| f.id)
            .collect();
        assert_eq!(highs, vec![1, 4, 7]);
    }
}
