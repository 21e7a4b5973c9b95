//! Dashboard and report aggregates computed from the record collections.

use crate::models::{Failure, Solution};
use crate::query::{sort_failures, sort_solutions, FailureSort, SolutionSort};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Landing-page dashboard numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    /// Total seeded failures
    pub total_failures: u64,

    /// Total seeded solutions
    pub total_solutions: u64,

    /// Failures with Critical priority
    pub critical_failures: u64,

    /// Share of failures in Resolved or Closed status, 0–100
    pub resolution_rate: f64,

    /// Most recent failures
    pub recent_failures: Vec<Failure>,

    /// Most used solutions
    pub top_solutions: Vec<Solution>,
}

/// Failures-per-tag leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub failures: u64,
    pub percentage: f64,
}

/// One month of failure/solution volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month key, `YYYY-MM`
    pub month: String,
    pub failures: u64,
    pub solutions: u64,
}

/// Report aggregates for the reports view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Current status distribution
    pub status_breakdown: HashMap<String, u64>,

    /// Top tags by failure count
    pub top_tags: Vec<TagCount>,

    /// Failure/solution volume per month, chronological
    pub monthly_trend: Vec<MonthlyCount>,
}

/// Number of entries in the overview's recent/top lists
pub const OVERVIEW_LIMIT: usize = 3;

/// Number of tags on the report leaderboard
pub const TOP_TAG_LIMIT: usize = 5;

/// The N most recent failures
pub fn recent_failures(failures: &[Failure], limit: usize) -> Vec<Failure> {
    let mut ordered = failures.to_vec();
    sort_failures(&mut ordered, FailureSort::DateDesc);
    ordered.truncate(limit);
    ordered
}

/// The N most used solutions
pub fn top_solutions_by_uses(solutions: &[Solution], limit: usize) -> Vec<Solution> {
    let mut ordered = solutions.to_vec();
    sort_solutions(&mut ordered, SolutionSort::Uses);
    ordered.truncate(limit);
    ordered
}

/// Build the dashboard overview
pub fn overview(failures: &[Failure], solutions: &[Solution]) -> Overview {
    let total_failures = failures.len() as u64;
    let resolved = failures.iter().filter(|f| f.is_resolved()).count() as u64;
    let resolution_rate = if total_failures == 0 {
        0.0
    } else {
        round1(resolved as f64 / total_failures as f64 * 100.0)
    };

    Overview {
        total_failures,
        total_solutions: solutions.len() as u64,
        critical_failures: failures.iter().filter(|f| f.is_critical()).count() as u64,
        resolution_rate,
        recent_failures: recent_failures(failures, OVERVIEW_LIMIT),
        top_solutions: top_solutions_by_uses(solutions, OVERVIEW_LIMIT),
    }
}

/// Build the report aggregates
pub fn report(failures: &[Failure], solutions: &[Solution]) -> Report {
    Report {
        status_breakdown: status_breakdown(failures),
        top_tags: top_tags(failures, TOP_TAG_LIMIT),
        monthly_trend: monthly_trend(failures, solutions),
    }
}

fn status_breakdown(failures: &[Failure]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for failure in failures {
        *counts.entry(failure.status.label().to_string()).or_insert(0) += 1;
    }
    counts
}

fn top_tags(failures: &[Failure], limit: usize) -> Vec<TagCount> {
    let total = failures.len() as f64;
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for failure in failures {
        for tag in &failure.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_string(),
            failures: count,
            percentage: if total == 0.0 {
                0.0
            } else {
                round1(count as f64 / total * 100.0)
            },
        })
        .collect();

    // count descending, name ascending for deterministic ties
    tags.sort_by(|a, b| b.failures.cmp(&a.failures).then(a.name.cmp(&b.name)));
    tags.truncate(limit);
    tags
}

fn monthly_trend(failures: &[Failure], solutions: &[Solution]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for failure in failures {
        let key = failure.created_at.format("%Y-%m").to_string();
        months.entry(key).or_default().0 += 1;
    }
    for solution in solutions {
        let key = solution.created_at.format("%Y-%m").to_string();
        months.entry(key).or_default().1 += 1;
    }

    months
        .into_iter()
        .map(|(month, (failures, solutions))| MonthlyCount {
            month,
            failures,
            solutions,
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::load_seed;

    #[test]
    fn test_overview_counts() {
        let seed = load_seed().unwrap();
        let overview = overview(&seed.failures, &seed.solutions);

        assert_eq!(overview.total_failures, 8);
        assert_eq!(overview.total_solutions, 10);
        assert_eq!(overview.critical_failures, 1);
        // 2 of 8 failures are Resolved
        assert_eq!(overview.resolution_rate, 25.0);
    }

    #[test]
    fn test_overview_recent_and_top_lists() {
        let seed = load_seed().unwrap();
        let overview = overview(&seed.failures, &seed.solutions);

        let recent_ids: Vec<u32> = overview.recent_failures.iter().map(|f| f.id).collect();
        assert_eq!(recent_ids, vec![8, 7, 6]);

        let top_ids: Vec<u32> = overview.top_solutions.iter().map(|s| s.id).collect();
        assert_eq!(top_ids, vec![3, 1, 4]); // 52, 45, 41 uses
    }

    #[test]
    fn test_status_breakdown() {
        let seed = load_seed().unwrap();
        let report = report(&seed.failures, &seed.solutions);

        assert_eq!(report.status_breakdown.get("Open"), Some(&4));
        assert_eq!(report.status_breakdown.get("In Analysis"), Some(&2));
        assert_eq!(report.status_breakdown.get("Resolved"), Some(&2));
        assert_eq!(report.status_breakdown.get("Closed"), None);
    }

    #[test]
    fn test_top_tags_leaderboard() {
        let seed = load_seed().unwrap();
        let report = report(&seed.failures, &seed.solutions);

        assert_eq!(report.top_tags.len(), TOP_TAG_LIMIT);
        // Backend appears on failures 2, 3, 6, 7
        assert_eq!(report.top_tags[0].name, "Backend");
        assert_eq!(report.top_tags[0].failures, 4);
        assert_eq!(report.top_tags[0].percentage, 50.0);

        // leaderboard counts never increase down the list
        assert!(report
            .top_tags
            .windows(2)
            .all(|w| w[0].failures >= w[1].failures));
    }

    #[test]
    fn test_monthly_trend_is_chronological() {
        let seed = load_seed().unwrap();
        let report = report(&seed.failures, &seed.solutions);

        let months: Vec<&str> = report.monthly_trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);

        let jan = &report.monthly_trend[0];
        assert_eq!(jan.failures, 1); // failure 1
        assert_eq!(jan.solutions, 2); // solutions 1, 7

        let feb = &report.monthly_trend[1];
        assert_eq!(feb.failures, 5); // failures 2-6
        assert_eq!(feb.solutions, 7); // solutions 2-6, 8, 9

        let mar = &report.monthly_trend[2];
        assert_eq!(mar.failures, 2); // failures 7, 8
        assert_eq!(mar.solutions, 1); // solution 10
    }
}
