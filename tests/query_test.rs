//! Properties of the query, sort, and pagination layers over the seeded data

use kfix::models::Priority;
use kfix::query::{
    page_window, search_failures, search_solutions, sort_failures, sort_solutions, FailureSort,
    Page, PageMark, SolutionSort,
};
use kfix::store::load_seed;

#[test]
fn empty_search_returns_full_collections() {
    let seed = load_seed().unwrap();

    assert_eq!(
        search_failures(&seed.failures, "", &[]).len(),
        seed.failures.len()
    );
    assert_eq!(
        search_solutions(&seed.solutions, "", &[]).len(),
        seed.solutions.len()
    );
}

#[test]
fn every_record_is_found_by_each_of_its_own_tags() {
    let seed = load_seed().unwrap();

    for failure in &seed.failures {
        for tag in &failure.tags {
            let hits = search_failures(&seed.failures, "", std::slice::from_ref(tag));
            assert!(hits.iter().any(|f| f.id == failure.id));
        }
    }

    for solution in &seed.solutions {
        for tag in &solution.tags {
            let hits = search_solutions(&seed.solutions, "", std::slice::from_ref(tag));
            assert!(hits.iter().any(|s| s.id == solution.id));
        }
    }
}

#[test]
fn priority_sort_orders_critical_high_medium_low() {
    let seed = load_seed().unwrap();
    let mut failures = seed.failures;
    sort_failures(&mut failures, FailureSort::Priority);

    let mut last_rank = u8::MAX;
    for failure in &failures {
        assert!(failure.priority.rank() <= last_rank);
        last_rank = failure.priority.rank();
    }
    assert_eq!(failures[0].priority, Priority::Critical);
}

#[test]
fn date_desc_is_non_increasing_for_both_collections() {
    let seed = load_seed().unwrap();

    let mut failures = seed.failures;
    sort_failures(&mut failures, FailureSort::DateDesc);
    assert!(failures
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));

    let mut solutions = seed.solutions;
    sort_solutions(&mut solutions, SolutionSort::DateDesc);
    assert!(solutions
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn fourteen_items_page_size_six_page_two_yields_items_seven_through_twelve() {
    let items: Vec<u32> = (1..=14).collect();
    let page = Page::slice(items, 2, 6);

    assert_eq!(page.items, vec![7, 8, 9, 10, 11, 12]);
    assert_eq!(page.total_pages, 3);
}

#[test]
fn window_for_page_five_of_ten() {
    use PageMark::{Ellipsis, Page as P};

    assert_eq!(
        page_window(5, 10),
        vec![P(1), Ellipsis, P(3), P(4), P(5), P(6), P(7), Ellipsis, P(10)]
    );
}

#[test]
fn filtering_then_sorting_composes() {
    let seed = load_seed().unwrap();

    // successive passes the way the handlers compose them
    let mut result = search_failures(&seed.failures, "", &["Backend".to_string()]);
    result.retain(|f| f.priority != Priority::Low);
    sort_failures(&mut result, FailureSort::Priority);

    let ids: Vec<u32> = result.iter().map(|f| f.id).collect();
    // Backend-tagged failures are 2, 3, 6, 7; dropping Low leaves 2 (Critical),
    // 7 (High), 3 (Medium)
    assert_eq!(ids, vec![2, 7, 3]);
}
