use crate::pager::{PageControl, ResultPager};
use crate::types::Record;

fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "deviceid": format!("dev-{i}"),
                "devicetime": "2024-01-01T00:00:00"
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn test_total_pages_is_ceil() {
    let mut pager = ResultPager::new(3);
    for (n, expected) in [(0, 0), (1, 1), (3, 1), (4, 2), (9, 3), (10, 4)] {
        pager.load(records(n), n);
        assert_eq!(pager.total_pages(), expected, "n={n}");
    }
}

#[test]
fn test_pages_partition_the_result_set() {
    // Concatenating every page in order must reproduce the result set
    // exactly once, with no gaps and no duplicates.
    for (n, page_size) in [(7, 3), (10, 4), (9, 3), (1, 100), (250, 100)] {
        let mut pager = ResultPager::new(page_size);
        pager.load(records(n), n);
        let mut seen = vec![];
        for page in 1..=pager.total_pages() {
            pager.go_to_page(page as i64);
            seen.extend(pager.page_slice().iter().cloned());
        }
        assert_eq!(seen, records(n), "n={n} page_size={page_size}");
    }
}

#[test]
fn test_go_to_page_clamps_at_the_boundaries() {
    let mut pager = ResultPager::new(10);
    pager.load(records(35), 35);

    pager.go_to_page(-5);
    assert_eq!(pager.current_page(), 1);
    let first_slice = pager.page_slice().to_vec();
    pager.go_to_page(1);
    assert_eq!(pager.page_slice(), &first_slice[..]);

    pager.go_to_page(99);
    assert_eq!(pager.current_page(), 4);
    let last_slice = pager.page_slice().to_vec();
    pager.go_to_page(4);
    assert_eq!(pager.page_slice(), &last_slice[..]);
}

#[test]
fn test_go_to_page_reports_changes() {
    let mut pager = ResultPager::new(10);
    pager.load(records(35), 35);
    assert!(!pager.go_to_page(1)); // already there
    assert!(pager.go_to_page(2));
    assert!(!pager.go_to_page(2));
    assert!(!pager.go_to_page(0)); // clamps back to 1, which changes the page
    assert_eq!(pager.current_page(), 1);
}

#[test]
fn test_load_resets_the_current_page() {
    let mut pager = ResultPager::new(10);
    pager.load(records(100), 100);
    pager.go_to_page(7);
    assert_eq!(pager.current_page(), 7);

    pager.load(records(50), 50);
    assert_eq!(pager.current_page(), 1);

    pager.go_to_page(3);
    pager.set_page_size(25);
    assert_eq!(pager.current_page(), 1);
    assert_eq!(pager.total_pages(), 2);
}

#[test]
fn test_page_two_of_250_records() {
    let mut pager = ResultPager::new(100);
    pager.load(records(250), 250);
    pager.go_to_page(2);

    let slice = pager.page_slice();
    assert_eq!(slice.len(), 100);
    assert_eq!(slice[0].device_id(), Some("dev-100"));
    assert_eq!(slice[99].device_id(), Some("dev-199"));
    assert_eq!(pager.page_range(), (101, 200));

    // Three pages fit the window entirely, so no ellipsis and no shortcuts.
    assert_eq!(
        pager.controls(),
        vec![
            PageControl::Previous { enabled: true },
            PageControl::Page { number: 1, active: false },
            PageControl::Page { number: 2, active: true },
            PageControl::Page { number: 3, active: false },
            PageControl::Next { enabled: true },
        ]
    );
}

#[test]
fn test_controls_with_ellipsis_on_both_sides() {
    let mut pager = ResultPager::new(10);
    pager.load(records(200), 200);
    pager.go_to_page(10);

    assert_eq!(
        pager.controls(),
        vec![
            PageControl::Previous { enabled: true },
            PageControl::Page { number: 1, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 8, active: false },
            PageControl::Page { number: 9, active: false },
            PageControl::Page { number: 10, active: true },
            PageControl::Page { number: 11, active: false },
            PageControl::Page { number: 12, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 20, active: false },
            PageControl::Next { enabled: true },
        ]
    );
}

#[test]
fn test_controls_near_the_left_edge() {
    let mut pager = ResultPager::new(10);
    pager.load(records(200), 200);
    pager.go_to_page(3);

    // The window [1, 5] touches page 1, so there is no first-page shortcut,
    // while the far edge still gets an ellipsis and the last page.
    assert_eq!(
        pager.controls(),
        vec![
            PageControl::Previous { enabled: true },
            PageControl::Page { number: 1, active: false },
            PageControl::Page { number: 2, active: false },
            PageControl::Page { number: 3, active: true },
            PageControl::Page { number: 4, active: false },
            PageControl::Page { number: 5, active: false },
            PageControl::Ellipsis,
            PageControl::Page { number: 20, active: false },
            PageControl::Next { enabled: true },
        ]
    );
}

#[test]
fn test_controls_without_inner_ellipsis() {
    // Window start == 2: the first-page shortcut appears without an ellipsis.
    let mut pager = ResultPager::new(10);
    pager.load(records(200), 200);
    pager.go_to_page(4);

    let controls = pager.controls();
    assert_eq!(controls[1], PageControl::Page { number: 1, active: false });
    assert_eq!(controls[2], PageControl::Page { number: 2, active: false });
    // Only the far edge is collapsed.
    assert_eq!(controls.iter().filter(|c| **c == PageControl::Ellipsis).count(), 1);
}

#[test]
fn test_empty_result_set() {
    let mut pager = ResultPager::new(100);
    pager.load(vec![], 0);
    assert!(pager.is_empty());
    assert_eq!(pager.total_pages(), 0);
    assert_eq!(pager.page_slice(), &[] as &[Record]);
    assert!(!pager.go_to_page(5));
    assert_eq!(pager.current_page(), 1);
    assert_eq!(
        pager.controls(),
        vec![
            PageControl::Previous { enabled: false },
            PageControl::Page { number: 1, active: true },
            PageControl::Next { enabled: false },
        ]
    );
}

#[test]
fn test_zero_page_size_is_clamped() {
    let mut pager = ResultPager::new(0);
    pager.load(records(5), 5);
    assert_eq!(pager.page_size(), 1);
    pager.set_page_size(0);
    assert_eq!(pager.page_size(), 1);
    assert_eq!(pager.total_pages(), 5);
}
