use quadview_core::catalog::{Direction, SetCatalog};

fn catalog(n: usize) -> SetCatalog {
    SetCatalog::new((1..=n).map(|i| format!("{i:04}")).collect())
}

#[test]
fn test_empty_catalog() {
    let mut c = SetCatalog::new(Vec::new());
    assert!(c.is_empty());
    assert_eq!(c.index(), -1);
    assert_eq!(c.current(), None);
    assert_eq!(c.step(Direction::Next), None);
    assert_eq!(c.step(Direction::Previous), None);
    assert_eq!(c.index(), -1);
}

#[test]
fn test_first_step_selects_first_set() {
    let mut c = catalog(3);
    assert_eq!(c.index(), -1);
    assert_eq!(c.step(Direction::Next), Some("0001"));
    assert_eq!(c.index(), 0);
}

#[test]
fn test_next_wraps_from_last_to_first() {
    let mut c = catalog(3);
    c.select(2);
    assert_eq!(c.step(Direction::Next), Some("0001"));
    assert_eq!(c.index(), 0);
}

#[test]
fn test_previous_wraps_from_first_to_last() {
    let mut c = catalog(3);
    c.select(0);
    assert_eq!(c.step(Direction::Previous), Some("0003"));
    assert_eq!(c.index(), 2);
}

#[test]
fn test_selecting_current_index_is_noop() {
    let mut c = catalog(3);
    assert_eq!(c.select(1), Some("0002"));
    assert_eq!(c.select(1), None);
    assert_eq!(c.index(), 1);
}

#[test]
fn test_single_set_navigation_is_noop() {
    let mut c = catalog(1);
    c.select(0);
    assert_eq!(c.step(Direction::Next), None);
    assert_eq!(c.step(Direction::Previous), None);
}

#[test]
fn test_out_of_range_select_rejected() {
    let mut c = catalog(2);
    assert_eq!(c.select(2), None);
    assert_eq!(c.index(), -1);
}

#[test]
fn test_select_by_id() {
    let mut c = catalog(4);
    assert_eq!(c.select_id("0003"), Some("0003"));
    assert_eq!(c.index(), 2);
    assert_eq!(c.select_id("9999"), None);
    assert_eq!(c.index(), 2);
}
