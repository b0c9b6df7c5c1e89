use super::common::harness;
use crate::keys::parse_sequence;

#[test]
fn tab_complete_should_cycle_on_the_returned_line() {
    let mut h = harness(3);
    assert_eq!(h.session.tab_complete("cu").as_deref(), Some("cursor"));
    assert_eq!(h.session.tab_complete("cursor").as_deref(), Some("cut"));
    assert_eq!(h.session.tab_complete("cut").as_deref(), Some("cursor"));
}

#[test]
fn tab_complete_should_restart_on_an_edited_line() {
    let mut h = harness(3);
    assert_eq!(h.session.tab_complete("cu").as_deref(), Some("cursor"));
    assert_eq!(
        h.session.tab_complete("cursor ").as_deref(),
        Some("cursor current")
    );
    assert_eq!(
        h.session.tab_complete("cursor current").as_deref(),
        Some("cursor down")
    );
}

#[test]
fn tab_complete_should_restart_after_a_line_runs() {
    let mut h = harness(3);
    assert_eq!(h.session.tab_complete("cu").as_deref(), Some("cursor"));
    h.session.run_line("select all");
    assert_eq!(h.session.tab_complete("cursor").as_deref(), Some("cursor"));
}

#[test]
fn tab_complete_should_return_none_without_candidates() {
    let mut h = harness(3);
    assert_eq!(h.session.tab_complete("xyz"), None);
    assert_eq!(h.session.tab_complete("quit "), None);
}

#[test]
fn tab_complete_should_not_have_side_effects() {
    let mut h = harness(5);
    h.session.tab_complete("bind list x cursor d");
    h.session.tab_complete("quit ");
    h.session.tab_complete("set center ");
    h.session.tab_complete("cut ");
    h.session.tab_complete("select all ");

    let api = h.session.api();
    let x = parse_sequence("x").expect("x parses");
    let bound = api
        .keymaps
        .context("list")
        .expect("list context exists")
        .bindings()
        .iter()
        .any(|binding| binding.sequence == x);
    assert!(!bound);
    assert!(!h.session.quit_requested());
    assert_eq!(api.options.get_bool("center"), Some(false));
    assert_eq!(api.list.len(), 5);
    assert!(!api.list.has_selection());
    assert!(h.drain().is_empty());
}
