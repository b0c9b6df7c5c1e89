use super::common::harness;
use crate::config::Config;
use crate::error::{BindError, CommandError, GrammarError, KeySpecError};
use crate::keys::{KeyEvent, KeyMatch, parse_sequence};

fn press(h: &mut super::common::Harness, spec: &str) -> Vec<KeyMatch> {
    let sequence = parse_sequence(spec).expect("key spec should parse");
    sequence
        .events()
        .iter()
        .map(|event| h.session.key_input(*event))
        .collect()
}

#[test]
fn key_input_should_run_bound_command() {
    let mut h = harness(10);
    h.run("bind list j cursor down");
    let results = press(&mut h, "jj");
    assert_eq!(
        results,
        vec![
            KeyMatch::Matched("cursor down".to_string()),
            KeyMatch::Matched("cursor down".to_string()),
        ]
    );
    assert_eq!(h.cursor(), 2);
}

#[test]
fn default_bindings_should_resolve_multi_key_sequences() {
    let mut h = harness(10);
    h.session.apply_config(&Config::default());
    press(&mut h, "G");
    assert_eq!(h.cursor(), 9);
    assert_eq!(press(&mut h, "g"), vec![KeyMatch::Pending]);
    assert_eq!(h.cursor(), 9);
    press(&mut h, "g");
    assert_eq!(h.cursor(), 0);
}

#[test]
fn global_bindings_should_apply_in_list_context() {
    let mut h = harness(3);
    h.session.apply_config(&Config::default());
    assert_eq!(h.session.api().context, "list");
    press(&mut h, "q");
    assert!(h.session.quit_requested());
}

#[test]
fn list_bindings_should_not_apply_in_global_context() {
    let mut h = harness(3);
    h.run("bind list j cursor down");
    h.session.set_context("global").expect("global is a context");
    assert_eq!(press(&mut h, "j"), vec![KeyMatch::NoMatch]);
    assert_eq!(h.cursor(), 0);

    let err = h.session.set_context("popup").expect_err("unknown context");
    assert_eq!(err, GrammarError::UnknownContext("popup".to_string()));
}

#[test]
fn bind_should_reject_prefix_conflicts_and_bad_specs() {
    let mut h = harness(3);
    h.run("bind list gg cursor home");

    let err = h.exec("bind list g cursor end").expect_err("prefix conflict");
    assert!(matches!(err, CommandError::Bind(BindError::Conflict { .. })));

    let err = h.exec("bind list <C-a cursor end").expect_err("unclosed bracket");
    assert!(matches!(err, CommandError::KeySpec(KeySpecError::Malformed { .. })));

    let err = h.exec("bind popup x quit").expect_err("unknown context");
    assert!(matches!(err, CommandError::Grammar(GrammarError::UnknownContext(_))));

    let err = h.exec("bind list x").expect_err("missing command");
    assert!(matches!(err, CommandError::Grammar(GrammarError::Unexpected { .. })));
}

#[test]
fn unbind_should_free_sequence_for_rebinding() {
    let mut h = harness(5);
    h.run("bind list j cursor down");
    let err = h.exec("bind list j cursor up").expect_err("rebinding needs unbind");
    assert!(matches!(err, CommandError::Bind(BindError::Conflict { .. })));

    h.run("unbind list j");
    h.run("bind list j cursor end");
    h.session.key_input(KeyEvent::char('j'));
    assert_eq!(h.cursor(), 4);

    let err = h.exec("unbind list k").expect_err("k is not bound");
    assert!(matches!(err, CommandError::Bind(BindError::NotBound(_))));
}

#[test]
fn bound_command_text_should_keep_quoting() {
    let mut h = harness(2);
    h.run(r#"bind list t set "topbar=a b""#);
    h.session.key_input(KeyEvent::char('t'));
    assert_eq!(h.session.api().options.get_str("topbar"), Some("a b"));
}
