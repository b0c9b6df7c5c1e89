use pms::commands::{Command, Registry, builtin};
use pms::error::CommandError;
use pms::keys::{KeyEvent, parse_sequence};
use pms::list::Song;
use pms::parser::Parser;
use pms::ports::{Disconnected, Notifier, UiEvent};
use pms::session::{Api, Session};

fn registry(verbs: &[&str]) -> Registry {
    let mut registry = Registry::new();
    for verb in verbs {
        let factory = builtin(verb).expect("verb should be builtin");
        registry.register(verb, factory).expect("verb registers once");
    }
    registry
}

fn session(registry: Registry, songs: usize) -> (Session, flume::Receiver<UiEvent>) {
    let (notifier, events) = Notifier::bounded(64);
    let mut api = Api::new(notifier, Box::new(Disconnected));
    api.list = (0..songs)
        .map(|index| Song::new(format!("song{index}.flac")))
        .collect::<Vec<_>>()
        .into();
    (Session::new(registry, api), events)
}

#[derive(Debug, Default)]
struct Style;

impl Command for Style {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        api.notifier.message("styled");
        Ok(())
    }
}

fn style(_api: &Api) -> Box<dyn Command> {
    Box::new(Style)
}

#[test]
fn bound_key_should_drive_cursor_through_dispatcher() {
    let (mut session, events) = session(registry(&["cursor", "select"]), 10);
    let sequence = parse_sequence("j").expect("j parses");
    session
        .api_mut()
        .keymaps
        .bind("global", sequence, "cursor down")
        .expect("bind global j");

    for _ in 0..3 {
        session.key_input(KeyEvent::char('j'));
    }
    assert_eq!(session.api().list.cursor(), 3);
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![UiEvent::ListChanged; 3]
    );
}

#[test]
fn tab_completion_should_cycle_verbs_alphabetically() {
    let mut registry = registry(&["stop", "sort", "set", "select"]);
    registry.register("style", style).expect("style registers");
    let err = registry.register("set", style).expect_err("set is taken");
    assert_eq!(err.to_string(), "command 'set' is already registered");
    let (mut session, events) = session(registry, 0);

    let mut line = "s".to_string();
    let mut seen = Vec::new();
    for _ in 0..6 {
        line = session.tab_complete(&line).expect("candidates exist");
        seen.push(line.clone());
    }
    assert_eq!(
        seen,
        vec!["select", "set", "sort", "stop", "style", "select"]
    );
    session.exec("style").expect("custom command runs");
    assert_eq!(events.try_iter().count(), 1);
}

#[test]
fn visual_selection_should_fold_into_manual_selection() {
    let (mut session, _events) = session(registry(&["cursor", "select", "cut"]), 8);
    for line in [
        "select toggle",
        "cursor 3",
        "select visual",
        "cursor 5",
        "select commit",
    ] {
        session.exec(line).expect("command line should succeed");
    }
    assert_eq!(session.api().list.selection_indices(), vec![0, 2, 3, 4]);

    session.exec("cut").expect("cut selection");
    let uris: Vec<&str> = session
        .api()
        .list
        .items()
        .iter()
        .map(|song| song.uri.as_str())
        .collect();
    assert_eq!(uris, vec!["song1.flac", "song5.flac", "song6.flac", "song7.flac"]);
}
