use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pms::commands::Registry;
use pms::config::Config;
use pms::list::{Song, Songlist};
use pms::logging;
use pms::ports::{Disconnected, MessageLevel, Notifier, UiEvent};
use pms::session::{Api, Session};

const EVENT_QUEUE_CAPACITY: usize = 256;

/// Line-oriented shell over the pms command language.
#[derive(Debug, clap::Parser)]
#[command(version)]
struct Args {
    /// Configuration file. Defaults to pms/config.toml in the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Command line to run after startup. May be repeated.
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,
    /// Song URIs to load into the list.
    songs: Vec<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("load config failed")?;
    logging::init_logging(config.log_filter.as_deref()).context("initialize logging failed")?;

    let (notifier, events) = Notifier::bounded(EVENT_QUEUE_CAPACITY);
    let mut api = Api::new(notifier, Box::new(Disconnected));
    api.list = args.songs.iter().map(Song::new).collect::<Vec<_>>().into();
    let mut session = Session::new(Registry::builtin(), api);

    session.apply_config(&config);
    for command in &args.commands {
        session.run_line(command);
    }
    drain(&events, &session.api().list);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read command line failed")?;
        // A trailing tab asks for completions instead of running the line.
        if let Some(partial) = line.strip_suffix('\t') {
            let mut completions: Vec<String> = Vec::new();
            let mut current = partial.to_string();
            while let Some(next) = session.tab_complete(&current) {
                if completions.first() == Some(&next) {
                    break;
                }
                completions.push(next.clone());
                current = next;
            }
            for completion in completions {
                println!("{completion}");
            }
            continue;
        }
        session.run_line(&line);
        drain(&events, &session.api().list);
        if session.quit_requested() {
            break;
        }
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path).with_context(|| format!("config file {}", path.display()));
    }
    let path = Config::default_path();
    if !path.exists() {
        return Ok(Config::default());
    }
    Config::load(&path).with_context(|| format!("config file {}", path.display()))
}

fn drain(events: &flume::Receiver<UiEvent>, list: &Songlist) {
    let mut list_changed = false;
    for event in events.try_iter() {
        match event {
            UiEvent::ListChanged => list_changed = true,
            UiEvent::OptionChanged(key) => println!("option changed: {key}"),
            UiEvent::Message {
                level: MessageLevel::Info,
                text,
            } => println!("{text}"),
            UiEvent::Message {
                level: MessageLevel::Error,
                text,
            } => eprintln!("error: {text}"),
            UiEvent::Quit => {}
        }
    }
    if list_changed {
        print_list(list);
    }
}

fn print_list(list: &Songlist) {
    for (index, song) in list.items().iter().enumerate() {
        let cursor = if index == list.cursor() { '>' } else { ' ' };
        let selected = if list.selected(index) { '*' } else { ' ' };
        println!("{cursor}{selected} {:>3} {}", index + 1, song.uri);
    }
}
