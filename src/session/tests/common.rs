use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::commands::Registry;
use crate::error::CommandError;
use crate::list::Song;
use crate::ports::{Notifier, PlaybackClient, PlaybackError, PlaybackStatus, UiEvent};
use crate::session::{Api, Session};

#[derive(Debug, Default)]
pub(super) struct PlaybackLog {
    pub calls: Vec<String>,
    pub status: PlaybackStatus,
    pub fail: Option<PlaybackError>,
}

/// Playback client that records every call into a shared log.
#[derive(Debug, Clone, Default)]
pub(super) struct RecordingPlayback(pub Rc<RefCell<PlaybackLog>>);

impl RecordingPlayback {
    fn record(&self, call: String) -> Result<(), PlaybackError> {
        let mut log = self.0.borrow_mut();
        if let Some(err) = &log.fail {
            return Err(err.clone());
        }
        log.calls.push(call);
        Ok(())
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }
}

impl PlaybackClient for RecordingPlayback {
    fn play(&mut self, uri: Option<&str>) -> Result<(), PlaybackError> {
        self.record(format!("play {}", uri.unwrap_or("-")))
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.record("pause".to_string())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.record("stop".to_string())
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        self.record(format!("seek {}", position.as_secs()))
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError> {
        self.record(format!("volume {volume}"))
    }

    fn next(&mut self) -> Result<(), PlaybackError> {
        self.record("next".to_string())
    }

    fn previous(&mut self) -> Result<(), PlaybackError> {
        self.record("previous".to_string())
    }

    fn status(&self) -> Result<PlaybackStatus, PlaybackError> {
        let log = self.0.borrow();
        if let Some(err) = &log.fail {
            return Err(err.clone());
        }
        Ok(log.status.clone())
    }
}

pub(super) struct Harness {
    pub session: Session,
    pub events: flume::Receiver<UiEvent>,
    pub playback: RecordingPlayback,
}

impl Harness {
    pub fn exec(&mut self, line: &str) -> Result<(), CommandError> {
        self.session.exec(line)
    }

    pub fn run(&mut self, line: &str) {
        self.session.exec(line).expect("command line should succeed");
    }

    pub fn drain(&self) -> Vec<UiEvent> {
        self.events.try_iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.session.api().list.cursor()
    }

    pub fn uris(&self) -> Vec<String> {
        self.session
            .api()
            .list
            .items()
            .iter()
            .map(|song| song.uri.clone())
            .collect()
    }
}

pub(super) fn song_uri(index: usize) -> String {
    format!("song{index}.flac")
}

/// A session over `len` songs. Track numbers run backwards so the default
/// sort reverses the list.
pub(super) fn harness(len: usize) -> Harness {
    let (notifier, events) = Notifier::bounded(64);
    let playback = RecordingPlayback::default();
    let mut api = Api::new(notifier, Box::new(playback.clone()));
    api.list = (0..len)
        .map(|index| {
            Song::new(song_uri(index))
                .with_tag("title", format!("Title {index}"))
                .with_tag("track", (len - index).to_string())
        })
        .collect::<Vec<_>>()
        .into();
    Harness {
        session: Session::new(Registry::builtin(), api),
        events,
        playback,
    }
}
