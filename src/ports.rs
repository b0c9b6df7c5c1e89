//! Outbound interfaces to the renderer and the playback backend.

use std::time::Duration;

use flume::TrySendError;
use thiserror::Error;
use tracing::{error, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// Everything the renderer needs to hear about, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ListChanged,
    OptionChanged(String),
    Message { level: MessageLevel, text: String },
    Quit,
}

/// Sending half of the bounded queue between the command core and the
/// renderer. Sends never block: on a full queue the event is dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    event_tx: flume::Sender<UiEvent>,
}

impl Notifier {
    pub fn bounded(capacity: usize) -> (Self, flume::Receiver<UiEvent>) {
        let (event_tx, event_rx) = flume::bounded(capacity);
        (Self { event_tx }, event_rx)
    }

    pub fn send(&self, event: UiEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                trace!("ui event queue full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(event)) => {
                error!("ui event queue disconnected, dropping {:?}", event);
            }
        }
    }

    pub fn message(&self, text: impl Into<String>) {
        self.send(UiEvent::Message {
            level: MessageLevel::Info,
            text: text.into(),
        });
    }

    pub fn error(&self, text: impl Into<String>) {
        self.send(UiEvent::Message {
            level: MessageLevel::Error,
            text: text.into(),
        });
    }

    pub fn list_changed(&self) {
        self.send(UiEvent::ListChanged);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("playback backend unavailable")]
    Unavailable,
    #[error("playback backend timed out")]
    Timeout,
    #[error("playback backend rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub volume: u8,
    pub elapsed: Duration,
    pub current: Option<String>,
}

/// Client for the playback backend. Calls may block on the network; errors
/// are reported as-is and never retried here.
pub trait PlaybackClient {
    fn play(&mut self, uri: Option<&str>) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError>;
    fn next(&mut self) -> Result<(), PlaybackError>;
    fn previous(&mut self) -> Result<(), PlaybackError>;
    fn status(&self) -> Result<PlaybackStatus, PlaybackError>;
}

/// Stand-in used until a backend connection exists.
#[derive(Debug, Default)]
pub struct Disconnected;

impl PlaybackClient for Disconnected {
    fn play(&mut self, _uri: Option<&str>) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn seek(&mut self, _position: Duration) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn set_volume(&mut self, _volume: u8) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn next(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn previous(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::Unavailable)
    }

    fn status(&self) -> Result<PlaybackStatus, PlaybackError> {
        Err(PlaybackError::Unavailable)
    }
}
