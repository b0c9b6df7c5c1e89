use std::time::Duration;

use super::{Amount, Command, identifier, strings};
use crate::error::{CommandError, ExecError, GrammarError};
use crate::lexer::Class;
use crate::parser::Parser;
use crate::ports::{PlaybackClient, PlaybackError};
use crate::session::Api;

pub(super) fn play(_api: &Api) -> Box<dyn Command> {
    Box::new(Play::default())
}

pub(super) fn pause(_api: &Api) -> Box<dyn Command> {
    Box::new(Transport(Action::Pause))
}

pub(super) fn stop(_api: &Api) -> Box<dyn Command> {
    Box::new(Transport(Action::Stop))
}

pub(super) fn next(_api: &Api) -> Box<dyn Command> {
    Box::new(Transport(Action::Next))
}

pub(super) fn previous(_api: &Api) -> Box<dyn Command> {
    Box::new(Transport(Action::Previous))
}

pub(super) fn seek(api: &Api) -> Box<dyn Command> {
    Box::new(Seek {
        step: step(api, "seekstep"),
        amount: Amount::Absolute(0),
    })
}

pub(super) fn volume(api: &Api) -> Box<dyn Command> {
    Box::new(Volume {
        step: step(api, "volumestep"),
        target: VolumeTarget::Mute,
        tab: Vec::new(),
    })
}

fn step(api: &Api, option: &str) -> i64 {
    api.options.get_int(option).unwrap_or(5)
}

/// A bare `+` or `-` means one `step`.
fn stepped(word: &str, step: i64) -> Result<Amount, GrammarError> {
    match word {
        "+" => Ok(Amount::Relative(step)),
        "-" => Ok(Amount::Relative(-step)),
        _ => Amount::parse(word),
    }
}

/// `play [cursor]`
#[derive(Debug, Default)]
struct Play {
    cursor: bool,
    tab: Vec<String>,
}

impl Command for Play {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(&["cursor"]);
        let token = parser.scan_ignore_whitespace();
        match token.class {
            Class::End => return Ok(()),
            Class::Identifier if token.text == "cursor" => self.cursor = true,
            _ => return Err(GrammarError::unexpected("'cursor' or end of line", token).into()),
        }
        self.tab.clear();
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        if !self.cursor {
            api.playback.play(None).map_err(ExecError::from)?;
            return Ok(());
        }
        let song = api.list.cursor_item().ok_or(ExecError::EmptyList)?;
        api.playback
            .play(Some(&song.uri))
            .map_err(ExecError::from)?;
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Pause,
    Stop,
    Next,
    Previous,
}

/// `pause`, `stop`, `next` and `prev`
#[derive(Debug)]
struct Transport(Action);

impl Transport {
    fn apply(&self, client: &mut dyn PlaybackClient) -> Result<(), PlaybackError> {
        match self.0 {
            Action::Pause => client.pause(),
            Action::Stop => client.stop(),
            Action::Next => client.next(),
            Action::Previous => client.previous(),
        }
    }
}

impl Command for Transport {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        self.apply(api.playback.as_mut()).map_err(ExecError::from)?;
        Ok(())
    }
}

/// `seek +N|-N|N|+|-`, in seconds.
#[derive(Debug)]
struct Seek {
    step: i64,
    amount: Amount,
}

impl Command for Seek {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        let word = parser.expect_identifier("seek position")?;
        self.amount = stepped(&word, self.step)?;
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        let position = match self.amount {
            Amount::Absolute(seconds) => Duration::from_secs(seconds),
            Amount::Relative(delta) => {
                let elapsed = api.playback.status().map_err(ExecError::from)?.elapsed;
                let offset = Duration::from_secs(delta.unsigned_abs());
                if delta < 0 {
                    elapsed.saturating_sub(offset)
                } else {
                    elapsed.saturating_add(offset)
                }
            }
        };
        api.playback.seek(position).map_err(ExecError::from)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeTarget {
    Mute,
    Amount(Amount),
}

/// `volume +N|-N|N|+|-|mute`, clamped to 0..=100.
#[derive(Debug)]
struct Volume {
    step: i64,
    target: VolumeTarget,
    tab: Vec<String>,
}

impl Command for Volume {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(&["mute"]);
        let word = parser.expect_identifier("volume")?;
        self.target = match stepped(&word, self.step) {
            _ if word == "mute" => VolumeTarget::Mute,
            Ok(amount) => VolumeTarget::Amount(amount),
            Err(_) if !Amount::looks_numeric(&word) => {
                return Err(GrammarError::unexpected("volume or 'mute'", identifier(&word)).into());
            }
            Err(err) => return Err(err.into()),
        };
        self.tab.clear();
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        let volume = match self.target {
            VolumeTarget::Mute => 0,
            VolumeTarget::Amount(Amount::Absolute(level)) => u8::try_from(level.min(100)).unwrap_or(100),
            VolumeTarget::Amount(Amount::Relative(delta)) => {
                let current = api.playback.status().map_err(ExecError::from)?.volume;
                let level = i64::from(current).saturating_add(delta).clamp(0, 100);
                u8::try_from(level).unwrap_or(100)
            }
        };
        api.playback.set_volume(volume).map_err(ExecError::from)?;
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
