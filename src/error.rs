use thiserror::Error;

use crate::lexer::Token;
use crate::options::OptionError;
use crate::ports::PlaybackError;

/// Every failure a command line can produce, from verb lookup through `exec`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    KeySpec(#[from] KeySpecError),
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("expected {expected}, got {found}")]
    Unexpected { expected: String, found: Token },
    #[error("unknown option: '{0}'")]
    UnknownOption(String),
    #[error("invalid option '{token}': {reason}")]
    InvalidOption { token: String, reason: &'static str },
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("unknown binding context: '{0}'")]
    UnknownContext(String),
}

impl GrammarError {
    pub fn unexpected(expected: impl Into<String>, found: Token) -> Self {
        Self::Unexpected {
            expected: expected.into(),
            found,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySpecError {
    #[error("malformed key sequence '{spec}': {reason}")]
    Malformed { spec: String, reason: &'static str },
    #[error("unknown key name: '{0}'")]
    UnknownKeyName(String),
    #[error("invalid modifier in '{spec}': {reason}")]
    InvalidModifier { spec: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("key sequence '{requested}' conflicts with existing binding '{existing}'")]
    Conflict { existing: String, requested: String },
    #[error("key sequence '{0}' is not bound")]
    NotBound(String),
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("the list is empty")]
    EmptyList,
    #[error("the clipboard is empty")]
    EmptyClipboard,
    #[error("nothing is playing")]
    NotPlaying,
    #[error("'{0}' is not in the list")]
    NotInList(String),
    #[error(transparent)]
    Option(#[from] OptionError),
    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command '{0}' is already registered")]
    Duplicate(String),
}
