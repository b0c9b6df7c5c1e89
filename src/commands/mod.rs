//! Command trait, verb registry and the built-in verbs.
//!
//! A command is built fresh for every line by its factory, parsed, then
//! executed. Factories may copy what they need out of the [`Api`] so that
//! `parse` can validate and offer candidates; `parse` itself never sees the
//! `Api` and so cannot change it.

use std::collections::BTreeMap;

use crate::error::{CommandError, GrammarError, RegistryError};
use crate::lexer::{Class, Token};
use crate::parser::Parser;
use crate::session::Api;

mod bind;
mod clipboard;
mod cursor;
mod playback;
mod quit;
mod select;
mod set;
mod sort;

pub trait Command {
    /// Consumes the remainder of the line after the verb.
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError>;

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError>;

    /// Candidates for the argument slot parsing stopped at. Only consulted
    /// when `parse` succeeded or ran out of input.
    fn tab_candidates(&self) -> Vec<String> {
        Vec::new()
    }
}

pub type Factory = fn(&Api) -> Box<dyn Command>;

pub const BUILTIN_VERBS: &[&str] = &[
    "bind", "cursor", "cut", "next", "paste", "pause", "play", "prev", "quit", "seek", "select", "set",
    "sort", "stop", "unbind", "volume", "yank",
];

pub fn builtin(verb: &str) -> Option<Factory> {
    let factory: Factory = match verb {
        "bind" => bind::bind,
        "unbind" => bind::unbind,
        "cursor" => cursor::cursor,
        "select" => select::select,
        "set" => set::set,
        "play" => playback::play,
        "pause" => playback::pause,
        "stop" => playback::stop,
        "next" => playback::next,
        "prev" => playback::previous,
        "seek" => playback::seek,
        "volume" => playback::volume,
        "cut" => clipboard::cut,
        "yank" => clipboard::yank,
        "paste" => clipboard::paste,
        "sort" => sort::sort,
        "quit" => quit::quit,
        _ => return None,
    };
    Some(factory)
}

/// Verb to factory table. Iteration and prefix lookups are sorted.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    factories: BTreeMap<String, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let factories = BUILTIN_VERBS
            .iter()
            .filter_map(|verb| builtin(verb).map(|factory| ((*verb).to_string(), factory)))
            .collect();
        Self { factories }
    }

    pub fn register(&mut self, verb: &str, factory: Factory) -> Result<(), RegistryError> {
        if self.factories.contains_key(verb) {
            return Err(RegistryError::Duplicate(verb.to_string()));
        }
        self.factories.insert(verb.to_string(), factory);
        Ok(())
    }

    pub fn get(&self, verb: &str) -> Option<Factory> {
        self.factories.get(verb).copied()
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.factories.contains_key(verb)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn verbs_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.factories
            .range(prefix.to_string()..)
            .map(|(verb, _)| verb)
            .take_while(|verb| verb.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// A numeric argument: `N` is absolute, `+N` and `-N` are relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Absolute(u64),
    Relative(i64),
}

impl Amount {
    /// At most one leading sign; the rest must be plain digits.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let invalid = || GrammarError::InvalidNumber(text.to_string());
        let (sign, digits) = match text.strip_prefix(['+', '-']) {
            Some(digits) => (text.chars().next(), digits),
            None => (None, text),
        };
        if !digits.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        let magnitude = digits.parse::<u64>().map_err(|_| invalid())?;
        match sign {
            None => Ok(Amount::Absolute(magnitude)),
            Some('-') => 0i64
                .checked_sub_unsigned(magnitude)
                .map(Amount::Relative)
                .ok_or_else(invalid),
            Some(_) => i64::try_from(magnitude)
                .map(Amount::Relative)
                .map_err(|_| invalid()),
        }
    }

    pub fn looks_numeric(text: &str) -> bool {
        text.trim_start_matches(['+', '-'])
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_digit())
    }
}

fn identifier(text: &str) -> Token {
    Token::new(Class::Identifier, text)
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}
