//! Key events and the key-sequence mini-language used by `bind`.
//!
//! A sequence is a run of literal runes and bracketed forms: `<enter>`,
//! `<C-a>`, `<A-S-left>`. Names and modifiers are case-insensitive. Use
//! `<lt>` for a literal `<`.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::error::KeySpecError;

mod matcher;

pub use matcher::{Binding, CONTEXTS, GLOBAL_CONTEXT, KeyMatch, Keymaps, LIST_CONTEXT, Matcher};

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("cr", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
    ("lt", KeyCode::Char('<')),
    ("gt", KeyCode::Char('>')),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pgup", KeyCode::PageUp),
    ("pageup", KeyCode::PageUp),
    ("pgdn", KeyCode::PageDown),
    ("pagedown", KeyCode::PageDown),
    ("insert", KeyCode::Insert),
    ("ins", KeyCode::Insert),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
];

const MAX_FUNCTION_KEY: u8 = 24;

const MODIFIER_MASK: KeyModifiers = KeyModifiers::SHIFT
    .union(KeyModifiers::CONTROL)
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::META);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn char(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch.to_ascii_lowercase()), KeyModifiers::CONTROL)
    }
}

/// Terminals report shifted runes as the shifted character, sometimes with
/// SHIFT set as well. Drop it so `J` from the terminal equals `J` from a
/// key spec.
impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        let mut modifiers = event.modifiers & MODIFIER_MASK;
        let code = match event.code {
            KeyCode::Char(ch) => {
                modifiers.remove(KeyModifiers::SHIFT);
                if modifiers.contains(KeyModifiers::CONTROL) {
                    KeyCode::Char(ch.to_ascii_lowercase())
                } else {
                    KeyCode::Char(ch)
                }
            }
            KeyCode::BackTab => {
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::BackTab
            }
            code => code,
        };
        Self { code, modifiers }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = key_name(self.code);
        if self.modifiers.is_empty() {
            return match name {
                Some(name) => write!(f, "<{name}>"),
                None => write!(f, "{}", literal(self.code)),
            };
        }

        f.write_str("<")?;
        for (flag, prefix) in [
            (KeyModifiers::SHIFT, "S"),
            (KeyModifiers::CONTROL, "C"),
            (KeyModifiers::ALT, "A"),
            (KeyModifiers::META, "M"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{prefix}-")?;
            }
        }
        match name {
            Some(name) => write!(f, "{name}>"),
            None => write!(f, "{}>", literal(self.code)),
        }
    }
}

fn key_name(code: KeyCode) -> Option<String> {
    if let KeyCode::F(n) = code {
        return Some(format!("f{n}"));
    }
    NAMED_KEYS
        .iter()
        .find(|(_, named)| *named == code)
        .map(|(name, _)| (*name).to_string())
}

fn literal(code: KeyCode) -> String {
    match code {
        KeyCode::Char(ch) => ch.to_string(),
        other => format!("{other:?}"),
    }
}

/// An ordered run of key events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeySequence(Vec<KeyEvent>);

impl KeySequence {
    pub fn new(events: Vec<KeyEvent>) -> Self {
        Self(events)
    }

    pub fn events(&self) -> &[KeyEvent] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Event-wise prefix test. Every sequence starts with itself.
    pub fn starts_with(&self, prefix: &KeySequence) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.0.push(event);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.0 {
            write!(f, "{event}")?;
        }
        Ok(())
    }
}

impl FromStr for KeySequence {
    type Err = KeySpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_sequence(spec)
    }
}

pub fn parse_sequence(spec: &str) -> Result<KeySequence, KeySpecError> {
    let malformed = |reason| KeySpecError::Malformed {
        spec: spec.to_string(),
        reason,
    };

    if spec.is_empty() {
        return Err(malformed("empty key sequence"));
    }

    let mut events = Vec::new();
    let mut rest = spec;
    while let Some(ch) = rest.chars().next() {
        if ch != '<' {
            events.push(KeyEvent::char(ch));
            rest = &rest[ch.len_utf8()..];
            continue;
        }
        let Some(close) = rest.find('>') else {
            return Err(malformed("unclosed '<'"));
        };
        events.push(parse_bracketed(spec, &rest[1..close])?);
        rest = &rest[close + 1..];
    }

    Ok(KeySequence(events))
}

fn parse_bracketed(spec: &str, inner: &str) -> Result<KeyEvent, KeySpecError> {
    let malformed = |reason| KeySpecError::Malformed {
        spec: spec.to_string(),
        reason,
    };
    let invalid = |reason| KeySpecError::InvalidModifier {
        spec: spec.to_string(),
        reason,
    };

    if inner.is_empty() {
        return Err(malformed("empty key name"));
    }
    let mut chars = inner.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyEvent::char(ch));
    }

    let (prefix, name) = match inner.strip_suffix("--") {
        Some(prefix) => (Some(prefix), "-"),
        None => match inner.rsplit_once('-') {
            Some((prefix, name)) => (Some(prefix), name),
            None => (None, inner),
        },
    };
    if name.is_empty() {
        return Err(malformed("modifier without a key"));
    }

    let mut modifiers = KeyModifiers::NONE;
    if let Some(prefix) = prefix {
        for part in prefix.split('-') {
            let flag = match part.to_ascii_lowercase().as_str() {
                "s" | "shift" => KeyModifiers::SHIFT,
                "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
                "a" | "alt" => KeyModifiers::ALT,
                "m" | "meta" => KeyModifiers::META,
                "" => return Err(malformed("empty modifier")),
                _ => return Err(invalid("unknown modifier")),
            };
            if modifiers.contains(flag) {
                return Err(invalid("duplicate modifier"));
            }
            modifiers.insert(flag);
        }
    }

    let code = resolve_name(name)?;
    // Terminals report shift-tab as backtab without the modifier.
    if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
        modifiers.remove(KeyModifiers::SHIFT);
        return Ok(KeyEvent::new(KeyCode::BackTab, modifiers));
    }
    if let KeyCode::Char(ch) = code {
        if modifiers.contains(KeyModifiers::SHIFT) {
            return Err(invalid("shift cannot be applied to a rune, use the shifted rune"));
        }
        if modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(KeyEvent::new(KeyCode::Char(ch.to_ascii_lowercase()), modifiers));
        }
    }

    Ok(KeyEvent::new(code, modifiers))
}

fn resolve_name(name: &str) -> Result<KeyCode, KeySpecError> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    let lower = name.to_ascii_lowercase();
    if let Some((_, code)) = NAMED_KEYS.iter().find(|(known, _)| *known == lower) {
        return Ok(*code);
    }
    if let Some(number) = lower.strip_prefix('f')
        && let Ok(n) = number.parse::<u8>()
        && (1..=MAX_FUNCTION_KEY).contains(&n)
    {
        return Ok(KeyCode::F(n));
    }

    Err(KeySpecError::UnknownKeyName(name.to_string()))
}
