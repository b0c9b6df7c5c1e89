use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, trace};

use super::{KeyEvent, KeySequence};
use crate::error::{BindError, CommandError, GrammarError};

pub const GLOBAL_CONTEXT: &str = "global";
pub const LIST_CONTEXT: &str = "list";
pub const CONTEXTS: &[&str] = &[GLOBAL_CONTEXT, LIST_CONTEXT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub sequence: KeySequence,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatch {
    Matched(String),
    Pending,
    NoMatch,
}

/// Flat bind table with an incremental matcher.
///
/// No bound sequence is ever a prefix of another, so a pending buffer is
/// always either extendable towards exactly the bindings it starts, or
/// dead.
#[derive(Debug, Default)]
pub struct Matcher {
    bindings: Vec<Binding>,
    pending: KeySequence,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bind(&mut self, sequence: KeySequence, command: impl Into<String>) -> Result<(), BindError> {
        if let Some(existing) = self
            .bindings
            .iter()
            .find(|binding| binding.sequence.starts_with(&sequence) || sequence.starts_with(&binding.sequence))
        {
            return Err(BindError::Conflict {
                existing: existing.sequence.to_string(),
                requested: sequence.to_string(),
            });
        }

        self.bindings.push(Binding {
            sequence,
            command: command.into(),
        });
        Ok(())
    }

    pub fn remove_bind(&mut self, sequence: &KeySequence) -> Result<Binding, BindError> {
        let Some(index) = self
            .bindings
            .iter()
            .position(|binding| binding.sequence == *sequence)
        else {
            return Err(BindError::NotBound(sequence.to_string()));
        };
        self.pending.clear();
        Ok(self.bindings.remove(index))
    }

    /// Appends `event` to the pending buffer. Returns false, and resets the
    /// buffer, when no binding can complete it any more.
    pub fn key_input(&mut self, event: KeyEvent) -> bool {
        self.pending.push(event);
        let alive = self
            .bindings
            .iter()
            .any(|binding| binding.sequence.starts_with(&self.pending));
        if !alive {
            self.pending.clear();
        }
        alive
    }

    /// Returns the command bound to exactly the pending buffer and clears
    /// the buffer. Without an exact match the buffer is kept.
    pub fn matched(&mut self) -> Option<String> {
        let binding = self
            .bindings
            .iter()
            .find(|binding| binding.sequence == self.pending)?;
        let command = binding.command.clone();
        self.pending.clear();
        Some(command)
    }

    pub fn feed(&mut self, event: KeyEvent) -> KeyMatch {
        if !self.key_input(event) {
            return KeyMatch::NoMatch;
        }
        match self.matched() {
            Some(command) => KeyMatch::Matched(command),
            None => KeyMatch::Pending,
        }
    }

    pub fn pending(&self) -> &KeySequence {
        &self.pending
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn bindings(&self) -> Vec<&Binding> {
        let mut bindings: Vec<&Binding> = self.bindings.iter().collect();
        bindings.sort_by_key(|binding| binding.sequence.to_string());
        bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// One matcher per binding context.
#[derive(Debug)]
pub struct Keymaps {
    matchers: BTreeMap<String, Matcher>,
    rejected: BTreeSet<String>,
}

impl Keymaps {
    pub fn new() -> Self {
        let matchers = CONTEXTS
            .iter()
            .map(|context| ((*context).to_string(), Matcher::new()))
            .collect();
        Self {
            matchers,
            rejected: BTreeSet::new(),
        }
    }

    pub fn context(&self, context: &str) -> Option<&Matcher> {
        self.matchers.get(context)
    }

    pub fn bind(&mut self, context: &str, sequence: KeySequence, command: &str) -> Result<(), CommandError> {
        let matcher = self
            .matchers
            .get_mut(context)
            .ok_or_else(|| GrammarError::UnknownContext(context.to_string()))?;
        let shown = sequence.to_string();
        matcher.add_bind(sequence, command)?;
        info!("bind {} {} -> {}", context, shown, command);
        self.reset();
        Ok(())
    }

    pub fn unbind(&mut self, context: &str, sequence: &KeySequence) -> Result<Binding, CommandError> {
        let matcher = self
            .matchers
            .get_mut(context)
            .ok_or_else(|| GrammarError::UnknownContext(context.to_string()))?;
        let binding = matcher.remove_bind(sequence)?;
        info!("unbind {} {}", context, sequence);
        self.reset();
        Ok(binding)
    }

    /// Feeds `event` to the active context and then to `global`. The first
    /// exact match wins. A context that rejected an earlier key of the
    /// current sequence is skipped until the sequence resolves, so a tail
    /// of a longer sequence never fires a shorter binding elsewhere.
    pub fn key_input(&mut self, active: &str, event: KeyEvent) -> KeyMatch {
        trace!("key input: context={} key={}", active, event);
        let order: Vec<&str> = if active == GLOBAL_CONTEXT {
            vec![GLOBAL_CONTEXT]
        } else {
            vec![active, GLOBAL_CONTEXT]
        };

        let mut pending = false;
        for context in order {
            if self.rejected.contains(context) {
                continue;
            }
            let Some(matcher) = self.matchers.get_mut(context) else {
                continue;
            };
            match matcher.feed(event) {
                KeyMatch::Matched(command) => {
                    self.reset();
                    return KeyMatch::Matched(command);
                }
                KeyMatch::Pending => pending = true,
                KeyMatch::NoMatch => {
                    self.rejected.insert(context.to_string());
                }
            }
        }

        if pending {
            return KeyMatch::Pending;
        }
        self.reset();
        KeyMatch::NoMatch
    }

    pub fn reset(&mut self) {
        self.rejected.clear();
        for matcher in self.matchers.values_mut() {
            matcher.reset();
        }
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        Self::new()
    }
}
