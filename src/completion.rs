//! Tab completion for a partially typed command line.
//!
//! The line is split into a confirmed part and the word being typed. While
//! the verb is still being typed, candidates are registered verbs. After
//! that the command is built and parsed over the confirmed part only, so
//! parsing stops exactly at the slot the partial word belongs to, and the
//! command reports that slot's candidates.

use tracing::trace;

use crate::commands::{Factory, Registry};
use crate::error::{CommandError, GrammarError};
use crate::lexer::{Class, tokenize};
use crate::parser::{Parser, quote, render_tokens};
use crate::session::Api;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabComplete {
    base: String,
    candidates: Vec<String>,
    index: usize,
    last: Option<String>,
}

impl TabComplete {
    pub fn new(registry: &Registry, api: &Api, line: &str) -> Self {
        let (base, candidates) = derive(registry, api, line);
        trace!("tab complete: base={:?} candidates={:?}", base, candidates);
        Self {
            base,
            candidates,
            index: 0,
            last: None,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The line most recently returned by [`TabComplete::advance`].
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Returns the next completed line, wrapping after the last candidate.
    pub fn advance(&mut self) -> Option<String> {
        let candidate = self.candidates.get(self.index)?;
        let line = format!("{}{}", self.base, quote(candidate));
        self.index = (self.index + 1) % self.candidates.len();
        self.last = Some(line.clone());
        Some(line)
    }
}

fn derive(registry: &Registry, api: &Api, line: &str) -> (String, Vec<String>) {
    let mut parser = Parser::new(line);
    let verb = parser.scan_ignore_whitespace();
    match verb.class {
        Class::End => {
            let base = render_tokens(parser.tokens());
            let verbs = registry.verbs().map(str::to_string).collect();
            return (base, verbs);
        }
        Class::Identifier => {}
        _ => return (String::new(), Vec::new()),
    }

    if parser.scan().is_end() {
        let tokens = parser.tokens();
        let base = render_tokens(&tokens[..tokens.len() - 2]);
        return (base, registry.verbs_with_prefix(&verb.text));
    }

    let Some(factory) = registry.get(&verb.text) else {
        return (String::new(), Vec::new());
    };

    let tokens = tokenize(line);
    let words = &tokens[..tokens.len() - 1];
    if words.iter().any(|token| token.class == Class::Comment) {
        return (String::new(), Vec::new());
    }
    let (confirmed, partial) = match words.split_last() {
        Some((last, rest)) if last.class == Class::Identifier => (rest, last.text.as_str()),
        _ => (words, ""),
    };
    let base = render_tokens(confirmed);
    let candidates = slot_candidates(factory, api, &base)
        .into_iter()
        .filter(|candidate| candidate.starts_with(partial))
        .collect();
    (base, candidates)
}

/// Parses `base`, which ends where the next argument would start, and
/// returns what the command offers for that argument. A parse that stopped
/// on a rejected token rather than at the end of the line has no open slot.
fn slot_candidates(factory: Factory, api: &Api, base: &str) -> Vec<String> {
    let mut command = factory(api);
    let mut parser = Parser::new(base);
    parser.scan_ignore_whitespace();
    match command.parse(&mut parser) {
        Ok(()) => {}
        Err(CommandError::Grammar(GrammarError::Unexpected { found, .. })) if found.is_end() => {}
        Err(err) => {
            trace!("tab complete: parse rejected: {}", err);
            return Vec::new();
        }
    }
    command.tab_candidates()
}
