//! Execution context and the command dispatcher.

use tracing::{debug, info, warn};

use crate::commands::Registry;
use crate::completion::TabComplete;
use crate::config::{Config, DEFAULT_STARTUP};
use crate::error::{CommandError, ExecError, GrammarError};
use crate::keys::{CONTEXTS, KeyEvent, KeyMatch, Keymaps, LIST_CONTEXT};
use crate::lexer::Class;
use crate::list::{Song, Songlist};
use crate::options::{OptionValue, Options};
use crate::parser::Parser;
use crate::ports::{Notifier, PlaybackClient, UiEvent};

/// Everything a command may read or change while it executes.
pub struct Api {
    pub list: Songlist,
    pub options: Options,
    pub keymaps: Keymaps,
    pub clipboard: Vec<Song>,
    /// Binding context for key input, either `global` or `list`.
    pub context: String,
    pub notifier: Notifier,
    pub playback: Box<dyn PlaybackClient>,
    pub quit: bool,
}

impl Api {
    pub fn new(notifier: Notifier, playback: Box<dyn PlaybackClient>) -> Self {
        Self {
            list: Songlist::new(),
            options: Options::new(),
            keymaps: Keymaps::new(),
            clipboard: Vec::new(),
            context: LIST_CONTEXT.to_string(),
            notifier,
            playback,
            quit: false,
        }
    }

    /// Type-checked option write. Emits `OptionChanged` when the value
    /// actually changes.
    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<bool, ExecError> {
        let changed = self.options.set(key, value)?;
        if changed {
            if let Some(value) = self.options.get(key) {
                info!("option {}={}", key, value);
            }
            self.notifier.send(UiEvent::OptionChanged(key.to_string()));
        }
        Ok(changed)
    }
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("list", &self.list.len())
            .field("context", &self.context)
            .field("clipboard", &self.clipboard.len())
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}

/// Owns the registry, the execution context and the active completion.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    api: Api,
    tab: Option<TabComplete>,
}

impl Session {
    pub fn new(registry: Registry, api: Api) -> Self {
        Self {
            registry,
            api,
            tab: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut Api {
        &mut self.api
    }

    pub fn quit_requested(&self) -> bool {
        self.api.quit
    }

    /// Parses and executes one line. Blank and comment-only lines succeed
    /// without doing anything. `exec` only runs after a clean parse.
    pub fn exec(&mut self, line: &str) -> Result<(), CommandError> {
        let mut parser = Parser::new(line);
        let verb = parser.scan_ignore_whitespace();
        match verb.class {
            Class::End => return Ok(()),
            Class::Identifier => {}
            _ => return Err(GrammarError::unexpected("command", verb).into()),
        }

        let factory = self
            .registry
            .get(&verb.text)
            .ok_or_else(|| CommandError::UnknownCommand(verb.text.clone()))?;
        debug!("exec: {}", line.trim());
        let mut command = factory(&self.api);
        command.parse(&mut parser)?;
        command.exec(&mut self.api)
    }

    /// Runs `line` and reports any failure to the user instead of
    /// returning it. Returns whether the line succeeded.
    pub fn run_line(&mut self, line: &str) -> bool {
        self.tab = None;
        match self.exec(line) {
            Ok(()) => true,
            Err(err) => {
                warn!("command failed: {:?}: {}", line, err);
                self.api.notifier.error(err.to_string());
                false
            }
        }
    }

    /// Feeds one key event to the keymaps of the active context and runs
    /// the bound command on a full match.
    pub fn key_input(&mut self, event: KeyEvent) -> KeyMatch {
        let context = self.api.context.clone();
        let result = self.api.keymaps.key_input(&context, event);
        if let KeyMatch::Matched(command) = &result {
            debug!("key binding resolved: {} -> {}", event, command);
            self.run_line(command);
        }
        result
    }

    pub fn set_context(&mut self, context: &str) -> Result<(), GrammarError> {
        if !CONTEXTS.contains(&context) {
            return Err(GrammarError::UnknownContext(context.to_string()));
        }
        self.api.keymaps.reset();
        self.api.context = context.to_string();
        Ok(())
    }

    /// Completes `line`. Pressing tab again on the line this returned moves
    /// to the next candidate; any other line starts over.
    pub fn tab_complete(&mut self, line: &str) -> Option<String> {
        let continuing = self
            .tab
            .as_ref()
            .is_some_and(|tab| tab.last() == Some(line));
        if !continuing {
            self.tab = Some(TabComplete::new(&self.registry, &self.api, line));
        }
        self.tab.as_mut()?.advance()
    }

    /// Applies option values, then runs the default bindings and the
    /// configured startup lines. Failures are reported and skipped.
    pub fn apply_config(&mut self, config: &Config) {
        for (key, value) in &config.options {
            if let Err(err) = self.api.set_option(key, value.clone()) {
                warn!("config option {} rejected: {}", key, err);
                self.api.notifier.error(format!("config: {err}"));
            }
        }
        for line in DEFAULT_STARTUP {
            self.run_line(line);
        }
        for line in &config.startup {
            self.run_line(line);
        }
    }
}

#[cfg(test)]
mod tests;
