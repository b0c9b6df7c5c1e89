use tracing::debug;

use super::{Command, strings};
use crate::error::{CommandError, ExecError, GrammarError};
use crate::lexer::Class;
use crate::parser::Parser;
use crate::session::Api;

pub(super) fn cut(_api: &Api) -> Box<dyn Command> {
    Box::new(Cut)
}

pub(super) fn yank(_api: &Api) -> Box<dyn Command> {
    Box::new(Yank)
}

pub(super) fn paste(_api: &Api) -> Box<dyn Command> {
    Box::new(Paste {
        before: false,
        tab: Vec::new(),
    })
}

fn songs(count: usize) -> String {
    if count == 1 {
        "1 song".to_string()
    } else {
        format!("{count} songs")
    }
}

/// `cut`: moves the selection into the clipboard.
#[derive(Debug)]
struct Cut;

impl Command for Cut {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        if api.list.is_empty() {
            return Err(ExecError::EmptyList.into());
        }
        let indices = api.list.selection_indices();
        api.clipboard = api.list.remove(&indices);
        debug!("cut {} songs", api.clipboard.len());
        api.notifier.list_changed();
        api.notifier.message(format!("{} cut to clipboard", songs(api.clipboard.len())));
        Ok(())
    }
}

/// `yank`: copies the selection into the clipboard and clears it.
#[derive(Debug)]
struct Yank;

impl Command for Yank {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        if api.list.is_empty() {
            return Err(ExecError::EmptyList.into());
        }
        api.clipboard = api.list.selection().into_iter().cloned().collect();
        api.list.clear_selection();
        api.notifier.list_changed();
        api.notifier.message(format!("{} copied to clipboard", songs(api.clipboard.len())));
        Ok(())
    }
}

/// `paste [before|after]`: inserts the clipboard next to the cursor.
#[derive(Debug)]
struct Paste {
    before: bool,
    tab: Vec<String>,
}

impl Command for Paste {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(&["after", "before"]);
        let token = parser.scan_ignore_whitespace();
        match token.class {
            Class::End => return Ok(()),
            Class::Identifier if token.text == "before" => self.before = true,
            Class::Identifier if token.text == "after" => self.before = false,
            _ => return Err(GrammarError::unexpected("'before', 'after' or end of line", token).into()),
        }
        self.tab.clear();
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        if api.clipboard.is_empty() {
            return Err(ExecError::EmptyClipboard.into());
        }
        let position = match (self.before, api.list.is_empty()) {
            (_, true) => 0,
            (true, false) => api.list.cursor(),
            (false, false) => api.list.cursor() + 1,
        };
        let count = api.clipboard.len();
        api.list.insert(position, api.clipboard.clone());
        api.notifier.list_changed();
        api.notifier.message(format!("{} pasted", songs(count)));
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
