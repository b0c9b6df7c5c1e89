use super::{Command, identifier, strings};
use crate::error::{CommandError, ExecError, GrammarError};
use crate::parser::Parser;
use crate::session::Api;

const ACTIONS: &[&str] = &["all", "clear", "commit", "toggle", "visual"];

pub(super) fn select(_api: &Api) -> Box<dyn Command> {
    Box::new(Select {
        action: Action::Toggle,
        tab: Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Toggle,
    Visual,
    Commit,
    Clear,
    All,
}

/// `select toggle|visual|commit|clear|all`
#[derive(Debug)]
struct Select {
    action: Action,
    tab: Vec<String>,
}

impl Command for Select {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(ACTIONS);
        let word = parser.expect_identifier("selection action")?;
        self.action = match word.as_str() {
            "toggle" => Action::Toggle,
            "visual" => Action::Visual,
            "commit" => Action::Commit,
            "clear" => Action::Clear,
            "all" => Action::All,
            _ => return Err(GrammarError::unexpected("selection action", identifier(&word)).into()),
        };
        self.tab.clear();
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        let list = &mut api.list;
        match self.action {
            Action::Toggle | Action::Visual if list.is_empty() => return Err(ExecError::EmptyList.into()),
            Action::Toggle => list.toggle_selected(list.cursor()),
            Action::Visual => list.toggle_visual_selection(),
            Action::Commit => list.commit_visual_selection(),
            Action::Clear => list.clear_selection(),
            Action::All => list.select_all(),
        }
        api.notifier.list_changed();
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
