use super::{Amount, Command, identifier, strings};
use crate::error::{CommandError, ExecError, GrammarError};
use crate::parser::Parser;
use crate::session::Api;

const DIRECTIONS: &[&str] = &["current", "down", "end", "home", "up"];

pub(super) fn cursor(api: &Api) -> Box<dyn Command> {
    Box::new(Cursor {
        target: Target::Down,
        wrap: api.options.get_bool("wrapscroll").unwrap_or(false),
        tab: Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Up,
    Down,
    Home,
    End,
    Current,
    Relative(i64),
    /// 1-based position.
    Absolute(u64),
}

/// `cursor up|down|home|end|current|+N|-N|N`
#[derive(Debug)]
struct Cursor {
    target: Target,
    wrap: bool,
    tab: Vec<String>,
}

impl Command for Cursor {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(DIRECTIONS);
        let word = parser.expect_identifier("cursor direction or position")?;
        self.target = match word.as_str() {
            "up" => Target::Up,
            "down" => Target::Down,
            "home" => Target::Home,
            "end" => Target::End,
            "current" => Target::Current,
            _ if Amount::looks_numeric(&word) => match Amount::parse(&word)? {
                Amount::Absolute(position) => Target::Absolute(position),
                Amount::Relative(delta) => Target::Relative(delta),
            },
            _ => {
                return Err(GrammarError::unexpected("cursor direction or position", identifier(&word)).into());
            }
        };
        self.tab.clear();
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        let len = api.list.len();
        let last = len.saturating_sub(1);
        let cursor = api.list.cursor();
        let index = match self.target {
            Target::Up if self.wrap && cursor == 0 => last,
            Target::Down if self.wrap && cursor == last => 0,
            Target::Up => cursor.saturating_sub(1),
            Target::Down => cursor + 1,
            Target::Home => 0,
            Target::End => last,
            Target::Relative(delta) => cursor.saturating_add_signed(delta as isize),
            Target::Absolute(position) => usize::try_from(position.saturating_sub(1)).unwrap_or(usize::MAX),
            Target::Current => {
                let status = api.playback.status().map_err(ExecError::from)?;
                let uri = status.current.ok_or(ExecError::NotPlaying)?;
                api.list
                    .position_of(&uri)
                    .ok_or(ExecError::NotInList(uri))?
            }
        };
        api.list.set_cursor(index);
        api.notifier.list_changed();
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
