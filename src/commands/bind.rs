use super::{Command, strings};
use crate::error::{CommandError, GrammarError};
use crate::keys::{CONTEXTS, KeySequence, parse_sequence};
use crate::lexer::Token;
use crate::parser::Parser;
use crate::session::Api;

pub(super) fn bind(_api: &Api) -> Box<dyn Command> {
    Box::new(Bind::default())
}

pub(super) fn unbind(_api: &Api) -> Box<dyn Command> {
    Box::new(Unbind::default())
}

fn parse_context(parser: &mut Parser<'_>) -> Result<String, GrammarError> {
    let context = parser.expect_identifier("binding context")?;
    if !CONTEXTS.contains(&context.as_str()) {
        return Err(GrammarError::UnknownContext(context));
    }
    Ok(context)
}

/// `bind <context> <keyseq> <command...>`
#[derive(Debug, Default)]
struct Bind {
    context: String,
    sequence: KeySequence,
    command: String,
    tab: Vec<String>,
}

impl Command for Bind {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(CONTEXTS);
        self.context = parse_context(parser)?;
        self.tab.clear();

        let spec = parser.expect_identifier("key sequence")?;
        self.sequence = parse_sequence(&spec)?;

        self.command = parser.rest_of_line();
        if self.command.is_empty() {
            return Err(GrammarError::unexpected("command", Token::end()).into());
        }
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        api.keymaps
            .bind(&self.context, self.sequence.clone(), &self.command)
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}

/// `unbind <context> <keyseq>`
#[derive(Debug, Default)]
struct Unbind {
    context: String,
    sequence: KeySequence,
    tab: Vec<String>,
}

impl Command for Unbind {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        self.tab = strings(CONTEXTS);
        self.context = parse_context(parser)?;
        self.tab.clear();

        let spec = parser.expect_identifier("key sequence")?;
        self.sequence = parse_sequence(&spec)?;
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        api.keymaps.unbind(&self.context, &self.sequence)?;
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
