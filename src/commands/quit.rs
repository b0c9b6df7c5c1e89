use tracing::info;

use super::Command;
use crate::error::CommandError;
use crate::parser::Parser;
use crate::ports::UiEvent;
use crate::session::Api;

pub(super) fn quit(_api: &Api) -> Box<dyn Command> {
    Box::new(Quit)
}

#[derive(Debug)]
struct Quit;

impl Command for Quit {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        parser.expect_end()?;
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        info!("quit requested");
        api.quit = true;
        api.notifier.send(UiEvent::Quit);
        Ok(())
    }
}
