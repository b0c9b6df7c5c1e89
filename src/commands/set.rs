use tracing::debug;

use super::Command;
use crate::error::{CommandError, GrammarError};
use crate::lexer::Class;
use crate::options::{OptionValue, Options};
use crate::parser::{OptionToken, Parser};
use crate::session::Api;

pub(super) fn set(api: &Api) -> Box<dyn Command> {
    Box::new(Set {
        options: api.options.clone(),
        assignments: Vec::new(),
        tab: Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Assignment {
    Set(String, OptionValue),
    Toggle(String),
    Query(String),
}

/// `set [option-token...]`
///
/// Tokens are validated against a snapshot of the options taken when the
/// command is built, then applied in order. A failure while applying leaves
/// the earlier assignments in place.
#[derive(Debug)]
struct Set {
    options: Options,
    assignments: Vec<Assignment>,
    tab: Vec<String>,
}

impl Set {
    fn candidates(&self) -> Vec<String> {
        let mut names = Vec::new();
        for name in self.options.names() {
            names.push(name.to_string());
            if self.options.is_bool(name) {
                names.push(format!("no{name}"));
                names.push(format!("inv{name}"));
            }
        }
        names.sort();
        names
    }

    fn assignment(&self, text: &str) -> Result<Assignment, GrammarError> {
        let token = OptionToken::parse(text)?;
        let Some(current) = self.options.get(&token.key) else {
            return Err(GrammarError::UnknownOption(token.key));
        };
        let invalid = |reason| GrammarError::InvalidOption {
            token: text.to_string(),
            reason,
        };

        if !token.bool {
            let value = current
                .parse_like(&token.value)
                .ok_or_else(|| invalid("value does not match the option type"))?;
            return Ok(Assignment::Set(token.key, value));
        }
        if token.query {
            return Ok(Assignment::Query(token.key));
        }

        let is_bool = matches!(current, OptionValue::Bool(_));
        if token.invert || token.negate {
            if !is_bool {
                return Err(invalid("only boolean options can be negated or toggled"));
            }
            if token.invert {
                return Ok(Assignment::Toggle(token.key));
            }
            return Ok(Assignment::Set(token.key, OptionValue::Bool(false)));
        }
        if is_bool {
            return Ok(Assignment::Set(token.key, OptionValue::Bool(true)));
        }
        Ok(Assignment::Query(token.key))
    }
}

impl Command for Set {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        loop {
            self.tab = self.candidates();
            let token = parser.scan_ignore_whitespace();
            match token.class {
                Class::End => break,
                Class::Identifier => {
                    let assignment = self.assignment(&token.text)?;
                    self.assignments.push(assignment);
                }
                _ => return Err(GrammarError::unexpected("option", token).into()),
            }
        }
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        if self.assignments.is_empty() {
            let listing: Vec<String> = api
                .options
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            api.notifier.message(listing.join(" "));
            return Ok(());
        }

        for assignment in std::mem::take(&mut self.assignments) {
            match assignment {
                Assignment::Set(key, value) => {
                    api.set_option(&key, value)?;
                }
                Assignment::Toggle(key) => {
                    let current = api.options.get_bool(&key).unwrap_or(false);
                    api.set_option(&key, OptionValue::Bool(!current))?;
                }
                Assignment::Query(key) => {
                    if let Some(value) = api.options.get(&key) {
                        debug!("query option {}={}", key, value);
                        api.notifier.message(format!("{key}={value}"));
                    }
                }
            }
        }
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
