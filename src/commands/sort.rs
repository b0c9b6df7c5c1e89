use super::Command;
use crate::error::{CommandError, GrammarError};
use crate::lexer::Class;
use crate::parser::Parser;
use crate::session::Api;

pub(super) fn sort(api: &Api) -> Box<dyn Command> {
    let default = api
        .options
        .get_str("sort")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    Box::new(Sort {
        tags: Vec::new(),
        default,
        known: api.list.tag_names(),
        tab: Vec::new(),
    })
}

/// `sort [tag...]`
///
/// Without tags the list is sorted by the `sort` option. The last tag is the
/// most significant key.
#[derive(Debug)]
struct Sort {
    tags: Vec<String>,
    default: Vec<String>,
    known: Vec<String>,
    tab: Vec<String>,
}

impl Command for Sort {
    fn parse(&mut self, parser: &mut Parser<'_>) -> Result<(), CommandError> {
        loop {
            self.tab = self.known.clone();
            let token = parser.scan_ignore_whitespace();
            match token.class {
                Class::End => break,
                Class::Identifier => self.tags.push(token.text),
                _ => return Err(GrammarError::unexpected("tag", token).into()),
            }
        }
        Ok(())
    }

    fn exec(&mut self, api: &mut Api) -> Result<(), CommandError> {
        let tags = if self.tags.is_empty() {
            &self.default
        } else {
            &self.tags
        };
        api.list.sort_by_tags(tags);
        api.notifier.list_changed();
        api.notifier.message(format!("sorted by {}", tags.join(", ")));
        Ok(())
    }

    fn tab_candidates(&self) -> Vec<String> {
        self.tab.clone()
    }
}
