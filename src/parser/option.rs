use crate::error::GrammarError;

/// One argument of the `set` command.
///
/// `key=value` assigns, `key` and `noKey` set a boolean, `invKey` and
/// `key!` toggle it and `key?` queries the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionToken {
    pub key: String,
    pub value: String,
    pub bool: bool,
    pub negate: bool,
    pub invert: bool,
    pub query: bool,
}

impl OptionToken {
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let invalid = |reason| GrammarError::InvalidOption {
            token: text.to_string(),
            reason,
        };

        if let Some((key, value)) = text.split_once('=') {
            if key.is_empty() {
                return Err(invalid("missing option name"));
            }
            return Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
                ..Self::default()
            });
        }

        let mut token = Self {
            bool: true,
            ..Self::default()
        };
        let mut name = text;
        if let Some(stripped) = name.strip_suffix('!') {
            token.invert = true;
            name = stripped;
        } else if let Some(stripped) = name.strip_suffix('?') {
            token.query = true;
            name = stripped;
        }
        if name.ends_with('!') || name.ends_with('?') {
            return Err(invalid("at most one trailing '!' or '?' is allowed"));
        }

        if let Some(stripped) = name.strip_prefix("inv") {
            if token.invert || token.query {
                return Err(invalid("conflicting modifiers"));
            }
            token.invert = true;
            name = stripped;
        } else if let Some(stripped) = name.strip_prefix("no") {
            if token.invert || token.query {
                return Err(invalid("conflicting modifiers"));
            }
            token.negate = true;
            name = stripped;
        }

        if name.is_empty() {
            return Err(invalid("missing option name"));
        }
        token.key = name.to_string();
        Ok(token)
    }
}
