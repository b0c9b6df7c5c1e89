//! Token-logging parser shared by every command.
//!
//! Commands pull tokens through a [`Parser`] instead of the raw scanner so
//! that everything consumed is recorded. Tab completion replays that log to
//! rebuild the confirmed part of a partially typed line.

use crate::error::GrammarError;
use crate::lexer::{Class, Scanner, Token, is_special};

mod option;

pub use option::OptionToken;

#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    tokens: Vec<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input),
            tokens: Vec::new(),
        }
    }

    pub fn scan(&mut self) -> Token {
        let token = self.scanner.scan();
        self.tokens.push(token.clone());
        token
    }

    /// Pushes back the last token and drops it from the log.
    pub fn unscan(&mut self) {
        if self.tokens.pop().is_some() {
            self.scanner.unscan();
        }
    }

    /// Skips whitespace and comments. A comment always runs to the end of
    /// the line, so the token after it is `End`.
    pub fn scan_ignore_whitespace(&mut self) -> Token {
        loop {
            let token = self.scan();
            if !matches!(token.class, Class::Whitespace | Class::Comment) {
                return token;
            }
        }
    }

    pub fn expect_end(&mut self) -> Result<(), GrammarError> {
        let token = self.scan_ignore_whitespace();
        if token.is_end() {
            return Ok(());
        }
        Err(GrammarError::unexpected("end of line", token))
    }

    pub fn expect_identifier(&mut self, expected: &str) -> Result<String, GrammarError> {
        let token = self.scan_ignore_whitespace();
        if token.class == Class::Identifier {
            return Ok(token.text);
        }
        Err(GrammarError::unexpected(expected, token))
    }

    /// Returns the next identifier, or `None` at end of line.
    pub fn optional_identifier(&mut self, expected: &str) -> Result<Option<String>, GrammarError> {
        let token = self.scan_ignore_whitespace();
        match token.class {
            Class::End => Ok(None),
            Class::Identifier => Ok(Some(token.text)),
            _ => Err(GrammarError::unexpected(expected, token)),
        }
    }

    /// Consumes everything up to the end of the line and renders it back
    /// into re-lexable text, without leading or trailing whitespace and
    /// without a trailing comment.
    pub fn rest_of_line(&mut self) -> String {
        let start = self.tokens.len();
        loop {
            let token = self.scan();
            if matches!(token.class, Class::End | Class::Comment) {
                break;
            }
        }
        render_tokens(&self.tokens[start..])
            .trim()
            .to_string()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Wraps `text` in double quotes when it would not lex back into a single
/// identifier with the same content.
pub fn quote(text: &str) -> String {
    let plain = !text.is_empty()
        && !text
            .chars()
            .any(|ch| ch.is_whitespace() || is_special(ch) || ch == '"' || ch == '\\');
    if plain {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

pub fn render_tokens(tokens: &[Token]) -> String {
    let mut line = String::new();
    for token in tokens {
        match token.class {
            Class::End | Class::Comment => {}
            Class::Identifier => line.push_str(&quote(&token.text)),
            _ => line.push_str(&token.text),
        }
    }
    line
}
