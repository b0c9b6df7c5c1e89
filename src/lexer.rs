//! Command-line tokenizer.
//!
//! Splits a single command line into classified tokens. The scanner never
//! fails: an unterminated quote swallows the rest of the line as literal
//! text, and a trailing backslash is kept as-is. Grammar violations are
//! reported by the parser layer.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    End,
    Identifier,
    Whitespace,
    Comment,
    Variable,
    Open,
    Close,
    Separator,
    Stop,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Class::End => "end of line",
            Class::Identifier => "identifier",
            Class::Whitespace => "whitespace",
            Class::Comment => "comment",
            Class::Variable => "variable",
            Class::Open => "'{'",
            Class::Close => "'}'",
            Class::Separator => "'|'",
            Class::Stop => "';'",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: Class,
    pub text: String,
}

impl Token {
    pub fn new(class: Class, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }

    pub fn end() -> Self {
        Self::new(Class::End, String::new())
    }

    pub fn is_end(&self) -> bool {
        self.class == Class::End
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            Class::Identifier => write!(f, "identifier '{}'", self.text),
            class => fmt::Display::fmt(&class, f),
        }
    }
}

/// Runes that end an unquoted identifier.
pub(crate) fn is_special(ch: char) -> bool {
    matches!(ch, '#' | '$' | '{' | '}' | '|' | ';')
}

#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    last: Option<Token>,
    replay: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last: None,
            replay: false,
        }
    }

    /// Returns the next token. After the input is exhausted every call
    /// yields an `End` token with empty text.
    pub fn scan(&mut self) -> Token {
        if self.replay {
            self.replay = false;
            if let Some(token) = &self.last {
                return token.clone();
            }
        }
        let token = self.next_token();
        self.last = Some(token.clone());
        token
    }

    /// Pushes the last scanned token back. Only one token of lookahead is
    /// kept, so repeated calls have the same effect as one.
    pub fn unscan(&mut self) {
        if self.last.is_some() {
            self.replay = true;
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn next_token(&mut self) -> Token {
        let Some(ch) = self.peek() else {
            return Token::end();
        };

        if ch.is_whitespace() {
            let start = self.pos;
            while self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            }
            return Token::new(Class::Whitespace, &self.input[start..self.pos]);
        }

        let class = match ch {
            '#' => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                return Token::new(Class::Comment, text);
            }
            '$' => Class::Variable,
            '{' => Class::Open,
            '}' => Class::Close,
            '|' => Class::Separator,
            ';' => Class::Stop,
            _ => return self.scan_identifier(),
        };
        self.bump();
        Token::new(class, ch.to_string())
    }

    fn scan_identifier(&mut self) -> Token {
        let mut text = String::new();
        let mut quoted = false;

        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    self.bump();
                    match self.bump() {
                        Some(escaped) => text.push(escaped),
                        None => text.push('\\'),
                    }
                }
                '"' => {
                    self.bump();
                    quoted = !quoted;
                }
                _ if quoted => {
                    self.bump();
                    text.push(ch);
                }
                _ if ch.is_whitespace() || is_special(ch) => break,
                _ => {
                    self.bump();
                    text.push(ch);
                }
            }
        }

        Token::new(Class::Identifier, text)
    }
}

/// Scans `input` to completion, including the terminal `End` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let done = token.is_end();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
