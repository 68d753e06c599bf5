use std::rc::Rc;

use log::trace;

use crate::{Position, Span, DEFAULT_FILE, MK_SPAN, MK_TOKEN};

use super::tokens::{LexError, Token, TokenKind, RESERVED_LOOKUP};

/// Pull-based scanner over a borrowed source buffer.
///
/// Every call to [`Lexer::next_token`] scans exactly one token. The lexer
/// looks at most one byte past the current position and keeps no token
/// buffer; its only state is the `start`/`current` offsets and the line.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    file: Rc<String>,
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: Option<String>) -> Lexer<'src> {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from(DEFAULT_FILE)));

        Lexer {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            file: file_name,
            exhausted: false,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        Some(c)
    }

    /// Consumes the next byte only if it is `expected`.
    fn matches(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        MK_TOKEN!(
            kind,
            &self.source[self.start..self.current],
            MK_SPAN!(self.start, self.current, self.file),
            self.start_line
        )
    }

    fn error_token(&mut self, error: LexError) -> Token<'src> {
        // Never split a multi-byte character
        while !self.source.is_char_boundary(self.current) {
            self.current += 1;
        }
        self.make_token(TokenKind::Error(error))
    }

    /// Skips whitespace and both comment forms until the next real token.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => self.current += 1,
                Some(b'\n') => {
                    self.line += 1;
                    self.current += 1;
                }
                Some(b'/') if self.peek_next() == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.current += 1;
                    }
                }
                Some(b'/') if self.peek_next() == Some(b'*') => {
                    self.current += 2;
                    loop {
                        match self.peek() {
                            None => break,
                            Some(b'*') if self.peek_next() == Some(b'/') => {
                                self.current += 2;
                                break;
                            }
                            Some(b'\n') => {
                                self.line += 1;
                                self.current += 1;
                            }
                            Some(_) => self.current += 1,
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.current += 1;
            } else {
                break;
            }
        }

        let text = &self.source[self.start..self.current];

        if text == "let" && self.matches(b'!') {
            return self.make_token(TokenKind::LetBang);
        }

        let kind = RESERVED_LOOKUP
            .get(text)
            .copied()
            .unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn number(&mut self) -> Token<'src> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }

        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.current += 1;
            }
        }

        self.make_token(TokenKind::Number)
    }

    fn string(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c == b'"' {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.at_eof() {
            return self.error_token(LexError::UnterminatedString);
        }

        self.current += 1; // closing quote
        self.make_token(TokenKind::String)
    }

    /// Scans and returns the next token. Once the end of the source is
    /// reached every further call returns another `EOF` token.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_trivia();

        self.start = self.current;
        self.start_line = self.line;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::EOF);
        };

        let token = match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),
            b'0'..=b'9' => self.number(),
            b'"' => self.string(),

            b'(' => self.make_token(TokenKind::OpenParen),
            b')' => self.make_token(TokenKind::CloseParen),
            b'{' => self.make_token(TokenKind::OpenCurly),
            b'}' => self.make_token(TokenKind::CloseCurly),
            b'[' => self.make_token(TokenKind::OpenBracket),
            b']' => self.make_token(TokenKind::CloseBracket),

            // Two-character forms first
            b'=' => {
                let kind = if self.matches(b'=') { TokenKind::Equals } else { TokenKind::Assignment };
                self.make_token(kind)
            }
            b'!' => {
                let kind = if self.matches(b'=') { TokenKind::NotEquals } else { TokenKind::Not };
                self.make_token(kind)
            }
            b'>' => {
                let kind = if self.matches(b'=') { TokenKind::GreaterEquals } else { TokenKind::Greater };
                self.make_token(kind)
            }
            b'<' => {
                let kind = if self.matches(b'=') { TokenKind::LessEquals } else { TokenKind::Less };
                self.make_token(kind)
            }
            b'-' => {
                let kind = if self.matches(b'>') { TokenKind::Arrow } else { TokenKind::Dash };
                self.make_token(kind)
            }
            b'&' => {
                if self.matches(b'&') {
                    self.make_token(TokenKind::And)
                } else {
                    self.error_token(LexError::UnexpectedCharacter)
                }
            }
            b'|' => {
                if self.matches(b'|') {
                    self.make_token(TokenKind::Or)
                } else if self.matches(b'>') {
                    self.make_token(TokenKind::Pipeline)
                } else {
                    self.error_token(LexError::UnexpectedCharacter)
                }
            }

            b'+' => self.make_token(TokenKind::Plus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),
            b',' => self.make_token(TokenKind::Comma),
            b';' => self.make_token(TokenKind::Semicolon),
            b':' => self.make_token(TokenKind::Colon),
            b'.' => self.make_token(TokenKind::Dot),
            b'?' => self.make_token(TokenKind::Question),
            b'#' => self.make_token(TokenKind::Reflect),

            _ => self.error_token(LexError::UnexpectedCharacter),
        };

        trace!("{}:{} scanned {}", self.file, token.line, token.debug());

        token
    }
}

/// Yields every token up to and including the first `EOF`, then stops.
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let token = self.next_token();
        if token.is_eof() {
            self.exhausted = true;
        }
        Some(token)
    }
}

/// Scans the whole source into a token list terminated by `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token<'_>> {
    Lexer::new(source, file).collect()
}
