use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("func", TokenKind::Func);
        map.insert("fn", TokenKind::Fn);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("match", TokenKind::Match);
        map.insert("async", TokenKind::Async);
        map.insert("await", TokenKind::Await);
        map.insert("throw", TokenKind::Throw);
        map.insert("try", TokenKind::Try);
        map.insert("catch", TokenKind::Catch);
        map.insert("import", TokenKind::Import);
        map
    };
}

/// Why the scanner could not produce a real token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LexError {
    UnterminatedString,
    UnexpectedCharacter,
}

impl LexError {
    pub fn message(&self) -> &'static str {
        match self {
            LexError::UnterminatedString => "Unterminated string.",
            LexError::UnexpectedCharacter => "Unexpected character.",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error(LexError),
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Pipeline, // |>

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,
    Arrow,
    Reflect, // #

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    LetBang,
    Func,
    Fn,
    If,
    Else,
    True,
    False,
    Match,
    Async,
    Await,
    Throw,
    Try,
    Catch,
    Import,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A scanned token. The lexeme borrows from the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
    pub line: usize,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

impl Token<'_> {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    /// Human readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EOF => String::from("end of input"),
            _ => self.lexeme.to_string(),
        }
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Number,
        ]) {
            format!("{} ({})", self.kind, self.lexeme)
        } else if let TokenKind::Error(error) = self.kind {
            format!("Error ({})", error.message())
        } else {
            format!("{} ()", self.kind)
        }
    }
}
