use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    line: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            position,
            line,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Lex errors arrive through the token stream; everything else comes from
    /// a failing production.
    pub fn is_lex_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnterminatedString | ErrorImpl::UnexpectedCharacter { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof => "UnexpectedEof",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Add a closing `\"` to the string literal"))
            }
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::ExpectedExpression { token } => ErrorTip::Suggestion(format!(
                "No expression can start with `{}`",
                token
            )),
            ErrorImpl::UnexpectedToken { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEof => ErrorTip::Suggestion(String::from(
                "The source ended in the middle of a statement",
            )),
            ErrorImpl::TooManyArguments { max } => {
                ErrorTip::Suggestion(format!("A call can take at most {} arguments", max))
            }
            ErrorImpl::InvalidAssignmentTarget { token } => ErrorTip::Suggestion(format!(
                "Only a variable can be assigned to, found `{}`",
                token
            )),
            ErrorImpl::NestingTooDeep { max } => ErrorTip::Suggestion(format!(
                "Split the expression up, at most {} levels of nesting are allowed",
                max
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.line, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Unexpected character: {character:?}")]
    UnexpectedCharacter { character: String },
    #[error("expected expression, found {token:?}")]
    ExpectedExpression { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedToken { token: String, message: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("too many arguments in function call (at most {max})")]
    TooManyArguments { max: usize },
    #[error("invalid assignment target: {token:?}")]
    InvalidAssignmentTarget { token: String },
    #[error("nesting too deep (at most {max} levels)")]
    NestingTooDeep { max: usize },
}
