//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.lang".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "@".to_string(),
        },
        at(10),
        1,
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert!(error.is_lex_error());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
            message: "expected ')' after arguments".to_string(),
        },
        at(42),
        3,
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.lang");
    assert_eq!(error.get_line(), 3);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "=".to_string(),
            message: "expected variable name after 'let'".to_string(),
        },
        at(4),
        1,
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert!(!error.is_lex_error());
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `=`, expected variable name after 'let'"
    );
}

#[test]
fn test_expected_expression_error() {
    let error = Error::new(
        ErrorImpl::ExpectedExpression {
            token: ")".to_string(),
        },
        at(0),
        1,
    );

    assert_eq!(error.get_error_name(), "ExpectedExpression");
    assert_eq!(error.to_string(), "[line 1] expected expression, found \")\"");
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(ErrorImpl::UnterminatedString, at(0), 2);

    assert!(error.is_lex_error());
    assert_eq!(error.to_string(), "[line 2] Unterminated string.");
}

#[test]
fn test_too_many_arguments_error() {
    let error = Error::new(ErrorImpl::TooManyArguments { max: 255 }, at(0), 1);

    assert_eq!(error.get_error_name(), "TooManyArguments");
    assert_eq!(
        error.get_tip().to_string(),
        "A call can take at most 255 arguments"
    );
}

#[test]
fn test_invalid_assignment_target_error() {
    let error = Error::new(
        ErrorImpl::InvalidAssignmentTarget {
            token: "=".to_string(),
        },
        at(6),
        1,
    );

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
    assert!(!error.is_lex_error());
}

#[test]
fn test_unexpected_eof_error() {
    let error = Error::new(ErrorImpl::UnexpectedEof, at(7), 1);

    assert_eq!(error.get_error_name(), "UnexpectedEof");
    assert_eq!(error.to_string(), "[line 1] unexpected end of input");
}

#[test]
fn test_error_tip() {
    let tip = ErrorTip::Suggestion("Try using a different variable name".to_string());
    assert_eq!(tip.to_string(), "Try using a different variable name");

    let no_tip = ErrorTip::None;
    assert_eq!(no_tip.to_string(), "");

    let error = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "$".to_string(),
        },
        at(0),
        1,
    );
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_equality() {
    let a = Error::new(ErrorImpl::UnexpectedEof, at(3), 1);
    let b = Error::new(ErrorImpl::UnexpectedEof, at(3), 1);
    let c = Error::new(ErrorImpl::UnexpectedEof, at(4), 1);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { max: 128 }, at(9), 1);

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_kind(), &ErrorImpl::NestingTooDeep { max: 128 });
    assert_eq!(error.to_string(), "[line 1] nesting too deep (at most 128 levels)");
    assert!(!error.is_lex_error());
}
