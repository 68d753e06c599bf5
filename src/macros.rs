//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SPAN!` - Creates a Span between two byte offsets of one file
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The slice of source text the token covers
/// * `$span` - The source span
/// * `$line` - The line the token starts on
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42", span, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr, $line:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
            line: $line,
        }
    };
}

/// Creates a Span from a start and end byte offset and a shared file name.
///
/// ```ignore
/// let span = MK_SPAN!(lexer.start, lexer.current, lexer.file);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($start:expr, $end:expr, $file:expr) => {
        Span {
            start: Position($start as u32, Rc::clone(&$file)),
            end: Position($end as u32, Rc::clone(&$file)),
        }
    };
}
