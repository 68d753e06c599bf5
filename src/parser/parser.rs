//! Parser state and the top-level parse loop.
//!
//! The parser pulls tokens from the lexer one at a time and keeps the
//! current and previous token. Expression parsing is a Pratt parser driven
//! by the [`RuleTable`]:
//! - Statement handlers, keyed by the leading keyword
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{mem, rc::Rc};

use log::{debug, info};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{LexError, Token, TokenKind},
    },
};

use super::{
    lookups::{BindingPower, RuleTable},
    stmt::parse_stmt,
};

/// Most arguments a single call may take.
pub const MAX_CALL_ARGUMENTS: usize = 255;

/// Deepest nesting of expressions, operator chains and blocks.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// The token about to be consumed
    current: Token<'src>,
    /// The most recently consumed token
    previous: Token<'src>,
    /// Sticky: once set, the top-level loop stops after the current statement
    had_error: bool,
    diagnostics: Vec<Error>,
    rules: RuleTable<'src>,
    /// While set, `{` does not continue an expression as a struct update
    no_struct_update: bool,
    /// Current nesting level, bounded by `MAX_NESTING_DEPTH`
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser positioned on the first token of `source`.
    pub fn new(source: &'src str, file: Option<String>) -> Self {
        let mut lexer = Lexer::new(source, file);
        let first = lexer.next_token();

        let mut parser = Parser {
            lexer,
            previous: first.clone(),
            current: first,
            had_error: false,
            diagnostics: Vec::new(),
            rules: RuleTable::new(),
            no_struct_update: false,
            depth: 0,
        };
        parser.check_lex_error();
        parser
    }

    pub fn current_token(&self) -> &Token<'src> {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn rules(&self) -> &RuleTable<'src> {
        &self.rules
    }

    pub fn file(&self) -> Rc<String> {
        self.lexer.file()
    }

    /// Consumes the current token and returns it. A lex error token that
    /// becomes current is recorded without setting the sticky flag.
    pub fn advance(&mut self) -> Token<'src> {
        let next = self.lexer.next_token();
        self.previous = mem::replace(&mut self.current, next);
        self.check_lex_error();
        self.previous.clone()
    }

    fn check_lex_error(&mut self) {
        let TokenKind::Error(error) = self.current.kind else {
            return;
        };

        let error_impl = match error {
            LexError::UnterminatedString => ErrorImpl::UnterminatedString,
            LexError::UnexpectedCharacter => ErrorImpl::UnexpectedCharacter {
                character: self.current.lexeme.to_string(),
            },
        };

        let error = Error::new(error_impl, self.current.span.start.clone(), self.current.line);
        debug!("{}", error);
        self.diagnostics.push(error);
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token only if it is of `kind`.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True while the current token is neither `kind` nor the end of input.
    pub fn before(&self, kind: TokenKind) -> bool {
        !self.check(kind) && !self.check(TokenKind::EOF)
    }

    /// Consumes a token of `expected_kind` or fails with `message`.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token<'src>, Error> {
        if self.check(expected_kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(ErrorImpl::UnexpectedToken {
                token: self.current.describe(),
                message: message.to_string(),
            }))
        }
    }

    pub fn error_at(&self, token: &Token<'src>, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, token.span.start.clone(), token.line)
    }

    pub fn error_at_current(&self, error_impl: ErrorImpl) -> Error {
        self.error_at(&self.current, error_impl)
    }

    /// Records a diagnostic and sets the sticky error flag.
    pub fn record(&mut self, error: Error) {
        debug!("{}", error);
        self.diagnostics.push(error);
        self.had_error = true;
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }

    /// Binding power of the current token as an infix operator.
    pub fn current_bp(&self) -> BindingPower {
        if self.no_struct_update && self.check(TokenKind::OpenCurly) {
            return BindingPower::Default;
        }
        self.rules.bp(self.current.kind)
    }

    fn with_struct_update<T>(&mut self, allowed: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.no_struct_update;
        self.no_struct_update = !allowed;
        let result = f(self);
        self.no_struct_update = saved;
        result
    }

    /// Runs `f` with `{` closing the expression instead of starting a struct
    /// update. Used for `match` values and `if` conditions.
    pub fn restricted<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_struct_update(false, f)
    }

    /// Lifts the restriction inside delimited sub-expressions.
    pub fn unrestricted<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_struct_update(true, f)
    }

    /// Runs `f` one nesting level deeper. Fails with `NestingTooDeep` at the
    /// current token once `MAX_NESTING_DEPTH` levels are open, which also
    /// bounds the height of every tree the parser builds.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at_current(ErrorImpl::NestingTooDeep {
                max: MAX_NESTING_DEPTH,
            }));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Parses a whole source buffer.
///
/// This is the main entry point for parsing. Statements are parsed until the
/// end of input, a failing statement, or a recorded error that sets the
/// sticky flag. The parser is returned alongside the program so callers can
/// inspect its diagnostics.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - The program holding every statement parsed before the first failure
pub fn parse(source: &str, file: Option<String>) -> (Parser<'_>, Program<'_>) {
    let mut parser = Parser::new(source, file);
    let mut program = Program::new();

    info!("parsing {}", parser.file());

    while !parser.check(TokenKind::EOF) && !parser.had_error() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => program.push(stmt),
            Err(error) => {
                parser.record(error);
                break;
            }
        }
    }

    info!(
        "parsed {}: {} statements, {} diagnostics",
        parser.file(),
        program.len(),
        parser.diagnostics().len()
    );

    (parser, program)
}
