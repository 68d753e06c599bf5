use log::debug;

use crate::{
    ast::ast::{MatchArm, Node},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_async_expr, parse_expr, parse_infix},
    lookups::BindingPower,
    parser::Parser,
};

/// Dispatches on the leading keyword, falling back to an expression
/// statement. No terminator is consumed after the statement.
pub fn parse_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    let token = parser.current_token();
    debug!("{}:{} statement at {}", parser.file(), token.line, token.debug());

    if let Some(stmt_fn) = parser.rules().stmt(parser.current_token_kind()) {
        return stmt_fn(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::ExpressionStatement {
        expression: Box::new(expression),
    })
}

/// Statements up to the closing `}`. The opening brace has already been
/// consumed.
pub fn parse_block<'src>(parser: &mut Parser<'src>) -> Result<Vec<Node<'src>>, Error> {
    let body = parser.nested(|parser| {
        parser.unrestricted(|parser| -> Result<_, Error> {
            let mut body = vec![];
            while parser.before(TokenKind::CloseCurly) {
                body.push(parse_stmt(parser)?);
            }
            Ok(body)
        })
    })?;

    parser.expect(TokenKind::CloseCurly, "expected '}' after block")?;

    Ok(body)
}

/// Comma separated identifiers up to the closing `)`. The opening paren has
/// already been consumed.
pub fn parse_params<'src>(parser: &mut Parser<'src>) -> Result<Vec<Token<'src>>, Error> {
    let mut params = vec![];

    if !parser.check(TokenKind::CloseParen) {
        loop {
            params.push(parser.expect(TokenKind::Identifier, "expected parameter name")?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "expected ')' after parameters")?;

    Ok(params)
}

/// `let NAME = EXPR` and `let! NAME = EXPR`.
pub fn parse_let_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    let keyword = parser.advance();

    let message = format!("expected variable name after '{}'", keyword.lexeme);
    let name = parser.expect(TokenKind::Identifier, &message)?;
    parser.expect(TokenKind::Assignment, "expected '=' after variable name")?;

    let initializer = Box::new(parse_expr(parser, BindingPower::Default)?);

    if keyword.kind == TokenKind::LetBang {
        Ok(Node::LetBangStatement { name, initializer })
    } else {
        Ok(Node::LetStatement { name, initializer })
    }
}

type FunctionParts<'src> = (Token<'src>, Vec<Token<'src>>, Vec<Node<'src>>);

/// `NAME ( PARAMS ) { BODY }` after the `func` keyword.
fn parse_function_parts<'src>(parser: &mut Parser<'src>) -> Result<FunctionParts<'src>, Error> {
    let name = parser.expect(TokenKind::Identifier, "expected function name after 'func'")?;
    parser.expect(TokenKind::OpenParen, "expected '(' after function name")?;
    let params = parse_params(parser)?;

    parser.expect(TokenKind::OpenCurly, "expected '{' before function body")?;
    let body = parse_block(parser)?;

    Ok((name, params, body))
}

pub fn parse_func_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    parser.advance();

    let (name, params, body) = parse_function_parts(parser)?;
    Ok(Node::FunctionStatement { name, params, body })
}

/// `async func ...` is a statement. `async fn ...` is an async lambda that
/// may continue as an ordinary expression statement.
pub fn parse_async_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    let keyword = parser.advance();

    if parser.matches(TokenKind::Func) {
        let (name, params, body) = parse_function_parts(parser)?;
        return Ok(Node::AsyncFunctionStatement { name, params, body });
    }

    if !parser.check(TokenKind::Fn) {
        return Err(parser.error_at_current(ErrorImpl::UnexpectedToken {
            token: parser.current_token().describe(),
            message: String::from("expected 'func' or 'fn' after 'async'"),
        }));
    }

    let lambda = parse_async_expr(parser, keyword)?;
    let expression = parse_infix(parser, lambda, BindingPower::Default)?;

    Ok(Node::ExpressionStatement {
        expression: Box::new(expression),
    })
}

pub fn parse_match_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    parser.advance();

    let value = parser.restricted(|parser| parse_expr(parser, BindingPower::Default))?;
    parser.expect(TokenKind::OpenCurly, "expected '{' after match value")?;

    let arms = parser.unrestricted(|parser| -> Result<_, Error> {
        let mut arms = vec![];
        while parser.before(TokenKind::CloseCurly) {
            let pattern = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Arrow, "expected '->' after match pattern")?;
            let expression = parse_expr(parser, BindingPower::Default)?;

            arms.push(MatchArm { pattern, expression });
            parser.matches(TokenKind::Comma);
        }
        Ok(arms)
    })?;

    parser.expect(TokenKind::CloseCurly, "expected '}' after match arms")?;

    Ok(Node::MatchStatement {
        value: Box::new(value),
        arms,
    })
}

pub fn parse_import_stmt<'src>(parser: &mut Parser<'src>) -> Result<Node<'src>, Error> {
    parser.advance();

    let path = parser.expect(TokenKind::String, "expected string after 'import'")?;

    Ok(Node::ImportStatement { path })
}
