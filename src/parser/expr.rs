use crate::{
    ast::ast::{Fields, Node},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{BindingPower, LEDHandler},
    parser::{Parser, MAX_CALL_ARGUMENTS},
    stmt::{parse_block, parse_params},
};

/// Precedence climbing over the rule table.
///
/// Consumes one token and runs its prefix handler, then folds infix
/// operators into the left operand with [`parse_infix`].
pub fn parse_expr<'src>(parser: &mut Parser<'src>, bp: BindingPower) -> Result<Node<'src>, Error> {
    parser.nested(|parser| {
        let token = parser.advance();
        let nud = parser.rules().nud(token.kind);
        let left = nud(parser, token)?;

        parse_infix(parser, left, bp)
    })
}

/// Folds infix operators into `left` while the upcoming token binds strictly
/// tighter than `bp`. Every fold adds a level to the tree, so each one is
/// parsed a nesting level deeper than the last.
pub fn parse_infix<'src>(parser: &mut Parser<'src>, left: Node<'src>, bp: BindingPower) -> Result<Node<'src>, Error> {
    let Some(led) = next_led(parser, bp) else {
        return Ok(left);
    };

    let token = parser.advance();
    let token_bp = parser.rules().bp(token.kind);
    let left = led(parser, left, token, token_bp)?;

    if next_led(parser, bp).is_none() {
        return Ok(left);
    }
    parser.nested(|parser| parse_infix(parser, left, bp))
}

/// Infix handler of the current token, if it binds tighter than `bp`.
fn next_led<'src>(parser: &Parser<'src>, bp: BindingPower) -> Option<LEDHandler<'src>> {
    if parser.check(TokenKind::EOF) || parser.current_bp() <= bp {
        return None;
    }
    parser.rules().led(parser.current_token_kind())
}

/// Default prefix handler for tokens that cannot start an expression.
pub fn parse_missing_expr<'src>(parser: &mut Parser<'src>, token: Token<'src>) -> Result<Node<'src>, Error> {
    if token.is_eof() {
        return Err(parser.error_at(&token, ErrorImpl::UnexpectedEof));
    }

    Err(parser.error_at(
        &token,
        ErrorImpl::ExpectedExpression {
            token: token.lexeme.to_string(),
        },
    ))
}

pub fn parse_literal_expr<'src>(_parser: &mut Parser<'src>, token: Token<'src>) -> Result<Node<'src>, Error> {
    Ok(Node::Literal { token })
}

pub fn parse_bool_expr<'src>(_parser: &mut Parser<'src>, token: Token<'src>) -> Result<Node<'src>, Error> {
    Ok(Node::BoolLiteral {
        value: token.kind == TokenKind::True,
    })
}

pub fn parse_variable_expr<'src>(_parser: &mut Parser<'src>, token: Token<'src>) -> Result<Node<'src>, Error> {
    Ok(Node::Variable { name: token })
}

pub fn parse_grouping_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let expression = parser.unrestricted(|parser| parse_expr(parser, BindingPower::Default))?;
    parser.expect(TokenKind::CloseParen, "expected ')' after expression")?;

    Ok(Node::Grouping {
        expression: Box::new(expression),
    })
}

pub fn parse_unary_expr<'src>(parser: &mut Parser<'src>, operator: Token<'src>) -> Result<Node<'src>, Error> {
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Node::Unary {
        operator,
        right: Box::new(right),
    })
}

pub fn parse_list_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let elements = parser.unrestricted(|parser| -> Result<_, Error> {
        let mut elements = vec![];
        while parser.before(TokenKind::CloseBracket) {
            elements.push(parse_expr(parser, BindingPower::Default)?);
            parser.matches(TokenKind::Comma);
        }
        Ok(elements)
    })?;

    parser.expect(TokenKind::CloseBracket, "expected ']' after list elements")?;

    Ok(Node::ListLiteral { elements })
}

/// `name = value` pairs up to the closing `}`. The opening brace has already
/// been consumed.
fn parse_struct_fields<'src>(parser: &mut Parser<'src>) -> Result<Fields<'src>, Error> {
    let fields = parser.unrestricted(|parser| -> Result<_, Error> {
        let mut fields = Fields::new();
        while parser.before(TokenKind::CloseCurly) {
            let key = parser.expect(TokenKind::Identifier, "expected field name in struct")?;
            parser.expect(TokenKind::Assignment, "expected '=' after field name")?;
            let value = parse_expr(parser, BindingPower::Default)?;

            fields.push(key, value);
            parser.matches(TokenKind::Comma);
        }
        Ok(fields)
    })?;

    parser.expect(TokenKind::CloseCurly, "expected '}' after struct fields")?;

    Ok(fields)
}

pub fn parse_struct_literal_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let fields = parse_struct_fields(parser)?;
    Ok(Node::StructLiteral { fields })
}

/// `( PARAMS ) -> { BODY }` after the `fn` keyword.
fn parse_lambda_parts<'src>(parser: &mut Parser<'src>) -> Result<(Vec<Token<'src>>, Vec<Node<'src>>), Error> {
    parser.expect(TokenKind::OpenParen, "expected '(' after 'fn'")?;
    let params = parse_params(parser)?;

    parser.expect(TokenKind::Arrow, "expected '->' after lambda parameters")?;
    parser.expect(TokenKind::OpenCurly, "expected '{' before lambda body")?;
    let body = parse_block(parser)?;

    Ok((params, body))
}

pub fn parse_lambda_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let (params, body) = parse_lambda_parts(parser)?;
    Ok(Node::LambdaExpression { params, body })
}

/// `async fn ( PARAMS ) -> { BODY }`. `async func` is a statement and is
/// dispatched before this handler is reached.
pub fn parse_async_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    parser.expect(TokenKind::Fn, "expected 'fn' after 'async'")?;
    let (params, body) = parse_lambda_parts(parser)?;

    Ok(Node::AsyncLambdaExpression { params, body })
}

pub fn parse_if_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let condition = parser.restricted(|parser| parse_expr(parser, BindingPower::Default))?;

    parser.expect(TokenKind::OpenCurly, "expected '{' after if condition")?;
    let then_branch = parse_block(parser)?;

    let else_branch = if parser.matches(TokenKind::Else) {
        if parser.check(TokenKind::If) {
            let token = parser.advance();
            Some(vec![parser.nested(|parser| parse_if_expr(parser, token))?])
        } else {
            parser.expect(TokenKind::OpenCurly, "expected '{' after 'else'")?;
            Some(parse_block(parser)?)
        }
    } else {
        None
    };

    Ok(Node::IfExpression {
        condition: Box::new(condition),
        then_branch,
        else_branch,
    })
}

pub fn parse_await_expr<'src>(parser: &mut Parser<'src>, _token: Token<'src>) -> Result<Node<'src>, Error> {
    let expression = parse_expr(parser, BindingPower::Default)?;

    Ok(Node::AwaitExpression {
        expression: Box::new(expression),
    })
}

pub fn parse_binary_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    operator: Token<'src>,
    bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let right = parse_expr(parser, bp)?;

    Ok(Node::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

pub fn parse_pipeline_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    _token: Token<'src>,
    bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let right = parse_expr(parser, bp)?;

    Ok(Node::Pipeline {
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Right associative: the value is parsed one level below `=` so a chain
/// nests to the right.
pub fn parse_assignment_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    token: Token<'src>,
    _bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let value = parse_expr(parser, BindingPower::Default)?;

    match left {
        Node::Variable { name } => Ok(Node::Assignment {
            name,
            value: Box::new(value),
        }),
        _ => Err(parser.error_at(
            &token,
            ErrorImpl::InvalidAssignmentTarget {
                token: left.to_string(),
            },
        )),
    }
}

pub fn parse_call_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    _token: Token<'src>,
    _bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let arguments = parser.unrestricted(|parser| -> Result<_, Error> {
        let mut arguments = vec![];
        let mut reported = false;

        while parser.before(TokenKind::CloseParen) {
            if arguments.len() == MAX_CALL_ARGUMENTS && !reported {
                let error = parser.error_at_current(ErrorImpl::TooManyArguments {
                    max: MAX_CALL_ARGUMENTS,
                });
                parser.record(error);
                reported = true;
            }

            arguments.push(parse_expr(parser, BindingPower::Default)?);
            parser.matches(TokenKind::Comma);
        }
        Ok(arguments)
    })?;

    parser.expect(TokenKind::CloseParen, "expected ')' after arguments")?;

    Ok(Node::Call {
        callee: Box::new(left),
        arguments,
    })
}

pub fn parse_property_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    _token: Token<'src>,
    _bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let property = parser.expect(TokenKind::Identifier, "expected property name after '.'")?;

    Ok(Node::PropertyAccess {
        object: Box::new(left),
        property,
    })
}

pub fn parse_struct_update_expr<'src>(
    parser: &mut Parser<'src>,
    left: Node<'src>,
    _token: Token<'src>,
    _bp: BindingPower,
) -> Result<Node<'src>, Error> {
    let fields = parse_struct_fields(parser)?;

    Ok(Node::StructUpdate {
        base: Box::new(left),
        fields,
    })
}
