//! Unit tests for the syntax tree.
//!
//! Nodes are built by hand here so rendering and teardown can be checked
//! independently of the parser.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::ast::{Fields, MatchArm, Node, NodeType, Program};

fn token(kind: TokenKind, lexeme: &'static str) -> Token<'static> {
    let file = Rc::new(String::from("test.lang"));
    MK_TOKEN!(kind, lexeme, MK_SPAN!(0, lexeme.len(), file), 1)
}

fn number(lexeme: &'static str) -> Node<'static> {
    Node::Literal {
        token: token(TokenKind::Number, lexeme),
    }
}

fn variable(name: &'static str) -> Node<'static> {
    Node::Variable {
        name: token(TokenKind::Identifier, name),
    }
}

fn binary(left: Node<'static>, op: &'static str, right: Node<'static>) -> Node<'static> {
    let kind = match op {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Dash,
        "*" => TokenKind::Star,
        _ => TokenKind::Slash,
    };
    Node::Binary {
        left: Box::new(left),
        operator: token(kind, op),
        right: Box::new(right),
    }
}

#[test]
fn test_render_binary() {
    let node = binary(number("1"), "+", binary(number("2"), "*", number("3")));
    assert_eq!(node.to_string(), "(1 + (2 * 3))");
}

#[test]
fn test_render_unary_and_grouping() {
    let node = Node::Unary {
        operator: token(TokenKind::Dash, "-"),
        right: Box::new(Node::Grouping {
            expression: Box::new(variable("a")),
        }),
    };
    assert_eq!(node.to_string(), "-((a))");
}

#[test]
fn test_render_call() {
    let call = Node::Call {
        callee: Box::new(variable("f")),
        arguments: vec![number("1"), number("2")],
    };
    assert_eq!(call.to_string(), "f(1, 2)");

    let empty = Node::Call {
        callee: Box::new(variable("f")),
        arguments: vec![],
    };
    assert_eq!(empty.to_string(), "f()");
}

#[test]
fn test_render_let_forms() {
    let plain = Node::LetStatement {
        name: token(TokenKind::Identifier, "x"),
        initializer: Box::new(number("42")),
    };
    let bang = Node::LetBangStatement {
        name: token(TokenKind::Identifier, "y"),
        initializer: Box::new(Node::BoolLiteral { value: true }),
    };

    assert_eq!(plain.to_string(), "let x = 42");
    assert_eq!(bang.to_string(), "let! y = true");
}

#[test]
fn test_render_function_and_lambda() {
    let func = Node::FunctionStatement {
        name: token(TokenKind::Identifier, "add"),
        params: vec![
            token(TokenKind::Identifier, "a"),
            token(TokenKind::Identifier, "b"),
        ],
        body: vec![Node::ExpressionStatement {
            expression: Box::new(binary(variable("a"), "+", variable("b"))),
        }],
    };
    assert_eq!(func.to_string(), "func add(a, b) { (a + b) }");

    let lambda = Node::LambdaExpression {
        params: vec![],
        body: vec![],
    };
    assert_eq!(lambda.to_string(), "fn() -> { }");
}

#[test]
fn test_render_match() {
    let node = Node::MatchStatement {
        value: Box::new(variable("x")),
        arms: vec![
            MatchArm {
                pattern: number("1"),
                expression: variable("a"),
            },
            MatchArm {
                pattern: number("2"),
                expression: variable("b"),
            },
        ],
    };
    assert_eq!(node.to_string(), "match x {\n  1 -> a,\n  2 -> b,\n}");

    let empty = Node::MatchStatement {
        value: Box::new(variable("x")),
        arms: vec![],
    };
    assert_eq!(empty.to_string(), "match x {\n}");
}

#[test]
fn test_render_structs() {
    let mut fields = Fields::new();
    fields.push(token(TokenKind::Identifier, "x"), number("1"));
    fields.push(token(TokenKind::Identifier, "y"), number("2"));

    let literal = Node::StructLiteral {
        fields: fields.clone(),
    };
    assert_eq!(literal.to_string(), "{ x = 1, y = 2 }");

    let update = Node::StructUpdate {
        base: Box::new(variable("p")),
        fields,
    };
    assert_eq!(update.to_string(), "p { x = 1, y = 2 }");

    let empty = Node::StructLiteral {
        fields: Fields::new(),
    };
    assert_eq!(empty.to_string(), "{ }");
}

#[test]
fn test_render_list_property_pipeline() {
    let list = Node::ListLiteral {
        elements: vec![number("1"), number("2")],
    };
    assert_eq!(list.to_string(), "[1, 2]");

    let property = Node::PropertyAccess {
        object: Box::new(variable("a")),
        property: token(TokenKind::Identifier, "b"),
    };
    assert_eq!(property.to_string(), "a.b");

    let pipeline = Node::Pipeline {
        left: Box::new(variable("a")),
        right: Box::new(variable("b")),
    };
    assert_eq!(pipeline.to_string(), "(a |> b)");
}

#[test]
fn test_render_import_if_await_error() {
    let import = Node::ImportStatement {
        path: token(TokenKind::String, "\"std/io\""),
    };
    assert_eq!(import.to_string(), "import \"std/io\"");

    let if_expr = Node::IfExpression {
        condition: Box::new(variable("c")),
        then_branch: vec![number("1")],
        else_branch: Some(vec![number("2")]),
    };
    assert_eq!(if_expr.to_string(), "if c { 1 } else { 2 }");

    let await_expr = Node::AwaitExpression {
        expression: Box::new(variable("task")),
    };
    assert_eq!(await_expr.to_string(), "await task");
    assert_eq!(Node::Error.to_string(), "<error>");
}

#[test]
fn test_fields_stay_parallel() {
    let mut fields = Fields::new();
    assert!(fields.is_empty());

    fields.push(token(TokenKind::Identifier, "a"), number("1"));
    fields.push(token(TokenKind::Identifier, "b"), number("2"));

    assert_eq!(fields.len(), 2);
    assert_eq!(fields.keys().len(), fields.values().len());
    assert_eq!(fields.keys()[1].lexeme, "b");
    assert_eq!(fields.values()[1].to_string(), "2");
}

#[test]
fn test_node_count() {
    // (1 + (2 * 3)) is five nodes
    let node = binary(number("1"), "+", binary(number("2"), "*", number("3")));
    assert_eq!(node.node_count(), 5);

    let mut fields = Fields::new();
    fields.push(token(TokenKind::Identifier, "x"), number("1"));
    let update = Node::StructUpdate {
        base: Box::new(variable("p")),
        fields,
    };
    assert_eq!(update.node_count(), 3);
}

#[test]
fn test_release_matches_node_count() {
    let node = Node::IfExpression {
        condition: Box::new(variable("c")),
        then_branch: vec![Node::Call {
            callee: Box::new(variable("f")),
            arguments: vec![number("1"), number("2")],
        }],
        else_branch: Some(vec![Node::MatchStatement {
            value: Box::new(variable("x")),
            arms: vec![MatchArm {
                pattern: number("1"),
                expression: variable("a"),
            }],
        }]),
    };

    let expected = node.node_count();
    assert_eq!(expected, 10);
    assert_eq!(node.release(), expected);
}

#[test]
fn test_children_order() {
    let call = Node::Call {
        callee: Box::new(variable("f")),
        arguments: vec![number("1"), number("2")],
    };
    let rendered: Vec<String> = call.children().iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["f", "1", "2"]);
}

#[test]
fn test_node_types() {
    assert_eq!(number("1").get_node_type(), NodeType::Literal);
    assert_eq!(Node::Error.get_node_type(), NodeType::Error);

    let stmt = Node::ExpressionStatement {
        expression: Box::new(number("1")),
    };
    assert!(stmt.is_statement());
    assert!(!number("1").is_statement());
}

#[test]
fn test_program_render_and_release() {
    let mut program = Program::new();
    assert!(program.is_empty());

    program.push(Node::LetStatement {
        name: token(TokenKind::Identifier, "x"),
        initializer: Box::new(number("1")),
    });
    program.push(Node::ExpressionStatement {
        expression: Box::new(binary(variable("x"), "+", number("2"))),
    });

    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "let x = 1\n(x + 2)\n");
    assert_eq!(program.node_count(), 6);
    assert_eq!(program.release(), 6);
}

#[test]
fn test_render_and_release_async_forms() {
    let func = Node::AsyncFunctionStatement {
        name: token(TokenKind::Identifier, "load"),
        params: vec![token(TokenKind::Identifier, "path")],
        body: vec![Node::AwaitExpression {
            expression: Box::new(variable("path")),
        }],
    };
    assert_eq!(func.to_string(), "async func load(path) { await path }");
    assert_eq!(func.get_node_type(), NodeType::AsyncFunctionStatement);
    assert!(func.is_statement());
    assert_eq!(func.release(), 3);

    let lambda = Node::AsyncLambdaExpression {
        params: vec![],
        body: vec![number("1")],
    };
    assert_eq!(lambda.to_string(), "async fn() -> { 1 }");
    assert_eq!(lambda.children().len(), 1);
    assert!(!lambda.is_statement());
}
