use std::fmt::{self, Display, Formatter};

use crate::lexer::tokens::Token;

use super::ast::{Fields, Node, Program};

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// `{ s1; s2 }`, or `{ }` for an empty body.
fn write_body(f: &mut Formatter<'_>, body: &[Node<'_>]) -> fmt::Result {
    write!(f, "{{")?;
    if !body.is_empty() {
        write!(f, " ")?;
        write_joined(f, body, "; ")?;
    }
    write!(f, " }}")
}

fn write_params(f: &mut Formatter<'_>, params: &[Token<'_>]) -> fmt::Result {
    write!(f, "(")?;
    write_joined(f, params, ", ")?;
    write!(f, ")")
}

fn write_fields(f: &mut Formatter<'_>, fields: &Fields<'_>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, " {} = {}", key, value)?;
    }
    write!(f, " }}")
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal { token } => write!(f, "{}", token),
            Node::BoolLiteral { value } => write!(f, "{}", value),
            Node::Unary { operator, right } => write!(f, "{}({})", operator, right),
            Node::Binary {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Node::Grouping { expression } => write!(f, "({})", expression),
            Node::Variable { name } => write!(f, "{}", name),
            Node::Assignment { name, value } => write!(f, "{} = {}", name, value),
            Node::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                write_joined(f, arguments, ", ")?;
                write!(f, ")")
            }
            Node::LetStatement { name, initializer } => {
                write!(f, "let {} = {}", name, initializer)
            }
            Node::LetBangStatement { name, initializer } => {
                write!(f, "let! {} = {}", name, initializer)
            }
            Node::ExpressionStatement { expression } => write!(f, "{}", expression),
            Node::FunctionStatement { name, params, body } => {
                write!(f, "func {}", name)?;
                write_params(f, params)?;
                write!(f, " ")?;
                write_body(f, body)
            }
            Node::AsyncFunctionStatement { name, params, body } => {
                write!(f, "async func {}", name)?;
                write_params(f, params)?;
                write!(f, " ")?;
                write_body(f, body)
            }
            Node::LambdaExpression { params, body } => {
                write!(f, "fn")?;
                write_params(f, params)?;
                write!(f, " -> ")?;
                write_body(f, body)
            }
            Node::AsyncLambdaExpression { params, body } => {
                write!(f, "async fn")?;
                write_params(f, params)?;
                write!(f, " -> ")?;
                write_body(f, body)
            }
            Node::MatchStatement { value, arms } => {
                writeln!(f, "match {} {{", value)?;
                for arm in arms {
                    writeln!(f, "  {} -> {},", arm.pattern, arm.expression)?;
                }
                write!(f, "}}")
            }
            Node::StructLiteral { fields } => write_fields(f, fields),
            Node::StructUpdate { base, fields } => {
                write!(f, "{} ", base)?;
                write_fields(f, fields)
            }
            Node::ListLiteral { elements } => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            Node::PropertyAccess { object, property } => write!(f, "{}.{}", object, property),
            Node::Pipeline { left, right } => write!(f, "({} |> {})", left, right),
            Node::ImportStatement { path } => write!(f, "import {}", path),
            Node::IfExpression {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "if {} ", condition)?;
                write_body(f, then_branch)?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else ")?;
                    write_body(f, else_branch)?;
                }
                Ok(())
            }
            Node::AwaitExpression { expression } => write!(f, "await {}", expression),
            Node::Error => write!(f, "<error>"),
        }
    }
}

/// One top-level statement per line.
impl Display for Program<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}
