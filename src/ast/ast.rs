use std::slice::Iter;

use crate::lexer::tokens::Token;

/// Node Types
///
/// A flat tag for each node variant, used where only the kind matters.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Literal,
    BoolLiteral,
    Unary,
    Binary,
    Grouping,
    Variable,
    Assignment,
    Call,
    LetStatement,
    LetBangStatement,
    ExpressionStatement,
    FunctionStatement,
    AsyncFunctionStatement,
    LambdaExpression,
    AsyncLambdaExpression,
    MatchStatement,
    StructLiteral,
    StructUpdate,
    ListLiteral,
    PropertyAccess,
    Pipeline,
    ImportStatement,
    IfExpression,
    AwaitExpression,
    Error,
}

/// One `pattern -> expression` clause of a match statement.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm<'src> {
    pub pattern: Node<'src>,
    pub expression: Node<'src>,
}

/// Field names and values of a struct literal or update, in source order.
///
/// Keys and values are only ever pushed together, so both sequences always
/// have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields<'src> {
    keys: Vec<Token<'src>>,
    values: Vec<Node<'src>>,
}

impl<'src> Fields<'src> {
    pub fn new() -> Self {
        Fields {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, key: Token<'src>, value: Node<'src>) {
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn keys(&self) -> &[Token<'src>] {
        &self.keys
    }

    pub fn values(&self) -> &[Node<'src>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token<'src>, &Node<'src>)> {
        self.keys.iter().zip(self.values.iter())
    }

    fn into_values(self) -> Vec<Node<'src>> {
        self.values
    }
}

/// A node of the syntax tree.
///
/// Every child is owned by exactly one parent through `Box` or `Vec`, so the
/// tree is acyclic and dropping a node releases its whole subtree. Tokens
/// borrow their text from the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// Number or string literal, kept as its source token.
    Literal { token: Token<'src> },
    BoolLiteral { value: bool },
    Unary {
        operator: Token<'src>,
        right: Box<Node<'src>>,
    },
    Binary {
        left: Box<Node<'src>>,
        operator: Token<'src>,
        right: Box<Node<'src>>,
    },
    Grouping { expression: Box<Node<'src>> },
    Variable { name: Token<'src> },
    Assignment {
        name: Token<'src>,
        value: Box<Node<'src>>,
    },
    Call {
        callee: Box<Node<'src>>,
        arguments: Vec<Node<'src>>,
    },
    LetStatement {
        name: Token<'src>,
        initializer: Box<Node<'src>>,
    },
    /// `let! name = value`, the fallible binding form.
    LetBangStatement {
        name: Token<'src>,
        initializer: Box<Node<'src>>,
    },
    ExpressionStatement { expression: Box<Node<'src>> },
    FunctionStatement {
        name: Token<'src>,
        params: Vec<Token<'src>>,
        body: Vec<Node<'src>>,
    },
    /// `async func name(params) { body }`
    AsyncFunctionStatement {
        name: Token<'src>,
        params: Vec<Token<'src>>,
        body: Vec<Node<'src>>,
    },
    LambdaExpression {
        params: Vec<Token<'src>>,
        body: Vec<Node<'src>>,
    },
    AsyncLambdaExpression {
        params: Vec<Token<'src>>,
        body: Vec<Node<'src>>,
    },
    MatchStatement {
        value: Box<Node<'src>>,
        arms: Vec<MatchArm<'src>>,
    },
    StructLiteral { fields: Fields<'src> },
    /// `base { key = value, ... }`
    StructUpdate {
        base: Box<Node<'src>>,
        fields: Fields<'src>,
    },
    ListLiteral { elements: Vec<Node<'src>> },
    PropertyAccess {
        object: Box<Node<'src>>,
        property: Token<'src>,
    },
    Pipeline {
        left: Box<Node<'src>>,
        right: Box<Node<'src>>,
    },
    /// `import "path"`, the path token includes its quotes.
    ImportStatement { path: Token<'src> },
    IfExpression {
        condition: Box<Node<'src>>,
        then_branch: Vec<Node<'src>>,
        else_branch: Option<Vec<Node<'src>>>,
    },
    AwaitExpression { expression: Box<Node<'src>> },
    /// Placeholder for stages that need a node where parsing failed.
    Error,
}

impl<'src> Node<'src> {
    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::Literal { .. } => NodeType::Literal,
            Node::BoolLiteral { .. } => NodeType::BoolLiteral,
            Node::Unary { .. } => NodeType::Unary,
            Node::Binary { .. } => NodeType::Binary,
            Node::Grouping { .. } => NodeType::Grouping,
            Node::Variable { .. } => NodeType::Variable,
            Node::Assignment { .. } => NodeType::Assignment,
            Node::Call { .. } => NodeType::Call,
            Node::LetStatement { .. } => NodeType::LetStatement,
            Node::LetBangStatement { .. } => NodeType::LetBangStatement,
            Node::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            Node::FunctionStatement { .. } => NodeType::FunctionStatement,
            Node::AsyncFunctionStatement { .. } => NodeType::AsyncFunctionStatement,
            Node::LambdaExpression { .. } => NodeType::LambdaExpression,
            Node::AsyncLambdaExpression { .. } => NodeType::AsyncLambdaExpression,
            Node::MatchStatement { .. } => NodeType::MatchStatement,
            Node::StructLiteral { .. } => NodeType::StructLiteral,
            Node::StructUpdate { .. } => NodeType::StructUpdate,
            Node::ListLiteral { .. } => NodeType::ListLiteral,
            Node::PropertyAccess { .. } => NodeType::PropertyAccess,
            Node::Pipeline { .. } => NodeType::Pipeline,
            Node::ImportStatement { .. } => NodeType::ImportStatement,
            Node::IfExpression { .. } => NodeType::IfExpression,
            Node::AwaitExpression { .. } => NodeType::AwaitExpression,
            Node::Error => NodeType::Error,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node<'src>> {
        match self {
            Node::Literal { .. }
            | Node::BoolLiteral { .. }
            | Node::Variable { .. }
            | Node::ImportStatement { .. }
            | Node::Error => vec![],
            Node::Unary { right, .. } => vec![right.as_ref()],
            Node::Binary { left, right, .. } | Node::Pipeline { left, right } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Node::Grouping { expression }
            | Node::ExpressionStatement { expression }
            | Node::AwaitExpression { expression } => vec![expression.as_ref()],
            Node::Assignment { value, .. } => vec![value.as_ref()],
            Node::LetStatement { initializer, .. } | Node::LetBangStatement { initializer, .. } => {
                vec![initializer.as_ref()]
            }
            Node::Call { callee, arguments } => {
                let mut children = vec![callee.as_ref()];
                children.extend(arguments.iter());
                children
            }
            Node::FunctionStatement { body, .. }
            | Node::AsyncFunctionStatement { body, .. }
            | Node::LambdaExpression { body, .. }
            | Node::AsyncLambdaExpression { body, .. } => body.iter().collect(),
            Node::MatchStatement { value, arms } => {
                let mut children = vec![value.as_ref()];
                for arm in arms {
                    children.push(&arm.pattern);
                    children.push(&arm.expression);
                }
                children
            }
            Node::StructLiteral { fields } => fields.values().iter().collect(),
            Node::StructUpdate { base, fields } => {
                let mut children = vec![base.as_ref()];
                children.extend(fields.values().iter());
                children
            }
            Node::ListLiteral { elements } => elements.iter().collect(),
            Node::PropertyAccess { object, .. } => vec![object.as_ref()],
            Node::IfExpression {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![condition.as_ref()];
                children.extend(then_branch.iter());
                if let Some(else_branch) = else_branch {
                    children.extend(else_branch.iter());
                }
                children
            }
        }
    }

    /// Consumes the node and hands back ownership of its direct children.
    fn into_children(self) -> Vec<Node<'src>> {
        match self {
            Node::Literal { .. }
            | Node::BoolLiteral { .. }
            | Node::Variable { .. }
            | Node::ImportStatement { .. }
            | Node::Error => vec![],
            Node::Unary { right, .. } => vec![*right],
            Node::Binary { left, right, .. } | Node::Pipeline { left, right } => vec![*left, *right],
            Node::Grouping { expression }
            | Node::ExpressionStatement { expression }
            | Node::AwaitExpression { expression } => vec![*expression],
            Node::Assignment { value, .. } => vec![*value],
            Node::LetStatement { initializer, .. } | Node::LetBangStatement { initializer, .. } => {
                vec![*initializer]
            }
            Node::Call { callee, mut arguments } => {
                arguments.insert(0, *callee);
                arguments
            }
            Node::FunctionStatement { body, .. }
            | Node::AsyncFunctionStatement { body, .. }
            | Node::LambdaExpression { body, .. }
            | Node::AsyncLambdaExpression { body, .. } => body,
            Node::MatchStatement { value, arms } => {
                let mut children = vec![*value];
                for arm in arms {
                    children.push(arm.pattern);
                    children.push(arm.expression);
                }
                children
            }
            Node::StructLiteral { fields } => fields.into_values(),
            Node::StructUpdate { base, fields } => {
                let mut children = vec![*base];
                children.extend(fields.into_values());
                children
            }
            Node::ListLiteral { elements } => elements,
            Node::PropertyAccess { object, .. } => vec![*object],
            Node::IfExpression {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut children = vec![*condition];
                children.extend(then_branch);
                children.extend(else_branch.into_iter().flatten());
                children
            }
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    /// Tears the subtree down post-order: every child is released before
    /// its parent. Returns the number of nodes released.
    pub fn release(self) -> usize {
        let released = self
            .into_children()
            .into_iter()
            .map(Node::release)
            .sum::<usize>();
        released + 1
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self.get_node_type(),
            NodeType::LetStatement
                | NodeType::LetBangStatement
                | NodeType::ExpressionStatement
                | NodeType::FunctionStatement
                | NodeType::AsyncFunctionStatement
                | NodeType::MatchStatement
                | NodeType::ImportStatement
        )
    }
}

/// The ordered list of top-level statements of one source buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program<'src> {
    pub nodes: Vec<Node<'src>>,
}

impl<'src> Program<'src> {
    pub fn new() -> Self {
        Program { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node<'src>) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Node<'src>> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Node::node_count).sum()
    }

    /// Releases every statement in order and returns the number of nodes
    /// released.
    pub fn release(self) -> usize {
        self.nodes.into_iter().map(Node::release).sum()
    }
}

impl<'a, 'src> IntoIterator for &'a Program<'src> {
    type Item = &'a Node<'src>;
    type IntoIter = Iter<'a, Node<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
