use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::{Token, TokenKind}};

use super::{expr::*, parser::Parser, stmt::*};

/// Left binding powers, weakest first. The derived ordering follows the
/// discriminants, so `>` compares precedence.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(u8)]
pub enum BindingPower {
    Default = 0,
    Assignment = 1,
    Pipeline = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    Equality = 8,
    Relational = 9,
    Additive = 10,
    Multiplicative = 20,
    Unary = 25,
    Call = 30,
    Member = 40,
    StructUpdate = 50,
}

impl BindingPower {
    pub fn value(self) -> u8 {
        self as u8
    }
}

pub type StmtHandler<'src> = fn(&mut Parser<'src>) -> Result<Node<'src>, Error>;
pub type NUDHandler<'src> = fn(&mut Parser<'src>, Token<'src>) -> Result<Node<'src>, Error>;
pub type LEDHandler<'src> =
    fn(&mut Parser<'src>, Node<'src>, Token<'src>, BindingPower) -> Result<Node<'src>, Error>;

pub type StmtLookup<'src> = HashMap<TokenKind, StmtHandler<'src>>;
pub type NUDLookup<'src> = HashMap<TokenKind, NUDHandler<'src>>;
pub type LEDLookup<'src> = HashMap<TokenKind, LEDHandler<'src>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

/// Per-token parse rules: statement handlers, prefix (NUD) and infix (LED)
/// handlers, and left binding powers.
///
/// Built once by [`RuleTable::new`] when a parser is constructed and never
/// modified afterwards.
pub struct RuleTable<'src> {
    stmt_lookup: StmtLookup<'src>,
    nud_lookup: NUDLookup<'src>,
    led_lookup: LEDLookup<'src>,
    binding_power_lookup: BPLookup,
}

impl<'src> RuleTable<'src> {
    pub fn new() -> Self {
        let mut table = RuleTable {
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        table.register_led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
        table.register_led(TokenKind::Pipeline, BindingPower::Pipeline, parse_pipeline_expr);

        // Logical
        table.register_led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
        table.register_led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

        // Equality and relational
        table.register_led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
        table.register_led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
        table.register_led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
        table.register_led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
        table.register_led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
        table.register_led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

        // Additive and multiplicative
        table.register_led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
        table.register_led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
        table.register_led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
        table.register_led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

        table.register_led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
        table.register_led(TokenKind::Dot, BindingPower::Member, parse_property_expr);
        table.register_led(TokenKind::OpenCurly, BindingPower::StructUpdate, parse_struct_update_expr);

        // Literals and symbols
        table.register_nud(TokenKind::Number, parse_literal_expr);
        table.register_nud(TokenKind::String, parse_literal_expr);
        table.register_nud(TokenKind::True, parse_bool_expr);
        table.register_nud(TokenKind::False, parse_bool_expr);
        table.register_nud(TokenKind::Identifier, parse_variable_expr);

        // Prefix forms
        table.register_nud(TokenKind::OpenParen, parse_grouping_expr);
        table.register_nud(TokenKind::OpenBracket, parse_list_expr);
        table.register_nud(TokenKind::OpenCurly, parse_struct_literal_expr);
        table.register_nud(TokenKind::Fn, parse_lambda_expr);
        table.register_nud(TokenKind::Dash, parse_unary_expr);
        table.register_nud(TokenKind::Not, parse_unary_expr);
        table.register_nud(TokenKind::If, parse_if_expr);
        table.register_nud(TokenKind::Await, parse_await_expr);
        table.register_nud(TokenKind::Async, parse_async_expr);

        // Statements
        table.register_stmt(TokenKind::Import, parse_import_stmt);
        table.register_stmt(TokenKind::Let, parse_let_stmt);
        table.register_stmt(TokenKind::LetBang, parse_let_stmt);
        table.register_stmt(TokenKind::Func, parse_func_stmt);
        table.register_stmt(TokenKind::Async, parse_async_stmt);
        table.register_stmt(TokenKind::Match, parse_match_stmt);

        table
    }

    fn register_led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<'src>) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    fn register_nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<'src>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    fn register_stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<'src>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Prefix handler for `kind`. Tokens that cannot start an expression get
    /// the default handler, which reports the failure.
    pub fn nud(&self, kind: TokenKind) -> NUDHandler<'src> {
        self.nud_lookup
            .get(&kind)
            .copied()
            .unwrap_or(parse_missing_expr as NUDHandler<'src>)
    }

    pub fn led(&self, kind: TokenKind) -> Option<LEDHandler<'src>> {
        self.led_lookup.get(&kind).copied()
    }

    pub fn stmt(&self, kind: TokenKind) -> Option<StmtHandler<'src>> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn bp(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

impl Default for RuleTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}
