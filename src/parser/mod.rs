//! Parser module for building the syntax tree.
//!
//! This module contains the parser that pulls tokens from the lexer and
//! builds a [`Program`](crate::ast::ast::Program). It uses a Pratt parser
//! for expressions and handles:
//!
//! - Statement parsing (`import`, `let`/`let!`, `func`, `match`)
//! - Expression parsing (binary ops, calls, property access, pipelines,
//!   struct literals and updates, lambdas, `if` and `await`)
//! - Diagnostics collected on the parser
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
