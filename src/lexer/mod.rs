//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Pull-based scanning, one token per call
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position and line tracking for error reporting
//! - Comments and whitespace handling
//! - Lex errors, delivered as ordinary `Error` tokens

pub mod lexer;
pub mod tokens;
