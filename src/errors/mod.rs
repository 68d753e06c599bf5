//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while scanning and parsing.
//! It includes:
//!
//! - Error structures with source position and line information
//! - Specific error variants for the lexer and the parser
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
