//! Syntax tree produced by the parser.
//!
//! Submodules:
//! - ast: node variants, match arms, struct fields and the `Program` root,
//!   with node counting and post-order release
//! - render: `Display` implementations printing a tree back as source-like text
pub mod ast;
pub mod render;

#[cfg(test)]
mod tests;
