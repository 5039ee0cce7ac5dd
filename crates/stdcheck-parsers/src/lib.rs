//! Declaration extraction for stdcheck.
//!
//! - [`source`]: the [`DeclarationSource`](source::DeclarationSource) capability trait
//! - [`treesitter`]: thin wrapper over the tree-sitter parser
//! - [`python`]: tree-sitter-python implementation of `DeclarationSource`
//! - [`walker`]: source file discovery

pub mod python;
pub mod source;
pub mod treesitter;
pub mod walker;
