use std::path::Path;

use stdcheck_core::types::Declaration;

// ---------------------------------------------------------------------------
// DeclarationSource trait
// ---------------------------------------------------------------------------

/// The abstraction every language front-end implements.
///
/// A source turns the text of one file into normalized [`Declaration`]s. The
/// enforcement engine never sees a syntax tree; it only consumes this trait,
/// so a different grammar can be plugged in without touching the rules.
///
/// Implementors must be `Send + Sync` so they can be shared across rayon
/// parallel iterators.
pub trait DeclarationSource: Send + Sync {
    /// Returns the canonical language name (e.g. "python").
    fn language(&self) -> &str;

    /// Whether this source knows how to read `path`.
    fn handles(&self, path: &Path) -> bool;

    /// Extract every declaration of one file, in source order, nested ones included.
    ///
    /// `path` is recorded verbatim in each declaration's location.
    fn declarations(&self, path: &Path, content: &str) -> Result<Declarations, ParseError>;
}

/// Declarations of one file, yielded in source order.
#[derive(Debug)]
pub struct Declarations {
    inner: std::vec::IntoIter<Declaration>,
}

impl Declarations {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            inner: declarations.into_iter(),
        }
    }
}

impl Iterator for Declarations {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Declarations {}

/// A file could not be turned into declarations. Never fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
    #[error("syntax error at line {line}")]
    Syntax { line: u32 },
}
