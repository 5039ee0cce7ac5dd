use std::path::Path;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::source::ParseError;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&mut self, lang_name: &str, source: &[u8]) -> Result<Tree, ParseError> {
        let lang = language_for_name(lang_name)?;
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        self.parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

fn language_for_name(name: &str) -> Result<Language, ParseError> {
    match name {
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        other => Err(ParseError::UnsupportedLanguage(other.to_string())),
    }
}

pub(crate) fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line of the first `ERROR` or missing node under `root`.
pub(crate) fn first_error_line(root: Node<'_>) -> Option<u32> {
    if root.is_error() || root.is_missing() {
        return Some(root.start_position().row as u32 + 1);
    }
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    Some(root.start_position().row as u32 + 1)
}

pub fn detect_language(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "py" | "pyi" => Some("python"),
        _ => None,
    }
}
