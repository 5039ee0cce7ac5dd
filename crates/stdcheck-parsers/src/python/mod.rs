use std::path::Path;

use stdcheck_core::canonical::{canonical_literal_text, canonical_type_text};
use stdcheck_core::types::{
    Declaration, DeclarationKind, DefaultLiteral, ParamKind, Parameter, SourceLocation,
};
use tree_sitter::Node;

use crate::source::{DeclarationSource, Declarations, ParseError};
use crate::treesitter::{detect_language, first_error_line, node_text, TreeSitterParser};

mod docstring;

pub use docstring::{clean_docstring, string_literal_value, unquote_string_literal};

/// tree-sitter-python backed declaration source.
///
/// A fresh parser is created per file, so one `PySource` can be shared by
/// every rayon worker without locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct PySource;

impl PySource {
    pub fn new() -> Self {
        PySource
    }
}

impl DeclarationSource for PySource {
    fn language(&self) -> &str {
        "python"
    }

    fn handles(&self, path: &Path) -> bool {
        detect_language(path) == Some("python")
    }

    fn declarations(&self, path: &Path, content: &str) -> Result<Declarations, ParseError> {
        let mut parser = TreeSitterParser::new();
        let source = content.as_bytes();
        let tree = parser.parse("python", source)?;
        let root = tree.root_node();
        if let Some(line) = first_error_line(root) {
            return Err(ParseError::Syntax { line });
        }

        let mut collector = Collector {
            source,
            file: path.to_string_lossy().replace('\\', "/"),
            out: Vec::new(),
        };
        collector.visit_children(root, Scope::Module);
        tracing::debug!(
            file = %collector.file,
            declarations = collector.out.len(),
            "extracted declarations"
        );
        Ok(Declarations::new(collector.out))
    }
}

/// Nearest enclosing definition of the node being visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    Class,
    Function,
}

struct Collector<'a> {
    source: &'a [u8],
    file: String,
    out: Vec<Declaration>,
}

impl<'a> Collector<'a> {
    fn visit_children(&mut self, node: Node<'a>, scope: Scope) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, scope, false);
        }
    }

    fn visit(&mut self, node: Node<'a>, scope: Scope, is_static: bool) {
        match node.kind() {
            "function_definition" => self.visit_function(node, scope, is_static),
            "class_definition" => self.visit_class(node),
            "decorated_definition" => {
                let is_static = has_staticmethod_decorator(node, self.source);
                if let Some(def) = node.child_by_field_name("definition") {
                    self.visit(def, scope, is_static);
                }
            }
            "assignment" | "augmented_assignment" | "for_statement" | "for_in_clause" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.visit_target(left);
                }
                self.visit_children(node, scope);
            }
            "named_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.visit_target(name);
                }
                self.visit_children(node, scope);
            }
            // `except E as e` also parses as `as_pattern`; only `with` targets count.
            "as_pattern" if node.parent().is_some_and(|p| p.kind() == "with_item") => {
                if let Some(alias) = node.child_by_field_name("alias") {
                    self.visit_target(alias);
                }
                self.visit_children(node, scope);
            }
            _ => self.visit_children(node, scope),
        }
    }

    /// Record every plain name bound by an assignment target. Attribute and
    /// subscript targets bind no new name.
    fn visit_target(&mut self, node: Node<'a>) {
        match node.kind() {
            "identifier" => self.push_variable(node),
            "as_pattern_target" if node.named_child_count() == 0 => self.push_variable(node),
            "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
            | "parenthesized_expression" | "tuple" | "list" | "expression_list"
            | "as_pattern_target" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit_target(child);
                }
            }
            _ => {}
        }
    }

    fn push_variable(&mut self, node: Node<'a>) {
        self.out.push(Declaration {
            kind: DeclarationKind::Variable,
            name: node_text(node, self.source).to_string(),
            params: Vec::new(),
            return_annotation: None,
            docstring: None,
            location: SourceLocation {
                file: self.file.clone(),
                line: node.start_position().row as u32 + 1,
            },
        });
    }

    fn visit_function(&mut self, node: Node<'a>, scope: Scope, is_static: bool) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let kind = if scope == Scope::Class {
            DeclarationKind::Method
        } else {
            DeclarationKind::Function
        };

        let mut params = node
            .child_by_field_name("parameters")
            .map(|p| extract_parameters(p, self.source))
            .unwrap_or_default();
        if kind == DeclarationKind::Method && !is_static {
            if let Some(first) = params.first_mut() {
                if first.kind == ParamKind::Regular {
                    first.kind = ParamKind::Receiver;
                }
            }
        }

        let return_annotation = node
            .child_by_field_name("return_type")
            .map(|t| canonical_type_text(&render_tokens(t, self.source)));
        let body = node.child_by_field_name("body");

        self.out.push(Declaration {
            kind,
            name: node_text(name_node, self.source).to_string(),
            params,
            return_annotation,
            docstring: body.and_then(|b| docstring_of(b, self.source)),
            location: self.location(node),
        });

        if let Some(body) = body {
            self.visit_children(body, Scope::Function);
        }
    }

    fn visit_class(&mut self, node: Node<'a>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let body = node.child_by_field_name("body");

        self.out.push(Declaration {
            kind: DeclarationKind::Class,
            name: node_text(name_node, self.source).to_string(),
            params: Vec::new(),
            return_annotation: None,
            docstring: body.and_then(|b| docstring_of(b, self.source)),
            location: self.location(node),
        });

        if let Some(body) = body {
            self.visit_children(body, Scope::Class);
        }
    }

    /// The `def`/`class` keyword line. `async def` shares its line with `def`.
    fn location(&self, node: Node<'_>) -> SourceLocation {
        let mut line = node.start_position().row;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(child.kind(), "def" | "class") {
                line = child.start_position().row;
                break;
            }
        }
        SourceLocation {
            file: self.file.clone(),
            line: line as u32 + 1,
        }
    }
}

fn has_staticmethod_decorator(node: Node<'_>, source: &[u8]) -> bool {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .any(|d| {
            let text = node_text(d, source).trim_start_matches('@').trim();
            text == "staticmethod"
        });
    found
}

fn extract_parameters(node: Node<'_>, source: &[u8]) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut keyword_only = false;
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        let regular = if keyword_only {
            ParamKind::KeywordOnly
        } else {
            ParamKind::Regular
        };
        match child.kind() {
            "identifier" => params.push(Parameter {
                name: node_text(child, source).to_string(),
                kind: regular,
                annotation: None,
                default: None,
            }),
            "typed_parameter" => {
                let annotation = child
                    .child_by_field_name("type")
                    .map(|t| canonical_type_text(&render_tokens(t, source)));
                let Some(target) = child.named_child(0) else {
                    continue;
                };
                let (name, kind) = match target.kind() {
                    "list_splat_pattern" => {
                        keyword_only = true;
                        (splat_name(target, source), ParamKind::VarPositional)
                    }
                    "dictionary_splat_pattern" => {
                        (splat_name(target, source), ParamKind::VarKeyword)
                    }
                    _ => (node_text(target, source).to_string(), regular),
                };
                params.push(Parameter {
                    name,
                    kind,
                    annotation,
                    default: None,
                });
            }
            "default_parameter" | "typed_default_parameter" => {
                let Some(name) = child.child_by_field_name("name") else {
                    continue;
                };
                params.push(Parameter {
                    name: node_text(name, source).to_string(),
                    kind: regular,
                    annotation: child
                        .child_by_field_name("type")
                        .map(|t| canonical_type_text(&render_tokens(t, source))),
                    default: child
                        .child_by_field_name("value")
                        .map(|v| default_literal(v, source)),
                });
            }
            "list_splat_pattern" => {
                keyword_only = true;
                params.push(Parameter {
                    name: splat_name(child, source),
                    kind: ParamKind::VarPositional,
                    annotation: None,
                    default: None,
                });
            }
            "dictionary_splat_pattern" => params.push(Parameter {
                name: splat_name(child, source),
                kind: ParamKind::VarKeyword,
                annotation: None,
                default: None,
            }),
            "keyword_separator" => keyword_only = true,
            _ => {}
        }
    }

    params
}

fn splat_name(node: Node<'_>, source: &[u8]) -> String {
    node_text(node, source).trim_start_matches('*').trim().to_string()
}

fn default_literal(node: Node<'_>, source: &[u8]) -> DefaultLiteral {
    DefaultLiteral {
        text: canonical_literal_text(&render_tokens(node, source)),
        contains_mutable: contains_mutable(node),
    }
}

/// True if a list/dict/set display or comprehension occurs anywhere under `node`.
fn contains_mutable(node: Node<'_>) -> bool {
    if matches!(
        node.kind(),
        "list" | "dictionary" | "set" | "list_comprehension" | "dictionary_comprehension"
            | "set_comprehension"
    ) {
        return true;
    }
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(contains_mutable);
    found
}

/// Re-render an expression from its leaf tokens.
///
/// Comments and line continuations are dropped. A single space is emitted
/// wherever the source had a gap between two tokens; the canonical
/// normalizer takes it from there.
fn render_tokens(node: Node<'_>, source: &[u8]) -> String {
    let mut out = String::new();
    let mut last_end = None;
    push_tokens(node, source, &mut out, &mut last_end);
    out
}

fn push_tokens(node: Node<'_>, source: &[u8], out: &mut String, last_end: &mut Option<usize>) {
    match node.kind() {
        "comment" | "line_continuation" => return,
        _ => {}
    }
    if node.kind() == "string" || node.child_count() == 0 {
        if last_end.is_some_and(|end| node.start_byte() > end) {
            out.push(' ');
        }
        out.push_str(node_text(node, source));
        *last_end = Some(node.end_byte());
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        push_tokens(child, source, out, last_end);
    }
}

/// The docstring of a `block`: its first statement, if that is a plain string.
fn docstring_of(body: Node<'_>, source: &[u8]) -> Option<String> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let literal = first.named_child(0)?;
    let raw = match literal.kind() {
        "string" => string_literal_value(node_text(literal, source))?.into_owned(),
        // Adjacent literals form one docstring.
        "concatenated_string" => {
            let mut cursor = literal.walk();
            let parts = literal
                .named_children(&mut cursor)
                .filter(|part| part.kind() == "string")
                .map(|part| string_literal_value(node_text(part, source)))
                .collect::<Option<Vec<_>>>()?;
            parts.concat()
        }
        _ => return None,
    };
    Some(clean_docstring(&raw))
}
