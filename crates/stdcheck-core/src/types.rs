use serde::{Deserialize, Serialize};

/// Declaration kinds produced by a declaration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Function,
    Method,
    Class,
    /// A name bound by assignment, `for`, `with ... as`, or `:=`.
    Variable,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Method => "method",
            DeclarationKind::Class => "class",
            DeclarationKind::Variable => "variable",
        }
    }

    /// Definitions that are expected to carry a docstring.
    pub fn is_definition(&self) -> bool {
        !matches!(self, DeclarationKind::Variable)
    }

    /// Functions and methods carry parameters and a return annotation.
    pub fn is_callable(&self) -> bool {
        matches!(self, DeclarationKind::Function | DeclarationKind::Method)
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter is bound in the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Implicit first parameter of a method (`self`, `cls`).
    Receiver,
    /// Plain positional-or-keyword (or positional-only) parameter.
    Regular,
    /// Parameter after `*` or `*args`.
    KeywordOnly,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

impl ParamKind {
    /// Checkable parameters must be annotated and documented.
    pub fn is_checkable(&self) -> bool {
        matches!(self, ParamKind::Regular | ParamKind::KeywordOnly)
    }
}

/// Canonical rendering of a parameter's default value expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultLiteral {
    pub text: String,
    /// True when a list/dict/set literal or comprehension appears anywhere
    /// inside the expression.
    pub contains_mutable: bool,
}

/// One parameter of a function or method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    /// Canonical type text of the annotation, if any.
    pub annotation: Option<String>,
    pub default: Option<DefaultLiteral>,
}

impl Parameter {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_checkable(&self) -> bool {
        self.kind.is_checkable()
    }
}

/// Where a declaration lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    /// 1-based line of the `def` / `class` keyword, or of the bound name.
    pub line: u32,
}

/// Normalized record of one function, method, or class signature, or of
/// one variable binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Empty for classes and variables.
    pub params: Vec<Parameter>,
    /// Canonical type text after `->`. Always `None` for classes and variables.
    pub return_annotation: Option<String>,
    /// Docstring with quotes stripped and indentation cleaned.
    pub docstring: Option<String>,
    pub location: SourceLocation,
}

impl Declaration {
    /// Parameters subject to annotation and documentation requirements.
    pub fn checkable_params(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.is_checkable())
    }

    pub fn find_param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// One documented argument from an `Args:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocArg {
    pub name: String,
    /// Documented type without the `, optional` suffix.
    pub type_text: String,
    pub optional: bool,
    pub description: String,
    /// 1-based line inside the docstring where the entry starts.
    pub line_offset: u32,
}

/// The single entry of a `Returns:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocReturn {
    pub type_text: String,
    pub description: String,
}

/// Structured parse of a docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocModel {
    pub summary: String,
    pub args: Vec<DocArg>,
    /// Set once an `Args:` header was seen, even if it had no entries.
    pub has_args_section: bool,
    pub returns: Option<DocReturn>,
}

impl DocModel {
    pub fn find_arg(&self, name: &str) -> Option<&DocArg> {
        self.args.iter().find(|a| a.name == name)
    }
}
