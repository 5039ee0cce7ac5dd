// Declaration extraction from realistic Python modules.

use std::path::Path;

use stdcheck_core::types::{DeclarationKind, ParamKind};
use stdcheck_parsers::python::PySource;
use stdcheck_parsers::source::{DeclarationSource, ParseError};

use super::common::declarations_at;

const SERVICE: &str = r#"import typing
"""Module level strings are not declarations."""

# helpers follow


class Service(Base, metaclass=Meta):
    """Serve requests.

    Longer text.
    """

    retries: int = 3

    def __init__(self, name: str, *, timeout: float = 1.0) -> None:
        """Create the service."""
        self.name = name

    @classmethod
    def create(cls, **options: typing.Any) -> "Service":
        return cls(**options)

    @staticmethod
    def version() -> str:
        return "1"

    async def handle(self, request, /, *args) -> None:
        def inner(x: int) -> int:
            return x

        class Local:
            pass


def main(argv: list[str] | None = None) -> int:
    '''Entry point.'''
    return 0
"#;

#[test]
fn test_service_module() {
    let decls = declarations_at("svc/service.py", SERVICE);
    let summary: Vec<(DeclarationKind, &str, u32)> = decls
        .iter()
        .map(|d| (d.kind, d.name.as_str(), d.location.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            (DeclarationKind::Class, "Service", 7),
            (DeclarationKind::Variable, "retries", 13),
            (DeclarationKind::Method, "__init__", 15),
            (DeclarationKind::Method, "create", 20),
            (DeclarationKind::Method, "version", 24),
            (DeclarationKind::Method, "handle", 27),
            (DeclarationKind::Function, "inner", 28),
            (DeclarationKind::Class, "Local", 31),
            (DeclarationKind::Function, "main", 35),
        ]
    );
    assert!(decls.iter().all(|d| d.location.file == "svc/service.py"));
}

#[test]
fn test_service_parameters() {
    let decls: Vec<_> = declarations_at("service.py", SERVICE)
        .into_iter()
        .filter(|d| d.kind.is_definition())
        .collect();

    let init = &decls[1];
    let kinds: Vec<ParamKind> = init.params.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![ParamKind::Receiver, ParamKind::Regular, ParamKind::KeywordOnly]
    );
    assert_eq!(init.params[2].default.as_ref().unwrap().text, "1.0");
    assert_eq!(init.docstring.as_deref(), Some("Create the service."));

    let create = &decls[2];
    assert_eq!(create.params[0].kind, ParamKind::Receiver);
    assert_eq!(create.params[1].kind, ParamKind::VarKeyword);
    assert_eq!(create.params[1].annotation.as_deref(), Some("typing.Any"));
    assert_eq!(create.return_annotation.as_deref(), Some("\"Service\""));
    assert!(create.docstring.is_none());

    assert!(decls[3].params.is_empty());

    let handle = &decls[4];
    let kinds: Vec<ParamKind> = handle.params.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![ParamKind::Receiver, ParamKind::Regular, ParamKind::VarPositional]
    );

    let main = &decls[7];
    assert_eq!(main.params[0].annotation.as_deref(), Some("list[str] | None"));
    assert_eq!(main.docstring.as_deref(), Some("Entry point."));
}

#[test]
fn test_class_docstring_is_cleaned() {
    let decls = declarations_at("service.py", SERVICE);
    assert_eq!(
        decls[0].docstring.as_deref(),
        Some("Serve requests.\n\nLonger text.")
    );
}

#[test]
fn test_declarations_iterator() {
    let decls = PySource::new()
        .declarations(Path::new("m.py"), "def a(): pass\ndef b(): pass\n")
        .unwrap();
    assert_eq!(decls.len(), 2);
    let names: Vec<String> = decls.map(|d| d.name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_empty_module() {
    assert!(declarations_at("m.py", "").is_empty());
    let decls = declarations_at("m.py", "# just a comment\nx = 1\n");
    assert_eq!(decls.len(), 1);
    assert_eq!(decls[0].kind, DeclarationKind::Variable);
    assert_eq!(decls[0].location.line, 2);
}

#[test]
fn test_syntax_error_line() {
    let err = PySource::new()
        .declarations(Path::new("m.py"), "def ok(): pass\n\nclass Broken(:\n    pass\n")
        .unwrap_err();
    match err {
        ParseError::Syntax { line } => assert!(line >= 3, "line {line}"),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_stub_files_are_python() {
    let source = PySource::new();
    assert_eq!(source.language(), "python");
    assert!(source.handles(Path::new("pkg/types.pyi")));
    assert!(source.handles(Path::new("pkg/mod.py")));
    assert!(!source.handles(Path::new("pkg/mod.pyc")));
}
