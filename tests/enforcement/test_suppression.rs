// Ignore file behavior: path exclusion and symbol suppression.

use std::path::Path;

use stdcheck_enforce::engine::{Engine, SourceFile};
use stdcheck_enforce::suppress::{ConfigError, IgnoreConfig};
use stdcheck_enforce::evaluate;
use stdcheck_parsers::python::PySource;

use super::common::{create_project, declarations_at, DOCUMENTED_ADD};

const UNDOCUMENTED: &str = "def helper(x): pass\n\ndef setUp(self_): pass\n";

#[test]
fn test_symbol_suppression_is_exact_match() {
    let decls = declarations_at("m.py", UNDOCUMENTED);
    let config = IgnoreConfig::parse(Path::new("."), "!setUp\n").unwrap();
    let v = evaluate(&decls, &config);
    assert!(!v.is_empty());
    assert!(v.iter().all(|v| v.symbol == "helper"));

    let partial = IgnoreConfig::parse(Path::new("."), "!set\n").unwrap();
    assert!(evaluate(&decls, &partial).iter().any(|v| v.symbol == "setUp"));
}

#[test]
fn test_suppressing_every_symbol_silences_everything() {
    let decls = declarations_at("m.py", UNDOCUMENTED);
    let config = IgnoreConfig::parse(Path::new("."), "!helper\n!setUp\n").unwrap();
    assert!(evaluate(&decls, &config).is_empty());
}

#[test]
fn test_suppressed_class_keeps_its_methods() {
    let source = "class widget:\n    def Run(self): pass\n";
    let decls = declarations_at("m.py", source);
    let config = IgnoreConfig::empty().with_symbols(["widget"]);
    let v = evaluate(&decls, &config);
    assert!(!v.is_empty());
    assert!(v.iter().all(|v| v.symbol == "Run"));
}

#[test]
fn test_path_exclusion_from_disk() {
    let (_dir, root) = create_project(&[
        (".standardignore", "# generated\nbuild/\n*_pb2.py\n"),
        ("src/app.py", DOCUMENTED_ADD),
        ("build/out.py", UNDOCUMENTED),
        ("src/msg_pb2.py", UNDOCUMENTED),
    ]);
    let config = IgnoreConfig::load(&root, &root.join(".standardignore")).unwrap();

    assert!(config.is_path_ignored(&root.join("build/out.py")));
    assert!(config.is_path_ignored(&root.join("src/msg_pb2.py")));
    assert!(!config.is_path_ignored(&root.join("src/app.py")));

    let files: Vec<SourceFile> = ["src/app.py", "build/out.py", "src/msg_pb2.py"]
        .iter()
        .map(|rel| SourceFile {
            path: root.join(rel),
            content: std::fs::read_to_string(root.join(rel)).unwrap(),
        })
        .collect();
    let result = Engine::new().analyze(&PySource::new(), &files, &config);
    assert!(result.violations.is_empty());
    assert_eq!(result.files_analyzed.len(), 1);
    assert_eq!(result.files_excluded.len(), 2);
}

#[test]
fn test_negated_path_patterns_are_symbols() {
    let config = IgnoreConfig::parse(Path::new("."), "!keep.py\n").unwrap();
    assert!(config.is_symbol_ignored("keep.py"));
    assert_eq!(config.pattern_count(), 0);
}

#[test]
fn test_invalid_files_are_fatal() {
    let (_dir, root) = create_project(&[(".standardignore", "src/[a-\n")]);
    let err = IgnoreConfig::load(&root, &root.join(".standardignore")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { line: 1, .. }));
    assert!(err.to_string().contains("src/[a-"));

    let err = IgnoreConfig::parse(Path::new("."), "!  \n").unwrap_err();
    assert!(matches!(err, ConfigError::EmptySymbol { line: 1, .. }));
}
