// End-to-end rule scenarios: Python source in, ordered violations out.

use stdcheck_enforce::suppress::IgnoreConfig;
use stdcheck_enforce::types::{RuleId, Severity, Violation};
use stdcheck_enforce::evaluate;

use super::common::{declarations_at, DOCUMENTED_ADD};

fn check(source: &str) -> Vec<Violation> {
    evaluate(&declarations_at("pkg/mod.py", source), &IgnoreConfig::empty())
}

fn rules(violations: &[Violation]) -> Vec<RuleId> {
    violations.iter().map(|v| v.rule_id).collect()
}

#[test]
/// A bare function without annotations or docstring.
fn test_bare_function() {
    let v = check("def f(x): pass\n");
    assert_eq!(rules(&v), vec![RuleId::R4, RuleId::R5, RuleId::R7]);
    assert!(v.iter().all(|v| v.file == "pkg/mod.py" && v.line == 1));
}

#[test]
/// A function whose docstring matches its signature exactly.
fn test_documented_function_is_clean() {
    assert!(check(DOCUMENTED_ADD).is_empty());
}

#[test]
/// Dropping `, optional` on a defaulted parameter trips only R14.
fn test_missing_optional_suffix() {
    let source = DOCUMENTED_ADD.replace("b (int, optional)", "b (int)");
    assert_eq!(rules(&check(&source)), vec![RuleId::R14]);
}

#[test]
/// A lowercase class name with an unpunctuated summary.
fn test_bad_class() {
    let v = check("class badName:\n    \"\"\"does something\"\"\"\n");
    assert_eq!(rules(&v), vec![RuleId::R8, RuleId::R9]);
    assert_eq!(v[0].severity, Severity::Error);
    assert_eq!(v[1].severity, Severity::Warning);
    assert!(v.iter().all(|v| v.symbol == "badName"));
}

#[test]
/// Without checkable parameters no `Args:` section is required.
fn test_no_params_needs_no_args() {
    let source = "def ping() -> None:\n    \"\"\"Send a ping.\"\"\"\n";
    assert!(check(source).is_empty());
}

#[test]
/// An `Args:` entry on a parameterless function is stale.
fn test_args_on_parameterless_function() {
    let source = r#"def ping() -> None:
    """Send a ping.

    Args:
        host (str): where to send it
    """
"#;
    assert_eq!(rules(&check(source)), vec![RuleId::R13]);
}

#[test]
/// Mutable defaults are found at any depth.
fn test_nested_mutable_default() {
    let source = r#"def run(opts: tuple = (1, {"a": 2})) -> None:
    """Run it.

    Args:
        opts (tuple, optional): the options; defaults to (1, {"a": 2})
    """
"#;
    assert_eq!(rules(&check(source)), vec![RuleId::R6]);
}

#[test]
/// Documented types are compared after canonicalization.
fn test_type_spacing_is_irrelevant() {
    let source = r#"def merge(left: dict[str, list[int]], right: int | None = None) -> dict[str,list[int]]:
    """Merge two tables.

    Args:
        left (dict[ str , list[int] ]): the base table
        right (int|None, optional): extra value; defaults to None

    Returns:
        dict[str, list[ int ]]: the merged table
    """
"#;
    assert!(check(source).is_empty(), "{:?}", check(source));
}

#[test]
/// Methods ignore their receiver, static methods have none.
fn test_methods() {
    let source = r#"class Store:
    """Keep things."""

    def put(self, key: str) -> None:
        """Store a key.

        Args:
            key (str): the key
        """

    @staticmethod
    def make(size: int) -> "Store":
        """Build a store.

        Args:
            size (int): the capacity

        Returns:
            "Store": the new store
        """
"#;
    assert!(check(source).is_empty(), "{:?}", check(source));
}

#[test]
/// Structural docstring problems are reported as DOC.
fn test_doc_format_errors() {
    let source = r#"def run(a: int) -> int:
    """Run it.

    Args:
        a: the value

    Returns:
    """
"#;
    let v = check(source);
    assert_eq!(
        rules(&v),
        vec![RuleId::R11, RuleId::R16, RuleId::Doc, RuleId::Doc]
    );
}

#[test]
/// Every violation on a line is reported, sorted by rule id.
fn test_all_violations_reported() {
    let source = r#"def Run(X, y: str = "a") -> int:
    """Runs things

    Args:
        X (int): The value.
        y (int): a string
        z (int): gone
    """
"#;
    let v = check(source);
    assert_eq!(
        rules(&v),
        vec![
            RuleId::R1,
            RuleId::R1,
            RuleId::R3,
            RuleId::R3,
            RuleId::R5,
            RuleId::R9,
            RuleId::R12,
            RuleId::R13,
            RuleId::R14,
            RuleId::R15,
            RuleId::R16,
        ]
    );
}
