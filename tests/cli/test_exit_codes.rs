// Exit code contract: 0 clean, 1 violations, 2 fatal configuration problems.

use super::common::{create_project, run_stdcheck, DOCUMENTED_ADD};

#[test]
fn test_exit_0_when_clean() {
    let (_dir, root) = create_project(&[("a.py", DOCUMENTED_ADD)]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(0));
}

#[test]
fn test_exit_0_for_empty_project() {
    let (_dir, root) = create_project(&[("README.md", "# nothing\n")]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(0));
}

#[test]
fn test_exit_1_on_violations() {
    let (_dir, root) = create_project(&[("a.py", "def f(x): pass\n")]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(1));
}

#[test]
fn test_exit_1_on_warnings_only() {
    let (_dir, root) = create_project(&[(
        "a.py",
        "def f() -> None:\n    \"\"\"no period\"\"\"\n",
    )]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(1));
}

#[test]
fn test_exit_2_on_invalid_pattern() {
    let (_dir, root) = create_project(&[
        (".standardignore", "src/[a-\n"),
        ("a.py", DOCUMENTED_ADD),
    ]);
    let output = run_stdcheck(&root, &["check"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("src/[a-"), "{stderr}");
}

#[test]
fn test_exit_2_on_empty_symbol() {
    let (_dir, root) = create_project(&[(".standardignore", "!\n"), ("a.py", DOCUMENTED_ADD)]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(2));
}

#[test]
fn test_exit_2_on_missing_root() {
    let (_dir, root) = create_project(&[]);
    let output = run_stdcheck(&root, &["check", "--root", "does-not-exist"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_exit_2_on_missing_path() {
    let (_dir, root) = create_project(&[("a.py", DOCUMENTED_ADD)]);
    let output = run_stdcheck(&root, &["check", "nope.py"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_exit_2_on_unknown_rule_in_config() {
    let (_dir, root) = create_project(&[
        (".stdcheck.json", r#"{"rules": {"disabled": ["R99"]}}"#),
        ("a.py", DOCUMENTED_ADD),
    ]);
    assert_eq!(run_stdcheck(&root, &["check"]).status.code(), Some(2));
}

#[test]
fn test_exit_2_on_unknown_rule_flag() {
    let (_dir, root) = create_project(&[("a.py", DOCUMENTED_ADD)]);
    let output = run_stdcheck(&root, &["check", "--disable", "R99"]);
    assert_eq!(output.status.code(), Some(2));
}
