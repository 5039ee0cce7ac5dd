// Default documentation, optional suffix, and return type agreement.

use stdcheck_enforce::suppress::IgnoreConfig;
use stdcheck_enforce::types::RuleId;
use stdcheck_enforce::evaluate;

use super::common::declarations_at;

fn rules_for(source: &str) -> Vec<RuleId> {
    evaluate(&declarations_at("m.py", source), &IgnoreConfig::empty())
        .into_iter()
        .map(|v| v.rule_id)
        .collect()
}

fn with_default(annotation: &str, default: &str, doc_type: &str, doc_desc: &str) -> String {
    format!(
        r#"def f(value: {annotation} = {default}) -> None:
    """Do it.

    Args:
        value ({doc_type}): {doc_desc}
    """
"#
    )
}

#[test]
fn test_default_documented_correctly() {
    for (annotation, default) in [
        ("int", "0"),
        ("float", "1.5"),
        ("int", "-1"),
        ("str", "'x'"),
        ("tuple[int, int]", "(1, 2)"),
        ("int | None", "None"),
    ] {
        let source = with_default(
            annotation,
            default,
            &format!("{annotation}, optional"),
            &format!("the value; defaults to {default}"),
        );
        assert!(rules_for(&source).is_empty(), "{annotation} = {default}");
    }
}

#[test]
fn test_default_value_mismatch() {
    let source = with_default("int", "3", "int, optional", "the value; defaults to 4");
    assert_eq!(rules_for(&source), vec![RuleId::R15]);
}

#[test]
fn test_default_not_mentioned() {
    let source = with_default("int", "3", "int, optional", "the value");
    assert_eq!(rules_for(&source), vec![RuleId::R15]);
}

#[test]
fn test_string_default_without_quotes() {
    let source = with_default("str", "\"utf-8\"", "str, optional", "the encoding; defaults to utf-8");
    assert!(rules_for(&source).is_empty());
}

#[test]
fn test_type_mismatch_with_optional() {
    let source = with_default("int", "3", "str, optional", "the value; defaults to 3");
    assert_eq!(rules_for(&source), vec![RuleId::R12]);
}

#[test]
fn test_optional_without_default() {
    let source = r#"def f(value: int) -> None:
    """Do it.

    Args:
        value (int, optional): the value
    """
"#;
    assert_eq!(rules_for(source), vec![RuleId::R14]);
}

#[test]
fn test_return_type_checks() {
    let documented = |annotation: &str, doc_type: &str| {
        format!(
            "def f() -> {annotation}:\n    \"\"\"Do it.\n\n    Returns:\n        {doc_type}: the result\n    \"\"\"\n"
        )
    };
    assert!(rules_for(&documented("list[str]", "list[ str ]")).is_empty());
    assert_eq!(rules_for(&documented("list[str]", "list[int]")), vec![RuleId::R17]);
    assert_eq!(
        rules_for("def f() -> int:\n    \"\"\"Do it.\"\"\"\n"),
        vec![RuleId::R16]
    );
    assert!(rules_for("def f() -> None:\n    \"\"\"Do it.\"\"\"\n").is_empty());
}

#[test]
fn test_class_with_returns_section() {
    let source = "class Thing:\n    \"\"\"Hold a thing.\n\n    Returns:\n        int: nothing\n    \"\"\"\n";
    assert_eq!(rules_for(source), vec![RuleId::R17]);
}

#[test]
fn test_keyword_only_and_variadics() {
    let source = r#"def f(a: int, *args: int, flag: bool = False, **kwargs: str) -> None:
    """Do it.

    Args:
        a (int): the value
        flag (bool, optional): a switch; defaults to False
        *args (int): extra values
    """
"#;
    assert!(rules_for(source).is_empty());
}
