//! Naming and signature rules: per-declaration predicates that need no
//! docstring parse.

use stdcheck_core::types::{Declaration, DeclarationKind};

use crate::suppress::IgnoreConfig;
use crate::types::{RuleId, RuleSettings, Violation};

/// Run R1, R2, R4, R5, R6, R7, and R8 on one declaration. Variables only
/// get the naming checks.
pub fn check_declaration(
    decl: &Declaration,
    config: &IgnoreConfig,
    settings: &RuleSettings,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let kind = decl.kind;

    if decl.name.starts_with("__") {
        if !(settings.allow_dunder_names && is_dunder(&decl.name)) {
            violations.push(Violation::new(
                RuleId::R2,
                decl,
                format!("{kind} `{}` uses the `__` name mangling prefix", decl.name),
            ));
        }
    } else if kind == DeclarationKind::Variable {
        if !is_variable_name(&decl.name) {
            violations.push(Violation::new(
                RuleId::R1,
                decl,
                format!("variable name `{}` is not snake_case", decl.name),
            ));
        }
    } else if kind == DeclarationKind::Class {
        if !is_pascal_case(&decl.name) {
            violations.push(Violation::new(
                RuleId::R8,
                decl,
                format!("class name `{}` is not PascalCase", decl.name),
            ));
        }
    } else if !is_snake_case(&decl.name) {
        violations.push(Violation::new(
            RuleId::R1,
            decl,
            format!("{kind} name `{}` is not snake_case", decl.name),
        ));
    }

    if kind.is_definition() && decl.docstring.is_none() {
        violations.push(Violation::new(
            RuleId::R4,
            decl,
            format!("{kind} `{}` has no docstring", decl.name),
        ));
    }

    for param in decl
        .params
        .iter()
        .filter(|p| !config.is_symbol_ignored(&p.name))
    {
        if !is_snake_case(&param.name) {
            violations.push(Violation::new(
                RuleId::R1,
                decl,
                format!("parameter name `{}` is not snake_case", param.name),
            ));
        }
        if param.is_checkable() && param.annotation.is_none() {
            violations.push(Violation::new(
                RuleId::R5,
                decl,
                format!("parameter `{}` has no type annotation", param.name),
            ));
        }
        if let Some(default) = param.default.as_ref().filter(|d| d.contains_mutable) {
            violations.push(Violation::new(
                RuleId::R6,
                decl,
                format!(
                    "parameter `{}` has a mutable default `{}`",
                    param.name, default.text
                ),
            ));
        }
    }

    if kind.is_callable() && decl.return_annotation.is_none() {
        violations.push(Violation::new(
            RuleId::R7,
            decl,
            format!("{kind} `{}` has no return annotation", decl.name),
        ));
    }

    violations
}

/// `_?[a-z][a-z0-9]*(_[a-z0-9]+)*`
pub fn is_snake_case(name: &str) -> bool {
    let body = name.strip_prefix('_').unwrap_or(name);
    if !body.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return false;
    }
    body.split('_').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}

/// Variables may also be `UPPER_CASE` constants or start with `_`.
fn is_variable_name(name: &str) -> bool {
    name.starts_with('_') || is_snake_case(name) || is_constant_case(name)
}

/// `[A-Z0-9_]*` with at least one letter.
pub fn is_constant_case(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// `_?[A-Z][A-Za-z0-9]*`
pub fn is_pascal_case(name: &str) -> bool {
    let body = name.strip_prefix('_').unwrap_or(name);
    body.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && body.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
