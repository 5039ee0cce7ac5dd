//! Consistency engine: cross-checks a declaration's signature against its
//! parsed docstring.
//!
//! Arguments are matched by name, never by position. Every check runs
//! independently, so one declaration can produce several violations.

use std::collections::HashMap;

use stdcheck_core::canonical::{canonical_literal_text, canonical_type_text};
use stdcheck_core::types::{Declaration, DocArg, DocModel, Parameter};

use crate::docstring::clauses;
use crate::suppress::IgnoreConfig;
use crate::types::{RuleId, Violation};

const DEFAULTS_TO: &str = "defaults to";

/// Run R11 to R17 for one declaration.
pub fn check_consistency(
    decl: &Declaration,
    doc: &DocModel,
    config: &IgnoreConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let documented: HashMap<&str, &DocArg> = doc
        .args
        .iter()
        .map(|arg| (arg.name.trim_start_matches('*'), arg))
        .collect();

    for param in decl
        .checkable_params()
        .filter(|p| !config.is_symbol_ignored(&p.name))
    {
        match documented.get(param.name.as_str()) {
            None => violations.push(Violation::new(
                RuleId::R11,
                decl,
                format!("parameter `{}` is not documented in `Args:`", param.name),
            )),
            Some(arg) => check_pair(decl, param, arg, &mut violations),
        }
    }

    for arg in &doc.args {
        let name = arg.name.trim_start_matches('*');
        if decl.find_param(name).is_none() && !config.is_symbol_ignored(name) {
            violations.push(Violation::new(
                RuleId::R13,
                decl,
                format!("documented argument `{name}` is not a parameter"),
            ));
        }
    }

    check_returns(decl, doc, &mut violations);
    violations
}

fn check_pair(decl: &Declaration, param: &Parameter, arg: &DocArg, out: &mut Vec<Violation>) {
    if let Some(annotation) = &param.annotation {
        let documented = canonical_type_text(&arg.type_text);
        if &documented != annotation {
            out.push(Violation::new(
                RuleId::R12,
                decl,
                format!(
                    "argument `{}` is documented as `{documented}` but annotated `{annotation}`",
                    param.name
                ),
            ));
        }
    }

    match (arg.optional, param.has_default()) {
        (false, true) => out.push(Violation::new(
            RuleId::R14,
            decl,
            format!(
                "argument `{}` has a default but is not documented as `, optional`",
                param.name
            ),
        )),
        (true, false) => out.push(Violation::new(
            RuleId::R14,
            decl,
            format!(
                "argument `{}` is documented as `, optional` but has no default",
                param.name
            ),
        )),
        _ => {}
    }

    let defaults_clause = clauses(&arg.description).find(|c| c.starts_with(DEFAULTS_TO));
    match (&param.default, defaults_clause) {
        (Some(default), clause) => {
            let documented = clause.is_some_and(|c| documents_default(c, &default.text));
            if !documented {
                out.push(Violation::new(
                    RuleId::R15,
                    decl,
                    format!(
                        "default of `{}` is not documented as `{DEFAULTS_TO} {}`",
                        param.name, default.text
                    ),
                ));
            }
        }
        (None, Some(_)) => out.push(Violation::new(
            RuleId::R15,
            decl,
            format!(
                "argument `{}` documents a default but has none",
                param.name
            ),
        )),
        (None, None) => {}
    }
}

/// Whether `defaults to <value>` names `literal`. A quoted string default may
/// be documented without its quotes or with the other quote character.
fn documents_default(clause: &str, literal: &str) -> bool {
    let Some(value) = clause.strip_prefix(DEFAULTS_TO) else {
        return false;
    };
    let value = value.trim();
    if canonical_literal_text(value) == literal {
        return true;
    }
    match (unquote(literal), unquote(value)) {
        (Some(bare), Some(documented)) => bare == documented,
        (Some(bare), None) => bare == value,
        _ => false,
    }
}

fn unquote(literal: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        literal
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

fn check_returns(decl: &Declaration, doc: &DocModel, out: &mut Vec<Violation>) {
    match (&doc.returns, &decl.return_annotation) {
        (Some(ret), Some(annotation)) => {
            let documented = canonical_type_text(&ret.type_text);
            if &documented != annotation {
                out.push(Violation::new(
                    RuleId::R17,
                    decl,
                    format!("return is documented as `{documented}` but annotated `{annotation}`"),
                ));
            }
        }
        (Some(ret), None) => out.push(Violation::new(
            RuleId::R17,
            decl,
            format!(
                "return is documented as `{}` but {} `{}` has no return annotation",
                canonical_type_text(&ret.type_text),
                decl.kind,
                decl.name
            ),
        )),
        (None, Some(annotation)) if annotation != "None" => out.push(Violation::new(
            RuleId::R16,
            decl,
            format!("return type `{annotation}` is not documented in `Returns:`"),
        )),
        _ => {}
    }
}
