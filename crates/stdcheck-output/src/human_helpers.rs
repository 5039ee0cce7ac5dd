use stdcheck_enforce::types::{Diagnostic, Violation};

pub(crate) fn format_violation_human(v: &Violation) -> String {
    format!(
        "{}[{}]: {}\n  --> {}:{}\n   = {}: {}\n",
        v.severity.as_str(),
        v.rule_id,
        v.message,
        v.file,
        v.line,
        v.rule_id.name(),
        v.symbol,
    )
}

pub(crate) fn format_diagnostic_human(d: &Diagnostic) -> String {
    match d.line {
        Some(line) => format!("skipped: {}\n  --> {}:{}\n", d.message, d.file, line),
        None => format!("skipped: {}\n  --> {}\n", d.message, d.file),
    }
}
