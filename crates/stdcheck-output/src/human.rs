use crate::human_helpers::{format_diagnostic_human, format_violation_human};
use crate::OutputFormatter;
use stdcheck_enforce::types::{CheckResult, RulesResult};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.violations.is_empty() && result.diagnostics.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();

        for v in &result.violations {
            out.push_str(&format_violation_human(v));
        }
        for d in &result.diagnostics {
            out.push_str(&format_diagnostic_human(d));
        }

        out.push_str(&format!(
            "\n{} error(s), {} warning(s) in {} file(s)",
            result.error_count(),
            result.warning_count(),
            result.files_analyzed.len(),
        ));
        if !result.diagnostics.is_empty() {
            out.push_str(&format!(
                "; {} file(s) could not be parsed",
                result.diagnostics.len()
            ));
        }
        out.push('\n');

        out
    }

    fn format_rules(&self, result: &RulesResult) -> String {
        let name_width = result
            .rules
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for rule in &result.rules {
            out.push_str(&format!(
                "{:<4} {:<7} {:<name_width$}  {}\n",
                rule.id.as_str(),
                rule.severity.as_str(),
                rule.name,
                rule.description,
            ));
        }
        out
    }
}
