use crate::OutputFormatter;
use stdcheck_enforce::types::{CheckResult, RulesResult};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_rules(&self, result: &RulesResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
