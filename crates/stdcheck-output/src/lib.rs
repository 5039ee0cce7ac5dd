//! Output formatters for stdcheck command results.
//!
//! Provides two output modes:
//! - **Human** (default): one block per violation, compiler style
//! - **JSON** (`--json`): Machine-readable structured output

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use stdcheck_enforce::types::{CheckResult, RulesResult};

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_rules(&self, result: &RulesResult) -> String;
}
