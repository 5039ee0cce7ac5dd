use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stdcheck_core::config::RulesConfig;
use stdcheck_core::types::Declaration;

/// Identifier of one rule in the catalogue.
///
/// Ordering follows the catalogue order and is used to break ties when
/// sorting violations on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    R16,
    R17,
    #[serde(rename = "DOC")]
    Doc,
}

impl RuleId {
    pub const ALL: [RuleId; 18] = [
        RuleId::R1,
        RuleId::R2,
        RuleId::R3,
        RuleId::R4,
        RuleId::R5,
        RuleId::R6,
        RuleId::R7,
        RuleId::R8,
        RuleId::R9,
        RuleId::R10,
        RuleId::R11,
        RuleId::R12,
        RuleId::R13,
        RuleId::R14,
        RuleId::R15,
        RuleId::R16,
        RuleId::R17,
        RuleId::Doc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::R1 => "R1",
            RuleId::R2 => "R2",
            RuleId::R3 => "R3",
            RuleId::R4 => "R4",
            RuleId::R5 => "R5",
            RuleId::R6 => "R6",
            RuleId::R7 => "R7",
            RuleId::R8 => "R8",
            RuleId::R9 => "R9",
            RuleId::R10 => "R10",
            RuleId::R11 => "R11",
            RuleId::R12 => "R12",
            RuleId::R13 => "R13",
            RuleId::R14 => "R14",
            RuleId::R15 => "R15",
            RuleId::R16 => "R16",
            RuleId::R17 => "R17",
            RuleId::Doc => "DOC",
        }
    }

    /// Short kebab-case name, accepted wherever a rule id is.
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::R1 => "snake-case",
            RuleId::R2 => "name-mangling",
            RuleId::R3 => "description-format",
            RuleId::R4 => "missing-docstring",
            RuleId::R5 => "missing-param-annotation",
            RuleId::R6 => "mutable-default",
            RuleId::R7 => "missing-return-annotation",
            RuleId::R8 => "pascal-case",
            RuleId::R9 => "summary-period",
            RuleId::R10 => "empty-docstring",
            RuleId::R11 => "missing-doc-arg",
            RuleId::R12 => "arg-type-mismatch",
            RuleId::R13 => "stale-doc-arg",
            RuleId::R14 => "optional-suffix",
            RuleId::R15 => "default-not-documented",
            RuleId::R16 => "missing-doc-return",
            RuleId::R17 => "return-type-mismatch",
            RuleId::Doc => "doc-format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleId::R1 => "function, method, parameter, and variable names must be snake_case",
            RuleId::R2 => "declaration names must not start with `__`",
            RuleId::R3 => "Args/Returns description clauses must start lowercase, not end with `.`, and hold no `:` in Args",
            RuleId::R4 => "every function, method, and class needs a docstring",
            RuleId::R5 => "every parameter needs a type annotation",
            RuleId::R6 => "default values must not contain list, dict, or set literals",
            RuleId::R7 => "every function and method needs a return annotation",
            RuleId::R8 => "class names must be PascalCase",
            RuleId::R9 => "the first summary line must end with `.`",
            RuleId::R10 => "docstrings and their summaries must not be empty",
            RuleId::R11 => "every parameter must be documented in `Args:`",
            RuleId::R12 => "documented argument types must match the annotation",
            RuleId::R13 => "documented arguments must exist in the signature",
            RuleId::R14 => "`, optional` must be present exactly when the parameter has a default",
            RuleId::R15 => "defaults must be documented as `defaults to <value>`",
            RuleId::R16 => "a non-None return annotation needs a `Returns:` section",
            RuleId::R17 => "the documented return type must match the annotation",
            RuleId::Doc => "docstrings must follow the Args/Returns section grammar",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            RuleId::R3 | RuleId::R9 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule `{0}`")]
pub struct UnknownRule(pub String);

impl FromStr for RuleId {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RuleId::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted) || r.name() == wanted)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One rule breach on one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: RuleId,
    pub severity: Severity,
    pub file: String,
    pub line: u32,
    /// Name of the declaration the violation belongs to.
    pub symbol: String,
    pub message: String,
}

impl Violation {
    pub fn new(rule_id: RuleId, decl: &Declaration, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity: rule_id.default_severity(),
            file: decl.location.file.clone(),
            line: decl.location.line,
            symbol: decl.name.clone(),
            message: message.into(),
        }
    }
}

/// A file-level problem that kept a file from being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: Option<u32>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error" | "warning"
    pub files_analyzed: Vec<String>,
    pub files_excluded: Vec<String>,
    pub violations: Vec<Violation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }

    /// Recompute `status` from the current violation list.
    pub fn refresh_status(&mut self) {
        self.status = if self.error_count() > 0 {
            "error"
        } else if self.warning_count() > 0 {
            "warning"
        } else {
            "ok"
        }
        .to_string();
    }
}

/// Per-run rule toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSettings {
    pub disabled: BTreeSet<RuleId>,
    /// Exempt `__dunder__` names from R2.
    pub allow_dunder_names: bool,
}

impl RuleSettings {
    pub fn from_config(config: &RulesConfig) -> Result<Self, UnknownRule> {
        let disabled = config
            .disabled
            .iter()
            .map(|r| r.parse())
            .collect::<Result<BTreeSet<RuleId>, _>>()?;
        Ok(Self {
            disabled,
            allow_dunder_names: config.allow_dunder_names,
        })
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        !self.disabled.contains(&rule)
    }
}

/// Catalogue entry, as listed by `stdcheck rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: RuleId,
    pub name: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResult {
    pub version: String,
    pub command: String,
    pub rules: Vec<RuleInfo>,
}

impl RulesResult {
    pub fn catalogue() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "rules".to_string(),
            rules: RuleId::ALL
                .into_iter()
                .map(|id| RuleInfo {
                    id,
                    name: id.name().to_string(),
                    severity: id.default_severity(),
                    description: id.description().to_string(),
                })
                .collect(),
        }
    }
}
