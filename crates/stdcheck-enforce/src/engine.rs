use std::path::PathBuf;

use rayon::prelude::*;
use stdcheck_core::types::Declaration;
use stdcheck_parsers::source::{DeclarationSource, ParseError};

use crate::consistency::check_consistency;
use crate::docstring::parse_docstring;
use crate::naming::check_declaration;
use crate::suppress::IgnoreConfig;
use crate::types::{CheckResult, Diagnostic, RuleSettings, Violation};

/// One source file, read up front by the caller.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// Evaluate declarations with the default rule settings.
///
/// Pure: the same declarations and configuration always produce the same
/// violations, sorted by file, line, and rule id.
pub fn evaluate(declarations: &[Declaration], config: &IgnoreConfig) -> Vec<Violation> {
    Engine::default().evaluate(declarations, config)
}

/// Runs the rule catalogue over declarations.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: RuleSettings,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RuleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn evaluate(&self, declarations: &[Declaration], config: &IgnoreConfig) -> Vec<Violation> {
        let mut violations = self.evaluate_unsorted(declarations, config);
        sort_violations(&mut violations);
        violations
    }

    /// Check every file that is not excluded by `config`.
    ///
    /// Files are processed in parallel on the current rayon pool. A file that
    /// fails to parse becomes a diagnostic and contributes no violations.
    pub fn analyze(
        &self,
        source: &dyn DeclarationSource,
        files: &[SourceFile],
        config: &IgnoreConfig,
    ) -> CheckResult {
        let (excluded, included): (Vec<&SourceFile>, Vec<&SourceFile>) = files
            .iter()
            .filter(|f| source.handles(&f.path))
            .partition(|f| config.is_path_ignored(&f.path));
        for file in &excluded {
            tracing::debug!(file = %file.path.display(), "excluded by ignore file");
        }

        let outcomes: Vec<Result<Vec<Violation>, Diagnostic>> = included
            .par_iter()
            .map(|file| {
                let declarations: Vec<Declaration> = source
                    .declarations(&file.path, &file.content)
                    .map_err(|e| parse_diagnostic(file, e))?
                    .collect();
                tracing::debug!(
                    file = %file.path.display(),
                    declarations = declarations.len(),
                    "checking file"
                );
                Ok(self.evaluate_unsorted(&declarations, config))
            })
            .collect();

        let mut violations = Vec::new();
        let mut diagnostics = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(found) => violations.extend(found),
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }
        sort_violations(&mut violations);

        let mut result = CheckResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: String::new(),
            files_analyzed: included.iter().map(|f| display_path(f)).collect(),
            files_excluded: excluded.iter().map(|f| display_path(f)).collect(),
            violations,
            diagnostics,
        };
        result.refresh_status();
        result
    }

    fn evaluate_unsorted(
        &self,
        declarations: &[Declaration],
        config: &IgnoreConfig,
    ) -> Vec<Violation> {
        declarations
            .par_iter()
            .filter(|d| !config.is_symbol_ignored(&d.name))
            .flat_map_iter(|d| self.evaluate_declaration(d, config))
            .filter(|v| self.settings.is_enabled(v.rule_id))
            .collect()
    }

    fn evaluate_declaration(&self, decl: &Declaration, config: &IgnoreConfig) -> Vec<Violation> {
        let mut violations = check_declaration(decl, config, &self.settings);

        if let Some(text) = &decl.docstring {
            let parsed = parse_docstring(text);
            violations.extend(
                parsed
                    .issues
                    .into_iter()
                    .filter(|issue| match issue.arg.as_deref() {
                        Some(name) => !config.is_symbol_ignored(name.trim_start_matches('*')),
                        None => true,
                    })
                    .map(|issue| Violation::new(issue.rule, decl, issue.message)),
            );
            // A blank docstring has no model to compare against.
            if !text.trim().is_empty() {
                violations.extend(check_consistency(decl, &parsed.model, config));
            }
        }

        violations
    }
}

/// Stable sort by (file, line, rule id); ties keep generation order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then(a.line.cmp(&b.line))
            .then(a.rule_id.cmp(&b.rule_id))
    });
}

fn display_path(file: &SourceFile) -> String {
    file.path.to_string_lossy().replace('\\', "/")
}

fn parse_diagnostic(file: &SourceFile, err: ParseError) -> Diagnostic {
    tracing::warn!(file = %file.path.display(), error = %err, "skipping file");
    let line = match err {
        ParseError::Syntax { line } => Some(line),
        _ => None,
    };
    Diagnostic {
        file: display_path(file),
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
