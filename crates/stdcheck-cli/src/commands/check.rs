use std::collections::HashSet;
use std::path::{Path, PathBuf};

use stdcheck_core::config::StdcheckConfig;
use stdcheck_enforce::engine::{Engine, SourceFile};
use stdcheck_enforce::suppress::IgnoreConfig;
use stdcheck_enforce::types::{Diagnostic, RuleId, RuleSettings};
use stdcheck_output::OutputFormatter;
use stdcheck_parsers::python::PySource;
use stdcheck_parsers::walker::FileWalker;

/// Flags of `stdcheck check`.
pub struct CheckOptions {
    pub paths: Vec<PathBuf>,
    pub root: PathBuf,
    pub ignore_file: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub disable: Vec<RuleId>,
    pub allow_dunder_names: bool,
}

/// Run `stdcheck check [PATHS]` -- check Python sources.
///
/// Exit codes: 0 when there are no violations, 1 when there is at least one,
/// 2 for configuration errors or an unreadable root.
pub fn run(formatter: &dyn OutputFormatter, opts: CheckOptions) -> i32 {
    if let Err(e) = std::fs::metadata(&opts.root) {
        eprintln!("stdcheck check: cannot read root {}: {}", opts.root.display(), e);
        return 2;
    }

    let config = StdcheckConfig::load(&opts.root);
    let mut settings = match RuleSettings::from_config(&config.rules) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("stdcheck check: invalid rule configuration: {}", e);
            return 2;
        }
    };
    settings.disabled.extend(opts.disable.iter().copied());
    settings.allow_dunder_names |= opts.allow_dunder_names;

    let ignore_path = opts
        .ignore_file
        .clone()
        .unwrap_or_else(|| opts.root.join(&config.ignore_file));
    let ignore = match IgnoreConfig::load(&opts.root, &ignore_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("stdcheck check: {}", e);
            return 2;
        }
    };

    let targets = if opts.paths.is_empty() {
        vec![opts.root.clone()]
    } else {
        opts.paths.clone()
    };
    for target in &targets {
        if !target.exists() {
            eprintln!("stdcheck check: no such file or directory: {}", target.display());
            return 2;
        }
    }

    let (files, read_failures) = read_sources(&targets);
    tracing::debug!(files = files.len(), "read source files");

    let jobs = opts.jobs.unwrap_or(config.jobs);
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("stdcheck check: failed to start worker pool: {}", e);
            return 2;
        }
    };

    let engine = Engine::with_settings(settings);
    let source = PySource::new();
    let mut result = pool.install(|| engine.analyze(&source, &files, &ignore));
    result.diagnostics.extend(read_failures);
    result.diagnostics.sort_by(|a, b| a.file.cmp(&b.file));

    let out = formatter.format_check(&result);
    if !out.is_empty() {
        println!("{}", out.trim_end());
    }

    if result.violations.is_empty() {
        0
    } else {
        1
    }
}

/// Walk every target and read each file once. Unreadable files become
/// diagnostics.
fn read_sources(targets: &[PathBuf]) -> (Vec<SourceFile>, Vec<Diagnostic>) {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for target in targets {
        for entry in FileWalker::new(target).walk() {
            let path = strip_dot(&entry.path);
            if !seen.insert(path.clone()) {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => files.push(SourceFile { path, content }),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "cannot read file");
                    failures.push(Diagnostic {
                        file: path.to_string_lossy().replace('\\', "/"),
                        line: None,
                        message: format!("cannot read file: {e}"),
                    });
                }
            }
        }
    }

    (files, failures)
}

/// `./pkg/mod.py` reads better as `pkg/mod.py`.
fn strip_dot(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}
