use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// A fatal problem with the run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read ignore file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        path: String,
        line: usize,
        pattern: String,
        message: String,
    },
    #[error("{path}:{line}: `!` must be followed by a symbol name")]
    EmptySymbol { path: String, line: usize },
    #[error("invalid ignore patterns in {path}: {message}")]
    Build { path: String, message: String },
    #[error("invalid rule configuration: {0}")]
    Rules(#[from] crate::types::UnknownRule),
}

/// Path and symbol exemptions read from an ignore file.
///
/// Each non-blank, non-comment line is either `!name` (an exact symbol name
/// whose violations are suppressed everywhere) or a gitignore-style path
/// pattern relative to the project root. Among path patterns the last match
/// wins and directory patterns exclude everything beneath them.
#[derive(Debug)]
pub struct IgnoreConfig {
    cwd: PathBuf,
    abs_root: PathBuf,
    paths: Gitignore,
    symbols: HashSet<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreConfig {
    /// A configuration that suppresses nothing.
    pub fn empty() -> Self {
        Self {
            cwd: PathBuf::new(),
            abs_root: PathBuf::new(),
            paths: Gitignore::empty(),
            symbols: HashSet::new(),
        }
    }

    /// Read the ignore file at `path`. A missing file is an empty configuration.
    pub fn load(root: &Path, path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse_named(root, &path.display().to_string(), &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no ignore file, nothing suppressed");
                Self::parse_named(root, "", "")
            }
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Parse ignore file text; patterns are anchored at `root`.
    pub fn parse(root: &Path, text: &str) -> Result<Self, ConfigError> {
        Self::parse_named(root, "<ignore>", text)
    }

    fn parse_named(root: &Path, origin: &str, text: &str) -> Result<Self, ConfigError> {
        let root = normalize_root(root);
        // Patterns are matched against root-relative paths.
        let mut builder = GitignoreBuilder::new("");
        let mut symbols = HashSet::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(symbol) = line.strip_prefix('!') {
                let symbol = symbol.trim();
                if symbol.is_empty() {
                    return Err(ConfigError::EmptySymbol {
                        path: origin.to_string(),
                        line: idx + 1,
                    });
                }
                symbols.insert(symbol.to_string());
                continue;
            }
            builder
                .add_line(None, line)
                .map_err(|e| ConfigError::InvalidPattern {
                    path: origin.to_string(),
                    line: idx + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                })?;
        }

        let paths = builder.build().map_err(|e| ConfigError::Build {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            patterns = paths.num_ignores(),
            symbols = symbols.len(),
            "loaded ignore configuration"
        );

        // Roots and candidate paths both resolve against the working directory.
        let cwd = std::env::current_dir().unwrap_or_default();
        let abs_root = cwd.join(&root);
        Ok(Self {
            cwd,
            abs_root,
            paths,
            symbols,
        })
    }

    /// Add symbol names to suppress.
    pub fn with_symbols<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether the file at `path` is excluded from analysis. Paths outside
    /// the root are never excluded.
    pub fn is_path_ignored(&self, path: &Path) -> bool {
        if self.paths.is_empty() {
            return false;
        }
        match self.relative_to_root(path) {
            Some(rel) if !rel.as_os_str().is_empty() => {
                self.paths.matched_path_or_any_parents(&rel, false).is_ignore()
            }
            _ => false,
        }
    }

    pub fn is_symbol_ignored(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    pub fn pattern_count(&self) -> u64 {
        self.paths.num_ignores()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    fn relative_to_root(&self, path: &Path) -> Option<PathBuf> {
        let absolute = self.cwd.join(path);
        let rel = absolute.strip_prefix(&self.abs_root).ok()?;
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| rel.to_path_buf())
    }
}

/// Drop a leading `./`; the current directory becomes the empty path.
fn normalize_root(root: &Path) -> PathBuf {
    let stripped = root.strip_prefix(".").unwrap_or(root);
    stripped.to_path_buf()
}
