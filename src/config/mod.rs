//! Execution configuration (`nestloop.toml`).
//!
//! ```toml
//! [exec]
//! threads = 4        # rayon workers; absent = rayon default
//! policy = "par"     # policy used by demo kernels
//!
//! [run]
//! repeat = 5         # timed repetitions per `nestloop run`
//!
//! [log]
//! filter = "info"    # tracing filter when RUST_LOG is unset
//! ```
//!
//! Malformed values are errors; unknown sections and keys are warnings.

use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::policy::PolicyKind;
use crate::span::{Span, Spanned};


/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "nestloop.toml";

const KNOWN_KEYS: &str = "exec.threads, exec.policy, run.repeat, log.filter";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecConfig {
    /// Worker threads for parallel loops (`None` = one per core).
    pub threads: Option<usize>,
    /// Policy the demo kernels run under.
    pub policy: PolicyKind,
    /// Timed repetitions per run.
    pub repeat: usize,
    /// Default tracing filter directive.
    pub log_filter: String,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            threads: None,
            policy: PolicyKind::Seq,
            repeat: 5,
            log_filter: "warn".to_string(),
        }
    }
}

/// A parsed configuration plus the warnings raised while reading it.
#[derive(Clone, Debug)]
pub struct Parsed {
    pub config: ExecConfig,
    pub warnings: Vec<Diagnostic>,
}

impl ExecConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Parsed, Diagnostic> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Diagnostic::error(
                format!("cannot read config '{}': {}", path.display(), e),
                Span::dummy(),
            )
        })?;
        let parsed = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), warnings = parsed.warnings.len(), "config loaded");
        Ok(parsed)
    }

    /// Parse configuration text. Spans in the returned diagnostics index
    /// into `content`.
    pub fn parse(content: &str) -> Result<Parsed, Diagnostic> {
        let mut config = ExecConfig::default();
        let mut warnings = Vec::new();
        let mut section = String::new();

        for entry in entries(content) {
            match entry? {
                Entry::Section(name) => {
                    if !matches!(name.node.as_str(), "exec" | "run" | "log") {
                        warnings.push(
                            Diagnostic::warning(
                                format!("unknown section '[{}]'", name.node),
                                name.span,
                            )
                            .with_help(format!("known keys: {}", KNOWN_KEYS)),
                        );
                    }
                    section = name.node;
                }
                Entry::Pair { key, value } => match (section.as_str(), key.node.as_str()) {
                    ("exec", "threads") => {
                        config.threads = Some(positive(&value, "exec.threads")?);
                    }
                    ("exec", "policy") => {
                        config.policy = value.node.parse().map_err(|msg: String| {
                            Diagnostic::error(format!("invalid exec.policy: {}", msg), value.span)
                                .with_help("use \"seq\", \"simd\" or \"par\"".to_string())
                        })?;
                    }
                    ("run", "repeat") => config.repeat = positive(&value, "run.repeat")?,
                    ("log", "filter") => {
                        match tracing_subscriber::EnvFilter::try_new(&value.node) {
                            Ok(_) => config.log_filter = value.node,
                            Err(e) => warnings.push(
                                Diagnostic::warning(
                                    format!("invalid log.filter '{}': {}", value.node, e),
                                    value.span,
                                )
                                .with_note(format!(
                                    "using the default filter \"{}\"",
                                    config.log_filter
                                ))
                                .with_help(
                                    "use directives like \"info\" or \"nestloop=debug\""
                                        .to_string(),
                                ),
                            ),
                        }
                    }
                    _ => {
                        let full = if section.is_empty() {
                            key.node.clone()
                        } else {
                            format!("{}.{}", section, key.node)
                        };
                        warnings.push(
                            Diagnostic::warning(format!("unknown key '{}'", full), key.span)
                                .with_note("the key is ignored".to_string())
                                .with_help(format!("known keys: {}", KNOWN_KEYS)),
                        );
                    }
                },
            }
        }

        Ok(Parsed { config, warnings })
    }

    /// The explicit path if given, else `nestloop.toml` in `dir` if present.
    pub fn find(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let candidate = dir.join(CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    }

    /// Build the rayon pool parallel loops run in.
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool, Diagnostic> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("nestloop-worker-{}", i));
        if let Some(threads) = self.threads {
            builder = builder.num_threads(threads);
        }
        builder.build().map_err(|e| {
            Diagnostic::error(format!("cannot start thread pool: {}", e), Span::dummy())
        })
    }
}

// ─── Line parsing ──────────────────────────────────────────────────

enum Entry {
    Section(Spanned<String>),
    Pair {
        key: Spanned<String>,
        value: Spanned<String>,
    },
}

fn entries(content: &str) -> impl Iterator<Item = Result<Entry, Diagnostic>> + '_ {
    content.lines().filter_map(move |line| {
        let trimmed = strip_comment(line).trim();
        if trimmed.is_empty() {
            return None;
        }
        let span = Span::within(content, trimmed);

        if let Some(inner) = trimmed.strip_prefix('[') {
            return Some(match inner.strip_suffix(']') {
                Some(name) => {
                    let name = name.trim();
                    Ok(Entry::Section(Spanned::new(
                        name.to_string(),
                        Span::within(content, name),
                    )))
                }
                None => Err(Diagnostic::error(
                    "unterminated section header".to_string(),
                    span,
                )),
            });
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Some(Err(Diagnostic::error(
                format!("expected `key = value`, found '{}'", trimmed),
                span,
            )));
        };
        let key = key.trim();
        let value = value.trim();
        let unquoted = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        Some(Ok(Entry::Pair {
            key: Spanned::new(key.to_string(), Span::within(content, key)),
            value: Spanned::new(unquoted.to_string(), Span::within(content, value)),
        }))
    })
}

/// Drop a trailing `# comment`, ignoring `#` inside a quoted value.
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '#' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

fn positive(value: &Spanned<String>, key: &str) -> Result<usize, Diagnostic> {
    match value.node.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(Diagnostic::error(
            format!("{} must be at least 1", key),
            value.span,
        )),
        Err(_) => Err(Diagnostic::error(
            format!("invalid {}: '{}'", key, value.node),
            value.span,
        )
        .with_help("expected a positive integer".to_string())),
    }
}
