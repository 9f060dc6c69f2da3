pub mod list;
pub mod run;
pub mod show;

use std::path::Path;
use std::process;

use nestloop::config::ExecConfig;
use nestloop::diagnostic::render_diagnostics;
use nestloop::{Demo, PolicyKind};

/// Locate and parse the configuration, exiting on malformed input.
pub fn resolve_config(explicit: Option<&Path>) -> ExecConfig {
    let cwd = Path::new(".");
    let Some(path) = ExecConfig::find(explicit, cwd) else {
        return ExecConfig::default();
    };
    let filename = path.display().to_string();
    let source = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read config '{}': {}", filename, e);
            process::exit(1);
        }
    };
    match ExecConfig::parse(&source) {
        Ok(parsed) => {
            render_diagnostics(&parsed.warnings, &filename, &source);
            parsed.config
        }
        Err(diag) => {
            render_diagnostics(&[diag], &filename, &source);
            process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn parse_demo(name: &str) -> Demo {
    match name.parse() {
        Ok(demo) => demo,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(1);
        }
    }
}

/// The `--policy` flag if given, else the configured policy.
pub fn resolve_policy(flag: Option<&str>, config: &ExecConfig) -> PolicyKind {
    let Some(name) = flag else {
        return config.policy;
    };
    match name.parse() {
        Ok(policy) => policy,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(1);
        }
    }
}
