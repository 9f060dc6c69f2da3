use std::process;
use std::time::Instant;

use clap::Args;
use statrs::statistics::Statistics;

use nestloop::config::ExecConfig;

use super::{parse_demo, resolve_policy};

#[derive(Args)]
pub struct RunArgs {
    /// Kernel name (see `nestloop list`)
    pub kernel: String,
    /// Problem size (elements per dimension)
    #[arg(long, default_value_t = 1024)]
    pub size: usize,
    /// Outer loop policy: seq, simd or par (default: from config)
    #[arg(long)]
    pub policy: Option<String>,
    /// Timed repetitions (default: from config)
    #[arg(long)]
    pub repeat: Option<usize>,
}

pub fn cmd_run(args: RunArgs, config: &ExecConfig) {
    let demo = parse_demo(&args.kernel);
    let policy = resolve_policy(args.policy.as_deref(), config);
    let repeat = args.repeat.unwrap_or(config.repeat);
    if repeat == 0 {
        eprintln!("error: --repeat must be at least 1");
        process::exit(1);
    }
    if demo.elements(args.size).is_none() {
        eprintln!("error: --size {} is too large for {}", args.size, demo);
        process::exit(1);
    }

    let pool = match config.thread_pool() {
        Ok(pool) => pool,
        Err(diag) => {
            eprintln!("{}", diag);
            process::exit(1);
        }
    };
    tracing::info!(%demo, %policy, size = args.size, repeat, threads = pool.current_num_threads(), "running");

    let mut samples = Vec::with_capacity(repeat);
    let mut failed = None;
    for _ in 0..repeat {
        let start = Instant::now();
        let report = match pool.install(|| demo.run(policy, args.size)) {
            Ok(report) => report,
            Err(msg) => {
                eprintln!("error: {}", msg);
                process::exit(1);
            }
        };
        samples.push(start.elapsed().as_secs_f64() * 1e3);
        if !report.passed() {
            failed = Some(report);
            break;
        }
    }

    if let Some(report) = failed {
        eprintln!(
            "error: {} under {} produced {} wrong elements ({} of {} invocations)",
            demo, policy, report.mismatches, report.invocations, report.expected_invocations
        );
        process::exit(1);
    }

    let mean = samples.iter().mean();
    let std_dev = samples.iter().std_dev();
    eprintln!(
        "{} [{}] size {} x{}: verified",
        demo, policy, args.size, repeat
    );
    if std_dev.is_nan() {
        eprintln!("  time: {:.3} ms", mean);
    } else {
        eprintln!("  time: {:.3} ms ± {:.3} ms", mean, std_dev);
    }
}
