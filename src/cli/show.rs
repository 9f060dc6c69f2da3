use clap::Args;
use nestloop::config::ExecConfig;

use super::{parse_demo, resolve_policy};

#[derive(Args)]
pub struct ShowArgs {
    /// Kernel name (see `nestloop list`)
    pub kernel: String,
    /// Outer loop policy: seq, simd or par (default: from config)
    #[arg(long)]
    pub policy: Option<String>,
}

pub fn cmd_show(args: ShowArgs, config: &ExecConfig) {
    let demo = parse_demo(&args.kernel);
    let policy = resolve_policy(args.policy.as_deref(), config);
    println!("{}", demo.describe(policy));
}
